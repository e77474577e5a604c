//! Settings entity - Impostazioni per utente (embedded nella tabella users)

use super::enums::Currency;
use chrono::{NaiveDate, Utc};

/// Allowance mensile di default per i nuovi utenti
pub const DEFAULT_ALLOWANCE: f64 = 500.0;

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Settings {
    pub allowance: f64,
    pub start_date: NaiveDate,
    pub currency: Currency,
}

impl Settings {
    /// Impostazioni iniziali: allowance di default, inizio oggi (UTC), CZK
    pub fn new_default() -> Self {
        Self {
            allowance: DEFAULT_ALLOWANCE,
            start_date: Utc::now().date_naive(),
            currency: Currency::default(),
        }
    }
}
