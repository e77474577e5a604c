//! Settings DTOs - impostazioni utente (allowance, data di inizio, valuta)

use crate::entities::{Currency, Settings};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SettingsDTO {
    pub allowance: f64,
    pub start_date: NaiveDate,
    pub currency: Currency,
}

impl From<Settings> for SettingsDTO {
    fn from(value: Settings) -> Self {
        Self {
            allowance: value.allowance,
            start_date: value.start_date,
            currency: value.currency,
        }
    }
}

/// Body di PUT /auth/settings: solo i campi presenti vengono modificati
#[derive(Deserialize, Debug, Default, Clone, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateSettingsDTO {
    #[validate(range(min = 0.0, message = "Allowance cannot be negative"))]
    pub allowance: Option<f64>,
    pub start_date: Option<NaiveDate>,
    pub currency: Option<Currency>,
}
