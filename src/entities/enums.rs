//! Enumerazioni - Tipi enumerati utilizzati nelle entità

use serde::{Deserialize, Serialize};

// ********************* ENUMERAZIONI UTILI **********************//

/// Valute supportate per l'allowance; nessuna conversione tra valute
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Default, sqlx::Type)]
#[serde(rename_all = "UPPERCASE")]
#[sqlx(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Czk,
    Usd,
    Eur,
    Gbp,
}

impl Currency {
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Czk => "Kč",
            Currency::Usd => "$",
            Currency::Eur => "€",
            Currency::Gbp => "£",
        }
    }

    /// Cifre decimali usate per mostrare gli importi
    pub fn decimals(&self) -> u32 {
        match self {
            Currency::Czk => 0,
            Currency::Usd | Currency::Eur | Currency::Gbp => 2,
        }
    }

    /// Arrotonda un importo alle cifre decimali della valuta
    pub fn round(&self, amount: f64) -> f64 {
        let factor = 10f64.powi(self.decimals() as i32);
        (amount * factor).round() / factor
    }
}
