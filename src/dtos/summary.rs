//! Summary DTOs - dati aggregati per la dashboard

use super::transaction::TransactionDTO;
use crate::entities::Currency;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlySpendingDTO {
    /// Mese nel formato `YYYY-MM`
    pub month: String,
    pub spending: f64,
    pub allowance: f64,
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SummaryDTO {
    pub currency: Currency,
    pub currency_symbol: String,
    pub months_active: u32,
    pub total_allowance: f64,
    pub total_expenses: f64,
    pub balance: f64,
    pub over_budget: bool,
    pub monthly: Vec<MonthlySpendingDTO>,
    pub top_expenses: Vec<TransactionDTO>,
}
