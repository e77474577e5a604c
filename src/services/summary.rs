//! Summary services - Aggregati per la dashboard (budget, andamento mensile, spese maggiori)

use crate::core::{AppError, AppState, CurrentUser};
use crate::dtos::{MonthlySpendingDTO, SummaryDTO, TransactionDTO};
use crate::entities::{Settings, Transaction};
use crate::repositories::Read;
use axum::{
    Extension,
    extract::{Json, State},
};
use chrono::{Datelike, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{debug, instrument};

const MONTHLY_WINDOW: u32 = 12;
const TOP_EXPENSES: usize = 5;

/// Mesi di calendario da `start` a `today` inclusi (0 se `start` è nel futuro)
pub fn months_active(start: NaiveDate, today: NaiveDate) -> u32 {
    let months = (today.year() - start.year()) * 12 + today.month() as i32 - start.month() as i32 + 1;
    months.max(0) as u32
}

/// Chiave (anno, mese) spostata indietro di `back` mesi
fn shift_month(year: i32, month: u32, back: u32) -> (i32, u32) {
    let index = year * 12 + month as i32 - 1 - back as i32;
    (index.div_euclid(12), index.rem_euclid(12) as u32 + 1)
}

/// Calcola il riepilogo di un utente rispetto alla data `today`
pub fn build_summary(
    transactions: &[Transaction],
    settings: &Settings,
    today: NaiveDate,
) -> SummaryDTO {
    let currency = settings.currency;
    let months = months_active(settings.start_date, today);

    let total_allowance = months as f64 * settings.allowance;
    let total_expenses: f64 = transactions.iter().map(|t| t.amount).sum();
    let balance = total_allowance - total_expenses;

    let monthly = (0..months.min(MONTHLY_WINDOW))
        .rev()
        .map(|back| {
            let (year, month) = shift_month(today.year(), today.month(), back);
            let spending: f64 = transactions
                .iter()
                .filter(|t| t.date.year() == year && t.date.month() == month)
                .map(|t| t.amount)
                .sum();
            MonthlySpendingDTO {
                month: format!("{:04}-{:02}", year, month),
                spending: currency.round(spending),
                allowance: currency.round(settings.allowance),
            }
        })
        .collect();

    let mut largest: Vec<&Transaction> = transactions.iter().collect();
    largest.sort_by(|a, b| {
        b.amount
            .total_cmp(&a.amount)
            .then_with(|| b.date.cmp(&a.date))
    });
    let top_expenses = largest
        .into_iter()
        .take(TOP_EXPENSES)
        .cloned()
        .map(TransactionDTO::from)
        .collect();

    SummaryDTO {
        currency,
        currency_symbol: currency.symbol().to_string(),
        months_active: months,
        total_allowance: currency.round(total_allowance),
        total_expenses: currency.round(total_expenses),
        balance: currency.round(balance),
        over_budget: balance < 0.0,
        monthly,
        top_expenses,
    }
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn get_summary(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<SummaryDTO>, AppError> {
    let user = state
        .user
        .read(&current_user.id)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let transactions = state
        .transaction
        .find_many_by_user_id(&current_user.id)
        .await?;
    debug!("Building summary over {} transactions", transactions.len());

    let today = Utc::now().date_naive();
    Ok(Json(build_summary(&transactions, &user.settings, today)))
}
