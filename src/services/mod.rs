//! Services module - Coordinatore per tutti i service handler HTTP
//!
//! Questo modulo organizza i service handlers in sotto-moduli separati per una migliore manutenibilità.
//! Ogni modulo gestisce gli endpoint HTTP per una specifica funzionalità.

pub mod auth;
pub mod summary;
pub mod transaction;

// Re-exports per facilitare l'import
pub use auth::{
    current_user, login_user, register_user, signup_status, update_user_settings,
    warm_up_dummy_hash,
};
pub use summary::get_summary;
pub use transaction::{
    create_transaction, delete_transaction, import_transactions, list_transactions,
    update_transaction,
};

use crate::core::AppState;
use axum::{extract::State, http::StatusCode, response::IntoResponse};
use std::sync::Arc;

/// Root endpoint - health check
pub async fn root(State(_state): State<Arc<AppState>>) -> impl IntoResponse {
    (StatusCode::OK, "Server is running!")
}
