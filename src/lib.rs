//! Server library - espone i moduli principali per i test

pub mod core;
pub mod dtos;
pub mod entities;
pub mod import;
pub mod repositories;
pub mod services;

// Re-export dei tipi principali per facilitare l'import
pub use crate::core::{AppError, AppState, auth, config};
pub use services::root;

use axum::{
    Router, middleware,
    routing::{get, post, put},
};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

/// Crea il router principale dell'applicazione
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root))
        .nest("/auth", configure_auth_routes(state.clone()))
        .nest("/transactions", configure_transaction_routes(state.clone()))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Configura le routes di autenticazione (login, register, profilo)
fn configure_auth_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    // Rotte che NON richiedono autenticazione
    let public_routes = Router::new()
        .route("/login", post(login_user))
        .route("/register", post(register_user))
        .route("/signup-status", get(signup_status));

    // Rotte dell'utente autenticato
    let protected_routes = Router::new()
        .route("/me", get(current_user))
        .route("/settings", put(update_user_settings))
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ));

    public_routes.merge(protected_routes)
}

/// Configura le routes per la gestione delle spese
fn configure_transaction_routes(state: Arc<AppState>) -> Router<Arc<AppState>> {
    use crate::core::authentication_middleware;
    use services::*;

    Router::new()
        .route("/", get(list_transactions).post(create_transaction))
        .route("/summary", get(get_summary))
        .route("/import", post(import_transactions))
        .route(
            "/{transaction_id}",
            put(update_transaction).delete(delete_transaction),
        )
        .layer(middleware::from_fn_with_state(
            state,
            authentication_middleware,
        ))
}
