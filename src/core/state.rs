//! Application State - Stato globale dell'applicazione
//!
//! Contiene i repository, la configurazione dei token e il registration gate
//! condivisi da tutte le route e dai middleware.

use crate::core::auth::DEFAULT_TOKEN_TTL_HOURS;
use crate::core::gate::{AppSettingsGate, RegistrationGate};
use crate::repositories::{TransactionRepository, UserRepository};
use chrono::Duration;
use sqlx::SqlitePool;
use std::sync::Arc;

/// Stato globale dell'applicazione condiviso tra tutte le route e middleware
pub struct AppState {
    /// Repository per la gestione degli utenti (e delle loro impostazioni)
    pub user: UserRepository,

    /// Repository per la gestione delle transazioni
    pub transaction: TransactionRepository,

    /// Decide se la registrazione di nuovi utenti è aperta
    pub registration: Arc<dyn RegistrationGate>,

    /// Secret key per JWT token
    pub jwt_secret: String,

    /// Durata dei token emessi
    pub token_ttl: Duration,
}

impl AppState {
    /// Crea una nuova istanza di AppState inizializzando tutti i repository
    /// con il pool di connessioni fornito e la JWT secret.
    ///
    /// Il gate di default legge `app_settings` (registrazione aperta se la riga manca),
    /// la durata dei token è `DEFAULT_TOKEN_TTL_HOURS`.
    pub fn new(pool: SqlitePool, jwt_secret: String) -> Self {
        Self {
            user: UserRepository::new(pool.clone()),
            transaction: TransactionRepository::new(pool.clone()),
            registration: Arc::new(AppSettingsGate::new(pool, true)),
            jwt_secret,
            token_ttl: Duration::hours(DEFAULT_TOKEN_TTL_HOURS),
        }
    }

    pub fn with_registration_gate(mut self, gate: Arc<dyn RegistrationGate>) -> Self {
        self.registration = gate;
        self
    }

    pub fn with_token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = ttl;
        self
    }
}
