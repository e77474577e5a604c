//! Registration Gate - interruttore che abilita o blocca la creazione di nuovi account
//!
//! Il gate è una dipendenza iniettata in `AppState` e letta a ogni richiesta,
//! così i test possono sostituirla con `StaticRegistrationGate`.

use crate::core::AppError;
use crate::repositories::AppSettingsRepository;
use async_trait::async_trait;
use sqlx::SqlitePool;
use tracing::debug;

#[async_trait]
pub trait RegistrationGate: Send + Sync {
    /// `true` se la registrazione di nuovi utenti è consentita
    async fn is_sign_up_allowed(&self) -> Result<bool, AppError>;
}

/// Gate a valore fisso
pub struct StaticRegistrationGate {
    allowed: bool,
}

impl StaticRegistrationGate {
    pub fn new(allowed: bool) -> Self {
        Self { allowed }
    }
}

#[async_trait]
impl RegistrationGate for StaticRegistrationGate {
    async fn is_sign_up_allowed(&self) -> Result<bool, AppError> {
        Ok(self.allowed)
    }
}

/// Gate letto dalla tabella `app_settings`; se la riga manca vale `default_allowed`
pub struct AppSettingsGate {
    settings: AppSettingsRepository,
    default_allowed: bool,
}

impl AppSettingsGate {
    pub fn new(pool: SqlitePool, default_allowed: bool) -> Self {
        Self {
            settings: AppSettingsRepository::new(pool),
            default_allowed,
        }
    }
}

#[async_trait]
impl RegistrationGate for AppSettingsGate {
    async fn is_sign_up_allowed(&self) -> Result<bool, AppError> {
        let stored = self.settings.find_sign_up_allowed().await?;
        debug!("Sign up flag from app_settings: {:?}", stored);
        Ok(stored.unwrap_or(self.default_allowed))
    }
}
