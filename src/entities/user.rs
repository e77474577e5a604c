//! User entity - Entità utente con metodi per gestione password

use super::settings::Settings;
use bcrypt::{hash, verify};

/// Costo bcrypt fisso per tutti gli hash
pub const BCRYPT_COST: u32 = 10;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub user_id: i64,
    pub username: String,
    // hash bcrypt, mai serializzato verso il client
    pub password: String,
    #[sqlx(flatten)]
    pub settings: Settings,
}

impl User {
    /// Verify if target_password matches the stored hashed password
    pub fn verify_password(&self, target_password: &str) -> bool {
        verify_hash(target_password, &self.password)
    }

    /// Hash a password using bcrypt with the fixed cost
    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, BCRYPT_COST)
    }
}

/// Confronto password/hash; un hash non valido equivale a "non corrisponde"
pub fn verify_hash(password: &str, hashed: &str) -> bool {
    verify(password, hashed).unwrap_or(false)
}
