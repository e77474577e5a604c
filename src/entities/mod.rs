//! Entities module - Entità del dominio applicativo
//!
//! Questo modulo contiene tutte le entità (models) che rappresentano i dati persistiti nel database.
//! Ogni entity corrisponde a una tabella nel database (le settings sono colonne di `users`).

pub mod enums;
pub mod settings;
pub mod transaction;
pub mod user;

// Re-exports per facilitare l'import
pub use enums::Currency;
pub use settings::Settings;
pub use transaction::Transaction;
pub use user::User;
