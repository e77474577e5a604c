//! DTOs module - Data Transfer Objects
//!
//! Questo modulo contiene tutti i DTOs usati per la comunicazione client-server.
//! I DTOs separano la rappresentazione esterna (API) dalla rappresentazione interna (entities).
//! Tutti i body in ingresso rifiutano campi sconosciuti.

pub mod settings;
pub mod summary;
pub mod transaction;
pub mod user;

// Re-exports per facilitare l'import
pub use settings::{SettingsDTO, UpdateSettingsDTO};
pub use summary::{MonthlySpendingDTO, SummaryDTO};
pub use transaction::{
    CreateTransactionDTO, CreateTransactionRequestDTO, ImportResponseDTO, MessageResponseDTO,
    TransactionDTO, UpdateTransactionDTO,
};
pub use user::{AuthResponseDTO, CreateUserDTO, LoginDTO, RegisterUserDTO, SignUpStatusDTO, UserDTO};
