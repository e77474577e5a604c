//! Repositories module - Coordinatore per tutti i repository del progetto
//!
//! Questo modulo organizza i repository in sotto-moduli separati per una migliore manutenibilità.
//! Ogni repository gestisce le operazioni di database per una specifica entità.

// ************************* NOTA SU SQLX ************************* //

/*
   Le query usano la forma runtime (`sqlx::query`, `sqlx::query_as::<_, T>`, `query_scalar`)
   con le entity che derivano `sqlx::FromRow`: così il crate compila senza un database
   raggiungibile a compile time. Lo schema vive in `migrations/` e viene applicato
   all'avvio (`sqlx::migrate!()`) e in automatico da `#[sqlx::test]`.

   Number of Rows	Method to Call
   None	            .execute(...).await         INSERT/UPDATE/DELETE senza RETURNING
   Zero or One	    .fetch_optional(...).await  read by id, UPDATE ... RETURNING
   Multiple	        .fetch_all(...).await       liste
*/

// ************************* MODULI REPOSITORY ************************* //

pub mod app_settings;
pub mod traits;
pub mod transaction;
pub mod user;

// Re-esportazione dei trait per facilitare l'import
pub use traits::{Create, Delete, Read, Update};

// Re-esportazione delle struct dei repository per facilitare l'import
pub use app_settings::AppSettingsRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
