//! Transaction entity - Spesa registrata da un utente

use chrono::{DateTime, NaiveDate, Utc};

#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Transaction {
    pub transaction_id: i64,
    pub user_id: i64, // owner, unico autorizzato a leggere/modificare
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl Transaction {
    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}
