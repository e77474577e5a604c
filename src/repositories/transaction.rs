//! TransactionRepository - Repository per la gestione delle spese

use super::{Create, Delete, Read, Update};
use crate::dtos::{CreateTransactionDTO, UpdateTransactionDTO};
use crate::entities::Transaction;
use sqlx::{Error, SqlitePool};

// TRANSACTION REPO
pub struct TransactionRepository {
    connection_pool: SqlitePool,
}

impl TransactionRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// Tutte le transazioni di un owner, dalla data più recente;
    /// a parità di data vale l'ordine di inserimento
    pub async fn find_many_by_user_id(&self, user_id: &i64) -> Result<Vec<Transaction>, Error> {
        let transactions = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT
                transaction_id,
                user_id,
                date,
                amount,
                category,
                description,
                created_at
            FROM transactions
            WHERE user_id = ?
            ORDER BY date DESC, transaction_id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.connection_pool)
        .await?;

        Ok(transactions)
    }
}

impl Create<Transaction, CreateTransactionDTO> for TransactionRepository {
    async fn create(&self, data: &CreateTransactionDTO) -> Result<Transaction, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO transactions (user_id, date, amount, category, description, created_at)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(data.user_id)
        .bind(data.date)
        .bind(data.amount)
        .bind(&data.category)
        .bind(&data.description)
        .bind(data.created_at)
        .execute(&self.connection_pool)
        .await?;

        Ok(Transaction {
            transaction_id: result.last_insert_rowid(),
            user_id: data.user_id,
            date: data.date,
            amount: data.amount,
            category: data.category.clone(),
            description: data.description.clone(),
            created_at: data.created_at,
        })
    }
}

impl Read<Transaction, i64> for TransactionRepository {
    async fn read(&self, id: &i64) -> Result<Option<Transaction>, Error> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            SELECT
                transaction_id,
                user_id,
                date,
                amount,
                category,
                description,
                created_at
            FROM transactions
            WHERE transaction_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(transaction)
    }
}

impl Update<Transaction, UpdateTransactionDTO, i64> for TransactionRepository {
    async fn update(&self, id: &i64, data: &UpdateTransactionDTO) -> Result<Transaction, Error> {
        let transaction = sqlx::query_as::<_, Transaction>(
            r#"
            UPDATE transactions
            SET date = COALESCE(?, date),
                amount = COALESCE(?, amount),
                category = COALESCE(?, category),
                description = COALESCE(?, description)
            WHERE transaction_id = ?
            RETURNING transaction_id, user_id, date, amount, category, description, created_at
            "#,
        )
        .bind(data.date)
        .bind(data.amount)
        .bind(data.category.as_deref().map(str::trim))
        .bind(data.description.as_deref())
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        transaction.ok_or(sqlx::Error::RowNotFound)
    }
}

impl Delete<i64> for TransactionRepository {
    async fn delete(&self, id: &i64) -> Result<(), Error> {
        sqlx::query("DELETE FROM transactions WHERE transaction_id = ?")
            .bind(id)
            .execute(&self.connection_pool)
            .await?;

        Ok(())
    }
}
