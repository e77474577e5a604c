//! Transaction DTOs - Data Transfer Objects per le spese

use crate::entities::Transaction;
use crate::import::ImportedTransaction;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

const MAX_CATEGORY_CHARS: usize = 50;
const MAX_DESCRIPTION_CHARS: usize = 500;

/// Struct per gestire io col client; l'id interno è esposto come `id`
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionDTO {
    pub id: i64,
    pub user_id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl From<Transaction> for TransactionDTO {
    fn from(value: Transaction) -> Self {
        Self {
            id: value.transaction_id,
            user_id: value.user_id,
            date: value.date,
            amount: value.amount,
            category: value.category,
            description: value.description,
            created_at: value.created_at,
        }
    }
}

/// Body di POST /transactions (l'owner arriva sempre dal token, mai dal client)
#[derive(Deserialize, Debug, Clone, Validate)]
#[serde(deny_unknown_fields)]
pub struct CreateTransactionRequestDTO {
    pub date: NaiveDate,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: f64,

    #[validate(
        length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"),
        custom(function = "validate_not_blank")
    )]
    pub category: String,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    #[serde(default)]
    pub description: Option<String>,
}

/// DTO per creare una nuova transazione (senza transaction_id)
#[derive(Debug, Clone)]
pub struct CreateTransactionDTO {
    pub user_id: i64,
    pub date: NaiveDate,
    pub amount: f64,
    pub category: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
}

impl CreateTransactionDTO {
    pub fn from_request(user_id: i64, body: CreateTransactionRequestDTO) -> Self {
        Self {
            user_id,
            date: body.date,
            amount: body.amount,
            category: body.category.trim().to_string(),
            description: body.description.unwrap_or_default(),
            created_at: Utc::now(),
        }
    }
}

impl CreateTransactionDTO {
    /// Riga importata da file; i testi troppo lunghi vengono troncati ai limiti dello schema
    pub fn from_import(user_id: i64, row: ImportedTransaction) -> Self {
        Self {
            user_id,
            date: row.date,
            amount: row.amount,
            category: truncate_chars(row.category.trim(), MAX_CATEGORY_CHARS),
            description: truncate_chars(&row.description, MAX_DESCRIPTION_CHARS),
            created_at: Utc::now(),
        }
    }
}

fn truncate_chars(value: &str, max: usize) -> String {
    value.chars().take(max).collect()
}

/// DTO per aggiornare una transazione (solo i campi `Some(_)` vengono modificati)
#[derive(Deserialize, Debug, Default, Clone, Validate)]
#[serde(deny_unknown_fields)]
pub struct UpdateTransactionDTO {
    pub date: Option<NaiveDate>,

    #[validate(custom(function = "validate_positive_amount"))]
    pub amount: Option<f64>,

    #[validate(
        length(min = 1, max = 50, message = "Category must be between 1 and 50 characters"),
        custom(function = "validate_not_blank")
    )]
    pub category: Option<String>,

    #[validate(length(max = 500, message = "Description must be at most 500 characters"))]
    pub description: Option<String>,
}

#[derive(Serialize, Deserialize, Debug)]
pub struct MessageResponseDTO {
    pub msg: String,
}

/// Risposta di POST /transactions/import
#[derive(Serialize, Deserialize, Debug)]
pub struct ImportResponseDTO {
    pub imported: usize,
    pub transactions: Vec<TransactionDTO>,
}

fn validate_positive_amount(amount: f64) -> Result<(), ValidationError> {
    if amount.is_finite() && amount > 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("positive_amount");
        err.message = Some("Amount must be greater than zero".into());
        Err(err)
    }
}

fn validate_not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        let mut err = ValidationError::new("not_blank");
        err.message = Some("Value cannot be blank".into());
        Err(err)
    } else {
        Ok(())
    }
}
