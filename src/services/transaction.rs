//! Transaction services - Gestione delle spese dell'utente autenticato

use crate::core::{AppError, AppState, CurrentUser};
use crate::dtos::{
    CreateTransactionDTO, CreateTransactionRequestDTO, ImportResponseDTO, MessageResponseDTO,
    TransactionDTO, UpdateTransactionDTO,
};
use crate::entities::Transaction;
use crate::import::parse_file;
use crate::repositories::{Create, Delete, Read, Update};
use axum::{
    Extension,
    body::Bytes,
    extract::{Json, Path, State},
};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};
use validator::Validate;

/// Legge la transazione e verifica che appartenga all'utente corrente.
///
/// 404 se non esiste, 403 se appartiene a un altro utente.
async fn fetch_owned(
    state: &AppState,
    transaction_id: i64,
    current_user: &CurrentUser,
) -> Result<Transaction, AppError> {
    let transaction = state
        .transaction
        .read(&transaction_id)
        .await?
        .ok_or_else(|| AppError::not_found("Transaction not found"))?;

    if !transaction.is_owned_by(current_user.id) {
        warn!(
            "User {} tried to access transaction {} owned by {}",
            current_user.id, transaction_id, transaction.user_id
        );
        return Err(AppError::forbidden("User not authorized"));
    }

    Ok(transaction)
}

/// Inserisce la transazione; un owner inesistente (FK violata) diventa 404
async fn insert_transaction(
    state: &AppState,
    new_transaction: &CreateTransactionDTO,
) -> Result<Transaction, AppError> {
    state.transaction.create(new_transaction).await.map_err(|e| {
        if let sqlx::Error::Database(db) = &e {
            if db.is_foreign_key_violation() {
                return AppError::not_found("User not found");
            }
        }
        AppError::from(e)
    })
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id))]
pub async fn list_transactions(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
) -> Result<Json<Vec<TransactionDTO>>, AppError> {
    let transactions: Vec<TransactionDTO> = state
        .transaction
        .find_many_by_user_id(&current_user.id)
        .await?
        .into_iter()
        .map(TransactionDTO::from)
        .collect();

    debug!("Found {} transactions", transactions.len());
    Ok(Json(transactions))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id))]
pub async fn create_transaction(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Json(body): Json<CreateTransactionRequestDTO>,
) -> Result<Json<TransactionDTO>, AppError> {
    body.validate()?;

    let new_transaction = CreateTransactionDTO::from_request(current_user.id, body);
    let created = insert_transaction(&state, &new_transaction).await?;

    info!("Transaction {} created", created.transaction_id);
    Ok(Json(TransactionDTO::from(created)))
}

#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, transaction_id = %transaction_id))]
pub async fn update_transaction(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
    Json(body): Json<UpdateTransactionDTO>,
) -> Result<Json<TransactionDTO>, AppError> {
    body.validate()?;

    fetch_owned(&state, transaction_id, &current_user).await?;

    let updated = state
        .transaction
        .update(&transaction_id, &body)
        .await
        .map_err(|e| match e {
            // cancellata tra la lettura e l'update
            sqlx::Error::RowNotFound => AppError::not_found("Transaction not found"),
            other => AppError::from(other),
        })?;

    info!("Transaction updated");
    Ok(Json(TransactionDTO::from(updated)))
}

#[instrument(skip(state, current_user), fields(user_id = %current_user.id, transaction_id = %transaction_id))]
pub async fn delete_transaction(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    Path(transaction_id): Path<i64>,
) -> Result<Json<MessageResponseDTO>, AppError> {
    fetch_owned(&state, transaction_id, &current_user).await?;

    state.transaction.delete(&transaction_id).await?;

    info!("Transaction removed");
    Ok(Json(MessageResponseDTO {
        msg: "Transaction removed".to_string(),
    }))
}

/// Importa un file xlsx, xls o CSV: ogni riga valida diventa una create sul repository
#[instrument(skip(state, current_user, body), fields(user_id = %current_user.id, bytes = body.len()))]
pub async fn import_transactions(
    State(state): State<Arc<AppState>>,
    Extension(current_user): Extension<CurrentUser>,
    body: Bytes,
) -> Result<Json<ImportResponseDTO>, AppError> {
    let rows = parse_file(&body).inspect_err(|e| warn!("Import rejected: {}", e))?;

    let mut transactions = Vec::with_capacity(rows.len());
    for row in rows {
        let new_transaction = CreateTransactionDTO::from_import(current_user.id, row);
        let created = insert_transaction(&state, &new_transaction).await?;
        transactions.push(TransactionDTO::from(created));
    }

    info!("Imported {} transactions", transactions.len());
    Ok(Json(ImportResponseDTO {
        imported: transactions.len(),
        transactions,
    }))
}
