//! UserRepository - Repository per la gestione degli utenti e delle loro impostazioni

use super::{Create, Read, Update};
use crate::dtos::{CreateUserDTO, UpdateSettingsDTO};
use crate::entities::{Settings, User};
use sqlx::{Error, SqlitePool};

// USER REPO
pub struct UserRepository {
    connection_pool: SqlitePool,
}

impl UserRepository {
    pub fn new(connection_pool: SqlitePool) -> UserRepository {
        Self { connection_pool }
    }

    /// Find user by exact username match (username is unique)
    pub async fn find_by_username(&self, username: &str) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, allowance, start_date, currency
            FROM users
            WHERE username = ?
            "#,
        )
        .bind(username)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Create<User, CreateUserDTO> for UserRepository {
    async fn create(&self, data: &CreateUserDTO) -> Result<User, Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO users (username, password, allowance, start_date, currency)
            VALUES (?, ?, ?, ?, ?)
            "#,
        )
        .bind(&data.username)
        .bind(&data.password)
        .bind(data.settings.allowance)
        .bind(data.settings.start_date)
        .bind(data.settings.currency)
        .execute(&self.connection_pool)
        .await?;

        Ok(User {
            user_id: result.last_insert_rowid(),
            username: data.username.clone(),
            password: data.password.clone(),
            settings: data.settings.clone(),
        })
    }
}

impl Read<User, i64> for UserRepository {
    async fn read(&self, id: &i64) -> Result<Option<User>, Error> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT user_id, username, password, allowance, start_date, currency
            FROM users
            WHERE user_id = ?
            "#,
        )
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(user)
    }
}

impl Update<Settings, UpdateSettingsDTO, i64> for UserRepository {
    /// Aggiorna solo le impostazioni presenti nel DTO, le altre restano invariate
    async fn update(&self, id: &i64, data: &UpdateSettingsDTO) -> Result<Settings, Error> {
        let settings = sqlx::query_as::<_, Settings>(
            r#"
            UPDATE users
            SET allowance = COALESCE(?, allowance),
                start_date = COALESCE(?, start_date),
                currency = COALESCE(?, currency)
            WHERE user_id = ?
            RETURNING allowance, start_date, currency
            "#,
        )
        .bind(data.allowance)
        .bind(data.start_date)
        .bind(data.currency)
        .bind(id)
        .fetch_optional(&self.connection_pool)
        .await?;

        settings.ok_or(sqlx::Error::RowNotFound)
    }
}
