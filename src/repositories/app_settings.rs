//! AppSettingsRepository - impostazioni globali del processo (riga singola `id = 1`)

use sqlx::{Error, SqlitePool};

pub struct AppSettingsRepository {
    connection_pool: SqlitePool,
}

impl AppSettingsRepository {
    pub fn new(connection_pool: SqlitePool) -> Self {
        Self { connection_pool }
    }

    /// `None` se la riga delle impostazioni non è mai stata creata
    pub async fn find_sign_up_allowed(&self) -> Result<Option<bool>, Error> {
        let flag = sqlx::query_scalar::<_, i64>(
            "SELECT sign_up_allowed FROM app_settings WHERE id = 1",
        )
        .fetch_optional(&self.connection_pool)
        .await?;

        Ok(flag.map(|value| value != 0))
    }
}
