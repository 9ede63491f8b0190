use async_trait::async_trait;
use sqlx::Row;

use crate::repository::{SettingsRepository, StorageError};
use quiz_core::model::SourceSettings;

use super::SqliteRepository;

#[async_trait]
impl SettingsRepository for SqliteRepository {
    async fn get_settings(&self) -> Result<Option<SourceSettings>, StorageError> {
        let row = sqlx::query(
            r"
            SELECT endpoint
            FROM app_settings
            WHERE id = 1
            ",
        )
        .fetch_optional(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        let Some(row) = row else {
            return Ok(None);
        };

        let endpoint: Option<String> = row
            .try_get("endpoint")
            .map_err(|err| StorageError::Serialization(err.to_string()))?;

        SourceSettings::from_persisted(endpoint)
            .map(Some)
            .map_err(|err| StorageError::Serialization(err.to_string()))
    }

    async fn save_settings(&self, settings: &SourceSettings) -> Result<(), StorageError> {
        sqlx::query(
            r"
            INSERT INTO app_settings (id, endpoint)
            VALUES (?1, ?2)
            ON CONFLICT(id) DO UPDATE SET
                endpoint = excluded.endpoint
            ",
        )
        .bind(1_i64)
        .bind(settings.endpoint())
        .execute(&self.pool)
        .await
        .map_err(|err| StorageError::Connection(err.to_string()))?;

        Ok(())
    }
}
