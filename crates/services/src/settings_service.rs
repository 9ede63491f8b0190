use std::sync::Arc;

use quiz_core::model::{SourceSettings, SourceSettingsDraft};
use storage::repository::SettingsRepository;

use crate::error::SettingsServiceError;

/// Reads and updates the quiz feed endpoint.
#[derive(Clone)]
pub struct SettingsService {
    repo: Arc<dyn SettingsRepository>,
}

impl SettingsService {
    #[must_use]
    pub fn new(repo: Arc<dyn SettingsRepository>) -> Self {
        Self { repo }
    }

    /// Load persisted settings (or defaults if missing).
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` on storage failures.
    pub async fn load(&self) -> Result<SourceSettings, SettingsServiceError> {
        let settings = self.repo.get_settings().await?;
        Ok(settings.unwrap_or_default())
    }

    /// Validate and persist a new endpoint.
    ///
    /// Blank input keeps the current endpoint unchanged.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if validation fails or persistence fails.
    pub async fn set_endpoint(&self, raw: &str) -> Result<SourceSettings, SettingsServiceError> {
        if raw.trim().is_empty() {
            return self.load().await;
        }

        let settings = SourceSettingsDraft::with_endpoint(raw).validate()?;
        self.repo.save_settings(&settings).await?;
        tracing::info!("quiz feed endpoint set to {}", settings.endpoint());
        Ok(settings)
    }

    /// Restore and persist the default endpoint.
    ///
    /// # Errors
    ///
    /// Returns `SettingsServiceError` if persistence fails.
    pub async fn reset_to_default(&self) -> Result<SourceSettings, SettingsServiceError> {
        let settings = SourceSettings::default();
        self.repo.save_settings(&settings).await?;
        tracing::info!("quiz feed endpoint reset to default");
        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::model::{DEFAULT_ENDPOINT, SettingsError};
    use storage::repository::InMemoryRepository;

    fn service() -> SettingsService {
        SettingsService::new(Arc::new(InMemoryRepository::new()))
    }

    #[tokio::test]
    async fn unset_endpoint_is_default() {
        let settings = service().load().await.unwrap();
        assert_eq!(settings.endpoint(), DEFAULT_ENDPOINT);
    }

    #[tokio::test]
    async fn override_then_reset() {
        let service = service();
        service
            .set_endpoint("https://quiz.example/feed.json")
            .await
            .unwrap();
        assert_eq!(
            service.load().await.unwrap().endpoint(),
            "https://quiz.example/feed.json"
        );

        let reset = service.reset_to_default().await.unwrap();
        assert!(reset.is_default());
        assert!(service.load().await.unwrap().is_default());
    }

    #[tokio::test]
    async fn blank_input_keeps_current_endpoint() {
        let service = service();
        service
            .set_endpoint("https://quiz.example/feed.json")
            .await
            .unwrap();
        let kept = service.set_endpoint("  ").await.unwrap();
        assert_eq!(kept.endpoint(), "https://quiz.example/feed.json");
    }

    #[tokio::test]
    async fn invalid_endpoint_is_rejected_and_not_saved() {
        let service = service();
        let err = service.set_endpoint("not a url").await.unwrap_err();
        assert!(matches!(
            err,
            SettingsServiceError::Validation(SettingsError::InvalidEndpoint(_))
        ));
        assert!(service.load().await.unwrap().is_default());
    }
}
