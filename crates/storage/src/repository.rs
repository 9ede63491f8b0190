use async_trait::async_trait;
use quiz_core::model::{into_quizzes, Quiz, QuizRecord, SourceSettings};
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),

    #[error("io error: {0}")]
    Io(String),
}

/// Repository contract for the whole-catalog snapshot.
///
/// Snapshots are always read and written as a unit; there is no per-quiz access.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    /// Load the last saved snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if a snapshot exists but cannot be read or decoded.
    /// A missing snapshot is `Ok(None)`.
    async fn load_catalog(&self) -> Result<Option<Vec<Quiz>>, StorageError>;

    /// Replace the stored snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    async fn save_catalog(&self, quizzes: &[Quiz]) -> Result<(), StorageError>;
}

/// Repository contract for the feed endpoint setting.
#[async_trait]
pub trait SettingsRepository: Send + Sync {
    /// Fetch persisted settings, `None` if never saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on storage or validation failures.
    async fn get_settings(&self) -> Result<Option<SourceSettings>, StorageError>;

    /// Persist settings, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the settings cannot be stored.
    async fn save_settings(&self, settings: &SourceSettings) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
///
/// The catalog is held in feed form so loads go through the same mapping as the
/// file-backed store.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    catalog: Arc<Mutex<Option<Vec<QuizRecord>>>>,
    settings: Arc<Mutex<Option<SourceSettings>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CatalogRepository for InMemoryRepository {
    async fn load_catalog(&self) -> Result<Option<Vec<Quiz>>, StorageError> {
        let guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard
            .clone()
            .map(into_quizzes)
            .transpose()
            .map_err(|e| StorageError::Serialization(e.to_string()))
    }

    async fn save_catalog(&self, quizzes: &[Quiz]) -> Result<(), StorageError> {
        let mut guard = self
            .catalog
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(quizzes.iter().map(QuizRecord::from_quiz).collect());
        Ok(())
    }
}

#[async_trait]
impl SettingsRepository for InMemoryRepository {
    async fn get_settings(&self) -> Result<Option<SourceSettings>, StorageError> {
        let guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn save_settings(&self, settings: &SourceSettings) -> Result<(), StorageError> {
        let mut guard = self
            .settings
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = Some(settings.clone());
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub catalog: Arc<dyn CatalogRepository>,
    pub settings: Arc<dyn SettingsRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let catalog: Arc<dyn CatalogRepository> = Arc::new(repo.clone());
        let settings: Arc<dyn SettingsRepository> = Arc::new(repo);
        Self { catalog, settings }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::defaults::default_quizzes;
    use quiz_core::model::{IconTag, Question, SourceSettingsDraft};

    #[tokio::test]
    async fn empty_repository_has_no_snapshot_or_settings() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_catalog().await.unwrap().is_none());
        assert!(repo.get_settings().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn round_trips_catalog_in_order() {
        let repo = InMemoryRepository::new();
        let mut quizzes = default_quizzes().unwrap();
        quizzes.reverse();

        repo.save_catalog(&quizzes).await.unwrap();
        let loaded = repo.load_catalog().await.unwrap().unwrap();
        assert_eq!(loaded, quizzes);
    }

    #[tokio::test]
    async fn snapshot_keeps_correct_option_position() {
        let repo = InMemoryRepository::new();
        let question = Question::new(
            "Pick",
            vec!["Maybe".into(), "Yes".into(), "No".into()],
            1,
        )
        .unwrap();
        let quiz = Quiz::new("Poll", "", IconTag::default(), vec![question]);

        repo.save_catalog(std::slice::from_ref(&quiz)).await.unwrap();
        let loaded = repo.load_catalog().await.unwrap().unwrap();
        assert_eq!(loaded[0].questions()[0].correct_option_index(), 1);
        assert_eq!(loaded, vec![quiz]);
    }

    #[tokio::test]
    async fn saving_settings_overwrites_previous_value() {
        let repo = InMemoryRepository::new();
        let first = SourceSettingsDraft::with_endpoint("https://a.example/q.json")
            .validate()
            .unwrap();
        let second = SourceSettingsDraft::with_endpoint("https://b.example/q.json")
            .validate()
            .unwrap();

        repo.save_settings(&first).await.unwrap();
        repo.save_settings(&second).await.unwrap();
        assert_eq!(repo.get_settings().await.unwrap(), Some(second));
    }
}
