//! Whole-catalog snapshot stored as one JSON file in feed format.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use quiz_core::model::{into_quizzes, Quiz, QuizRecord};

use crate::repository::{CatalogRepository, StorageError};

#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn ser<E: core::fmt::Display>(e: E) -> StorageError {
    StorageError::Serialization(e.to_string())
}

#[async_trait]
impl CatalogRepository for JsonFileCatalog {
    async fn load_catalog(&self) -> Result<Option<Vec<Quiz>>, StorageError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(StorageError::Io(err.to_string())),
        };

        let records: Vec<QuizRecord> = serde_json::from_slice(&bytes).map_err(ser)?;
        into_quizzes(records).map(Some).map_err(ser)
    }

    async fn save_catalog(&self, quizzes: &[Quiz]) -> Result<(), StorageError> {
        let records: Vec<QuizRecord> = quizzes.iter().map(QuizRecord::from_quiz).collect();
        let bytes = serde_json::to_vec_pretty(&records).map_err(ser)?;

        // Write beside the target and rename so readers never see a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, &bytes)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .map_err(|err| StorageError::Io(err.to_string()))?;
        Ok(())
    }
}
