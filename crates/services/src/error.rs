//! Shared error types for the services crate.

use thiserror::Error;

use quiz_core::model::{FeedError, ScoreReportError, SettingsError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `RemoteQuizSource`.
///
/// Every failed fetch surfaces exactly one of these; nothing is retried.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FetchError {
    #[error("no network connection")]
    NotConnected,
    #[error("invalid endpoint: {0}")]
    InvalidEndpoint(String),
    #[error("quiz feed responded with status {0}")]
    BadResponseStatus(reqwest::StatusCode),
    #[error("quiz feed returned an empty body")]
    EmptyBody,
    #[error("could not decode quiz feed: {0}")]
    MalformedPayload(String),
}

/// Errors emitted by `QuizSession` and `SessionLauncher`.
///
/// A failed transition leaves the session untouched.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SessionError {
    #[error("quiz has no questions")]
    EmptyQuiz,
    #[error("option {index} is out of range for {len} options")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },
    #[error("no quiz at position {index}")]
    QuizNotFound { index: usize },
    #[error(transparent)]
    Report(#[from] ScoreReportError),
}

/// Errors emitted by `SettingsService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SettingsServiceError {
    #[error(transparent)]
    Validation(#[from] SettingsError),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `RefreshService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RefreshError {
    #[error(transparent)]
    Fetch(#[from] FetchError),
    #[error(transparent)]
    Settings(#[from] SettingsServiceError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error("built-in catalog is invalid: {0}")]
    Defaults(#[from] FeedError),
}
