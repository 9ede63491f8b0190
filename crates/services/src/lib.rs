#![forbid(unsafe_code)]

pub mod app_services;
pub mod catalog;
pub mod error;
pub mod refresh_service;
pub mod remote_source;
pub mod sessions;
pub mod settings_service;

pub use app_services::AppServices;
pub use catalog::QuizCatalog;
pub use error::{AppServicesError, FetchError, RefreshError, SessionError, SettingsServiceError};
pub use refresh_service::{Reachability, RefreshOutcome, RefreshService};
pub use remote_source::{decode_catalog, RemoteQuizSource};
pub use sessions::{AnswerOutcome, QuizSession, SessionLauncher, SessionProgress, SessionState};
pub use settings_service::SettingsService;
