use std::sync::Arc;

use storage::repository::CatalogRepository;

use crate::catalog::QuizCatalog;
use crate::error::{FetchError, RefreshError};
use crate::remote_source::RemoteQuizSource;
use crate::settings_service::SettingsService;

/// Answers whether the network is usable right now.
///
/// Supplied by the host; the core never polls or subscribes on its own.
pub trait Reachability: Send + Sync {
    fn is_reachable(&self) -> bool;
}

impl<F> Reachability for F
where
    F: Fn() -> bool + Send + Sync,
{
    fn is_reachable(&self) -> bool {
        self()
    }
}

/// Result of a successful refresh.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOutcome {
    pub quiz_count: usize,
    /// False when the catalog was swapped but the local snapshot could not be written.
    pub snapshot_saved: bool,
}

/// Pulls the feed from the configured endpoint into the catalog.
#[derive(Clone)]
pub struct RefreshService {
    catalog: Arc<QuizCatalog>,
    source: RemoteQuizSource,
    settings: Arc<SettingsService>,
    snapshots: Arc<dyn CatalogRepository>,
    reachability: Arc<dyn Reachability>,
}

impl RefreshService {
    #[must_use]
    pub fn new(
        catalog: Arc<QuizCatalog>,
        source: RemoteQuizSource,
        settings: Arc<SettingsService>,
        snapshots: Arc<dyn CatalogRepository>,
        reachability: Arc<dyn Reachability>,
    ) -> Self {
        Self {
            catalog,
            source,
            settings,
            snapshots,
            reachability,
        }
    }

    /// Fetch the feed and replace the catalog with it.
    ///
    /// Nothing is requested when the network is unreachable. On any failure the
    /// catalog keeps its previous contents.
    ///
    /// # Errors
    ///
    /// Returns `RefreshError::Fetch` for network or payload failures and
    /// `RefreshError::Settings` if the endpoint cannot be read.
    pub async fn refresh(&self) -> Result<RefreshOutcome, RefreshError> {
        if !self.reachability.is_reachable() {
            tracing::info!("skipping quiz refresh: network unreachable");
            return Err(FetchError::NotConnected.into());
        }

        let settings = self.settings.load().await?;
        tracing::info!("refreshing quizzes from {}", settings.endpoint());

        let quizzes = match self.source.fetch(settings.endpoint()).await {
            Ok(quizzes) => quizzes,
            Err(err) => {
                tracing::error!("could not refresh quizzes from {}: {err}", settings.endpoint());
                return Err(err.into());
            }
        };

        let quiz_count = quizzes.len();
        self.catalog.replace_all(quizzes);
        tracing::info!("catalog refreshed with {quiz_count} quizzes");

        let current = self.catalog.list();
        let snapshot_saved = match self.snapshots.save_catalog(&current).await {
            Ok(()) => true,
            Err(err) => {
                tracing::error!("could not save quiz snapshot: {err}");
                false
            }
        };

        Ok(RefreshOutcome {
            quiz_count,
            snapshot_saved,
        })
    }

    /// Best-effort refresh when the app starts.
    ///
    /// Skipped while offline; failures are logged and the catalog keeps what the
    /// snapshot or built-in quizzes provided.
    pub async fn refresh_on_launch(&self) -> Option<RefreshOutcome> {
        if !self.reachability.is_reachable() {
            tracing::debug!("offline at launch; keeping local quizzes");
            return None;
        }

        match self.refresh().await {
            Ok(outcome) => Some(outcome),
            Err(err) => {
                tracing::debug!("launch refresh failed, keeping local quizzes: {err}");
                None
            }
        }
    }

    /// Save a new endpoint, then refresh from it straight away.
    ///
    /// The endpoint stays saved even if the fetch that follows fails.
    ///
    /// # Errors
    ///
    /// Returns `RefreshError::Settings` if the endpoint is rejected or cannot be
    /// stored, otherwise the same errors as `refresh`.
    pub async fn check_now(&self, raw_endpoint: &str) -> Result<RefreshOutcome, RefreshError> {
        self.settings.set_endpoint(raw_endpoint).await?;
        self.refresh().await
    }
}
