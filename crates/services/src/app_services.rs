use std::path::PathBuf;
use std::sync::Arc;

use quiz_core::defaults::default_quizzes;
use quiz_core::model::Quiz;
use storage::repository::{CatalogRepository, Storage};

use crate::catalog::QuizCatalog;
use crate::error::AppServicesError;
use crate::refresh_service::{Reachability, RefreshService};
use crate::remote_source::RemoteQuizSource;
use crate::sessions::SessionLauncher;
use crate::settings_service::SettingsService;

/// Assembles app-facing services around one shared catalog.
#[derive(Clone)]
pub struct AppServices {
    catalog: Arc<QuizCatalog>,
    launcher: Arc<SessionLauncher>,
    settings: Arc<SettingsService>,
    refresh: Arc<RefreshService>,
}

impl AppServices {
    /// Build services backed by `SQLite` settings and a JSON catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(
        db_url: &str,
        snapshot_path: impl Into<PathBuf>,
        reachability: Arc<dyn Reachability>,
    ) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url, snapshot_path).await?;
        Self::bootstrap(storage, reachability).await
    }

    /// Build services over existing storage, seeding the catalog from the stored
    /// snapshot or, failing that, from the built-in quizzes.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError::Defaults` if the fallback content is invalid.
    pub async fn bootstrap(
        storage: Storage,
        reachability: Arc<dyn Reachability>,
    ) -> Result<Self, AppServicesError> {
        let initial = load_initial_catalog(storage.catalog.as_ref()).await?;
        let catalog = Arc::new(QuizCatalog::new(initial));

        let launcher = Arc::new(SessionLauncher::new(Arc::clone(&catalog)));
        let settings = Arc::new(SettingsService::new(Arc::clone(&storage.settings)));
        let refresh = Arc::new(RefreshService::new(
            Arc::clone(&catalog),
            RemoteQuizSource::new(),
            Arc::clone(&settings),
            Arc::clone(&storage.catalog),
            reachability,
        ));

        Ok(Self {
            catalog,
            launcher,
            settings,
            refresh,
        })
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<QuizCatalog> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn launcher(&self) -> Arc<SessionLauncher> {
        Arc::clone(&self.launcher)
    }

    #[must_use]
    pub fn settings(&self) -> Arc<SettingsService> {
        Arc::clone(&self.settings)
    }

    #[must_use]
    pub fn refresh(&self) -> Arc<RefreshService> {
        Arc::clone(&self.refresh)
    }
}

async fn load_initial_catalog(
    snapshots: &dyn CatalogRepository,
) -> Result<Vec<Quiz>, AppServicesError> {
    match snapshots.load_catalog().await {
        Ok(Some(quizzes)) => {
            tracing::info!("loaded {} quizzes from local snapshot", quizzes.len());
            return Ok(quizzes);
        }
        Ok(None) => tracing::info!("no local quiz snapshot; using built-in quizzes"),
        Err(err) => tracing::warn!("could not load quiz snapshot, using built-in quizzes: {err}"),
    }

    Ok(default_quizzes()?)
}
