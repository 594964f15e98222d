use std::sync::Arc;

use storage::repository::{PathRepository, Storage};

use crate::Clock;
use crate::error::AppServicesError;
use crate::notification::Notifier;
use crate::path_service::PathService;
use crate::status_sync::StatusSyncController;

/// Assembles app-facing services over one storage backend.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    paths: Arc<dyn PathRepository>,
    path_service: Arc<PathService>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::from_storage(&storage, clock))
    }

    #[must_use]
    pub fn from_storage(storage: &Storage, clock: Clock) -> Self {
        let paths = Arc::clone(&storage.paths);
        let path_service = Arc::new(PathService::new(clock, Arc::clone(&paths)));
        Self {
            clock,
            paths,
            path_service,
        }
    }

    #[must_use]
    pub fn path_service(&self) -> Arc<PathService> {
        Arc::clone(&self.path_service)
    }

    /// A status controller that reports failures through `notifier`.
    #[must_use]
    pub fn status_sync(&self, notifier: Arc<dyn Notifier>) -> StatusSyncController {
        StatusSyncController::new(self.clock, Arc::clone(&self.paths), notifier)
    }
}
