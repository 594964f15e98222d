use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use pathway_core::model::{LearningPath, ModuleId, ModuleStatus, PathId};
use storage::repository::{PathRepository, StorageError};

use crate::Clock;
use crate::notification::{Notice, Notifier};

pub const PERSISTENCE_ERROR_MESSAGE: &str = "Failed to save your progress. Please try again.";
pub const UNEXPECTED_FAULT_MESSAGE: &str =
    "An unexpected error occurred while saving your progress.";

/// Where a status change should be persisted, captured from the owning path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyncTarget {
    is_saved: bool,
    path_id: Option<PathId>,
}

impl SyncTarget {
    #[must_use]
    pub fn new(is_saved: bool, path_id: Option<PathId>) -> Self {
        Self { is_saved, path_id }
    }

    #[must_use]
    pub fn from_path(path: &LearningPath) -> Self {
        Self::new(path.is_saved(), path.path_id().cloned())
    }

    /// The remote id, present only for saved paths with a non-empty id.
    #[must_use]
    pub fn remote_id(&self) -> Option<&PathId> {
        if !self.is_saved {
            return None;
        }
        self.path_id.as_ref().filter(|id| !id.is_empty())
    }
}

/// Why a persistence attempt failed. Both kinds are terminal for the attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncFailure {
    /// The store reported failure (missing path or module included).
    Persistence,
    /// The attempt itself faulted: connection loss or a panic in the store.
    Unexpected,
}

impl SyncFailure {
    #[must_use]
    pub fn message(self) -> &'static str {
        match self {
            SyncFailure::Persistence => PERSISTENCE_ERROR_MESSAGE,
            SyncFailure::Unexpected => UNEXPECTED_FAULT_MESSAGE,
        }
    }

    fn classify(err: &StorageError) -> Self {
        match err {
            StorageError::Connection(_) => SyncFailure::Unexpected,
            _ => SyncFailure::Persistence,
        }
    }
}

/// Result of one status change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    /// Path is not saved; only the local state changed.
    LocalOnly,
    Saved,
    /// The local change stands; the store did not record it.
    Failed(SyncFailure),
}

/// Applies module status changes locally, then persists them once.
///
/// There is no retry and no rollback: a failed save is reported through the
/// notifier and the local status keeps the requested value.
#[derive(Clone)]
pub struct StatusSyncController {
    clock: Clock,
    store: Arc<dyn PathRepository>,
    notifier: Arc<dyn Notifier>,
}

impl StatusSyncController {
    #[must_use]
    pub fn new(clock: Clock, store: Arc<dyn PathRepository>, notifier: Arc<dyn Notifier>) -> Self {
        Self {
            clock,
            store,
            notifier,
        }
    }

    /// Run the local half of a status change and prepare the remote half.
    ///
    /// `on_change` is invoked exactly once, before this returns and before any
    /// remote call. The returned [`PendingSync`] performs the single remote
    /// attempt when settled.
    pub fn change_status(
        &self,
        target: &SyncTarget,
        module_id: ModuleId,
        status: ModuleStatus,
        on_change: impl FnOnce(&ModuleId, ModuleStatus),
    ) -> PendingSync {
        on_change(&module_id, status);

        let request = target.remote_id().cloned().map(|path_id| RemoteRequest {
            path_id,
            module_id,
            status,
        });

        PendingSync {
            request,
            controller: self.clone(),
        }
    }
}

#[derive(Debug, Clone)]
struct RemoteRequest {
    path_id: PathId,
    module_id: ModuleId,
    status: ModuleStatus,
}

/// The remote half of a status change, owned and `'static` so it can be spawned.
#[must_use = "the status is not persisted until the pending sync is settled"]
pub struct PendingSync {
    request: Option<RemoteRequest>,
    controller: StatusSyncController,
}

impl PendingSync {
    /// True when settling will not contact the store.
    #[must_use]
    pub fn is_local_only(&self) -> bool {
        self.request.is_none()
    }

    /// Issue the remote update (if any) and report failures to the notifier.
    pub async fn settle(self) -> SyncOutcome {
        let Some(request) = self.request else {
            return SyncOutcome::LocalOnly;
        };
        let controller = self.controller;

        tracing::debug!(
            path_id = %request.path_id,
            module_id = %request.module_id,
            status = %request.status,
            "saving module status"
        );

        let attempt = AssertUnwindSafe(controller.store.update_module_status(
            &request.path_id,
            &request.module_id,
            request.status,
            controller.clock.now(),
        ))
        .catch_unwind()
        .await;

        let failure = match attempt {
            Ok(Ok(())) => {
                tracing::info!(
                    path_id = %request.path_id,
                    module_id = %request.module_id,
                    status = %request.status,
                    "module status saved"
                );
                return SyncOutcome::Saved;
            }
            Ok(Err(err)) => {
                tracing::error!(
                    path_id = %request.path_id,
                    module_id = %request.module_id,
                    error = %err,
                    "failed to save module status"
                );
                SyncFailure::classify(&err)
            }
            Err(_) => {
                tracing::error!(
                    path_id = %request.path_id,
                    module_id = %request.module_id,
                    "module status save panicked"
                );
                SyncFailure::Unexpected
            }
        };

        controller.notifier.notify(Notice::error(failure.message()));
        SyncOutcome::Failed(failure)
    }
}
