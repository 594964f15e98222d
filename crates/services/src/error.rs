//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `PathService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PathServiceError {
    #[error("invalid path document: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Domain(#[from] pathway_core::Error),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
