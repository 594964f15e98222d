use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pathway_core::model::{LearningPath, ModuleId, ModuleStatus, PathId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("conflict")]
    Conflict,

    /// The store could not be reached or the transport failed mid-request.
    #[error("connection error: {0}")]
    Connection(String),

    /// The store was reached and refused or failed the request.
    #[error("rejected by store: {0}")]
    Rejected(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// List-view shape of a stored path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathSummaryRecord {
    pub id: PathId,
    pub title: String,
    pub description: String,
    pub module_count: u32,
    pub completed_count: u32,
    pub created_at: DateTime<Utc>,
}

impl PathSummaryRecord {
    #[must_use]
    pub fn from_path(id: PathId, path: &LearningPath, created_at: DateTime<Utc>) -> Self {
        let progress = path.progress();
        Self {
            id,
            title: path.title().to_owned(),
            description: path.description().to_owned(),
            module_count: u32::try_from(progress.total).unwrap_or(u32::MAX),
            completed_count: u32::try_from(progress.completed).unwrap_or(u32::MAX),
            created_at,
        }
    }
}

/// Repository contract for learning paths and their module progress.
#[async_trait]
pub trait PathRepository: Send + Sync {
    /// Persist a new path under the id it carries.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Serialization` if the path has no usable id,
    /// `StorageError::Conflict` if the id is already taken.
    async fn insert_path(
        &self,
        path: &LearningPath,
        created_at: DateTime<Utc>,
    ) -> Result<PathId, StorageError>;

    /// Fetch a path with its modules in their stored order.
    ///
    /// Returns `Ok(None)` when the path does not exist.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or mapping failures.
    async fn get_path(&self, id: &PathId) -> Result<Option<LearningPath>, StorageError>;

    /// List stored paths, newest first.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` on connection or mapping failures.
    async fn list_paths(&self, limit: u32) -> Result<Vec<PathSummaryRecord>, StorageError>;

    /// Set module `module_id` of path `path_id` to `status`.
    ///
    /// Setting the status a module already holds succeeds without change.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if the path or module does not exist.
    async fn update_module_status(
        &self,
        path_id: &PathId,
        module_id: &ModuleId,
        status: ModuleStatus,
        updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError>;
}

#[derive(Clone)]
struct StoredPath {
    path: LearningPath,
    created_at: DateTime<Utc>,
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    paths: Arc<Mutex<HashMap<PathId, StoredPath>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

fn usable_id(path: &LearningPath) -> Result<PathId, StorageError> {
    path.path_id()
        .filter(|id| !id.is_empty())
        .cloned()
        .ok_or_else(|| StorageError::Serialization("path has no id".into()))
}

#[async_trait]
impl PathRepository for InMemoryRepository {
    async fn insert_path(
        &self,
        path: &LearningPath,
        created_at: DateTime<Utc>,
    ) -> Result<PathId, StorageError> {
        let id = usable_id(path)?;
        let mut guard = self
            .paths
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.contains_key(&id) {
            return Err(StorageError::Conflict);
        }
        let mut stored = path.clone();
        stored.mark_saved(id.clone());
        guard.insert(
            id.clone(),
            StoredPath {
                path: stored,
                created_at,
            },
        );
        Ok(id)
    }

    async fn get_path(&self, id: &PathId) -> Result<Option<LearningPath>, StorageError> {
        let guard = self
            .paths
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.get(id).map(|stored| stored.path.clone()))
    }

    async fn list_paths(&self, limit: u32) -> Result<Vec<PathSummaryRecord>, StorageError> {
        let guard = self
            .paths
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let mut items: Vec<_> = guard
            .iter()
            .map(|(id, stored)| {
                PathSummaryRecord::from_path(id.clone(), &stored.path, stored.created_at)
            })
            .collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id)));
        items.truncate(usize::try_from(limit).unwrap_or(usize::MAX));
        Ok(items)
    }

    async fn update_module_status(
        &self,
        path_id: &PathId,
        module_id: &ModuleId,
        status: ModuleStatus,
        _updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        let mut guard = self
            .paths
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        let stored = guard.get_mut(path_id).ok_or(StorageError::NotFound)?;
        if stored.path.set_module_status(module_id, status) {
            Ok(())
        } else {
            Err(StorageError::NotFound)
        }
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub paths: Arc<dyn PathRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let paths: Arc<dyn PathRepository> = Arc::new(InMemoryRepository::new());
        Self { paths }
    }
}
