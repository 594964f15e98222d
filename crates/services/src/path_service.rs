use std::sync::Arc;

use pathway_core::model::{LearningPath, PathId};
use storage::repository::{PathRepository, PathSummaryRecord};

use crate::Clock;
use crate::error::PathServiceError;
use crate::import::parse_path_json;

/// Orchestrates saving, loading and importing learning paths.
#[derive(Clone)]
pub struct PathService {
    clock: Clock,
    paths: Arc<dyn PathRepository>,
}

impl PathService {
    #[must_use]
    pub fn new(clock: Clock, paths: Arc<dyn PathRepository>) -> Self {
        Self { clock, paths }
    }

    /// Give the path a persistent identity and store it.
    ///
    /// A path that already syncs under an id is left untouched and that id is
    /// returned.
    ///
    /// # Errors
    ///
    /// Returns `PathServiceError::Storage` if persistence fails; the path is
    /// then left unsaved.
    pub async fn save_path(&self, path: &mut LearningPath) -> Result<PathId, PathServiceError> {
        if let Some(existing) = path.sync_target() {
            return Ok(existing.clone());
        }

        let id = PathId::generate();
        let candidate = path.clone().with_remote(false, Some(id));
        let stored_id = self.paths.insert_path(&candidate, self.clock.now()).await?;
        path.mark_saved(stored_id.clone());
        tracing::info!(path_id = %stored_id, title = path.title(), "learning path saved");
        Ok(stored_id)
    }

    /// Fetch a saved path by id.
    ///
    /// Returns `Ok(None)` when the path does not exist.
    ///
    /// # Errors
    ///
    /// Returns `PathServiceError::Storage` if repository access fails.
    pub async fn get_path(&self, id: &PathId) -> Result<Option<LearningPath>, PathServiceError> {
        let path = self.paths.get_path(id).await?;
        Ok(path)
    }

    /// List saved paths, newest first, up to the given limit.
    ///
    /// # Errors
    ///
    /// Returns `PathServiceError::Storage` if repository access fails.
    pub async fn list_paths(&self, limit: u32) -> Result<Vec<PathSummaryRecord>, PathServiceError> {
        let items = self.paths.list_paths(limit).await?;
        Ok(items)
    }

    /// Parse a JSON path document and save it.
    ///
    /// # Errors
    ///
    /// Returns `PathServiceError::Json` or `PathServiceError::Domain` for
    /// invalid documents, `PathServiceError::Storage` if saving fails.
    pub async fn import_json(&self, json: &str) -> Result<PathId, PathServiceError> {
        let mut path = parse_path_json(json)?;
        self.save_path(&mut path).await
    }
}
