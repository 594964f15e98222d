use std::collections::HashSet;

use thiserror::Error;

use crate::model::ids::{ModuleId, PathId};
use crate::model::module::LearningModule;
use crate::model::status::ModuleStatus;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum PathError {
    #[error("path title cannot be empty")]
    EmptyTitle,

    #[error("duplicate module id: {0}")]
    DuplicateModuleId(ModuleId),
}

//
// ─── PATH ──────────────────────────────────────────────────────────────────────
//

/// An ordered collection of modules, optionally persisted remotely.
///
/// Module order is meaningful and never changes. Only module statuses are
/// mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningPath {
    title: String,
    description: String,
    modules: Vec<LearningModule>,
    is_saved: bool,
    path_id: Option<PathId>,
}

impl LearningPath {
    /// Build an unsaved path.
    ///
    /// # Errors
    ///
    /// Returns `PathError` if the title is blank or two modules share an id.
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        modules: Vec<LearningModule>,
    ) -> Result<Self, PathError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(PathError::EmptyTitle);
        }

        let mut seen = HashSet::with_capacity(modules.len());
        for module in &modules {
            if !seen.insert(module.id()) {
                return Err(PathError::DuplicateModuleId(module.id().clone()));
            }
        }

        Ok(Self {
            title,
            description: description.into(),
            modules,
            is_saved: false,
            path_id: None,
        })
    }

    /// Rehydrate a path loaded from the store; the result is saved.
    ///
    /// # Errors
    ///
    /// Same validation as [`LearningPath::new`].
    pub fn from_persisted(
        path_id: PathId,
        title: impl Into<String>,
        description: impl Into<String>,
        modules: Vec<LearningModule>,
    ) -> Result<Self, PathError> {
        let mut path = Self::new(title, description, modules)?;
        path.mark_saved(path_id);
        Ok(path)
    }

    /// Overrides the remote identity as handed over by the owning view.
    #[must_use]
    pub fn with_remote(mut self, is_saved: bool, path_id: Option<PathId>) -> Self {
        self.is_saved = is_saved;
        self.path_id = path_id;
        self
    }

    /// Give this path a persistent identity.
    pub fn mark_saved(&mut self, path_id: PathId) {
        self.is_saved = true;
        self.path_id = Some(path_id);
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    #[must_use]
    pub fn description(&self) -> &str {
        &self.description
    }

    #[must_use]
    pub fn modules(&self) -> &[LearningModule] {
        &self.modules
    }

    #[must_use]
    pub fn is_saved(&self) -> bool {
        self.is_saved
    }

    #[must_use]
    pub fn path_id(&self) -> Option<&PathId> {
        self.path_id.as_ref()
    }

    /// The id status changes are persisted under.
    ///
    /// `None` unless the path is saved and carries a non-empty id. Whitespace
    /// counts as an id.
    #[must_use]
    pub fn sync_target(&self) -> Option<&PathId> {
        if !self.is_saved {
            return None;
        }
        self.path_id.as_ref().filter(|id| !id.is_empty())
    }

    #[must_use]
    pub fn module(&self, id: &ModuleId) -> Option<&LearningModule> {
        self.modules.iter().find(|m| m.id() == id)
    }

    /// Replace the status of the module with the given id.
    ///
    /// Returns `false` and leaves the path untouched when no module matches.
    pub fn set_module_status(&mut self, id: &ModuleId, status: ModuleStatus) -> bool {
        match self.modules.iter_mut().find(|m| m.id() == id) {
            Some(module) => {
                module.set_status(status);
                true
            }
            None => false,
        }
    }

    #[must_use]
    pub fn progress(&self) -> PathProgress {
        let mut progress = PathProgress {
            total: self.modules.len(),
            ..PathProgress::default()
        };
        for module in &self.modules {
            match module.status() {
                ModuleStatus::Completed => progress.completed += 1,
                ModuleStatus::InProgress => progress.in_progress += 1,
                ModuleStatus::NotStarted => {}
            }
        }
        progress
    }
}

/// Completion counts for a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PathProgress {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
}

impl PathProgress {
    /// Whole-number percentage of completed modules; 0 for an empty path.
    #[must_use]
    pub fn percent_complete(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        let pct = self.completed * 100 / self.total;
        u8::try_from(pct).unwrap_or(100)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
