use thiserror::Error;
use url::Url;

use crate::model::ids::ModuleId;
use crate::model::status::{ModuleStatus, ResourceKind};

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq)]
#[non_exhaustive]
pub enum ModuleError {
    #[error("module id cannot be empty")]
    EmptyId,

    #[error("module title cannot be empty")]
    EmptyTitle,

    #[error("estimated hours must be a non-negative number, got {0}")]
    InvalidEstimatedHours(f64),

    #[error("resource title cannot be empty")]
    EmptyResourceTitle,
}

//
// ─── RESOURCES ─────────────────────────────────────────────────────────────────
//

/// A recommended resource attached to a module. Read-only once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resource {
    kind: ResourceKind,
    title: String,
    url: String,
}

impl Resource {
    /// # Errors
    ///
    /// Returns `ModuleError::EmptyResourceTitle` if the title is blank.
    pub fn new(
        kind: ResourceKind,
        title: impl Into<String>,
        url: impl Into<String>,
    ) -> Result<Self, ModuleError> {
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(ModuleError::EmptyResourceTitle);
        }
        Ok(Self {
            kind,
            title,
            url: url.into().trim().to_owned(),
        })
    }

    #[must_use]
    pub fn kind(&self) -> ResourceKind {
        self.kind
    }

    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The raw URL as provided by the path author.
    #[must_use]
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Returns the parsed link when it is an `http`/`https` URL.
    #[must_use]
    pub fn link(&self) -> Option<Url> {
        let parsed = Url::parse(&self.url).ok()?;
        matches!(parsed.scheme(), "http" | "https").then_some(parsed)
    }
}

//
// ─── MODULE ────────────────────────────────────────────────────────────────────
//

/// One unit of a learning path.
///
/// `status` is the only field that changes after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct LearningModule {
    id: ModuleId,
    title: String,
    description: String,
    status: ModuleStatus,
    estimated_hours: f64,
    resources: Vec<Resource>,
}

impl LearningModule {
    /// # Errors
    ///
    /// Returns `ModuleError` if the id or title is blank, or if
    /// `estimated_hours` is negative or not finite.
    pub fn new(
        id: ModuleId,
        title: impl Into<String>,
        description: impl Into<String>,
        status: ModuleStatus,
        estimated_hours: f64,
        resources: Vec<Resource>,
    ) -> Result<Self, ModuleError> {
        if id.as_str().trim().is_empty() {
            return Err(ModuleError::EmptyId);
        }
        let title = title.into().trim().to_owned();
        if title.is_empty() {
            return Err(ModuleError::EmptyTitle);
        }
        if !estimated_hours.is_finite() || estimated_hours < 0.0 {
            return Err(ModuleError::InvalidEstimatedHours(estimated_hours));
        }

        Ok(Self {
            id,
            title,
            description: description.into(),
            status,
            estimated_hours,
            resources,
        })
    }

    #[must_use]
    pub fn id(&self) -> &ModuleId {
        &self.id
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
    pub fn status(&self) -> ModuleStatus {
        self.status
    }

    #[must_use]
    pub fn estimated_hours(&self) -> f64 {
        self.estimated_hours
    }

    #[must_use]
    pub fn resources(&self) -> &[Resource] {
        &self.resources
    }

    pub fn set_status(&mut self, status: ModuleStatus) {
        self.status = status;
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
