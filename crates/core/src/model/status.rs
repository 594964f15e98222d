use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

//
// ─── ERRORS ────────────────────────────────────────────────────────────────────
//

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusParseError {
    #[error("unknown module status: {0}")]
    UnknownStatus(String),

    #[error("unknown resource type: {0}")]
    UnknownResourceKind(String),
}

//
// ─── MODULE STATUS ─────────────────────────────────────────────────────────────
//

/// Completion state of a learning module.
///
/// Every module always carries exactly one of these values. Unknown wire
/// values deserialize to `NotStarted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModuleStatus {
    #[default]
    NotStarted,
    InProgress,
    Completed,
}

impl ModuleStatus {
    /// All statuses in the order their controls are presented.
    pub const ALL: [ModuleStatus; 3] = [
        ModuleStatus::NotStarted,
        ModuleStatus::InProgress,
        ModuleStatus::Completed,
    ];

    /// Canonical wire representation (`not-started`, `in-progress`, `completed`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ModuleStatus::NotStarted => "not-started",
            ModuleStatus::InProgress => "in-progress",
            ModuleStatus::Completed => "completed",
        }
    }

    /// Human-readable label used on status controls.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            ModuleStatus::NotStarted => "Not Started",
            ModuleStatus::InProgress => "In Progress",
            ModuleStatus::Completed => "Completed",
        }
    }

    /// Parses a wire value, falling back to `NotStarted` for anything unrecognised.
    #[must_use]
    pub fn parse_or_default(raw: &str) -> Self {
        raw.parse().unwrap_or_default()
    }
}

impl<'de> Deserialize<'de> for ModuleStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::parse_or_default(&raw))
    }
}

impl fmt::Display for ModuleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "not-started" => Ok(Self::NotStarted),
            "in-progress" => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(StatusParseError::UnknownStatus(other.to_owned())),
        }
    }
}

//
// ─── RESOURCE KIND ─────────────────────────────────────────────────────────────
//

/// Kind of a recommended learning resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResourceKind {
    Video,
    Article,
    Course,
}

impl ResourceKind {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::Video => "video",
            ResourceKind::Article => "article",
            ResourceKind::Course => "course",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ResourceKind {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "video" => Ok(Self::Video),
            "article" => Ok(Self::Article),
            "course" => Ok(Self::Course),
            other => Err(StatusParseError::UnknownResourceKind(other.to_owned())),
        }
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
