//! The user-facing notification surface.

use std::sync::{Arc, Mutex};

/// How prominently a notice is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Destructive,
}

/// A transient message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

impl Notice {
    #[must_use]
    pub fn error(description: impl Into<String>) -> Self {
        Self {
            title: "Error".to_owned(),
            description: description.into(),
            severity: Severity::Destructive,
        }
    }

    #[must_use]
    pub fn info(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            severity: Severity::Info,
        }
    }
}

/// Displays notices. Fire-and-forget: nothing is returned or awaited.
pub trait Notifier: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Keeps every notice it receives; handy for tests and headless runs.
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    notices: Arc<Mutex<Vec<Notice>>>,
}

impl RecordingNotifier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the notices received so far, oldest first.
    #[must_use]
    pub fn notices(&self) -> Vec<Notice> {
        self.notices
            .lock()
            .map(|guard| guard.clone())
            .unwrap_or_default()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notice: Notice) {
        if let Ok(mut guard) = self.notices.lock() {
            guard.push(notice);
        }
    }
}
