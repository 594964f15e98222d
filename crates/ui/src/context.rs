use std::sync::Arc;

use pathway_core::model::LearningPath;
use services::{Notifier, PathService, StatusSyncController};

use crate::platform::LinkOpenerRef;

/// What the UI needs from the composition root.
pub trait UiApp: Send + Sync {
    fn path_service(&self) -> Arc<PathService>;
    fn status_sync(&self, notifier: Arc<dyn Notifier>) -> StatusSyncController;

    /// Identity supplied by the external auth provider, if anyone is signed in.
    fn current_user(&self) -> Option<String>;

    /// An unsaved path handed over at launch (e.g. a freshly generated one).
    fn preview_path(&self) -> Option<LearningPath>;

    fn link_opener(&self) -> LinkOpenerRef;
}

#[derive(Clone)]
pub struct AppContext {
    app: Arc<dyn UiApp>,
    path_service: Arc<PathService>,
    link_opener: LinkOpenerRef,
}

impl AppContext {
    #[must_use]
    pub fn new(app: Arc<dyn UiApp>) -> Self {
        let path_service = app.path_service();
        let link_opener = app.link_opener();
        Self {
            app,
            path_service,
            link_opener,
        }
    }

    #[must_use]
    pub fn path_service(&self) -> Arc<PathService> {
        Arc::clone(&self.path_service)
    }

    #[must_use]
    pub fn status_sync(&self, notifier: Arc<dyn Notifier>) -> StatusSyncController {
        self.app.status_sync(notifier)
    }

    #[must_use]
    pub fn current_user(&self) -> Option<String> {
        self.app.current_user()
    }

    #[must_use]
    pub fn preview_path(&self) -> Option<LearningPath> {
        self.app.preview_path()
    }

    #[must_use]
    pub fn link_opener(&self) -> LinkOpenerRef {
        Arc::clone(&self.link_opener)
    }
}

// This context is provided by the application composition root (e.g. `crates/app`).

/// Build an `AppContext` from a UI-facing app implementation.
#[must_use]
pub fn build_app_context(app: Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
