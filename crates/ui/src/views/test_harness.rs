use std::sync::{Arc, Mutex};

use dioxus::core::NoOpMutations;
use dioxus::prelude::*;
use dioxus_router::{Routable, Router};
use pathway_core::model::{
    LearningModule, LearningPath, ModuleId, ModuleStatus, Resource, ResourceKind,
};
use pathway_core::time::fixed_now;
use services::{Clock, Notifier, PathService, StatusSyncController};
use storage::repository::{PathRepository, Storage};

use crate::context::{UiApp, build_app_context};
use crate::platform::{LinkOpenerRef, UiLinkOpener};
use crate::toast::{ToastHost, ToastQueue};
use crate::views::header::HeaderTestHandles;
use crate::views::path_view::PathViewTestHandles;
use crate::views::{Header, HomeView, PreviewView, SavedPathView};

#[derive(Default)]
pub struct RecordingLinkOpener {
    opened: Mutex<Vec<String>>,
}

impl RecordingLinkOpener {
    pub fn opened(&self) -> Vec<String> {
        self.opened.lock().unwrap().clone()
    }
}

impl UiLinkOpener for RecordingLinkOpener {
    fn open_url(&self, url: &str) {
        self.opened.lock().unwrap().push(url.to_owned());
    }
}

struct TestApp {
    clock: Clock,
    paths: Arc<dyn PathRepository>,
    path_service: Arc<PathService>,
    user: Option<String>,
    preview: Option<LearningPath>,
    link_opener: Arc<RecordingLinkOpener>,
}

impl UiApp for TestApp {
    fn path_service(&self) -> Arc<PathService> {
        Arc::clone(&self.path_service)
    }

    fn status_sync(&self, notifier: Arc<dyn Notifier>) -> StatusSyncController {
        StatusSyncController::new(self.clock, Arc::clone(&self.paths), notifier)
    }

    fn current_user(&self) -> Option<String> {
        self.user.clone()
    }

    fn preview_path(&self) -> Option<LearningPath> {
        self.preview.clone()
    }

    fn link_opener(&self) -> LinkOpenerRef {
        self.link_opener.clone()
    }
}

#[derive(Clone, PartialEq, Eq)]
pub enum ViewKind {
    Home,
    SavedPath(String),
    Preview,
}

#[derive(Props, Clone)]
struct ViewHarnessProps {
    app: Arc<TestApp>,
    view: ViewKind,
    path_handles: PathViewTestHandles,
    header_handles: HeaderTestHandles,
}

impl PartialEq for ViewHarnessProps {
    fn eq(&self, _other: &Self) -> bool {
        true
    }
}

#[component]
fn ViewRouterHarness(props: ViewHarnessProps) -> Element {
    let app: Arc<dyn UiApp> = props.app.clone();
    use_context_provider(|| build_app_context(app));
    use_context_provider(|| props.view.clone());
    use_context_provider(|| props.path_handles.clone());
    use_context_provider(|| props.header_handles.clone());
    rsx! { Router::<TestRoute> {} }
}

#[derive(Clone, Routable, PartialEq)]
#[rustfmt::skip]
enum TestRoute {
    #[route("/")]
    Root {},
}

#[component]
fn Root() -> Element {
    ToastQueue::provide();
    let view = use_context::<ViewKind>();

    rsx! {
        Header {}
        match view {
            ViewKind::Home => rsx! { HomeView {} },
            ViewKind::SavedPath(path_id) => rsx! { SavedPathView { path_id } },
            ViewKind::Preview => rsx! { PreviewView {} },
        }
        ToastHost {}
    }
}

pub struct ViewHarness {
    pub dom: VirtualDom,
    pub link_opener: Arc<RecordingLinkOpener>,
    pub path_handles: PathViewTestHandles,
    pub header_handles: HeaderTestHandles,
}

impl ViewHarness {
    pub fn rebuild(&mut self) {
        self.dom.rebuild_in_place();
        drive_dom(&mut self.dom);
    }

    pub async fn drive_async(&mut self) {
        let _ = tokio::time::timeout(
            std::time::Duration::from_millis(50),
            self.dom.wait_for_work(),
        )
        .await;
        self.dom.render_immediate(&mut NoOpMutations);
        self.dom.process_events();
    }

    pub fn render(&self) -> String {
        dioxus_ssr::render(&self.dom)
    }
}

pub fn drive_dom(dom: &mut VirtualDom) {
    dom.process_events();
    dom.render_immediate(&mut NoOpMutations);
    dom.process_events();
}

pub struct HarnessOptions {
    pub view: ViewKind,
    pub storage: Storage,
    pub user: Option<String>,
    pub preview: Option<LearningPath>,
}

impl HarnessOptions {
    pub fn new(view: ViewKind) -> Self {
        Self {
            view,
            storage: Storage::in_memory(),
            user: None,
            preview: None,
        }
    }
}

pub fn setup_view_harness(options: HarnessOptions) -> ViewHarness {
    let clock = Clock::fixed(fixed_now());
    let storage = options.storage;
    let path_service = Arc::new(PathService::new(clock, Arc::clone(&storage.paths)));
    let link_opener = Arc::new(RecordingLinkOpener::default());

    let app = Arc::new(TestApp {
        clock,
        paths: Arc::clone(&storage.paths),
        path_service,
        user: options.user,
        preview: options.preview,
        link_opener: Arc::clone(&link_opener),
    });

    let path_handles = PathViewTestHandles::default();
    let header_handles = HeaderTestHandles::default();
    let dom = VirtualDom::new_with_props(
        ViewRouterHarness,
        ViewHarnessProps {
            app,
            view: options.view,
            path_handles: path_handles.clone(),
            header_handles: header_handles.clone(),
        },
    );

    ViewHarness {
        dom,
        link_opener,
        path_handles,
        header_handles,
    }
}

/// Two-module path: "Ownership" in progress, "Traits" not started.
pub fn sample_path() -> LearningPath {
    let modules = vec![
        LearningModule::new(
            ModuleId::new("m1"),
            "Ownership",
            "Moves and borrows",
            ModuleStatus::InProgress,
            3.0,
            vec![Resource::new(
                ResourceKind::Article,
                "The Book, chapter 4",
                "https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html",
            )
            .unwrap()],
        )
        .unwrap(),
        LearningModule::new(
            ModuleId::new("m2"),
            "Traits",
            "Shared behaviour",
            ModuleStatus::NotStarted,
            4.0,
            vec![Resource::new(ResourceKind::Video, "Broken link", "javascript:alert(1)").unwrap()],
        )
        .unwrap(),
    ];
    LearningPath::new("Rust Foundations", "From zero to traits", modules).unwrap()
}
