use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use pathway_core::model::{LearningPath, ModuleId, ModuleStatus, PathId};
use pathway_core::time::fixed_now;
use services::{Clock, PathService};
use storage::repository::{
    InMemoryRepository, PathRepository, PathSummaryRecord, Storage, StorageError,
};

use super::test_harness::{
    HarnessOptions, ViewKind, drive_dom, sample_path, setup_view_harness,
};

async fn saved_sample(storage: &Storage) -> PathId {
    let service = PathService::new(Clock::fixed(fixed_now()), Arc::clone(&storage.paths));
    let mut path = sample_path();
    service.save_path(&mut path).await.expect("save path")
}

#[tokio::test(flavor = "current_thread")]
async fn saved_path_renders_cards_with_status_controls() {
    let storage = Storage::in_memory();
    let path_id = saved_sample(&storage).await;

    let mut options = HarnessOptions::new(ViewKind::SavedPath(path_id.to_string()));
    options.storage = storage;
    let mut harness = setup_view_harness(options);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Rust Foundations"), "missing title in {html}");
    assert!(html.contains("0 of 2 modules completed (0%)"), "missing progress in {html}");
    assert!(html.contains("Estimated time: 3 hours"), "missing hours in {html}");
    assert!(html.contains("learn-card status-in-progress"), "missing card class in {html}");
    assert!(html.contains("path-view path-view--editable"), "missing editable view in {html}");
    assert_eq!(
        html.matches("aria-pressed=").count(),
        6,
        "expected 3 controls per module in {html}"
    );
    assert_eq!(
        html.matches("aria-pressed=\"true\"").count(),
        2,
        "expected one active control per module in {html}"
    );
    assert!(html.contains("Recommended Resources:"), "missing resources in {html}");
    assert!(
        html.contains(
            "href=\"https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html\""
        ),
        "missing resource link in {html}"
    );
    assert!(!html.contains("javascript:"), "unsafe link rendered in {html}");
    assert!(html.contains("resource-link--disabled"), "missing disabled link in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn missing_path_renders_not_found() {
    let mut harness = setup_view_harness(HarnessOptions::new(ViewKind::SavedPath(
        "missing".to_string(),
    )));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("could not be found"), "missing not-found state in {html}");
    assert!(!html.contains("Retry"), "not-found should not offer retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn preview_of_unsaved_path_hides_status_controls() {
    let mut options = HarnessOptions::new(ViewKind::Preview);
    options.preview = Some(sample_path());
    let mut harness = setup_view_harness(options);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Ownership"), "missing module in {html}");
    assert!(html.contains("Traits"), "missing module in {html}");
    assert!(html.contains("Save path"), "missing save button in {html}");
    assert!(!html.contains("aria-pressed"), "unsaved path rendered controls in {html}");
    assert!(!html.contains("path-view--editable"), "unsaved path marked editable in {html}");
    assert!(html.contains("status-marker--partial"), "missing status marker in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn preview_without_handover_shows_placeholder() {
    let mut harness = setup_view_harness(HarnessOptions::new(ViewKind::Preview));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("No generated path to preview."), "missing placeholder in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_lists_saved_paths() {
    let storage = Storage::in_memory();
    let path_id = saved_sample(&storage).await;

    let mut options = HarnessOptions::new(ViewKind::Home);
    options.storage = storage;
    let mut harness = setup_view_harness(options);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Rust Foundations"), "missing path title in {html}");
    assert!(html.contains("0 of 2 modules completed (0%)"), "missing progress in {html}");
    let href = format!("/paths/{path_id}");
    assert!(html.contains(&href), "missing link {href} in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn home_with_no_paths_shows_empty_state() {
    let mut harness = setup_view_harness(HarnessOptions::new(ViewKind::Home));
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("No saved paths yet."), "missing empty state in {html}");
}

struct FailingPathRepo;

#[async_trait::async_trait]
impl PathRepository for FailingPathRepo {
    async fn insert_path(
        &self,
        _path: &LearningPath,
        _created_at: DateTime<Utc>,
    ) -> Result<PathId, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn get_path(&self, _id: &PathId) -> Result<Option<LearningPath>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn list_paths(&self, _limit: u32) -> Result<Vec<PathSummaryRecord>, StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }

    async fn update_module_status(
        &self,
        _path_id: &PathId,
        _module_id: &ModuleId,
        _status: ModuleStatus,
        _updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        Err(StorageError::Connection("fail".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn home_renders_error_state_when_store_fails() {
    let mut options = HarnessOptions::new(ViewKind::Home);
    options.storage = Storage {
        paths: Arc::new(FailingPathRepo),
    };
    let mut harness = setup_view_harness(options);
    harness.rebuild();
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("Something went wrong"), "missing error in {html}");
    assert!(html.contains("Retry"), "missing retry in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn header_shows_signed_in_user() {
    let mut options = HarnessOptions::new(ViewKind::Preview);
    options.user = Some("ada@example.com".to_string());
    let mut harness = setup_view_harness(options);
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("ada@example.com"), "missing user in {html}");
    assert!(html.contains("Sign out"), "missing sign out in {html}");
}

#[tokio::test(flavor = "current_thread")]
async fn header_without_user_shows_anonymous_state() {
    let mut harness = setup_view_harness(HarnessOptions::new(ViewKind::Preview));
    harness.rebuild();
    let html = harness.render();

    assert!(html.contains("Not signed in"), "missing anonymous label in {html}");
    assert!(harness.link_opener.opened().is_empty());
}

type StatusCall = (PathId, ModuleId, ModuleStatus);

/// Serves paths from memory but refuses every status update.
#[derive(Default)]
struct RejectingStatusRepo {
    inner: InMemoryRepository,
    status_calls: Mutex<Vec<StatusCall>>,
}

impl RejectingStatusRepo {
    fn status_calls(&self) -> Vec<StatusCall> {
        self.status_calls.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl PathRepository for RejectingStatusRepo {
    async fn insert_path(
        &self,
        path: &LearningPath,
        created_at: DateTime<Utc>,
    ) -> Result<PathId, StorageError> {
        self.inner.insert_path(path, created_at).await
    }

    async fn get_path(&self, id: &PathId) -> Result<Option<LearningPath>, StorageError> {
        self.inner.get_path(id).await
    }

    async fn list_paths(&self, limit: u32) -> Result<Vec<PathSummaryRecord>, StorageError> {
        self.inner.list_paths(limit).await
    }

    async fn update_module_status(
        &self,
        path_id: &PathId,
        module_id: &ModuleId,
        status: ModuleStatus,
        _updated_at: DateTime<Utc>,
    ) -> Result<(), StorageError> {
        self.status_calls
            .lock()
            .unwrap()
            .push((path_id.clone(), module_id.clone(), status));
        Err(StorageError::Rejected("database is locked".to_string()))
    }
}

#[tokio::test(flavor = "current_thread")]
async fn rejected_status_save_keeps_local_change_and_toasts() {
    let repo = Arc::new(RejectingStatusRepo::default());
    let storage = Storage {
        paths: repo.clone(),
    };
    let path_id = saved_sample(&storage).await;

    let mut options = HarnessOptions::new(ViewKind::SavedPath(path_id.to_string()));
    options.storage = storage;
    let mut harness = setup_view_harness(options);
    harness.rebuild();
    harness.drive_async().await;

    let select = harness.path_handles.select();
    select.call((ModuleId::new("m2"), ModuleStatus::Completed));
    drive_dom(&mut harness.dom);
    harness.drive_async().await;
    harness.drive_async().await;
    let html = harness.render();

    assert!(html.contains("learn-card status-completed"), "missing completed card in {html}");
    assert!(html.contains("1 of 2 modules completed (50%)"), "missing progress in {html}");
    assert_eq!(
        html.matches("aria-pressed=\"true\"").count(),
        2,
        "expected one active control per module in {html}"
    );
    assert!(html.contains("toast toast--destructive"), "missing error toast in {html}");
    assert!(
        html.contains("Failed to save your progress. Please try again."),
        "missing failure message in {html}"
    );
    assert_eq!(
        repo.status_calls(),
        vec![(path_id, ModuleId::new("m2"), ModuleStatus::Completed)]
    );
}

#[tokio::test(flavor = "current_thread")]
async fn signing_out_clears_user_and_confirms() {
    let mut options = HarnessOptions::new(ViewKind::Preview);
    options.user = Some("ada@example.com".to_string());
    let mut harness = setup_view_harness(options);
    harness.rebuild();

    harness.header_handles.sign_out().call(());
    drive_dom(&mut harness.dom);
    let html = harness.render();

    assert!(!html.contains("ada@example.com"), "user still shown in {html}");
    assert!(html.contains("Not signed in"), "missing anonymous label in {html}");
    assert!(
        html.contains("You have been successfully signed out."),
        "missing sign out toast in {html}"
    );
}
