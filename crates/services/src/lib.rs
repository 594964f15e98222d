#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod import;
pub mod notification;
pub mod path_service;
pub mod status_sync;

pub use pathway_core::Clock;
pub use storage::repository::PathSummaryRecord;

pub use app_services::AppServices;
pub use error::{AppServicesError, PathServiceError};
pub use import::parse_path_json;
pub use notification::{Notice, Notifier, RecordingNotifier, Severity};
pub use path_service::PathService;
pub use status_sync::{PendingSync, StatusSyncController, SyncFailure, SyncOutcome, SyncTarget};
