use pathway_core::model::PathProgress;
use services::PathSummaryRecord;

use crate::vm::progress_label;

/// A saved path as listed on the home page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PathListItemVm {
    pub id: String,
    pub title: String,
    pub description: String,
    pub progress_label: String,
}

impl From<&PathSummaryRecord> for PathListItemVm {
    fn from(record: &PathSummaryRecord) -> Self {
        let progress = PathProgress {
            total: record.module_count as usize,
            completed: record.completed_count as usize,
            in_progress: 0,
        };
        Self {
            id: record.id.to_string(),
            title: record.title.clone(),
            description: record.description.clone(),
            progress_label: progress_label(progress),
        }
    }
}

#[must_use]
pub fn map_path_list(records: &[PathSummaryRecord]) -> Vec<PathListItemVm> {
    records.iter().map(PathListItemVm::from).collect()
}
