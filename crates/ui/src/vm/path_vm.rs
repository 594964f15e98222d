use pathway_core::model::{
    LearningModule, LearningPath, ModuleId, ModuleStatus, PathProgress, Resource,
};

/// Icon shown next to a module title.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StatusMarker {
    Neutral,
    Partial,
    Affirmative,
}

impl StatusMarker {
    #[must_use]
    pub fn for_status(status: ModuleStatus) -> Self {
        match status {
            ModuleStatus::Completed => StatusMarker::Affirmative,
            ModuleStatus::InProgress => StatusMarker::Partial,
            ModuleStatus::NotStarted => StatusMarker::Neutral,
        }
    }

    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            StatusMarker::Neutral => "○",
            StatusMarker::Partial => "◔",
            StatusMarker::Affirmative => "✔",
        }
    }

    #[must_use]
    pub fn class(self) -> &'static str {
        match self {
            StatusMarker::Neutral => "status-marker status-marker--neutral",
            StatusMarker::Partial => "status-marker status-marker--partial",
            StatusMarker::Affirmative => "status-marker status-marker--affirmative",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceVm {
    pub kind_label: &'static str,
    pub title: String,
    /// Only set for links that are safe to open.
    pub href: Option<String>,
}

impl From<&Resource> for ResourceVm {
    fn from(resource: &Resource) -> Self {
        Self {
            kind_label: resource.kind().as_str(),
            title: resource.title().to_owned(),
            href: resource.link().map(|url| url.to_string()),
        }
    }
}

/// One of the three mutually exclusive status buttons.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StatusControlVm {
    pub status: ModuleStatus,
    pub label: &'static str,
    pub active: bool,
}

impl StatusControlVm {
    #[must_use]
    pub fn class(&self) -> &'static str {
        if self.active {
            "btn btn-sm btn-primary status-control status-control--active"
        } else {
            "btn btn-sm btn-outline status-control"
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct ModuleCardVm {
    pub id: ModuleId,
    pub title: String,
    pub description: String,
    pub hours_label: String,
    pub status: ModuleStatus,
    pub marker: StatusMarker,
    pub card_class: String,
    pub resources: Vec<ResourceVm>,
    /// Empty unless the path is saved.
    pub controls: Vec<StatusControlVm>,
}

#[derive(Clone, Debug, PartialEq)]
pub struct PathVm {
    pub title: String,
    pub description: String,
    pub progress_label: String,
    pub show_controls: bool,
    pub modules: Vec<ModuleCardVm>,
}

fn map_module(module: &LearningModule, show_controls: bool) -> ModuleCardVm {
    let status = module.status();
    let controls = if show_controls {
        ModuleStatus::ALL
            .into_iter()
            .map(|candidate| StatusControlVm {
                status: candidate,
                label: candidate.label(),
                active: candidate == status,
            })
            .collect()
    } else {
        Vec::new()
    };

    ModuleCardVm {
        id: module.id().clone(),
        title: module.title().to_owned(),
        description: module.description().to_owned(),
        hours_label: format!("Estimated time: {} hours", module.estimated_hours()),
        status,
        marker: StatusMarker::for_status(status),
        card_class: format!("learn-card status-{}", status.as_str()),
        resources: module.resources().iter().map(ResourceVm::from).collect(),
        controls,
    }
}

#[must_use]
pub fn progress_label(progress: PathProgress) -> String {
    format!(
        "{} of {} modules completed ({}%)",
        progress.completed,
        progress.total,
        progress.percent_complete()
    )
}

/// Convert a path into render-ready cards. Controls appear only on saved paths.
#[must_use]
pub fn map_path(path: &LearningPath) -> PathVm {
    let show_controls = path.is_saved();
    PathVm {
        title: path.title().to_owned(),
        description: path.description().to_owned(),
        progress_label: progress_label(path.progress()),
        show_controls,
        modules: path
            .modules()
            .iter()
            .map(|module| map_module(module, show_controls))
            .collect(),
    }
}
