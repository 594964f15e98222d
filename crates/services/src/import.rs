//! Parsing of generated learning paths delivered as JSON.

use pathway_core::model::{
    LearningModule, LearningPath, ModuleId, ModuleStatus, Resource, ResourceKind,
};
use serde::Deserialize;

use crate::error::PathServiceError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PathDocument {
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    modules: Vec<ModuleDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModuleDocument {
    id: ModuleId,
    title: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    status: ModuleStatus,
    #[serde(default)]
    estimated_hours: f64,
    #[serde(default)]
    resources: Vec<ResourceDocument>,
}

#[derive(Debug, Deserialize)]
struct ResourceDocument {
    #[serde(rename = "type")]
    kind: ResourceKind,
    title: String,
    url: String,
}

impl ModuleDocument {
    fn into_module(self) -> Result<LearningModule, PathServiceError> {
        let resources = self
            .resources
            .into_iter()
            .map(|r| Resource::new(r.kind, r.title, r.url))
            .collect::<Result<Vec<_>, _>>()
            .map_err(pathway_core::Error::from)?;
        let module = LearningModule::new(
            self.id,
            self.title,
            self.description,
            self.status,
            self.estimated_hours,
            resources,
        )
        .map_err(pathway_core::Error::from)?;
        Ok(module)
    }
}

/// Parse a path document into an unsaved `LearningPath`.
///
/// Missing statuses and unknown status strings become `not-started`.
///
/// # Errors
///
/// Returns `PathServiceError::Json` for malformed documents and
/// `PathServiceError::Domain` when the content fails validation.
pub fn parse_path_json(json: &str) -> Result<LearningPath, PathServiceError> {
    let doc: PathDocument = serde_json::from_str(json)?;
    let modules = doc
        .modules
        .into_iter()
        .map(ModuleDocument::into_module)
        .collect::<Result<Vec<_>, _>>()?;
    let path = LearningPath::new(doc.title, doc.description, modules)
        .map_err(pathway_core::Error::from)?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "title": "Web Development",
        "description": "Build for the browser",
        "modules": [
            {
                "id": "module-1",
                "title": "HTML",
                "description": "Markup basics",
                "status": "in-progress",
                "estimatedHours": 4,
                "resources": [
                    {
                        "type": "video",
                        "title": "HTML crash course",
                        "url": "https://example.com/html"
                    },
                    {
                        "type": "article",
                        "title": "MDN",
                        "url": "https://developer.mozilla.org"
                    }
                ]
            },
            {
                "id": "module-2",
                "title": "CSS",
                "status": "someday",
                "estimatedHours": 6.5
            }
        ]
    }"#;

    #[test]
    fn parses_generated_path_shape() {
        let path = parse_path_json(SAMPLE).unwrap();
        assert_eq!(path.title(), "Web Development");
        assert!(!path.is_saved());
        assert_eq!(path.modules().len(), 2);

        let html = &path.modules()[0];
        assert_eq!(html.id(), &ModuleId::new("module-1"));
        assert_eq!(html.status(), ModuleStatus::InProgress);
        assert_eq!(html.estimated_hours(), 4.0);
        assert_eq!(html.resources().len(), 2);
        assert_eq!(html.resources()[1].kind(), ResourceKind::Article);
    }

    #[test]
    fn unknown_status_falls_back_to_not_started() {
        let path = parse_path_json(SAMPLE).unwrap();
        assert_eq!(path.modules()[1].status(), ModuleStatus::NotStarted);
        assert!(path.modules()[1].resources().is_empty());
    }

    #[test]
    fn malformed_json_is_json_error() {
        let err = parse_path_json("{ not json").unwrap_err();
        assert!(matches!(err, PathServiceError::Json(_)));
    }

    #[test]
    fn negative_hours_is_domain_error() {
        let json = r#"{"title":"T","modules":[{"id":"m","title":"M","estimatedHours":-2}]}"#;
        let err = parse_path_json(json).unwrap_err();
        assert!(matches!(err, PathServiceError::Domain(_)));
    }

    #[test]
    fn duplicate_module_ids_are_rejected() {
        let json = r#"{"title":"T","modules":[{"id":"m","title":"A"},{"id":"m","title":"B"}]}"#;
        let err = parse_path_json(json).unwrap_err();
        assert!(matches!(err, PathServiceError::Domain(_)));
    }
}
