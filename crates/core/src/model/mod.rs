mod ids;
mod module;
mod path;
mod status;

pub use ids::{ModuleId, ParseIdError, PathId};
pub use module::{LearningModule, ModuleError, Resource};
pub use path::{LearningPath, PathError, PathProgress};
pub use status::{ModuleStatus, ResourceKind, StatusParseError};
