use thiserror::Error;

use crate::model::{ModuleError, PathError, StatusParseError};

/// Any validation failure raised while building domain values.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Module(#[from] ModuleError),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Status(#[from] StatusParseError),
}
