use thiserror::Error;

use crate::core::commands::CommandError;
use crate::path::PathError;
use crate::process::{ExitStatus, ProcessError};

#[derive(Debug, Error)]
pub enum ShellError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error(transparent)]
    Process(#[from] ProcessError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

impl ShellError {
    /// Status recorded in the session when a command fails this way.
    pub fn status(&self) -> ExitStatus {
        match self {
            ShellError::Path(PathError::NotFound(_)) => ExitStatus::NOT_FOUND,
            _ => ExitStatus::FAILURE,
        }
    }
}
