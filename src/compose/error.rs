// ABOUTME: Error types for compose operations.
// ABOUTME: Covers spawn failures, nonzero exits, and output parse errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ComposeError {
    #[error("failed to invoke container runtime: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("compose {operation} failed for {project}: {detail}")]
    CommandFailed {
        operation: String,
        project: String,
        detail: String,
    },

    #[error("could not parse {operation} output for {project}: {detail}")]
    Parse {
        operation: String,
        project: String,
        detail: String,
    },

    #[error("project directory does not exist: {0}")]
    ProjectDirMissing(std::path::PathBuf),
}

impl ComposeError {
    pub fn command_failed(
        operation: impl Into<String>,
        project: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        ComposeError::CommandFailed {
            operation: operation.into(),
            project: project.into(),
            detail: detail.into(),
        }
    }

    pub fn parse(
        operation: impl Into<String>,
        project: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        ComposeError::Parse {
            operation: operation.into(),
            project: project.into(),
            detail: detail.into(),
        }
    }
}
