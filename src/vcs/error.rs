// ABOUTME: Error types for version-control operations.
// ABOUTME: Distinguishes spawn failures from nonzero git exits.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum VcsError {
    #[error("failed to invoke git: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("git {operation} failed: {detail}")]
    CommandFailed { operation: String, detail: String },

    #[error("unexpected git output for {operation}: {detail}")]
    UnexpectedOutput { operation: String, detail: String },
}

impl VcsError {
    pub fn command_failed(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        VcsError::CommandFailed {
            operation: operation.into(),
            detail: detail.into(),
        }
    }

    pub fn unexpected_output(operation: impl Into<String>, detail: impl Into<String>) -> Self {
        VcsError::UnexpectedOutput {
            operation: operation.into(),
            detail: detail.into(),
        }
    }
}
