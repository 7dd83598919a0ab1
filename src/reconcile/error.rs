// ABOUTME: Unified run-level error with SNAFU pattern.
// ABOUTME: Only fatal conditions surface here; everything else becomes diagnostics.

use snafu::Snafu;

use crate::vcs::VcsError;

use super::guard::GuardError;

/// Fatal errors that abort an entire run.
#[derive(Debug, Snafu)]
#[snafu(visibility(pub))]
pub enum ReconcileError {
    #[snafu(display("mutual exclusion: {source}"))]
    Guard { source: GuardError },

    #[snafu(display("version-control sync failed: {source}"))]
    Sync { source: VcsError },

    #[snafu(display("project discovery failed: {source}"))]
    Inventory { source: std::io::Error },
}

/// Error kind for programmatic handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileErrorKind {
    /// Another run holds the marker and no override was given.
    AlreadyRunning,
    /// Checkout, fetch, or pull on the tracking branch failed.
    VcsFailure,
    /// Filesystem-level failure (marker creation, fleet enumeration).
    Io,
}

impl ReconcileError {
    /// Returns the error kind for programmatic handling.
    pub fn kind(&self) -> ReconcileErrorKind {
        match self {
            ReconcileError::Guard { source } if source.is_already_running() => {
                ReconcileErrorKind::AlreadyRunning
            }
            ReconcileError::Guard { .. } => ReconcileErrorKind::Io,
            ReconcileError::Sync { .. } => ReconcileErrorKind::VcsFailure,
            ReconcileError::Inventory { .. } => ReconcileErrorKind::Io,
        }
    }
}

impl From<GuardError> for ReconcileError {
    fn from(source: GuardError) -> Self {
        ReconcileError::Guard { source }
    }
}

impl From<VcsError> for ReconcileError {
    fn from(source: VcsError) -> Self {
        ReconcileError::Sync { source }
    }
}
