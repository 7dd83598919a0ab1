// ABOUTME: Version-control collaborator boundary.
// ABOUTME: Defines GitOps and the subprocess-backed GitCli implementation.

mod cli;
mod error;

pub use cli::GitCli;
pub use error::VcsError;

use async_trait::async_trait;
use std::path::PathBuf;

/// Version-control operations the reconciler consumes.
///
/// Deliberately unsealed: tests substitute in-memory fakes, and the real
/// implementation is just one way to reach an external collaborator.
#[async_trait]
pub trait GitOps: Send + Sync {
    /// Name of the currently checked-out branch.
    async fn current_branch(&self) -> Result<String, VcsError>;

    /// Place the worktree on the given branch.
    async fn checkout(&self, branch: &str) -> Result<(), VcsError>;

    /// Fetch a branch from a remote without touching the worktree.
    async fn fetch(&self, remote: &str, branch: &str) -> Result<(), VcsError>;

    /// Paths that differ between two revisions.
    async fn diff_names(&self, rev1: &str, rev2: &str) -> Result<Vec<PathBuf>, VcsError>;

    /// Advance the local branch to the remote tracking state.
    async fn pull(&self, remote: &str, branch: &str) -> Result<(), VcsError>;
}
