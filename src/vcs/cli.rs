// ABOUTME: GitOps implementation over the git binary.
// ABOUTME: Every invocation runs in the configured repository root.

use async_trait::async_trait;
use std::path::PathBuf;

use crate::exec::run_command;

use super::{GitOps, VcsError};

/// Subprocess-backed git client bound to one repository root.
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_root: PathBuf,
}

impl GitCli {
    pub fn new(repo_root: PathBuf) -> Self {
        Self { repo_root }
    }

    async fn git(&self, operation: &str, args: &[&str]) -> Result<String, VcsError> {
        let output = run_command("git", args, &self.repo_root).await?;
        if !output.success() {
            return Err(VcsError::command_failed(
                operation,
                output.failure_detail(),
            ));
        }
        Ok(output.stdout)
    }
}

#[async_trait]
impl GitOps for GitCli {
    async fn current_branch(&self) -> Result<String, VcsError> {
        let stdout = self
            .git("rev-parse", &["rev-parse", "--abbrev-ref", "HEAD"])
            .await?;
        let branch = stdout.trim();
        if branch.is_empty() || branch == "HEAD" {
            return Err(VcsError::unexpected_output(
                "rev-parse",
                format!("not on a branch: {branch:?}"),
            ));
        }
        Ok(branch.to_string())
    }

    async fn checkout(&self, branch: &str) -> Result<(), VcsError> {
        self.git("checkout", &["checkout", branch]).await?;
        Ok(())
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<(), VcsError> {
        self.git("fetch", &["fetch", remote, branch]).await?;
        Ok(())
    }

    async fn diff_names(&self, rev1: &str, rev2: &str) -> Result<Vec<PathBuf>, VcsError> {
        let stdout = self
            .git("diff", &["diff", "--name-only", rev1, rev2])
            .await?;
        Ok(stdout
            .lines()
            .map(str::trim)
            .filter(|l| !l.is_empty())
            .map(PathBuf::from)
            .collect())
    }

    async fn pull(&self, remote: &str, branch: &str) -> Result<(), VcsError> {
        self.git("pull", &["pull", remote, branch]).await?;
        Ok(())
    }
}
