// ABOUTME: Immutable per-run configuration built once from the CLI.
// ABOUTME: No ambient global state; the orchestrator borrows this for the run's duration.

use std::collections::HashSet;
use std::path::PathBuf;

/// Exclusions supplied at invocation start. Exact-match containment only,
/// so `webapp` never shadows `webapp-admin`.
#[derive(Debug, Clone, Default)]
pub struct IgnoreSet {
    /// Project identities excluded from every workflow.
    pub projects: HashSet<String>,
    /// Expected image references excluded from drift detection.
    pub images: HashSet<String>,
}

impl IgnoreSet {
    pub fn new(projects: Vec<String>, images: Vec<String>) -> Self {
        Self {
            projects: projects.into_iter().collect(),
            images: images.into_iter().collect(),
        }
    }
}

/// Everything a run needs to know, fixed at startup.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Fleet root: one subdirectory per compose project, also the
    /// version-control worktree.
    pub root: PathBuf,
    /// Remote whose tracking branch manifests are compared against.
    pub remote: String,
    /// Branch to track; `None` means the currently checked-out branch.
    pub branch: Option<String>,
    /// Ignore a pre-existing run marker.
    pub force_run: bool,
    /// Redeploy every running project, skipping change detection.
    pub force_all: bool,
    /// Run the image-consistency audit workflow.
    pub check_images: bool,
    /// Prune dangling images after the workflows complete.
    pub prune_images: bool,
    pub ignore: IgnoreSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ignore_membership_is_exact_match() {
        let ignore = IgnoreSet::new(vec!["webapp".into()], vec!["nginx:1.25".into()]);

        assert!(ignore.projects.contains("webapp"));
        assert!(!ignore.projects.contains("webapp-admin"));
        assert!(!ignore.projects.contains("web"));

        assert!(ignore.images.contains("nginx:1.25"));
        assert!(!ignore.images.contains("nginx:1.25.3"));
        assert!(!ignore.images.contains("nginx"));
    }

    #[test]
    fn duplicate_entries_collapse() {
        let ignore = IgnoreSet::new(vec!["a".into(), "a".into()], vec![]);
        assert_eq!(ignore.projects.len(), 1);
    }
}
