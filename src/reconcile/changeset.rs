// ABOUTME: Maps version-control diffs to the projects whose manifests changed.
// ABOUTME: Diff failure is treated as "no changes", never as an error.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use crate::compose::MANIFEST_FILENAMES;
use crate::types::ProjectName;
use crate::vcs::GitOps;

/// Projects whose manifests differ between two revisions. Membership only.
pub type ChangeSet = HashSet<ProjectName>;

/// Resolve the ChangeSet between two revisions.
///
/// Pure with respect to the filesystem and local revision state: it only
/// asks the version-control collaborator for differing paths. A failing
/// diff yields an empty set.
pub async fn resolve_changeset<G: GitOps + ?Sized>(
    git: &G,
    local_rev: &str,
    remote_rev: &str,
) -> ChangeSet {
    match git.diff_names(local_rev, remote_rev).await {
        Ok(paths) => projects_from_paths(&paths),
        Err(e) => {
            tracing::warn!("diff {local_rev}..{remote_rev} failed, treating as no changes: {e}");
            ChangeSet::new()
        }
    }
}

/// Map differing paths to project identities.
///
/// Keeps only compose manifest files and takes the name of the directory
/// containing each one. Paths whose containing directory is not a valid
/// project name (including manifests at the repository root) are dropped.
pub fn projects_from_paths(paths: &[PathBuf]) -> ChangeSet {
    let mut changed = ChangeSet::new();

    for path in paths {
        let Some(filename) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !MANIFEST_FILENAMES.contains(&filename) {
            continue;
        }

        let Some(dir_name) = path
            .parent()
            .and_then(Path::file_name)
            .and_then(|n| n.to_str())
        else {
            continue;
        };

        match ProjectName::new(dir_name) {
            Ok(name) => {
                changed.insert(name);
            }
            Err(e) => {
                tracing::debug!("ignoring manifest change at {}: {}", path.display(), e);
            }
        }
    }

    changed
}
