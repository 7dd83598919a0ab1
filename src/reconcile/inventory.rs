// ABOUTME: Candidate project discovery from the fleet root.
// ABOUTME: Immediate subdirectories containing a compose manifest; one level deep.

use std::path::{Path, PathBuf};

use crate::compose::{MANIFEST_FILENAMES, Project};
use crate::types::ProjectName;

/// Enumerate projects under `root`.
///
/// A project is an immediate subdirectory containing a compose manifest.
/// Nested projects are deliberately not discovered; directories without a
/// manifest are excluded, and manifest-bearing directories whose names are
/// not valid compose project names are skipped with a warning.
pub fn discover_projects(root: &Path) -> std::io::Result<Vec<Project>> {
    let mut projects = Vec::new();

    for entry in std::fs::read_dir(root)? {
        let entry = entry?;
        let dir = entry.path();
        if !dir.is_dir() {
            continue;
        }

        let Some(manifest) = manifest_in(&dir) else {
            continue;
        };

        let Some(dir_name) = dir.file_name().and_then(|n| n.to_str()) else {
            tracing::warn!("skipping non-UTF-8 directory name: {}", dir.display());
            continue;
        };

        match ProjectName::new(dir_name) {
            Ok(name) => projects.push(Project {
                name,
                manifest,
                dir,
            }),
            Err(e) => {
                tracing::warn!("skipping {}: {}", dir.display(), e);
            }
        }
    }

    Ok(projects)
}

fn manifest_in(dir: &Path) -> Option<PathBuf> {
    MANIFEST_FILENAMES
        .iter()
        .map(|filename| dir.join(filename))
        .find(|candidate| candidate.is_file())
}
