// ABOUTME: Image drift detection for one project.
// ABOUTME: Compares declared images against what running containers were started from.

use std::collections::HashSet;

use crate::compose::{ComposeError, ComposeOps, Project};
use crate::types::ServiceName;

/// One drift-detection result for a declared service.
#[derive(Debug, Clone)]
pub enum DriftEntry {
    /// Declared service with no running container. Informational; does not
    /// trigger a redeploy by itself.
    NotRunning { service: ServiceName },
    /// Comparable service with both a declared and a running image.
    Verdict(DriftVerdict),
}

#[derive(Debug, Clone)]
pub struct DriftVerdict {
    pub service: ServiceName,
    pub expected: String,
    pub actual: String,
    pub matched: bool,
}

/// Detect drift for every service declared in the project's resolved
/// manifest.
///
/// Services whose expected image is in `ignored_images` emit no entry at
/// all (neither drifted nor matched); services without an `image:` key are
/// skipped. Comparison is exact string equality on image references; no
/// digest/tag equivalence is attempted.
pub async fn detect_drift<C: ComposeOps + ?Sized>(
    compose: &C,
    project: &Project,
    ignored_images: &HashSet<String>,
) -> Result<Vec<DriftEntry>, ComposeError> {
    let config = compose.resolve_config(project).await?;
    let mut entries = Vec::new();

    for (service, expected) in config.declared_images() {
        if ignored_images.contains(expected) {
            tracing::debug!("{}/{}: image {} ignored", project.name, service, expected);
            continue;
        }

        let service = match ServiceName::new(service) {
            Ok(s) => s,
            Err(e) => {
                tracing::warn!("{}: skipping service {:?}: {}", project.name, service, e);
                continue;
            }
        };

        match compose.container_id(project, &service).await? {
            None => entries.push(DriftEntry::NotRunning { service }),
            Some(container) => {
                let actual = compose.image_of(project, &container).await?;
                let matched = actual == expected;
                entries.push(DriftEntry::Verdict(DriftVerdict {
                    service,
                    expected: expected.to_string(),
                    actual,
                    matched,
                }));
            }
        }
    }

    Ok(entries)
}
