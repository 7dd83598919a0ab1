// ABOUTME: Parsing of `compose ps --format json` output.
// ABOUTME: Tolerates both the array form and the newer one-object-per-line form.

use serde::Deserialize;

/// One service's lifecycle state as reported by `compose ps`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct PsEntry {
    pub service: String,
    pub state: String,
}

impl PsEntry {
    pub fn new(service: impl Into<String>, state: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            state: state.into(),
        }
    }

    /// Whether this entry reports a running ("Up") container.
    ///
    /// Older compose releases report `Up ...` status strings, newer ones
    /// report the `running` state; both count.
    pub fn is_up(&self) -> bool {
        self.state.eq_ignore_ascii_case("running") || self.state.starts_with("Up")
    }
}

/// Parse `compose ps --format json` output.
///
/// Compose has emitted two shapes over its releases: a single JSON array,
/// and one JSON object per line. Unparseable lines are skipped; `ps` also
/// legitimately emits nothing when the namespace has no containers.
pub fn parse_ps_output(stdout: &str) -> Vec<PsEntry> {
    let trimmed = stdout.trim();
    if trimmed.is_empty() {
        return Vec::new();
    }

    if let Ok(entries) = serde_json::from_str::<Vec<PsEntry>>(trimmed) {
        return entries;
    }

    trimmed
        .lines()
        .filter_map(|line| {
            let line = line.trim();
            if line.is_empty() {
                return None;
            }
            match serde_json::from_str::<PsEntry>(line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    tracing::debug!("skipping unparseable ps line: {e}");
                    None
                }
            }
        })
        .collect()
}
