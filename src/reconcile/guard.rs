// ABOUTME: Run-level mutual exclusion via a marker file in the fleet root.
// ABOUTME: Marker holds JSON lock info; release is idempotent and wired to Drop.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Fixed marker filename, relative to the fleet root.
pub const MARKER_FILENAME: &str = ".flotilla.lock";

/// Information about who holds the run marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LockInfo {
    /// Hostname of the machine that created the marker.
    pub holder: String,
    /// Process ID of the marker creator.
    pub pid: u32,
    /// When the run started.
    pub started_at: DateTime<Utc>,
}

impl LockInfo {
    /// Lock info for the current process.
    pub fn for_current_process() -> Self {
        Self {
            holder: gethostname::gethostname().to_string_lossy().into_owned(),
            pid: std::process::id(),
            started_at: Utc::now(),
        }
    }

    /// Marker path under a fleet root.
    pub fn marker_path(root: &Path) -> PathBuf {
        root.join(MARKER_FILENAME)
    }

    fn age_description(&self) -> String {
        let age = Utc::now() - self.started_at;
        let secs = age.num_seconds().max(0);
        if secs < 120 {
            format!("started {secs}s ago")
        } else {
            format!("started {}m ago", secs / 60)
        }
    }
}

#[derive(Debug, Error)]
pub enum GuardError {
    #[error("another run is already in progress: held by {holder} (pid {pid}, {age})")]
    AlreadyRunning {
        holder: String,
        pid: u32,
        age: String,
    },

    #[error("another run is already in progress (marker exists but is unreadable)")]
    AlreadyRunningUnknownHolder,

    #[error("failed to create run marker: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to encode run marker: {0}")]
    Encode(#[from] serde_json::Error),
}

impl GuardError {
    pub fn is_already_running(&self) -> bool {
        matches!(
            self,
            GuardError::AlreadyRunning { .. } | GuardError::AlreadyRunningUnknownHolder
        )
    }
}

/// Entry point for acquiring the run lease.
pub struct RunGuard;

impl RunGuard {
    /// Acquire the run lease for a fleet root.
    ///
    /// Creates the marker file with create-exclusive semantics; concurrent
    /// acquirers race on creation and at least one observes
    /// `AlreadyRunning`. With `force_run`, an existing marker is ignored
    /// (never removed) and the lease does not own it.
    pub fn acquire(root: &Path, force_run: bool) -> Result<RunLease, GuardError> {
        let marker = LockInfo::marker_path(root);
        let info = LockInfo::for_current_process();
        let json = serde_json::to_string_pretty(&info)?;

        match OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&marker)
        {
            Ok(mut file) => {
                file.write_all(json.as_bytes())?;
                tracing::debug!("created run marker at {}", marker.display());
                Ok(RunLease {
                    marker,
                    owns_marker: true,
                    released: false,
                })
            }
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                if force_run {
                    tracing::warn!(
                        "run marker already exists at {}; proceeding anyway (force-run)",
                        marker.display()
                    );
                    Ok(RunLease {
                        marker,
                        owns_marker: false,
                        released: false,
                    })
                } else {
                    Err(Self::holder_error(&marker))
                }
            }
            Err(e) => Err(GuardError::Io(e)),
        }
    }

    fn holder_error(marker: &Path) -> GuardError {
        match std::fs::read_to_string(marker)
            .ok()
            .and_then(|contents| serde_json::from_str::<LockInfo>(&contents).ok())
        {
            Some(info) => GuardError::AlreadyRunning {
                age: info.age_description(),
                holder: info.holder,
                pid: info.pid,
            },
            None => GuardError::AlreadyRunningUnknownHolder,
        }
    }
}

/// A held run lease.
///
/// Releasing removes the marker only if this lease created it; a lease
/// granted over a pre-existing marker (force-run) never deletes it. Dropping
/// the lease releases it too, so early returns, propagated errors, and
/// cancellation all clean up.
#[derive(Debug)]
pub struct RunLease {
    marker: PathBuf,
    owns_marker: bool,
    released: bool,
}

impl RunLease {
    pub fn owns_marker(&self) -> bool {
        self.owns_marker
    }

    /// Release the lease. Idempotent.
    pub fn release(mut self) -> std::io::Result<()> {
        self.release_inner()
    }

    fn release_inner(&mut self) -> std::io::Result<()> {
        if self.released {
            return Ok(());
        }
        self.released = true;

        if !self.owns_marker {
            return Ok(());
        }

        match std::fs::remove_file(&self.marker) {
            Ok(()) => {
                tracing::debug!("removed run marker at {}", self.marker.display());
                Ok(())
            }
            // Already gone counts as released.
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }
}

impl Drop for RunLease {
    fn drop(&mut self) {
        if let Err(e) = self.release_inner() {
            tracing::warn!(
                "failed to remove run marker at {}: {}",
                self.marker.display(),
                e
            );
        }
    }
}
