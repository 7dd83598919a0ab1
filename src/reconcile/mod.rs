// ABOUTME: The reconciliation decision engine.
// ABOUTME: Guard, inventory, changeset, probe, drift, redeploy, and the orchestrator.

mod changeset;
mod drift;
mod error;
mod guard;
mod inventory;
mod orchestrator;
mod probe;
mod redeploy;
mod summary;

pub use changeset::{ChangeSet, projects_from_paths, resolve_changeset};
pub use drift::{DriftEntry, DriftVerdict, detect_drift};
pub use error::{ReconcileError, ReconcileErrorKind};
pub use guard::{GuardError, LockInfo, MARKER_FILENAME, RunGuard, RunLease};
pub use inventory::discover_projects;
pub use orchestrator::Reconciler;
pub use probe::is_running;
pub use redeploy::{RedeployReport, RedeployStep, StepFailure, redeploy};
pub use summary::{ProjectOutcome, RunSummary, SummaryEntry, Workflow};
