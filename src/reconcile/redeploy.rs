// ABOUTME: Best-effort redeploy of one project.
// ABOUTME: pull, down (remove orphans), up detached; step failures never abort later steps.

use crate::compose::{ComposeError, ComposeOps, Project};

/// The three redeploy steps, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedeployStep {
    Pull,
    Down,
    Up,
}

impl std::fmt::Display for RedeployStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RedeployStep::Pull => write!(f, "pull"),
            RedeployStep::Down => write!(f, "down"),
            RedeployStep::Up => write!(f, "up"),
        }
    }
}

/// A failed step and its cause.
#[derive(Debug)]
pub struct StepFailure {
    pub step: RedeployStep,
    pub error: ComposeError,
}

/// What happened during one redeploy: all steps ran, these failed.
#[derive(Debug, Default)]
pub struct RedeployReport {
    pub failed: Vec<StepFailure>,
}

impl RedeployReport {
    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_steps(&self) -> Vec<RedeployStep> {
        self.failed.iter().map(|f| f.step).collect()
    }
}

/// Redeploy one project: pull latest images, tear down the current
/// containers (including orphans), start fresh in detached mode.
///
/// Redeploys forward: a failed pull still tears down and starts from the
/// local image cache, and a failed teardown still attempts a fresh start.
/// Each failure is logged and recorded; the `Err` arm covers only the
/// resource-acquisition precondition of an inaccessible project directory.
pub async fn redeploy<C: ComposeOps + ?Sized>(
    compose: &C,
    project: &Project,
) -> Result<RedeployReport, ComposeError> {
    if !project.dir.is_dir() {
        return Err(ComposeError::ProjectDirMissing(project.dir.clone()));
    }

    let mut report = RedeployReport::default();

    if let Err(e) = compose.pull(project).await {
        tracing::warn!("{}: image pull failed, continuing with local cache: {}", project.name, e);
        report.failed.push(StepFailure {
            step: RedeployStep::Pull,
            error: e,
        });
    }

    if let Err(e) = compose.down(project).await {
        tracing::warn!("{}: teardown failed, attempting start anyway: {}", project.name, e);
        report.failed.push(StepFailure {
            step: RedeployStep::Down,
            error: e,
        });
    }

    if let Err(e) = compose.up_detached(project).await {
        tracing::error!("{}: start failed: {}", project.name, e);
        report.failed.push(StepFailure {
            step: RedeployStep::Up,
            error: e,
        });
    }

    Ok(report)
}
