// ABOUTME: Per-project outcomes and end-of-run aggregation.
// ABOUTME: Entries are kept per workflow and never deduplicated across workflows.

use std::fmt;

use crate::types::ProjectName;

use super::redeploy::RedeployStep;

/// Which workflow produced an outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Change-driven update (default / force-all).
    Update,
    /// Image-consistency audit (`--check-images`).
    Audit,
}

impl fmt::Display for Workflow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Workflow::Update => write!(f, "update"),
            Workflow::Audit => write!(f, "audit"),
        }
    }
}

/// What happened to one project in one workflow pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectOutcome {
    /// All three redeploy steps succeeded.
    Updated,
    /// Candidate for redeploy but no service was up.
    SkippedNotRunning,
    /// Listed in the ignored-projects set; never probed.
    SkippedIgnored,
    /// Redeploy ran; these steps failed.
    StepsFailed(Vec<RedeployStep>),
    /// Redeploy could not start (project directory inaccessible).
    Failed,
}

impl ProjectOutcome {
    /// Whether a redeploy was actually invoked for this outcome.
    pub fn redeploy_attempted(&self) -> bool {
        matches!(
            self,
            ProjectOutcome::Updated | ProjectOutcome::StepsFailed(_)
        )
    }
}

impl fmt::Display for ProjectOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProjectOutcome::Updated => write!(f, "updated"),
            ProjectOutcome::SkippedNotRunning => write!(f, "skipped (not running)"),
            ProjectOutcome::SkippedIgnored => write!(f, "skipped (ignored)"),
            ProjectOutcome::StepsFailed(steps) => {
                write!(f, "step failures:")?;
                for step in steps {
                    write!(f, " {step}")?;
                }
                Ok(())
            }
            ProjectOutcome::Failed => write!(f, "failed (project directory unavailable)"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SummaryEntry {
    pub workflow: Workflow,
    pub project: ProjectName,
    pub outcome: ProjectOutcome,
}

/// Aggregated outcomes for one run. For the end-of-run report only; nothing
/// here is persisted.
#[derive(Debug, Default)]
pub struct RunSummary {
    entries: Vec<SummaryEntry>,
}

impl RunSummary {
    pub fn record(&mut self, workflow: Workflow, project: ProjectName, outcome: ProjectOutcome) {
        self.entries.push(SummaryEntry {
            workflow,
            project,
            outcome,
        });
    }

    pub fn entries(&self) -> &[SummaryEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn updated_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome == ProjectOutcome::Updated)
            .count()
    }

    pub fn redeploys_attempted(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| e.outcome.redeploy_attempted())
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|e| {
                matches!(
                    e.outcome,
                    ProjectOutcome::SkippedNotRunning | ProjectOutcome::SkippedIgnored
                )
            })
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name(s: &str) -> ProjectName {
        ProjectName::new(s).unwrap()
    }

    #[test]
    fn counts_distinguish_updates_and_skips() {
        let mut summary = RunSummary::default();
        summary.record(Workflow::Update, name("a"), ProjectOutcome::Updated);
        summary.record(Workflow::Update, name("b"), ProjectOutcome::SkippedNotRunning);
        summary.record(Workflow::Audit, name("c"), ProjectOutcome::SkippedIgnored);
        summary.record(
            Workflow::Audit,
            name("d"),
            ProjectOutcome::StepsFailed(vec![RedeployStep::Pull]),
        );

        assert_eq!(summary.updated_count(), 1);
        assert_eq!(summary.skipped_count(), 2);
        assert_eq!(summary.redeploys_attempted(), 2);
    }

    #[test]
    fn same_project_may_appear_once_per_workflow() {
        let mut summary = RunSummary::default();
        summary.record(Workflow::Update, name("a"), ProjectOutcome::Updated);
        summary.record(Workflow::Audit, name("a"), ProjectOutcome::Updated);

        assert_eq!(summary.entries().len(), 2);
        assert_eq!(summary.updated_count(), 2);
    }

    #[test]
    fn step_failure_outcome_lists_steps() {
        let outcome =
            ProjectOutcome::StepsFailed(vec![RedeployStep::Pull, RedeployStep::Up]);
        assert_eq!(outcome.to_string(), "step failures: pull up");
        assert!(outcome.redeploy_attempted());
    }
}
