// ABOUTME: Composes guard, inventory, changeset, probe, drift, and redeploy.
// ABOUTME: Owns the change-driven update and image-audit workflows.

use crate::compose::{ComposeOps, Project};
use crate::config::RunOptions;
use crate::diagnostics::{Diagnostics, Warning};
use crate::output::Output;
use crate::vcs::GitOps;

use super::changeset::{ChangeSet, resolve_changeset};
use super::drift::{DriftEntry, detect_drift};
use super::error::ReconcileError;
use super::guard::RunGuard;
use super::inventory::discover_projects;
use super::probe::is_running;
use super::redeploy::redeploy;
use super::summary::{ProjectOutcome, RunSummary, Workflow};

/// The reconciliation decision engine.
///
/// Projects are processed sequentially, one at a time, in directory-listing
/// order; no ordering guarantee is made across projects. Cross-process
/// exclusion comes from the run guard, whose lease is held for the whole
/// run and released on every exit path.
pub struct Reconciler<'a, G, C> {
    git: &'a G,
    compose: &'a C,
    options: &'a RunOptions,
    output: &'a Output,
}

impl<'a, G, C> Reconciler<'a, G, C>
where
    G: GitOps,
    C: ComposeOps,
{
    pub fn new(git: &'a G, compose: &'a C, options: &'a RunOptions, output: &'a Output) -> Self {
        Self {
            git,
            compose,
            options,
            output,
        }
    }

    /// Run the configured workflows under the mutual-exclusion lease.
    pub async fn run(&self) -> Result<RunSummary, ReconcileError> {
        let lease = RunGuard::acquire(&self.options.root, self.options.force_run)?;

        let mut summary = RunSummary::default();
        let mut diag = Diagnostics::default();

        let result = self.run_workflows(&mut summary, &mut diag).await;

        if let Err(e) = lease.release() {
            diag.warn(Warning::lease_release(format!(
                "failed to remove run marker: {e}"
            )));
        }

        for warning in diag.warnings() {
            self.output.warning(&warning.message);
        }

        result.map(|()| summary)
    }

    async fn run_workflows(
        &self,
        summary: &mut RunSummary,
        diag: &mut Diagnostics,
    ) -> Result<(), ReconcileError> {
        let remote = self.options.remote.as_str();
        let branch = match &self.options.branch {
            Some(branch) => branch.clone(),
            None => self.git.current_branch().await?,
        };

        self.output
            .progress(&format!("Syncing against {remote}/{branch}..."));
        self.git.checkout(&branch).await?;
        self.git.fetch(remote, &branch).await?;

        // The diff must run before pull advances the local branch.
        let changes = if self.options.force_all {
            None
        } else {
            Some(resolve_changeset(self.git, &branch, &format!("{remote}/{branch}")).await)
        };

        // Force-all redeploys whatever is in the worktree, so pulling would
        // be an unnecessary write; the audit still needs current manifests.
        if !self.options.force_all || self.options.check_images {
            self.git.pull(remote, &branch).await?;
        }

        let projects =
            discover_projects(&self.options.root).map_err(|source| ReconcileError::Inventory {
                source,
            })?;

        match &changes {
            Some(set) if set.is_empty() => {
                self.output
                    .progress("No manifest changes; nothing to update.");
            }
            _ => {
                self.update_pass(&projects, changes.as_ref(), summary, diag)
                    .await;
            }
        }

        if self.options.check_images {
            self.audit_pass(&projects, summary, diag).await;
        }

        // Pruning runs regardless of what the workflows decided.
        if self.options.prune_images {
            self.output.progress("Pruning dangling images...");
            if let Err(e) = self.compose.prune_dangling_images().await {
                diag.warn(Warning::prune(format!("image prune failed: {e}")));
            }
        }

        Ok(())
    }

    /// Workflow A: redeploy projects whose manifests changed (or, under
    /// force-all, every running project).
    async fn update_pass(
        &self,
        projects: &[Project],
        changes: Option<&ChangeSet>,
        summary: &mut RunSummary,
        diag: &mut Diagnostics,
    ) {
        match changes {
            Some(set) => self.output.progress(&format!(
                "Updating {} changed project(s) across {} candidate(s)...",
                set.len(),
                projects.len()
            )),
            None => self.output.progress(&format!(
                "Force-updating all running projects ({} candidate(s))...",
                projects.len()
            )),
        }

        for project in projects {
            if self.options.ignore.projects.contains(project.name.as_str()) {
                self.record(Workflow::Update, project, ProjectOutcome::SkippedIgnored, summary);
                continue;
            }

            let changed = changes.is_none_or(|set| set.contains(&project.name));
            if !changed {
                continue;
            }

            let running = match is_running(self.compose, project).await {
                Ok(running) => running,
                Err(e) => {
                    diag.warn(Warning::probe(format!(
                        "{}: status probe failed, skipping this pass: {e}",
                        project.name
                    )));
                    continue;
                }
            };

            if !running {
                self.record(
                    Workflow::Update,
                    project,
                    ProjectOutcome::SkippedNotRunning,
                    summary,
                );
                continue;
            }

            self.redeploy_project(Workflow::Update, project, summary).await;
        }
    }

    /// Workflow B: audit declared vs. running images; the first mismatch in
    /// a project triggers its single redeploy, the rest are reported only.
    async fn audit_pass(
        &self,
        projects: &[Project],
        summary: &mut RunSummary,
        diag: &mut Diagnostics,
    ) {
        self.output.progress(&format!(
            "Auditing images across {} project(s)...",
            projects.len()
        ));

        for project in projects {
            if self.options.ignore.projects.contains(project.name.as_str()) {
                self.record(Workflow::Audit, project, ProjectOutcome::SkippedIgnored, summary);
                continue;
            }

            let running = match is_running(self.compose, project).await {
                Ok(running) => running,
                Err(e) => {
                    diag.warn(Warning::probe(format!(
                        "{}: status probe failed, skipping audit: {e}",
                        project.name
                    )));
                    continue;
                }
            };

            if !running {
                tracing::debug!("{}: not running, audit skipped", project.name);
                continue;
            }

            let entries =
                match detect_drift(self.compose, project, &self.options.ignore.images).await {
                    Ok(entries) => entries,
                    Err(e) => {
                        diag.warn(Warning::drift(format!(
                            "{}: drift detection failed, skipping audit: {e}",
                            project.name
                        )));
                        continue;
                    }
                };

            let mut redeployed = false;
            for entry in &entries {
                match entry {
                    DriftEntry::NotRunning { service } => {
                        self.output.progress(&format!(
                            "  {}/{service}: declared but no running container",
                            project.name
                        ));
                    }
                    DriftEntry::Verdict(v) if v.matched => {
                        tracing::debug!(
                            "{}/{}: running declared image {}",
                            project.name,
                            v.service,
                            v.expected
                        );
                    }
                    DriftEntry::Verdict(v) => {
                        self.output.progress(&format!(
                            "  {}/{}: declared {} but running {}",
                            project.name, v.service, v.expected, v.actual
                        ));
                        if !redeployed {
                            redeployed = true;
                            self.redeploy_project(Workflow::Audit, project, summary).await;
                        }
                    }
                }
            }
        }
    }

    async fn redeploy_project(
        &self,
        workflow: Workflow,
        project: &Project,
        summary: &mut RunSummary,
    ) {
        self.output
            .progress(&format!("  Redeploying {}...", project.name));

        let outcome = match redeploy(self.compose, project).await {
            Ok(report) if report.all_succeeded() => ProjectOutcome::Updated,
            Ok(report) => ProjectOutcome::StepsFailed(report.failed_steps()),
            Err(e) => {
                tracing::error!("{}: redeploy could not start: {}", project.name, e);
                ProjectOutcome::Failed
            }
        };

        self.record(workflow, project, outcome, summary);
    }

    fn record(
        &self,
        workflow: Workflow,
        project: &Project,
        outcome: ProjectOutcome,
        summary: &mut RunSummary,
    ) {
        self.output.outcome(
            &workflow.to_string(),
            project.name.as_str(),
            &outcome.to_string(),
        );
        summary.record(workflow, project.name.clone(), outcome);
    }
}
