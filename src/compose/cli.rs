// ABOUTME: ComposeOps implementation over the docker binary.
// ABOUTME: Project context (namespace, manifest, directory) is passed per call.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use crate::exec::{CommandOutput, run_command};
use crate::types::{ContainerId, ServiceName};

use super::{ComposeError, ComposeOps, Project, PsEntry, ResolvedConfig, parse_ps_output};

/// Subprocess-backed compose client.
///
/// Fleet-wide commands (image pruning) run in the fleet root; per-project
/// commands run in the project directory with `-p <namespace> -f <manifest>`
/// so the namespace never depends on ambient state.
#[derive(Debug, Clone)]
pub struct ComposeCli {
    fleet_root: PathBuf,
}

impl ComposeCli {
    pub fn new(fleet_root: PathBuf) -> Self {
        Self { fleet_root }
    }

    async fn compose(
        &self,
        project: &Project,
        operation: &str,
        extra: &[&str],
    ) -> Result<CommandOutput, ComposeError> {
        let manifest = project.manifest.to_string_lossy();
        let mut args = vec![
            "compose",
            "-p",
            project.name.as_str(),
            "-f",
            manifest.as_ref(),
        ];
        args.extend_from_slice(extra);

        let output = run_command("docker", &args, &project.dir).await?;
        if !output.success() {
            return Err(ComposeError::command_failed(
                operation,
                project.name.as_str(),
                output.failure_detail(),
            ));
        }
        Ok(output)
    }

    async fn docker(&self, operation: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput, ComposeError> {
        let output = run_command("docker", args, cwd).await?;
        if !output.success() {
            return Err(ComposeError::command_failed(
                operation,
                "-",
                output.failure_detail(),
            ));
        }
        Ok(output)
    }
}

#[async_trait]
impl ComposeOps for ComposeCli {
    async fn resolve_config(&self, project: &Project) -> Result<ResolvedConfig, ComposeError> {
        let output = self.compose(project, "config", &["config"]).await?;
        ResolvedConfig::from_yaml(&output.stdout)
            .map_err(|e| ComposeError::parse("config", project.name.as_str(), e.to_string()))
    }

    async fn services_status(&self, project: &Project) -> Result<Vec<PsEntry>, ComposeError> {
        let output = self
            .compose(project, "ps", &["ps", "--format", "json"])
            .await?;
        Ok(parse_ps_output(&output.stdout))
    }

    async fn container_id(
        &self,
        project: &Project,
        service: &ServiceName,
    ) -> Result<Option<ContainerId>, ComposeError> {
        let output = self
            .compose(project, "ps", &["ps", "-q", service.as_str()])
            .await?;
        // One ID per line; a scaled service reports several, the first is
        // representative for drift purposes.
        Ok(output
            .stdout
            .lines()
            .map(str::trim)
            .find(|l| !l.is_empty())
            .map(|id| ContainerId::new(id.to_string())))
    }

    async fn image_of(
        &self,
        project: &Project,
        container: &ContainerId,
    ) -> Result<String, ComposeError> {
        let output = self
            .docker(
                "inspect",
                &[
                    "inspect",
                    "--format",
                    "{{.Config.Image}}",
                    container.as_str(),
                ],
                &project.dir,
            )
            .await?;
        Ok(output.stdout.trim().to_string())
    }

    async fn pull(&self, project: &Project) -> Result<(), ComposeError> {
        self.compose(project, "pull", &["pull"]).await?;
        Ok(())
    }

    async fn down(&self, project: &Project) -> Result<(), ComposeError> {
        self.compose(project, "down", &["down", "--remove-orphans"])
            .await?;
        Ok(())
    }

    async fn up_detached(&self, project: &Project) -> Result<(), ComposeError> {
        self.compose(project, "up", &["up", "-d"]).await?;
        Ok(())
    }

    async fn prune_dangling_images(&self) -> Result<(), ComposeError> {
        self.docker("image prune", &["image", "prune", "-f"], &self.fleet_root)
            .await?;
        Ok(())
    }
}
