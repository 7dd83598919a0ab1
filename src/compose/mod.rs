// ABOUTME: Container-orchestration collaborator boundary.
// ABOUTME: Defines ComposeOps, the compose project context, and the docker CLI client.

mod cli;
mod config;
mod error;
mod status;

pub use cli::ComposeCli;
pub use config::ResolvedConfig;
pub use error::ComposeError;
pub use status::{PsEntry, parse_ps_output};

use async_trait::async_trait;
use std::path::PathBuf;

use crate::types::{ContainerId, ProjectName, ServiceName};

/// Manifest filenames recognized as compose projects.
pub const MANIFEST_FILENAMES: [&str; 2] = ["docker-compose.yml", "docker-compose.yaml"];

/// One compose project: a directory with a manifest, deployed under its own
/// namespace. Enumerated fresh each run, never persisted.
#[derive(Debug, Clone)]
pub struct Project {
    /// Directory name; also the compose project namespace.
    pub name: ProjectName,
    /// Absolute path to the project directory.
    pub dir: PathBuf,
    /// Absolute path to the project's manifest.
    pub manifest: PathBuf,
}

/// Container-orchestration operations the reconciler consumes.
///
/// Implemented by [`ComposeCli`] over the docker binary; tests substitute
/// in-memory fakes.
#[async_trait]
pub trait ComposeOps: Send + Sync {
    /// Resolve and interpolate the project's manifest into typed form.
    async fn resolve_config(&self, project: &Project) -> Result<ResolvedConfig, ComposeError>;

    /// Per-service lifecycle states for the project's namespace.
    async fn services_status(&self, project: &Project) -> Result<Vec<PsEntry>, ComposeError>;

    /// Running container for a service, if any.
    async fn container_id(
        &self,
        project: &Project,
        service: &ServiceName,
    ) -> Result<Option<ContainerId>, ComposeError>;

    /// The image reference a container was started from.
    async fn image_of(
        &self,
        project: &Project,
        container: &ContainerId,
    ) -> Result<String, ComposeError>;

    /// Pull the latest images for the project's manifest.
    async fn pull(&self, project: &Project) -> Result<(), ComposeError>;

    /// Stop and remove the project's containers, including orphans not in
    /// the current manifest.
    async fn down(&self, project: &Project) -> Result<(), ComposeError>;

    /// Start the project's services detached.
    async fn up_detached(&self, project: &Project) -> Result<(), ComposeError>;

    /// Remove dangling images fleet-wide.
    async fn prune_dangling_images(&self) -> Result<(), ComposeError>;
}
