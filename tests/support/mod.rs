// ABOUTME: Shared test support: in-memory fake collaborators with call recording.
// ABOUTME: Fakes implement the public GitOps/ComposeOps traits for orchestrator tests.

// Each test binary only uses some of these helpers, so allow dead_code.
#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::path::PathBuf;
use std::sync::Mutex;

use flotilla::compose::{ComposeError, ComposeOps, Project, PsEntry, ResolvedConfig};
use flotilla::types::{ContainerId, ServiceName};
use flotilla::vcs::{GitOps, VcsError};

/// In-memory git collaborator. Records every call in order.
#[derive(Default)]
pub struct FakeGit {
    pub branch: String,
    pub diff_paths: Vec<PathBuf>,
    pub fail_checkout: bool,
    pub fail_fetch: bool,
    pub fail_diff: bool,
    pub fail_pull: bool,
    pub calls: Mutex<Vec<String>>,
}

impl FakeGit {
    pub fn on_branch(branch: &str) -> Self {
        Self {
            branch: branch.to_string(),
            ..Self::default()
        }
    }

    pub fn with_changed_paths(mut self, paths: &[&str]) -> Self {
        self.diff_paths = paths.iter().map(PathBuf::from).collect();
        self
    }

    pub fn recorded(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }
}

#[async_trait]
impl GitOps for FakeGit {
    async fn current_branch(&self) -> Result<String, VcsError> {
        self.record("current-branch".to_string());
        Ok(self.branch.clone())
    }

    async fn checkout(&self, branch: &str) -> Result<(), VcsError> {
        self.record(format!("checkout {branch}"));
        if self.fail_checkout {
            return Err(VcsError::command_failed("checkout", "simulated failure"));
        }
        Ok(())
    }

    async fn fetch(&self, remote: &str, branch: &str) -> Result<(), VcsError> {
        self.record(format!("fetch {remote} {branch}"));
        if self.fail_fetch {
            return Err(VcsError::command_failed("fetch", "simulated failure"));
        }
        Ok(())
    }

    async fn diff_names(&self, rev1: &str, rev2: &str) -> Result<Vec<PathBuf>, VcsError> {
        self.record(format!("diff {rev1} {rev2}"));
        if self.fail_diff {
            return Err(VcsError::command_failed("diff", "simulated failure"));
        }
        Ok(self.diff_paths.clone())
    }

    async fn pull(&self, remote: &str, branch: &str) -> Result<(), VcsError> {
        self.record(format!("pull {remote} {branch}"));
        if self.fail_pull {
            return Err(VcsError::command_failed("pull", "simulated failure"));
        }
        Ok(())
    }
}

/// Per-project state the fake compose client serves.
#[derive(Default, Clone)]
pub struct ProjectState {
    pub ps_entries: Vec<PsEntry>,
    pub config: ResolvedConfig,
    /// service -> (container id, image the container runs)
    pub containers: HashMap<String, (String, String)>,
}

impl ProjectState {
    /// A project whose declared services all run their declared images.
    pub fn converged(services: &[(&str, &str)]) -> Self {
        let mut state = Self {
            config: ResolvedConfig::from_images(services.iter().copied()),
            ..Self::default()
        };
        for (i, (service, image)) in services.iter().enumerate() {
            state.ps_entries.push(PsEntry::new(*service, "running"));
            state
                .containers
                .insert((*service).to_string(), (format!("c{i:02}"), (*image).to_string()));
        }
        state
    }

    /// Replace the image a service's container actually runs.
    pub fn with_running_image(mut self, service: &str, image: &str) -> Self {
        if let Some((_, actual)) = self.containers.get_mut(service) {
            *actual = image.to_string();
        }
        self
    }

    /// Mark one declared service as having no running container.
    pub fn with_stopped_service(mut self, service: &str) -> Self {
        self.ps_entries.retain(|e| e.service != service);
        self.containers.remove(service);
        self
    }

    /// A project with declared services but nothing running.
    pub fn stopped(services: &[(&str, &str)]) -> Self {
        Self {
            config: ResolvedConfig::from_images(services.iter().copied()),
            ..Self::default()
        }
    }
}

/// In-memory compose collaborator. Records every call in order.
#[derive(Default)]
pub struct FakeCompose {
    pub projects: HashMap<String, ProjectState>,
    pub fail_pull_for: HashSet<String>,
    pub fail_down_for: HashSet<String>,
    pub fail_up_for: HashSet<String>,
    pub fail_ps_for: HashSet<String>,
    pub calls: Mutex<Vec<String>>,
}

impl FakeCompose {
    pub fn with_project(mut self, name: &str, state: ProjectState) -> Self {
        self.projects.insert(name.to_string(), state);
        self
    }

    pub fn recorded(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    /// Calls made for one operation, e.g. `count_of("up")`.
    pub fn count_of(&self, operation: &str) -> usize {
        let prefix = format!("{operation} ");
        self.calls
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.starts_with(&prefix) || c.as_str() == operation)
            .count()
    }

    fn record(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn state(&self, project: &Project) -> Result<&ProjectState, ComposeError> {
        self.projects.get(project.name.as_str()).ok_or_else(|| {
            ComposeError::command_failed("lookup", project.name.as_str(), "unknown project")
        })
    }
}

#[async_trait]
impl ComposeOps for FakeCompose {
    async fn resolve_config(&self, project: &Project) -> Result<ResolvedConfig, ComposeError> {
        self.record(format!("config {}", project.name));
        Ok(self.state(project)?.config.clone())
    }

    async fn services_status(&self, project: &Project) -> Result<Vec<PsEntry>, ComposeError> {
        self.record(format!("ps {}", project.name));
        if self.fail_ps_for.contains(project.name.as_str()) {
            return Err(ComposeError::command_failed(
                "ps",
                project.name.as_str(),
                "simulated failure",
            ));
        }
        Ok(self.state(project)?.ps_entries.clone())
    }

    async fn container_id(
        &self,
        project: &Project,
        service: &ServiceName,
    ) -> Result<Option<ContainerId>, ComposeError> {
        self.record(format!("container-id {} {service}", project.name));
        Ok(self
            .state(project)?
            .containers
            .get(service.as_str())
            .map(|(id, _)| ContainerId::new(id.clone())))
    }

    async fn image_of(
        &self,
        project: &Project,
        container: &ContainerId,
    ) -> Result<String, ComposeError> {
        self.record(format!("inspect {container}"));
        self.state(project)?
            .containers
            .values()
            .find(|(id, _)| id == container.as_str())
            .map(|(_, image)| image.clone())
            .ok_or_else(|| {
                ComposeError::command_failed(
                    "inspect",
                    project.name.as_str(),
                    "no such container",
                )
            })
    }

    async fn pull(&self, project: &Project) -> Result<(), ComposeError> {
        self.record(format!("pull {}", project.name));
        if self.fail_pull_for.contains(project.name.as_str()) {
            return Err(ComposeError::command_failed(
                "pull",
                project.name.as_str(),
                "simulated failure",
            ));
        }
        Ok(())
    }

    async fn down(&self, project: &Project) -> Result<(), ComposeError> {
        self.record(format!("down {}", project.name));
        if self.fail_down_for.contains(project.name.as_str()) {
            return Err(ComposeError::command_failed(
                "down",
                project.name.as_str(),
                "simulated failure",
            ));
        }
        Ok(())
    }

    async fn up_detached(&self, project: &Project) -> Result<(), ComposeError> {
        self.record(format!("up {}", project.name));
        if self.fail_up_for.contains(project.name.as_str()) {
            return Err(ComposeError::command_failed(
                "up",
                project.name.as_str(),
                "simulated failure",
            ));
        }
        Ok(())
    }

    async fn prune_dangling_images(&self) -> Result<(), ComposeError> {
        self.record("prune".to_string());
        Ok(())
    }
}

/// Create a fleet root with one subdirectory + manifest per project name.
pub fn fleet_dir(projects: &[&str]) -> tempfile::TempDir {
    let root = tempfile::tempdir().expect("create fleet root");
    for name in projects {
        let dir = root.path().join(name);
        std::fs::create_dir(&dir).expect("create project dir");
        std::fs::write(
            dir.join("docker-compose.yml"),
            "services:\n  app:\n    image: placeholder\n",
        )
        .expect("write manifest");
    }
    root
}
