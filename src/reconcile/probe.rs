// ABOUTME: Running-state probe for one project.
// ABOUTME: A project is running if any service reports an up state.

use crate::compose::{ComposeError, ComposeOps, Project, PsEntry};

/// Whether the project currently has any active runtime instance.
///
/// No partial-state distinction: one up service out of many still counts as
/// running. State is probed fresh on every call.
pub async fn is_running<C: ComposeOps + ?Sized>(
    compose: &C,
    project: &Project,
) -> Result<bool, ComposeError> {
    let status = compose.services_status(project).await?;
    Ok(status.iter().any(PsEntry::is_up))
}
