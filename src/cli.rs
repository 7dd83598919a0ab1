// ABOUTME: Command-line interface definition using clap derive macros.
// ABOUTME: One reconciliation run per invocation; flags combine freely.

use clap::Parser;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "flotilla")]
#[command(about = "Reconciles a fleet of compose projects against git history and runtime state")]
#[command(version)]
pub struct Cli {
    /// Fleet root: one subdirectory per compose project (also the git worktree)
    #[arg(long, default_value = ".", value_name = "DIR")]
    pub root: PathBuf,

    /// Remote whose tracking branch manifests are compared against
    #[arg(long, default_value = "origin", value_name = "NAME")]
    pub remote: String,

    /// Branch to track (defaults to the currently checked-out branch)
    #[arg(long, value_name = "NAME")]
    pub branch: Option<String>,

    /// Proceed even if a previous run's marker exists
    #[arg(long)]
    pub force_run: bool,

    /// Redeploy every running project, skipping change detection
    #[arg(long)]
    pub force_all: bool,

    /// Audit declared vs. running images and redeploy drifted projects
    #[arg(long)]
    pub check_images: bool,

    /// Remove dangling images after the workflows complete
    #[arg(long)]
    pub prune_images: bool,

    /// Image references excluded from drift detection
    #[arg(long, num_args = 1.., value_name = "IMAGE")]
    pub ignore_images: Vec<String>,

    /// Projects excluded from every workflow
    #[arg(long, num_args = 1.., value_name = "PROJECT")]
    pub ignore_project: Vec<String>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Only print the final result
    #[arg(long, conflicts_with = "json")]
    pub quiet: bool,

    /// Emit JSON events instead of human-readable output
    #[arg(long)]
    pub json: bool,
}
