// ABOUTME: Entry point for the flotilla CLI application.
// ABOUTME: Builds the run options and collaborators, then drives one reconciliation run.

mod cli;

use clap::Parser;
use cli::Cli;
use flotilla::compose::ComposeCli;
use flotilla::config::{IgnoreSet, RunOptions};
use flotilla::output::{Output, OutputMode};
use flotilla::reconcile::{ReconcileErrorKind, Reconciler, RunSummary};
use flotilla::vcs::GitCli;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber based on verbose flag
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("warn")
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();

    let mode = if cli.json {
        OutputMode::Json
    } else if cli.quiet {
        OutputMode::Quiet
    } else {
        OutputMode::Normal
    };
    let mut output = Output::new(mode);
    output.start_timer();

    let root = match cli.root.canonicalize() {
        Ok(root) => root,
        Err(e) => {
            output.error(&format!(
                "cannot access fleet root {}: {e}",
                cli.root.display()
            ));
            std::process::exit(1);
        }
    };

    let options = RunOptions {
        root: root.clone(),
        remote: cli.remote,
        branch: cli.branch,
        force_run: cli.force_run,
        force_all: cli.force_all,
        check_images: cli.check_images,
        prune_images: cli.prune_images,
        ignore: IgnoreSet::new(cli.ignore_project, cli.ignore_images),
    };

    let git = GitCli::new(root.clone());
    let compose = ComposeCli::new(root);
    let reconciler = Reconciler::new(&git, &compose, &options, &output);

    // On interrupt the run future is dropped, which releases the run lease.
    let result = tokio::select! {
        result = reconciler.run() => result,
        _ = tokio::signal::ctrl_c() => {
            output.error("interrupted");
            std::process::exit(130);
        }
    };

    match result {
        Ok(summary) => report(&output, &summary),
        Err(e) => {
            match e.kind() {
                ReconcileErrorKind::AlreadyRunning => {
                    output.error(&format!("{e} (use --force-run to override)"));
                }
                ReconcileErrorKind::VcsFailure | ReconcileErrorKind::Io => {
                    output.error(&e.to_string());
                }
            }
            std::process::exit(1);
        }
    }
}

fn report(output: &Output, summary: &RunSummary) {
    if summary.is_empty() {
        output.success("Reconciliation complete; no projects required action");
        return;
    }

    output.success(&format!(
        "Reconciliation complete: {} updated, {} skipped, {} redeploy(s) attempted",
        summary.updated_count(),
        summary.skipped_count(),
        summary.redeploys_attempted()
    ));
}
