pub mod config;
pub mod finalize;
pub mod plan;
pub mod run;
pub mod tasks;

use dochub_core::responses::RunResponse;
use dochub_tasks::{TaskGraph, TaskRunner};

use crate::cli::{Commands, GlobalFlags};
use crate::context::AppContext;
use crate::output::output;
use crate::pipeline::{self, StepOutput};
use crate::progress::TaskProgress;

/// Dispatch a parsed command to its handler.
pub fn dispatch(command: &Commands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    match command {
        Commands::Run(args) => run::handle(args, ctx, flags),
        Commands::Finalize(args) => finalize::handle(args, ctx, flags),
        Commands::Plan(args) => plan::handle(args, ctx, flags),
        Commands::Tasks => tasks::handle(ctx, flags),
        Commands::Config => config::handle(ctx, flags),
    }
}

/// Run `targets`, print the per-task outcome, and fail if any task failed.
fn execute(
    graph: &TaskGraph<StepOutput>,
    targets: &[&str],
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let progress = TaskProgress::default();
    let summary = TaskRunner::new(!flags.serial).run_observed(graph, targets, &|event| {
        progress.observe(event);
    })?;
    let failed: Vec<String> = summary.failures().map(|(name, _)| name.to_string()).collect();
    let response: RunResponse = pipeline::summarize(summary);

    output(
        &response,
        &response.tasks,
        &["task", "state", "duration_ms", "detail"],
        flags.format,
    )?;

    if !failed.is_empty() {
        anyhow::bail!("failed tasks: {}", failed.join(", "));
    }
    Ok(())
}
