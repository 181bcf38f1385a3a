use clap::{Args, Subcommand};
use dochub_core::ProjectId;

/// Top-level command tree.
#[derive(Clone, Debug, Subcommand)]
pub enum Commands {
    /// Run tasks together with their prerequisites.
    Run(RunArgs),
    /// Generate and finalize API docs for some or all projects.
    Finalize(FinalizeArgs),
    /// Show what finalizing a project would write, without writing.
    Plan(PlanArgs),
    /// List the task graph.
    Tasks,
    /// Show the resolved project layouts.
    Config,
}

#[derive(Clone, Debug, Args)]
pub struct RunArgs {
    /// Tasks to run (default: finalize-api-docs).
    pub tasks: Vec<String>,
}

#[derive(Clone, Debug, Args)]
pub struct FinalizeArgs {
    /// Projects to finalize (default: every configured project).
    pub projects: Vec<ProjectId>,

    /// Skip the generator and finalize whatever docs are already on disk.
    #[arg(long)]
    pub no_generate: bool,
}

#[derive(Clone, Debug, Args)]
pub struct PlanArgs {
    /// Project to plan.
    pub project: ProjectId,
}
