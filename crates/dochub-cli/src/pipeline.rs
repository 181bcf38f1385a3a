//! Documentation pipeline: generate → finalize, per project.
//!
//! Builds the task graph the `run` and `finalize` commands execute:
//!
//! - `dartdoc-<p>` runs the configured generator in the project's repository
//!   (a logged no-op when no `[dartdoc] command` is set),
//! - `finalize-api-docs-<p>` copies and patches the generated docs into the
//!   unified tree, after `dartdoc-<p>`,
//! - `finalize-api-docs` depends on every per-project finalize task.
//!
//! The runner output is folded into a [`RunResponse`] for rendering.

use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus};

use dochub_config::DartdocConfig;
use dochub_core::ProjectLayout;
use dochub_core::responses::{FinalizeReport, RunResponse, TaskRunEntry, TaskState};
use dochub_finalize::DocFinalizer;
use dochub_tasks::{RunSummary, TaskError, TaskGraph, TaskStatus};

/// Umbrella task finalizing every configured project.
pub const FINALIZE_ALL: &str = "finalize-api-docs";

#[must_use]
pub fn dartdoc_task(project: &str) -> String {
    format!("dartdoc-{project}")
}

#[must_use]
pub fn finalize_task(project: &str) -> String {
    format!("{FINALIZE_ALL}-{project}")
}

#[derive(Debug, thiserror::Error)]
pub enum GenerateError {
    #[error("failed to start '{program}' in {dir}: {source}")]
    Spawn {
        program: String,
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("'{program}' exited with {status}")]
    Failed { program: String, status: ExitStatus },
}

/// What a pipeline task produced.
#[derive(Debug)]
pub enum StepOutput {
    Generated,
    Finalized(FinalizeReport),
}

#[derive(Clone, Copy, Debug)]
pub struct PipelineOptions {
    /// Add `dartdoc-<p>` tasks in front of the finalize tasks.
    pub generate: bool,
    /// Copy files on rayon inside each finalize task.
    pub parallel: bool,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            generate: true,
            parallel: true,
        }
    }
}

/// Run the generator for one repository.
///
/// # Errors
///
/// [`GenerateError::Spawn`] if the program cannot be started and
/// [`GenerateError::Failed`] on a non-zero exit.
pub fn generate(repo_root: &Path, dartdoc: &DartdocConfig) -> Result<StepOutput, GenerateError> {
    let Some((program, args)) = dartdoc.program() else {
        tracing::info!(repo = %repo_root.display(), "no generator configured, using existing docs");
        return Ok(StepOutput::Generated);
    };

    tracing::info!(repo = %repo_root.display(), %program, ?args, "generating api docs");
    let status = Command::new(program)
        .args(args)
        .current_dir(repo_root)
        .status()
        .map_err(|source| GenerateError::Spawn {
            program: program.to_string(),
            dir: repo_root.to_path_buf(),
            source,
        })?;

    if !status.success() {
        return Err(GenerateError::Failed {
            program: program.to_string(),
            status,
        });
    }
    Ok(StepOutput::Generated)
}

/// Build the full task graph for `layouts`, in configured order.
///
/// # Errors
///
/// [`TaskError::Duplicate`] if two layouts share a project id.
pub fn build_graph(
    layouts: &[ProjectLayout],
    dartdoc: &DartdocConfig,
    options: PipelineOptions,
) -> Result<TaskGraph<StepOutput>, TaskError> {
    let mut graph = TaskGraph::new();
    let mut finalize_tasks = Vec::with_capacity(layouts.len());

    for layout in layouts {
        let project = layout.id.as_str();
        let mut deps = Vec::new();

        if options.generate {
            let name = dartdoc_task(project);
            let repo_root = layout.repo_root.clone();
            let dartdoc = dartdoc.clone();
            graph.add(name.clone(), Vec::<String>::new(), move || {
                generate(&repo_root, &dartdoc).map_err(anyhow::Error::from)
            })?;
            deps.push(name);
        }

        let name = finalize_task(project);
        let layout = layout.clone();
        let parallel = options.parallel;
        graph.add(name.clone(), deps, move || {
            DocFinalizer::for_layout(layout.clone())
                .parallel(parallel)
                .run()
                .map(StepOutput::Finalized)
                .map_err(anyhow::Error::from)
        })?;
        finalize_tasks.push(name);
    }

    graph.add_group(FINALIZE_ALL, finalize_tasks)?;
    graph.validate()?;
    Ok(graph)
}

/// Fold a run into the response rendered by the CLI.
#[must_use]
pub fn summarize(summary: RunSummary<StepOutput>) -> RunResponse {
    let success = summary.is_success();
    let mut tasks = Vec::new();
    let mut finalized = Vec::new();

    for outcome in summary.into_outcomes() {
        let (state, detail) = match outcome.status {
            TaskStatus::Succeeded(output) => {
                if let Some(StepOutput::Finalized(report)) = output {
                    finalized.push(report);
                }
                (TaskState::Succeeded, None)
            }
            TaskStatus::Failed(message) => (TaskState::Failed, Some(message)),
            TaskStatus::Skipped { blocked_by } => {
                (TaskState::Skipped, Some(format!("blocked by {blocked_by}")))
            }
        };
        tasks.push(TaskRunEntry {
            task: outcome.name,
            state,
            detail,
            duration_ms: u64::try_from(outcome.duration.as_millis()).unwrap_or(u64::MAX),
        });
    }

    RunResponse {
        success,
        tasks,
        finalized,
    }
}
