//! Wave-based execution of a [`TaskGraph`].

use std::collections::HashMap;
use std::time::{Duration, Instant};

use rayon::prelude::*;

use crate::error::TaskError;
use crate::graph::TaskGraph;

/// How a task ended.
#[derive(Debug)]
pub enum TaskStatus<T> {
    /// The action returned `Ok`. Group tasks carry `None`.
    Succeeded(Option<T>),
    /// The action returned an error (rendered with its context chain).
    Failed(String),
    /// Not run because a prerequisite failed.
    Skipped { blocked_by: String },
}

#[derive(Debug)]
pub struct TaskOutcome<T> {
    pub name: String,
    pub status: TaskStatus<T>,
    pub duration: Duration,
}

/// Progress notifications emitted while a run is in flight.
#[derive(Debug, Clone, Copy)]
pub enum TaskEvent<'a> {
    Started(&'a str),
    Succeeded(&'a str),
    Failed(&'a str),
    Skipped(&'a str),
}

/// Outcomes of one run, in execution order.
#[derive(Debug)]
pub struct RunSummary<T> {
    outcomes: Vec<TaskOutcome<T>>,
}

impl<T> RunSummary<T> {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.outcomes
            .iter()
            .all(|o| matches!(o.status, TaskStatus::Succeeded(_)))
    }

    #[must_use]
    pub fn outcomes(&self) -> &[TaskOutcome<T>] {
        &self.outcomes
    }

    #[must_use]
    pub fn into_outcomes(self) -> Vec<TaskOutcome<T>> {
        self.outcomes
    }

    /// `(task, message)` for every failed task.
    pub fn failures(&self) -> impl Iterator<Item = (&str, &str)> {
        self.outcomes.iter().filter_map(|o| match &o.status {
            TaskStatus::Failed(message) => Some((o.name.as_str(), message.as_str())),
            _ => None,
        })
    }
}

/// Runs a target set and its prerequisites.
///
/// A failed task blocks everything that depends on it, directly or not;
/// tasks that do not depend on it keep running.
#[derive(Debug, Clone, Copy)]
pub struct TaskRunner {
    parallel: bool,
}

impl Default for TaskRunner {
    fn default() -> Self {
        Self { parallel: true }
    }
}

impl TaskRunner {
    #[must_use]
    pub const fn new(parallel: bool) -> Self {
        Self { parallel }
    }

    /// Run `targets` and everything they depend on.
    ///
    /// # Errors
    ///
    /// Scheduling errors only (unknown target, unknown prerequisite, cycle);
    /// nothing runs if one is found.
    pub fn run<T: Send>(
        &self,
        graph: &TaskGraph<T>,
        targets: &[&str],
    ) -> Result<RunSummary<T>, TaskError> {
        self.run_observed(graph, targets, &|_| {})
    }

    /// Like [`Self::run`], reporting progress to `observer`.
    ///
    /// # Errors
    ///
    /// See [`Self::run`].
    pub fn run_observed<T: Send>(
        &self,
        graph: &TaskGraph<T>,
        targets: &[&str],
        observer: &(dyn Fn(TaskEvent<'_>) + Sync),
    ) -> Result<RunSummary<T>, TaskError> {
        let waves = graph.waves(targets)?;
        // task index -> name of the failed task that blocks it
        let mut blocked: HashMap<usize, String> = HashMap::new();
        let mut outcomes = Vec::new();

        for wave in waves {
            let mut runnable = Vec::with_capacity(wave.len());
            for idx in wave {
                let task = &graph.tasks[idx];
                let blocker = task
                    .deps
                    .iter()
                    .filter_map(|d| graph.index_of(d))
                    .find_map(|d| blocked.get(&d).cloned());

                match blocker {
                    Some(blocked_by) => {
                        tracing::warn!(task = %task.name, %blocked_by, "skipping task");
                        observer(TaskEvent::Skipped(&task.name));
                        blocked.insert(idx, blocked_by.clone());
                        outcomes.push(TaskOutcome {
                            name: task.name.clone(),
                            status: TaskStatus::Skipped { blocked_by },
                            duration: Duration::ZERO,
                        });
                    }
                    None => runnable.push(idx),
                }
            }

            let results: Vec<(usize, TaskOutcome<T>)> = if self.parallel && runnable.len() > 1 {
                runnable
                    .par_iter()
                    .map(|&idx| (idx, execute(graph, idx, observer)))
                    .collect()
            } else {
                runnable
                    .iter()
                    .map(|&idx| (idx, execute(graph, idx, observer)))
                    .collect()
            };

            for (idx, outcome) in results {
                if matches!(outcome.status, TaskStatus::Failed(_)) {
                    blocked.insert(idx, outcome.name.clone());
                }
                outcomes.push(outcome);
            }
        }

        Ok(RunSummary { outcomes })
    }
}

fn execute<T>(
    graph: &TaskGraph<T>,
    idx: usize,
    observer: &(dyn Fn(TaskEvent<'_>) + Sync),
) -> TaskOutcome<T> {
    let task = &graph.tasks[idx];
    let started = Instant::now();
    observer(TaskEvent::Started(&task.name));
    tracing::info!(task = %task.name, "starting task");

    let result = task.action.as_ref().map_or(Ok(None), |action| action().map(Some));
    let duration = started.elapsed();

    let status = match result {
        Ok(value) => {
            tracing::info!(task = %task.name, elapsed_ms = duration.as_millis(), "finished task");
            observer(TaskEvent::Succeeded(&task.name));
            TaskStatus::Succeeded(value)
        }
        Err(error) => {
            tracing::error!(task = %task.name, error = %format!("{error:#}"), "task failed");
            observer(TaskEvent::Failed(&task.name));
            TaskStatus::Failed(format!("{error:#}"))
        }
    };

    TaskOutcome {
        name: task.name.clone(),
        status,
        duration,
    }
}
