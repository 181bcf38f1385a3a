//! CLI response types returned by `dochub` commands.
//!
//! These structs define the shape of JSON (and table) output for
//! `dochub run`, `dochub finalize`, `dochub plan`, and `dochub tasks`.

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::project::{PackageName, ProjectId};

/// Outcome of finalizing one project's documentation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FinalizeReport {
    pub project: ProjectId,
    pub package: PackageName,
    pub source_root: PathBuf,
    pub dest_root: PathBuf,
    pub files_written: u64,
    pub files_patched: u64,
    pub binary_files: u64,
    /// Patch name -> number of files it changed.
    pub patches: BTreeMap<String, u64>,
    pub duration_ms: u64,
}

/// One destination file in a dry run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanEntry {
    pub path: String,
    pub binary: bool,
    pub patches: Vec<String>,
}

/// Response from `dochub plan`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PlanResponse {
    pub project: ProjectId,
    pub package: PackageName,
    pub dest_root: PathBuf,
    pub files: Vec<PlanEntry>,
}

/// A task as listed by `dochub tasks`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskEntry {
    pub name: String,
    pub depends_on: Vec<String>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Succeeded,
    Failed,
    Skipped,
}

/// Per-task line of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TaskRunEntry {
    pub task: String,
    pub state: TaskState,
    /// Error message for failed tasks, blocking task for skipped ones.
    pub detail: Option<String>,
    /// Zero for tasks that never ran.
    pub duration_ms: u64,
}

/// Response from `dochub run` and `dochub finalize`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct RunResponse {
    pub success: bool,
    pub tasks: Vec<TaskRunEntry>,
    pub finalized: Vec<FinalizeReport>,
}
