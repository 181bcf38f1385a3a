//! Task graph error types.

/// Errors raised while building or scheduling a task graph.
///
/// Failures inside a task's action are not errors here; they are reported as
/// [`TaskStatus::Failed`](crate::TaskStatus::Failed) in the run summary.
#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    #[error("task '{name}' is defined more than once")]
    Duplicate { name: String },

    #[error("task '{task}' depends on unknown task '{dependency}'")]
    UnknownDependency { task: String, dependency: String },

    #[error("no task named '{name}'")]
    UnknownTarget { name: String },

    /// The graph contains a cycle through `task`.
    #[error("task graph has a cycle through '{task}'")]
    Cycle { task: String },
}
