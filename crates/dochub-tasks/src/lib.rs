//! # dochub-tasks
//!
//! A small build-task engine: named tasks, declared prerequisites, and a
//! runner that executes a requested target set in dependency order.
//!
//! The graph is checked with `petgraph` (re-exported by `rustworkx-core`)
//! before anything runs. Tasks whose prerequisites have all finished form a
//! wave; a wave runs on rayon when the runner is parallel.
//!
//! ```
//! use dochub_tasks::{TaskGraph, TaskRunner};
//!
//! let mut graph = TaskGraph::new();
//! graph.add("generate", Vec::<String>::new(), || Ok(1)).unwrap();
//! graph.add("finalize", ["generate"], || Ok(2)).unwrap();
//!
//! let summary = TaskRunner::default().run(&graph, &["finalize"]).unwrap();
//! assert!(summary.is_success());
//! assert_eq!(summary.outcomes().len(), 2);
//! ```

mod error;
mod graph;
mod runner;

pub use error::TaskError;
pub use graph::{TaskAction, TaskGraph};
pub use runner::{RunSummary, TaskEvent, TaskOutcome, TaskRunner, TaskStatus};
