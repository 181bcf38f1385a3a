//! Task definitions and dependency resolution.

use std::collections::HashMap;

use rustworkx_core::petgraph::algo::toposort;
use rustworkx_core::petgraph::graph::{DiGraph, NodeIndex};

use crate::error::TaskError;

/// Work attached to a task. Runs at most once per run.
pub type TaskAction<T> = Box<dyn Fn() -> anyhow::Result<T> + Send + Sync>;

pub(crate) struct Task<T> {
    pub(crate) name: String,
    pub(crate) deps: Vec<String>,
    /// `None` for group tasks that only aggregate their prerequisites.
    pub(crate) action: Option<TaskAction<T>>,
}

/// Directed acyclic graph of named tasks.
///
/// Tasks are kept in insertion order; that order breaks ties when several
/// tasks become runnable at once.
pub struct TaskGraph<T> {
    pub(crate) tasks: Vec<Task<T>>,
    index: HashMap<String, usize>,
}

impl<T> Default for TaskGraph<T> {
    fn default() -> Self {
        Self {
            tasks: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<T> TaskGraph<T> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a task that runs `action` once all of `deps` have succeeded.
    ///
    /// Prerequisites may be added later; they are checked by [`Self::validate`].
    ///
    /// # Errors
    ///
    /// [`TaskError::Duplicate`] if a task with this name already exists.
    pub fn add<F>(
        &mut self,
        name: impl Into<String>,
        deps: impl IntoIterator<Item = impl Into<String>>,
        action: F,
    ) -> Result<(), TaskError>
    where
        F: Fn() -> anyhow::Result<T> + Send + Sync + 'static,
    {
        self.insert(name.into(), deps, Some(Box::new(action)))
    }

    /// Add a task with no work of its own that completes when `deps` do.
    ///
    /// # Errors
    ///
    /// [`TaskError::Duplicate`] if a task with this name already exists.
    pub fn add_group(
        &mut self,
        name: impl Into<String>,
        deps: impl IntoIterator<Item = impl Into<String>>,
    ) -> Result<(), TaskError> {
        self.insert(name.into(), deps, None)
    }

    fn insert(
        &mut self,
        name: String,
        deps: impl IntoIterator<Item = impl Into<String>>,
        action: Option<TaskAction<T>>,
    ) -> Result<(), TaskError> {
        if self.index.contains_key(&name) {
            return Err(TaskError::Duplicate { name });
        }
        self.index.insert(name.clone(), self.tasks.len());
        self.tasks.push(Task {
            name,
            deps: deps.into_iter().map(Into::into).collect(),
            action,
        });
        Ok(())
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tasks.iter().map(|t| t.name.as_str())
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub(crate) fn index_of(&self, name: &str) -> Option<usize> {
        self.index.get(name).copied()
    }

    /// Declared prerequisites of `name`, in declaration order.
    #[must_use]
    pub fn dependencies(&self, name: &str) -> Option<&[String]> {
        self.index
            .get(name)
            .map(|&idx| self.tasks[idx].deps.as_slice())
    }

    /// Check that every prerequisite exists and that there are no cycles.
    ///
    /// # Errors
    ///
    /// [`TaskError::UnknownDependency`] or [`TaskError::Cycle`].
    pub fn validate(&self) -> Result<(), TaskError> {
        self.topological_order().map(|_| ())
    }

    /// Task indices in dependency order (prerequisites first).
    fn topological_order(&self) -> Result<Vec<usize>, TaskError> {
        let mut graph: DiGraph<usize, ()> = DiGraph::with_capacity(self.tasks.len(), 0);
        let nodes: Vec<NodeIndex> = (0..self.tasks.len()).map(|i| graph.add_node(i)).collect();

        for (idx, task) in self.tasks.iter().enumerate() {
            for dep in &task.deps {
                let dep_idx = self.index.get(dep).ok_or_else(|| TaskError::UnknownDependency {
                    task: task.name.clone(),
                    dependency: dep.clone(),
                })?;
                graph.add_edge(nodes[*dep_idx], nodes[idx], ());
            }
        }

        toposort(&graph, None)
            .map(|sorted| sorted.into_iter().map(|node| graph[node]).collect())
            .map_err(|cycle| TaskError::Cycle {
                task: self.tasks[graph[cycle.node_id()]].name.clone(),
            })
    }

    /// Group `targets` and their transitive prerequisites into waves.
    ///
    /// Every task in a wave depends only on tasks in earlier waves, so a wave
    /// can run concurrently. Within a wave tasks keep insertion order.
    ///
    /// # Errors
    ///
    /// [`TaskError::UnknownTarget`] for a target that is not in the graph,
    /// checked first; then any error from [`Self::validate`].
    pub(crate) fn waves(&self, targets: &[&str]) -> Result<Vec<Vec<usize>>, TaskError> {
        let mut stack = targets
            .iter()
            .map(|target| {
                self.index_of(target).ok_or_else(|| TaskError::UnknownTarget {
                    name: (*target).to_string(),
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        let order = self.topological_order()?;

        let mut needed = vec![false; self.tasks.len()];
        while let Some(idx) = stack.pop() {
            if std::mem::replace(&mut needed[idx], true) {
                continue;
            }
            // Validated above, every dependency resolves.
            stack.extend(self.tasks[idx].deps.iter().filter_map(|d| self.index.get(d)));
        }

        let mut level = vec![0usize; self.tasks.len()];
        let mut waves: Vec<Vec<usize>> = Vec::new();
        for idx in order.into_iter().filter(|&i| needed[i]) {
            let wave = self.tasks[idx]
                .deps
                .iter()
                .filter_map(|d| self.index.get(d))
                .map(|&d| level[d] + 1)
                .max()
                .unwrap_or(0);
            level[idx] = wave;
            if waves.len() <= wave {
                waves.resize_with(wave + 1, Vec::new);
            }
            waves[wave].push(idx);
        }

        for wave in &mut waves {
            wave.sort_unstable();
        }
        Ok(waves)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn noop() -> anyhow::Result<()> {
        Ok(())
    }

    fn wave_names(graph: &TaskGraph<()>, targets: &[&str]) -> Vec<Vec<String>> {
        graph
            .waves(targets)
            .unwrap()
            .into_iter()
            .map(|w| w.into_iter().map(|i| graph.tasks[i].name.clone()).collect())
            .collect()
    }

    #[test]
    fn duplicate_names_are_rejected() {
        let mut graph = TaskGraph::new();
        graph.add("a", Vec::<String>::new(), noop).unwrap();
        assert!(matches!(
            graph.add("a", Vec::<String>::new(), noop),
            Err(TaskError::Duplicate { name }) if name == "a"
        ));
    }

    #[test]
    fn unknown_dependency_is_rejected() {
        let mut graph = TaskGraph::new();
        graph.add("finalize", ["generate"], noop).unwrap();
        assert!(matches!(
            graph.validate(),
            Err(TaskError::UnknownDependency { task, dependency })
                if task == "finalize" && dependency == "generate"
        ));
    }

    #[test]
    fn cycles_are_rejected() {
        let mut graph = TaskGraph::new();
        graph.add("a", ["c"], noop).unwrap();
        graph.add("b", ["a"], noop).unwrap();
        graph.add("c", ["b"], noop).unwrap();
        assert!(matches!(graph.validate(), Err(TaskError::Cycle { .. })));
    }

    #[test]
    fn waves_follow_dependencies() {
        let mut graph = TaskGraph::new();
        graph.add("gen-a", Vec::<String>::new(), noop).unwrap();
        graph.add("fin-a", ["gen-a"], noop).unwrap();
        graph.add("gen-b", Vec::<String>::new(), noop).unwrap();
        graph.add("fin-b", ["gen-b"], noop).unwrap();
        graph.add_group("all", ["fin-a", "fin-b"]).unwrap();

        assert_eq!(
            wave_names(&graph, &["all"]),
            vec![
                vec!["gen-a", "gen-b"],
                vec!["fin-a", "fin-b"],
                vec!["all"],
            ]
        );
    }

    #[test]
    fn waves_only_include_requested_closure() {
        let mut graph = TaskGraph::new();
        graph.add("gen-a", Vec::<String>::new(), noop).unwrap();
        graph.add("fin-a", ["gen-a"], noop).unwrap();
        graph.add("gen-b", Vec::<String>::new(), noop).unwrap();
        graph.add("fin-b", ["gen-b"], noop).unwrap();

        assert_eq!(
            wave_names(&graph, &["fin-b"]),
            vec![vec!["gen-b"], vec!["fin-b"]]
        );
    }

    #[test]
    fn unknown_target_is_rejected() {
        let mut graph = TaskGraph::new();
        graph.add("a", Vec::<String>::new(), noop).unwrap();
        assert!(matches!(
            graph.waves(&["nope"]),
            Err(TaskError::UnknownTarget { name }) if name == "nope"
        ));
    }

    #[test]
    fn unknown_target_is_reported_before_graph_errors() {
        let mut graph = TaskGraph::new();
        graph.add("finalize", ["generate"], noop).unwrap();
        assert!(matches!(
            graph.waves(&["finalize", "nope"]),
            Err(TaskError::UnknownTarget { name }) if name == "nope"
        ));
        assert!(matches!(
            graph.waves(&["finalize"]),
            Err(TaskError::UnknownDependency { .. })
        ));
    }

    #[test]
    fn dependencies_are_listed_in_declaration_order() {
        let mut graph: TaskGraph<()> = TaskGraph::new();
        graph.add_group("all", ["z", "a"]).unwrap();
        assert_eq!(
            graph.dependencies("all"),
            Some(&["z".to_string(), "a".to_string()][..])
        );
        assert!(graph.dependencies("missing").is_none());
    }
}
