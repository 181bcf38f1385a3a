//! Configuration error types.

use dochub_core::{CoreError, PackageName, ProjectId};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// Figment extraction or merge error.
    #[error("Configuration error: {0}")]
    Figment(#[from] Box<figment::Error>),

    /// A listed project has no `repo_path` entry.
    #[error("Project '{project}' is listed in api.projects but has no repo_path entry")]
    UnknownProject { project: ProjectId },

    /// The same project is listed twice in `api.projects`.
    #[error("Project '{project}' is listed more than once in api.projects")]
    DuplicateProject { project: ProjectId },

    /// Two projects would write into the same destination subdirectory.
    #[error(
        "Projects '{first}' and '{second}' share the package name '{package}' and would overwrite each other"
    )]
    DuplicatePackage {
        package: PackageName,
        first: ProjectId,
        second: ProjectId,
    },

    /// A configuration field has an invalid value.
    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },

    #[error(transparent)]
    Core(#[from] CoreError),
}

impl From<figment::Error> for ConfigError {
    fn from(error: figment::Error) -> Self {
        Self::Figment(Box::new(error))
    }
}
