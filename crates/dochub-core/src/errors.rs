//! Cross-cutting error types for dochub.
//!
//! Domain-specific errors (`ConfigError`, `FinalizeError`, `TaskError`) live in
//! their own crates and converge into `anyhow` in `dochub-cli`.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Project identifiers must be non-empty and free of whitespace.
    #[error("Invalid project identifier '{0}'")]
    InvalidProjectId(String),

    /// The repository root has no final path segment to name the package after.
    #[error("Cannot derive a package name from repository path '{}'", path.display())]
    NoPackageName { path: PathBuf },
}
