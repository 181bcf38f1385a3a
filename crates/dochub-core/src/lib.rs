//! # dochub-core
//!
//! Core types shared across all dochub crates:
//! - Project identity (`ProjectId`) and destination naming (`PackageName`)
//! - Resolved per-project paths (`ProjectLayout`)
//! - Cross-cutting error types
//! - CLI response types

pub mod errors;
pub mod project;
pub mod responses;

pub use errors::CoreError;
pub use project::{PackageName, ProjectId, ProjectLayout};
