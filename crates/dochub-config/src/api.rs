//! `[api]` section: which projects to finalize and where their docs go.

use std::path::PathBuf;

use dochub_core::ProjectId;
use serde::{Deserialize, Serialize};

fn default_rel_api_doc_dir() -> PathBuf {
    PathBuf::from("doc/api")
}

fn default_unified_api_path() -> PathBuf {
    PathBuf::from("publish/api")
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Project identifiers, in the order their tasks are declared.
    #[serde(default)]
    pub projects: Vec<ProjectId>,

    /// Generated documentation directory, relative to each repository root.
    #[serde(default = "default_rel_api_doc_dir")]
    pub rel_api_doc_dir: PathBuf,

    /// Destination shared by all projects.
    #[serde(default = "default_unified_api_path")]
    pub unified_api_path: PathBuf,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            projects: Vec::new(),
            rel_api_doc_dir: default_rel_api_doc_dir(),
            unified_api_path: default_unified_api_path(),
        }
    }
}
