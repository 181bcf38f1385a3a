use std::path::Path;

use anyhow::Context;
use dochub_config::DochubConfig;
use dochub_core::{ProjectId, ProjectLayout};

use crate::cli::GlobalFlags;

/// Loaded configuration plus the project layouts resolved from it.
#[derive(Debug)]
pub struct AppContext {
    pub config: DochubConfig,
    pub layouts: Vec<ProjectLayout>,
}

impl AppContext {
    pub fn init(flags: &GlobalFlags) -> anyhow::Result<Self> {
        let cwd = std::env::current_dir().context("failed to determine current directory")?;
        let config = DochubConfig::load_with_dotenv(flags.config.as_deref())
            .context("failed to load dochub configuration")?;
        Self::from_config(config, &cwd)
    }

    pub fn from_config(config: DochubConfig, cwd: &Path) -> anyhow::Result<Self> {
        let layouts = config.resolve(cwd)?;
        if layouts.is_empty() {
            tracing::warn!("no projects configured; set api.projects in .dochub/config.toml");
        }
        if !config.dartdoc.is_configured() {
            tracing::info!("no [dartdoc] command configured; dartdoc tasks reuse existing docs");
        }
        Ok(Self { config, layouts })
    }

    /// Layout for `project`, which must be one of `api.projects`.
    pub fn layout(&self, project: &ProjectId) -> anyhow::Result<&ProjectLayout> {
        self.layouts
            .iter()
            .find(|layout| &layout.id == project)
            .ok_or_else(|| {
                let known: Vec<&str> = self.layouts.iter().map(|l| l.id.as_str()).collect();
                anyhow::anyhow!(
                    "unknown project '{project}' (configured: {})",
                    known.join(", ")
                )
            })
    }

    /// Layouts for `projects` in the order given, or all of them when empty.
    pub fn select(&self, projects: &[ProjectId]) -> anyhow::Result<Vec<&ProjectLayout>> {
        if projects.is_empty() {
            return Ok(self.layouts.iter().collect());
        }
        projects.iter().map(|p| self.layout(p)).collect()
    }
}
