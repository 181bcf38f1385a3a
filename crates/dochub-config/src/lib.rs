//! # dochub-config
//!
//! Layered configuration loading for dochub using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`DOCHUB_*` prefix, `__` as separator)
//! 2. An explicit file passed with `--config`
//! 3. Project-level `.dochub/config.toml`
//! 4. User-level `~/.config/dochub/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `DOCHUB_API__UNIFIED_API_PATH` -> `api.unified_api_path` and
//! `DOCHUB_REPO_PATH__ACX` -> `repo_path.acx`.
//!
//! # Usage
//!
//! ```no_run
//! use dochub_config::DochubConfig;
//!
//! let config = DochubConfig::load_with_dotenv(None).expect("config");
//! let cwd = std::env::current_dir().expect("cwd");
//! for layout in config.resolve(&cwd).expect("valid config") {
//!     println!("{} -> {}", layout.id, layout.dest_root.display());
//! }
//! ```

mod api;
mod dartdoc;
mod error;

pub use api::ApiConfig;
pub use dartdoc::DartdocConfig;
pub use error::ConfigError;

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::{Path, PathBuf};

use dochub_core::{PackageName, ProjectId, ProjectLayout};
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DochubConfig {
    #[serde(default)]
    pub api: ApiConfig,
    /// Project identifier -> repository root.
    #[serde(default)]
    pub repo_path: BTreeMap<ProjectId, PathBuf>,
    #[serde(default)]
    pub dartdoc: DartdocConfig,
}

impl DochubConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy` -- use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        Self::figment(extra_file).extract().map_err(ConfigError::from)
    }

    /// Load configuration after reading `.env` from the current directory.
    pub fn load_with_dotenv(extra_file: Option<&Path>) -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load(extra_file)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can extract from it directly or add providers on top.
    pub fn figment(extra_file: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".dochub/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // An explicit file must exist; `Toml::file` alone would skip it silently.
        if let Some(path) = extra_file {
            figment = figment.merge(Toml::file_exact(path));
        }

        figment.merge(Env::prefixed("DOCHUB_").split("__"))
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("dochub").join("config.toml"))
    }

    /// Resolve every configured project into its [`ProjectLayout`], in
    /// `api.projects` order.
    ///
    /// Relative repository roots and a relative `unified_api_path` are resolved
    /// against `cwd`.
    ///
    /// # Errors
    ///
    /// Rejects projects without a `repo_path` entry, projects listed twice,
    /// two projects sharing a package name, and an absolute or empty
    /// `rel_api_doc_dir`.
    pub fn resolve(&self, cwd: &Path) -> Result<Vec<ProjectLayout>, ConfigError> {
        self.validate_paths()?;

        let unified = absolutize(cwd, &self.api.unified_api_path);
        let mut seen = HashSet::new();
        let mut packages: HashMap<PackageName, ProjectId> = HashMap::new();
        let mut layouts = Vec::with_capacity(self.api.projects.len());

        for project in &self.api.projects {
            if !seen.insert(project) {
                return Err(ConfigError::DuplicateProject {
                    project: project.clone(),
                });
            }

            let repo_root =
                self.repo_path
                    .get(project)
                    .ok_or_else(|| ConfigError::UnknownProject {
                        project: project.clone(),
                    })?;

            let layout = ProjectLayout::new(
                project.clone(),
                absolutize(cwd, repo_root),
                &self.api.rel_api_doc_dir,
                &unified,
            )?;

            if let Some(first) = packages.insert(layout.package.clone(), project.clone()) {
                return Err(ConfigError::DuplicatePackage {
                    package: layout.package,
                    first,
                    second: project.clone(),
                });
            }

            layouts.push(layout);
        }

        Ok(layouts)
    }

    fn validate_paths(&self) -> Result<(), ConfigError> {
        let rel = &self.api.rel_api_doc_dir;
        if rel.as_os_str().is_empty() || rel.is_absolute() {
            return Err(ConfigError::InvalidValue {
                field: "api.rel_api_doc_dir".into(),
                reason: format!("must be a non-empty relative path, got '{}'", rel.display()),
            });
        }
        if self.api.unified_api_path.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "api.unified_api_path".into(),
                reason: "must not be empty".into(),
            });
        }
        Ok(())
    }
}

fn absolutize(cwd: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn config_with(projects: &[&str], repos: &[(&str, &str)]) -> DochubConfig {
        DochubConfig {
            api: ApiConfig {
                projects: projects.iter().map(|p| p.parse().unwrap()).collect(),
                ..ApiConfig::default()
            },
            repo_path: repos
                .iter()
                .map(|(id, path)| (id.parse().unwrap(), PathBuf::from(path)))
                .collect(),
            dartdoc: DartdocConfig::default(),
        }
    }

    #[test]
    fn figment_builds_without_files() {
        let config: DochubConfig = DochubConfig::figment(None)
            .extract()
            .expect("should extract defaults");
        assert_eq!(config.api.rel_api_doc_dir, PathBuf::from("doc/api"));
        assert!(!config.dartdoc.is_configured());
    }

    #[test]
    fn resolve_keeps_configured_order() {
        let config = config_with(
            &["b", "a"],
            &[("a", "/repos/alpha"), ("b", "../beta")],
        );
        let layouts = config.resolve(Path::new("/work/site")).unwrap();

        let ids: Vec<&str> = layouts.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(ids, ["b", "a"]);
        assert_eq!(layouts[0].repo_root, PathBuf::from("/work/site/../beta"));
        assert_eq!(
            layouts[0].dest_root,
            PathBuf::from("/work/site/publish/api/beta")
        );
        assert_eq!(
            layouts[1].source_root,
            PathBuf::from("/repos/alpha/doc/api")
        );
    }

    #[test]
    fn resolve_rejects_missing_repo_path() {
        let config = config_with(&["a", "ghost"], &[("a", "/repos/alpha")]);
        let err = config.resolve(Path::new("/")).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownProject { project } if project.as_str() == "ghost"));
    }

    #[test]
    fn resolve_rejects_duplicate_project() {
        let config = config_with(&["a", "a"], &[("a", "/repos/alpha")]);
        assert!(matches!(
            config.resolve(Path::new("/")),
            Err(ConfigError::DuplicateProject { .. })
        ));
    }

    #[test]
    fn resolve_rejects_shared_package_name() {
        let config = config_with(
            &["a", "b"],
            &[("a", "/one/angular"), ("b", "/two/angular")],
        );
        let err = config.resolve(Path::new("/")).unwrap_err();
        match err {
            ConfigError::DuplicatePackage {
                package,
                first,
                second,
            } => {
                assert_eq!(package.as_str(), "angular");
                assert_eq!(first.as_str(), "a");
                assert_eq!(second.as_str(), "b");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn resolve_rejects_absolute_doc_dir() {
        let mut config = config_with(&["a"], &[("a", "/repos/alpha")]);
        config.api.rel_api_doc_dir = PathBuf::from("/abs/doc");
        assert!(matches!(
            config.resolve(Path::new("/")),
            Err(ConfigError::InvalidValue { field, .. }) if field == "api.rel_api_doc_dir"
        ));
    }

    #[test]
    fn unlisted_repo_paths_are_ignored() {
        let config = config_with(&["a"], &[("a", "/repos/alpha"), ("b", "/repos/alpha2")]);
        assert_eq!(config.resolve(Path::new("/")).unwrap().len(), 1);
    }
}
