//! Project identity and the paths derived from it.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Key selecting one documentation source among the configured repositories.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ProjectId(String);

impl ProjectId {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for ProjectId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() || s.chars().any(char::is_whitespace) {
            return Err(CoreError::InvalidProjectId(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for ProjectId {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ProjectId> for String {
    fn from(value: ProjectId) -> Self {
        value.0
    }
}

impl fmt::Display for ProjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Destination subdirectory name: the last path segment of a repository root.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PackageName(String);

impl PackageName {
    /// Derive the package name from a repository root path.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoPackageName`] when the path ends in `..` or is a
    /// bare root, and so has no final segment.
    pub fn from_repo_root(repo_root: &Path) -> Result<Self, CoreError> {
        repo_root
            .file_name()
            .map(|name| Self(name.to_string_lossy().into_owned()))
            .ok_or_else(|| CoreError::NoPackageName {
                path: repo_root.to_path_buf(),
            })
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PackageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// All paths one finalize run needs, resolved once from configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectLayout {
    pub id: ProjectId,
    pub package: PackageName,
    pub repo_root: PathBuf,
    /// `repo_root/<rel_api_doc_dir>`: where the generator leaves its output.
    pub source_root: PathBuf,
    /// `<unified_api_path>/<package>`.
    pub dest_root: PathBuf,
}

impl ProjectLayout {
    /// Resolve a project's layout.
    ///
    /// `repo_root` is used as given; callers resolve it against the working
    /// directory beforehand if needed.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::NoPackageName`] if `repo_root` has no final segment.
    pub fn new(
        id: ProjectId,
        repo_root: PathBuf,
        rel_api_doc_dir: &Path,
        unified_api_path: &Path,
    ) -> Result<Self, CoreError> {
        let package = PackageName::from_repo_root(&repo_root)?;
        let source_root = repo_root.join(rel_api_doc_dir);
        let dest_root = unified_api_path.join(package.as_str());
        Ok(Self {
            id,
            package,
            repo_root,
            source_root,
            dest_root,
        })
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("angular")]
    #[case("acx")]
    #[case("angular_components")]
    fn project_id_accepts_plain_keys(#[case] raw: &str) {
        let id: ProjectId = raw.parse().expect("valid id");
        assert_eq!(id.as_str(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("two words")]
    #[case("tab\tbed")]
    fn project_id_rejects_blank_or_spaced(#[case] raw: &str) {
        assert!(matches!(
            raw.parse::<ProjectId>(),
            Err(CoreError::InvalidProjectId(_))
        ));
    }

    #[rstest]
    #[case("../angular", "angular")]
    #[case("/work/angular_components/", "angular_components")]
    #[case("repos/acx/.", "acx")]
    fn package_name_is_last_segment(#[case] path: &str, #[case] expected: &str) {
        let name = PackageName::from_repo_root(Path::new(path)).expect("has a basename");
        assert_eq!(name.as_str(), expected);
    }

    #[test]
    fn package_name_rejects_parent_reference() {
        assert!(matches!(
            PackageName::from_repo_root(Path::new("../..")),
            Err(CoreError::NoPackageName { .. })
        ));
    }

    #[test]
    fn layout_joins_source_and_destination() {
        let layout = ProjectLayout::new(
            "ng".parse().unwrap(),
            PathBuf::from("/src/angular"),
            Path::new("doc/api"),
            Path::new("/site/api"),
        )
        .unwrap();

        assert_eq!(layout.package.as_str(), "angular");
        assert_eq!(layout.source_root, PathBuf::from("/src/angular/doc/api"));
        assert_eq!(layout.dest_root, PathBuf::from("/site/api/angular"));
    }

    #[test]
    fn project_id_deserializes_through_validation() {
        let ok: ProjectId = serde_json::from_str("\"acx\"").unwrap();
        assert_eq!(ok.to_string(), "acx");
        assert!(serde_json::from_str::<ProjectId>("\"\"").is_err());
    }
}
