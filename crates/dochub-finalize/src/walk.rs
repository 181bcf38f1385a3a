//! Source file enumeration.
//!
//! Uses the `ignore` walker with every standard filter disabled: generated
//! documentation is copied in full, including hidden files and anything a
//! stray `.gitignore` would exclude.

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;

use crate::error::FinalizeError;

/// Everything found under a documentation root, relative to it and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceTree {
    pub files: Vec<PathBuf>,
    /// Every directory below the root, empty ones included.
    pub dirs: Vec<PathBuf>,
}

/// Walk `root`, collecting its files and subdirectories.
///
/// # Errors
///
/// [`FinalizeError::SourceMissing`] or [`FinalizeError::SourceNotDirectory`]
/// if `root` is not a readable directory, [`FinalizeError::Walk`] if an entry
/// cannot be read.
pub fn scan_sources(root: &Path) -> Result<SourceTree, FinalizeError> {
    let metadata = std::fs::metadata(root).map_err(|source| FinalizeError::SourceMissing {
        path: root.to_path_buf(),
        source,
    })?;
    if !metadata.is_dir() {
        return Err(FinalizeError::SourceNotDirectory {
            path: root.to_path_buf(),
        });
    }

    let mut builder = WalkBuilder::new(root);
    builder.standard_filters(false);
    builder.hidden(false);
    builder.follow_links(true);

    let mut tree = SourceTree::default();
    for entry in builder.build() {
        let entry = entry.map_err(|source| FinalizeError::Walk {
            path: root.to_path_buf(),
            source,
        })?;
        // Every walked path lives under `root`.
        let Ok(rel) = entry.path().strip_prefix(root) else {
            continue;
        };
        match entry.file_type() {
            Some(ft) if ft.is_file() => tree.files.push(rel.to_path_buf()),
            Some(ft) if ft.is_dir() && !rel.as_os_str().is_empty() => {
                tree.dirs.push(rel.to_path_buf());
            }
            _ => {}
        }
    }

    tree.files.sort();
    tree.dirs.sort();
    Ok(tree)
}

/// All files under `root`, as paths relative to `root`, sorted.
///
/// # Errors
///
/// See [`scan_sources`].
pub fn collect_sources(root: &Path) -> Result<Vec<PathBuf>, FinalizeError> {
    scan_sources(root).map(|tree| tree.files)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn walks_everything_including_hidden_and_ignored() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("acx.button")).unwrap();
        fs::create_dir_all(root.join("static-assets")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("index.html"), "<html>").unwrap();
        fs::write(root.join(".gitignore"), "static-assets/\n").unwrap();
        fs::write(root.join("static-assets/styles.css"), "body{}").unwrap();
        fs::write(root.join("acx.button/index.html"), "<html>").unwrap();
        fs::write(root.join(".nojekyll"), "").unwrap();

        let files = collect_sources(root).unwrap();
        let files: Vec<String> = files
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(
            files,
            [
                ".gitignore",
                ".nojekyll",
                "acx.button/index.html",
                "index.html",
                "static-assets/styles.css",
            ]
        );
    }

    #[test]
    fn scan_lists_directories_including_empty_ones() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path();
        fs::create_dir_all(root.join("acx.button")).unwrap();
        fs::create_dir_all(root.join("static-assets/fonts")).unwrap();
        fs::write(root.join("acx.button/index.html"), "<html>").unwrap();

        let tree = scan_sources(root).unwrap();
        let dirs: Vec<String> = tree
            .dirs
            .iter()
            .map(|p| p.to_string_lossy().replace('\\', "/"))
            .collect();

        assert_eq!(dirs, ["acx.button", "static-assets", "static-assets/fonts"]);
        assert_eq!(tree.files, [PathBuf::from("acx.button/index.html")]);
    }

    #[test]
    fn missing_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let err = collect_sources(&tmp.path().join("doc/api")).unwrap_err();
        assert!(matches!(err, FinalizeError::SourceMissing { .. }));
    }

    #[test]
    fn file_root_is_an_error() {
        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join("index.html");
        fs::write(&file, "x").unwrap();
        assert!(matches!(
            collect_sources(&file),
            Err(FinalizeError::SourceNotDirectory { .. })
        ));
    }
}
