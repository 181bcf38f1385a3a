//! # dochub-finalize
//!
//! Copies one project's generated API documentation from
//! `<repo>/<rel_api_doc_dir>` into `<unified_api_path>/<package>`, running the
//! standard [`PatchSet`] over every text file on the way.
//!
//! The per-file transform ([`finalize_file`]) is pure; [`DocFinalizer`] adds
//! the walking, reading, and writing around it. Files are independent, so the
//! copy runs on rayon unless parallelism is turned off.
//!
//! There is no rollback: if a write fails, files already written stay.

mod error;
mod walk;

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use dochub_core::ProjectLayout;
use dochub_core::responses::{FinalizeReport, PlanEntry, PlanResponse};
use dochub_patch::{Content, PatchSet};
use rayon::prelude::*;

pub use error::FinalizeError;
pub use walk::{SourceTree, collect_sources, scan_sources};

/// One file to write into the destination tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WriteOp {
    /// Path relative to both the source and destination roots.
    pub rel_path: PathBuf,
    pub bytes: Vec<u8>,
    pub binary: bool,
    pub applied: Vec<&'static str>,
}

impl WriteOp {
    #[must_use]
    pub fn dest(&self, dest_root: &Path) -> PathBuf {
        dest_root.join(&self.rel_path)
    }
}

/// Turn one source file into the write that mirrors it.
#[must_use]
pub fn finalize_file(rel_path: &Path, bytes: Vec<u8>, patches: &PatchSet) -> WriteOp {
    let patched = patches.apply(rel_path, Content::from_bytes(bytes));
    WriteOp {
        rel_path: rel_path.to_path_buf(),
        binary: patched.content.is_binary(),
        applied: patched.applied,
        bytes: patched.content.into_bytes(),
    }
}

/// Every write a finalize run would perform, without performing it.
#[derive(Debug, Clone)]
pub struct FinalizePlan {
    pub layout: ProjectLayout,
    pub ops: Vec<WriteOp>,
}

impl FinalizePlan {
    #[must_use]
    pub fn to_response(&self) -> PlanResponse {
        PlanResponse {
            project: self.layout.id.clone(),
            package: self.layout.package.clone(),
            dest_root: self.layout.dest_root.clone(),
            files: self
                .ops
                .iter()
                .map(|op| PlanEntry {
                    path: op.rel_path.to_string_lossy().replace('\\', "/"),
                    binary: op.binary,
                    patches: op.applied.iter().map(ToString::to_string).collect(),
                })
                .collect(),
        }
    }
}

pub struct DocFinalizer {
    layout: ProjectLayout,
    patches: PatchSet,
    parallel: bool,
}

impl DocFinalizer {
    #[must_use]
    pub fn new(layout: ProjectLayout, patches: PatchSet) -> Self {
        Self {
            layout,
            patches,
            parallel: true,
        }
    }

    /// Finalizer with the standard patches for the layout's package.
    #[must_use]
    pub fn for_layout(layout: ProjectLayout) -> Self {
        let patches = PatchSet::standard(layout.package.as_str());
        Self::new(layout, patches)
    }

    #[must_use]
    pub fn parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Relative paths of every file under the documentation root.
    ///
    /// # Errors
    ///
    /// See [`collect_sources`].
    pub fn collect_sources(&self) -> Result<Vec<PathBuf>, FinalizeError> {
        collect_sources(&self.layout.source_root)
    }

    /// Read and patch every file, returning the writes without doing them.
    ///
    /// # Errors
    ///
    /// Fails on the first unreadable file.
    pub fn plan(&self) -> Result<FinalizePlan, FinalizeError> {
        let sources = self.collect_sources()?;
        let ops = sources
            .iter()
            .map(|rel| self.prepare(rel))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(FinalizePlan {
            layout: self.layout.clone(),
            ops,
        })
    }

    /// Copy the documentation tree into the destination, patching as it goes.
    ///
    /// Source directories are recreated first, empty ones included. Existing
    /// destination files are overwritten.
    ///
    /// # Errors
    ///
    /// The first read or write failure aborts the run.
    pub fn run(&self) -> Result<FinalizeReport, FinalizeError> {
        let started = Instant::now();
        let layout = &self.layout;
        tracing::info!(
            project = %layout.id,
            source = %layout.source_root.display(),
            dest = %layout.dest_root.display(),
            "finalizing api docs"
        );

        let SourceTree { files: sources, dirs } = scan_sources(&layout.source_root)?;
        for dir in &dirs {
            let path = layout.dest_root.join(dir);
            fs::create_dir_all(&path).map_err(|source| FinalizeError::Write { path, source })?;
        }

        let outcomes: Vec<FileOutcome> = if self.parallel {
            sources
                .par_iter()
                .map(|rel| self.copy_one(rel))
                .collect::<Result<_, _>>()?
        } else {
            sources
                .iter()
                .map(|rel| self.copy_one(rel))
                .collect::<Result<_, _>>()?
        };

        let mut patches: BTreeMap<String, u64> = self
            .patches
            .names()
            .into_iter()
            .map(|name| (name.to_string(), 0))
            .collect();
        let mut files_patched = 0u64;
        let mut binary_files = 0u64;
        for outcome in &outcomes {
            if outcome.binary {
                binary_files += 1;
            }
            if !outcome.applied.is_empty() {
                files_patched += 1;
            }
            for name in &outcome.applied {
                *patches.entry((*name).to_string()).or_default() += 1;
            }
        }

        let report = FinalizeReport {
            project: layout.id.clone(),
            package: layout.package.clone(),
            source_root: layout.source_root.clone(),
            dest_root: layout.dest_root.clone(),
            files_written: outcomes.len() as u64,
            files_patched,
            binary_files,
            patches,
            duration_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };

        tracing::info!(
            project = %report.project,
            files = report.files_written,
            patched = report.files_patched,
            "api docs finalized"
        );
        Ok(report)
    }

    fn prepare(&self, rel: &Path) -> Result<WriteOp, FinalizeError> {
        let path = self.layout.source_root.join(rel);
        let bytes = fs::read(&path).map_err(|source| FinalizeError::Read { path, source })?;
        Ok(finalize_file(rel, bytes, &self.patches))
    }

    fn copy_one(&self, rel: &Path) -> Result<FileOutcome, FinalizeError> {
        let op = self.prepare(rel)?;
        let dest = op.dest(&self.layout.dest_root);

        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| FinalizeError::Write {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dest, &op.bytes).map_err(|source| FinalizeError::Write {
            path: dest,
            source,
        })?;

        if !op.applied.is_empty() {
            tracing::debug!(file = %rel.display(), patches = ?op.applied, "patched");
        }
        Ok(FileOutcome {
            binary: op.binary,
            applied: op.applied,
        })
    }
}

struct FileOutcome {
    binary: bool,
    applied: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn finalize_file_passes_plain_files_through() {
        let patches = PatchSet::standard("acx");
        let bytes = b"console.log('hi');".to_vec();
        let op = finalize_file(Path::new("static-assets/script.js"), bytes.clone(), &patches);

        assert_eq!(op.bytes, bytes);
        assert!(!op.binary);
        assert!(op.applied.is_empty());
    }

    #[test]
    fn finalize_file_marks_binary() {
        let patches = PatchSet::standard("acx");
        let bytes = vec![0u8, 159, 146, 150];
        let op = finalize_file(Path::new("favicon.ico"), bytes.clone(), &patches);

        assert!(op.binary);
        assert_eq!(op.bytes, bytes);
    }

    #[test]
    fn finalize_file_patches_root_index() {
        let patches = PatchSet::standard("foo");
        let op = finalize_file(
            Path::new("index.html"),
            b"<title>foo</title>".to_vec(),
            &patches,
        );
        assert_eq!(
            String::from_utf8(op.bytes).unwrap(),
            "<title>foo</title>\n  <base href=\"/api/foo/\">"
        );
        assert_eq!(op.applied, ["base-href"]);
    }

    #[test]
    fn write_op_dest_mirrors_relative_path() {
        let op = WriteOp {
            rel_path: PathBuf::from("acx.button/index.html"),
            bytes: Vec::new(),
            binary: false,
            applied: Vec::new(),
        };
        assert_eq!(
            op.dest(Path::new("/site/api/acx")),
            PathBuf::from("/site/api/acx/acx.button/index.html")
        );
    }
}
