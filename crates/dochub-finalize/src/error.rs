use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FinalizeError {
    #[error("documentation root '{}' is not readable: {source}", path.display())]
    SourceMissing {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("documentation root '{}' is not a directory", path.display())]
    SourceNotDirectory { path: PathBuf },
    #[error("failed to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: ignore::Error,
    },
    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
