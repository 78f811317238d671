//! Data source error types

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors reading a data source
///
/// These never escape a resolution call; the engine logs them and leaves the
/// affected placeholders unresolved.
#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse table {path}: {source}")]
    Table {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

impl SourceError {
    pub fn path(&self) -> &Path {
        match self {
            Self::Read { path, .. } | Self::Table { path, .. } => path,
        }
    }
}
