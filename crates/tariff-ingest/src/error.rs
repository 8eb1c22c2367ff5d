//! Error types for tariff data ingestion.

use std::path::{Path, PathBuf};

use thiserror::Error;

/// Errors that can occur while locating and loading tariff schedules.
#[derive(Debug, Error)]
pub enum IngestError {
    // === File System Errors ===
    /// No candidate directory exists with at least one `*.txt` file.
    #[error(
        "could not find data directory with txt files among: {}",
        display_paths(.candidates)
    )]
    DirectoryNotFound { candidates: Vec<PathBuf> },

    /// Failed to read directory entries.
    #[error("failed to read directory {path}: {source}")]
    DirectoryRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to read file.
    #[error("failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File exceeds the configured size limit.
    #[error("file {path} is {size} bytes, limit is {max_size}")]
    FileTooLarge {
        path: PathBuf,
        size: u64,
        max_size: u64,
    },

    // === Parsing Errors ===
    /// Every encoding/delimiter attempt failed.
    #[error("failed to parse {path}: {}", .attempts.join("; "))]
    Parse { path: PathBuf, attempts: Vec<String> },

    /// Required column not found in a schedule file.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

impl IngestError {
    pub(crate) fn file_read(path: &Path, source: std::io::Error) -> Self {
        Self::FileRead {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
