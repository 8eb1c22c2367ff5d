//! Data directory resolution and schedule file discovery.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{IngestError, Result};

/// Directory name searched when the caller does not supply one.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Extension of tariff schedule files.
const SCHEDULE_EXTENSION: &str = "txt";

/// Builds the ordered, de-duplicated list of directories to search.
///
/// Absolute input: the path itself, then a `data` sibling of the path, then
/// a `data` directory one level further up.
///
/// Relative input: the path as given, then resolved against the current
/// directory and its parent, then against this crate's directory and the
/// project root above it, then the project root's `data` directory.
pub fn candidate_dirs(path: &Path) -> Vec<PathBuf> {
    let cwd = std::env::current_dir().ok();
    candidate_dirs_from(path, cwd.as_deref(), Path::new(env!("CARGO_MANIFEST_DIR")))
}

pub(crate) fn candidate_dirs_from(path: &Path, cwd: Option<&Path>, code_dir: &Path) -> Vec<PathBuf> {
    let mut candidates = Vec::new();
    if path.is_absolute() {
        candidates.push(path.to_path_buf());
        let mut ancestors = path.ancestors().skip(1);
        if let Some(parent) = ancestors.next() {
            candidates.push(parent.join(DEFAULT_DATA_DIR));
        }
        if let Some(grandparent) = ancestors.next() {
            candidates.push(grandparent.join(DEFAULT_DATA_DIR));
        }
    } else {
        candidates.push(path.to_path_buf());
        if let Some(cwd) = cwd {
            candidates.push(cwd.join(path));
            if let Some(parent) = cwd.parent() {
                candidates.push(parent.join(path));
            }
        }
        candidates.push(code_dir.join(path));
        // crates/<name> -> workspace root
        if let Some(root) = code_dir.ancestors().nth(2) {
            candidates.push(root.join(path));
            candidates.push(root.join(DEFAULT_DATA_DIR));
        }
    }

    let mut seen = HashSet::new();
    candidates.retain(|candidate| seen.insert(candidate.clone()));
    candidates
}

/// Finds the first candidate directory that contains at least one `*.txt` file.
///
/// # Errors
///
/// Returns [`IngestError::DirectoryNotFound`] listing every candidate when
/// none qualifies.
pub fn resolve_data_dir(path: &Path) -> Result<PathBuf> {
    let candidates = candidate_dirs(path);
    first_qualifying(candidates)
}

pub(crate) fn first_qualifying(candidates: Vec<PathBuf>) -> Result<PathBuf> {
    for candidate in &candidates {
        if candidate.is_dir() && has_schedule_files(candidate) {
            debug!(dir = %candidate.display(), "resolved data directory");
            return Ok(candidate.clone());
        }
        debug!(dir = %candidate.display(), "skipping candidate directory");
    }
    Err(IngestError::DirectoryNotFound { candidates })
}

fn has_schedule_files(dir: &Path) -> bool {
    list_txt_files(dir)
        .map(|files| !files.is_empty())
        .unwrap_or(false)
}

/// Lists all `*.txt` files in a directory.
///
/// Returns files sorted by filename.
pub fn list_txt_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = std::fs::read_dir(dir).map_err(|e| IngestError::DirectoryRead {
        path: dir.to_path_buf(),
        source: e,
    })?;

    let mut files = Vec::new();
    for entry_result in entries {
        let entry = entry_result.map_err(|e| IngestError::DirectoryRead {
            path: dir.to_path_buf(),
            source: e,
        })?;

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let is_schedule = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(SCHEDULE_EXTENSION));
        if is_schedule {
            files.push(path);
        }
    }

    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));

    Ok(files)
}
