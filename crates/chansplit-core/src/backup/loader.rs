//! Locating and parsing the backup export on disk

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{ChansplitError, Result};

use super::types::Backup;

/// Find the backup export in `data_dir`.
///
/// The directory is expected to hold exactly one `*.json` file; if there are
/// several, the lexicographically first one is used so repeated runs pick the
/// same file.
pub fn find_backup_file(data_dir: &Path) -> Result<PathBuf> {
    if !data_dir.is_dir() {
        return Err(ChansplitError::DataDirNotFound {
            path: data_dir.to_path_buf(),
        });
    }

    let mut candidates: Vec<PathBuf> = fs::read_dir(data_dir)?
        .filter_map(|entry| entry.ok())
        .map(|entry| entry.path())
        .filter(|path| {
            path.is_file() && path.extension().is_some_and(|ext| ext == "json")
        })
        .collect();
    candidates.sort();

    candidates
        .into_iter()
        .next()
        .ok_or(ChansplitError::BackupNotFound {
            path: data_dir.to_path_buf(),
        })
}

/// Load and parse the backup document from `data_dir`.
///
/// Returns the path of the file that was read alongside the parsed document.
/// A file that is not valid JSON, or that lacks the expected `channels`
/// structure, fails with a parse error rather than defaulting anything.
pub fn load_backup(data_dir: &Path) -> Result<(PathBuf, Backup)> {
    let path = find_backup_file(data_dir)?;
    let content = fs::read_to_string(&path)?;

    let backup =
        serde_json::from_str(&content).map_err(|e| ChansplitError::BackupParse {
            path: path.clone(),
            message: e.to_string(),
        })?;

    Ok((path, backup))
}
