//! Discovery of manifest files.

use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use super::ProcessError;

/// Returns true for `.yaml` and `.yml` files, in any letter case.
pub fn is_manifest(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml"))
}

/// Recursively lists the manifest files under `dir`, sorted by path.
pub fn scan_manifests(dir: &Path) -> Result<Vec<PathBuf>, ProcessError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).sort_by_file_name() {
        let entry = entry.map_err(|source| ProcessError::Scan {
            path: dir.to_path_buf(),
            source,
        })?;
        if entry.file_type().is_file() && is_manifest(entry.path()) {
            files.push(entry.into_path());
        }
    }
    debug!(dir = %dir.display(), count = files.len(), "scanned for manifests");
    Ok(files)
}
