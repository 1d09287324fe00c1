use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::ScanResult;

/// Checks if a file should be scanned based on its extension
pub fn has_valid_extension(path: &Path, extensions: &[String]) -> bool {
    if extensions.is_empty() {
        return true;
    }
    if let Some(ext) = path.extension() {
        if let Some(ext_str) = ext.to_str() {
            return extensions.iter().any(|e| e.eq_ignore_ascii_case(ext_str));
        }
    }
    false
}

/// Enumerates the text files under `root` that carry one of the recognized
/// extensions.
///
/// The returned list is sorted lexicographically so the same folder always
/// yields the same file order, which in turn makes chunk assignment
/// deterministic across runs and platforms.
pub fn list_text_files(root: &Path, extensions: &[String]) -> ScanResult<Vec<PathBuf>> {
    let mut builder = WalkBuilder::new(root);
    builder
        .hidden(true)
        .standard_filters(true)
        .require_git(false);

    let mut files: Vec<PathBuf> = builder
        .build()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().map(|ft| ft.is_file()).unwrap_or(false))
        .filter(|e| has_valid_extension(e.path(), extensions))
        .map(|e| e.into_path())
        .collect();

    files.sort();
    debug!("Found {} files under {}", files.len(), root.display());
    Ok(files)
}
