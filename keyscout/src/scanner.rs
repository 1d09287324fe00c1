use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::trace;

use crate::errors::{ScanError, ScanResult};

/// Reads the full content of `path` and reports, for each keyword, whether it
/// occurs as a case-insensitive substring.
///
/// Matching is Unicode-aware (`str::to_lowercase`), so non-ASCII keywords
/// behave the same as ASCII ones. A file that cannot be read or is not valid
/// UTF-8 yields a [`ScanError::FileAccess`] carrying the path and the
/// underlying IO error; no keyword is reported as matched for such a file.
pub fn scan_file(path: &Path, keywords: &[String]) -> ScanResult<BTreeMap<String, bool>> {
    trace!("Scanning file: {}", path.display());

    let content = fs::read_to_string(path).map_err(|e| ScanError::file_access(path, e))?;
    let haystack = content.to_lowercase();

    Ok(keywords
        .iter()
        .map(|kw| (kw.clone(), haystack.contains(&kw.to_lowercase())))
        .collect())
}
