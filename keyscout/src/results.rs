use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// One worker's keyword -> matching-files mapping, produced from exactly one
/// chunk. Immutable once emitted; the aggregator consumes it exactly once.
///
/// Keys are a `BTreeMap` so iteration order (and any serialized form) is
/// deterministic. This is also the wire format the process strategy sends back
/// over the child's stdout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PartialResult {
    /// Index of the worker (and chunk) that produced this result
    pub worker_index: usize,
    /// Matching file paths per keyword, in scan order within the chunk.
    /// Every configured keyword has an entry, even when no file matched.
    pub matches: BTreeMap<String, Vec<PathBuf>>,
    /// Number of files scanned, including files that matched nothing
    pub files_scanned: usize,
    /// Number of files skipped because they could not be read
    pub files_skipped: usize,
}

impl PartialResult {
    /// Creates an empty result with an entry for every configured keyword.
    pub fn new(worker_index: usize, keywords: &[String]) -> Self {
        Self {
            worker_index,
            matches: keywords
                .iter()
                .map(|kw| (kw.clone(), Vec::new()))
                .collect(),
            files_scanned: 0,
            files_skipped: 0,
        }
    }

    /// Appends a matching file to the given keyword's list.
    pub fn record_match(&mut self, keyword: &str, path: &Path) {
        self.matches
            .entry(keyword.to_string())
            .or_default()
            .push(path.to_path_buf());
    }
}

/// The consolidated keyword -> matching-files mapping for a whole run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergedResult {
    /// Matching file paths per keyword, concatenated in worker-index order
    pub matches: BTreeMap<String, Vec<PathBuf>>,
    /// Total number of files scanned across all workers
    pub files_scanned: usize,
    /// Total number of files skipped across all workers
    pub files_skipped: usize,
}

impl MergedResult {
    /// Merges partial results into one mapping.
    ///
    /// The input must already be sorted by worker index; for each keyword the
    /// per-worker lists are concatenated in that order, so the merged output is
    /// independent of the order in which workers happened to finish.
    pub fn from_partials(partials: Vec<PartialResult>) -> Self {
        let mut merged = Self::default();
        for partial in partials {
            merged.files_scanned += partial.files_scanned;
            merged.files_skipped += partial.files_skipped;
            for (keyword, paths) in partial.matches {
                merged.matches.entry(keyword).or_default().extend(paths);
            }
        }
        merged
    }

    /// Total number of keyword matches across all keywords.
    pub fn total_matches(&self) -> usize {
        self.matches.values().map(Vec::len).sum()
    }
}

/// What one execution strategy run hands back to the caller.
#[derive(Debug, Clone)]
pub struct ScanOutcome {
    pub merged: MergedResult,
    /// Wall-clock time for partition, dispatch, and merge
    pub elapsed: Duration,
}
