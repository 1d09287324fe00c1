use std::path::PathBuf;
use tracing::{debug, warn};

use crate::results::PartialResult;
use crate::scanner;

/// Runs the scan routine over one chunk, accumulating a local
/// keyword -> matching-files mapping in chunk order.
///
/// Unreadable files are logged and skipped; they never abort the rest of the
/// chunk. The result is emitted once, after every file has been visited.
pub fn run_chunk(worker_index: usize, chunk: &[PathBuf], keywords: &[String]) -> PartialResult {
    let mut partial = PartialResult::new(worker_index, keywords);

    for path in chunk {
        match scanner::scan_file(path, keywords) {
            Ok(found) => {
                partial.files_scanned += 1;
                for (keyword, matched) in found {
                    if matched {
                        partial.record_match(&keyword, path);
                    }
                }
            }
            Err(e) => {
                warn!("Skipping file: {e}");
                partial.files_skipped += 1;
            }
        }
    }

    debug!(
        "Worker {} finished: {} files scanned, {} skipped",
        worker_index, partial.files_scanned, partial.files_skipped
    );
    partial
}
