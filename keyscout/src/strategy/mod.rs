pub mod process;
pub mod threads;

pub use process::ProcessStrategy;
pub use threads::ThreadStrategy;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{debug, info};

use crate::errors::{ScanError, ScanResult};
use crate::partition::partition;
use crate::results::{MergedResult, PartialResult, ScanOutcome};

/// A concurrency backend for running chunk workers.
///
/// Implementations only spawn workers and return whatever results were
/// delivered, in arrival order. The shared flow (partitioning, reordering by
/// worker index, completeness checking, merging, timing) lives in the provided
/// [`ExecutionStrategy::run`], so backends cannot diverge on observable
/// output, only on isolation and performance.
pub trait ExecutionStrategy {
    /// Short name used in logs and reports
    fn name(&self) -> &'static str;

    /// Spawns one worker per chunk and collects the delivered partial
    /// results in arrival order.
    fn dispatch(
        &self,
        chunks: &[&[PathBuf]],
        keywords: &[String],
    ) -> ScanResult<Vec<PartialResult>>;

    /// Runs a full scan over `files` with `worker_count` workers.
    fn run(
        &self,
        files: &[PathBuf],
        keywords: &[String],
        worker_count: NonZeroUsize,
    ) -> ScanResult<ScanOutcome> {
        let start = Instant::now();

        let chunks = partition(files, worker_count);
        debug!(
            "Dispatching {} chunks across {} via '{}'",
            chunks.len(),
            worker_count,
            self.name()
        );

        let delivered = self.dispatch(&chunks, keywords)?;
        let ordered = reorder(delivered, worker_count.get())?;
        let merged = MergedResult::from_partials(ordered);

        let elapsed = start.elapsed();
        info!(
            "Scan via '{}' finished: {} matches over {} files in {:?}",
            self.name(),
            merged.total_matches(),
            merged.files_scanned,
            elapsed
        );
        Ok(ScanOutcome { merged, elapsed })
    }
}

/// Re-sorts delivered results into worker-index order and verifies that every
/// worker delivered exactly one.
///
/// Arrival order over the completion channel depends on scheduling and file
/// sizes, so it cannot feed the merge directly. A worker that never delivered
/// (crash, panic, dead process) surfaces as [`ScanError::WorkerFailure`]
/// naming its index; partial completion of the others does not mask it.
pub(crate) fn reorder(
    delivered: Vec<PartialResult>,
    worker_count: usize,
) -> ScanResult<Vec<PartialResult>> {
    let mut slots: Vec<Option<PartialResult>> = (0..worker_count).map(|_| None).collect();
    for partial in delivered {
        let index = partial.worker_index;
        if index >= worker_count || slots[index].is_some() {
            return Err(ScanError::DuplicateResult(index));
        }
        slots[index] = Some(partial);
    }

    slots
        .into_iter()
        .enumerate()
        .map(|(index, slot)| slot.ok_or(ScanError::WorkerFailure {
            worker_index: index,
        }))
        .collect()
}
