use crossbeam_channel::unbounded;
use std::path::PathBuf;
use std::thread;
use tracing::warn;

use super::ExecutionStrategy;
use crate::errors::ScanResult;
use crate::results::PartialResult;
use crate::worker;

/// Shared-memory backend: one OS thread per chunk.
///
/// Each worker owns its local mapping exclusively until it deposits it on the
/// completion channel; the channel is the only structure touched by more than
/// one thread. The file list and keyword set are borrowed read-only for the
/// whole run.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadStrategy;

impl ExecutionStrategy for ThreadStrategy {
    fn name(&self) -> &'static str {
        "threads"
    }

    fn dispatch(
        &self,
        chunks: &[&[PathBuf]],
        keywords: &[String],
    ) -> ScanResult<Vec<PartialResult>> {
        let (tx, rx) = unbounded();
        let mut delivered = Vec::with_capacity(chunks.len());

        thread::scope(|scope| {
            let handles: Vec<_> = chunks
                .iter()
                .enumerate()
                .map(|(index, &chunk)| {
                    let tx = tx.clone();
                    scope.spawn(move || {
                        let partial = worker::run_chunk(index, chunk, keywords);
                        // The receiver outlives every sender, so this only
                        // fails if the coordinator already bailed out.
                        let _ = tx.send(partial);
                    })
                })
                .collect();
            drop(tx);

            // Fixed-count receive: exactly one result per spawned worker. An
            // emptiness-based drain could observe an empty channel while
            // workers are still running and return early; receiving N times
            // cannot. recv() unblocks with an error once every sender is gone,
            // which is how a dead worker is noticed instead of hanging.
            for _ in 0..chunks.len() {
                match rx.recv() {
                    Ok(partial) => delivered.push(partial),
                    Err(_) => break,
                }
            }

            for (index, handle) in handles.into_iter().enumerate() {
                if handle.join().is_err() {
                    warn!("Worker thread {index} panicked");
                }
            }
        });

        Ok(delivered)
    }
}
