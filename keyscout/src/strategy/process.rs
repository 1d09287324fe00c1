use crossbeam_channel::unbounded;
use serde::{Deserialize, Serialize};
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::PathBuf;
use std::process::{Child, Command, Stdio};
use std::thread;
use tracing::{debug, warn};

use super::ExecutionStrategy;
use crate::errors::ScanResult;
use crate::results::PartialResult;
use crate::worker;

/// One worker's assignment, sent to the child process as JSON on stdin.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub worker_index: usize,
    pub files: Vec<PathBuf>,
    pub keywords: Vec<String>,
}

/// Child-side entry point for the process strategy.
///
/// Reads one [`WorkerRequest`] from `input`, runs the chunk, and writes the
/// resulting [`PartialResult`] as JSON to `output`. Written against plain
/// `Read`/`Write` so the protocol is testable without spawning a process; the
/// hosting binary wires it to its stdin/stdout.
pub fn run_worker_io(input: impl Read, output: impl Write) -> ScanResult<()> {
    let request: WorkerRequest = serde_json::from_reader(BufReader::new(input))?;
    let partial = worker::run_chunk(request.worker_index, &request.files, &request.keywords);

    let mut output = BufWriter::new(output);
    serde_json::to_writer(&mut output, &partial)?;
    output.flush()?;
    Ok(())
}

/// Isolated-process backend: one child OS process per chunk.
///
/// There is no shared mutable memory at all; every assignment and every
/// result is a copied JSON message over the child's stdin/stdout pipes. The
/// worker command must route to [`run_worker_io`] (the CLI exposes a hidden
/// subcommand for this).
pub struct ProcessStrategy {
    program: PathBuf,
    args: Vec<String>,
}

impl ProcessStrategy {
    /// Uses an explicit worker command.
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// Re-invokes the current executable with the given arguments.
    pub fn from_current_exe(args: Vec<String>) -> ScanResult<Self> {
        Ok(Self::new(std::env::current_exe()?, args))
    }

    fn spawn_worker(&self, request: &WorkerRequest) -> ScanResult<Child> {
        debug!(
            "Spawning worker process {} for {} files",
            request.worker_index,
            request.files.len()
        );
        let mut child = Command::new(&self.program)
            .args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .spawn()?;

        // Hand the child its assignment, then close stdin so it sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            serde_json::to_writer(&mut stdin, request)?;
        }
        Ok(child)
    }
}

impl ExecutionStrategy for ProcessStrategy {
    fn name(&self) -> &'static str {
        "processes"
    }

    fn dispatch(
        &self,
        chunks: &[&[PathBuf]],
        keywords: &[String],
    ) -> ScanResult<Vec<PartialResult>> {
        // Spawn every child before collecting anything so the chunks really
        // run concurrently.
        let mut children = Vec::with_capacity(chunks.len());
        for (index, chunk) in chunks.iter().enumerate() {
            let request = WorkerRequest {
                worker_index: index,
                files: chunk.to_vec(),
                keywords: keywords.to_vec(),
            };
            children.push(self.spawn_worker(&request)?);
        }

        // One collector thread per child feeds the completion channel as
        // children exit; the drain below receives exactly one message per
        // worker, in whatever order they finish.
        let (tx, rx) = unbounded();
        thread::scope(|scope| {
            for (index, child) in children.into_iter().enumerate() {
                let tx = tx.clone();
                scope.spawn(move || {
                    let _ = tx.send(collect_child(index, child));
                });
            }
        });
        drop(tx);

        let mut delivered = Vec::new();
        while let Ok(outcome) = rx.recv() {
            // Failures were already logged by the collector; the missing
            // result turns into a WorkerFailure during reordering.
            if let Some(partial) = outcome {
                delivered.push(partial);
            }
        }
        Ok(delivered)
    }
}

/// Waits for one child to exit and decodes its result.
///
/// A non-zero exit, an undecodable payload, or a wait failure all yield
/// `None`; the worker is then reported as failed by the coordinator.
fn collect_child(index: usize, child: Child) -> Option<PartialResult> {
    match child.wait_with_output() {
        Ok(output) if output.status.success() => {
            match serde_json::from_slice::<PartialResult>(&output.stdout) {
                Ok(partial) => Some(partial),
                Err(e) => {
                    warn!("Worker process {index} produced undecodable output: {e}");
                    None
                }
            }
        }
        Ok(output) => {
            warn!("Worker process {index} exited abnormally: {}", output.status);
            None
        }
        Err(e) => {
            warn!("Failed to wait for worker process {index}: {e}");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    use tempfile::tempdir;

    #[test]
    fn test_worker_io_round_trip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("a.txt");
        std::fs::write(&path, "OpenMP test").unwrap();

        let request = WorkerRequest {
            worker_index: 3,
            files: vec![path.clone()],
            keywords: vec!["OpenMP".to_string(), "Java".to_string()],
        };
        let input = serde_json::to_vec(&request).unwrap();
        let mut output = Vec::new();

        run_worker_io(Cursor::new(input), &mut output).unwrap();

        let partial: PartialResult = serde_json::from_slice(&output).unwrap();
        assert_eq!(partial.worker_index, 3);
        assert_eq!(partial.matches["OpenMP"], vec![path]);
        assert!(partial.matches["Java"].is_empty());
    }

    #[test]
    fn test_worker_io_rejects_garbage_input() {
        let mut output = Vec::new();
        let result = run_worker_io(Cursor::new(b"not json".to_vec()), &mut output);
        assert!(result.is_err());
    }

    #[test]
    fn test_worker_io_skips_unreadable_files() {
        let dir = tempdir().unwrap();
        let request = WorkerRequest {
            worker_index: 0,
            files: vec![dir.path().join("missing.txt")],
            keywords: vec!["kw".to_string()],
        };
        let input = serde_json::to_vec(&request).unwrap();
        let mut output = Vec::new();

        run_worker_io(Cursor::new(input), &mut output).unwrap();

        let partial: PartialResult = serde_json::from_slice(&output).unwrap();
        assert_eq!(partial.files_skipped, 1);
        assert!(partial.matches["kw"].is_empty());
    }
}
