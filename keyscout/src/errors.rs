use std::path::PathBuf;
use thiserror::Error;

/// Result type for scan operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur during a scan run.
///
/// Per-file failures (`FileAccess`) are recoverable: the worker logs them and
/// skips the file. Everything else is a run-level failure and is propagated to
/// the caller.
#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Failed to read {path}: {source}")]
    FileAccess {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Worker {worker_index} did not deliver a result")]
    WorkerFailure { worker_index: usize },
    #[error("More than one result delivered for worker {0}")]
    DuplicateResult(usize),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("Worker protocol error: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ScanError {
    pub fn file_access(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::FileAccess {
            path: path.into(),
            source,
        }
    }

    pub fn worker_failure(worker_index: usize) -> Self {
        Self::WorkerFailure { worker_index }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
