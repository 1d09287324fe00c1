pub mod config;
pub mod errors;
pub mod filters;
pub mod partition;
pub mod results;
pub mod scanner;
pub mod strategy;
pub mod worker;

pub use config::ScanConfig;
pub use errors::{ScanError, ScanResult};
pub use results::{MergedResult, PartialResult, ScanOutcome};
pub use strategy::{ExecutionStrategy, ProcessStrategy, ThreadStrategy};
