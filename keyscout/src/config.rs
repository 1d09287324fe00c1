use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Configuration for one scan run.
///
/// The configuration can be loaded from multiple locations in order of
/// precedence:
/// 1. Custom config file specified via `--config` flag
/// 2. Local `.keyscout.yaml` in the current directory
/// 3. Global `$HOME/.config/keyscout/config.yaml`
///
/// Example config:
/// ```yaml
/// # Folder to scan
/// folder: "files"
///
/// # Keywords to look for (case-insensitive substrings)
/// keywords:
///   - "OpenMP"
///   - "Java"
///
/// # File extensions to include
/// file_extensions:
///   - "txt"
///
/// # Worker count (default: CPU cores)
/// worker_count: 4
///
/// # Log level (trace, debug, info, warn, error)
/// log_level: "warn"
/// ```
///
/// CLI arguments take precedence over config file values; the merging
/// behavior is defined in [`ScanConfig::merge_with_cli`]. The configuration is
/// scoped to one run and passed by reference into the core; there is no
/// process-wide mutable state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Folder whose text files are scanned
    #[serde(default = "default_folder")]
    pub folder: PathBuf,

    /// The fixed keyword set for the run; matching is order-insensitive but
    /// the processed set is exactly this one
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Number of workers to split the file list across.
    /// Zero is rejected at deserialization time.
    #[serde(default = "default_worker_count")]
    pub worker_count: NonZeroUsize,

    /// File extensions treated as text; `None` means the default (`txt`)
    #[serde(default)]
    pub file_extensions: Option<Vec<String>>,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_folder() -> PathBuf {
    PathBuf::from(".")
}

fn default_worker_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or_else(|| NonZeroUsize::new(1).unwrap())
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            folder: default_folder(),
            keywords: Vec::new(),
            worker_count: default_worker_count(),
            file_extensions: None,
            log_level: default_log_level(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally from an explicit file.
    ///
    /// Default locations are skipped silently when absent; an explicitly
    /// requested file that does not exist is an error.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let default_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("keyscout/config.yaml")),
            // Local config
            Some(PathBuf::from(".keyscout.yaml")),
        ];

        for path in default_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        if let Some(path) = config_path {
            builder = builder.add_source(File::from(path));
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values.
    /// CLI values take precedence over config file values.
    pub fn merge_with_cli(mut self, cli_config: ScanConfig) -> Self {
        if !cli_config.keywords.is_empty() {
            self.keywords = cli_config.keywords;
        }
        if cli_config.folder != default_folder() {
            self.folder = cli_config.folder;
        }
        if cli_config.file_extensions.is_some() {
            self.file_extensions = cli_config.file_extensions;
        }
        // Always use CLI worker count if specified
        self.worker_count = cli_config.worker_count;
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }

    /// The effective extension filter for folder enumeration.
    pub fn extensions(&self) -> Vec<String> {
        self.file_extensions
            .clone()
            .unwrap_or_else(|| vec!["txt".to_string()])
    }
}
