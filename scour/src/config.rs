use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Configuration for one scan invocation.
///
/// Values can be loaded from YAML configuration files, in order of
/// precedence:
/// 1. A custom config file passed via `--config`
/// 2. A local `.scour.yaml` in the current directory
/// 3. The global `$CONFIG_DIR/scour/config.yaml`
///
/// CLI arguments take precedence over config file values; the merge is
/// defined by [`ScanConfig::merge_with_cli`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// The search pattern (supports regex); an empty pattern matches
    /// every line
    #[serde(default)]
    pub pattern: String,

    /// Lowercase both the pattern and each candidate line before matching
    #[serde(default)]
    pub case_insensitive: bool,

    /// File or directory to scan
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Additional patterns to ignore (glob syntax), e.g. "target/**"
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    /// Only report match/file counts, not individual matches
    #[serde(default)]
    pub stats_only: bool,

    /// Number of worker threads for tree scans
    /// Defaults to the number of CPU cores
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::MIN)
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            pattern: String::new(),
            case_insensitive: false,
            root_path: default_root_path(),
            ignore_patterns: Vec::new(),
            stats_only: false,
            thread_count: default_thread_count(),
            log_level: default_log_level(),
        }
    }
}

impl ScanConfig {
    /// Loads configuration from the default locations.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, optionally including a specific file.
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("scour/config.yaml")),
            // Local config
            Some(PathBuf::from(".scour.yaml")),
            // Custom config
            config_path.map(PathBuf::from),
        ];

        for path in config_files.iter().flatten() {
            if path.exists() {
                builder = builder.add_source(File::from(path.as_path()));
            }
        }

        builder.build()?.try_deserialize()
    }

    /// Merges CLI arguments with configuration file values. CLI values take
    /// precedence wherever they were explicitly given.
    pub fn merge_with_cli(mut self, cli_config: ScanConfig) -> Self {
        if !cli_config.pattern.is_empty() {
            self.pattern = cli_config.pattern;
        }
        if cli_config.case_insensitive {
            self.case_insensitive = true;
        }
        if cli_config.root_path != default_root_path() {
            self.root_path = cli_config.root_path;
        }
        if !cli_config.ignore_patterns.is_empty() {
            self.ignore_patterns = cli_config.ignore_patterns;
        }
        if cli_config.stats_only {
            self.stats_only = true;
        }
        // Always use the CLI thread count
        self.thread_count = cli_config.thread_count;
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        self
    }
}
