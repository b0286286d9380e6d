use config::{Config as ConfigBuilder, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

/// Configuration for one search invocation.
///
/// Can be loaded from YAML files at three locations, in order of precedence:
/// 1. A custom file passed to [`SearchConfig::load_from`]
/// 2. A local `.linescout.yaml` in the current directory
/// 3. A global `$CONFIG_DIR/linescout/config.yaml`
///
/// CLI arguments override file values via [`SearchConfig::merge_with_cli`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// The literal string to search for (exact, case-sensitive)
    #[serde(default)]
    pub pattern: String,

    /// Root directory to start the search from
    #[serde(default = "default_root_path")]
    pub root_path: PathBuf,

    /// Number of worker threads for file scanning
    /// Defaults to the number of CPU cores
    #[serde(default = "default_thread_count")]
    pub thread_count: NonZeroUsize,

    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Path of the append-only event log; no event log is written when unset
    #[serde(default)]
    pub log_file: Option<PathBuf>,
}

fn default_root_path() -> PathBuf {
    PathBuf::from(".")
}

fn default_thread_count() -> NonZeroUsize {
    NonZeroUsize::new(num_cpus::get()).unwrap_or(NonZeroUsize::new(1).unwrap())
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl SearchConfig {
    /// Creates a configuration with the given pattern and root, everything
    /// else at its default.
    pub fn new(pattern: impl Into<String>, root_path: impl Into<PathBuf>) -> Self {
        Self {
            pattern: pattern.into(),
            root_path: root_path.into(),
            thread_count: default_thread_count(),
            log_level: default_log_level(),
            log_file: None,
        }
    }

    /// Loads configuration from the default locations
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Loads configuration, additionally reading a specific file last
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = ConfigBuilder::builder();

        let config_files = [
            // Global config
            dirs::config_dir().map(|p| p.join("linescout/config.yaml")),
            // Local config
            Some(PathBuf::from(".linescout.yaml")),
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

    /// Merges CLI arguments with configuration file values.
    ///
    /// CLI values take precedence wherever the CLI specified something other
    /// than its own default.
    pub fn merge_with_cli(mut self, cli_config: SearchConfig) -> Self {
        if !cli_config.pattern.is_empty() {
            self.pattern = cli_config.pattern;
        }
        if cli_config.root_path != default_root_path() {
            self.root_path = cli_config.root_path;
        }
        // Always use the CLI thread count if specified
        self.thread_count = cli_config.thread_count;
        if cli_config.log_level != default_log_level() {
            self.log_level = cli_config.log_level;
        }
        if cli_config.log_file.is_some() {
            self.log_file = cli_config.log_file;
        }
        self
    }
}
