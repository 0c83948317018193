//! Configuration management for gcn-trim.
//!
//! Configuration is loaded from multiple sources in priority order:
//! 1. Environment variables (GCNTRIM_TRACE_DIR, etc.)
//! 2. Project-local config file (`./gcn-trim.toml`)
//! 3. User config file (`~/.config/gcn-trim/config.toml`)
//! 4. Built-in defaults
//!
//! # Config File Format
//!
//! ```toml
//! # gcn-trim.toml
//!
//! # Directory searched for trace files given by bare file name
//! trace_dir = "/home/user/traces"
//!
//! # Whether to warn about words matching no known format
//! warn_unknown = true
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::OnceLock;

/// Global cached configuration.
static CONFIG: OnceLock<Config> = OnceLock::new();

/// gcn-trim configuration.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    /// Directory searched for trace files passed by bare file name.
    pub trace_dir: Option<String>,

    /// Whether words matching no known format are logged per occurrence.
    /// They are always counted and excluded from the summary.
    pub warn_unknown: Option<bool>,
}

impl Config {
    /// Load configuration from all sources.
    ///
    /// Priority (highest to lowest):
    /// 1. Environment variables
    /// 2. Project-local `gcn-trim.toml`
    /// 3. User config `~/.config/gcn-trim/config.toml`
    /// 4. Defaults
    pub fn load() -> Self {
        let mut config = Self::default();

        // Load user config first (lowest priority of file configs)
        if let Some(user_config) = Self::load_user_config() {
            config.merge(user_config);
        }

        // Load project-local config (higher priority)
        if let Some(local_config) = Self::load_local_config() {
            config.merge(local_config);
        }

        // Environment variables override everything
        config.apply_env_overrides();

        config
    }

    /// Get the cached global configuration.
    ///
    /// Loads configuration on first call and caches it.
    pub fn get() -> &'static Config {
        CONFIG.get_or_init(|| {
            let config = Self::load();
            log::debug!("Loaded configuration: {:?}", config);
            config
        })
    }

    /// Get the trace directory, if one is configured.
    pub fn trace_dir(&self) -> Option<&str> {
        self.trace_dir.as_deref()
    }

    /// Whether unmatched words are logged per occurrence. Defaults to true.
    pub fn warn_unknown(&self) -> bool {
        self.warn_unknown.unwrap_or(true)
    }

    /// Load user configuration from ~/.config/gcn-trim/config.toml
    fn load_user_config() -> Option<Self> {
        let config_dir = dirs::config_dir()?;
        let config_path = config_dir.join("gcn-trim").join("config.toml");
        Self::load_from_file(&config_path)
    }

    /// Load project-local configuration from ./gcn-trim.toml
    fn load_local_config() -> Option<Self> {
        // Try current directory
        let local_path = Path::new("gcn-trim.toml");
        if let Some(config) = Self::load_from_file(local_path) {
            return Some(config);
        }

        // Try to find project root by looking for Cargo.toml
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let project_path = Path::new(&manifest_dir).join("gcn-trim.toml");
            if let Some(config) = Self::load_from_file(&project_path) {
                return Some(config);
            }
        }

        None
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Option<Self> {
        if !path.exists() {
            return None;
        }

        match std::fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded config from {}", path.display());
                    Some(config)
                }
                Err(e) => {
                    log::warn!("Failed to parse {}: {}", path.display(), e);
                    None
                }
            },
            Err(e) => {
                log::warn!("Failed to read {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Merge another config into this one.
    /// Only overrides fields that are Some in the other config.
    fn merge(&mut self, other: Self) {
        if other.trace_dir.is_some() {
            self.trace_dir = other.trace_dir;
        }
        if other.warn_unknown.is_some() {
            self.warn_unknown = other.warn_unknown;
        }
    }

    /// Apply environment variable overrides.
    fn apply_env_overrides(&mut self) {
        if let Ok(dir) = std::env::var("GCNTRIM_TRACE_DIR") {
            log::info!("Using GCNTRIM_TRACE_DIR from environment: {}", dir);
            self.trace_dir = Some(dir);
        }
        if let Ok(value) = std::env::var("GCNTRIM_WARN_UNKNOWN") {
            log::info!("Using GCNTRIM_WARN_UNKNOWN from environment: {}", value);
            self.warn_unknown = Some(parse_flag(&value));
        }
    }

    /// Get the path to the user config file (for display/creation).
    pub fn user_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("gcn-trim").join("config.toml"))
    }

    /// Generate a sample config file content.
    pub fn sample_config() -> String {
        r#"# gcn-trim configuration
# Place this file at ~/.config/gcn-trim/config.toml or ./gcn-trim.toml

# Directory searched for trace files passed by bare file name (optional)
# trace_dir = "/home/user/traces"

# Warn about instruction words matching no known format (default true)
# warn_unknown = true
"#
        .to_string()
    }
}

/// Parse a boolean environment value. Anything but "0"/"false"/"no" is true.
fn parse_flag(value: &str) -> bool {
    !matches!(value.to_lowercase().as_str(), "0" | "false" | "no")
}
