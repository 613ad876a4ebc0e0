//! Configuration file handling
//!
//! Settings come from an optional `bdd.toml` in the working directory
//! (the package root under `cargo test`), then from `BDD_*` environment
//! variables. The update flag is not part of the file: it is read once
//! per process by [`update_mode`].

use serde::Deserialize;
use std::path::PathBuf;
use std::sync::OnceLock;

use super::paths::config_path;
use super::{Error, Result};

/// Environment variable switching fixture update mode on
pub const UPDATE_ENV: &str = "BDD_UPDATE";

/// Main configuration structure
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    /// Directory holding the fixture files, relative to the working directory
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Suffix appended to the feature stem to name its fixture file
    #[serde(default = "default_suffix")]
    pub suffix: String,

    /// Console output settings
    #[serde(default)]
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            suffix: default_suffix(),
            output: OutputConfig::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("testdata")
}

fn default_suffix() -> String {
    ".json".to_string()
}

/// Where scenario reports go
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputMode {
    /// Print reports on stdout (captured by libtest unless `--nocapture`)
    #[default]
    Stdout,
    /// Print nothing
    Silent,
}

/// Console output configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct OutputConfig {
    #[serde(default)]
    pub mode: OutputMode,

    /// Colorize console reports
    #[serde(default = "default_color")]
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            mode: OutputMode::default(),
            color: default_color(),
        }
    }
}

fn default_color() -> bool {
    true
}

impl Config {
    /// Load configuration from `bdd.toml`, then apply environment overrides
    ///
    /// Returns default configuration if the file doesn't exist
    pub fn load() -> Result<Self> {
        let path = config_path();
        let config = if path.exists() {
            let content =
                std::fs::read_to_string(&path).map_err(|e| Error::file_read(&path, &e))?;
            Self::from_toml(&content)?
        } else {
            Self::default()
        };
        config.with_env(|key| std::env::var(key).ok())
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::ConfigParse(e.to_string()))
    }

    /// Apply `BDD_*` overrides using `lookup` to read variables
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("BDD_DATA_DIR") {
            self.data_dir = PathBuf::from(dir);
        }
        if let Some(suffix) = lookup("BDD_SUFFIX") {
            self.suffix = suffix;
        }
        if let Some(mode) = lookup("BDD_OUTPUT") {
            self.output.mode = match mode.to_ascii_lowercase().as_str() {
                "stdout" => OutputMode::Stdout,
                "silent" | "none" => OutputMode::Silent,
                other => {
                    return Err(Error::Config(format!(
                        "BDD_OUTPUT must be 'stdout' or 'silent', got '{}'",
                        other
                    )))
                }
            };
        }
        if lookup("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            self.output.color = false;
        }
        Ok(self)
    }
}

/// Whether fixture records may be rewritten and persisted in this process
///
/// Set by passing `--update` (or `-update`) to the process, or by a truthy
/// `BDD_UPDATE`. Read on first call and fixed for the rest of the run.
pub fn update_mode() -> bool {
    static UPDATE: OnceLock<bool> = OnceLock::new();
    *UPDATE.get_or_init(|| {
        let from_args = std::env::args().any(|a| a == "--update" || a == "-update");
        let from_env = std::env::var(UPDATE_ENV).ok().is_some_and(|v| is_truthy(&v));
        from_args || from_env
    })
}

fn is_truthy(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.data_dir, PathBuf::from("testdata"));
        assert_eq!(config.suffix, ".json");
        assert_eq!(config.output.mode, OutputMode::Stdout);
        assert!(config.output.color);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = Config::from_toml("suffix = \".yml\"\n[output]\nmode = \"silent\"\n").unwrap();
        assert_eq!(config.suffix, ".yml");
        assert_eq!(config.data_dir, PathBuf::from("testdata"));
        assert_eq!(config.output.mode, OutputMode::Silent);
        assert!(config.output.color);
    }

    #[test]
    fn test_malformed_toml() {
        let err = Config::from_toml("data_dir = [").unwrap_err();
        assert!(matches!(err, Error::ConfigParse(_)));
    }

    #[test]
    fn test_env_overrides() {
        let vars: HashMap<&str, &str> = [
            ("BDD_DATA_DIR", "fixtures"),
            ("BDD_OUTPUT", "silent"),
            ("NO_COLOR", "1"),
        ]
        .into_iter()
        .collect();
        let config = Config::default()
            .with_env(|k| vars.get(k).map(|v| v.to_string()))
            .unwrap();
        assert_eq!(config.data_dir, PathBuf::from("fixtures"));
        assert_eq!(config.output.mode, OutputMode::Silent);
        assert!(!config.output.color);
    }

    #[test]
    fn test_bad_output_env() {
        let err = Config::default()
            .with_env(|k| (k == "BDD_OUTPUT").then(|| "html".to_string()))
            .unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }

    #[test]
    fn test_truthy_values() {
        assert!(is_truthy("1"));
        assert!(is_truthy(" TRUE "));
        assert!(!is_truthy("0"));
        assert!(!is_truthy(""));
    }
}
