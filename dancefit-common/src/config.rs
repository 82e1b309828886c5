//! Configuration loading and settings resolution
//!
//! Settings resolve in priority order:
//! 1. Command-line argument (highest priority)
//! 2. Environment variable (dataset path only)
//! 3. TOML config file
//! 4. Compiled default (fallback)
//!
//! A missing config file is not an error; a malformed one is.

use crate::workout::ShufflePolicy;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Environment variable naming the config file
pub const CONFIG_ENV_VAR: &str = "DANCEFIT_CONFIG";

/// Environment variable naming the dataset CSV
pub const DATASET_ENV_VAR: &str = "DANCEFIT_DATASET";

/// Contents of `config.toml`; every key is optional
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    /// Dataset CSV path
    pub dataset_path: Option<PathBuf>,
    /// Seed for the shuffle random source; entropy when absent
    pub seed: Option<u64>,
    pub shuffle_policy: Option<ShufflePolicy>,
    /// Default tracing directive, e.g. "warn" or "dancefit_common=debug"
    pub log_level: Option<String>,
    /// Print dataset count summaries before prompting
    pub show_summaries: Option<bool>,
}

/// Fallback values when neither CLI, environment nor TOML provide one
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledDefaults {
    pub dataset_path: PathBuf,
    pub log_level: String,
    pub shuffle_policy: ShufflePolicy,
    pub show_summaries: bool,
}

impl Default for CompiledDefaults {
    fn default() -> Self {
        Self {
            dataset_path: PathBuf::from("dance_data.csv"),
            log_level: "warn".to_string(),
            shuffle_policy: ShufflePolicy::PerPass,
            show_summaries: true,
        }
    }
}

/// Values supplied on the command line
#[derive(Debug, Clone, Default)]
pub struct CliOverrides {
    pub dataset_path: Option<PathBuf>,
    pub seed: Option<u64>,
    pub shuffle_policy: Option<ShufflePolicy>,
    pub log_level: Option<String>,
    /// `Some(false)` when summaries were switched off on the command line
    pub show_summaries: Option<bool>,
}

/// Fully resolved runtime settings
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub dataset_path: PathBuf,
    pub seed: Option<u64>,
    pub shuffle_policy: ShufflePolicy,
    pub log_level: String,
    pub show_summaries: bool,
}

impl Settings {
    /// Merge command line, environment, TOML and compiled defaults
    pub fn resolve(cli: &CliOverrides, toml: &TomlConfig) -> Settings {
        let defaults = CompiledDefaults::default();

        Settings {
            dataset_path: resolve_dataset_path(cli.dataset_path.as_deref(), toml),
            seed: cli.seed.or(toml.seed),
            shuffle_policy: cli
                .shuffle_policy
                .or(toml.shuffle_policy)
                .unwrap_or(defaults.shuffle_policy),
            log_level: cli
                .log_level
                .clone()
                .or_else(|| toml.log_level.clone())
                .unwrap_or(defaults.log_level),
            show_summaries: cli
                .show_summaries
                .or(toml.show_summaries)
                .unwrap_or(defaults.show_summaries),
        }
    }
}

/// Dataset path: CLI → `DANCEFIT_DATASET` → TOML → compiled default
pub fn resolve_dataset_path(cli_arg: Option<&Path>, toml: &TomlConfig) -> PathBuf {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return path.to_path_buf();
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(DATASET_ENV_VAR) {
        if !path.trim().is_empty() {
            return PathBuf::from(path);
        }
    }

    // Priority 3: TOML config file
    if let Some(path) = &toml.dataset_path {
        return path.clone();
    }

    // Priority 4: Compiled default
    CompiledDefaults::default().dataset_path
}

/// Config file location: CLI → `DANCEFIT_CONFIG` → platform config dir
///
/// Returns `None` only when no platform config directory exists.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }
    default_config_path()
}

/// `~/.config/dancefit/config.toml` on Linux, platform equivalent elsewhere
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("dancefit").join("config.toml"))
}

/// Read and parse a TOML config file
///
/// Returns `Ok(None)` when the file does not exist.
pub fn load_toml_config(path: &Path) -> Result<Option<TomlConfig>> {
    if !path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(path)?;
    let config = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    Ok(Some(config))
}

/// Serialize a config to TOML
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, content)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compiled_defaults() {
        let defaults = CompiledDefaults::default();
        assert_eq!(defaults.dataset_path, PathBuf::from("dance_data.csv"));
        assert_eq!(defaults.log_level, "warn");
        assert_eq!(defaults.shuffle_policy, ShufflePolicy::PerPass);
        assert!(defaults.show_summaries);
    }

    #[test]
    fn test_toml_parses_partial_config() {
        let config: TomlConfig = toml::from_str("seed = 7\nshuffle_policy = \"fixed\"\n").unwrap();
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.shuffle_policy, Some(ShufflePolicy::Fixed));
        assert!(config.dataset_path.is_none());
        assert!(config.log_level.is_none());
    }

    #[test]
    fn test_cli_beats_toml() {
        let toml = TomlConfig {
            seed: Some(1),
            shuffle_policy: Some(ShufflePolicy::Fixed),
            log_level: Some("info".into()),
            show_summaries: Some(true),
            ..Default::default()
        };
        let cli = CliOverrides {
            dataset_path: Some(PathBuf::from("/data/cli.csv")),
            seed: Some(2),
            shuffle_policy: Some(ShufflePolicy::PerPass),
            log_level: None,
            show_summaries: Some(false),
        };

        let settings = Settings::resolve(&cli, &toml);
        assert_eq!(settings.dataset_path, PathBuf::from("/data/cli.csv"));
        assert_eq!(settings.seed, Some(2));
        assert_eq!(settings.shuffle_policy, ShufflePolicy::PerPass);
        assert_eq!(settings.log_level, "info");
        assert!(!settings.show_summaries);
    }
}
