//! Engine configuration
//!
//! Plain serde structs handed to the reduction system at construction time.
//! Every field has a default, so a partial JSON document is enough:
//!
//! ```json
//! { "reduction": { "max_iterations": 200 }, "log_level": "debug" }
//! ```

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::util::logger::LogLevel;

/// Reduction settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReductionConfig {
    /// Iteration cap for both a single rule's fixed point and the number of
    /// passes over the rule list
    #[serde(default = "default_max_iterations")]
    pub max_iterations: usize,
}

fn default_max_iterations() -> usize {
    1000
}

impl Default for ReductionConfig {
    fn default() -> Self {
        Self {
            max_iterations: default_max_iterations(),
        }
    }
}

impl ReductionConfig {
    pub fn with_max_iterations(max_iterations: usize) -> Self {
        Self { max_iterations }
    }
}

/// Top-level configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub reduction: ReductionConfig,
    #[serde(default)]
    pub log_level: LogLevel,
}

impl EngineConfig {
    pub fn from_json_str(text: &str) -> serde_json::Result<Self> {
        serde_json::from_str(text)
    }

    pub fn to_json_string(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Load configuration from a JSON file
/// Returns default config if file doesn't exist
pub fn load_config(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Ok(EngineConfig::default());
    }
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    EngineConfig::from_json_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Save configuration as pretty JSON, creating parent directories
pub fn save_config(
    path: &Path,
    config: &EngineConfig,
) -> Result<()> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() && !dir.exists() {
            fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory: {}", dir.display()))?;
        }
    }
    let content = config.to_json_string()?;
    fs::write(path, content)
        .with_context(|| format!("Failed to write config file: {}", path.display()))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.reduction.max_iterations, 1000);
        assert_eq!(config.log_level, LogLevel::Info);
    }

    #[test]
    fn test_partial_json() {
        let config = EngineConfig::from_json_str(r#"{ "reduction": {} }"#).unwrap();
        assert_eq!(config, EngineConfig::default());

        let config =
            EngineConfig::from_json_str(r#"{ "reduction": { "max_iterations": 7 }, "log_level": "debug" }"#)
                .unwrap();
        assert_eq!(config.reduction.max_iterations, 7);
        assert_eq!(config.log_level, LogLevel::Debug);
    }

    #[test]
    fn test_bad_json() {
        assert!(EngineConfig::from_json_str(r#"{ "log_level": "loud" }"#).is_err());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(&dir.path().join("absent.json")).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("mixrule.json");
        let config = EngineConfig {
            reduction: ReductionConfig::with_max_iterations(42),
            log_level: LogLevel::Trace,
        };
        save_config(&path, &config).unwrap();
        assert_eq!(load_config(&path).unwrap(), config);
    }

    #[test]
    fn test_unreadable_config_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "not json").unwrap();
        let err = load_config(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
