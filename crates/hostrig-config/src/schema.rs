//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub host: HostConfig,

    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub extensions: ExtensionsConfig,
}

/// Host process configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostConfig {
    #[serde(default = "default_name")]
    pub name: String,

    /// Working directory handed to extensions; defaults to the current directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<PathBuf>,
}

impl Default for HostConfig {
    fn default() -> Self {
        Self {
            name: default_name(),
            work_dir: None,
        }
    }
}

fn default_name() -> String {
    "hostrig".to_string()
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Default filter when `RUST_LOG` is unset.
    #[serde(default = "default_level")]
    pub level: String,

    /// Directory for rolling log files; defaults to `~/.hostrig/logs`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dir: Option<String>,

    /// Emit JSON lines on the console instead of text.
    #[serde(default)]
    pub json: bool,

    /// Daily log files to keep.
    #[serde(default = "default_max_files")]
    pub max_files: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
            dir: None,
            json: false,
            max_files: default_max_files(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

fn default_max_files() -> usize {
    14
}

/// Extensions configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExtensionsConfig {
    /// Only these ids are registered when non-empty.
    #[serde(default)]
    pub enabled: Vec<String>,

    #[serde(default)]
    pub disabled: Vec<String>,

    /// Per-extension settings tables keyed by extension id.
    #[serde(default)]
    pub settings: HashMap<String, serde_json::Value>,
}

impl ExtensionsConfig {
    /// Whether an extension id passes the enabled/disabled filters.
    pub fn is_enabled(&self, id: &str) -> bool {
        if self.disabled.iter().any(|d| d == id) {
            return false;
        }
        self.enabled.is_empty() || self.enabled.iter().any(|e| e == id)
    }

    /// Settings as one JSON object keyed by extension id.
    pub fn settings_value(&self) -> serde_json::Value {
        serde_json::Value::Object(
            self.settings
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.host.name, "hostrig");
        assert!(config.host.work_dir.is_none());
        assert_eq!(config.logging.level, "info");
        assert_eq!(config.logging.max_files, 14);
        assert!(!config.logging.json);
        assert!(config.extensions.settings.is_empty());
    }

    #[test]
    fn test_extensions_enabled_filter() {
        let extensions = ExtensionsConfig {
            enabled: vec!["a".to_string(), "b".to_string()],
            disabled: vec!["b".to_string()],
            settings: HashMap::new(),
        };
        assert!(extensions.is_enabled("a"));
        assert!(!extensions.is_enabled("b"));
        assert!(!extensions.is_enabled("c"));
    }

    #[test]
    fn test_extensions_default_enables_all() {
        let extensions = ExtensionsConfig::default();
        assert!(extensions.is_enabled("anything"));
    }

    #[test]
    fn test_settings_value() {
        let mut extensions = ExtensionsConfig::default();
        extensions
            .settings
            .insert("x".to_string(), serde_json::json!({ "k": 1 }));
        let value = extensions.settings_value();
        assert_eq!(value["x"]["k"], 1);
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let config = Config::default();
        let text = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.host.name, config.host.name);
    }
}
