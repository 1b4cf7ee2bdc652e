//! Configuration validation.

use crate::error::ConfigError;
use crate::schema::Config;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Convert into the warnings, or `ConfigError::Invalid` when any error was found.
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        if self.errors.is_empty() {
            Ok(self.warnings)
        } else {
            Err(ConfigError::Invalid(
                self.errors.iter().map(ToString::to_string).collect(),
            ))
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();
        Self::validate_host(config, &mut result);
        Self::validate_logging(config, &mut result);
        Self::validate_extensions(config, &mut result);
        result
    }

    fn validate_host(config: &Config, result: &mut ValidationResult) {
        if config.host.name.trim().is_empty() {
            result.add_error(ValidationError::new("host.name", "Host name cannot be empty"));
        }

        if let Some(ref dir) = config.host.work_dir {
            if !dir.exists() {
                result.add_warning(ValidationWarning::new(
                    "host.work_dir",
                    format!("Working directory does not exist: {:?}", dir),
                ));
            }
        }
    }

    fn validate_logging(config: &Config, result: &mut ValidationResult) {
        let level = config.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            result.add_error(ValidationError::new(
                "logging.level",
                format!(
                    "Unknown log level '{}', valid values: {:?}",
                    config.logging.level, LOG_LEVELS
                ),
            ));
        }

        if config.logging.max_files == 0 {
            result.add_error(ValidationError::new(
                "logging.max_files",
                "max_files must be greater than 0",
            ));
        }
    }

    fn validate_extensions(config: &Config, result: &mut ValidationResult) {
        for ext in &config.extensions.enabled {
            if config.extensions.disabled.contains(ext) {
                result.add_error(ValidationError::new(
                    "extensions",
                    format!("Extension '{}' is both enabled and disabled", ext),
                ));
            }
        }

        for id in config.extensions.settings.keys() {
            if !config.extensions.is_enabled(id) {
                result.add_warning(ValidationWarning::new(
                    format!("extensions.settings.{}", id),
                    "Settings provided for a disabled extension",
                ));
            }
        }
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
