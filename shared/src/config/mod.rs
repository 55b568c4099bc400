//! Conversion configuration.
//!
//! Handles loading configuration from environment variables with sensible
//! defaults.

use std::path::PathBuf;
use thiserror::Error;

/// Default number of rows per Garmin "Activities" import file.
pub const DEFAULT_ACTIVITY_LINES_PER_FILE: usize = 100;

/// Default number of rows per Garmin "Body" import file. Files below 4 KB
/// import reliably.
pub const DEFAULT_WEIGHT_LINES_PER_FILE: usize = 75;

/// Errors that can occur while loading the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An environment variable holds an invalid value.
    #[error("Invalid value '{value}' for {name}")]
    InvalidValue {
        /// The variable name.
        name: String,
        /// The offending value.
        value: String,
    },

    /// The configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Conversion configuration.
///
/// Configuration values can be set via environment variables:
/// - `HEALTHPORT_EXPORT_DIR`: the unpacked Samsung Health export (default: ".")
/// - `HEALTHPORT_OUTPUT_DIR`: where generated files go (default: "exports")
/// - `HEALTHPORT_ACTIVITY_LINES`: rows per activities file (default: 100)
/// - `HEALTHPORT_WEIGHT_LINES`: rows per weight file (default: 75)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConvertConfig {
    /// The unpacked Samsung Health export.
    pub export_dir: PathBuf,
    /// Where generated files are written.
    pub output_dir: PathBuf,
    /// Rows per activities CSV file.
    pub activity_lines_per_file: usize,
    /// Rows per weight CSV file.
    pub weight_lines_per_file: usize,
}

impl ConvertConfig {
    /// Creates a new configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - a line count variable is set but is not a number
    /// - the resulting configuration fails [`ConvertConfig::validate`]
    pub fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();

        let config = Self {
            export_dir: std::env::var("HEALTHPORT_EXPORT_DIR")
                .map_or(defaults.export_dir, PathBuf::from),
            output_dir: std::env::var("HEALTHPORT_OUTPUT_DIR")
                .map_or(defaults.output_dir, PathBuf::from),
            activity_lines_per_file: env_usize("HEALTHPORT_ACTIVITY_LINES")?
                .unwrap_or(defaults.activity_lines_per_file),
            weight_lines_per_file: env_usize("HEALTHPORT_WEIGHT_LINES")?
                .unwrap_or(defaults.weight_lines_per_file),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if a line count is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.activity_lines_per_file == 0 {
            return Err(ConfigError::Invalid(
                "activity lines per file must be greater than zero".to_string(),
            ));
        }
        if self.weight_lines_per_file == 0 {
            return Err(ConfigError::Invalid(
                "weight lines per file must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for ConvertConfig {
    fn default() -> Self {
        Self {
            export_dir: PathBuf::from("."),
            output_dir: PathBuf::from("exports"),
            activity_lines_per_file: DEFAULT_ACTIVITY_LINES_PER_FILE,
            weight_lines_per_file: DEFAULT_WEIGHT_LINES_PER_FILE,
        }
    }
}

fn env_usize(name: &str) -> Result<Option<usize>, ConfigError> {
    std::env::var(name)
        .ok()
        .map(|value| {
            value.parse::<usize>().map_err(|_| ConfigError::InvalidValue {
                name: name.to_string(),
                value,
            })
        })
        .transpose()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default_values() {
        let config = ConvertConfig::default();

        assert_eq!(config.export_dir, PathBuf::from("."));
        assert_eq!(config.output_dir, PathBuf::from("exports"));
        assert_eq!(config.activity_lines_per_file, 100);
        assert_eq!(config.weight_lines_per_file, 75);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_zero_lines_invalid() {
        let config = ConvertConfig {
            weight_lines_per_file: 0,
            ..ConvertConfig::default()
        };

        assert!(matches!(
            config.validate().unwrap_err(),
            ConfigError::Invalid(_)
        ));
    }

    #[test]
    fn test_env_usize_unset_is_none() {
        assert!(env_usize("HEALTHPORT_TEST_SURELY_UNSET_VARIABLE")
            .unwrap()
            .is_none());
    }
}
