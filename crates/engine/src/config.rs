//! Engine configuration via `docket.toml`
//!
//! Loading is opt-in: an engine built with `EngineConfig::default()` never
//! touches the filesystem. Embedders that want a file drop a `docket.toml`
//! next to their data and call [`EngineConfig::from_file`].

use docket_core::{DocketError, DocketResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Config file name.
pub const CONFIG_FILE_NAME: &str = "docket.toml";

/// Page size used when a query does not specify `take`.
pub const DEFAULT_TAKE: usize = 100;

/// Default ceiling on `take`.
pub const DEFAULT_MAX_TAKE: usize = 1000;

/// Document type under which jobs are stored.
pub const DEFAULT_JOB_TYPE: &str = "job";

/// Engine configuration loaded from `docket.toml`.
///
/// # Example
///
/// ```toml
/// default_take = 100
/// max_take = 1000
/// job_type = "job"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Page size when a query omits `take`.
    #[serde(default = "default_take")]
    pub default_take: usize,
    /// Largest accepted `take`.
    #[serde(default = "default_max_take")]
    pub max_take: usize,
    /// Document type used for jobs.
    #[serde(default = "default_job_type")]
    pub job_type: String,
}

fn default_take() -> usize {
    DEFAULT_TAKE
}

fn default_max_take() -> usize {
    DEFAULT_MAX_TAKE
}

fn default_job_type() -> String {
    DEFAULT_JOB_TYPE.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_take: default_take(),
            max_take: default_max_take(),
            job_type: default_job_type(),
        }
    }
}

impl EngineConfig {
    /// Check that the values are usable together.
    ///
    /// # Errors
    ///
    /// `Configuration` if `default_take` is zero or above `max_take`, or if
    /// `job_type` is empty.
    pub fn validate(&self) -> DocketResult<()> {
        if self.default_take == 0 {
            return Err(DocketError::configuration("default_take must be at least 1"));
        }
        if self.default_take > self.max_take {
            return Err(DocketError::configuration(format!(
                "default_take ({}) exceeds max_take ({})",
                self.default_take, self.max_take
            )));
        }
        if self.job_type.is_empty() {
            return Err(DocketError::configuration("job_type must not be empty"));
        }
        Ok(())
    }

    /// Returns the default config file content with comments.
    pub fn default_toml() -> &'static str {
        r#"# Docket engine configuration
#
# Page size used when a query does not pass `take` (default: 100)
default_take = 100

# Largest `take` a query may request (default: 1000)
# Requests above the ceiling are rejected, not clamped.
max_take = 1000

# Document type under which jobs are stored (default: "job")
job_type = "job"
"#
    }

    /// Read, parse and validate config from a file path.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn from_file(path: &Path) -> DocketResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            DocketError::storage(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            DocketError::configuration(format!(
                "Failed to parse config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Write the default config file if it does not already exist.
    ///
    /// Returns `Ok(())` whether the file was created or already existed.
    pub fn write_default_if_missing(path: &Path) -> DocketResult<()> {
        if !path.exists() {
            std::fs::write(path, Self::default_toml()).map_err(|e| {
                DocketError::storage(format!(
                    "Failed to write default config file '{}': {}",
                    path.display(),
                    e
                ))
            })?;
        }
        Ok(())
    }

    /// Serialize this config to TOML and write it to the given path.
    pub fn write_to_file(&self, path: &Path) -> DocketResult<()> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| DocketError::serialization(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(path, content).map_err(|e| {
            DocketError::storage(format!(
                "Failed to write config file '{}': {}",
                path.display(),
                e
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.default_take, 100);
        assert_eq!(config.max_take, 1000);
        assert_eq!(config.job_type, "job");
        config.validate().unwrap();
    }

    #[test]
    fn default_toml_parses_to_default() {
        let config: EngineConfig = toml::from_str(EngineConfig::default_toml()).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn zero_default_take_rejected() {
        let config: EngineConfig = toml::from_str("default_take = 0").unwrap();
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn default_above_ceiling_rejected() {
        let config: EngineConfig = toml::from_str("default_take = 50\nmax_take = 10").unwrap();
        assert!(config.validate().unwrap_err().is_configuration());
    }

    #[test]
    fn write_default_creates_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        assert!(!path.exists());

        EngineConfig::write_default_if_missing(&path).unwrap();
        assert!(path.exists());

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.max_take, 1000);
    }

    #[test]
    fn write_default_does_not_overwrite() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        std::fs::write(&path, "max_take = 250\n").unwrap();
        EngineConfig::write_default_if_missing(&path).unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config.max_take, 250);
        assert_eq!(config.default_take, 100);
    }

    #[test]
    fn from_file_with_missing_fields_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "").unwrap();

        let config = EngineConfig::from_file(&path).unwrap();
        assert_eq!(config, EngineConfig::default());
    }

    #[test]
    fn from_file_rejects_invalid_values() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        std::fs::write(&path, "default_take = 5000\n").unwrap();

        assert!(EngineConfig::from_file(&path).unwrap_err().is_configuration());
    }

    #[test]
    fn from_file_missing_path_errors() {
        let dir = TempDir::new().unwrap();
        assert!(EngineConfig::from_file(&dir.path().join("nope.toml")).is_err());
    }

    #[test]
    fn write_to_file_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);

        let config = EngineConfig {
            default_take: 20,
            max_take: 200,
            job_type: "task".to_string(),
        };
        config.write_to_file(&path).unwrap();

        assert_eq!(EngineConfig::from_file(&path).unwrap(), config);
    }
}
