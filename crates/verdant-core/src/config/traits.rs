//! Core configuration trait for the Verdant configuration system

use crate::errors::{Result, VerdantError};
use serde::de::DeserializeOwned;
use std::path::Path;
use tracing::debug;

/// Accepted values for log level settings.
pub const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// Core trait for Verdant configuration types.
///
/// Layering order is: defaults, then a TOML file, then environment
/// variables carrying [`VerdantConfig::ENV_PREFIX`].
pub trait VerdantConfig: Clone + Default + DeserializeOwned + Send + Sync + 'static {
    /// Prefix for environment overrides, e.g. `VERDANT_`.
    const ENV_PREFIX: &'static str;

    /// Get default configuration values
    fn defaults() -> Self {
        Self::default()
    }

    /// Parse and validate a TOML document. Missing keys keep their defaults
    /// when the implementing type uses `#[serde(default)]`.
    fn from_toml_str(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a TOML file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            VerdantError::config(format!("Failed to read {}: {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Merge with the process environment
    fn merge_with_env(&mut self) -> Result<()> {
        self.merge_with_vars(std::env::vars())
    }

    /// Merge with an explicit set of variables.
    ///
    /// Variables without the prefix are skipped, as are prefixed variables
    /// whose key the configuration does not recognise.
    fn merge_with_vars<I>(&mut self, vars: I) -> Result<()>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        for (name, value) in vars {
            let Some(key) = name.strip_prefix(Self::ENV_PREFIX) else {
                continue;
            };
            let key = key.to_ascii_lowercase();
            if !self.set_from_string(&key, &value)? {
                debug!(variable = %name, "Ignoring unrecognised config variable");
            }
        }
        self.validate()
    }

    /// Set a configuration value from a string.
    ///
    /// Returns `Ok(false)` when `key` is not a known setting.
    fn set_from_string(&mut self, key: &str, value: &str) -> Result<bool>;

    /// Validate the configuration
    fn validate(&self) -> Result<()>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    #[serde(default)]
    struct SampleConfig {
        log_level: String,
        retries: u32,
    }

    impl Default for SampleConfig {
        fn default() -> Self {
            Self {
                log_level: "info".to_string(),
                retries: 3,
            }
        }
    }

    impl VerdantConfig for SampleConfig {
        const ENV_PREFIX: &'static str = "SAMPLE_";

        fn set_from_string(&mut self, key: &str, value: &str) -> Result<bool> {
            match key {
                "log_level" => self.log_level = value.to_ascii_lowercase(),
                "retries" => {
                    self.retries = value
                        .parse()
                        .map_err(|_| VerdantError::config(format!("retries: {value}")))?;
                }
                _ => return Ok(false),
            }
            Ok(true)
        }

        fn validate(&self) -> Result<()> {
            if LOG_LEVELS.contains(&self.log_level.as_str()) {
                Ok(())
            } else {
                Err(VerdantError::config(format!("log_level: {}", self.log_level)))
            }
        }
    }

    #[test]
    fn test_missing_keys_keep_defaults() {
        let config = SampleConfig::from_toml_str("retries = 5\n").unwrap();
        assert_eq!(config.retries, 5);
        assert_eq!(config.log_level, "info");
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = SampleConfig::from_toml_str("retries = [").unwrap_err();
        assert!(matches!(err, VerdantError::Config { .. }));
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sample.toml");
        std::fs::write(&path, "log_level = \"warn\"\n").unwrap();
        let config = SampleConfig::load_from_file(&path).unwrap();
        assert_eq!(config.log_level, "warn");

        let missing = dir.path().join("absent.toml");
        assert!(SampleConfig::load_from_file(&missing).is_err());
    }

    #[test]
    fn test_env_vars_override_and_unknown_keys_skip() {
        let mut config = SampleConfig::defaults();
        config
            .merge_with_vars(vec![
                ("SAMPLE_RETRIES".to_string(), "9".to_string()),
                ("SAMPLE_COLOR".to_string(), "green".to_string()),
                ("OTHER_RETRIES".to_string(), "1".to_string()),
            ])
            .unwrap();
        assert_eq!(config.retries, 9);
    }

    #[test]
    fn test_env_merge_validates() {
        let mut config = SampleConfig::defaults();
        let result =
            config.merge_with_vars(vec![("SAMPLE_LOG_LEVEL".to_string(), "loud".to_string())]);
        assert!(result.is_err());
    }
}
