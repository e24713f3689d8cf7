//! Addressable configuration keys.

use std::path::PathBuf;
use std::str::FromStr;

use super::{ConfigError, ConfigFile};

/// A `section.key` setting that can be read and written by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    ServicesOverpassUrl,
    ServicesOsrmUrl,
    ServicesNominatimUrl,
    ServicesTimeoutSecs,
    AvoidanceOffsetDegrees,
    AvoidanceVerifyPasses,
    ViewportPaddingDegrees,
    LoggingDirectory,
    LoggingLevel,
}

const LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

impl ConfigKey {
    /// Every key, grouped by section in file order.
    pub fn all() -> &'static [ConfigKey] {
        &[
            ConfigKey::ServicesOverpassUrl,
            ConfigKey::ServicesOsrmUrl,
            ConfigKey::ServicesNominatimUrl,
            ConfigKey::ServicesTimeoutSecs,
            ConfigKey::AvoidanceOffsetDegrees,
            ConfigKey::AvoidanceVerifyPasses,
            ConfigKey::ViewportPaddingDegrees,
            ConfigKey::LoggingDirectory,
            ConfigKey::LoggingLevel,
        ]
    }

    pub fn section(&self) -> &'static str {
        match self {
            ConfigKey::ServicesOverpassUrl
            | ConfigKey::ServicesOsrmUrl
            | ConfigKey::ServicesNominatimUrl
            | ConfigKey::ServicesTimeoutSecs => "services",
            ConfigKey::AvoidanceOffsetDegrees | ConfigKey::AvoidanceVerifyPasses => "avoidance",
            ConfigKey::ViewportPaddingDegrees => "viewport",
            ConfigKey::LoggingDirectory | ConfigKey::LoggingLevel => "logging",
        }
    }

    pub fn key_name(&self) -> &'static str {
        match self {
            ConfigKey::ServicesOverpassUrl => "overpass_url",
            ConfigKey::ServicesOsrmUrl => "osrm_url",
            ConfigKey::ServicesNominatimUrl => "nominatim_url",
            ConfigKey::ServicesTimeoutSecs => "timeout_secs",
            ConfigKey::AvoidanceOffsetDegrees => "offset_degrees",
            ConfigKey::AvoidanceVerifyPasses => "verify_passes",
            ConfigKey::ViewportPaddingDegrees => "padding_degrees",
            ConfigKey::LoggingDirectory => "directory",
            ConfigKey::LoggingLevel => "level",
        }
    }

    /// Full `section.key` name.
    pub fn name(&self) -> String {
        format!("{}.{}", self.section(), self.key_name())
    }

    /// Current value as text; empty when unset.
    pub fn get(&self, config: &ConfigFile) -> String {
        match self {
            ConfigKey::ServicesOverpassUrl => config.services.overpass_url.clone(),
            ConfigKey::ServicesOsrmUrl => config.services.osrm_url.clone(),
            ConfigKey::ServicesNominatimUrl => config.services.nominatim_url.clone(),
            ConfigKey::ServicesTimeoutSecs => config.services.timeout_secs.to_string(),
            ConfigKey::AvoidanceOffsetDegrees => config.avoidance.offset_degrees.to_string(),
            ConfigKey::AvoidanceVerifyPasses => config.avoidance.verify_passes.to_string(),
            ConfigKey::ViewportPaddingDegrees => config.viewport.padding_degrees.to_string(),
            ConfigKey::LoggingDirectory => config
                .logging
                .directory
                .as_ref()
                .map(|d| d.display().to_string())
                .unwrap_or_default(),
            ConfigKey::LoggingLevel => config.logging.level.clone(),
        }
    }

    /// Validates `value` and stores it in `config`.
    pub fn set(&self, config: &mut ConfigFile, value: &str) -> Result<(), ConfigError> {
        let value = value.trim();
        match self {
            ConfigKey::ServicesOverpassUrl => config.services.overpass_url = self.url(value)?,
            ConfigKey::ServicesOsrmUrl => config.services.osrm_url = self.url(value)?,
            ConfigKey::ServicesNominatimUrl => config.services.nominatim_url = self.url(value)?,
            ConfigKey::ServicesTimeoutSecs => {
                let secs: u64 = self.parse(value)?;
                if secs == 0 {
                    return Err(self.invalid(value, "must be at least 1 second"));
                }
                config.services.timeout_secs = secs;
            }
            ConfigKey::AvoidanceOffsetDegrees => {
                config.avoidance.offset_degrees = self.positive_degrees(value)?
            }
            ConfigKey::AvoidanceVerifyPasses => config.avoidance.verify_passes = self.parse(value)?,
            ConfigKey::ViewportPaddingDegrees => {
                let padding: f64 = self.parse(value)?;
                if !padding.is_finite() || padding < 0.0 {
                    return Err(self.invalid(value, "must be a non-negative number of degrees"));
                }
                config.viewport.padding_degrees = padding;
            }
            ConfigKey::LoggingDirectory => {
                config.logging.directory = if value.is_empty() {
                    None
                } else {
                    Some(PathBuf::from(value))
                };
            }
            ConfigKey::LoggingLevel => {
                let level = value.to_lowercase();
                if !LOG_LEVELS.contains(&level.as_str()) {
                    return Err(self.invalid(value, "expected trace, debug, info, warn or error"));
                }
                config.logging.level = level;
            }
        }
        Ok(())
    }

    fn parse<T: FromStr>(&self, value: &str) -> Result<T, ConfigError>
    where
        T::Err: std::fmt::Display,
    {
        value
            .parse()
            .map_err(|e: T::Err| self.invalid(value, &e.to_string()))
    }

    fn url(&self, value: &str) -> Result<String, ConfigError> {
        reqwest::Url::parse(value).map_err(|e| self.invalid(value, &e.to_string()))?;
        Ok(value.trim_end_matches('/').to_string())
    }

    fn positive_degrees(&self, value: &str) -> Result<f64, ConfigError> {
        let degrees: f64 = self.parse(value)?;
        if !degrees.is_finite() || degrees <= 0.0 {
            return Err(self.invalid(value, "must be a positive number of degrees"));
        }
        Ok(degrees)
    }

    fn invalid(&self, value: &str, reason: &str) -> ConfigError {
        ConfigError::InvalidValue {
            key: self.name(),
            value: value.to_string(),
            reason: reason.to_string(),
        }
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        ConfigKey::all()
            .iter()
            .copied()
            .find(|key| key.name() == wanted)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_every_key_by_name() {
        for key in ConfigKey::all() {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), *key);
        }
    }

    #[test]
    fn test_unknown_key() {
        let result = "services.tile_url".parse::<ConfigKey>();
        assert!(matches!(result, Err(ConfigError::UnknownKey(_))));
    }

    #[test]
    fn test_set_and_get_verify_passes() {
        let mut config = ConfigFile::default();
        ConfigKey::AvoidanceVerifyPasses.set(&mut config, "3").unwrap();
        assert_eq!(ConfigKey::AvoidanceVerifyPasses.get(&config), "3");
    }

    #[test]
    fn test_set_url_trims_trailing_slash() {
        let mut config = ConfigFile::default();
        ConfigKey::ServicesOsrmUrl
            .set(&mut config, "http://localhost:5000/")
            .unwrap();
        assert_eq!(config.services.osrm_url, "http://localhost:5000");
    }

    #[test]
    fn test_set_rejects_invalid_values() {
        let mut config = ConfigFile::default();
        assert!(ConfigKey::ServicesOsrmUrl.set(&mut config, "not a url").is_err());
        assert!(ConfigKey::ServicesTimeoutSecs.set(&mut config, "0").is_err());
        assert!(ConfigKey::AvoidanceOffsetDegrees.set(&mut config, "-0.1").is_err());
        assert!(ConfigKey::ViewportPaddingDegrees.set(&mut config, "NaN").is_err());
        assert!(ConfigKey::LoggingLevel.set(&mut config, "loud").is_err());
        assert_eq!(config, ConfigFile::default());
    }

    #[test]
    fn test_empty_log_directory_unsets_it() {
        let mut config = ConfigFile::default();
        ConfigKey::LoggingDirectory.set(&mut config, "/tmp/logs").unwrap();
        assert_eq!(config.logging.directory, Some(PathBuf::from("/tmp/logs")));

        ConfigKey::LoggingDirectory.set(&mut config, "").unwrap();
        assert_eq!(ConfigKey::LoggingDirectory.get(&config), "");
    }

    #[test]
    fn test_log_level_is_lowercased() {
        let mut config = ConfigFile::default();
        ConfigKey::LoggingLevel.set(&mut config, "DEBUG").unwrap();
        assert_eq!(config.logging.level, "debug");
    }
}
