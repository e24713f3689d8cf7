//! Configuration file support.
//!
//! Settings live in `~/.camdodge/config.ini`. A missing file yields the
//! defaults; a present file only needs the keys it wants to override.
//!
//! ```ini
//! [services]
//! overpass_url = https://overpass-api.de/api/interpreter
//! osrm_url = https://router.project-osrm.org
//! nominatim_url = https://nominatim.openstreetmap.org
//! timeout_secs = 10
//!
//! [avoidance]
//! offset_degrees = 0.005
//! verify_passes = 0
//!
//! [viewport]
//! padding_degrees = 0.02
//!
//! [logging]
//! level = info
//! ; directory = /var/log/camdodge
//! ```

mod keys;

pub use keys::ConfigKey;

use std::path::{Path, PathBuf};

use ini::Ini;
use thiserror::Error;

use crate::provider::{
    DEFAULT_NOMINATIM_URL, DEFAULT_OSRM_URL, DEFAULT_OVERPASS_URL, DEFAULT_TIMEOUT_SECS,
};
use crate::route::AVOIDANCE_OFFSET_DEGREES;
use crate::session::DEFAULT_PADDING_DEGREES;

/// Name of the per-user configuration directory.
pub const CONFIG_DIR_NAME: &str = ".camdodge";

/// Name of the configuration file inside [`CONFIG_DIR_NAME`].
pub const CONFIG_FILE_NAME: &str = "config.ini";

/// Default log level when neither `RUST_LOG` nor the config sets one.
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Errors raised while reading, writing or editing the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to access config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("Invalid value '{value}' for {key}: {reason}")]
    InvalidValue {
        key: String,
        value: String,
        reason: String,
    },
}

/// External service endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct ServicesSettings {
    pub overpass_url: String,
    pub osrm_url: String,
    pub nominatim_url: String,
    pub timeout_secs: u64,
}

impl Default for ServicesSettings {
    fn default() -> Self {
        Self {
            overpass_url: DEFAULT_OVERPASS_URL.to_string(),
            osrm_url: DEFAULT_OSRM_URL.to_string(),
            nominatim_url: DEFAULT_NOMINATIM_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Avoidance planning tunables.
#[derive(Debug, Clone, PartialEq)]
pub struct AvoidanceSettings {
    pub offset_degrees: f64,
    pub verify_passes: u32,
}

impl Default for AvoidanceSettings {
    fn default() -> Self {
        Self {
            offset_degrees: AVOIDANCE_OFFSET_DEGREES,
            verify_passes: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ViewportSettings {
    pub padding_degrees: f64,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            padding_degrees: DEFAULT_PADDING_DEGREES,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoggingSettings {
    /// Directory for daily log files; stderr only when unset.
    pub directory: Option<PathBuf>,
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            directory: None,
            level: DEFAULT_LOG_LEVEL.to_string(),
        }
    }
}

/// The parsed configuration file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ConfigFile {
    pub services: ServicesSettings,
    pub avoidance: AvoidanceSettings,
    pub viewport: ViewportSettings,
    pub logging: LoggingSettings,
}

/// Returns `~/.camdodge`, falling back to the working directory when the
/// home directory cannot be determined.
pub fn config_directory() -> PathBuf {
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

/// Returns the path of the configuration file.
pub fn config_file_path() -> PathBuf {
    config_directory().join(CONFIG_FILE_NAME)
}

impl ConfigFile {
    /// Loads the configuration from [`config_file_path`].
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&config_file_path())
    }

    /// Loads the configuration from `path`; a missing file yields defaults.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }

        let ini = Ini::load_from_file(path).map_err(|e| match e {
            ini::Error::Io(source) => ConfigError::Io {
                path: path.to_path_buf(),
                source,
            },
            ini::Error::Parse(e) => ConfigError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            },
        })?;

        Self::from_ini(&ini, path)
    }

    /// Parses configuration text, for tests and embedded defaults.
    pub fn parse(text: &str) -> Result<Self, ConfigError> {
        let ini = Ini::load_from_str(text).map_err(|e| ConfigError::Parse {
            path: PathBuf::from("<string>"),
            message: e.to_string(),
        })?;
        Self::from_ini(&ini, Path::new("<string>"))
    }

    fn from_ini(ini: &Ini, path: &Path) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        for key in ConfigKey::all() {
            let value = ini
                .section(Some(key.section()))
                .and_then(|props| props.get(key.key_name()));
            if let Some(value) = value {
                key.set(&mut config, value).map_err(|e| ConfigError::Parse {
                    path: path.to_path_buf(),
                    message: e.to_string(),
                })?;
            }
        }

        Ok(config)
    }

    /// Writes the configuration to `path`, creating parent directories.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| ConfigError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        let mut ini = Ini::new();
        for key in ConfigKey::all() {
            let value = key.get(self);
            if !value.is_empty() {
                ini.with_section(Some(key.section()))
                    .set(key.key_name(), value);
            }
        }

        ini.write_to_file(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::info!(path = %path.display(), "Configuration saved");
        Ok(())
    }
}
