//! Configuration management CLI commands.
//!
//! Provides `config get`, `config set`, `config list`, and `config path` commands
//! for viewing and modifying configuration settings from the command line.

use std::path::Path;

use camdodge::config::{config_file_path, ConfigFile, ConfigKey};
use clap::Subcommand;

use crate::error::CliError;

/// Config subcommands.
#[derive(Debug, Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key in format section.key (e.g., services.osrm_url)
        key: String,
    },

    /// Set a configuration value
    Set {
        /// Configuration key in format section.key (e.g., avoidance.verify_passes)
        key: String,

        /// Value to set
        value: String,
    },

    /// List all configuration settings
    List,

    /// Show the configuration file path
    Path,
}

/// Run a config subcommand against the user's configuration file.
pub fn run(command: ConfigCommands) -> Result<(), CliError> {
    run_at(command, &config_file_path())
}

fn run_at(command: ConfigCommands, path: &Path) -> Result<(), CliError> {
    match command {
        ConfigCommands::Get { key } => {
            println!("{}", get_value(&key, path)?);
            Ok(())
        }
        ConfigCommands::Set { key, value } => {
            let name = set_value(&key, &value, path)?;
            println!("Set {} = {}", name, value);
            Ok(())
        }
        ConfigCommands::List => {
            print!("{}", render_list(&ConfigFile::load_from(path)?));
            Ok(())
        }
        ConfigCommands::Path => {
            println!("{}", path.display());
            Ok(())
        }
    }
}

fn parse_key(key: &str) -> Result<ConfigKey, CliError> {
    key.parse().map_err(|_| {
        CliError::Config(format!(
            "Unknown configuration key '{}'. Use 'camdodge config list' to see available keys.",
            key
        ))
    })
}

/// Get a configuration value.
fn get_value(key: &str, path: &Path) -> Result<String, CliError> {
    let config_key = parse_key(key)?;
    let config = ConfigFile::load_from(path)?;
    let value = config_key.get(&config);

    if value.is_empty() {
        Ok("(not set)".to_string())
    } else {
        Ok(value)
    }
}

/// Set a configuration value and save the file.
fn set_value(key: &str, value: &str, path: &Path) -> Result<String, CliError> {
    let config_key = parse_key(key)?;

    let mut config = ConfigFile::load_from(path)?;
    config_key
        .set(&mut config, value)
        .map_err(|e| CliError::Config(e.to_string()))?;
    config.save_to(path)?;

    Ok(config_key.name())
}

/// Render all configuration settings grouped by section.
fn render_list(config: &ConfigFile) -> String {
    let mut out = String::from("Configuration Settings\n======================\n\n");
    let mut current_section = "";

    for key in ConfigKey::all() {
        let section = key.section();

        // Section header when section changes
        if section != current_section {
            if !current_section.is_empty() {
                out.push('\n');
            }
            out.push_str(&format!("[{}]\n", section));
            current_section = section;
        }

        let value = key.get(config);
        if value.is_empty() {
            out.push_str(&format!("  {} = (not set)\n", key.key_name()));
        } else {
            out.push_str(&format!("  {} = {}\n", key.key_name(), value));
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_set_then_get() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        let name = set_value("avoidance.verify_passes", "2", &path).unwrap();
        assert_eq!(name, "avoidance.verify_passes");
        assert_eq!(get_value("avoidance.verify_passes", &path).unwrap(), "2");
    }

    #[test]
    fn test_get_unset_value() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");
        assert_eq!(get_value("logging.directory", &path).unwrap(), "(not set)");
    }

    #[test]
    fn test_unknown_key_is_config_error() {
        let dir = TempDir::new().unwrap();
        let result = get_value("cache.directory", &dir.path().join("config.ini"));
        assert!(matches!(result, Err(CliError::Config(_))));
    }

    #[test]
    fn test_invalid_value_is_not_saved() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.ini");

        assert!(set_value("services.timeout_secs", "never", &path).is_err());
        assert!(!path.exists());
    }

    #[test]
    fn test_list_groups_by_section() {
        let listing = render_list(&ConfigFile::default());
        assert!(listing.contains("[services]\n  overpass_url = https://"));
        assert!(listing.contains("[avoidance]\n  offset_degrees = 0.005\n  verify_passes = 0\n"));
        assert!(listing.contains("  directory = (not set)"));
    }
}
