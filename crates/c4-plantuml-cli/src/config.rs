//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory)
//! and applying command-line overrides on top.

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use c4_plantuml::{
    C4Error,
    config::{AppConfig, LayoutDirection},
};

use crate::Args;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration: {0}")]
    Parse(String),

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

impl From<ConfigError> for C4Error {
    fn from(err: ConfigError) -> Self {
        C4Error::InvalidConfiguration(err.to_string())
    }
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (c4-plantuml/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, C4Error> {
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    let local_config = Path::new("c4-plantuml/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    if let Some(proj_dirs) = ProjectDirs::from("com", "c4-plantuml", "c4-plantuml") {
        let system_config = proj_dirs.config_dir().join("config.toml");

        if system_config.exists() {
            info!(path = system_config.display().to_string(); "Loading configuration from system path");
            return load_config_file(system_config);
        }

        debug!(path = system_config.display().to_string(); "System configuration file not found");
    } else {
        debug!("Could not determine platform-specific config directory");
    }

    debug!("No configuration file found, using default configuration");
    Ok(AppConfig::default())
}

/// Apply the layout flags given on the command line.
///
/// Flags only ever switch things on (or, for the legend, off); an absent flag
/// leaves the loaded value alone.
///
/// # Errors
///
/// Returns [`C4Error::InvalidConfiguration`] for an unknown direction.
pub fn apply_overrides(config: &mut AppConfig, args: &Args) -> Result<(), C4Error> {
    let layout = config.layout_mut();
    if args.sketch {
        layout.set_sketch(true);
    }
    if args.no_legend {
        layout.set_legend(false);
    }
    if let Some(direction) = &args.direction {
        layout.set_direction(direction.parse::<LayoutDirection>()?);
    }
    debug!(layout:? = config.layout(); "Effective layout configuration");
    Ok(())
}

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if:
/// - File doesn't exist
/// - File cannot be read
/// - TOML parsing fails
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, C4Error> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig =
        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_explicit_config_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[layout]\nlegend = false\ndirection = \"top-down\"\n\n[library]\nbase_url = \"https://example.com/\"\n",
        )
        .unwrap();

        let config = load_config(Some(&path)).expect("Failed to load config");
        assert!(!config.layout().legend());
        assert_eq!(config.layout().direction(), LayoutDirection::TopDown);
        assert_eq!(
            config.library().custom_base_url(),
            Some("https://example.com/")
        );
    }

    #[test]
    fn test_missing_explicit_config_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("absent.toml");

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, C4Error::InvalidConfiguration(msg) if msg.contains("absent.toml")));
    }

    #[test]
    fn test_malformed_config_file() {
        let dir = tempdir().expect("Failed to create temp directory");
        let path = dir.path().join("config.toml");
        fs::write(&path, "[layout]\ndirection = \"diagonal\"\n").unwrap();

        let err = load_config(Some(&path)).unwrap_err();
        assert!(matches!(err, C4Error::InvalidConfiguration(_)));
    }

    #[test]
    fn test_overrides() {
        let mut config = AppConfig::default();
        let args = Args {
            sketch: true,
            no_legend: true,
            direction: Some("left-right".to_string()),
            ..Args::default()
        };

        apply_overrides(&mut config, &args).expect("Failed to apply overrides");
        assert!(config.layout().sketch());
        assert!(!config.layout().legend());
        assert_eq!(config.layout().direction(), LayoutDirection::LeftRight);
    }

    #[test]
    fn test_absent_overrides_keep_loaded_values() {
        let mut config: AppConfig = toml::from_str("[layout]\nsketch = true\n").unwrap();

        apply_overrides(&mut config, &Args::default()).expect("Failed to apply overrides");
        assert!(config.layout().sketch());
        assert!(config.layout().legend());
        assert_eq!(config.layout().direction(), LayoutDirection::None);
    }

    #[test]
    fn test_unknown_direction_override() {
        let mut config = AppConfig::default();
        let args = Args {
            direction: Some("sideways".to_string()),
            ..Args::default()
        };

        let err = apply_overrides(&mut config, &args).unwrap_err();
        assert!(matches!(err, C4Error::InvalidConfiguration(_)));
    }
}
