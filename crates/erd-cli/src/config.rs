//! Configuration file loading for the CLI
//!
//! This module handles finding and loading TOML configuration files
//! from various locations (explicit path, local directory, system directory).

use std::{
    fs,
    path::{Path, PathBuf},
};

use directories::ProjectDirs;
use log::{debug, info};
use thiserror::Error;

use erd::config::AppConfig;

use crate::error::CliError;

/// Configuration-related errors for CLI
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse TOML configuration `{path}`: {message}")]
    Parse { path: PathBuf, message: String },

    #[error("Missing configuration file: {0}")]
    MissingFile(PathBuf),
}

/// Find and load configuration from various locations
///
/// Search order:
/// 1. Explicit path if provided
/// 2. Local project directory (erd/config.toml)
/// 3. Platform-specific config directory
/// 4. Default config if none found
///
/// # Errors
///
/// Returns error if:
/// - Explicit path is provided but file doesn't exist
/// - Config file exists but cannot be parsed
pub fn load_config(explicit_path: Option<impl AsRef<Path>>) -> Result<AppConfig, CliError> {
    // 1. Try the explicitly provided path first if available
    if let Some(path) = explicit_path {
        let path = path.as_ref();
        info!(path = path.display().to_string(); "Loading configuration from explicit path");
        return load_config_file(path);
    }

    // 2. Try the local project directory
    let local_config = Path::new("erd/config.toml");
    if local_config.exists() {
        info!(path = local_config.display().to_string(); "Loading configuration from local path");
        return load_config_file(local_config);
    }

    // 3. Try the platform-specific config directory
    if let Some(proj_dirs) = ProjectDirs::from("com", "erd", "erd") {
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

/// Load configuration from a TOML file
///
/// # Errors
///
/// Returns error if the file doesn't exist, cannot be read, or is not valid
/// TOML for [`AppConfig`].
fn load_config_file(path: impl AsRef<Path>) -> Result<AppConfig, CliError> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(ConfigError::MissingFile(path.to_path_buf()).into());
    }

    let content = fs::read_to_string(path)?;

    let config: AppConfig = toml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    #[test]
    fn test_explicit_path_is_loaded() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[style]\ngap = 9.0\nstroke_color = \"navy\"").unwrap();

        let config = load_config(Some(file.path())).unwrap();

        assert_eq!(config.style().gap(), 9.0);
        assert_eq!(config.style().stroke_color().as_str(), "navy");
    }

    #[test]
    fn test_missing_explicit_path() {
        let err = load_config(Some("does/not/exist.toml")).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::MissingFile(_))));
    }

    #[test]
    fn test_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[style]\ngap = \"wide\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Parse { .. })));
    }

    #[test]
    fn test_invalid_color_is_a_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[style]\nfill_color = \"not-a-color\"").unwrap();

        let err = load_config(Some(file.path())).unwrap_err();
        assert!(matches!(err, CliError::Config(ConfigError::Parse { .. })));
    }
}
