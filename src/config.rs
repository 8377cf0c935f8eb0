//! TOML-backed application configuration.
//!
//! The config file lives inside the `.castlist` app directory. Unknown or
//! missing fields fall back to defaults so old files keep loading across
//! upgrades.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;
use thiserror::Error;
use url::Url;

use crate::app_dirs;

/// File name of the persisted configuration.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Persisted application settings.
#[derive(Clone, Debug, Default, Deserialize, Serialize, PartialEq)]
pub struct AppConfig {
    /// Connection settings for the transcription server.
    #[serde(default)]
    pub server: ServerSettings,
    /// Behavior of the speaker panel.
    #[serde(default)]
    pub panel: PanelOptions,
}

/// Where the speaker name store is reachable.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct ServerSettings {
    /// Base URL of the transcription server hosting the name store.
    #[serde(default = "default_base_url")]
    pub base_url: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
        }
    }
}

/// Behavior toggles for the speaker panel.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct PanelOptions {
    /// Fetch stored names automatically at startup.
    #[serde(default = "default_autoload")]
    pub autoload: bool,
}

impl Default for PanelOptions {
    fn default() -> Self {
        Self {
            autoload: default_autoload(),
        }
    }
}

fn default_base_url() -> String {
    "http://127.0.0.1:8000".to_string()
}

fn default_autoload() -> bool {
    true
}

/// Errors that can occur while loading or saving the configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The app directory could not be resolved or created.
    #[error(transparent)]
    AppDir(#[from] app_dirs::AppDirError),
    /// A parent directory for the config file could not be created.
    #[error("Failed to create config directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file could not be written.
    #[error("Failed to write config file {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    /// The config file holds invalid TOML.
    #[error("Failed to parse config file {path}: {source}")]
    ParseToml {
        path: PathBuf,
        source: toml::de::Error,
    },
    /// The configuration could not be serialized to TOML.
    #[error("Failed to serialize configuration: {source}")]
    SerializeToml { source: toml::ser::Error },
    /// The config file path has no parent directory.
    #[error("Config path {path} has no parent directory")]
    NoParentDir { path: PathBuf },
    /// The configured server base URL is not a valid URL.
    #[error("Invalid server base URL {url}: {source}")]
    InvalidBaseUrl { url: String, source: url::ParseError },
}

/// Path of the config file inside the app directory.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    Ok(app_dirs::app_root_dir()?.join(CONFIG_FILE_NAME))
}

/// Load the persisted configuration. On first run the default configuration
/// is written to disk so there is a file to edit, then returned.
pub fn load_or_default() -> Result<AppConfig, ConfigError> {
    let path = config_path()?;
    if !path.exists() {
        let config = AppConfig::default();
        save_to_path(&config, &path)?;
        return Ok(config);
    }
    load_from(&path)
}

/// Persist `config` to the default location.
pub fn save(config: &AppConfig) -> Result<(), ConfigError> {
    let path = config_path()?;
    save_to_path(config, &path)
}

fn load_from(path: &Path) -> Result<AppConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let config: AppConfig = toml::from_str(&raw).map_err(|source| ConfigError::ParseToml {
        path: path.to_path_buf(),
        source,
    })?;
    validate(&config)?;
    Ok(config)
}

/// Write `config` atomically by persisting a temp file over the target.
fn save_to_path(config: &AppConfig, path: &Path) -> Result<(), ConfigError> {
    let serialized =
        toml::to_string_pretty(config).map_err(|source| ConfigError::SerializeToml { source })?;
    let parent = path.parent().ok_or_else(|| ConfigError::NoParentDir {
        path: path.to_path_buf(),
    })?;
    fs::create_dir_all(parent).map_err(|source| ConfigError::CreateDir {
        path: parent.to_path_buf(),
        source,
    })?;
    let mut file = NamedTempFile::new_in(parent).map_err(|source| ConfigError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    file.write_all(serialized.as_bytes())
        .map_err(|source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        })?;
    file.persist(path).map_err(|err| ConfigError::Write {
        path: path.to_path_buf(),
        source: err.error,
    })?;
    Ok(())
}

fn validate(config: &AppConfig) -> Result<(), ConfigError> {
    Url::parse(&config.server.base_url).map_err(|source| ConfigError::InvalidBaseUrl {
        url: config.server.base_url.clone(),
        source,
    })?;
    Ok(())
}
