use std::fs;
use std::path::{Path, PathBuf};

use crate::model::config::Config;

/// The commented template written by `deacon config init`
pub const CONFIG_TEMPLATE: &str = include_str!("../templates/config.toml");

/// Error type for config I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("could not edit {path}: {source}")]
    EditError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("{path} already exists (use --force to overwrite)")]
    AlreadyExists { path: PathBuf },
    #[error("invalid key \"{0}\": expected section.key")]
    InvalidKey(String),
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: String, reason: String },
}

/// Get the config file path, respecting XDG_CONFIG_HOME
pub fn config_path() -> PathBuf {
    let config_dir = std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| dirs_home().join(".config"));
    config_dir.join("deacon").join("config.toml")
}

/// Get the user's home directory
fn dirs_home() -> PathBuf {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from("/"))
}

/// Read the config at `path`. A missing file yields the defaults.
pub fn read_config(path: &Path) -> Result<Config, ConfigError> {
    if !path.exists() {
        return Ok(Config::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the commented template to `path`, creating parent directories.
pub fn init_config(path: &Path, force: bool) -> Result<(), ConfigError> {
    if path.exists() && !force {
        return Err(ConfigError::AlreadyExists {
            path: path.to_path_buf(),
        });
    }
    write_text(path, CONFIG_TEMPLATE)
}

/// Set one dotted key (e.g. `remote.url`) in the config file, preserving
/// comments and formatting elsewhere. The result must still parse as a
/// valid config.
pub fn set_value(path: &Path, key: &str, raw: &str) -> Result<(), ConfigError> {
    let (section, field) = key
        .split_once('.')
        .filter(|(s, f)| !s.is_empty() && !f.is_empty() && !f.contains('.'))
        .ok_or_else(|| ConfigError::InvalidKey(key.to_string()))?;

    let text = if path.exists() {
        fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?
    } else {
        String::new()
    };
    let mut doc: toml_edit::DocumentMut = text.parse().map_err(|e| ConfigError::EditError {
        path: path.to_path_buf(),
        source: e,
    })?;

    if !doc.contains_key(section) {
        doc[section] = toml_edit::Item::Table(toml_edit::Table::new());
    }
    doc[section][field] = toml_edit::value(parse_scalar(raw));

    let updated = doc.to_string();
    toml::from_str::<Config>(&updated).map_err(|e| ConfigError::InvalidValue {
        key: key.to_string(),
        reason: e.message().to_string(),
    })?;
    write_text(path, &updated)
}

/// Interpret a command-line value as a TOML bool, integer, or string.
fn parse_scalar(raw: &str) -> toml_edit::Value {
    if let Ok(b) = raw.parse::<bool>() {
        return b.into();
    }
    if let Ok(n) = raw.parse::<i64>() {
        return n.into();
    }
    raw.into()
}

fn write_text(path: &Path, text: &str) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| ConfigError::WriteError {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }
    fs::write(path, text).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}
