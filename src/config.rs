use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::Deserialize;

use crate::error::ConfigError;

pub const CONNECTION_ENV_VAR: &str = "MONGODB_URI";

const ENV_FILES: [&str; 2] = [".env", ".env.local"];

#[derive(Debug, Clone)]
pub struct Config {
    pub mongodb_uri: String,
}

#[derive(Debug, Default, Deserialize)]
struct FileConfig {
    mongodb_uri: Option<String>,
}

#[derive(Debug, Default, Clone)]
pub struct ConfigOverrides {
    pub mongodb_uri: Option<String>,
}

impl Config {
    pub fn load(
        config_path: Option<PathBuf>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let file_config = load_file_config(config_path.as_ref())?;

        let mongodb_uri = resolve_uri(
            overrides.mongodb_uri,
            file_config.mongodb_uri,
            env::var(CONNECTION_ENV_VAR).ok(),
        )
        .ok_or(ConfigError::MissingConnectionString)?;

        Ok(Self { mongodb_uri })
    }
}

/// Loads `.env` then `.env.local` from the working directory. Variables that
/// are already set in the process win over file values.
pub fn load_env_files() {
    for name in ENV_FILES {
        match dotenvy::from_filename(name) {
            Ok(path) => tracing::debug!("Loaded environment from {}", path.display()),
            Err(err) if err.not_found() => {}
            Err(err) => tracing::warn!("Ignoring {}: {}", name, err),
        }
    }
}

fn resolve_uri(
    from_cli: Option<String>,
    from_file: Option<String>,
    from_env: Option<String>,
) -> Option<String> {
    [from_cli, from_file, from_env]
        .into_iter()
        .flatten()
        .map(|uri| uri.trim().to_string())
        .find(|uri| !uri.is_empty())
}

fn load_file_config(path: Option<&PathBuf>) -> Result<FileConfig, ConfigError> {
    if let Some(path) = path {
        if path.exists() {
            return read_config_from_path(path);
        }
        return Err(ConfigError::MissingFile(path.clone()));
    }

    if let Some(default_path) = default_config_path() {
        if default_path.exists() {
            return read_config_from_path(&default_path);
        }
    }

    Ok(FileConfig::default())
}

fn read_config_from_path(path: &Path) -> Result<FileConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str(&raw).map_err(|source| ConfigError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

fn default_config_path() -> Option<PathBuf> {
    ProjectDirs::from("com", "blacklist-import", "blacklist-import")
        .map(|dirs| dirs.config_dir().join("config.toml"))
}
