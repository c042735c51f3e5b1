use std::path::PathBuf;

use thiserror::Error;

/// Failures that end an import run early.
///
/// None of these abort the process: the bootstrap reports them and exits
/// normally. Per-word insert failures are counted, not raised.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("Unsupported file format: {}. Please use .json or .txt", .0.display())]
    UnsupportedFormat(PathBuf),
    #[error("File {} not found", .0.display())]
    FileNotFound(PathBuf),
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode JSON from {}: {source}", path.display())]
    InvalidJson {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Error connecting to MongoDB: {0}")]
    Connect(String),
    #[error("No words found to import. Please check the input format (data type: {kind}, preview: {preview})")]
    NoWords { kind: &'static str, preview: String },
}

impl ImportError {
    pub fn connect(err: impl std::fmt::Display) -> Self {
        ImportError::Connect(err.to_string())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "MONGODB_URI not found in environment variables. Please ensure .env or .env.local exists and contains MONGODB_URI"
    )]
    MissingConnectionString,
    #[error("config path {} does not exist", .0.display())]
    MissingFile(PathBuf),
    #[error("failed to read config file at {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config file at {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}
