use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ChansplitError {
    #[error("No .json backup file found in: {path}")]
    BackupNotFound { path: PathBuf },

    #[error("Backup directory does not exist: {path}")]
    DataDirNotFound { path: PathBuf },

    #[error("Failed to parse backup {path}: {message}")]
    BackupParse { path: PathBuf, message: String },

    #[error("Failed to parse config {path}: {message}")]
    ConfigParse { path: PathBuf, message: String },

    #[error("Unknown config key: {key}")]
    ConfigKeyNotFound { key: String },

    #[error("Invalid config value for {key}: '{value}'")]
    ConfigInvalidValue { key: String, value: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML serialization error: {0}")]
    TomlSer(#[from] toml::ser::Error),
}

pub type Result<T> = std::result::Result<T, ChansplitError>;

impl ChansplitError {
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::BackupNotFound { .. } => 2,
            Self::DataDirNotFound { .. } => 3,
            Self::BackupParse { .. } => 4,
            Self::ConfigKeyNotFound { .. } | Self::ConfigInvalidValue { .. } => 5,
            _ => 1,
        }
    }
}
