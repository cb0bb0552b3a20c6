//! Configuration errors

use crate::types::ParseLevelError;

/// Errors that can occur while loading logger configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid level: {0}")]
    InvalidLevel(#[from] ParseLevelError),
}

pub type ConfigResult<T> = Result<T, ConfigError>;
