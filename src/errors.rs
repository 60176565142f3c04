use thiserror::Error;

use crate::projection::ProjectionError;

// Create a type alias for Result using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the analytics core
#[derive(Error, Debug)]
pub enum Error {
    #[error("Projection failed: {0}")]
    Projection(#[from] ProjectionError),

    #[error("Configuration store failed: {0}")]
    Config(#[from] ConfigError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access configuration store: {0}")]
    Io(String),

    #[error("Invalid configuration value for '{0}'")]
    InvalidValue(String),

    #[error("Missing configuration key: {0}")]
    MissingKey(String),

    #[error("Configuration cache error: {0}")]
    CacheError(String),
}

#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Required field '{0}' is missing")]
    MissingField(String),
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Validation(ValidationError::InvalidInput(err.to_string()))
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Config(ConfigError::Io(err.to_string()))
    }
}
