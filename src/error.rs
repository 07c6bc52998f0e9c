use std::io;
use thiserror::Error;

/// Custom error type for hostwatch
#[derive(Error, Debug)]
pub enum HostwatchError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Delivery failed: {0}")]
    Delivery(String),

    #[error("Command failed: {0}")]
    Command(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for hostwatch
pub type Result<T> = std::result::Result<T, HostwatchError>;

impl HostwatchError {
    /// Create a config error
    pub fn config<S: Into<String>>(msg: S) -> Self {
        HostwatchError::Config(msg.into())
    }

    /// Create a delivery error
    pub fn delivery<S: Into<String>>(msg: S) -> Self {
        HostwatchError::Delivery(msg.into())
    }

    pub fn command<S: Into<String>>(msg: S) -> Self {
        HostwatchError::Command(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        HostwatchError::Other(msg.into())
    }
}
