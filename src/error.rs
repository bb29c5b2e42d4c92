use std::io;
use thiserror::Error;

/// Error type for the nagkit library
#[derive(Error, Debug)]
pub enum NagkitError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid range specifier: {0}")]
    InvalidRange(String),

    #[error("Invalid metric: {0}")]
    InvalidMetric(String),

    #[error("Invalid performance data: {0}")]
    InvalidPerfData(String),

    #[error("Probe failed: {0}")]
    Probe(String),

    #[error("State store error: {0}")]
    StateStore(String),

    #[error("{0}")]
    Other(String),
}

/// Result type alias for nagkit
pub type Result<T> = std::result::Result<T, NagkitError>;

impl NagkitError {
    /// Create an invalid range error
    pub fn invalid_range<S: Into<String>>(msg: S) -> Self {
        NagkitError::InvalidRange(msg.into())
    }

    /// Create an invalid metric error
    pub fn invalid_metric<S: Into<String>>(msg: S) -> Self {
        NagkitError::InvalidMetric(msg.into())
    }

    /// Create an invalid performance data error
    pub fn invalid_perfdata<S: Into<String>>(msg: S) -> Self {
        NagkitError::InvalidPerfData(msg.into())
    }

    /// Create a probe error
    pub fn probe<S: Into<String>>(msg: S) -> Self {
        NagkitError::Probe(msg.into())
    }

    pub fn state_store<S: Into<String>>(msg: S) -> Self {
        NagkitError::StateStore(msg.into())
    }

    /// Create a generic error
    pub fn other<S: Into<String>>(msg: S) -> Self {
        NagkitError::Other(msg.into())
    }
}
