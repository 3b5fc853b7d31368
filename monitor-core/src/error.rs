//! Error types for the monitor

use thiserror::Error;

/// Monitor-wide error type
#[derive(Error, Debug)]
pub enum MonitorError {
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Shape error: {0}")]
    Shape(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl MonitorError {
    pub fn transport(msg: impl Into<String>) -> Self {
        MonitorError::Transport(msg.into())
    }

    pub fn parse(msg: impl Into<String>) -> Self {
        MonitorError::Parse(msg.into())
    }

    pub fn shape(msg: impl Into<String>) -> Self {
        MonitorError::Shape(msg.into())
    }

    pub fn config(msg: impl Into<String>) -> Self {
        MonitorError::Config(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        MonitorError::Internal(msg.into())
    }
}

/// Result type alias for monitor operations
pub type MonitorResult<T> = Result<T, MonitorError>;
