use std::io;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("tool host error: {0}")]
    ToolHost(String),
    #[error(transparent)]
    Io(#[from] io::Error),
}

impl AppError {
    /// The message without its category prefix, for replies shown in chat.
    pub fn detail(&self) -> String {
        match self {
            AppError::Configuration(message)
            | AppError::InvalidInput(message)
            | AppError::ToolHost(message) => message.clone(),
            AppError::Io(err) => err.to_string(),
        }
    }
}

pub type AppResult<T> = Result<T, AppError>;

/// Failures while talking to the tool host. Callers of [`crate::adapter::ToolAdapter`]
/// only ever see these flattened into an `"Error: ..."` string.
#[derive(Debug, Error)]
pub enum AdapterError {
    #[error("failed to start tool host '{command}': {reason}")]
    Spawn { command: String, reason: String },
    #[error("handshake with tool host failed: {0}")]
    Handshake(String),
    #[error("tool host connection failed: {0}")]
    Transport(String),
    #[error("malformed response from tool host: {0}")]
    Protocol(String),
    #[error("tool host returned error {code}: {message}")]
    Remote { code: i64, message: String },
    #[error("{0}")]
    ToolFailed(String),
    #[error("tool host did not answer within {0:?}")]
    Timeout(Duration),
    #[error("failed to run tool call: {0}")]
    Runtime(String),
}

impl From<io::Error> for AdapterError {
    fn from(err: io::Error) -> Self {
        AdapterError::Transport(err.to_string())
    }
}

pub type AdapterResult<T> = Result<T, AdapterError>;
