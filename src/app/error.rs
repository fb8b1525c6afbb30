use thiserror::Error;

use crate::config::ConfigError;

#[derive(Error, Debug)]
pub enum PublicoError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Request to {url} failed: {status} {reason}")]
    Status {
        status: u16,
        reason: String,
        url: String,
    },

    #[error("Request cancelled")]
    Cancelled,

    #[error("Invalid JSON payload: {0}")]
    Decode(String),

    #[error("Article ID is required")]
    MissingArticleId,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Other(String),
}

impl PublicoError {
    /// Cancellation is an expected outcome, never a user-visible failure.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, PublicoError::Cancelled)
    }
}

pub type Result<T> = std::result::Result<T, PublicoError>;
