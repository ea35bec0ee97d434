//! Error type definitions
//!
//! Defines the main error types used throughout the clip pipeline and server.

use std::time::Duration;
use thiserror::Error;

/// Main error type for clipcast
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// HTTP server errors
    #[error("Server error: {0}")]
    Server(String),

    /// Bearer token acquisition failed after exhausting retries
    #[error("Authentication error: {0}")]
    Auth(String),

    /// Non-success response or transport failure while paginating the clips API
    #[error("Fetch error: {0}")]
    Fetch(String),

    /// Non-success response fetching a clip's video asset
    #[error("Download error: {0}")]
    Download(String),

    /// Messaging send failure that is not a rate limit
    #[error("Send error: {0}")]
    Send(String),

    /// Distinguished rate-limit signal from the messaging channel
    #[error("Rate limited, retry after {}s", retry_after.as_secs())]
    RateLimited {
        /// How long the channel asked us to wait before retrying
        retry_after: Duration,
    },

    /// Clip store errors
    #[error("Store error: {0}")]
    Store(#[from] rusqlite::Error),

    /// Blocking task join errors (store calls run on the blocking pool)
    #[error("Task error: {0}")]
    Task(#[from] tokio::task::JoinError),

    /// Generic errors
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Create a new configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a new server error
    pub fn server(msg: impl Into<String>) -> Self {
        Self::Server(msg.into())
    }

    /// Create a new authentication error
    pub fn auth(msg: impl Into<String>) -> Self {
        Self::Auth(msg.into())
    }

    /// Create a new fetch error
    pub fn fetch(msg: impl Into<String>) -> Self {
        Self::Fetch(msg.into())
    }

    /// Create a new download error
    pub fn download(msg: impl Into<String>) -> Self {
        Self::Download(msg.into())
    }

    /// Create a new send error
    pub fn send(msg: impl Into<String>) -> Self {
        Self::Send(msg.into())
    }

    /// Create a rate-limit error from a wait duration in seconds
    pub fn rate_limited(retry_after_secs: u64) -> Self {
        Self::RateLimited {
            retry_after: Duration::from_secs(retry_after_secs),
        }
    }

    /// Create a new internal error
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether this error is the distinguished rate-limit signal
    pub fn is_rate_limited(&self) -> bool {
        matches!(self, Self::RateLimited { .. })
    }
}
