//! Error handling for the mobprog client

use std::fmt;
use thiserror::Error;

/// Unified error type for the mobprog client
#[derive(Error, Debug)]
pub enum Error {
    /// Network or HTTP related errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing errors
    #[error("URL error: {0}")]
    Url(#[from] url::ParseError),

    /// Session file errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Error reported by the auth service, message as the service sent it
    #[error("{0}")]
    Auth(String),

    /// Error reported by the database service, message as the service sent it
    #[error("{0}")]
    Database(String),

    /// Missing or invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// General errors
    #[error("{0}")]
    General(String),
}

impl Error {
    /// Create a new authentication error
    pub fn auth<T: fmt::Display>(msg: T) -> Self {
        Error::Auth(msg.to_string())
    }

    /// Create a new database error
    pub fn database<T: fmt::Display>(msg: T) -> Self {
        Error::Database(msg.to_string())
    }

    /// Create a new configuration error
    pub fn config<T: fmt::Display>(msg: T) -> Self {
        Error::Config(msg.to_string())
    }

    /// Create a new general error
    pub fn general<T: fmt::Display>(msg: T) -> Self {
        Error::General(msg.to_string())
    }

    /// Whether the backend itself reported this error.
    ///
    /// Reported errors are shown to the user verbatim; everything else is
    /// an unexpected failure of the transport or of decoding.
    pub fn is_reported(&self) -> bool {
        matches!(self, Error::Auth(_) | Error::Database(_))
    }
}

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
