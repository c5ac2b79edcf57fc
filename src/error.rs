// src/error.rs

//! Unified error handling for the status bot.

use std::fmt;

use thiserror::Error;

/// Result type alias for bot operations.
pub type Result<T> = std::result::Result<T, AppError>;

/// Unified application error type.
#[derive(Error, Debug)]
pub enum AppError {
    /// I/O operation failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization/deserialization failed
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing failed
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// URL parsing failed
    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),

    /// RSS document could not be read
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// A timestamp matched none of the known formats
    #[error("Malformed timestamp: '{raw}'")]
    MalformedTimestamp { raw: String },

    /// The status page declared no zone, or one chrono-tz does not know
    #[error("Unknown timezone: {0}")]
    UnknownTimezone(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Feed content error
    #[error("Feed error: {0}")]
    Feed(String),

    /// Translation service error
    #[error("Translation error: {0}")]
    Translation(String),

    /// Chat platform rejected a message
    #[error("Transport error: {0}")]
    Transport(#[from] TransportError),
}

/// Failure reported by a chat transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TransportError {
    /// The platform refused the message because of its size
    #[error("message too large")]
    TooLarge,

    /// Any other delivery failure
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Create a malformed timestamp error.
    pub fn malformed_timestamp(raw: impl Into<String>) -> Self {
        Self::MalformedTimestamp { raw: raw.into() }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a feed error.
    pub fn feed(message: impl fmt::Display) -> Self {
        Self::Feed(message.to_string())
    }

    /// Create a translation error.
    pub fn translation(message: impl fmt::Display) -> Self {
        Self::Translation(message.to_string())
    }

    /// True when the chat platform rejected a frame for its size.
    pub fn is_too_large(&self) -> bool {
        matches!(self, Self::Transport(TransportError::TooLarge))
    }
}
