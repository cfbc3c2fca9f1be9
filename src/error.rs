//! Error types for bookshelf
//!
//! All modules use `BookshelfResult<T>` as their return type.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for bookshelf operations
pub type BookshelfResult<T> = Result<T, BookshelfError>;

/// All errors that can occur in bookshelf
#[derive(Error, Debug)]
pub enum BookshelfError {
    // Configuration errors
    #[error("Invalid configuration at {path}: {reason}")]
    ConfigInvalid { path: PathBuf, reason: String },

    #[error("Failed to create config directory {path}: {source}")]
    ConfigDirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Authentication errors
    #[error("Not signed in")]
    NotAuthenticated,

    #[error("Login failed: {0}")]
    Login(String),

    // Credential storage errors
    #[error("Credential store error: {0}")]
    Storage(String),

    // Remote API errors
    #[error("HTTP request to {url} failed: {reason}")]
    Transport { url: String, reason: String },

    #[error("API returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Unexpected response from {url}: {reason}")]
    Decode { url: String, reason: String },

    // IO errors
    #[error("IO error: {context}")]
    Io {
        context: String,
        #[source]
        source: std::io::Error,
    },

    // Serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    // General errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("{0}")]
    User(String),
}

impl BookshelfError {
    /// Create an IO error with context
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            context: context.into(),
            source,
        }
    }

    /// Create a transport error for a request URL
    pub fn transport(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Transport {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Create a decode error for a response URL
    pub fn decode(url: impl Into<String>, reason: impl std::fmt::Display) -> Self {
        Self::Decode {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Check if error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Self::Transport { .. } => true,
            Self::Api { status, .. } => *status >= 500,
            _ => false,
        }
    }

    /// Get actionable hint for the error
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::NotAuthenticated => Some("Run: bookshelf login"),
            Self::Api { status: 401, .. } => Some("Session rejected by the server. Run: bookshelf login"),
            Self::Transport { .. } => Some("Check api.base_url with: bookshelf config show"),
            Self::ConfigInvalid { .. } => Some("Reset with: bookshelf config init --force"),
            _ if self.is_retryable() => {
                Some("The server failed to respond, try again shortly")
            }
            _ => None,
        }
    }
}
