//! Error types for feed-cursor
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use crate::feed::Category;
use thiserror::Error;

/// The main error type for feed-cursor
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Feed Host Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Malformed feed page: {message}")]
    Decode { message: String },

    // ============================================================================
    // Navigation Errors
    // ============================================================================
    #[error("Failed to fetch page {page} of '{category}': {source}")]
    Fetch {
        category: Category,
        page: u32,
        #[source]
        source: Box<Error>,
    },

    #[error("can't show previous")]
    NoPreviousItem,

    #[error("Feed '{category}' returned {pages} empty page(s) starting at page {first_page}")]
    EmptyFeed {
        category: Category,
        first_page: u32,
        pages: u32,
    },

    /// Raised by custom [`crate::Fetcher`] implementations
    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid config value error
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidConfigValue {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Wrap a fetcher error with the category and page it was fetching
    pub fn fetch(category: Category, page: u32, source: Error) -> Self {
        Self::Fetch {
            category,
            page,
            source: Box::new(source),
        }
    }

    /// Whether asking again for the same page may succeed.
    ///
    /// The HTTP client retries exactly these errors before giving up, so a
    /// failure surfaced to the caller is retryable when the client ran out
    /// of attempts rather than hitting a permanent error.
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_) | Error::Timeout { .. } => true,
            Error::HttpStatus { status, .. } => is_transient_status(*status),
            Error::Fetch { source, .. } => source.is_retryable(),
            Error::EmptyFeed { .. } => true,
            _ => false,
        }
    }
}

/// Statuses the feed host uses for overload and gateway trouble
pub(crate) fn is_transient_status(status: u16) -> bool {
    matches!(status, 408 | 429 | 500 | 502 | 503 | 504 | 520..=524)
}

/// Result type alias for feed-cursor
pub type Result<T> = std::result::Result<T, Error>;
