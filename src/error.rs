//! Error types for pagewalk
//!
//! This module defines the error hierarchy for the crate.
//! Most public APIs return `Result<T, Error>` where Error is defined here.
//! The page iterator is the exception: it is generic over the invoker's
//! error type and reports failures through [`PageFailure`], which keeps the
//! invoker's error value untouched.

use std::fmt;
use thiserror::Error;

/// The main error type for pagewalk
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing required config field: {field}")]
    MissingConfigField { field: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Response Errors
    // ============================================================================
    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Invalid output selector '{selector}': {message}")]
    Selector { selector: String, message: String },

    // ============================================================================
    // State Errors
    // ============================================================================
    #[error("State error: {message}")]
    State { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Pagination Errors
    // ============================================================================
    #[error("page {page} failed after {pages_emitted} delivered page(s): {error}")]
    PageFailed {
        error: Box<Error>,
        page: usize,
        pages_emitted: usize,
    },
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing field error
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingConfigField {
            field: field.into(),
        }
    }

    /// Create an invalid value error
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

    /// Create a selector error
    pub fn selector(selector: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Selector {
            selector: selector.into(),
            message: message.into(),
        }
    }

    /// Create a state error
    pub fn state(message: impl Into<String>) -> Self {
        Self::State {
            message: message.into(),
        }
    }
}

/// Result type alias for pagewalk
pub type Result<T> = std::result::Result<T, Error>;

// ============================================================================
// Page Failure
// ============================================================================

/// Terminal failure of a page iteration run
///
/// Carries the invoker's error exactly as it was returned. A failed run
/// produces no result, so callers count it as zero completed pages.
/// `pages_emitted` only records the side effects already made: the pages
/// handed to the sink before the failing call, which are not rolled back.
#[derive(Debug)]
pub struct PageFailure<E> {
    /// The error returned by the operation invoker
    pub source: E,
    /// 1-based number of the page whose request failed
    pub page: usize,
    /// Pages delivered to the sink before the failure
    pub pages_emitted: usize,
}

impl<E> PageFailure<E> {
    /// Create a new page failure
    pub fn new(source: E, page: usize, pages_emitted: usize) -> Self {
        Self {
            source,
            page,
            pages_emitted,
        }
    }

    /// Borrow the invoker's error
    pub fn error(&self) -> &E {
        &self.source
    }

    /// Take the invoker's error
    pub fn into_inner(self) -> E {
        self.source
    }

    /// Whether the failure happened on the first page of the run
    pub fn is_first_page(&self) -> bool {
        self.page == 1
    }
}

impl<E: fmt::Display> fmt::Display for PageFailure<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "page {} failed after {} delivered page(s): {}",
            self.page, self.pages_emitted, self.source
        )
    }
}

impl<E> std::error::Error for PageFailure<E>
where
    E: std::error::Error + 'static,
{
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<PageFailure<Error>> for Error {
    fn from(failure: PageFailure<Error>) -> Self {
        Error::PageFailed {
            error: Box::new(failure.source),
            page: failure.page,
            pages_emitted: failure.pages_emitted,
        }
    }
}
