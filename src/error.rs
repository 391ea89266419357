//! Error types for tap-yandex-direct
//!
//! This module defines the error hierarchy for the entire tap.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! The vendor-facing taxonomy has three classes: fatal API errors (vendor
//! error payload or client-side request problem, never retried), the
//! retriable report-pending condition (offline report generation), and
//! decode errors (body unparseable in the expected format).

use thiserror::Error;

/// The main error type for tap-yandex-direct
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
    // Vendor API Errors
    // ============================================================================
    #[error("Fatal API error: {message}")]
    FatalApi { message: String },

    #[error("Report not ready: {message}")]
    ReportPending { message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Rate limited, retry after {retry_after_seconds}s")]
    RateLimited { retry_after_seconds: u64 },

    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Max retries ({max_retries}) exceeded")]
    MaxRetriesExceeded { max_retries: u32 },

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Data Processing Errors
    // ============================================================================
    #[error("Failed to extract records from path '{path}': {message}")]
    RecordExtraction { path: String, message: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    // ============================================================================
    // Stream Errors
    // ============================================================================
    #[error("Stream '{stream}' not found")]
    StreamNotFound { stream: String },

    #[error("Record in stream '{stream}' is missing primary key field '{field}'")]
    MissingPrimaryKey { stream: String, field: String },

    #[error("Context error for stream '{stream}': {message}")]
    Context { stream: String, message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("File not found: {path}")]
    FileNotFound { path: String },

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
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

    /// Create a fatal API error from vendor error detail text
    pub fn fatal_api(message: impl Into<String>) -> Self {
        Self::FatalApi {
            message: message.into(),
        }
    }

    /// Create a retriable report-pending error
    pub fn report_pending(message: impl Into<String>) -> Self {
        Self::ReportPending {
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

    /// Create a record extraction error
    pub fn record_extraction(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::RecordExtraction {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a context error
    pub fn context_error(stream: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Context {
            stream: stream.into(),
            message: message.into(),
        }
    }

    /// Create a missing primary key error
    pub fn missing_primary_key(stream: impl Into<String>, field: impl Into<String>) -> Self {
        Self::MissingPrimaryKey {
            stream: stream.into(),
            field: field.into(),
        }
    }

    /// Check if this error is retryable
    pub fn is_retryable(&self) -> bool {
        match self {
            Error::Http(_)
            | Error::RateLimited { .. }
            | Error::Timeout { .. }
            | Error::ReportPending { .. } => true,
            Error::HttpStatus { status, .. } => is_retryable_status(*status),
            _ => false,
        }
    }

    /// Check if this is a vendor-reported fatal error
    pub fn is_fatal_api(&self) -> bool {
        matches!(self, Error::FatalApi { .. })
    }
}

/// Check if an HTTP status code is retryable
fn is_retryable_status(status: u16) -> bool {
    matches!(status, 429 | 500 | 502 | 503 | 504)
}

/// Result type alias for tap-yandex-direct
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
