use std::path::PathBuf;
use std::result;

use crate::retry::RetryableError;
use thiserror::Error;

/// Error types for Entrez client operations
#[derive(Error, Debug)]
pub enum EntrezError {
    /// Required configuration variable is missing
    #[error("missing configuration variable: {variable}")]
    MissingConfiguration { variable: String },

    /// Target directory for a saved response is missing or unwritable
    #[error("output directory '{}' is not usable: {message}", path.display())]
    InvalidOutputDirectory { path: PathBuf, message: String },

    /// A supplied value is outside its enumerated domain or numeric ceiling
    #[error("invalid value for parameter '{parameter}': '{value}'")]
    InvalidParameter {
        parameter: &'static str,
        value: String,
    },

    /// Requested output format is not in the supported set
    #[error("unsupported output format: '{value}' (expected 'xml' or 'json')")]
    UnsupportedFormat { value: String },

    /// Request is structurally incomplete (e.g. fetch without ids or session)
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// Non-2xx HTTP status or in-band NCBI error
    #[error("API error {status}: {message}")]
    ApiError { status: u16, message: String },

    /// JSON parsing failed
    #[error("JSON parsing failed: {0}")]
    JsonError(#[from] serde_json::Error),

    /// IO error for file operations
    #[error("IO error: {message}")]
    IoError { message: String },

    /// Bulk retrieval aborted after exhausting retries for one page
    #[error("bulk fetch aborted at offset {offset}: {source}")]
    BulkFetchFailed {
        offset: usize,
        #[source]
        source: Box<EntrezError>,
    },

    /// Bulk retrieval cancelled between pages
    #[error("bulk fetch cancelled at offset {offset}")]
    BulkFetchCancelled { offset: usize },
}

pub type Result<T> = result::Result<T, EntrezError>;

impl From<std::io::Error> for EntrezError {
    fn from(err: std::io::Error) -> Self {
        EntrezError::IoError {
            message: err.to_string(),
        }
    }
}

impl RetryableError for EntrezError {
    fn is_retryable(&self) -> bool {
        match self {
            // Network errors are typically transient
            EntrezError::RequestError(err) => {
                if err.is_timeout() || err.is_connect() {
                    return true;
                }

                // Check for server errors (5xx) and throttling
                if let Some(status) = err.status() {
                    return status.is_server_error() || status.as_u16() == 429;
                }

                // DNS and other network errors
                !err.is_builder() && !err.is_redirect() && !err.is_decode()
            }

            // Server errors (5xx) and rate limiting (429) are retryable
            EntrezError::ApiError { status, .. } => {
                (*status >= 500 && *status < 600) || *status == 429
            }

            // Validation, parsing, configuration, and IO errors are final
            EntrezError::MissingConfiguration { .. }
            | EntrezError::InvalidOutputDirectory { .. }
            | EntrezError::InvalidParameter { .. }
            | EntrezError::UnsupportedFormat { .. }
            | EntrezError::InvalidRequest(_)
            | EntrezError::JsonError(_)
            | EntrezError::IoError { .. }
            | EntrezError::BulkFetchFailed { .. }
            | EntrezError::BulkFetchCancelled { .. } => false,
        }
    }
}
