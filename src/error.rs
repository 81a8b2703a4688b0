//! Error types for the upload flow and the JSON API helper.
//!
//! The `Display` strings double as the user-visible notification texts.

use thiserror::Error;

/// Why a candidate file was refused before staging.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please select a valid file type (TXT, CSV, or JSON)")]
    UnsupportedType { name: String, mime: String },
    #[error("File size must be less than 16MB")]
    TooLarge { size: u64, limit: u64 },
}

/// Failures between issuing the upload request and having a usable body.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransportError {
    #[error("network error: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
    #[error("malformed response body: {0}")]
    MalformedBody(String),
    #[error("request timed out after {0} ms")]
    TimedOut(u32),
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UploadError {
    #[error("Upload failed: {0}")]
    Transport(#[from] TransportError),
    /// Message reported by the backend in its `error` field, shown verbatim.
    #[error("{0}")]
    Backend(String),
}

impl UploadError {
    /// Text shown to the user for this failure.
    pub fn user_message(&self) -> String {
        match self {
            UploadError::Transport(_) => GENERIC_UPLOAD_FAILURE.to_string(),
            other => other.to_string(),
        }
    }
}

pub const GENERIC_UPLOAD_FAILURE: &str = "Upload failed. Please try again.";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    #[error("network error while fetching {endpoint}: {reason}")]
    Network { endpoint: String, reason: String },
    #[error("{endpoint} responded with status {status}")]
    Status { endpoint: String, status: u16 },
    #[error("could not decode {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}
