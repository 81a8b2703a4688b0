//! Client-side checks applied to a file before it can be staged.

use crate::config::{ALLOWED_MIME_TYPES, MAX_FILE_BYTES};
use crate::error::ValidationError;
use once_cell::sync::Lazy;
use regex::Regex;

// MIME types are unreliable across browsers, so the extension is a fallback.
static ALLOWED_EXTENSION_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)\.(txt|csv|json)$").unwrap());

/// Metadata of a file offered for upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub name: String,
    pub size: u64,
    /// Declared MIME type; browsers report an empty string when unknown.
    pub mime: String,
}

impl FileInfo {
    pub fn new(name: impl Into<String>, size: u64, mime: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            mime: mime.into(),
        }
    }
}

pub fn has_allowed_type(info: &FileInfo) -> bool {
    ALLOWED_MIME_TYPES
        .iter()
        .any(|allowed| info.mime.eq_ignore_ascii_case(allowed))
        || ALLOWED_EXTENSION_REGEX.is_match(&info.name)
}

/// Accept or reject a candidate file.
///
/// Both checks run; the type check is reported first when both fail.
pub fn validate(info: &FileInfo) -> Result<(), ValidationError> {
    let type_ok = has_allowed_type(info);
    let size_ok = info.size <= MAX_FILE_BYTES;

    if !type_ok {
        return Err(ValidationError::UnsupportedType {
            name: info.name.clone(),
            mime: info.mime.clone(),
        });
    }
    if !size_ok {
        return Err(ValidationError::TooLarge {
            size: info.size,
            limit: MAX_FILE_BYTES,
        });
    }
    Ok(())
}
