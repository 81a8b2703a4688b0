//! Interpretation of the upload endpoint's JSON answer.
//!
//! The backend only reports a human readable message such as
//! `"Successfully processed 42 transactions"`. When it does not send a
//! structured `stats` object, the summary figures are client-side estimates
//! derived from the count in that message and are flagged as such.

use crate::config::{CATEGORIZED_RATIO, MERCHANT_RATIO, PLACEHOLDER_CONFIDENCE};
use crate::error::{TransportError, UploadError};
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};

static TRANSACTION_COUNT_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(\d+)\s+transactions").unwrap());

/// Raw body of `POST /upload`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct UploadResponse {
    #[serde(default)]
    pub success: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
    /// Dropped when present but not in the expected shape.
    #[serde(default, deserialize_with = "lenient_stats")]
    pub stats: Option<BackendStats>,
}

fn lenient_stats<'de, D>(deserializer: D) -> Result<Option<BackendStats>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw.and_then(|value| match serde_json::from_value(value) {
        Ok(stats) => Some(stats),
        Err(e) => {
            debug!("Ignoring unrecognised upload stats: {}", e);
            None
        }
    }))
}

impl UploadResponse {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            success: Some(message.into()),
            ..Self::default()
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            error: Some(message.into()),
            ..Self::default()
        }
    }
}

/// Structured figures, when the backend provides them.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct BackendStats {
    pub processed: u32,
    #[serde(default)]
    pub categorized: Option<u32>,
    #[serde(default)]
    pub merchants: Option<u32>,
    #[serde(default)]
    pub confidence: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UploadSummary {
    pub message: String,
    pub processed: u32,
    pub categorized: u32,
    pub merchants: u32,
    pub confidence: String,
    /// True when the figures were guessed from the message text.
    pub estimated: bool,
}

/// Pull `N` out of `"... N transactions ..."`.
pub fn parse_transaction_count(message: &str) -> Option<u32> {
    TRANSACTION_COUNT_REGEX
        .captures(message)
        .and_then(|caps| caps[1].parse().ok())
}

impl UploadSummary {
    pub fn estimate_from_message(message: &str) -> Self {
        let processed = parse_transaction_count(message).unwrap_or_else(|| {
            debug!("No transaction count in success message: {:?}", message);
            0
        });
        Self {
            message: message.to_string(),
            processed,
            categorized: (processed as f64 * CATEGORIZED_RATIO).floor() as u32,
            merchants: (processed as f64 * MERCHANT_RATIO).floor() as u32,
            confidence: PLACEHOLDER_CONFIDENCE.to_string(),
            estimated: true,
        }
    }

    pub fn from_backend(message: &str, stats: &BackendStats) -> Self {
        let estimate = Self::estimate_from_message(message);
        Self {
            message: message.to_string(),
            processed: stats.processed,
            categorized: stats.categorized.unwrap_or(estimate.categorized),
            merchants: stats.merchants.unwrap_or(estimate.merchants),
            confidence: stats
                .confidence
                .clone()
                .unwrap_or_else(|| PLACEHOLDER_CONFIDENCE.to_string()),
            estimated: false,
        }
    }
}

/// Turn a decoded body into a summary or the failure it reports.
///
/// An `error` field wins over `success`; a body with neither is malformed.
pub fn interpret_response(response: UploadResponse) -> Result<UploadSummary, UploadError> {
    if let Some(error) = response.error {
        return Err(UploadError::Backend(error));
    }
    match (response.success, response.stats) {
        (Some(message), Some(stats)) => Ok(UploadSummary::from_backend(&message, &stats)),
        (Some(message), None) => Ok(UploadSummary::estimate_from_message(&message)),
        (None, _) => Err(TransportError::MalformedBody(
            "neither `success` nor `error` present".to_string(),
        )
        .into()),
    }
}
