//! Application-level configuration constants.

// Upload limits
pub const MAX_FILE_BYTES: u64 = 16 * 1024 * 1024;
pub const ALLOWED_MIME_TYPES: [&str; 3] = ["text/plain", "text/csv", "application/json"];

// Progress animation
pub const PROGRESS_TICK_MS: u32 = 200;
pub const PROGRESS_MAX_STEP: f64 = 15.0;
pub const PROGRESS_CAP: f64 = 95.0;

// Display-only estimates derived from the processed count
pub const CATEGORIZED_RATIO: f64 = 0.8;
pub const MERCHANT_RATIO: f64 = 0.6;
pub const PLACEHOLDER_CONFIDENCE: &str = "85%";

// Network
pub const DEFAULT_API_BASE: &str = "";
pub const UPLOAD_ENDPOINT: &str = "upload";
pub const REQUEST_TIMEOUT_MS: u32 = 60_000;

// UI behavior
pub const TOAST_DURATION_MS: u32 = 4_000;

/// Runtime configuration handed to the controller and the API client.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Prefix for every backend path, without trailing slash. Empty means same origin.
    pub api_base: String,
    pub upload_endpoint: String,
    pub request_timeout_ms: u32,
    pub progress_tick_ms: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base: option_env!("FINANCE_API_BASE")
                .unwrap_or(DEFAULT_API_BASE)
                .trim_end_matches('/')
                .to_string(),
            upload_endpoint: UPLOAD_ENDPOINT.to_string(),
            request_timeout_ms: REQUEST_TIMEOUT_MS,
            progress_tick_ms: PROGRESS_TICK_MS,
        }
    }
}

impl Config {
    pub fn with_api_base(mut self, base: &str) -> Self {
        self.api_base = base.trim_end_matches('/').to_string();
        self
    }

    /// Join `endpoint` onto the API base.
    pub fn url(&self, endpoint: &str) -> String {
        format!("{}/{}", self.api_base, endpoint.trim_start_matches('/'))
    }

    pub fn upload_url(&self) -> String {
        self.url(&self.upload_endpoint)
    }
}
