//! Browser frontend core for the finance dashboard.
//!
//! Everything in this library runs headless: the upload flow controller,
//! file validation, result interpretation and the JSON API helper. The Yew
//! binary binds these to the page.

pub mod api;
pub mod cache;
pub mod config;
pub mod controller;
pub mod error;
pub mod notify;
pub mod options;
pub mod progress;
pub mod stats;
pub mod transport;
pub mod utils;
pub mod validation;

pub use api::{ApiClient, CategoryChart, RequestGeneration, SpendingChart, SpendingPeriod};
pub use config::Config;
pub use controller::{Selection, SubmitOutcome, Subscription, UploadController, UploadSnapshot, UploadState};
pub use error::{ApiError, TransportError, UploadError, ValidationError};
pub use notify::{NotificationSink, Severity};
pub use options::{ProcessingOption, ProcessingOptions};
pub use stats::{UploadResponse, UploadSummary};
pub use transport::{HttpTransport, StagedFile, UploadForm, UploadTransport};
pub use validation::{validate, FileInfo};
