//! JSON helper for the dashboard's read-only endpoints.
//!
//! Any failure is shown to the user through the notification sink and then
//! handed back to the caller, which decides what to render instead.

use crate::cache;
use crate::config::Config;
use crate::error::ApiError;
use crate::notify::{NotificationSink, Severity};
use gloo_net::http::Request;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::cell::Cell;
use std::rc::Rc;

/// Window offered by `/api/spending-chart`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpendingPeriod {
    #[default]
    SixDays,
    SevenDays,
    ThirtyDays,
    SixMonths,
}

impl SpendingPeriod {
    pub const ALL: [SpendingPeriod; 4] = [
        SpendingPeriod::SixDays,
        SpendingPeriod::SevenDays,
        SpendingPeriod::ThirtyDays,
        SpendingPeriod::SixMonths,
    ];

    pub fn query_value(self) -> &'static str {
        match self {
            SpendingPeriod::SixDays => "6days",
            SpendingPeriod::SevenDays => "7days",
            SpendingPeriod::ThirtyDays => "30days",
            SpendingPeriod::SixMonths => "6months",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SpendingPeriod::SixDays => "6 Days",
            SpendingPeriod::SevenDays => "7 Days",
            SpendingPeriod::ThirtyDays => "30 Days",
            SpendingPeriod::SixMonths => "6 Months",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpendingChart {
    pub labels: Vec<String>,
    pub amounts: Vec<f64>,
    #[serde(default)]
    pub period: String,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryChart {
    pub categories: Vec<String>,
    pub amounts: Vec<f64>,
}

impl CategoryChart {
    pub fn total(&self) -> f64 {
        self.amounts.iter().sum()
    }
}

/// Tags chart requests so only the newest one may draw.
///
/// Switching periods quickly leaves earlier fetches in flight; a response
/// whose ticket is no longer current is discarded.
#[derive(Debug, Clone, Default)]
pub struct RequestGeneration(Rc<Cell<u64>>);

impl RequestGeneration {
    pub fn begin(&self) -> u64 {
        let next = self.0.get().wrapping_add(1);
        self.0.set(next);
        next
    }

    pub fn is_current(&self, ticket: u64) -> bool {
        self.0.get() == ticket
    }
}

/// Decode a finished response.
pub fn decode_body<T: DeserializeOwned>(
    endpoint: &str,
    status: u16,
    body: &str,
) -> Result<T, ApiError> {
    if !(200..300).contains(&status) {
        return Err(ApiError::Status {
            endpoint: endpoint.to_string(),
            status,
        });
    }
    serde_json::from_str(body).map_err(|e| ApiError::Decode {
        endpoint: endpoint.to_string(),
        reason: e.to_string(),
    })
}

pub struct ApiClient<N: NotificationSink> {
    config: Rc<Config>,
    notifier: Rc<N>,
}

impl<N: NotificationSink> Clone for ApiClient<N> {
    fn clone(&self) -> Self {
        Self {
            config: self.config.clone(),
            notifier: self.notifier.clone(),
        }
    }
}

impl<N: NotificationSink> ApiClient<N> {
    pub fn new(config: Rc<Config>, notifier: Rc<N>) -> Self {
        Self { config, notifier }
    }

    /// `GET <base>/<endpoint>` decoded as `T`.
    pub async fn fetch_json<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ApiError> {
        let url = self.config.url(endpoint);
        debug!("GET {}", url);
        let result = async {
            let response = Request::get(&url)
                .send()
                .await
                .map_err(|e| ApiError::Network {
                    endpoint: endpoint.to_string(),
                    reason: e.to_string(),
                })?;
            let status = response.status();
            let body = response.text().await.map_err(|e| ApiError::Network {
                endpoint: endpoint.to_string(),
                reason: e.to_string(),
            })?;
            decode_body(endpoint, status, &body)
        }
        .await;
        self.report(result)
    }

    fn report<T>(&self, result: Result<T, ApiError>) -> Result<T, ApiError> {
        if let Err(err) = &result {
            warn!("API request failed: {}", err);
            self.notifier
                .notify("Failed to load data. Please try again.", Severity::Error);
        }
        result
    }

    /// Spending totals for `period`, served from the chart cache when present.
    pub async fn spending_chart(&self, period: SpendingPeriod) -> Result<SpendingChart, ApiError> {
        if let Some(hit) = cache::get(period) {
            debug!("Spending chart for {} served from cache", period.query_value());
            return Ok(hit);
        }
        let endpoint = format!("api/spending-chart?period={}", period.query_value());
        let chart: SpendingChart = self.fetch_json(&endpoint).await?;
        cache::insert(period, chart.clone());
        Ok(chart)
    }

    pub async fn category_chart(&self) -> Result<CategoryChart, ApiError> {
        self.fetch_json("api/category-chart").await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notify::RecordingSink;

    #[test]
    fn decodes_backend_spending_payload() {
        let body = r#"{"labels": ["25 Nov", "26 Nov"], "amounts": [12.5, 40.0],
                       "period": "6days", "months": ["25 Nov", "26 Nov"],
                       "start_date": "2024-11-20", "end_date": "2024-11-26"}"#;
        let chart: SpendingChart = decode_body("api/spending-chart", 200, body).unwrap();
        assert_eq!(chart.labels.len(), 2);
        assert_eq!(chart.start_date.as_deref(), Some("2024-11-20"));
    }

    #[test]
    fn non_success_status_is_an_error() {
        let err = decode_body::<CategoryChart>("api/category-chart", 401, "{}").unwrap_err();
        assert_eq!(
            err,
            ApiError::Status {
                endpoint: "api/category-chart".into(),
                status: 401
            }
        );
    }

    #[test]
    fn malformed_body_is_a_decode_error() {
        let err = decode_body::<CategoryChart>("api/category-chart", 200, "<html>").unwrap_err();
        assert!(matches!(err, ApiError::Decode { .. }));
    }

    #[test]
    fn failures_are_reported_and_propagated() {
        let sink = Rc::new(RecordingSink::default());
        let client = ApiClient::new(Rc::new(Config::default()), sink.clone());

        let result: Result<CategoryChart, _> = client.report(decode_body("api/category-chart", 500, ""));

        assert!(result.is_err());
        assert_eq!(sink.last().unwrap().1, Severity::Error);
        assert!(client.report(Ok(1)).is_ok());
        assert_eq!(sink.entries().len(), 1);
    }

    #[test]
    fn only_the_latest_request_is_current() {
        let generation = RequestGeneration::default();
        let six_days = generation.begin();
        let six_months = generation.clone().begin();

        assert!(!generation.is_current(six_days));
        assert!(generation.is_current(six_months));
    }

    #[test]
    fn category_total_sums_amounts() {
        let chart = CategoryChart {
            categories: vec!["Food".into(), "Transport".into()],
            amounts: vec![10.0, 5.5],
        };
        assert_eq!(chart.total(), 15.5);
    }
}
