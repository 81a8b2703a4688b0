//! Thread-local cache for dashboard chart payloads.
//!
//! Spending data is keyed by period so toggling between "6 days", "30 days"
//! and "6 months" does not refetch. Entries live until [`clear`] is called,
//! which the dashboard does after a successful upload.

use crate::api::{SpendingChart, SpendingPeriod};
use std::cell::RefCell;
use std::collections::HashMap;

thread_local! {
    /// Survives component lifetimes; thread-local because wasm is single-threaded.
    pub static CHART_CACHE: RefCell<HashMap<SpendingPeriod, SpendingChart>> =
        RefCell::new(HashMap::with_capacity(4));
}

pub fn get(period: SpendingPeriod) -> Option<SpendingChart> {
    CHART_CACHE.with(|c| c.borrow().get(&period).cloned())
}

pub fn insert(period: SpendingPeriod, chart: SpendingChart) {
    CHART_CACHE.with(|c| {
        c.borrow_mut().insert(period, chart);
    });
}

pub fn clear() {
    CHART_CACHE.with(|c| c.borrow_mut().clear());
}
