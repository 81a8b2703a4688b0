//! Spending and category charts on the dashboard.
//!
//! Payloads are serialized to plain JS objects and drawn by `chart_helpers.js`.

use finance_dashboard::{CategoryChart, SpendingChart};
use gloo_utils::format::JsValueSerdeExt;
use log::warn;
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen(module = "/chart_helpers.js")]
extern "C" {
    #[wasm_bindgen(js_name = renderSpendingChart)]
    fn render_spending_chart_js(data: JsValue);

    #[wasm_bindgen(js_name = renderCategoryChart)]
    fn render_category_chart_js(data: JsValue);
}

fn to_js<T: Serialize>(what: &str, data: &T) -> Option<JsValue> {
    match JsValue::from_serde(data) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Could not serialize {} chart data: {}", what, e);
            None
        }
    }
}

pub fn render_spending_chart(chart: &SpendingChart) {
    if let Some(data) = to_js("spending", chart) {
        render_spending_chart_js(data);
    }
}

pub fn render_category_chart(chart: &CategoryChart) {
    if let Some(data) = to_js("category", chart) {
        render_category_chart_js(data);
    }
}
