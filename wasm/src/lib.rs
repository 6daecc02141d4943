//! WebAssembly module for Stockcast
//!
//! Provides client-side computation for:
//! - Temperature classification
//! - Seasonality and recommendation scoring
//! - Forecast aggregation from raw sample JSON

use rust_decimal::Decimal;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::scoring::*;
pub use shared::types::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {}

fn to_decimal(value: f64) -> Result<Decimal, String> {
    Decimal::try_from(value).map_err(|_| format!("Not a finite number: {}", value))
}

fn to_f64(value: Decimal) -> f64 {
    value.to_string().parse().unwrap_or(0.0)
}

fn parse_category(name: &str) -> Result<TemperatureCategory, String> {
    name.parse::<TemperatureCategory>().map_err(|e| e.to_string())
}

/// Classify a temperature (Celsius) into freezing / cold / mild / hot
#[wasm_bindgen]
pub fn classify_temperature(temperature: f64) -> Result<String, JsValue> {
    let temperature = to_decimal(temperature).map_err(|e| JsValue::from_str(&e))?;
    Ok(TemperatureCategory::classify(temperature).name().to_string())
}

/// Climate score of a product category against a target category
#[wasm_bindgen]
pub fn climate_score(product_category: &str, target_category: &str) -> Result<f64, JsValue> {
    climate_score_inner(product_category, target_category).map_err(|e| JsValue::from_str(&e))
}

fn climate_score_inner(product_category: &str, target_category: &str) -> Result<f64, String> {
    let config = ScoringConfig::default();
    let score = config.climate_score(
        parse_category(product_category)?,
        parse_category(target_category)?,
    );
    Ok(to_f64(score))
}

/// Score a product JSON (`Product` shape) for a category and month number
/// and return the recommendation as JSON
#[wasm_bindgen]
pub fn score_product(
    product_json: &str,
    target_category: &str,
    month: u32,
) -> Result<String, JsValue> {
    score_product_inner(product_json, target_category, month).map_err(|e| JsValue::from_str(&e))
}

fn score_product_inner(
    product_json: &str,
    target_category: &str,
    month: u32,
) -> Result<String, String> {
    let product: Product =
        serde_json::from_str(product_json).map_err(|e| format!("Invalid product JSON: {}", e))?;
    let month = Month::from_number(month).map_err(|e| e.to_string())?;
    let category = parse_category(target_category)?;
    let result = ScoringConfig::default().score_product(&product, category, month);
    serde_json::to_string(&result).map_err(|e| e.to_string())
}

/// Aggregate a JSON array of raw forecast samples into daily summaries (JSON)
#[wasm_bindgen]
pub fn aggregate_forecast_samples(samples_json: &str) -> Result<String, JsValue> {
    aggregate_inner(samples_json).map_err(|e| JsValue::from_str(&e))
}

fn aggregate_inner(samples_json: &str) -> Result<String, String> {
    let summaries = shared::aggregate_forecast_json(samples_json).map_err(|e| e.to_string())?;
    serde_json::to_string(&summaries).map_err(|e| e.to_string())
}
