//! WebAssembly module for the farm planner
//!
//! Runs the scheduling engine in the browser so a planner can preview
//! suggestions offline from a snapshot it already holds:
//! - Current planting opportunities
//! - Selling-schedule campaigns
//! - Selling date generation and priority buckets

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

use shared::scheduling::{self, CampaignRequest};

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("farm planner engine loaded"));
}

fn parse_date(value: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|e| format!("Invalid date '{}': {}", value, e))
}

fn parse_json<T: DeserializeOwned>(what: &str, json: &str) -> Result<T, String> {
    serde_json::from_str(json).map_err(|e| format!("Invalid {} JSON: {}", what, e))
}

fn opportunities(snapshot_json: &str, today: &str) -> Result<String, String> {
    let snapshot: FarmSnapshot = parse_json("snapshot", snapshot_json)?;
    let suggestions = scheduling::recommend_now(&snapshot, parse_date(today)?);
    serde_json::to_string(&suggestions).map_err(|e| e.to_string())
}

fn campaign(snapshot_json: &str, request_json: &str, today: &str) -> Result<String, String> {
    let snapshot: FarmSnapshot = parse_json("snapshot", snapshot_json)?;
    let request: CampaignRequest = parse_json("campaign request", request_json)?;
    let suggestions = scheduling::recommend_campaign(&snapshot, &request, parse_date(today)?)
        .map_err(|e| e.to_string())?;
    serde_json::to_string(&suggestions).map_err(|e| e.to_string())
}

fn selling_dates(start: &str, frequency_days: i32, horizon_days: i32) -> Result<Vec<String>, String> {
    let dates = scheduling::generate_dates(
        parse_date(start)?,
        i64::from(frequency_days),
        i64::from(horizon_days),
    )
    .map_err(|e| e.to_string())?;
    Ok(dates.iter().map(|d| d.format("%Y-%m-%d").to_string()).collect())
}

/// Best crop for each free location, as a JSON array of suggestions
#[wasm_bindgen]
pub fn recommend_now(snapshot_json: &str, today: &str) -> Result<String, JsValue> {
    opportunities(snapshot_json, today).map_err(|e| JsValue::from_str(&e))
}

/// Campaign plan for a selling schedule, as a JSON array of suggestions
#[wasm_bindgen]
pub fn recommend_campaign(
    snapshot_json: &str,
    request_json: &str,
    today: &str,
) -> Result<String, JsValue> {
    campaign(snapshot_json, request_json, today).map_err(|e| JsValue::from_str(&e))
}

/// Sale dates from `start` every `frequency_days` within the horizon
#[wasm_bindgen]
pub fn generate_selling_dates(
    start: &str,
    frequency_days: i32,
    horizon_days: i32,
) -> Result<js_sys::Array, JsValue> {
    let dates = selling_dates(start, frequency_days, horizon_days)
        .map_err(|e| JsValue::from_str(&e))?;
    Ok(dates.into_iter().map(JsValue::from).collect())
}

/// Priority bucket ("high", "medium", "low") for a score
#[wasm_bindgen]
pub fn priority_for_score(score: f64) -> String {
    Priority::from_score(score).to_string()
}

/// Season name for a calendar month
#[wasm_bindgen]
pub fn season_for_month(month: u32) -> String {
    Season::from_month(month).to_string()
}

/// Plants that fit a line of `area_sqm` at the given spacings
#[wasm_bindgen]
pub fn plants_for_area(spacing_cm: f64, row_spacing_cm: f64, area_sqm: f64) -> u32 {
    let mut crop = CropProfile::new(Default::default(), "", 0);
    crop.spacing_cm = Decimal::try_from(spacing_cm).ok();
    crop.row_spacing_cm = Decimal::try_from(row_spacing_cm).ok();
    crop.plants_for_area(Decimal::try_from(area_sqm).unwrap_or(Decimal::ZERO))
}

/// Campaign priority for a crop profile selling on `sale_date`
#[wasm_bindgen]
pub fn campaign_priority(crop_json: &str, sale_date: &str) -> Result<f64, JsValue> {
    let crop: CropProfile = parse_json("crop", crop_json).map_err(|e| JsValue::from_str(&e))?;
    let date = parse_date(sale_date).map_err(|e| JsValue::from_str(&e))?;
    Ok(scheduling::campaign_priority(&crop, date))
}

/// Validate a selling frequency before submitting a campaign
#[wasm_bindgen]
pub fn is_valid_cadence(frequency_days: i32) -> bool {
    validate_cadence_frequency(i64::from(frequency_days)).is_ok()
}
