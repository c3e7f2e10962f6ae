//! WASM bindings for visit-planner.
//!
//! Exposes draft schedule generation, availability query construction and
//! partner ranking to the browser console via `wasm-bindgen`. All complex
//! values cross the boundary as JSON strings in the same camelCase shapes the
//! availability service uses. The partner lookup itself stays on the
//! JavaScript side.
//!
//! ## Build process
//!
//! ```sh
//! cargo build -p visit-planner-wasm --target wasm32-unknown-unknown --release
//! wasm-bindgen --target web --out-dir packages/visit-planner-js/wasm/ \
//!   target/wasm32-unknown-unknown/release/visit_planner_wasm.wasm
//! ```

use serde::Serialize;
use visit_planner::{
    AvailabilityMatcher, AvailabilityQuery, AvailabilityResponse, DraftSlot, PlannerConfig,
    Ranking, RecurrenceForm, ScheduleGenerator,
};
use wasm_bindgen::prelude::*;

// ---------------------------------------------------------------------------
// JSON-in / JSON-out implementations (plain `String` errors, testable natively)
// ---------------------------------------------------------------------------

/// Narrow a JS number to a whole percentage in `0..=100`.
///
/// wasm-bindgen truncates numbers passed as `u8`, so percentages cross the
/// boundary as `f64` and are checked here.
pub fn percentage(value: f64, name: &str) -> Result<u8, String> {
    if !value.is_finite() || value.fract() != 0.0 || !(0.0..=100.0).contains(&value) {
        return Err(format!(
            "{} must be a whole number between 0 and 100, got {}",
            name, value
        ));
    }
    Ok(value as u8)
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| format!("Serialization error: {}", e))
}

/// Generate draft slots from a JSON-encoded [`RecurrenceForm`].
pub fn generate_drafts_json(form_json: &str) -> Result<String, String> {
    let form: RecurrenceForm = serde_json::from_str(form_json)
        .map_err(|e| format!("Invalid recurrence JSON: {}", e))?;

    let drafts = ScheduleGenerator::default()
        .generate_from_form(form)
        .map_err(|e| e.to_string())?;

    to_json(&drafts)
}

/// Build the availability request body for a JSON array of draft slots.
pub fn build_query_json(drafts_json: &str, tolerance: f64) -> Result<String, String> {
    let tolerance = percentage(tolerance, "tolerance")?;
    let drafts: Vec<DraftSlot> = serde_json::from_str(drafts_json)
        .map_err(|e| format!("Invalid drafts JSON: {}", e))?;

    let query: AvailabilityQuery = AvailabilityMatcher::default()
        .build_query(&drafts, tolerance)
        .map_err(|e| e.to_string())?;

    to_json(&query)
}

/// Decode an availability response body and return its partner list, optionally
/// re-filtered against `min_availability` and ranked.
///
/// `ranking` is `"as_received"` or `"by_availability"`; `local_filter` drops
/// partners below `min_availability`.
pub fn rank_partners_json(
    response_json: &str,
    min_availability: f64,
    ranking: &str,
    local_filter: bool,
) -> Result<String, String> {
    let min_availability = percentage(min_availability, "minAvailability")?;
    let response: AvailabilityResponse = serde_json::from_str(response_json)
        .map_err(|e| format!("Invalid availability response JSON: {}", e))?;
    let ranking: Ranking = ranking.parse().map_err(|e| format!("Invalid ranking: {}", e))?;

    let matcher = AvailabilityMatcher::new(PlannerConfig {
        ranking,
        local_filter,
        ..PlannerConfig::default()
    });
    let partners = matcher.post_process(response.available_partners, min_availability);

    to_json(&partners)
}

// ---------------------------------------------------------------------------
// WASM exports
// ---------------------------------------------------------------------------

/// Generate draft visit slots.
///
/// `form_json` is an object with `startDate`, `sessionDurationMinutes`,
/// `visitCount`, `pattern` (`daily`, `alternate`, `specific_days`,
/// `specific_dates`), and the comma-separated `weekdays` or `explicitDates`
/// the pattern needs. Returns a JSON array of `{date, startTime, endTime}`.
#[wasm_bindgen(js_name = "generateDraftSchedule")]
pub fn generate_draft_schedule(form_json: &str) -> Result<String, JsValue> {
    generate_drafts_json(form_json).map_err(|e| JsValue::from_str(&e))
}

/// Build the `{slotsData, minAvailabilityPercentage}` body for a partner search.
#[wasm_bindgen(js_name = "buildAvailabilityQuery")]
pub fn build_availability_query(drafts_json: &str, tolerance: f64) -> Result<String, JsValue> {
    build_query_json(drafts_json, tolerance).map_err(|e| JsValue::from_str(&e))
}

/// Extract and order `availablePartners` from a partner search response.
#[wasm_bindgen(js_name = "rankAvailablePartners")]
pub fn rank_available_partners(
    response_json: &str,
    min_availability: f64,
    ranking: &str,
    local_filter: bool,
) -> Result<String, JsValue> {
    rank_partners_json(response_json, min_availability, ranking, local_filter)
        .map_err(|e| JsValue::from_str(&e))
}
