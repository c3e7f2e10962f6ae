//! Tests for the JSON shapes exchanged with the console and the availability lookup.

use chrono::NaiveDate;
use serde_json::json;
use visit_planner::{
    generate, AvailabilityQuery, AvailabilityResponse, DraftSlot, PartnerMatch, RecurrencePattern,
    RecurrenceRequest,
};

fn drafts() -> Vec<DraftSlot> {
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
    generate(&RecurrenceRequest::new(start, 90, 2, RecurrencePattern::Alternate)).unwrap()
}

#[test]
fn draft_slot_serializes_as_date_and_hh_mm() {
    let value = serde_json::to_value(drafts()).unwrap();
    assert_eq!(
        value,
        json!([
            {"date": "2025-01-01", "startTime": "09:00", "endTime": "10:30"},
            {"date": "2025-01-03", "startTime": "09:00", "endTime": "10:30"},
        ])
    );
}

#[test]
fn edited_draft_slots_deserialize() {
    let json = r#"[{"date":"2025-04-02","startTime":"13:15","endTime":"14:00"}]"#;
    let slots: Vec<DraftSlot> = serde_json::from_str(json).unwrap();
    assert_eq!(slots[0].date, NaiveDate::from_ymd_opt(2025, 4, 2).unwrap());
    assert_eq!(slots[0].start_time.to_string(), "13:15");
    assert!(!slots[0].wraps_midnight());
}

#[test]
fn draft_slot_with_bad_time_fails_to_deserialize() {
    let json = r#"{"date":"2025-04-02","startTime":"9am","endTime":"14:00"}"#;
    assert!(serde_json::from_str::<DraftSlot>(json).is_err());
}

#[test]
fn availability_query_body_matches_lookup_contract() {
    let query = AvailabilityQuery::from_drafts(&drafts(), 20);
    let value = serde_json::to_value(&query).unwrap();
    assert_eq!(
        value,
        json!({
            "slotsData": [
                {"date": "2025-01-01", "timeRanges": [{"startTime": "09:00", "endTime": "10:30"}]},
                {"date": "2025-01-03", "timeRanges": [{"startTime": "09:00", "endTime": "10:30"}]},
            ],
            "minAvailabilityPercentage": 80,
        })
    );
}

#[test]
fn tolerance_extremes_map_to_threshold() {
    assert_eq!(AvailabilityQuery::from_drafts(&drafts(), 0).min_availability_percentage, 100);
    assert_eq!(AvailabilityQuery::from_drafts(&drafts(), 100).min_availability_percentage, 0);
}

#[test]
fn response_decodes_partners_with_optional_names() {
    let body = r#"{
        "availablePartners": [
            {"partnerId": "p-1", "partnerName": "Asha", "availabilityPercentage": 100},
            {"partnerId": "p-2", "availabilityPercentage": 85}
        ]
    }"#;
    let response: AvailabilityResponse = serde_json::from_str(body).unwrap();
    assert_eq!(response.available_partners.len(), 2);
    assert_eq!(response.available_partners[0].display_name(), "Asha");
    assert_eq!(response.available_partners[1].display_name(), "N/A");
    assert_eq!(response.available_partners[1].availability_percentage, 85);
}

#[test]
fn response_without_partner_list_is_empty() {
    let response: AvailabilityResponse = serde_json::from_str("{}").unwrap();
    assert!(response.available_partners.is_empty());
}

#[test]
fn partner_without_name_omits_the_field() {
    let value = serde_json::to_value(PartnerMatch::new("p-9", 70)).unwrap();
    assert_eq!(value, json!({"partnerId": "p-9", "availabilityPercentage": 70}));
}
