//! Tests for recurrence form coercion, pattern tokens and time-of-day parsing.

use chrono::NaiveDate;
use visit_planner::recurrence::{parse_dates, parse_weekdays};
use visit_planner::{
    PatternKind, PlannerError, RecurrenceForm, RecurrencePattern, RecurrenceRequest, TimeOfDay,
};

fn form(pattern: &str) -> RecurrenceForm {
    RecurrenceForm {
        start_date: Some("2025-01-01".to_string()),
        session_duration_minutes: Some("60".to_string()),
        visit_count: Some("3".to_string()),
        pattern: Some(pattern.to_string()),
        weekdays: None,
        explicit_dates: None,
    }
}

fn config_message(result: Result<RecurrenceRequest, PlannerError>) -> String {
    match result {
        Err(PlannerError::Configuration(msg)) => msg,
        other => panic!("expected a configuration error, got {:?}", other),
    }
}

// ── Form coercion ───────────────────────────────────────────────────────────

#[test]
fn daily_form_becomes_request() {
    let request = RecurrenceRequest::try_from(form("daily")).unwrap();
    assert_eq!(request.start_date, NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    assert_eq!(request.session_duration_minutes, 60);
    assert_eq!(request.visit_count, 3);
    assert_eq!(request.pattern, RecurrencePattern::Daily);
}

#[test]
fn missing_pattern_defaults_to_daily() {
    let mut f = form("daily");
    f.pattern = None;
    let request = RecurrenceRequest::try_from(f).unwrap();
    assert_eq!(request.pattern, RecurrencePattern::Daily);
}

#[test]
fn weekdays_are_trimmed_and_deduplicated() {
    let mut f = form("specific_days");
    f.weekdays = Some(" 3,1 , 3,".to_string());
    let request = RecurrenceRequest::try_from(f).unwrap();
    assert_eq!(
        request.pattern,
        RecurrencePattern::SpecificWeekdays([1, 3].into_iter().collect())
    );
}

#[test]
fn explicit_dates_keep_input_order() {
    let mut f = form("specific_dates");
    f.explicit_dates = Some("2025-02-05, 2025-02-01".to_string());
    let request = RecurrenceRequest::try_from(f).unwrap();
    assert_eq!(
        request.pattern,
        RecurrencePattern::SpecificDates(vec![
            NaiveDate::from_ymd_opt(2025, 2, 5).unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 1).unwrap(),
        ])
    );
}

#[test]
fn missing_visit_count_is_reported() {
    let mut f = form("daily");
    f.visit_count = Some("  ".to_string());
    assert!(config_message(RecurrenceRequest::try_from(f)).contains("visitCount is required"));
}

#[test]
fn non_numeric_visit_count_is_reported() {
    let mut f = form("daily");
    f.visit_count = Some("three".to_string());
    assert!(config_message(RecurrenceRequest::try_from(f)).contains("visitCount must be an integer"));
}

#[test]
fn negative_duration_is_rejected() {
    let mut f = form("daily");
    f.session_duration_minutes = Some("-30".to_string());
    assert!(config_message(RecurrenceRequest::try_from(f)).contains("positive"));
}

#[test]
fn specific_days_without_weekdays_is_rejected() {
    assert!(config_message(RecurrenceRequest::try_from(form("specific_days")))
        .contains("weekdays are required"));
}

#[test]
fn specific_dates_without_dates_is_rejected() {
    assert!(config_message(RecurrenceRequest::try_from(form("specific_dates")))
        .contains("explicitDates are required"));
}

#[test]
fn bad_start_date_is_rejected() {
    let mut f = form("daily");
    f.start_date = Some("2025-13-01".to_string());
    assert!(config_message(RecurrenceRequest::try_from(f)).contains("invalid date"));
}

#[test]
fn unknown_pattern_is_rejected() {
    assert!(config_message(RecurrenceRequest::try_from(form("weekly")))
        .contains("unknown recurrence pattern"));
}

#[test]
fn form_accepts_numbers_or_strings_from_json() {
    let json = r#"{
        "startDate": "2025-01-01",
        "sessionDurationMinutes": 45,
        "visitCount": "4",
        "pattern": "alternate"
    }"#;
    let f: RecurrenceForm = serde_json::from_str(json).unwrap();
    assert_eq!(f.session_duration_minutes.as_deref(), Some("45"));
    let request = RecurrenceRequest::try_from(f).unwrap();
    assert_eq!(request.visit_count, 4);
    assert_eq!(request.pattern, RecurrencePattern::Alternate);
}

// ── List parsing ────────────────────────────────────────────────────────────

#[test]
fn weekday_out_of_range_is_rejected() {
    assert!(parse_weekdays("1,7").is_err());
    assert!(parse_weekdays("-1").is_err());
    assert!(parse_weekdays("mon").is_err());
}

#[test]
fn blank_lists_are_rejected() {
    assert!(parse_weekdays(" , ").is_err());
    assert!(parse_dates(",").is_err());
}

#[test]
fn one_bad_date_fails_the_whole_list() {
    assert!(parse_dates("2025-02-01,2025-02-30").is_err());
}

// ── Pattern tokens ──────────────────────────────────────────────────────────

#[test]
fn pattern_tokens_parse() {
    assert_eq!("daily".parse::<PatternKind>().unwrap(), PatternKind::Daily);
    assert_eq!("Alternate".parse::<PatternKind>().unwrap(), PatternKind::Alternate);
    assert_eq!(
        "specific_days".parse::<PatternKind>().unwrap(),
        PatternKind::SpecificWeekdays
    );
    assert_eq!(
        "SpecificWeekdays".parse::<PatternKind>().unwrap(),
        PatternKind::SpecificWeekdays
    );
    assert_eq!(
        "specific-dates".parse::<PatternKind>().unwrap(),
        PatternKind::SpecificDates
    );
}

#[test]
fn pattern_kind_serializes_as_console_token() {
    assert_eq!(
        serde_json::to_string(&PatternKind::SpecificWeekdays).unwrap(),
        "\"specific_days\""
    );
    assert_eq!(PatternKind::SpecificDates.to_string(), "specific_dates");
}

// ── Time of day ─────────────────────────────────────────────────────────────

#[test]
fn time_of_day_parses_and_pads() {
    let t: TimeOfDay = "9:05".parse().unwrap();
    assert_eq!(t.hour(), 9);
    assert_eq!(t.minute(), 5);
    assert_eq!(t.to_string(), "09:05");
}

#[test]
fn time_of_day_rejects_out_of_range_and_malformed() {
    for bad in ["24:00", "12:60", "1200", "12:5", "+1:00", "", "ab:cd"] {
        assert!(bad.parse::<TimeOfDay>().is_err(), "{} should not parse", bad);
    }
}

#[test]
fn add_minutes_wraps_modulo_a_day() {
    let nine = TimeOfDay::NINE_AM;
    assert_eq!(nine.add_minutes(60), (TimeOfDay::from_hm(10, 0).unwrap(), 0));
    assert_eq!(nine.add_minutes(900), (TimeOfDay::MIDNIGHT, 1));
    assert_eq!(nine.add_minutes(1440), (nine, 1));
    assert_eq!(nine.add_minutes(3 * 1440 + 1), (TimeOfDay::from_hm(9, 1).unwrap(), 3));
}
