//! Recurrence requests -- the cadence a caller wants draft visits generated for.
//!
//! [`RecurrenceRequest`] is the validated, strongly-typed form. [`RecurrenceForm`]
//! mirrors what the operations console submits: every field is an optional
//! string and must be coerced before generation.

use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{PlannerError, Result};

/// Wire format of calendar dates (`YYYY-MM-DD`).
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// The rule deciding which calendar days receive a visit.
///
/// Pattern-specific data lives inside the variant, so a request can never carry
/// weekdays for a `Daily` cadence or lack dates for `SpecificDates`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecurrencePattern {
    /// One visit per day starting at the start date.
    Daily,
    /// One visit every other day starting at the start date.
    Alternate,
    /// Visits on the listed weekdays (0 = Sunday .. 6 = Saturday).
    SpecificWeekdays(BTreeSet<u8>),
    /// Visits on exactly these dates, in the order given.
    SpecificDates(Vec<NaiveDate>),
}

impl RecurrencePattern {
    pub fn kind(&self) -> PatternKind {
        match self {
            RecurrencePattern::Daily => PatternKind::Daily,
            RecurrencePattern::Alternate => PatternKind::Alternate,
            RecurrencePattern::SpecificWeekdays(_) => PatternKind::SpecificWeekdays,
            RecurrencePattern::SpecificDates(_) => PatternKind::SpecificDates,
        }
    }
}

/// Payload-free pattern token, as selected in the console form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    Daily,
    Alternate,
    #[serde(rename = "specific_days", alias = "specific_weekdays")]
    SpecificWeekdays,
    SpecificDates,
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let token = match self {
            PatternKind::Daily => "daily",
            PatternKind::Alternate => "alternate",
            PatternKind::SpecificWeekdays => "specific_days",
            PatternKind::SpecificDates => "specific_dates",
        };
        f.write_str(token)
    }
}

impl FromStr for PatternKind {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "daily" => Ok(PatternKind::Daily),
            "alternate" => Ok(PatternKind::Alternate),
            "specific_days" | "specific_weekdays" | "specificweekdays" => {
                Ok(PatternKind::SpecificWeekdays)
            }
            "specific_dates" | "specificdates" => Ok(PatternKind::SpecificDates),
            _ => Err(PlannerError::config(format!("unknown recurrence pattern '{}'", s))),
        }
    }
}

/// A validated request for a draft visit calendar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecurrenceRequest {
    pub start_date: NaiveDate,
    pub session_duration_minutes: u32,
    pub visit_count: u32,
    pub pattern: RecurrencePattern,
}

impl RecurrenceRequest {
    pub fn new(
        start_date: NaiveDate,
        session_duration_minutes: u32,
        visit_count: u32,
        pattern: RecurrencePattern,
    ) -> Self {
        Self {
            start_date,
            session_duration_minutes,
            visit_count,
            pattern,
        }
    }

    /// Check the invariants the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.visit_count == 0 {
            return Err(PlannerError::config("visit count must be at least 1"));
        }
        if self.session_duration_minutes == 0 {
            return Err(PlannerError::config(
                "session duration must be a positive number of minutes",
            ));
        }
        match &self.pattern {
            RecurrencePattern::SpecificWeekdays(days) => {
                if days.is_empty() {
                    return Err(PlannerError::config(
                        "specific weekdays pattern requires at least one weekday",
                    ));
                }
                if let Some(bad) = days.iter().find(|d| **d > 6) {
                    return Err(PlannerError::config(format!(
                        "weekday {} out of range, expected 0 (Sunday) to 6 (Saturday)",
                        bad
                    )));
                }
            }
            RecurrencePattern::SpecificDates(dates) if dates.is_empty() => {
                return Err(PlannerError::config(
                    "specific dates pattern requires at least one date",
                ));
            }
            _ => {}
        }
        Ok(())
    }
}

/// Raw recurrence input as submitted by a form.
///
/// Numeric fields accept either JSON numbers or strings; list fields are
/// comma-separated strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecurrenceForm {
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub session_duration_minutes: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub visit_count: Option<String>,
    #[serde(default)]
    pub pattern: Option<String>,
    #[serde(default)]
    pub weekdays: Option<String>,
    #[serde(default)]
    pub explicit_dates: Option<String>,
}

impl TryFrom<RecurrenceForm> for RecurrenceRequest {
    type Error = PlannerError;

    fn try_from(form: RecurrenceForm) -> Result<Self> {
        let start_date = parse_date(required(&form.start_date, "startDate")?)?;
        let visit_count = parse_count(required(&form.visit_count, "visitCount")?, "visitCount")?;
        let session_duration_minutes = parse_duration(required(
            &form.session_duration_minutes,
            "sessionDurationMinutes",
        )?)?;

        let kind: PatternKind = match non_blank(&form.pattern) {
            Some(token) => token.parse()?,
            None => PatternKind::Daily,
        };

        let pattern = match kind {
            PatternKind::Daily => RecurrencePattern::Daily,
            PatternKind::Alternate => RecurrencePattern::Alternate,
            PatternKind::SpecificWeekdays => {
                let raw = non_blank(&form.weekdays).ok_or_else(|| {
                    PlannerError::config("weekdays are required for the specific_days pattern")
                })?;
                RecurrencePattern::SpecificWeekdays(parse_weekdays(raw)?)
            }
            PatternKind::SpecificDates => {
                let raw = non_blank(&form.explicit_dates).ok_or_else(|| {
                    PlannerError::config("explicitDates are required for the specific_dates pattern")
                })?;
                RecurrencePattern::SpecificDates(parse_dates(raw)?)
            }
        };

        let request = RecurrenceRequest::new(start_date, session_duration_minutes, visit_count, pattern);
        request.validate()?;
        Ok(request)
    }
}

/// Parse a `YYYY-MM-DD` calendar date.
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|e| PlannerError::config(format!("invalid date '{}': {}", raw.trim(), e)))
}

/// Parse a comma-separated weekday list such as `"1, 3,5"`. Blank items are skipped.
pub fn parse_weekdays(raw: &str) -> Result<BTreeSet<u8>> {
    let mut days = BTreeSet::new();
    for item in raw.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        let day: u8 = item.parse().map_err(|_| {
            PlannerError::config(format!("invalid weekday '{}', expected 0-6", item))
        })?;
        if day > 6 {
            return Err(PlannerError::config(format!(
                "weekday {} out of range, expected 0 (Sunday) to 6 (Saturday)",
                day
            )));
        }
        days.insert(day);
    }
    if days.is_empty() {
        return Err(PlannerError::config(
            "specific weekdays pattern requires at least one weekday",
        ));
    }
    Ok(days)
}

/// Parse a comma-separated list of `YYYY-MM-DD` dates, keeping input order.
pub fn parse_dates(raw: &str) -> Result<Vec<NaiveDate>> {
    let dates = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(parse_date)
        .collect::<Result<Vec<_>>>()?;
    if dates.is_empty() {
        return Err(PlannerError::config(
            "specific dates pattern requires at least one date",
        ));
    }
    Ok(dates)
}

fn non_blank(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn required<'a>(field: &'a Option<String>, name: &str) -> Result<&'a str> {
    non_blank(field).ok_or_else(|| PlannerError::config(format!("{} is required", name)))
}

fn parse_count(raw: &str, name: &str) -> Result<u32> {
    let value: i64 = raw
        .parse()
        .map_err(|_| PlannerError::config(format!("{} must be an integer, got '{}'", name, raw)))?;
    if value < 1 {
        return Err(PlannerError::config(format!("{} must be at least 1, got {}", name, value)));
    }
    u32::try_from(value).map_err(|_| PlannerError::config(format!("{} is too large: {}", name, value)))
}

fn parse_duration(raw: &str) -> Result<u32> {
    let value: i64 = raw.parse().map_err(|_| {
        PlannerError::config(format!(
            "sessionDurationMinutes must be an integer, got '{}'",
            raw
        ))
    })?;
    if value <= 0 {
        return Err(PlannerError::config(format!(
            "session duration must be a positive number of minutes, got {}",
            value
        )));
    }
    u32::try_from(value).map_err(|_| {
        PlannerError::config(format!("session duration is too large: {}", value))
    })
}

/// Accept a JSON string or number and keep it as a string for later coercion.
fn lenient_string<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Int(i64),
        Float(f64),
    }

    Ok(Option::<Raw>::deserialize(deserializer)?.map(|raw| match raw {
        Raw::Text(s) => s,
        Raw::Int(n) => n.to_string(),
        Raw::Float(f) => f.to_string(),
    }))
}
