//! Draft slots and the availability wire types exchanged with the partner lookup.
//!
//! Field names on the wire are camelCase (`startTime`, `slotsData`,
//! `minAvailabilityPercentage`, `availablePartners`, ...), dates are
//! `YYYY-MM-DD` and times `HH:MM`.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;

/// A proposed, not-yet-committed visit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DraftSlot {
    pub date: NaiveDate,
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

impl DraftSlot {
    pub fn new(date: NaiveDate, start_time: TimeOfDay, end_time: TimeOfDay) -> Self {
        Self {
            date,
            start_time,
            end_time,
        }
    }

    /// True when the end time wrapped past midnight onto the same `date`.
    ///
    /// A session ending exactly at midnight (`00:00`) also reports `true`.
    pub fn wraps_midnight(&self) -> bool {
        self.end_time <= self.start_time
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TimeRange {
    pub start_time: TimeOfDay,
    pub end_time: TimeOfDay,
}

/// Availability wanted on one calendar date.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRequest {
    pub date: NaiveDate,
    pub time_ranges: Vec<TimeRange>,
}

impl From<&DraftSlot> for SlotRequest {
    fn from(slot: &DraftSlot) -> Self {
        Self {
            date: slot.date,
            time_ranges: vec![TimeRange {
                start_time: slot.start_time,
                end_time: slot.end_time,
            }],
        }
    }
}

/// Request body sent to the partner availability lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityQuery {
    pub slots_data: Vec<SlotRequest>,
    pub min_availability_percentage: u8,
}

impl AvailabilityQuery {
    /// One slot entry per draft, in draft order, with a `100 - tolerance` threshold.
    ///
    /// `tolerance_percent` is clamped to 100; the matcher rejects larger values
    /// before it gets here.
    pub fn from_drafts(drafts: &[DraftSlot], tolerance_percent: u8) -> Self {
        Self {
            slots_data: drafts.iter().map(SlotRequest::from).collect(),
            min_availability_percentage: 100 - tolerance_percent.min(100),
        }
    }
}

/// A partner able to cover (part of) the requested slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartnerMatch {
    pub partner_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_name: Option<String>,
    pub availability_percentage: u8,
}

impl PartnerMatch {
    pub fn new(partner_id: impl Into<String>, availability_percentage: u8) -> Self {
        Self {
            partner_id: partner_id.into(),
            partner_name: None,
            availability_percentage,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.partner_name = Some(name.into());
        self
    }

    /// Name for display, `"N/A"` when the lookup did not supply one.
    pub fn display_name(&self) -> &str {
        self.partner_name.as_deref().unwrap_or("N/A")
    }

    pub fn meets(&self, min_availability_percentage: u8) -> bool {
        self.availability_percentage >= min_availability_percentage
    }
}

/// Response body of the partner availability lookup.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    /// Absent in the response body means no partners were found.
    #[serde(default)]
    pub available_partners: Vec<PartnerMatch>,
}
