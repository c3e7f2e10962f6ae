//! # visit-planner
//!
//! Draft schedule generation and partner availability matching for field
//! service visits.
//!
//! A caller describes the visit cadence it wants ([`RecurrenceRequest`]), the
//! [`ScheduleGenerator`] turns it into dated draft slots, and the
//! [`AvailabilityMatcher`] asks an external [`PartnerLookup`] which partners can
//! cover those slots within a tolerance.
//!
//! ```rust
//! use chrono::NaiveDate;
//! use visit_planner::{generate, RecurrencePattern, RecurrenceRequest};
//!
//! let start = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
//! let request = RecurrenceRequest::new(start, 60, 3, RecurrencePattern::Alternate);
//! let drafts = generate(&request).unwrap();
//!
//! let dates: Vec<String> = drafts.iter().map(|d| d.date.to_string()).collect();
//! assert_eq!(dates, ["2025-01-01", "2025-01-03", "2025-01-05"]);
//! assert_eq!(drafts[0].end_time.to_string(), "10:00");
//! ```
//!
//! ## Modules
//!
//! - [`recurrence`] — Recurrence requests and form coercion
//! - [`generator`] — Recurrence request → draft slots
//! - [`clock`] — `HH:MM` wall-clock arithmetic
//! - [`query`] — Draft slots and availability wire types
//! - [`matcher`] — Availability query construction and partner lookup relay
//! - [`config`] — Engine configuration
//! - `telemetry` — `tracing` subscriber setup (feature `telemetry`, on by default)
//! - [`error`] — Error types

pub mod clock;
pub mod config;
pub mod error;
pub mod generator;
pub mod matcher;
pub mod query;
pub mod recurrence;
#[cfg(feature = "telemetry")]
pub mod telemetry;

pub use clock::TimeOfDay;
pub use config::{MidnightPolicy, PlannerConfig, Ranking};
pub use error::{LookupError, PlannerError};
pub use generator::{generate, ScheduleGenerator};
pub use matcher::{AvailabilityMatcher, LookupContext, PartnerLookup, StaticLookup, TimeoutLookup};
pub use query::{AvailabilityQuery, AvailabilityResponse, DraftSlot, PartnerMatch, SlotRequest, TimeRange};
pub use recurrence::{PatternKind, RecurrenceForm, RecurrencePattern, RecurrenceRequest};
