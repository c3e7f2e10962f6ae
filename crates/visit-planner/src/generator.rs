//! Draft schedule generation -- turns a [`RecurrenceRequest`] into concrete visit slots.
//!
//! Every slot starts at the configured session start (09:00 by default) and ends
//! `session_duration_minutes` later on the wall clock. Generation is pure: the
//! same request and config always produce the same slots.

use chrono::{Datelike, Days, NaiveDate};
use std::collections::BTreeSet;

use crate::clock::TimeOfDay;
use crate::config::{MidnightPolicy, PlannerConfig};
use crate::error::{PlannerError, Result};
use crate::query::DraftSlot;
use crate::recurrence::{RecurrenceForm, RecurrencePattern, RecurrenceRequest};

#[derive(Debug, Clone, Default)]
pub struct ScheduleGenerator {
    config: PlannerConfig,
}

impl ScheduleGenerator {
    pub fn new(config: PlannerConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &PlannerConfig {
        &self.config
    }

    /// Generate the draft slots for `request`.
    ///
    /// - `Daily` -- `visit_count` consecutive days from `start_date`.
    /// - `Alternate` -- `visit_count` days, two days apart.
    /// - `SpecificWeekdays` -- the first `visit_count` days on or after
    ///   `start_date` whose weekday (0 = Sunday) is listed. The scan is bounded by
    ///   `max_scan_days`.
    /// - `SpecificDates` -- the first `visit_count` listed dates, as given. Fewer
    ///   dates than `visit_count` yields fewer slots.
    ///
    /// # Errors
    /// Returns `PlannerError::Configuration` if the request violates its
    /// invariants, if the weekday scan exhausts its look-ahead window, if a date
    /// leaves the supported calendar range, or if the session crosses midnight
    /// under [`MidnightPolicy::Reject`].
    pub fn generate(&self, request: &RecurrenceRequest) -> Result<Vec<DraftSlot>> {
        request.validate()?;

        let (start_time, end_time) = self.session_window(request.session_duration_minutes)?;
        let count = request.visit_count;

        let dates = match &request.pattern {
            RecurrencePattern::Daily => stepped_dates(request.start_date, count, 1)?,
            RecurrencePattern::Alternate => stepped_dates(request.start_date, count, 2)?,
            RecurrencePattern::SpecificWeekdays(weekdays) => {
                self.scan_weekdays(request.start_date, count, weekdays)?
            }
            RecurrencePattern::SpecificDates(dates) => {
                dates.iter().take(count as usize).copied().collect()
            }
        };

        let slots: Vec<DraftSlot> = dates
            .into_iter()
            .map(|date| DraftSlot::new(date, start_time, end_time))
            .collect();

        tracing::debug!(
            pattern = %request.pattern.kind(),
            requested = count,
            produced = slots.len(),
            start = %start_time,
            end = %end_time,
            "generated draft schedule"
        );

        Ok(slots)
    }

    /// Coerce raw form input and generate from it.
    pub fn generate_from_form(&self, form: RecurrenceForm) -> Result<Vec<DraftSlot>> {
        let request = RecurrenceRequest::try_from(form)?;
        self.generate(&request)
    }

    fn session_window(&self, duration_minutes: u32) -> Result<(TimeOfDay, TimeOfDay)> {
        let start = self.config.session_start;
        let (end, days_crossed) = start.add_minutes(duration_minutes);

        // Ending exactly at midnight still belongs to the start day.
        let spills_over = days_crossed > 1 || (days_crossed == 1 && end != TimeOfDay::MIDNIGHT);
        if spills_over && self.config.midnight_policy == MidnightPolicy::Reject {
            return Err(PlannerError::config(format!(
                "a {} minute session starting at {} would end after midnight",
                duration_minutes, start
            )));
        }
        Ok((start, end))
    }

    fn scan_weekdays(
        &self,
        start: NaiveDate,
        count: u32,
        weekdays: &BTreeSet<u8>,
    ) -> Result<Vec<NaiveDate>> {
        let wanted = count as usize;
        // The scan accepts at most one day per day examined.
        let mut accepted = Vec::with_capacity(wanted.min(self.config.max_scan_days as usize));
        let mut day = start;

        for _ in 0..self.config.max_scan_days {
            if weekdays.contains(&(day.weekday().num_days_from_sunday() as u8)) {
                accepted.push(day);
                if accepted.len() == wanted {
                    return Ok(accepted);
                }
            }
            day = day.succ_opt().ok_or_else(|| out_of_range(day))?;
        }

        Err(PlannerError::config(format!(
            "found only {} of {} visits on weekdays {:?} within {} days of {}",
            accepted.len(),
            count,
            weekdays,
            self.config.max_scan_days,
            start
        )))
    }
}

/// Generate drafts with the default configuration.
pub fn generate(request: &RecurrenceRequest) -> Result<Vec<DraftSlot>> {
    ScheduleGenerator::default().generate(request)
}

fn stepped_dates(start: NaiveDate, count: u32, step_days: u64) -> Result<Vec<NaiveDate>> {
    let last_offset = u64::from(count - 1) * step_days;
    start
        .checked_add_days(Days::new(last_offset))
        .ok_or_else(|| out_of_range(start))?;

    (0..u64::from(count))
        .map(|i| {
            start
                .checked_add_days(Days::new(i * step_days))
                .ok_or_else(|| out_of_range(start))
        })
        .collect()
}

fn out_of_range(from: NaiveDate) -> PlannerError {
    PlannerError::config(format!(
        "schedule starting {} runs past the supported calendar range",
        from
    ))
}
