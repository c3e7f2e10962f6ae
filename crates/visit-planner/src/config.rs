//! Engine configuration.
//!
//! Defaults reproduce the console's historical behavior: sessions start at
//! 09:00, end times wrap at midnight without advancing the date, and partner
//! lists are relayed exactly as the lookup returned them.
//!
//! Hosts can load overrides from the environment with [`PlannerConfig::from_env`]:
//!
//! | Variable                           | Field             |
//! |------------------------------------|-------------------|
//! | `VISIT_PLANNER_SESSION_START`      | `session_start`   |
//! | `VISIT_PLANNER_MAX_SCAN_DAYS`      | `max_scan_days`   |
//! | `VISIT_PLANNER_MIDNIGHT_POLICY`    | `midnight_policy` |
//! | `VISIT_PLANNER_LOCAL_FILTER`       | `local_filter`    |
//! | `VISIT_PLANNER_RANKING`            | `ranking`         |

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::clock::TimeOfDay;
use crate::error::{PlannerError, Result};

pub const DEFAULT_SESSION_START: TimeOfDay = TimeOfDay::NINE_AM;

/// Roughly ten years of look-ahead for the weekday scan.
pub const DEFAULT_MAX_SCAN_DAYS: u32 = 3660;

/// What to do when `start + duration` runs past midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MidnightPolicy {
    /// Wrap the end time modulo 24h and keep the slot's date.
    #[default]
    Wrap,
    /// Refuse to generate sessions that end on a later calendar day.
    Reject,
}

/// Order of the partner list handed back to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ranking {
    /// Keep the order the lookup returned.
    #[default]
    AsReceived,
    /// Highest availability first; ties keep lookup order.
    ByAvailability,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlannerConfig {
    pub session_start: TimeOfDay,
    pub max_scan_days: u32,
    pub midnight_policy: MidnightPolicy,
    /// Drop partners below the threshold after the lookup returns.
    pub local_filter: bool,
    pub ranking: Ranking,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            session_start: DEFAULT_SESSION_START,
            max_scan_days: DEFAULT_MAX_SCAN_DAYS,
            midnight_policy: MidnightPolicy::Wrap,
            local_filter: false,
            ranking: Ranking::AsReceived,
        }
    }
}

impl PlannerConfig {
    /// Load from `VISIT_PLANNER_*` environment variables, defaulting any that are unset.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`from_env`](Self::from_env) but reads variables through `get`.
    pub fn from_lookup<F>(get: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Ok(Self {
            session_start: read(&get, "VISIT_PLANNER_SESSION_START", defaults.session_start)?,
            max_scan_days: read(&get, "VISIT_PLANNER_MAX_SCAN_DAYS", defaults.max_scan_days)?,
            midnight_policy: read(
                &get,
                "VISIT_PLANNER_MIDNIGHT_POLICY",
                defaults.midnight_policy,
            )?,
            local_filter: read(&get, "VISIT_PLANNER_LOCAL_FILTER", defaults.local_filter)?,
            ranking: read(&get, "VISIT_PLANNER_RANKING", defaults.ranking)?,
        })
    }
}

fn read<F, T>(get: &F, key: &str, default: T) -> Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key).as_deref().map(str::trim) {
        None | Some("") => Ok(default),
        Some(raw) => raw.parse().map_err(|e| {
            PlannerError::config(format!("invalid value for {}: '{}' ({})", key, raw, e))
        }),
    }
}

impl FromStr for MidnightPolicy {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "wrap" => Ok(MidnightPolicy::Wrap),
            "reject" => Ok(MidnightPolicy::Reject),
            _ => Err(PlannerError::config("expected 'wrap' or 'reject'")),
        }
    }
}

impl FromStr for Ranking {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "as_received" => Ok(Ranking::AsReceived),
            "by_availability" => Ok(Ranking::ByAvailability),
            _ => Err(PlannerError::config(
                "expected 'as_received' or 'by_availability'",
            )),
        }
    }
}
