//! Dose schedule evaluation
//!
//! Status is recomputed fresh on every call from `(now, last injection,
//! profile)`; nothing here is a persisted state machine.

use crate::models::{DoseMg, InjectionEntry, InjectionSite, ProfileSnapshot};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Fixed cadence between injections; not user-configurable
pub const DOSE_INTERVAL_DAYS: i64 = 7;

const SECONDS_PER_DAY: i64 = 86_400;

/// Schedule status derived from the countdown to the next due date
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    NotStarted,
    OnTrack,
    DueSoon,
    DueToday,
    Overdue,
}

/// Display summary of the most recent injection
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LastInjectionSummary {
    pub dose_mg: DoseMg,
    pub days_since: i64,
}

/// Derived schedule state for the next dose
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleOutlook {
    pub next_due_date: DateTime<Utc>,
    /// Negative when the dose is overdue
    pub days_until_due: i64,
    pub status: ScheduleStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_injection: Option<LastInjectionSummary>,
    /// Advisory display metadata (0-6, 0 = Sunday); never shifts the due date
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_injection_day: Option<u8>,
}

/// Whole days from `from` to `to`, rounding up
///
/// The countdown uses ceiling division while `days_since` uses floor. The
/// asymmetry is intentional: at exactly 7x24h elapsed the countdown reads 0
/// (due today) while the elapsed counter reads 7.
fn days_until_ceil(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    let secs = (to - from).num_seconds();
    secs.div_euclid(SECONDS_PER_DAY) + i64::from(secs.rem_euclid(SECONDS_PER_DAY) > 0)
}

/// Whole days elapsed from `from` to `to`, rounding down
fn days_since_floor(from: DateTime<Utc>, to: DateTime<Utc>) -> i64 {
    (to - from).num_seconds().div_euclid(SECONDS_PER_DAY)
}

/// Evaluate the dose schedule as of `now`
///
/// With no injection on record the next dose is due at the treatment start
/// date (or immediately when no profile exists) and the status is
/// `NotStarted`. Otherwise the next due date is a fixed 7 days after the
/// most recent injection, classified by countdown: `<0` overdue, `0` due
/// today, `1-2` due soon, `>2` on track.
pub fn evaluate_schedule(
    now: DateTime<Utc>,
    last_injection: Option<&InjectionEntry>,
    profile: Option<&ProfileSnapshot>,
) -> ScheduleOutlook {
    let preferred_injection_day = profile.and_then(|p| p.preferred_injection_day);

    let Some(injection) = last_injection else {
        let next_due_date = profile
            .and_then(|p| p.treatment_start_date)
            .unwrap_or(now);
        return ScheduleOutlook {
            next_due_date,
            days_until_due: days_until_ceil(now, next_due_date).max(0),
            status: ScheduleStatus::NotStarted,
            last_injection: None,
            preferred_injection_day,
        };
    };

    let next_due_date = injection.injection_date + Duration::days(DOSE_INTERVAL_DAYS);
    let days_until_due = days_until_ceil(now, next_due_date);
    let status = match days_until_due {
        d if d < 0 => ScheduleStatus::Overdue,
        0 => ScheduleStatus::DueToday,
        1..=2 => ScheduleStatus::DueSoon,
        _ => ScheduleStatus::OnTrack,
    };

    ScheduleOutlook {
        next_due_date,
        days_until_due,
        status,
        last_injection: Some(LastInjectionSummary {
            dose_mg: injection.dose_mg,
            days_since: days_since_floor(injection.injection_date, now),
        }),
        preferred_injection_day,
    }
}

/// Frequency of each anatomical site over a sequence of injections, for
/// site-rotation display
pub fn site_counts(injections: &[InjectionEntry]) -> BTreeMap<InjectionSite, usize> {
    let mut counts = BTreeMap::new();
    for injection in injections {
        *counts.entry(injection.site).or_insert(0) += 1;
    }
    counts
}
