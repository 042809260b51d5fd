//! Calendar month day-matrix and month summary
//!
//! Intraday timestamps collapse to their date portion; when two entries of
//! the same kind share a date the last one processed wins.

use crate::errors::EngineError;
use crate::metrics::round2;
use crate::models::{DailyLogEntry, DoseMg, InjectionEntry, WeightEntry};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Presence flags for one calendar day, shared with the week-strip builder
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayPresence {
    pub has_weight: bool,
    pub has_injection: bool,
    pub has_log: bool,
}

/// Probe the three log types for entries on a single date
pub fn day_presence(
    date: NaiveDate,
    weights: &[WeightEntry],
    injections: &[InjectionEntry],
    logs: &[DailyLogEntry],
) -> DayPresence {
    DayPresence {
        has_weight: weights.iter().any(|w| w.recorded_at.date_naive() == date),
        has_injection: injections
            .iter()
            .any(|i| i.injection_date.date_naive() == date),
        has_log: logs.iter().any(|l| l.date == date),
    }
}

/// One day of the month matrix
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub has_weight: bool,
    pub has_injection: bool,
    pub has_log: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dose_mg: Option<DoseMg>,
    pub side_effects_count: usize,
}

impl CalendarDay {
    fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            has_weight: false,
            has_injection: false,
            has_log: false,
            weight_kg: None,
            dose_mg: None,
            side_effects_count: 0,
        }
    }
}

/// Month-level roll-up
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSummary {
    pub weight_entries: usize,
    pub injections: usize,
    pub logs_completed: usize,
    /// First weight chronologically within the month (not global)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_weight: Option<f64>,
    /// Last weight chronologically within the month (not global)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_change: Option<f64>,
}

/// Per-day matrix plus summary for one calendar month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
    pub summary: MonthSummary,
}

/// Number of days in a month, leap-year aware
pub fn days_in_month(year: i32, month: u32) -> Result<u32, EngineError> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidInput(format!(
            "Month must be 1-12, got {}",
            month
        )));
    }
    let first = NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| EngineError::InvalidInput(format!("Invalid year: {}", year)))?;
    let next_month = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)
    }
    .ok_or_else(|| EngineError::InvalidInput(format!("Invalid year: {}", year)))?;
    Ok((next_month - first).num_days() as u32)
}

/// Build the day matrix for one month from the three log types
///
/// Callers supply the month's records in chronological order; entries whose
/// dates fall outside the month are ignored.
pub fn build_month(
    year: i32,
    month: u32,
    weights: &[WeightEntry],
    injections: &[InjectionEntry],
    logs: &[DailyLogEntry],
) -> Result<CalendarMonth, EngineError> {
    let day_count = days_in_month(year, month)?;

    let mut days: Vec<CalendarDay> = (1..=day_count)
        .map(|day| {
            // Day numbers are valid by construction
            CalendarDay::empty(NaiveDate::from_ymd_opt(year, month, day).unwrap())
        })
        .collect();

    let in_month =
        |date: NaiveDate| -> Option<usize> {
            (date.year() == year && date.month() == month).then(|| date.day() as usize - 1)
        };

    let mut summary = MonthSummary {
        weight_entries: 0,
        injections: 0,
        logs_completed: 0,
        start_weight: None,
        end_weight: None,
        monthly_change: None,
    };

    for weight in weights {
        if let Some(idx) = in_month(weight.recorded_at.date_naive()) {
            days[idx].has_weight = true;
            days[idx].weight_kg = Some(weight.weight_kg);
            summary.weight_entries += 1;
            if summary.start_weight.is_none() {
                summary.start_weight = Some(weight.weight_kg);
            }
            summary.end_weight = Some(weight.weight_kg);
        }
    }
    for injection in injections {
        if let Some(idx) = in_month(injection.injection_date.date_naive()) {
            days[idx].has_injection = true;
            days[idx].dose_mg = Some(injection.dose_mg);
            summary.injections += 1;
        }
    }
    for log in logs {
        if let Some(idx) = in_month(log.date) {
            days[idx].has_log = true;
            days[idx].side_effects_count = log.side_effects.len();
            summary.logs_completed += 1;
        }
    }

    summary.monthly_change = match (summary.start_weight, summary.end_weight) {
        (Some(start), Some(end)) => Some(round2(end - start)),
        _ => None,
    };

    Ok(CalendarMonth {
        year,
        month,
        days,
        summary,
    })
}
