//! Logging streak and rolling week strip

use crate::calendar::day_presence;
use crate::models::{DailyLogEntry, InjectionEntry, WeightEntry};
use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound on the backward walk; keeps worst-case cost flat on accounts
/// with long histories
pub const STREAK_MAX_DAYS: u32 = 365;

/// Consecutive days (walking back from today) with at least one qualifying log
///
/// A day qualifies with either a daily check-in or a weight entry. The walk
/// stops at the first bare day; if today itself has neither, the streak is 0
/// (it does not look further back).
pub fn calculate_streak(
    today: NaiveDate,
    logs: &[DailyLogEntry],
    weights: &[WeightEntry],
) -> u32 {
    let logged_dates: HashSet<NaiveDate> = logs
        .iter()
        .map(|log| log.date)
        .chain(weights.iter().map(|w| w.recorded_at.date_naive()))
        .collect();

    let mut streak = 0;
    let mut day = today;
    while streak < STREAK_MAX_DAYS && logged_dates.contains(&day) {
        streak += 1;
        day -= Duration::days(1);
    }
    streak
}

/// One day of the rolling week strip
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeekStripDay {
    pub date: NaiveDate,
    pub has_weight: bool,
    pub has_checkin: bool,
    pub has_injection: bool,
}

/// Fixed 7-day strip spanning 2 days before today through 4 days after
///
/// This is a rolling UI window, not a calendar week; presence per day comes
/// from the calendar module's probe.
pub fn build_week_strip(
    today: NaiveDate,
    weights: &[WeightEntry],
    logs: &[DailyLogEntry],
    injections: &[InjectionEntry],
) -> Vec<WeekStripDay> {
    (-2..=4)
        .map(|offset| {
            let date = today + Duration::days(offset);
            let presence = day_presence(date, weights, injections, logs);
            WeekStripDay {
                date,
                has_weight: presence.has_weight,
                has_checkin: presence.has_log,
                has_injection: presence.has_injection,
            }
        })
        .collect()
}
