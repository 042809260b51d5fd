//! Weekly wellness aggregation over daily check-ins
//!
//! Weeks are anchored to Monday regardless of locale; Sunday belongs to the
//! week that started the preceding Monday. Every aggregate is zero/empty
//! safe: a week with no check-ins summarizes to zeros, never an error.

use crate::metrics::{round1, round2};
use crate::models::DailyLogEntry;
use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Monday of the week containing `date`
pub fn week_start_monday(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// One side-effect type aggregated across the week
///
/// Severities are the ordered raw values observed, not an average; the
/// full list is preserved for downstream display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideEffectSummary {
    pub effect_type: String,
    pub occurrences: usize,
    pub severities: Vec<u8>,
}

/// Weekly activity aggregates
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ActivitySummary {
    /// Days with a duration logged; a steps-only entry is not a workout day
    pub workout_days: usize,
    pub total_minutes: i64,
    pub avg_minutes_per_workout: i64,
    pub total_steps: i64,
    /// Averaged over all days logged, not just days with step data
    pub avg_daily_steps: i64,
    pub workout_types: BTreeMap<String, usize>,
}

/// Weekly mental check-in values, one entry per day that set the field
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MentalSummary {
    pub moods: Vec<u8>,
    pub motivations: Vec<u8>,
    pub cravings: Vec<u8>,
}

/// Weekly diet aggregates; averages divide by diet-specific days logged
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DietSummary {
    /// Days with a diet sub-record, independent of the week-level count
    pub days_logged: usize,
    pub total_meals: u32,
    pub avg_meals_per_day: f64,
    pub total_protein_grams: f64,
    pub avg_protein_per_day: i64,
    pub total_water_liters: f64,
    pub avg_water_per_day: f64,
}

/// Aggregated wellness summary for one Monday-anchored week
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklySummary {
    pub week_start: NaiveDate,
    pub week_end: NaiveDate,
    /// Check-ins present this week, regardless of sub-record completeness
    pub days_logged: usize,
    pub side_effects: Vec<SideEffectSummary>,
    pub activity: ActivitySummary,
    pub mental: MentalSummary,
    pub diet: DietSummary,
}

/// Summarize the week starting at `week_start` (a Monday)
///
/// Entries outside `[week_start, week_start + 6]` are ignored, so callers
/// may pass a wider slice.
pub fn summarize_week(week_start: NaiveDate, logs: &[DailyLogEntry]) -> WeeklySummary {
    let week_end = week_start + Duration::days(6);

    let mut week_logs: Vec<&DailyLogEntry> = logs
        .iter()
        .filter(|log| log.date >= week_start && log.date <= week_end)
        .collect();
    week_logs.sort_by_key(|log| log.date);

    let days_logged = week_logs.len();

    // Side effects grouped by type, severities kept in day order
    let mut effects: BTreeMap<&str, SideEffectSummary> = BTreeMap::new();
    for log in &week_logs {
        for record in &log.side_effects {
            let summary = effects
                .entry(record.effect_type.as_str())
                .or_insert_with(|| SideEffectSummary {
                    effect_type: record.effect_type.clone(),
                    occurrences: 0,
                    severities: Vec::new(),
                });
            summary.occurrences += 1;
            if let Some(severity) = record.severity {
                summary.severities.push(severity);
            }
        }
    }

    let mut activity = ActivitySummary::default();
    for log in &week_logs {
        let Some(record) = &log.activity else { continue };
        if let Some(minutes) = record.duration_minutes {
            activity.workout_days += 1;
            activity.total_minutes += minutes;
        }
        if let Some(steps) = record.steps {
            activity.total_steps += steps;
        }
        if let Some(workout_type) = &record.workout_type {
            *activity.workout_types.entry(workout_type.clone()).or_insert(0) += 1;
        }
    }
    if activity.workout_days > 0 {
        activity.avg_minutes_per_workout =
            (activity.total_minutes as f64 / activity.workout_days as f64).round() as i64;
    }
    if days_logged > 0 {
        activity.avg_daily_steps =
            (activity.total_steps as f64 / days_logged as f64).round() as i64;
    }

    let mut mental = MentalSummary::default();
    for log in &week_logs {
        let Some(record) = &log.mental else { continue };
        if let Some(mood) = record.mood_level {
            mental.moods.push(mood);
        }
        if let Some(motivation) = record.motivation_level {
            mental.motivations.push(motivation);
        }
        if let Some(cravings) = record.cravings_level {
            mental.cravings.push(cravings);
        }
    }

    let mut diet = DietSummary::default();
    for log in &week_logs {
        let Some(record) = &log.diet else { continue };
        diet.days_logged += 1;
        diet.total_meals += record.meals_count.unwrap_or(0);
        diet.total_protein_grams += record.protein_grams.unwrap_or(0.0);
        diet.total_water_liters += record.water_liters.unwrap_or(0.0);
    }
    if diet.days_logged > 0 {
        let days = diet.days_logged as f64;
        diet.avg_meals_per_day = round1(f64::from(diet.total_meals) / days);
        diet.avg_protein_per_day = (diet.total_protein_grams / days).round() as i64;
        diet.avg_water_per_day = round2(diet.total_water_liters / days);
    }
    diet.total_water_liters = round2(diet.total_water_liters);

    WeeklySummary {
        week_start,
        week_end,
        days_logged,
        side_effects: effects.into_values().collect(),
        activity,
        mental,
        diet,
    }
}
