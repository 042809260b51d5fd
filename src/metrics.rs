//! Core metric calculations: BMI, weight change, goal progress, treatment
//! numbering, and aggregate statistics over a weight sequence
//!
//! Everything here is a pure function over metric values. Sequences are
//! trusted to arrive in chronological order; nothing here sorts.

use crate::errors::EngineError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Round to 1 decimal place
pub(crate) fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Round to 2 decimal places
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ============================================================================
// BMI
// ============================================================================

/// BMI category classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BmiCategory {
    Underweight,
    Normal,
    Overweight,
    ObeseClass1,
    ObeseClass2,
    ObeseClass3,
}

impl BmiCategory {
    /// Get a human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::Normal => "Normal",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::ObeseClass1 => "Obese (Class I)",
            BmiCategory::ObeseClass2 => "Obese (Class II)",
            BmiCategory::ObeseClass3 => "Obese (Class III)",
        }
    }
}

/// Calculate BMI from weight and height
///
/// Formula: BMI = weight(kg) / height(m)².
///
/// Zero weight returns 0 (an empty-state placeholder, not an error); a
/// non-positive height or negative weight is rejected.
pub fn calculate_bmi(weight_kg: f64, height_cm: f64) -> Result<f64, EngineError> {
    if height_cm <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "Height must be positive, got {} cm",
            height_cm
        )));
    }
    if weight_kg < 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "Weight cannot be negative, got {} kg",
            weight_kg
        )));
    }
    if weight_kg == 0.0 {
        return Ok(0.0);
    }
    let height_m = height_cm / 100.0;
    Ok(weight_kg / (height_m * height_m))
}

/// Classify BMI into category
///
/// Bands are inclusive on their lower bound: 18.5, 25, 30, 35, 40.
pub fn get_bmi_category(bmi: f64) -> BmiCategory {
    if bmi < 18.5 {
        BmiCategory::Underweight
    } else if bmi < 25.0 {
        BmiCategory::Normal
    } else if bmi < 30.0 {
        BmiCategory::Overweight
    } else if bmi < 35.0 {
        BmiCategory::ObeseClass1
    } else if bmi < 40.0 {
        BmiCategory::ObeseClass2
    } else {
        BmiCategory::ObeseClass3
    }
}

// ============================================================================
// Weight Change
// ============================================================================

/// Signed change from start to current (negative = loss)
pub fn calculate_total_change(start: f64, current: f64) -> f64 {
    current - start
}

/// Percentage change relative to the starting weight
pub fn calculate_percent_change(start: f64, current: f64) -> Result<f64, EngineError> {
    if start <= 0.0 {
        return Err(EngineError::InvalidInput(format!(
            "Starting weight must be positive, got {} kg",
            start
        )));
    }
    Ok((current - start) / start * 100.0)
}

/// Average change per week; 0 when no full week has elapsed
pub fn calculate_weekly_average(total_change: f64, weeks: i64) -> f64 {
    if weeks <= 0 {
        return 0.0;
    }
    total_change / weeks as f64
}

/// Signed distance to goal (positive = still above goal)
pub fn calculate_to_goal(current: f64, goal: f64) -> f64 {
    current - goal
}

/// Progress toward the goal weight as a percentage, clamped to [0, 100]
///
/// When the start is already at or below the goal there is nothing to lose;
/// progress reports 100 rather than dividing by a non-positive span.
pub fn calculate_goal_progress(start: f64, current: f64, goal: f64) -> f64 {
    let span = start - goal;
    if span <= 0.0 {
        return 100.0;
    }
    let progress = (start - current) / span * 100.0;
    progress.clamp(0.0, 100.0)
}

// ============================================================================
// Treatment Numbering
// ============================================================================

/// 1-indexed treatment week: days 0-6 are week 1
pub fn calculate_treatment_week(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    let days_elapsed = (now - start).num_days();
    days_elapsed / 7 + 1
}

/// 1-indexed treatment day
pub fn calculate_treatment_day(start: DateTime<Utc>, now: DateTime<Utc>) -> i64 {
    (now - start).num_days() + 1
}

// ============================================================================
// Weight Sequence Statistics
// ============================================================================

/// Aggregate statistics over a chronologically ordered weight sequence,
/// each value rounded to 2 decimals
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightStats {
    pub min: f64,
    pub max: f64,
    pub avg: f64,
    pub first: f64,
    pub last: f64,
    pub change: f64,
}

/// Compute min/max/avg/first/last over an ordered weight sequence
///
/// Returns `None` for an empty sequence (zero logged weights is a valid
/// state, not an error). The sequence is trusted to be chronological.
pub fn calculate_weight_stats(weights: &[f64]) -> Option<WeightStats> {
    let first = *weights.first()?;
    let last = *weights.last()?;
    let mut min = f64::INFINITY;
    let mut max = f64::NEG_INFINITY;
    let mut sum = 0.0;
    for &w in weights {
        min = min.min(w);
        max = max.max(w);
        sum += w;
    }
    let avg = sum / weights.len() as f64;
    Some(WeightStats {
        min: round2(min),
        max: round2(max),
        avg: round2(avg),
        first: round2(first),
        last: round2(last),
        change: round2(last - first),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;
    use rstest::rstest;

    #[test]
    fn test_bmi_calculation() {
        // 70kg, 175cm -> BMI ~22.86
        let bmi = calculate_bmi(70.0, 175.0).unwrap();
        assert!((bmi - 22.86).abs() < 0.01);
    }

    #[test]
    fn test_bmi_zero_weight_is_placeholder() {
        assert_eq!(calculate_bmi(0.0, 175.0).unwrap(), 0.0);
    }

    #[rstest]
    #[case(70.0, 0.0)]
    #[case(70.0, -175.0)]
    #[case(-70.0, 175.0)]
    fn test_bmi_invalid_input(#[case] weight: f64, #[case] height: f64) {
        assert!(matches!(
            calculate_bmi(weight, height),
            Err(EngineError::InvalidInput(_))
        ));
    }

    #[rstest]
    #[case(18.49, BmiCategory::Underweight)]
    #[case(18.5, BmiCategory::Normal)]
    #[case(24.99, BmiCategory::Normal)]
    #[case(25.0, BmiCategory::Overweight)]
    #[case(30.0, BmiCategory::ObeseClass1)]
    #[case(35.0, BmiCategory::ObeseClass2)]
    #[case(40.0, BmiCategory::ObeseClass3)]
    #[case(55.0, BmiCategory::ObeseClass3)]
    fn test_bmi_category_boundaries(#[case] bmi: f64, #[case] expected: BmiCategory) {
        assert_eq!(get_bmi_category(bmi), expected);
    }

    #[test]
    fn test_percent_change() {
        let pct = calculate_percent_change(90.0, 85.0).unwrap();
        assert!((pct - (-5.5555)).abs() < 0.001);
        assert!(calculate_percent_change(0.0, 85.0).is_err());
        assert!(calculate_percent_change(-1.0, 85.0).is_err());
    }

    #[test]
    fn test_weekly_average_guard() {
        assert_eq!(calculate_weekly_average(-5.0, 0), 0.0);
        assert_eq!(calculate_weekly_average(-5.0, -3), 0.0);
        assert_eq!(calculate_weekly_average(-6.0, 3), -2.0);
    }

    #[test]
    fn test_goal_progress_degenerate() {
        // Already at or below goal: 100, not a division by zero
        assert_eq!(calculate_goal_progress(75.0, 75.0, 75.0), 100.0);
        assert_eq!(calculate_goal_progress(70.0, 70.0, 75.0), 100.0);
    }

    #[test]
    fn test_goal_progress_scenario() {
        let progress = calculate_goal_progress(90.0, 85.0, 75.0);
        assert!((progress - 33.3333).abs() < 0.001);
    }

    #[test]
    fn test_treatment_numbering() {
        let start = Utc.with_ymd_and_hms(2025, 1, 6, 8, 0, 0).unwrap();
        // Day 0 is week 1, day 1
        assert_eq!(calculate_treatment_week(start, start), 1);
        assert_eq!(calculate_treatment_day(start, start), 1);
        // Day 6 is still week 1
        let day6 = start + chrono::Duration::days(6);
        assert_eq!(calculate_treatment_week(start, day6), 1);
        assert_eq!(calculate_treatment_day(start, day6), 7);
        // Day 7 rolls into week 2
        let day7 = start + chrono::Duration::days(7);
        assert_eq!(calculate_treatment_week(start, day7), 2);
        assert_eq!(calculate_treatment_day(start, day7), 8);
    }

    #[test]
    fn test_weight_stats_empty() {
        assert!(calculate_weight_stats(&[]).is_none());
    }

    #[test]
    fn test_weight_stats_scenario() {
        let stats = calculate_weight_stats(&[90.0, 88.0, 86.0, 85.0]).unwrap();
        assert_eq!(stats.first, 90.0);
        assert_eq!(stats.last, 85.0);
        assert_eq!(stats.min, 85.0);
        assert_eq!(stats.max, 90.0);
        assert_eq!(stats.avg, 87.25);
        assert_eq!(stats.change, -5.0);
    }

    #[test]
    fn test_weight_stats_trusts_ordering() {
        // First/last are positional, not extremal
        let stats = calculate_weight_stats(&[85.0, 90.0, 87.0]).unwrap();
        assert_eq!(stats.first, 85.0);
        assert_eq!(stats.last, 87.0);
        assert_eq!(stats.min, 85.0);
        assert_eq!(stats.max, 90.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: BMI matches the formula and is non-negative
        #[test]
        fn prop_bmi_formula(weight in 0.0f64..500.0, height in 100.0f64..250.0) {
            let bmi = calculate_bmi(weight, height).unwrap();
            let height_m = height / 100.0;
            if weight > 0.0 {
                prop_assert!((bmi - weight / (height_m * height_m)).abs() < 1e-9);
            }
            prop_assert!(bmi >= 0.0);
        }

        /// Property: non-positive height always rejected
        #[test]
        fn prop_bmi_rejects_bad_height(weight in 0.0f64..500.0, height in -250.0f64..=0.0) {
            prop_assert!(calculate_bmi(weight, height).is_err());
        }

        /// Property: goal progress is clamped within [0, 100]
        #[test]
        fn prop_goal_progress_clamped(
            start in 40.0f64..300.0,
            current in 40.0f64..300.0,
            goal in 40.0f64..300.0
        ) {
            let progress = calculate_goal_progress(start, current, goal);
            prop_assert!((0.0..=100.0).contains(&progress));
        }

        /// Property: progress is non-decreasing as current drops toward goal
        #[test]
        fn prop_goal_progress_monotonic(
            goal in 40.0f64..100.0,
            span in 1.0f64..100.0,
            step in 0.1f64..50.0
        ) {
            let start = goal + span;
            let current = goal + span / 2.0;
            let closer = (current - step).max(goal);
            let p1 = calculate_goal_progress(start, current, goal);
            let p2 = calculate_goal_progress(start, closer, goal);
            prop_assert!(p2 >= p1);
        }

        /// Property: stats bounds hold for any non-empty sequence
        #[test]
        fn prop_weight_stats_bounds(weights in proptest::collection::vec(20.0f64..500.0, 1..50)) {
            let stats = calculate_weight_stats(&weights).unwrap();
            prop_assert!(stats.min <= stats.max);
            prop_assert!(stats.min <= stats.avg + 0.01 && stats.avg <= stats.max + 0.01);
        }
    }
}
