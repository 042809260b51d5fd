//! Period and lifetime progress statistics
//!
//! The period block is computed over the caller's windowed slice; the
//! overall block is anchored to the profile and the globally first/latest
//! entries, independent of any requested window.

use crate::errors::EngineError;
use crate::metrics::{self, round2};
use crate::models::{ProfileSnapshot, WeightEntry};
use serde::{Deserialize, Serialize};

/// Statistics over the weight entries inside a requested window
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodStats {
    pub count: usize,
    /// First entry chronologically in the window (not the minimum)
    pub start_weight: f64,
    /// Last entry chronologically in the window (not the maximum)
    pub end_weight: f64,
    pub min_weight: f64,
    pub max_weight: f64,
    pub avg_weight: f64,
    pub total_change: f64,
    pub percent_change: f64,
}

/// Lifetime progress, each field independently absent when its inputs are
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct OverallProgress {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_lost: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub remaining_to_goal: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub progress_percent: Option<f64>,
}

/// Combined period + lifetime view returned to the presentation layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressSummary {
    /// `None` when the window holds no entries (a valid empty state)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub period: Option<PeriodStats>,
    pub overall: OverallProgress,
}

/// Summarize progress over a windowed slice of weight entries
///
/// `entries_in_window` must be chronological. `first_ever` and `latest` are
/// the all-time first and most recent entries regardless of the window;
/// they anchor the overall block.
pub fn summarize_period(
    entries_in_window: &[WeightEntry],
    first_ever: Option<&WeightEntry>,
    latest: Option<&WeightEntry>,
    profile: Option<&ProfileSnapshot>,
) -> Result<ProgressSummary, EngineError> {
    let weights: Vec<f64> = entries_in_window.iter().map(|e| e.weight_kg).collect();

    let period = match metrics::calculate_weight_stats(&weights) {
        Some(stats) => Some(PeriodStats {
            count: weights.len(),
            start_weight: stats.first,
            end_weight: stats.last,
            min_weight: stats.min,
            max_weight: stats.max,
            avg_weight: stats.avg,
            total_change: stats.change,
            percent_change: round2(metrics::calculate_percent_change(
                stats.first,
                stats.last,
            )?),
        }),
        None => None,
    };

    Ok(ProgressSummary {
        period,
        overall: overall_progress(first_ever, latest, profile),
    })
}

/// Lifetime progress anchored to the profile or the first/latest entries
///
/// Starting weight prefers the profile value and falls back to the first
/// entry ever logged. No operand is silently defaulted: each derived field
/// is absent unless everything it needs is present.
pub fn overall_progress(
    first_ever: Option<&WeightEntry>,
    latest: Option<&WeightEntry>,
    profile: Option<&ProfileSnapshot>,
) -> OverallProgress {
    let starting_weight = profile
        .and_then(|p| p.starting_weight_kg)
        .or_else(|| first_ever.map(|e| e.weight_kg));
    let current_weight = latest.map(|e| e.weight_kg);
    let goal_weight = profile.and_then(|p| p.goal_weight_kg);

    let total_lost = match (starting_weight, current_weight) {
        (Some(start), Some(current)) => Some(round2(start - current)),
        _ => None,
    };
    let remaining_to_goal = match (current_weight, goal_weight) {
        (Some(current), Some(goal)) => Some(round2(metrics::calculate_to_goal(current, goal))),
        _ => None,
    };
    let progress_percent = match (starting_weight, current_weight, goal_weight) {
        (Some(start), Some(current), Some(goal)) => {
            Some(round2(metrics::calculate_goal_progress(start, current, goal)))
        }
        _ => None,
    };

    OverallProgress {
        starting_weight,
        current_weight,
        goal_weight,
        total_lost,
        remaining_to_goal,
        progress_percent,
    }
}
