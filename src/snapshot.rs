//! Request-scoped snapshot and memoization
//!
//! The persistence collaborator fetches a user's records once per request
//! and hands them over as a `UserSnapshot`; `SnapshotView` wraps the
//! snapshot with memo slots so repeated derivations within one request are
//! computed once. The memoization is owned by the view value the caller
//! creates, never module-level state, and nothing survives the request.

use crate::calendar::{self, CalendarMonth};
use crate::errors::EngineError;
use crate::metrics;
use crate::models::{DailyLogEntry, DateRange, InjectionEntry, ProfileSnapshot, WeightEntry};
use crate::schedule::{self, ScheduleOutlook};
use crate::stats::{self, ProgressSummary};
use crate::streak::{self, WeekStripDay};
use crate::weekly::{self, WeeklySummary};
use chrono::{DateTime, NaiveDate, Utc};
use once_cell::unsync::OnceCell;

/// All records the engine reads for one user, fetched once per request
///
/// `weights` and `injections` must be in chronological order; the fetches
/// behind the four collections are independent and the calling layer is
/// free to issue them concurrently.
#[derive(Debug, Clone, Default)]
pub struct UserSnapshot {
    pub profile: Option<ProfileSnapshot>,
    pub weights: Vec<WeightEntry>,
    pub injections: Vec<InjectionEntry>,
    pub daily_logs: Vec<DailyLogEntry>,
}

impl UserSnapshot {
    pub fn first_weight(&self) -> Option<&WeightEntry> {
        self.weights.first()
    }

    pub fn latest_weight(&self) -> Option<&WeightEntry> {
        self.weights.last()
    }

    pub fn last_injection(&self) -> Option<&InjectionEntry> {
        self.injections.last()
    }

    /// Weight entries whose dates fall inside the window, preserving order
    pub fn weights_in_window(&self, window: &DateRange) -> Vec<WeightEntry> {
        self.weights
            .iter()
            .filter(|w| window.contains(w.recorded_at.date_naive()))
            .cloned()
            .collect()
    }
}

/// One request's derived-state view over a snapshot
///
/// Derivations that depend only on `(snapshot, now)` are memoized; the
/// window- and month-parameterized ones are computed per call.
pub struct SnapshotView<'a> {
    snapshot: &'a UserSnapshot,
    now: DateTime<Utc>,
    schedule: OnceCell<ScheduleOutlook>,
    streak: OnceCell<u32>,
}

impl<'a> SnapshotView<'a> {
    pub fn new(snapshot: &'a UserSnapshot, now: DateTime<Utc>) -> Self {
        Self {
            snapshot,
            now,
            schedule: OnceCell::new(),
            streak: OnceCell::new(),
        }
    }

    pub fn snapshot(&self) -> &UserSnapshot {
        self.snapshot
    }

    /// Dose schedule outlook as of the view's `now`, computed once
    pub fn schedule(&self) -> &ScheduleOutlook {
        self.schedule.get_or_init(|| {
            schedule::evaluate_schedule(
                self.now,
                self.snapshot.last_injection(),
                self.snapshot.profile.as_ref(),
            )
        })
    }

    /// Consecutive-day logging streak ending today, computed once
    pub fn streak(&self) -> u32 {
        *self.streak.get_or_init(|| {
            streak::calculate_streak(
                self.now.date_naive(),
                &self.snapshot.daily_logs,
                &self.snapshot.weights,
            )
        })
    }

    /// Period + overall progress statistics, optionally windowed
    pub fn progress(&self, window: Option<&DateRange>) -> Result<ProgressSummary, EngineError> {
        let windowed;
        let entries: &[WeightEntry] = match window {
            Some(range) => {
                windowed = self.snapshot.weights_in_window(range);
                &windowed
            }
            None => &self.snapshot.weights,
        };
        stats::summarize_period(
            entries,
            self.snapshot.first_weight(),
            self.snapshot.latest_weight(),
            self.snapshot.profile.as_ref(),
        )
    }

    /// Wellness summary for the Monday-anchored week containing `date`
    pub fn weekly_summary(&self, date: NaiveDate) -> WeeklySummary {
        weekly::summarize_week(weekly::week_start_monday(date), &self.snapshot.daily_logs)
    }

    /// Day matrix and summary for one calendar month
    pub fn calendar_month(&self, year: i32, month: u32) -> Result<CalendarMonth, EngineError> {
        calendar::build_month(
            year,
            month,
            &self.snapshot.weights,
            &self.snapshot.injections,
            &self.snapshot.daily_logs,
        )
    }

    /// Rolling 7-day activity strip around today
    pub fn week_strip(&self) -> Vec<WeekStripDay> {
        streak::build_week_strip(
            self.now.date_naive(),
            &self.snapshot.weights,
            &self.snapshot.daily_logs,
            &self.snapshot.injections,
        )
    }

    /// 1-indexed treatment day, when a start date is on record
    pub fn treatment_day(&self) -> Option<i64> {
        self.snapshot
            .profile
            .as_ref()
            .and_then(|p| p.treatment_start_date)
            .map(|start| metrics::calculate_treatment_day(start, self.now))
    }

    /// 1-indexed treatment week, when a start date is on record
    pub fn treatment_week(&self) -> Option<i64> {
        self.snapshot
            .profile
            .as_ref()
            .and_then(|p| p.treatment_start_date)
            .map(|start| metrics::calculate_treatment_week(start, self.now))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedule::ScheduleStatus;
    use chrono::{Duration, TimeZone};
    use uuid::Uuid;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap()
    }

    fn weight(kg: f64, days_ago: i64) -> WeightEntry {
        WeightEntry {
            id: Uuid::new_v4(),
            weight_kg: kg,
            recorded_at: now() - Duration::days(days_ago),
            notes: None,
        }
    }

    #[test]
    fn test_memoized_schedule_is_stable() {
        let snapshot = UserSnapshot::default();
        let view = SnapshotView::new(&snapshot, now());
        let first = view.schedule().clone();
        assert_eq!(first.status, ScheduleStatus::NotStarted);
        assert_eq!(view.schedule(), &first);
    }

    #[test]
    fn test_windowed_progress() {
        let snapshot = UserSnapshot {
            weights: vec![weight(90.0, 21), weight(88.0, 14), weight(86.0, 7), weight(85.0, 0)],
            ..Default::default()
        };
        let view = SnapshotView::new(&snapshot, now());

        // Window covering only the last two entries
        let window = DateRange {
            start: (now() - Duration::days(8)).date_naive(),
            end: now().date_naive(),
        };
        let summary = view.progress(Some(&window)).unwrap();
        let period = summary.period.unwrap();
        assert_eq!(period.count, 2);
        assert_eq!(period.start_weight, 86.0);
        assert_eq!(period.end_weight, 85.0);
        // Overall stays anchored to the full history
        assert_eq!(summary.overall.starting_weight, Some(90.0));
        assert_eq!(summary.overall.current_weight, Some(85.0));
    }

    #[test]
    fn test_treatment_numbering_requires_start_date() {
        let snapshot = UserSnapshot::default();
        let view = SnapshotView::new(&snapshot, now());
        assert_eq!(view.treatment_day(), None);
        assert_eq!(view.treatment_week(), None);

        let snapshot = UserSnapshot {
            profile: Some(ProfileSnapshot {
                treatment_start_date: Some(now() - Duration::days(10)),
                ..Default::default()
            }),
            ..Default::default()
        };
        let view = SnapshotView::new(&snapshot, now());
        assert_eq!(view.treatment_day(), Some(11));
        assert_eq!(view.treatment_week(), Some(2));
    }

    #[test]
    fn test_streak_from_snapshot() {
        let snapshot = UserSnapshot {
            weights: vec![weight(86.0, 1), weight(85.0, 0)],
            ..Default::default()
        };
        let view = SnapshotView::new(&snapshot, now());
        assert_eq!(view.streak(), 2);
    }
}
