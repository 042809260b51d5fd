//! Dosetrack Engine
//!
//! The treatment progress and scheduling core of a personal
//! medication-and-weight tracking app. Raw, irregularly-timed log entries
//! (weekly injections, weight measurements, daily wellness check-ins) go
//! in; derived state comes out: next-dose schedule status, weight/BMI
//! statistics over arbitrary periods, goal progress, weekly wellness
//! summaries, calendar day-matrices, and logging streaks.
//!
//! The engine is pure: it owns no persistence, holds no cross-call state,
//! and performs no I/O. The surrounding HTTP and storage layers fetch
//! records, hand them over as a [`snapshot::UserSnapshot`], and serialize
//! whatever comes back. All values crossing the engine boundary are metric
//! (kg, cm); unit conversion lives in [`units`] and happens only at the
//! presentation edge.

pub mod calendar;
pub mod errors;
pub mod metrics;
pub mod models;
pub mod schedule;
pub mod snapshot;
pub mod stats;
pub mod streak;
pub mod units;
pub mod validation;
pub mod weekly;

// Re-export commonly used items
pub use errors::EngineError;
pub use models::{
    ActivityRecord, DailyLogEntry, DateRange, DietRecord, DoseMg, InjectionEntry, InjectionSite,
    MentalRecord, ProfileSnapshot, SideEffectRecord, WeightEntry,
};
pub use snapshot::{SnapshotView, UserSnapshot};
