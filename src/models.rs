//! Input record types for the treatment progress engine
//!
//! These are the plain records the surrounding CRUD layers fetch from the
//! store and hand to the engine. The engine reads a snapshot at call time,
//! never mutates it, and returns new derived-value structures on every
//! invocation.
//!
//! All weights are kilograms and all heights centimeters; unit conversion is
//! strictly a presentation-boundary concern (see the `units` module).

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Date range for period queries (inclusive on both ends)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// A single body-weight measurement
///
/// Invariant: `weight_kg > 0`. Ordering by `recorded_at` is significant;
/// callers supply sequences in chronological order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightEntry {
    pub id: Uuid,
    pub weight_kg: f64,
    pub recorded_at: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Medication dose in milligrams
///
/// The dose set is closed: these are the titration steps of the weekly
/// medication, and arbitrary values are invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "f64", into = "f64")]
pub enum DoseMg {
    Mg2_5,
    Mg5,
    Mg7_5,
    Mg10,
    Mg12_5,
    Mg15,
}

impl DoseMg {
    /// Dose value in milligrams
    pub fn as_mg(&self) -> f64 {
        match self {
            DoseMg::Mg2_5 => 2.5,
            DoseMg::Mg5 => 5.0,
            DoseMg::Mg7_5 => 7.5,
            DoseMg::Mg10 => 10.0,
            DoseMg::Mg12_5 => 12.5,
            DoseMg::Mg15 => 15.0,
        }
    }

    /// Next step on the titration ladder, if any
    pub fn next_step(&self) -> Option<DoseMg> {
        match self {
            DoseMg::Mg2_5 => Some(DoseMg::Mg5),
            DoseMg::Mg5 => Some(DoseMg::Mg7_5),
            DoseMg::Mg7_5 => Some(DoseMg::Mg10),
            DoseMg::Mg10 => Some(DoseMg::Mg12_5),
            DoseMg::Mg12_5 => Some(DoseMg::Mg15),
            DoseMg::Mg15 => None,
        }
    }

    /// Display label, e.g. "2.5 mg"
    pub fn label(&self) -> &'static str {
        match self {
            DoseMg::Mg2_5 => "2.5 mg",
            DoseMg::Mg5 => "5 mg",
            DoseMg::Mg7_5 => "7.5 mg",
            DoseMg::Mg10 => "10 mg",
            DoseMg::Mg12_5 => "12.5 mg",
            DoseMg::Mg15 => "15 mg",
        }
    }
}

impl TryFrom<f64> for DoseMg {
    type Error = String;

    fn try_from(mg: f64) -> Result<Self, Self::Error> {
        match mg {
            x if x == 2.5 => Ok(DoseMg::Mg2_5),
            x if x == 5.0 => Ok(DoseMg::Mg5),
            x if x == 7.5 => Ok(DoseMg::Mg7_5),
            x if x == 10.0 => Ok(DoseMg::Mg10),
            x if x == 12.5 => Ok(DoseMg::Mg12_5),
            x if x == 15.0 => Ok(DoseMg::Mg15),
            _ => Err(format!("Unknown dose: {} mg", mg)),
        }
    }
}

impl From<DoseMg> for f64 {
    fn from(dose: DoseMg) -> f64 {
        dose.as_mg()
    }
}

impl fmt::Display for DoseMg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Anatomical injection site
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InjectionSite {
    AbdomenLeft,
    AbdomenRight,
    ThighLeft,
    ThighRight,
    UpperArmLeft,
    UpperArmRight,
}

impl InjectionSite {
    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            InjectionSite::AbdomenLeft => "Abdomen (left)",
            InjectionSite::AbdomenRight => "Abdomen (right)",
            InjectionSite::ThighLeft => "Thigh (left)",
            InjectionSite::ThighRight => "Thigh (right)",
            InjectionSite::UpperArmLeft => "Upper arm (left)",
            InjectionSite::UpperArmRight => "Upper arm (right)",
        }
    }
}

impl fmt::Display for InjectionSite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl std::str::FromStr for InjectionSite {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "abdomen_left" => Ok(InjectionSite::AbdomenLeft),
            "abdomen_right" => Ok(InjectionSite::AbdomenRight),
            "thigh_left" => Ok(InjectionSite::ThighLeft),
            "thigh_right" => Ok(InjectionSite::ThighRight),
            "upper_arm_left" => Ok(InjectionSite::UpperArmLeft),
            "upper_arm_right" => Ok(InjectionSite::UpperArmRight),
            _ => Err(format!("Unknown injection site: {}", s)),
        }
    }
}

/// A logged injection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InjectionEntry {
    pub id: Uuid,
    pub dose_mg: DoseMg,
    pub site: InjectionSite,
    pub injection_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub batch_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Side-effect record: one per effect per day, severity on a 0-5 scale
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SideEffectRecord {
    pub effect_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub severity: Option<u8>,
}

/// Daily activity sub-record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ActivityRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workout_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub steps: Option<i64>,
}

/// Daily mental check-in sub-record, each level on a 0-5 scale
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MentalRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mood_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub motivation_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cravings_level: Option<u8>,
}

/// Daily diet sub-record
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DietRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hunger_level: Option<u8>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meals_count: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub protein_grams: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub water_liters: Option<f64>,
}

/// Daily wellness check-in, keyed by calendar date (one per user per date)
///
/// Every sub-record is optional; an entry may exist with zero sub-records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailyLogEntry {
    pub id: Uuid,
    pub date: NaiveDate,
    #[serde(default)]
    pub side_effects: Vec<SideEffectRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activity: Option<ActivityRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mental: Option<MentalRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub diet: Option<DietRecord>,
}

impl DailyLogEntry {
    /// Empty check-in for a date (no sub-records yet)
    pub fn new(date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            date,
            side_effects: Vec::new(),
            activity: None,
            mental: None,
            diet: None,
        }
    }
}

/// Read-only profile inputs to the statistics layer
///
/// May be entirely absent (new user); every field is independently optional.
/// `preferred_injection_day` is 0-6 with 0 = Sunday and is advisory display
/// metadata only; it never shifts the computed due date.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileSnapshot {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub starting_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub goal_weight_kg: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub treatment_start_date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preferred_injection_day: Option<u8>,
}
