//! Unit conversion and display formatting
//!
//! All engine inputs and outputs are metric (kg, cm); these conversions are
//! strictly a presentation-boundary concern and never appear inline in the
//! statistics logic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Pounds per kilogram
pub const LBS_PER_KG: f64 = 2.20462;
/// Stone per kilogram
pub const STONE_PER_KG: f64 = 0.157473;
/// Inches per centimeter
pub const INCHES_PER_CM: f64 = 0.393701;

pub fn kg_to_lbs(kg: f64) -> f64 {
    kg * LBS_PER_KG
}

pub fn lbs_to_kg(lbs: f64) -> f64 {
    lbs / LBS_PER_KG
}

pub fn kg_to_stone(kg: f64) -> f64 {
    kg * STONE_PER_KG
}

pub fn stone_to_kg(stone: f64) -> f64 {
    stone / STONE_PER_KG
}

// ============================================================================
// Weight Units
// ============================================================================

/// Weight unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum WeightUnit {
    #[default]
    Kg,
    Lbs,
    Stone,
}

impl WeightUnit {
    /// Convert a value in this unit to kilograms
    pub fn to_kg(&self, value: f64) -> f64 {
        match self {
            WeightUnit::Kg => value,
            WeightUnit::Lbs => lbs_to_kg(value),
            WeightUnit::Stone => stone_to_kg(value),
        }
    }

    /// Convert kilograms to this unit
    pub fn from_kg(&self, kg: f64) -> f64 {
        match self {
            WeightUnit::Kg => kg,
            WeightUnit::Lbs => kg_to_lbs(kg),
            WeightUnit::Stone => kg_to_stone(kg),
        }
    }

    /// Get the unit abbreviation
    pub fn abbreviation(&self) -> &'static str {
        match self {
            WeightUnit::Kg => "kg",
            WeightUnit::Lbs => "lbs",
            WeightUnit::Stone => "st",
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.abbreviation())
    }
}

impl std::str::FromStr for WeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "kg" | "kilogram" | "kilograms" => Ok(WeightUnit::Kg),
            "lbs" | "lb" | "pound" | "pounds" => Ok(WeightUnit::Lbs),
            "st" | "stone" | "stones" => Ok(WeightUnit::Stone),
            _ => Err(format!("Unknown weight unit: {}", s)),
        }
    }
}

/// Convert a weight value between units
///
/// Identity when units match; otherwise round-trips through kilograms.
pub fn convert_weight(value: f64, from: WeightUnit, to: WeightUnit) -> f64 {
    if from == to {
        return value;
    }
    to.from_kg(from.to_kg(value))
}

// ============================================================================
// Height Units
// ============================================================================

/// Height unit preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum HeightUnit {
    #[default]
    Cm,
    FeetInches,
}

impl std::str::FromStr for HeightUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cm" | "centimeter" | "centimeters" => Ok(HeightUnit::Cm),
            "ft" | "feet" | "ft/in" | "feet_inches" => Ok(HeightUnit::FeetInches),
            _ => Err(format!("Unknown height unit: {}", s)),
        }
    }
}

// ============================================================================
// Split Representations
// ============================================================================

/// Weight split into whole stone plus remaining pounds
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoneLbs {
    pub stone: i64,
    /// Remainder pounds, rounded to 1 decimal
    pub lbs: f64,
}

/// Split kilograms into whole stone and remaining pounds
pub fn kg_to_stone_lbs(kg: f64) -> StoneLbs {
    let total_lbs = kg_to_lbs(kg);
    let stone = (total_lbs / 14.0).floor() as i64;
    let lbs = ((total_lbs % 14.0) * 10.0).round() / 10.0;
    StoneLbs { stone, lbs }
}

impl fmt::Display for StoneLbs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} st {} lbs", self.stone, self.lbs)
    }
}

/// Height split into whole feet and rounded inches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeetInches {
    pub feet: i64,
    pub inches: i64,
}

/// Split centimeters into feet and rounded inches
///
/// Known quirk: the inch remainder is rounded independently and can come out
/// as 12 for heights just under a foot boundary (e.g. 182.4 cm -> 5'12").
/// It is NOT normalized into an extra foot; existing callers render the
/// value as-is.
pub fn cm_to_feet_inches(cm: f64) -> FeetInches {
    let total_inches = cm * INCHES_PER_CM;
    let feet = (total_inches / 12.0).floor() as i64;
    let inches = (total_inches % 12.0).round() as i64;
    FeetInches { feet, inches }
}

impl fmt::Display for FeetInches {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}'{}\"", self.feet, self.inches)
    }
}

// ============================================================================
// Display Formatting
// ============================================================================

/// Format a metric weight in the preferred unit with a secondary-unit
/// parenthetical, e.g. `86.2 kg (190.0 lbs)` or `13 st 8.2 lbs (86.2 kg)`
pub fn format_weight(kg: f64, unit: WeightUnit) -> String {
    match unit {
        WeightUnit::Kg => format!("{:.1} kg ({:.1} lbs)", kg, kg_to_lbs(kg)),
        WeightUnit::Lbs => format!("{:.1} lbs ({:.1} kg)", kg_to_lbs(kg), kg),
        WeightUnit::Stone => format!("{} ({:.1} kg)", kg_to_stone_lbs(kg), kg),
    }
}

/// Format a metric height in the preferred unit with a secondary-unit
/// parenthetical, e.g. `180 cm (5'11")` or `5'11" (180 cm)`
pub fn format_height(cm: f64, unit: HeightUnit) -> String {
    match unit {
        HeightUnit::Cm => format!("{:.0} cm ({})", cm, cm_to_feet_inches(cm)),
        HeightUnit::FeetInches => format!("{} ({:.0} cm)", cm_to_feet_inches(cm), cm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(100))]

        /// Property: weight conversion round-trip preserves value within 0.01
        #[test]
        fn prop_weight_roundtrip(kg in 20.0f64..500.0) {
            for from in [WeightUnit::Kg, WeightUnit::Lbs, WeightUnit::Stone] {
                for to in [WeightUnit::Kg, WeightUnit::Lbs, WeightUnit::Stone] {
                    let value = from.from_kg(kg);
                    let there = convert_weight(value, from, to);
                    let back = convert_weight(there, to, from);
                    prop_assert!((value - back).abs() < 0.01,
                        "Round-trip failed: {} {:?} -> {} {:?} -> {}", value, from, there, to, back);
                }
            }
        }

        /// Property: identity conversion is exact
        #[test]
        fn prop_identity_conversion(value in 1.0f64..1000.0) {
            prop_assert_eq!(convert_weight(value, WeightUnit::Lbs, WeightUnit::Lbs), value);
            prop_assert_eq!(convert_weight(value, WeightUnit::Kg, WeightUnit::Kg), value);
        }

        /// Property: stone-lbs split recombines to the original weight
        #[test]
        fn prop_stone_lbs_split(kg in 20.0f64..500.0) {
            let split = kg_to_stone_lbs(kg);
            prop_assert!(split.stone >= 0);
            prop_assert!(split.lbs >= 0.0 && split.lbs <= 14.0);
            let recombined = lbs_to_kg(split.stone as f64 * 14.0 + split.lbs);
            prop_assert!((kg - recombined).abs() < 0.05,
                "Split failed: {} kg -> {:?} -> {}", kg, split, recombined);
        }
    }

    #[test]
    fn test_known_weight_conversions() {
        // 1 kg = 2.20462 lbs
        assert!((kg_to_lbs(1.0) - 2.20462).abs() < 0.0001);
        // 100 lbs = 45.36 kg
        assert!((lbs_to_kg(100.0) - 45.36).abs() < 0.01);
        // 1 stone = 6.35 kg
        assert!((stone_to_kg(1.0) - 6.35).abs() < 0.01);
    }

    #[test]
    fn test_stone_lbs_split() {
        // 86.2 kg = 190.04 lbs = 13 st 8.0 lbs
        let split = kg_to_stone_lbs(86.2);
        assert_eq!(split.stone, 13);
        assert!((split.lbs - 8.0).abs() < 0.1);
    }

    #[test]
    fn test_feet_inches_split() {
        // 180 cm = 70.87 in -> 5'11"
        let split = cm_to_feet_inches(180.0);
        assert_eq!(split.feet, 5);
        assert_eq!(split.inches, 11);

        // 152.4 cm = 60 in -> 5'0"
        let split = cm_to_feet_inches(152.4);
        assert_eq!(split.feet, 5);
        assert_eq!(split.inches, 0);
    }

    #[test]
    fn test_feet_inches_twelve_inch_quirk() {
        // 182.4 cm = 71.81 in: the remainder rounds to 12 and stays 12,
        // it is not carried into an extra foot.
        let split = cm_to_feet_inches(182.4);
        assert_eq!(split.feet, 5);
        assert_eq!(split.inches, 12);
    }

    #[test]
    fn test_weight_formatting() {
        assert_eq!(format_weight(86.2, WeightUnit::Kg), "86.2 kg (190.0 lbs)");
        assert_eq!(format_weight(86.2, WeightUnit::Lbs), "190.0 lbs (86.2 kg)");
        assert_eq!(format_weight(86.2, WeightUnit::Stone), "13 st 8 lbs (86.2 kg)");
    }

    #[test]
    fn test_height_formatting() {
        assert_eq!(format_height(180.0, HeightUnit::Cm), "180 cm (5'11\")");
        assert_eq!(format_height(180.0, HeightUnit::FeetInches), "5'11\" (180 cm)");
    }

    #[test]
    fn test_unit_parsing() {
        assert_eq!("kg".parse::<WeightUnit>().unwrap(), WeightUnit::Kg);
        assert_eq!("pounds".parse::<WeightUnit>().unwrap(), WeightUnit::Lbs);
        assert_eq!("stone".parse::<WeightUnit>().unwrap(), WeightUnit::Stone);
        assert!("invalid".parse::<WeightUnit>().is_err());
        assert_eq!("cm".parse::<HeightUnit>().unwrap(), HeightUnit::Cm);
        assert_eq!("feet".parse::<HeightUnit>().unwrap(), HeightUnit::FeetInches);
    }
}
