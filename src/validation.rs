//! Input validation functions
//!
//! Boundary checks for values arriving from the CRUD layer before they are
//! handed to the calculators.

use crate::models::DoseMg;

/// Validate a weight value (in kg)
pub fn validate_weight_kg(weight_kg: f64) -> Result<(), String> {
    if weight_kg.is_nan() || weight_kg.is_infinite() {
        return Err("Weight must be a valid number".to_string());
    }
    if weight_kg <= 0.0 {
        return Err("Weight must be positive".to_string());
    }
    Ok(())
}

/// Validate a severity level (0-5 scale)
pub fn validate_severity(severity: u8) -> Result<(), String> {
    if severity > 5 {
        return Err(format!("Severity must be 0-5, got {}", severity));
    }
    Ok(())
}

/// Validate a wellness level (0-5 scale, shared by mood/motivation/cravings/hunger)
pub fn validate_level(level: u8) -> Result<(), String> {
    if level > 5 {
        return Err(format!("Level must be 0-5, got {}", level));
    }
    Ok(())
}

/// Validate a calendar month number
pub fn validate_month(month: u32) -> Result<(), String> {
    if !(1..=12).contains(&month) {
        return Err(format!("Month must be 1-12, got {}", month));
    }
    Ok(())
}

/// Validate a dose value against the closed dose set
pub fn validate_dose_mg(mg: f64) -> Result<(), String> {
    DoseMg::try_from(mg).map(|_| ())
}

/// Validate a day-of-week index (0-6, 0 = Sunday)
pub fn validate_day_of_week(day: u8) -> Result<(), String> {
    if day > 6 {
        return Err(format!("Day of week must be 0-6, got {}", day));
    }
    Ok(())
}
