//! Attribute checks shared by the entity constructors.
//!
//! Every helper returns the (possibly normalised) value or a
//! `DomainError::Validation` naming the offending field.

use super::errors::{DomainError, DomainResult};

/// Trim `value` and reject it when nothing is left.
pub fn require_non_blank(field: &str, value: &str) -> DomainResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(trimmed.to_string())
}

pub fn require_positive(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::Validation(format!("{} must be > 0", field)));
    }
    Ok(value)
}

pub fn require_non_negative(field: &str, value: f64) -> DomainResult<f64> {
    if !value.is_finite() || value < 0.0 {
        return Err(DomainError::Validation(format!("{} must be >= 0", field)));
    }
    Ok(value)
}

pub fn require_in_range(field: &str, value: i32, min: i32, max: i32) -> DomainResult<i32> {
    if value < min || value > max {
        return Err(DomainError::Validation(format!(
            "{} must be between {} and {}",
            field, min, max
        )));
    }
    Ok(value)
}
