//! Stable domain entity

use serde::Serialize;

use crate::shared::errors::{DomainError, DomainResult};
use crate::shared::validations::require_non_blank;

/// A named enclosure with a horse capacity limit.
///
/// Horses are referenced by id only; each `Horse` carries its owning
/// stable id as a plain foreign key.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stable {
    pub(crate) id: i32,
    pub(crate) name: String,
    pub(crate) max_capacity: i32,
    /// Horse ids in insertion order, filled in by storage
    pub(crate) horse_ids: Vec<i32>,
}

impl Stable {
    /// Create an unsaved stable (id 0 until storage assigns one).
    pub fn new(name: &str, max_capacity: i32) -> DomainResult<Self> {
        let name = require_non_blank("Stable name", name)?;
        if max_capacity <= 0 {
            return Err(DomainError::Validation(
                "Stable capacity must be > 0".to_string(),
            ));
        }
        Ok(Self {
            id: 0,
            name,
            max_capacity,
            horse_ids: Vec::new(),
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn max_capacity(&self) -> i32 {
        self.max_capacity
    }

    /// Lookup key for the case-insensitive name uniqueness rule
    pub fn name_key(&self) -> String {
        name_key(&self.name)
    }

    pub fn horse_ids(&self) -> &[i32] {
        &self.horse_ids
    }

    pub fn is_empty(&self) -> bool {
        self.horse_ids.is_empty()
    }
}

/// Trimmed, Unicode-lowercased stable name. Two names with the same key clash.
pub fn name_key(name: &str) -> String {
    name.trim().to_lowercase()
}

/// `current / capacity`, or 0.0 for a zero capacity.
pub fn load_fraction(current: u64, capacity: i32) -> f64 {
    if capacity <= 0 {
        return 0.0;
    }
    current as f64 / capacity as f64
}

/// How full a stable is right now.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StableOccupancy {
    pub stable_id: i32,
    pub stable_name: String,
    pub current: u64,
    pub max: i32,
    pub percentage: f64,
}

impl StableOccupancy {
    pub fn new(stable: &Stable, current: u64) -> Self {
        Self {
            stable_id: stable.id,
            stable_name: stable.name.clone(),
            current,
            max: stable.max_capacity,
            percentage: load_fraction(current, stable.max_capacity),
        }
    }

    pub fn is_full(&self) -> bool {
        self.current >= self.max.max(0) as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_trims_name() {
        let s = Stable::new("  North Barn ", 4).unwrap();
        assert_eq!(s.name(), "North Barn");
        assert_eq!(s.max_capacity(), 4);
        assert_eq!(s.id(), 0);
        assert!(s.is_empty());
    }

    #[test]
    fn new_rejects_blank_name() {
        let err = Stable::new("   ", 4).unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
    }

    #[test]
    fn new_rejects_non_positive_capacity() {
        assert!(Stable::new("North", 0).is_err());
        assert!(Stable::new("North", -3).is_err());
    }

    #[test]
    fn name_key_folds_non_ascii_letters() {
        assert_eq!(name_key(" ŁĄKA "), "łąka");
        assert_eq!(Stable::new("Łąka", 2).unwrap().name_key(), name_key("łąka"));
    }

    #[test]
    fn load_fraction_handles_zero_capacity() {
        assert_eq!(load_fraction(3, 0), 0.0);
        assert_eq!(load_fraction(1, 5), 0.2);
        assert_eq!(load_fraction(0, 5), 0.0);
    }

    #[test]
    fn occupancy_reports_fullness() {
        let mut s = Stable::new("North", 2).unwrap();
        s.id = 9;
        let occ = StableOccupancy::new(&s, 2);
        assert_eq!(occ.stable_id, 9);
        assert_eq!(occ.percentage, 1.0);
        assert!(occ.is_full());
        assert!(!StableOccupancy::new(&s, 1).is_full());
    }
}
