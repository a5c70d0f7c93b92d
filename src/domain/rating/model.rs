//! Rating domain entity and aggregates

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::shared::errors::{DomainError, DomainResult};
use crate::shared::validations::require_in_range;

pub const MIN_RATING: i32 = 0;
pub const MAX_RATING: i32 = 5;

/// A timestamped 0–5 assessment of a persisted horse. Never mutated.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Rating {
    pub(crate) id: i32,
    pub(crate) horse_id: i32,
    pub(crate) value: i32,
    pub(crate) rating_date: DateTime<Utc>,
    pub(crate) description: String,
}

impl Rating {
    pub fn new(
        horse_id: i32,
        value: i32,
        description: Option<&str>,
        rating_date: Option<DateTime<Utc>>,
    ) -> DomainResult<Self> {
        if horse_id <= 0 {
            return Err(DomainError::Validation(
                "Horse must be persisted before rating".to_string(),
            ));
        }
        let value = require_in_range("Rating value", value, MIN_RATING, MAX_RATING)?;
        Ok(Self {
            id: 0,
            horse_id,
            value,
            rating_date: rating_date.unwrap_or_else(Utc::now),
            description: description.map(|d| d.trim().to_string()).unwrap_or_default(),
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn horse_id(&self) -> i32 {
        self.horse_id
    }

    pub fn value(&self) -> i32 {
        self.value
    }

    pub fn rating_date(&self) -> DateTime<Utc> {
        self.rating_date
    }

    pub fn description(&self) -> &str {
        &self.description
    }
}

/// Rating count and mean for one horse name within a stable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HorseRatingStat {
    pub horse_name: String,
    pub count: u64,
    pub average: f64,
}

impl HorseRatingStat {
    /// Group `(horse name, rating value)` pairs by exact name.
    ///
    /// Distinct horses sharing a name land in the same row. Rows come out
    /// ordered by name.
    pub fn aggregate<'a, I>(rows: I) -> Vec<HorseRatingStat>
    where
        I: IntoIterator<Item = (&'a str, i32)>,
    {
        let mut groups: BTreeMap<&'a str, (u64, i64)> = BTreeMap::new();
        for (name, value) in rows {
            let entry = groups.entry(name).or_insert((0, 0));
            entry.0 += 1;
            entry.1 += value as i64;
        }
        groups
            .into_iter()
            .map(|(name, (count, sum))| HorseRatingStat {
                horse_name: name.to_string(),
                count,
                average: sum as f64 / count as f64,
            })
            .collect()
    }
}

/// Mean of `values`, `None` when empty.
pub fn average(values: &[i32]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }
    let sum: i64 = values.iter().map(|v| *v as i64).sum();
    Some(sum as f64 / values.len() as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_validates_range_and_reference() {
        assert!(Rating::new(1, 0, None, None).is_ok());
        assert!(Rating::new(1, 5, None, None).is_ok());
        assert!(Rating::new(1, 6, None, None).is_err());
        assert!(Rating::new(1, -1, None, None).is_err());
        assert!(Rating::new(0, 3, None, None).is_err());
    }

    #[test]
    fn description_defaults_to_empty() {
        let r = Rating::new(4, 3, None, None).unwrap();
        assert_eq!(r.description(), "");
        let r = Rating::new(4, 3, Some("  calm on the lunge "), None).unwrap();
        assert_eq!(r.description(), "calm on the lunge");
    }

    #[test]
    fn average_of_values() {
        assert_eq!(average(&[]), None);
        assert_eq!(average(&[5, 3, 4]), Some(4.0));
    }

    #[test]
    fn aggregate_groups_by_name() {
        let stats = HorseRatingStat::aggregate(vec![
            ("Spirit", 5),
            ("Arrow", 2),
            ("Spirit", 3),
            ("Spirit", 4),
        ]);
        assert_eq!(
            stats,
            vec![
                HorseRatingStat {
                    horse_name: "Arrow".into(),
                    count: 1,
                    average: 2.0
                },
                HorseRatingStat {
                    horse_name: "Spirit".into(),
                    count: 3,
                    average: 4.0
                },
            ]
        );
    }
}
