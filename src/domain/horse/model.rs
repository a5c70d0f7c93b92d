//! Horse domain entity

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::errors::{DomainError, DomainResult};
use crate::shared::validations::{require_non_blank, require_non_negative, require_positive};

/// Breed class of a horse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorseType {
    #[serde(rename = "GORACOKRWISTY")]
    HotBlooded,
    #[serde(rename = "CIEPLOKRWISTY")]
    WarmBlooded,
    #[serde(rename = "ZIMNOKRWISTY")]
    ColdBlooded,
    #[serde(rename = "KUC")]
    Pony,
}

impl HorseType {
    /// Wire code used by CSV and JSON
    pub fn code(&self) -> &'static str {
        match self {
            Self::HotBlooded => "GORACOKRWISTY",
            Self::WarmBlooded => "CIEPLOKRWISTY",
            Self::ColdBlooded => "ZIMNOKRWISTY",
            Self::Pony => "KUC",
        }
    }
}

impl fmt::Display for HorseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HorseType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "GORACOKRWISTY" => Ok(Self::HotBlooded),
            "CIEPLOKRWISTY" => Ok(Self::WarmBlooded),
            "ZIMNOKRWISTY" => Ok(Self::ColdBlooded),
            "KUC" => Ok(Self::Pony),
            other => Err(DomainError::Validation(format!(
                "Unknown horse type: {}",
                other
            ))),
        }
    }
}

/// Health / trade condition of a horse
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum HorseCondition {
    #[serde(rename = "ZDROWY")]
    Healthy,
    #[serde(rename = "CHORY")]
    Sick,
    #[serde(rename = "TRENING")]
    InTraining,
    #[serde(rename = "KARENCJA")]
    Quarantine,
    #[serde(rename = "SPRZEDANY")]
    Sold,
}

impl HorseCondition {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Healthy => "ZDROWY",
            Self::Sick => "CHORY",
            Self::InTraining => "TRENING",
            Self::Quarantine => "KARENCJA",
            Self::Sold => "SPRZEDANY",
        }
    }
}

impl Default for HorseCondition {
    fn default() -> Self {
        Self::Healthy
    }
}

impl fmt::Display for HorseCondition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for HorseCondition {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "ZDROWY" => Ok(Self::Healthy),
            "CHORY" => Ok(Self::Sick),
            "TRENING" => Ok(Self::InTraining),
            "KARENCJA" => Ok(Self::Quarantine),
            "SPRZEDANY" => Ok(Self::Sold),
            other => Err(DomainError::Validation(format!(
                "Unknown horse status: {}",
                other
            ))),
        }
    }
}

/// Attributes supplied when registering a horse.
#[derive(Debug, Clone, Deserialize)]
pub struct NewHorse {
    pub name: String,
    pub breed: String,
    #[serde(rename = "type")]
    pub horse_type: HorseType,
    pub status: HorseCondition,
    pub age: i32,
    pub price: f64,
    pub weight_kg: f64,
    pub height_cm: f64,
    #[serde(default)]
    pub microchip_id: Option<String>,
    #[serde(default)]
    pub acquisition_date: Option<DateTime<Utc>>,
}

/// Per-stable duplicate detection key: lowercased name and breed plus age.
///
/// Field order matches the default horse ordering, so the derived `Ord`
/// sorts by name, breed, age.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DuplicateKey {
    pub name: String,
    pub breed: String,
    pub age: i32,
}

impl DuplicateKey {
    pub fn new(name: &str, breed: &str, age: i32) -> Self {
        Self {
            name: name.trim().to_lowercase(),
            breed: breed.trim().to_lowercase(),
            age,
        }
    }
}

/// A horse housed in a stable.
///
/// Only `status` and `weight_kg` change after construction.
#[derive(Debug, Clone, Serialize)]
pub struct Horse {
    pub(crate) id: i32,
    pub(crate) stable_id: i32,
    pub(crate) name: String,
    pub(crate) breed: String,
    #[serde(rename = "type")]
    pub(crate) horse_type: HorseType,
    pub(crate) status: HorseCondition,
    pub(crate) age: i32,
    pub(crate) price: f64,
    pub(crate) weight_kg: f64,
    pub(crate) height_cm: f64,
    pub(crate) microchip_id: String,
    pub(crate) acquisition_date: DateTime<Utc>,
}

impl Horse {
    /// Validate `attrs` and build an unsaved horse for `stable_id`.
    pub fn new(stable_id: i32, attrs: NewHorse) -> DomainResult<Self> {
        let name = require_non_blank("Horse name", &attrs.name)?;
        let breed = require_non_blank("Horse breed", &attrs.breed)?;
        if attrs.age < 0 {
            return Err(DomainError::Validation(
                "Horse age must be >= 0".to_string(),
            ));
        }
        let price = require_non_negative("Horse price", attrs.price)?;
        let weight_kg = require_positive("Horse weight", attrs.weight_kg)?;
        let height_cm = require_positive("Horse height", attrs.height_cm)?;

        Ok(Self {
            id: 0,
            stable_id,
            name,
            breed,
            horse_type: attrs.horse_type,
            status: attrs.status,
            age: attrs.age,
            price,
            weight_kg,
            height_cm,
            microchip_id: attrs
                .microchip_id
                .map(|m| m.trim().to_string())
                .unwrap_or_default(),
            acquisition_date: attrs.acquisition_date.unwrap_or_else(Utc::now),
        })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn stable_id(&self) -> i32 {
        self.stable_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn breed(&self) -> &str {
        &self.breed
    }

    pub fn horse_type(&self) -> HorseType {
        self.horse_type
    }

    pub fn status(&self) -> HorseCondition {
        self.status
    }

    pub fn age(&self) -> i32 {
        self.age
    }

    pub fn price(&self) -> f64 {
        self.price
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn microchip_id(&self) -> &str {
        &self.microchip_id
    }

    pub fn acquisition_date(&self) -> DateTime<Utc> {
        self.acquisition_date
    }

    pub fn duplicate_key(&self) -> DuplicateKey {
        DuplicateKey::new(&self.name, &self.breed, self.age)
    }

    pub fn set_status(&mut self, status: HorseCondition) {
        self.status = status;
    }

    /// Apply a signed weight delta. The weight is left untouched on error.
    pub fn change_weight(&mut self, delta: f64) -> DomainResult<()> {
        let weight = require_positive("Horse weight", self.weight_kg + delta)?;
        self.weight_kg = weight;
        Ok(())
    }

    /// Case-insensitive substring match on name or breed.
    pub fn matches_fragment(&self, fragment: &str) -> bool {
        let fragment = fragment.to_lowercase();
        self.name.to_lowercase().contains(&fragment)
            || self.breed.to_lowercase().contains(&fragment)
    }

    /// Price ascending, ties broken by case-insensitive name.
    pub fn cmp_by_price(a: &Horse, b: &Horse) -> Ordering {
        a.price
            .total_cmp(&b.price)
            .then_with(|| a.name.to_lowercase().cmp(&b.name.to_lowercase()))
    }
}

impl PartialEq for Horse {
    fn eq(&self, other: &Self) -> bool {
        self.duplicate_key() == other.duplicate_key()
    }
}

impl Eq for Horse {}

impl Hash for Horse {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.duplicate_key().hash(state);
    }
}

impl PartialOrd for Horse {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Horse {
    fn cmp(&self, other: &Self) -> Ordering {
        self.duplicate_key().cmp(&other.duplicate_key())
    }
}

impl fmt::Display for Horse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} ({}, {} years) [{:.2} PLN, {}]",
            self.name, self.breed, self.age, self.price, self.status
        )
    }
}

// ── Tests ──────────────────────────────────────────────────────
