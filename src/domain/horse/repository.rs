//! Horse repository interface

use async_trait::async_trait;

use super::model::{DuplicateKey, Horse};
use crate::domain::DomainResult;

#[async_trait]
pub trait HorseRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Horse>>;
    /// Horses of a stable in insertion order
    async fn find_by_stable(&self, stable_id: i32) -> DomainResult<Vec<Horse>>;
    async fn count_by_stable(&self, stable_id: i32) -> DomainResult<u64>;
    async fn exists_duplicate(&self, stable_id: i32, key: &DuplicateKey) -> DomainResult<bool>;

    /// Insert `horse` as one atomic unit: the duplicate and capacity checks
    /// are repeated against current state and the insert only happens when
    /// both pass. Returns the saved horse with its id.
    async fn insert_within_capacity(&self, horse: Horse, max_capacity: i32)
        -> DomainResult<Horse>;

    /// Persist the mutable fields (status, weight) of an existing horse
    async fn update(&self, horse: &Horse) -> DomainResult<()>;
    /// Deletes the horse and its ratings
    async fn delete(&self, id: i32) -> DomainResult<()>;
    /// Returns how many horses were removed
    async fn delete_by_stable(&self, stable_id: i32) -> DomainResult<u64>;
    /// Sum of price over every horse in every stable
    async fn total_value(&self) -> DomainResult<f64>;
}
