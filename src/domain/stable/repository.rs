//! Stable repository interface

use async_trait::async_trait;

use super::model::Stable;
use crate::domain::DomainResult;

#[async_trait]
pub trait StableRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Stable>>;
    /// Case-insensitive lookup
    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Stable>>;
    /// All stables ordered by name
    async fn find_all(&self) -> DomainResult<Vec<Stable>>;
    /// Insert a new stable and return it with its assigned id
    async fn save(&self, stable: Stable) -> DomainResult<Stable>;
    /// Fails with `NotFound` when nothing was deleted
    async fn delete(&self, id: i32) -> DomainResult<()>;
}
