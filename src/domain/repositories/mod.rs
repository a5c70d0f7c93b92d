//! Repository traits for the domain layer
//!
//! Contains:
//! - `RepositoryProvider` - unified access to all per-aggregate repositories
//! - `DomainResult` - standard result type for domain operations

use super::horse::HorseRepository;
use super::rating::RatingRepository;
use super::stable::StableRepository;

pub use crate::shared::errors::DomainResult;

/// Provides access to all domain repositories.
///
/// Consumers request only the repository they need:
///
/// ```ignore
/// async fn handle(repos: &dyn RepositoryProvider) {
///     let stable = repos.stables().find_by_id(1).await?;
///     let count = repos.horses().count_by_stable(1).await?;
/// }
/// ```
pub trait RepositoryProvider: Send + Sync {
    fn stables(&self) -> &dyn StableRepository;
    fn horses(&self) -> &dyn HorseRepository;
    fn ratings(&self) -> &dyn RatingRepository;
}
