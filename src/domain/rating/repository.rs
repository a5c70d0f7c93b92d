//! Rating repository interface

use async_trait::async_trait;

use super::model::{HorseRatingStat, Rating};
use crate::domain::DomainResult;

#[async_trait]
pub trait RatingRepository: Send + Sync {
    async fn save(&self, rating: Rating) -> DomainResult<Rating>;
    /// `None` when the horse has no ratings
    async fn average_for_horse(&self, horse_id: i32) -> DomainResult<Option<f64>>;
    /// Ratings of the stable's horses grouped by horse name
    async fn stats_for_stable(&self, stable_id: i32) -> DomainResult<Vec<HorseRatingStat>>;
}
