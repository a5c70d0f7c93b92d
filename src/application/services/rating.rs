//! Rating business logic service

use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::info;

use crate::domain::{DomainError, DomainResult, HorseRatingStat, Rating, RepositoryProvider};

pub struct RatingService {
    repos: Arc<dyn RepositoryProvider>,
}

impl RatingService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    pub async fn add_rating(
        &self,
        horse_id: i32,
        value: i32,
        description: Option<&str>,
        rating_date: Option<DateTime<Utc>>,
    ) -> DomainResult<Rating> {
        self.repos
            .horses()
            .find_by_id(horse_id)
            .await?
            .ok_or_else(|| DomainError::not_found("Horse", horse_id))?;

        let rating = Rating::new(horse_id, value, description, rating_date)?;
        let saved = self.repos.ratings().save(rating).await?;
        info!(rating_id = saved.id(), horse_id, value, "Rating added");
        Ok(saved)
    }

    /// Mean rating of one horse by id, `None` when it has no ratings.
    pub async fn average_rating_for_horse(&self, horse_id: i32) -> DomainResult<Option<f64>> {
        self.repos.ratings().average_for_horse(horse_id).await
    }

    /// Per-name rating count and mean for the stable's horses. Horses
    /// sharing a name are merged into one row.
    pub async fn rating_stats_for_stable(
        &self,
        stable_id: i32,
    ) -> DomainResult<Vec<HorseRatingStat>> {
        self.repos.ratings().stats_for_stable(stable_id).await
    }
}

// ── Tests ──────────────────────────────────────────────────────
