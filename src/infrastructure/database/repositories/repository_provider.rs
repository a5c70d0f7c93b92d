//! SeaORM implementation of RepositoryProvider

use sea_orm::DatabaseConnection;

use crate::domain::horse::HorseRepository;
use crate::domain::rating::RatingRepository;
use crate::domain::repositories::RepositoryProvider;
use crate::domain::stable::StableRepository;

use super::horse_repository::SeaOrmHorseRepository;
use super::rating_repository::SeaOrmRatingRepository;
use super::stable_repository::SeaOrmStableRepository;

/// Unified repository provider backed by SeaORM.
///
/// Holds one connection pool and exposes per-aggregate repository accessors.
///
/// ```ignore
/// let repos = SeaOrmRepositoryProvider::new(db.clone());
/// let stable = repos.stables().find_by_name("North Barn").await?;
/// let count = repos.horses().count_by_stable(stable.id()).await?;
/// ```
pub struct SeaOrmRepositoryProvider {
    stables: SeaOrmStableRepository,
    horses: SeaOrmHorseRepository,
    ratings: SeaOrmRatingRepository,
}

impl SeaOrmRepositoryProvider {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            stables: SeaOrmStableRepository::new(db.clone()),
            horses: SeaOrmHorseRepository::new(db.clone()),
            ratings: SeaOrmRatingRepository::new(db),
        }
    }
}

impl RepositoryProvider for SeaOrmRepositoryProvider {
    fn stables(&self) -> &dyn StableRepository {
        &self.stables
    }

    fn horses(&self) -> &dyn HorseRepository {
        &self.horses
    }

    fn ratings(&self) -> &dyn RatingRepository {
        &self.ratings
    }
}
