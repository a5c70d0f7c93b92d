//! SeaORM implementation of RatingRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QuerySelect, Set, SqlErr,
};

use crate::domain::rating::{average, HorseRatingStat, Rating, RatingRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{horse, rating};

pub struct SeaOrmRatingRepository {
    db: DatabaseConnection,
}

impl SeaOrmRatingRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

fn entity_to_domain(m: rating::Model) -> Rating {
    Rating {
        id: m.id,
        horse_id: m.horse_id,
        value: m.value,
        rating_date: m.rating_date,
        description: m.description,
    }
}

#[async_trait]
impl RatingRepository for SeaOrmRatingRepository {
    async fn save(&self, r: Rating) -> DomainResult<Rating> {
        let model = rating::ActiveModel {
            id: NotSet,
            horse_id: Set(r.horse_id),
            value: Set(r.value),
            rating_date: Set(r.rating_date),
            description: Set(r.description.clone()),
        };
        match model.insert(&self.db).await {
            Ok(saved) => Ok(entity_to_domain(saved)),
            Err(e) if matches!(e.sql_err(), Some(SqlErr::ForeignKeyConstraintViolation(_))) => {
                Err(DomainError::not_found("Horse", r.horse_id))
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn average_for_horse(&self, horse_id: i32) -> DomainResult<Option<f64>> {
        let values = rating::Entity::find()
            .select_only()
            .column(rating::Column::Value)
            .filter(rating::Column::HorseId.eq(horse_id))
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;
        Ok(average(&values))
    }

    async fn stats_for_stable(&self, stable_id: i32) -> DomainResult<Vec<HorseRatingStat>> {
        let horses = horse::Entity::find()
            .select_only()
            .column(horse::Column::Id)
            .column(horse::Column::Name)
            .filter(horse::Column::StableId.eq(stable_id))
            .into_tuple::<(i32, String)>()
            .all(&self.db)
            .await?;
        if horses.is_empty() {
            return Ok(Vec::new());
        }
        let names: HashMap<i32, String> = horses.into_iter().collect();

        let values = rating::Entity::find()
            .select_only()
            .column(rating::Column::HorseId)
            .column(rating::Column::Value)
            .filter(rating::Column::HorseId.is_in(names.keys().copied()))
            .into_tuple::<(i32, i32)>()
            .all(&self.db)
            .await?;

        Ok(HorseRatingStat::aggregate(values.iter().filter_map(
            |(horse_id, value)| names.get(horse_id).map(|n| (n.as_str(), *value)),
        )))
    }
}
