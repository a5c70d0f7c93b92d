//! SeaORM implementation of StableRepository

use std::collections::HashMap;

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, EntityTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, SqlErr,
};
use tracing::debug;

use crate::domain::stable::{name_key, Stable, StableRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{horse, stable};

pub struct SeaOrmStableRepository {
    db: DatabaseConnection,
}

impl SeaOrmStableRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    async fn horse_ids(&self, stable_id: i32) -> DomainResult<Vec<i32>> {
        let ids = horse::Entity::find()
            .select_only()
            .column(horse::Column::Id)
            .filter(horse::Column::StableId.eq(stable_id))
            .order_by_asc(horse::Column::Id)
            .into_tuple::<i32>()
            .all(&self.db)
            .await?;
        Ok(ids)
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: stable::Model, horse_ids: Vec<i32>) -> Stable {
    Stable {
        id: m.id,
        name: m.name,
        max_capacity: m.max_capacity,
        horse_ids,
    }
}

#[async_trait]
impl StableRepository for SeaOrmStableRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Stable>> {
        let Some(model) = stable::Entity::find_by_id(id).one(&self.db).await? else {
            return Ok(None);
        };
        let ids = self.horse_ids(model.id).await?;
        Ok(Some(entity_to_domain(model, ids)))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Stable>> {
        let model = stable::Entity::find()
            .filter(stable::Column::NameKey.eq(name_key(name)))
            .one(&self.db)
            .await?;
        let Some(model) = model else {
            return Ok(None);
        };
        let ids = self.horse_ids(model.id).await?;
        Ok(Some(entity_to_domain(model, ids)))
    }

    async fn find_all(&self) -> DomainResult<Vec<Stable>> {
        let models = stable::Entity::find()
            .order_by_asc(stable::Column::NameKey)
            .order_by_asc(stable::Column::Id)
            .all(&self.db)
            .await?;

        let pairs = horse::Entity::find()
            .select_only()
            .column(horse::Column::Id)
            .column(horse::Column::StableId)
            .order_by_asc(horse::Column::Id)
            .into_tuple::<(i32, i32)>()
            .all(&self.db)
            .await?;

        let mut by_stable: HashMap<i32, Vec<i32>> = HashMap::new();
        for (horse_id, stable_id) in pairs {
            by_stable.entry(stable_id).or_default().push(horse_id);
        }

        Ok(models
            .into_iter()
            .map(|m| {
                let ids = by_stable.remove(&m.id).unwrap_or_default();
                entity_to_domain(m, ids)
            })
            .collect())
    }

    async fn save(&self, s: Stable) -> DomainResult<Stable> {
        let model = stable::ActiveModel {
            id: NotSet,
            name: Set(s.name.clone()),
            name_key: Set(s.name_key()),
            max_capacity: Set(s.max_capacity),
        };
        let result = match model.insert(&self.db).await {
            Ok(m) => m,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(DomainError::Conflict(format!("Stable '{}'", s.name)));
            }
            Err(e) => return Err(e.into()),
        };
        debug!(stable_id = result.id, name = %result.name, "Stable row inserted");
        Ok(entity_to_domain(result, Vec::new()))
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let result = stable::Entity::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Stable", id));
        }
        Ok(())
    }
}
