//! SeaORM implementation of HorseRepository

use async_trait::async_trait;
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, ConnectionTrait, DatabaseConnection,
    EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, QueryTrait, Set, SqlErr,
    TransactionTrait,
};
use tokio::sync::Mutex;
use tracing::debug;

use crate::domain::horse::{DuplicateKey, Horse, HorseRepository};
use crate::domain::{DomainError, DomainResult};
use crate::infrastructure::database::entities::{horse, rating, stable};

pub struct SeaOrmHorseRepository {
    db: DatabaseConnection,
    /// Serialises capacity-checked inserts from this pool
    insert_lock: Mutex<()>,
}

impl SeaOrmHorseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            insert_lock: Mutex::new(()),
        }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_to_domain(m: horse::Model) -> Horse {
    Horse {
        id: m.id,
        stable_id: m.stable_id,
        name: m.name,
        breed: m.breed,
        horse_type: m.horse_type.into(),
        status: m.status.into(),
        age: m.age,
        price: m.price,
        weight_kg: m.weight_kg,
        height_cm: m.height_cm,
        microchip_id: m.microchip_id,
        acquisition_date: m.acquisition_date,
    }
}

fn domain_to_active(h: &Horse) -> horse::ActiveModel {
    let key = h.duplicate_key();
    horse::ActiveModel {
        id: NotSet,
        stable_id: Set(h.stable_id),
        name: Set(h.name.clone()),
        breed: Set(h.breed.clone()),
        name_key: Set(key.name),
        breed_key: Set(key.breed),
        horse_type: Set(h.horse_type.into()),
        status: Set(h.status.into()),
        age: Set(h.age),
        price: Set(h.price),
        weight_kg: Set(h.weight_kg),
        height_cm: Set(h.height_cm),
        microchip_id: Set(h.microchip_id.clone()),
        acquisition_date: Set(h.acquisition_date),
    }
}

// ── Shared queries (run on a pool or inside a transaction) ─────

async fn count_in<C: ConnectionTrait>(conn: &C, stable_id: i32) -> DomainResult<u64> {
    let n = horse::Entity::find()
        .filter(horse::Column::StableId.eq(stable_id))
        .count(conn)
        .await?;
    Ok(n)
}

async fn duplicate_in<C: ConnectionTrait>(
    conn: &C,
    stable_id: i32,
    key: &DuplicateKey,
) -> DomainResult<bool> {
    let n = horse::Entity::find()
        .filter(horse::Column::StableId.eq(stable_id))
        .filter(horse::Column::NameKey.eq(key.name.as_str()))
        .filter(horse::Column::BreedKey.eq(key.breed.as_str()))
        .filter(horse::Column::Age.eq(key.age))
        .count(conn)
        .await?;
    Ok(n > 0)
}

#[async_trait]
impl HorseRepository for SeaOrmHorseRepository {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Horse>> {
        let model = horse::Entity::find_by_id(id).one(&self.db).await?;
        Ok(model.map(entity_to_domain))
    }

    async fn find_by_stable(&self, stable_id: i32) -> DomainResult<Vec<Horse>> {
        let models = horse::Entity::find()
            .filter(horse::Column::StableId.eq(stable_id))
            .order_by_asc(horse::Column::Id)
            .all(&self.db)
            .await?;
        Ok(models.into_iter().map(entity_to_domain).collect())
    }

    async fn count_by_stable(&self, stable_id: i32) -> DomainResult<u64> {
        count_in(&self.db, stable_id).await
    }

    async fn exists_duplicate(&self, stable_id: i32, key: &DuplicateKey) -> DomainResult<bool> {
        duplicate_in(&self.db, stable_id, key).await
    }

    async fn insert_within_capacity(
        &self,
        horse: Horse,
        max_capacity: i32,
    ) -> DomainResult<Horse> {
        let _guard = self.insert_lock.lock().await;
        let txn = self.db.begin().await?;

        // Write to the stable row first so the transaction holds the
        // write lock before it reads the count.
        let touched = stable::Entity::update_many()
            .col_expr(
                stable::Column::MaxCapacity,
                Expr::col(stable::Column::MaxCapacity).into(),
            )
            .filter(stable::Column::Id.eq(horse.stable_id))
            .exec(&txn)
            .await?;
        if touched.rows_affected == 0 {
            return Err(DomainError::not_found("Stable", horse.stable_id));
        }
        let owner = stable::Entity::find_by_id(horse.stable_id)
            .one(&txn)
            .await?
            .ok_or_else(|| DomainError::not_found("Stable", horse.stable_id))?;

        if duplicate_in(&txn, horse.stable_id, &horse.duplicate_key()).await? {
            return Err(DomainError::DuplicateHorse(horse.name.clone()));
        }

        let current = count_in(&txn, horse.stable_id).await?;
        if current >= max_capacity.max(0) as u64 {
            return Err(DomainError::StableFull {
                stable: owner.name,
                current,
                capacity: max_capacity,
            });
        }

        let saved = match domain_to_active(&horse).insert(&txn).await {
            Ok(m) => m,
            Err(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) => {
                return Err(DomainError::DuplicateHorse(horse.name.clone()));
            }
            Err(e) => return Err(e.into()),
        };
        txn.commit().await?;

        debug!(horse_id = saved.id, stable_id = saved.stable_id, "Horse row inserted");
        Ok(entity_to_domain(saved))
    }

    async fn update(&self, h: &Horse) -> DomainResult<()> {
        let existing = horse::Entity::find_by_id(h.id)
            .one(&self.db)
            .await?
            .ok_or_else(|| DomainError::not_found("Horse", h.id))?;

        let mut active: horse::ActiveModel = existing.into();
        active.status = Set(h.status.into());
        active.weight_kg = Set(h.weight_kg);
        active.update(&self.db).await?;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        let txn = self.db.begin().await?;
        rating::Entity::delete_many()
            .filter(rating::Column::HorseId.eq(id))
            .exec(&txn)
            .await?;
        let result = horse::Entity::delete_by_id(id).exec(&txn).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Horse", id));
        }
        txn.commit().await?;
        Ok(())
    }

    async fn delete_by_stable(&self, stable_id: i32) -> DomainResult<u64> {
        let horse_ids = horse::Entity::find()
            .select_only()
            .column(horse::Column::Id)
            .filter(horse::Column::StableId.eq(stable_id))
            .into_query();

        // Both statements write, so the transaction never upgrades a read lock
        let txn = self.db.begin().await?;
        rating::Entity::delete_many()
            .filter(rating::Column::HorseId.in_subquery(horse_ids))
            .exec(&txn)
            .await?;
        let result = horse::Entity::delete_many()
            .filter(horse::Column::StableId.eq(stable_id))
            .exec(&txn)
            .await?;
        txn.commit().await?;
        Ok(result.rows_affected)
    }

    async fn total_value(&self) -> DomainResult<f64> {
        let prices = horse::Entity::find()
            .select_only()
            .column(horse::Column::Price)
            .into_tuple::<f64>()
            .all(&self.db)
            .await?;
        Ok(prices.iter().sum())
    }
}
