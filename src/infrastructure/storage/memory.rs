//! In-memory storage implementation

use std::sync::atomic::{AtomicI32, Ordering};

use async_trait::async_trait;
use dashmap::DashMap;
use tokio::sync::Mutex;

use crate::domain::rating::average;
use crate::domain::stable::name_key;
use crate::domain::{
    DomainError, DomainResult, DuplicateKey, Horse, HorseRatingStat, HorseRepository, Rating,
    RatingRepository, RepositoryProvider, Stable, StableRepository,
};

/// In-memory storage for development and testing.
///
/// One struct backs all three repositories so that cascades (horse ->
/// ratings) and the stable horse-id lists stay consistent.
pub struct InMemoryRepositoryProvider {
    stables: DashMap<i32, Stable>,
    horses: DashMap<i32, Horse>,
    ratings: DashMap<i32, Rating>,
    stable_counter: AtomicI32,
    horse_counter: AtomicI32,
    rating_counter: AtomicI32,
    /// Serialises check-then-insert writes (stable names, horse capacity)
    insert_lock: Mutex<()>,
}

impl InMemoryRepositoryProvider {
    pub fn new() -> Self {
        Self {
            stables: DashMap::new(),
            horses: DashMap::new(),
            ratings: DashMap::new(),
            stable_counter: AtomicI32::new(1),
            horse_counter: AtomicI32::new(1),
            rating_counter: AtomicI32::new(1),
            insert_lock: Mutex::new(()),
        }
    }

    fn horse_ids_of(&self, stable_id: i32) -> Vec<i32> {
        let mut ids: Vec<i32> = self
            .horses
            .iter()
            .filter(|e| e.stable_id == stable_id)
            .map(|e| *e.key())
            .collect();
        ids.sort_unstable();
        ids
    }

    fn with_horse_ids(&self, mut stable: Stable) -> Stable {
        stable.horse_ids = self.horse_ids_of(stable.id);
        stable
    }

    fn count_in(&self, stable_id: i32) -> u64 {
        self.horses.iter().filter(|e| e.stable_id == stable_id).count() as u64
    }

    fn remove_horse(&self, id: i32) -> bool {
        let removed = self.horses.remove(&id).is_some();
        if removed {
            self.ratings.retain(|_, r| r.horse_id != id);
        }
        removed
    }
}

impl Default for InMemoryRepositoryProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl RepositoryProvider for InMemoryRepositoryProvider {
    fn stables(&self) -> &dyn StableRepository {
        self
    }

    fn horses(&self) -> &dyn HorseRepository {
        self
    }

    fn ratings(&self) -> &dyn RatingRepository {
        self
    }
}

// ── Stables ────────────────────────────────────────────────────

#[async_trait]
impl StableRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Stable>> {
        let stable = self.stables.get(&id).map(|s| s.clone());
        Ok(stable.map(|s| self.with_horse_ids(s)))
    }

    async fn find_by_name(&self, name: &str) -> DomainResult<Option<Stable>> {
        let wanted = name_key(name);
        let stable = self
            .stables
            .iter()
            .find(|e| e.name_key() == wanted)
            .map(|e| e.value().clone());
        Ok(stable.map(|s| self.with_horse_ids(s)))
    }

    async fn find_all(&self) -> DomainResult<Vec<Stable>> {
        let mut all: Vec<Stable> = self.stables.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.name_key().cmp(&b.name_key()).then(a.id.cmp(&b.id)));
        Ok(all.into_iter().map(|s| self.with_horse_ids(s)).collect())
    }

    async fn save(&self, mut stable: Stable) -> DomainResult<Stable> {
        let _guard = self.insert_lock.lock().await;
        let wanted = stable.name_key();
        if self.stables.iter().any(|e| e.name_key() == wanted) {
            return Err(DomainError::Conflict(format!("Stable '{}'", stable.name)));
        }
        stable.id = self.stable_counter.fetch_add(1, Ordering::SeqCst);
        stable.horse_ids.clear();
        self.stables.insert(stable.id, stable.clone());
        Ok(stable)
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        self.stables
            .remove(&id)
            .ok_or_else(|| DomainError::not_found("Stable", id))?;
        Ok(())
    }
}

// ── Horses ─────────────────────────────────────────────────────

#[async_trait]
impl HorseRepository for InMemoryRepositoryProvider {
    async fn find_by_id(&self, id: i32) -> DomainResult<Option<Horse>> {
        Ok(self.horses.get(&id).map(|h| h.clone()))
    }

    async fn find_by_stable(&self, stable_id: i32) -> DomainResult<Vec<Horse>> {
        let mut horses: Vec<Horse> = self
            .horses
            .iter()
            .filter(|e| e.stable_id == stable_id)
            .map(|e| e.value().clone())
            .collect();
        horses.sort_by_key(|h| h.id);
        Ok(horses)
    }

    async fn count_by_stable(&self, stable_id: i32) -> DomainResult<u64> {
        Ok(self.count_in(stable_id))
    }

    async fn exists_duplicate(&self, stable_id: i32, key: &DuplicateKey) -> DomainResult<bool> {
        Ok(self
            .horses
            .iter()
            .any(|e| e.stable_id == stable_id && &e.duplicate_key() == key))
    }

    async fn insert_within_capacity(
        &self,
        mut horse: Horse,
        max_capacity: i32,
    ) -> DomainResult<Horse> {
        let _guard = self.insert_lock.lock().await;

        let stable_name = self
            .stables
            .get(&horse.stable_id)
            .map(|s| s.name.clone())
            .ok_or_else(|| DomainError::not_found("Stable", horse.stable_id))?;

        let key = horse.duplicate_key();
        if self
            .horses
            .iter()
            .any(|e| e.stable_id == horse.stable_id && e.duplicate_key() == key)
        {
            return Err(DomainError::DuplicateHorse(horse.name.clone()));
        }

        let current = self.count_in(horse.stable_id);
        if current >= max_capacity.max(0) as u64 {
            return Err(DomainError::StableFull {
                stable: stable_name,
                current,
                capacity: max_capacity,
            });
        }

        horse.id = self.horse_counter.fetch_add(1, Ordering::SeqCst);
        self.horses.insert(horse.id, horse.clone());
        Ok(horse)
    }

    async fn update(&self, horse: &Horse) -> DomainResult<()> {
        let mut stored = self
            .horses
            .get_mut(&horse.id)
            .ok_or_else(|| DomainError::not_found("Horse", horse.id))?;
        stored.status = horse.status;
        stored.weight_kg = horse.weight_kg;
        Ok(())
    }

    async fn delete(&self, id: i32) -> DomainResult<()> {
        if !self.remove_horse(id) {
            return Err(DomainError::not_found("Horse", id));
        }
        Ok(())
    }

    async fn delete_by_stable(&self, stable_id: i32) -> DomainResult<u64> {
        let ids = self.horse_ids_of(stable_id);
        let removed = ids.into_iter().filter(|id| self.remove_horse(*id)).count();
        Ok(removed as u64)
    }

    async fn total_value(&self) -> DomainResult<f64> {
        Ok(self.horses.iter().map(|e| e.price).sum())
    }
}

// ── Ratings ────────────────────────────────────────────────────

#[async_trait]
impl RatingRepository for InMemoryRepositoryProvider {
    async fn save(&self, mut rating: Rating) -> DomainResult<Rating> {
        if !self.horses.contains_key(&rating.horse_id) {
            return Err(DomainError::not_found("Horse", rating.horse_id));
        }
        rating.id = self.rating_counter.fetch_add(1, Ordering::SeqCst);
        self.ratings.insert(rating.id, rating.clone());
        Ok(rating)
    }

    async fn average_for_horse(&self, horse_id: i32) -> DomainResult<Option<f64>> {
        let values: Vec<i32> = self
            .ratings
            .iter()
            .filter(|e| e.horse_id == horse_id)
            .map(|e| e.value)
            .collect();
        Ok(average(&values))
    }

    async fn stats_for_stable(&self, stable_id: i32) -> DomainResult<Vec<HorseRatingStat>> {
        let names: std::collections::HashMap<i32, String> = self
            .horses
            .iter()
            .filter(|e| e.stable_id == stable_id)
            .map(|e| (*e.key(), e.name.clone()))
            .collect();

        let rows: Vec<(i32, i32)> = self
            .ratings
            .iter()
            .filter(|e| names.contains_key(&e.horse_id))
            .map(|e| (e.horse_id, e.value))
            .collect();

        Ok(HorseRatingStat::aggregate(
            rows.iter()
                .filter_map(|(horse_id, value)| names.get(horse_id).map(|n| (n.as_str(), *value))),
        ))
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[tokio::test]
    async fn concurrent_saves_of_one_name_admit_a_single_stable() {
        let repos = Arc::new(InMemoryRepositoryProvider::new());
        let names = ["Łąka", "łąka", "ŁĄKA", " łąka ", "Łąka", "łĄka", "ŁąKa", "łąkA"];

        let tasks: Vec<_> = names
            .iter()
            .map(|name| {
                let repos = repos.clone();
                let stable = Stable::new(name, 2).unwrap();
                tokio::spawn(async move { repos.stables().save(stable).await })
            })
            .collect();

        let mut saved = 0;
        for task in tasks {
            match task.await.unwrap() {
                Ok(_) => saved += 1,
                Err(e) => assert!(matches!(e, DomainError::Conflict(_)), "got {e:?}"),
            }
        }
        assert_eq!(saved, 1);
        assert_eq!(repos.stables().find_all().await.unwrap().len(), 1);
        assert!(repos.stables().find_by_name("ŁĄKA").await.unwrap().is_some());
    }
}
