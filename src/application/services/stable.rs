//! Stable and horse business logic service

use std::sync::Arc;

use tracing::{debug, info};

use crate::domain::{
    DomainError, DomainResult, Horse, HorseCondition, NewHorse, RepositoryProvider, Stable,
    StableOccupancy,
};

/// Optional predicates for [`StableService::filter_horses`]. Every supplied
/// predicate must match.
#[derive(Debug, Clone, Default)]
pub struct HorseFilter {
    /// Case-insensitive substring of name or breed; blank means no filter
    pub fragment: Option<String>,
    pub status: Option<HorseCondition>,
}

impl HorseFilter {
    fn matches(&self, horse: &Horse) -> bool {
        let fragment_ok = match self.fragment.as_deref().map(str::trim) {
            Some(f) if !f.is_empty() => horse.matches_fragment(f),
            _ => true,
        };
        let status_ok = self.status.map_or(true, |s| horse.status() == s);
        fragment_ok && status_ok
    }
}

/// Service for stable and horse operations.
///
/// Holds no entity state; every call re-reads storage.
pub struct StableService {
    repos: Arc<dyn RepositoryProvider>,
}

impl StableService {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        Self { repos }
    }

    async fn require_stable(&self, id: i32) -> DomainResult<Stable> {
        self.repos
            .stables()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Stable", id))
    }

    async fn require_horse(&self, id: i32) -> DomainResult<Horse> {
        self.repos
            .horses()
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Horse", id))
    }

    // ── Stables ────────────────────────────────────────────────

    pub async fn create_stable(&self, name: &str, max_capacity: i32) -> DomainResult<Stable> {
        let stable = Stable::new(name, max_capacity)?;

        if self
            .repos
            .stables()
            .find_by_name(stable.name())
            .await?
            .is_some()
        {
            return Err(DomainError::Conflict(format!("Stable '{}'", stable.name())));
        }

        let saved = self.repos.stables().save(stable).await?;
        info!(
            stable_id = saved.id(),
            name = saved.name(),
            max_capacity,
            "Stable created"
        );
        Ok(saved)
    }

    /// Removes the stable and its horses. Returns how many horses went with it.
    pub async fn remove_stable(&self, id: i32) -> DomainResult<u64> {
        let stable = self.require_stable(id).await?;
        let removed = self.repos.horses().delete_by_stable(id).await?;
        self.repos.stables().delete(id).await?;
        info!(stable_id = id, name = stable.name(), horses = removed, "Stable removed");
        Ok(removed)
    }

    pub async fn get_stable(&self, id: i32) -> DomainResult<Stable> {
        self.require_stable(id).await
    }

    pub async fn list_stables(&self) -> DomainResult<Vec<Stable>> {
        self.repos.stables().find_all().await
    }

    /// Every stable with its occupancy, least loaded first.
    pub async fn list_stables_by_load(&self) -> DomainResult<Vec<StableOccupancy>> {
        let stables = self.repos.stables().find_all().await?;
        let mut loads = Vec::with_capacity(stables.len());
        for stable in &stables {
            let current = self.repos.horses().count_by_stable(stable.id()).await?;
            loads.push(StableOccupancy::new(stable, current));
        }
        loads.sort_by(|a, b| a.percentage.total_cmp(&b.percentage));
        Ok(loads)
    }

    pub async fn stable_occupancy(&self, id: i32) -> DomainResult<StableOccupancy> {
        let stable = self.require_stable(id).await?;
        let current = self.repos.horses().count_by_stable(id).await?;
        Ok(StableOccupancy::new(&stable, current))
    }

    /// Sum of price over the stable's horses
    pub async fn stable_value(&self, id: i32) -> DomainResult<f64> {
        self.require_stable(id).await?;
        let horses = self.repos.horses().find_by_stable(id).await?;
        Ok(horses.iter().map(Horse::price).sum())
    }

    // ── Horses ─────────────────────────────────────────────────

    /// Validate and attach a new horse to a stable.
    ///
    /// Duplicate and capacity checks run here for precise errors and are
    /// repeated atomically by the storage insert.
    pub async fn add_horse(&self, stable_id: i32, attrs: NewHorse) -> DomainResult<Horse> {
        let stable = self.require_stable(stable_id).await?;
        let horse = Horse::new(stable_id, attrs)?;

        let horses = self.repos.horses();
        if horses
            .exists_duplicate(stable_id, &horse.duplicate_key())
            .await?
        {
            return Err(DomainError::DuplicateHorse(format!(
                "{} ({}, {} years) in stable '{}'",
                horse.name(),
                horse.breed(),
                horse.age(),
                stable.name()
            )));
        }

        let current = horses.count_by_stable(stable_id).await?;
        if current >= stable.max_capacity() as u64 {
            return Err(DomainError::StableFull {
                stable: stable.name().to_string(),
                current,
                capacity: stable.max_capacity(),
            });
        }

        let saved = horses
            .insert_within_capacity(horse, stable.max_capacity())
            .await?;
        info!(
            horse_id = saved.id(),
            stable_id,
            name = saved.name(),
            "Horse added"
        );
        Ok(saved)
    }

    pub async fn get_horse(&self, id: i32) -> DomainResult<Horse> {
        self.require_horse(id).await
    }

    pub async fn remove_horse(&self, id: i32) -> DomainResult<()> {
        let horse = self.require_horse(id).await?;
        self.repos.horses().delete(id).await?;
        info!(horse_id = id, stable_id = horse.stable_id(), "Horse removed");
        Ok(())
    }

    pub async fn change_horse_status(
        &self,
        id: i32,
        status: HorseCondition,
    ) -> DomainResult<Horse> {
        let mut horse = self.require_horse(id).await?;
        let previous = horse.status();
        horse.set_status(status);
        self.repos.horses().update(&horse).await?;
        info!(horse_id = id, from = %previous, to = %status, "Horse status changed");
        Ok(horse)
    }

    /// Apply a signed weight delta; nothing is written when the result
    /// would not be positive.
    pub async fn change_horse_weight(&self, id: i32, delta: f64) -> DomainResult<Horse> {
        let mut horse = self.require_horse(id).await?;
        horse.change_weight(delta)?;
        self.repos.horses().update(&horse).await?;
        info!(horse_id = id, delta, weight_kg = horse.weight_kg(), "Horse weight changed");
        Ok(horse)
    }

    /// Horses of a stable in insertion order
    pub async fn list_horses(&self, stable_id: i32) -> DomainResult<Vec<Horse>> {
        self.require_stable(stable_id).await?;
        self.repos.horses().find_by_stable(stable_id).await
    }

    /// Horses matching every supplied predicate, in default order.
    pub async fn filter_horses(
        &self,
        stable_id: i32,
        filter: &HorseFilter,
    ) -> DomainResult<Vec<Horse>> {
        let mut horses: Vec<Horse> = self
            .list_horses(stable_id)
            .await?
            .into_iter()
            .filter(|h| filter.matches(h))
            .collect();
        horses.sort();
        debug!(stable_id, matched = horses.len(), "Horses filtered");
        Ok(horses)
    }

    /// Default order: name, breed, age
    pub async fn sort_horses_by_name(&self, stable_id: i32) -> DomainResult<Vec<Horse>> {
        let mut horses = self.list_horses(stable_id).await?;
        horses.sort();
        Ok(horses)
    }

    pub async fn sort_horses_by_price(&self, stable_id: i32) -> DomainResult<Vec<Horse>> {
        let mut horses = self.list_horses(stable_id).await?;
        horses.sort_by(Horse::cmp_by_price);
        Ok(horses)
    }

    /// Sum of price over every horse in every stable
    pub async fn total_herd_value(&self) -> DomainResult<f64> {
        self.repos.horses().total_value().await
    }
}

// ── Tests ──────────────────────────────────────────────────────
