//! REST API handlers

pub mod health;
pub mod horses;
pub mod ratings;
pub mod stables;

use std::sync::Arc;

use crate::application::{RatingService, RosterService, StableService};
use crate::domain::RepositoryProvider;

/// Shared state for every API route
#[derive(Clone)]
pub struct AppState {
    pub stables: Arc<StableService>,
    pub ratings: Arc<RatingService>,
    pub roster: Arc<RosterService>,
}

impl AppState {
    pub fn new(repos: Arc<dyn RepositoryProvider>) -> Self {
        let stables = Arc::new(StableService::new(repos.clone()));
        Self {
            ratings: Arc::new(RatingService::new(repos)),
            roster: Arc::new(RosterService::new(stables.clone())),
            stables,
        }
    }
}
