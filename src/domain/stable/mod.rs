//! Stable aggregate
//!
//! Contains the Stable entity, load helpers, and repository interface.

pub mod model;
pub mod repository;

pub use model::{load_fraction, name_key, Stable, StableOccupancy};
pub use repository::StableRepository;
