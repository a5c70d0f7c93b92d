pub mod horse;
pub mod rating;
pub mod repositories;
pub mod stable;

// Re-export commonly used types
pub use horse::{DuplicateKey, Horse, HorseCondition, HorseRepository, HorseType, NewHorse};
pub use rating::{HorseRatingStat, Rating, RatingRepository};
pub use repositories::{DomainResult, RepositoryProvider};
pub use stable::{Stable, StableOccupancy, StableRepository};

// Re-export DomainError from shared for convenience
pub use crate::shared::errors::DomainError;
