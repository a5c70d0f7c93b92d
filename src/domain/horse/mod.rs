//! Horse aggregate
//!
//! Contains the Horse entity, its enumerations, ordering and duplicate key,
//! and the repository interface.

pub mod model;
pub mod repository;

pub use model::{DuplicateKey, Horse, HorseCondition, HorseType, NewHorse};
pub use repository::HorseRepository;
