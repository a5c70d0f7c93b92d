//! Application services

mod rating;
mod roster;
mod stable;

pub use rating::RatingService;
pub use roster::RosterService;
pub use stable::{HorseFilter, StableService};
