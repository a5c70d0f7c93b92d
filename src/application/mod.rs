pub mod roster;
pub mod services;

// Re-export key types for convenience
pub use roster::{ImportReport, RowOutcome, RowReport};
pub use services::{HorseFilter, RatingService, RosterService, StableService};
