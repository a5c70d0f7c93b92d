//! Rating aggregate

pub mod model;
pub mod repository;

pub use model::{average, HorseRatingStat, Rating, MAX_RATING, MIN_RATING};
pub use repository::RatingRepository;
