//! Database entities module

pub mod horse;
pub mod rating;
pub mod stable;

pub use horse::Entity as Horse;
pub use rating::Entity as Rating;
pub use stable::Entity as Stable;
