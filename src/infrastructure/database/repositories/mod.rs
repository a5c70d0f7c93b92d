//! Database repository implementations
//!
//! Per-aggregate SeaORM repositories + unified RepositoryProvider.

pub mod horse_repository;
pub mod rating_repository;
pub mod repository_provider;
pub mod stable_repository;

pub use repository_provider::SeaOrmRepositoryProvider;
