//! # Stable Registry
//!
//! Tracks stables, the horses kept in them and the ratings those horses
//! receive, with CSV import/export of a stable's roster.
//!
//! ## Architecture
//!
//! - **domain**: entities, invariants and repository traits
//! - **application**: services and the CSV roster codec
//! - **infrastructure**: SeaORM/SQLite and in-memory storage
//! - **interfaces**: REST API
//! - **server**: runtime that wires everything together

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod server;
pub mod shared;

pub use config::{default_config_path, AppConfig};

// Re-export database types for easy access
pub use infrastructure::{
    init_database, run_migrations, DatabaseConfig, InMemoryRepositoryProvider,
    SeaOrmRepositoryProvider,
};

// Re-export API router
pub use interfaces::{create_api_router, AppState};
