//! HTTP REST API interfaces
//!
//! - `common`: response envelope and error-to-status mapping
//! - `handlers`: request handlers for stables, horses and ratings
//! - `router`: route table

pub mod common;
pub mod handlers;
pub mod router;

pub use common::ApiResponse;
pub use handlers::AppState;
pub use router::create_api_router;
