//! API router

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::handlers::{health, horses, ratings, stables, AppState};

/// Create the API router with all routes
pub fn create_api_router(state: AppState) -> Router {
    let stable_routes = Router::new()
        .route(
            "/",
            get(stables::list_stables).post(stables::create_stable),
        )
        .route("/by-load", get(stables::list_stables_by_load))
        .route(
            "/{id}",
            get(stables::get_stable).delete(stables::delete_stable),
        )
        .route("/{id}/horses", get(stables::list_horses))
        .route("/{id}/fill", get(stables::stable_fill))
        .route("/{id}/value", get(stables::stable_value))
        .route("/{id}/ratings", get(stables::stable_rating_stats))
        .route(
            "/{id}/csv",
            get(stables::export_csv).post(stables::import_csv),
        );

    let horse_routes = Router::new()
        .route("/", post(horses::create_horse))
        .route("/ratings", post(ratings::add_rating))
        .route(
            "/{id}",
            get(horses::get_horse).delete(horses::delete_horse),
        )
        .route("/{id}/status", put(horses::change_status))
        .route("/{id}/weight", put(horses::change_weight))
        .route("/{id}/rating", get(ratings::horse_average));

    let api = Router::new()
        .nest("/stables", stable_routes)
        .nest("/horses", horse_routes)
        .route("/herd/value", get(horses::herd_value))
        .with_state(state);

    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}

// ── Tests ──────────────────────────────────────────────────────
