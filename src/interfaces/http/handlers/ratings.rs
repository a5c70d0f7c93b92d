//! Rating REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::Rating;
use crate::interfaces::http::common::{
    domain_error_response, not_found, ApiError, ApiResponse, ApiResult,
};

#[derive(Debug, Deserialize)]
pub struct CreateRatingRequest {
    pub horse_id: i32,
    pub value: i32,
    pub description: Option<String>,
    pub rating_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Serialize)]
pub struct HorseAverage {
    pub horse_id: i32,
    pub average: f64,
}

pub async fn add_rating(
    State(state): State<AppState>,
    Json(req): Json<CreateRatingRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Rating>>), ApiError> {
    let rating = state
        .ratings
        .add_rating(
            req.horse_id,
            req.value,
            req.description.as_deref(),
            req.rating_date,
        )
        .await
        .map_err(domain_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(rating))))
}

pub async fn horse_average(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<HorseAverage> {
    let average = state
        .ratings
        .average_rating_for_horse(id)
        .await
        .map_err(domain_error_response)?
        .ok_or_else(|| not_found(format!("No ratings for horse {}", id)))?;
    Ok(Json(ApiResponse::success(HorseAverage {
        horse_id: id,
        average,
    })))
}
