//! Horse REST API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::domain::{Horse, HorseCondition, NewHorse};
use crate::interfaces::http::common::{domain_error_response, ApiError, ApiResponse, ApiResult};

#[derive(Debug, Deserialize)]
pub struct CreateHorseRequest {
    pub stable_id: i32,
    #[serde(flatten)]
    pub horse: NewHorse,
}

#[derive(Debug, Deserialize)]
pub struct ChangeStatusRequest {
    pub status: HorseCondition,
}

/// Signed weight change in kilograms
#[derive(Debug, Deserialize)]
pub struct ChangeWeightRequest {
    pub delta: f64,
}

#[derive(Debug, Serialize)]
pub struct HerdValue {
    pub total: f64,
}

pub async fn create_horse(
    State(state): State<AppState>,
    Json(req): Json<CreateHorseRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Horse>>), ApiError> {
    let horse = state
        .stables
        .add_horse(req.stable_id, req.horse)
        .await
        .map_err(domain_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(horse))))
}

pub async fn get_horse(State(state): State<AppState>, Path(id): Path<i32>) -> ApiResult<Horse> {
    let horse = state
        .stables
        .get_horse(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(horse)))
}

pub async fn delete_horse(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .stables
        .remove_horse(id)
        .await
        .map_err(domain_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn change_status(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ChangeStatusRequest>,
) -> ApiResult<Horse> {
    let horse = state
        .stables
        .change_horse_status(id, req.status)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(horse)))
}

pub async fn change_weight(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Json(req): Json<ChangeWeightRequest>,
) -> ApiResult<Horse> {
    let horse = state
        .stables
        .change_horse_weight(id, req.delta)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(horse)))
}

pub async fn herd_value(State(state): State<AppState>) -> ApiResult<HerdValue> {
    let total = state
        .stables
        .total_herd_value()
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(HerdValue { total })))
}
