//! Stable REST API handlers

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use super::AppState;
use crate::application::{HorseFilter, ImportReport};
use crate::domain::{Horse, HorseCondition, HorseRatingStat, Stable, StableOccupancy};
use crate::interfaces::http::common::{
    bad_request, domain_error_response, ApiError, ApiResponse, ApiResult,
};

#[derive(Debug, Deserialize)]
pub struct CreateStableRequest {
    pub name: String,
    pub max_capacity: i32,
}

/// Query string of `GET /stables/{id}/horses`
#[derive(Debug, Default, Deserialize)]
pub struct HorseQuery {
    pub fragment: Option<String>,
    pub status: Option<String>,
    /// `name` or `price`
    pub sort: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct StableValue {
    pub stable_id: i32,
    pub value: f64,
}

pub async fn list_stables(State(state): State<AppState>) -> ApiResult<Vec<Stable>> {
    let stables = state
        .stables
        .list_stables()
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(stables)))
}

pub async fn list_stables_by_load(
    State(state): State<AppState>,
) -> ApiResult<Vec<StableOccupancy>> {
    let loads = state
        .stables
        .list_stables_by_load()
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(loads)))
}

pub async fn create_stable(
    State(state): State<AppState>,
    Json(req): Json<CreateStableRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Stable>>), ApiError> {
    let stable = state
        .stables
        .create_stable(&req.name, req.max_capacity)
        .await
        .map_err(domain_error_response)?;
    Ok((StatusCode::CREATED, Json(ApiResponse::success(stable))))
}

pub async fn get_stable(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Stable> {
    let stable = state
        .stables
        .get_stable(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(stable)))
}

pub async fn delete_stable(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<StatusCode, ApiError> {
    state
        .stables
        .remove_stable(id)
        .await
        .map_err(domain_error_response)?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn list_horses(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Query(query): Query<HorseQuery>,
) -> ApiResult<Vec<Horse>> {
    let status = match query.status.as_deref() {
        Some(s) if !s.trim().is_empty() => Some(
            s.parse::<HorseCondition>()
                .map_err(domain_error_response)?,
        ),
        _ => None,
    };
    let filter = HorseFilter {
        fragment: query.fragment,
        status,
    };
    let filtering = filter.status.is_some()
        || filter
            .fragment
            .as_deref()
            .is_some_and(|f| !f.trim().is_empty());

    let svc = &state.stables;
    let horses = match (filtering, query.sort.as_deref()) {
        (true, Some("price")) => svc.filter_horses(id, &filter).await.map(|mut hs| {
            hs.sort_by(Horse::cmp_by_price);
            hs
        }),
        (true, None | Some("name")) => svc.filter_horses(id, &filter).await,
        (false, Some("price")) => svc.sort_horses_by_price(id).await,
        (false, Some("name")) => svc.sort_horses_by_name(id).await,
        (false, None) => svc.list_horses(id).await,
        (_, Some(other)) => {
            return Err(bad_request(format!(
                "Unknown sort '{}', expected 'name' or 'price'",
                other
            )))
        }
    }
    .map_err(domain_error_response)?;

    Ok(Json(ApiResponse::success(horses)))
}

pub async fn stable_fill(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StableOccupancy> {
    let fill = state
        .stables
        .stable_occupancy(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(fill)))
}

pub async fn stable_value(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<StableValue> {
    let value = state
        .stables
        .stable_value(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(StableValue {
        stable_id: id,
        value,
    })))
}

pub async fn stable_rating_stats(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> ApiResult<Vec<HorseRatingStat>> {
    let stats = state
        .ratings
        .rating_stats_for_stable(id)
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(stats)))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<Response, ApiError> {
    let mut buf = Vec::new();
    state
        .roster
        .export_roster(id, &mut buf)
        .await
        .map_err(domain_error_response)?;
    Ok((
        [(header::CONTENT_TYPE, "text/csv; charset=utf-8")],
        buf,
    )
        .into_response())
}

pub async fn import_csv(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    body: String,
) -> ApiResult<ImportReport> {
    let report = state
        .roster
        .import_roster(id, body.as_bytes())
        .await
        .map_err(domain_error_response)?;
    Ok(Json(ApiResponse::success(report)))
}
