//! Time-bucketed report endpoints
//!
//! Each report is a fixed-length list of consecutive UTC days, oldest
//! first, ending with today.

use axum::{extract::State, routing::get, Json, Router};
use helpdesk_support::reporting::{AssignmentPoint, BreachPoint, ResolutionTimePoint, ResponseTimePoint, VolumePoint};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/volume-trend", get(volume_trend))
        .route("/assignment-activity", get(assignment_activity))
        .route("/first-response-time", get(first_response_time))
        .route("/resolution-time", get(resolution_time))
        .route("/sla-breaches", get(sla_breaches))
}

/// Tickets created and resolved per day
#[utoipa::path(
    get,
    path = "/api/v1/reports/volume-trend",
    responses(
        (status = 200, description = "One entry per day", body = Vec<VolumePoint>),
        (status = 500, body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn volume_trend(State(state): State<Arc<AppState>>) -> Result<Json<Vec<VolumePoint>>, ApiError> {
    Ok(Json(state.reports.volume_trend(state.now()).await?))
}

/// Assignments and probable reassignments per day
#[utoipa::path(
    get,
    path = "/api/v1/reports/assignment-activity",
    responses(
        (status = 200, description = "One entry per day", body = Vec<AssignmentPoint>),
        (status = 500, body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn assignment_activity(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<AssignmentPoint>>, ApiError> {
    Ok(Json(state.reports.assignment_activity(state.now()).await?))
}

/// Median minutes to first response, by creation day
#[utoipa::path(
    get,
    path = "/api/v1/reports/first-response-time",
    responses(
        (status = 200, description = "One entry per day", body = Vec<ResponseTimePoint>),
        (status = 500, body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn first_response_time(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ResponseTimePoint>>, ApiError> {
    Ok(Json(state.reports.first_response_time(state.now()).await?))
}

/// Mean hours to resolution, by resolution day
#[utoipa::path(
    get,
    path = "/api/v1/reports/resolution-time",
    responses(
        (status = 200, description = "One entry per day", body = Vec<ResolutionTimePoint>),
        (status = 500, body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn resolution_time(
    State(state): State<Arc<AppState>>,
) -> Result<Json<Vec<ResolutionTimePoint>>, ApiError> {
    Ok(Json(state.reports.resolution_time(state.now()).await?))
}

/// Tickets in SLA breach at the end of each day
#[utoipa::path(
    get,
    path = "/api/v1/reports/sla-breaches",
    responses(
        (status = 200, description = "One entry per day", body = Vec<BreachPoint>),
        (status = 500, body = ErrorResponse)
    ),
    tag = "reports"
)]
pub async fn sla_breaches(State(state): State<Arc<AppState>>) -> Result<Json<Vec<BreachPoint>>, ApiError> {
    Ok(Json(state.reports.sla_breaches(state.now()).await?))
}
