//! Dashboard endpoints

use axum::{extract::State, routing::get, Json, Router};
use helpdesk_support::reporting::{DashboardSummary, TeamCapacity, UnassignedOverview};
use std::sync::Arc;

use crate::error::ApiError;
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/summary", get(summary))
        .route("/team-capacity", get(team_capacity))
        .route("/unassigned", get(unassigned))
}

/// Headline counts
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/summary",
    responses((status = 200, body = DashboardSummary), (status = 500, body = ErrorResponse)),
    tag = "dashboard"
)]
pub async fn summary(State(state): State<Arc<AppState>>) -> Result<Json<DashboardSummary>, ApiError> {
    Ok(Json(state.reports.dashboard_summary().await?))
}

/// Agents with spare or nearly exhausted capacity
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/team-capacity",
    responses((status = 200, body = TeamCapacity), (status = 500, body = ErrorResponse)),
    tag = "dashboard"
)]
pub async fn team_capacity(State(state): State<Arc<AppState>>) -> Result<Json<TeamCapacity>, ApiError> {
    Ok(Json(state.reports.team_capacity().await?))
}

/// Unassigned tickets by priority, plus the triage list
#[utoipa::path(
    get,
    path = "/api/v1/dashboard/unassigned",
    responses((status = 200, body = UnassignedOverview), (status = 500, body = ErrorResponse)),
    tag = "dashboard"
)]
pub async fn unassigned(State(state): State<Arc<AppState>>) -> Result<Json<UnassignedOverview>, ApiError> {
    Ok(Json(state.reports.unassigned_overview().await?))
}
