//! Agent roster endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use helpdesk_support::{Agent, AgentId};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{AgentCreate, AgentUpdate};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_agents).post(create_agent))
        .route("/:id", get(get_agent).put(update_agent).delete(delete_agent))
}

/// List agents by name
#[utoipa::path(
    get,
    path = "/api/v1/agents",
    responses((status = 200, body = Vec<Agent>), (status = 500, body = ErrorResponse)),
    tag = "agents"
)]
pub async fn list_agents(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Agent>>, ApiError> {
    Ok(Json(state.agents.list().await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/agents",
    request_body = AgentCreate,
    responses((status = 201, body = Agent), (status = 400, body = ErrorResponse)),
    tag = "agents"
)]
pub async fn create_agent(
    State(state): State<Arc<AppState>>,
    Json(input): Json<AgentCreate>,
) -> Result<(StatusCode, Json<Agent>), ApiError> {
    let agent = state.agents.create(input.into_command()?).await?;
    Ok((StatusCode::CREATED, Json(agent)))
}

#[utoipa::path(
    get,
    path = "/api/v1/agents/{id}",
    params(("id" = Uuid, Path, description = "Agent ID")),
    responses((status = 200, body = Agent), (status = 404, body = ErrorResponse)),
    tag = "agents"
)]
pub async fn get_agent(State(state): State<Arc<AppState>>, Path(id): Path<AgentId>) -> Result<Json<Agent>, ApiError> {
    Ok(Json(state.agents.get(&id).await?))
}

/// Change name, email, status, capacity or team
#[utoipa::path(
    put,
    path = "/api/v1/agents/{id}",
    params(("id" = Uuid, Path, description = "Agent ID")),
    request_body = AgentUpdate,
    responses(
        (status = 200, body = Agent),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "agents"
)]
pub async fn update_agent(
    State(state): State<Arc<AppState>>,
    Path(id): Path<AgentId>,
    Json(input): Json<AgentUpdate>,
) -> Result<Json<Agent>, ApiError> {
    Ok(Json(state.agents.update(&id, input.into_changes()?).await?))
}

/// Remove an agent. Tickets keep their assignee id.
#[utoipa::path(
    delete,
    path = "/api/v1/agents/{id}",
    params(("id" = Uuid, Path, description = "Agent ID")),
    responses((status = 204), (status = 404, body = ErrorResponse)),
    tag = "agents"
)]
pub async fn delete_agent(State(state): State<Arc<AppState>>, Path(id): Path<AgentId>) -> Result<StatusCode, ApiError> {
    state.agents.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}
