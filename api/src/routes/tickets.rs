//! Ticket endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use helpdesk_support::reporting::{self, SlaStatus};
use helpdesk_support::{Ticket, TicketId};
use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{AssignRequest, CommentCreate, StatusChange, TicketCreate, TicketDetail, TicketUpdate};
use crate::state::AppState;

pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/", get(list_tickets).post(create_ticket))
        .route("/:id", get(get_ticket).put(update_ticket).delete(delete_ticket))
        .route("/:id/sla", get(ticket_sla))
        .route("/:id/status", post(change_status))
        .route("/:id/advance", post(advance_ticket))
        .route("/:id/assignee", post(assign_ticket).delete(unassign_ticket))
        .route("/:id/comments", post(add_comment))
}

type TicketResult = Result<Json<Ticket>, ApiError>;

/// List all tickets, oldest first
#[utoipa::path(
    get,
    path = "/api/v1/tickets",
    responses((status = 200, body = Vec<TicketRecord>), (status = 500, body = ErrorResponse)),
    tag = "tickets"
)]
pub async fn list_tickets(State(state): State<Arc<AppState>>) -> Result<Json<Vec<Ticket>>, ApiError> {
    Ok(Json(state.tickets.list().await?))
}

/// Open a ticket, optionally assigning it straight away
#[utoipa::path(
    post,
    path = "/api/v1/tickets",
    request_body = TicketCreate,
    responses(
        (status = 201, body = TicketRecord),
        (status = 400, body = ErrorResponse),
        (status = 404, description = "Assignee not found", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn create_ticket(
    State(state): State<Arc<AppState>>,
    Json(input): Json<TicketCreate>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let ticket = state.tickets.create(input.into_command()?, state.now()).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}

/// Get a ticket with its SLA state
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses((status = 200, body = TicketDetail), (status = 404, body = ErrorResponse)),
    tag = "tickets"
)]
pub async fn get_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TicketId>,
) -> Result<Json<TicketDetail>, ApiError> {
    let ticket = state.tickets.get(&id).await?;
    let sla = reporting::sla_status(&ticket, state.now(), state.reports.sla());
    Ok(Json(TicketDetail { ticket: ticket.to_record(), sla }))
}

/// SLA deadline and breach state as of today
#[utoipa::path(
    get,
    path = "/api/v1/tickets/{id}/sla",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses((status = 200, body = SlaStatus), (status = 404, body = ErrorResponse)),
    tag = "tickets"
)]
pub async fn ticket_sla(State(state): State<Arc<AppState>>, Path(id): Path<TicketId>) -> Result<Json<SlaStatus>, ApiError> {
    Ok(Json(state.reports.ticket_sla(&id, state.now()).await?))
}

/// Edit subject, description or priority
#[utoipa::path(
    put,
    path = "/api/v1/tickets/{id}",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = TicketUpdate,
    responses(
        (status = 200, body = TicketRecord),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn update_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TicketId>,
    Json(input): Json<TicketUpdate>,
) -> TicketResult {
    Ok(Json(state.tickets.update_details(&id, input.into_changes()?, state.now()).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses((status = 204), (status = 404, body = ErrorResponse)),
    tag = "tickets"
)]
pub async fn delete_ticket(State(state): State<Arc<AppState>>, Path(id): Path<TicketId>) -> Result<StatusCode, ApiError> {
    state.tickets.delete(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Set the status directly
#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/status",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = StatusChange,
    responses(
        (status = 200, body = TicketRecord),
        (status = 400, description = "Unknown status", body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn change_status(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TicketId>,
    Json(input): Json<StatusChange>,
) -> TicketResult {
    let status = input.target()?;
    Ok(Json(state.tickets.change_status(&id, status, state.now()).await?))
}

/// Move to the next workflow status
#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/advance",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses(
        (status = 200, body = TicketRecord),
        (status = 404, body = ErrorResponse),
        (status = 409, description = "Ticket is closed", body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn advance_ticket(State(state): State<Arc<AppState>>, Path(id): Path<TicketId>) -> TicketResult {
    Ok(Json(state.tickets.advance(&id, state.now()).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/assignee",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = AssignRequest,
    responses((status = 200, body = TicketRecord), (status = 404, body = ErrorResponse)),
    tag = "tickets"
)]
pub async fn assign_ticket(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TicketId>,
    Json(input): Json<AssignRequest>,
) -> TicketResult {
    Ok(Json(state.tickets.assign(&id, input.agent_id, state.now()).await?))
}

#[utoipa::path(
    delete,
    path = "/api/v1/tickets/{id}/assignee",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    responses((status = 200, body = TicketRecord), (status = 404, body = ErrorResponse)),
    tag = "tickets"
)]
pub async fn unassign_ticket(State(state): State<Arc<AppState>>, Path(id): Path<TicketId>) -> TicketResult {
    Ok(Json(state.tickets.unassign(&id, state.now()).await?))
}

#[utoipa::path(
    post,
    path = "/api/v1/tickets/{id}/comments",
    params(("id" = Uuid, Path, description = "Ticket ID")),
    request_body = CommentCreate,
    responses(
        (status = 201, body = TicketRecord),
        (status = 400, body = ErrorResponse),
        (status = 404, body = ErrorResponse)
    ),
    tag = "tickets"
)]
pub async fn add_comment(
    State(state): State<Arc<AppState>>,
    Path(id): Path<TicketId>,
    Json(input): Json<CommentCreate>,
) -> Result<(StatusCode, Json<Ticket>), ApiError> {
    let ticket = state.tickets.add_comment(&id, input.author, input.body, input.internal, state.now()).await?;
    Ok((StatusCode::CREATED, Json(ticket)))
}
