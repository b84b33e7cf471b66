//! Helpdesk API
//!
//! REST surface over the helpdesk-support services: ticket workflow, the
//! agent roster, time-bucketed reports and the dashboard.
//!
//! ```text
//! /health
//! /docs                          Swagger UI
//! /api/v1/tickets                CRUD, status, assignee, comments, SLA
//! /api/v1/agents                 CRUD
//! /api/v1/reports/...            30-day and 7-day daily series
//! /api/v1/dashboard/...          summary, team capacity, unassigned
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod state;

use axum::{routing::get, Router};
use helpdesk_support::reporting::{
    AgentLoad, AssignmentPoint, BreachPoint, DashboardSummary, PriorityBreakdown, ResolutionTimePoint,
    ResponseTimePoint, SlaStatus, TeamCapacity, TriageEntry, UnassignedOverview, VolumePoint,
};
use helpdesk_support::{Agent, AgentId, AgentStatus, Comment, CommentId, Priority, TicketId, TicketRecord, TicketStatus};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

pub use config::ServiceConfig;
pub use error::{ApiError, ErrorResponse};
pub use models::*;
pub use state::AppState;

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Helpdesk API",
        version = "0.1.0",
        description = "Helpdesk tickets, roster and reporting",
        license(name = "Apache-2.0")
    ),
    paths(
        routes::health::health_check,
        routes::tickets::list_tickets,
        routes::tickets::create_ticket,
        routes::tickets::get_ticket,
        routes::tickets::ticket_sla,
        routes::tickets::update_ticket,
        routes::tickets::delete_ticket,
        routes::tickets::change_status,
        routes::tickets::advance_ticket,
        routes::tickets::assign_ticket,
        routes::tickets::unassign_ticket,
        routes::tickets::add_comment,
        routes::agents::list_agents,
        routes::agents::create_agent,
        routes::agents::get_agent,
        routes::agents::update_agent,
        routes::agents::delete_agent,
        routes::reports::volume_trend,
        routes::reports::assignment_activity,
        routes::reports::first_response_time,
        routes::reports::resolution_time,
        routes::reports::sla_breaches,
        routes::dashboard::summary,
        routes::dashboard::team_capacity,
        routes::dashboard::unassigned,
    ),
    components(
        schemas(
            ErrorResponse, routes::health::HealthResponse,
            TicketId, AgentId, CommentId, Priority, TicketStatus, AgentStatus,
            TicketRecord, Comment, TicketDetail, TicketCreate, TicketUpdate, StatusChange, AssignRequest, CommentCreate,
            Agent, AgentCreate, AgentUpdate,
            VolumePoint, AssignmentPoint, ResponseTimePoint, ResolutionTimePoint, BreachPoint, SlaStatus,
            DashboardSummary, AgentLoad, TeamCapacity, PriorityBreakdown, TriageEntry, UnassignedOverview
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "tickets", description = "Ticket workflow"),
        (name = "agents", description = "Agent roster"),
        (name = "reports", description = "Daily report series"),
        (name = "dashboard", description = "Point-in-time dashboard figures")
    )
)]
pub struct ApiDoc;

/// Build the API router
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/health", get(routes::health::health_check))
        .nest("/api/v1", api_routes())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(Arc::new(state))
}

fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .nest("/tickets", routes::tickets::router())
        .nest("/agents", routes::agents::router())
        .nest("/reports", routes::reports::router())
        .nest("/dashboard", routes::dashboard::router())
}
