//! Helpdesk Support Platform
//!
//! Ticket intake, assignment and reporting for a small support team.
//!
//! ## Architecture
//!
//! - **Domain Layer**: ticket and agent aggregates, closed status/priority enums
//! - **Ports Layer**: store traits the infrastructure implements
//! - **Infrastructure Layer**: in-memory stores, snapshot files, event logging
//! - **Application Layer**: ticket workflow, roster and report services
//! - **Reporting**: pure metric functions over a ticket/agent snapshot
//!
//! ## Reports
//!
//! - Daily volume (created vs resolved)
//! - Assignment activity
//! - Median first response and mean resolution time
//! - SLA breaches per day
//! - Dashboard summary, team capacity, unassigned triage

pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod ports;
pub mod reporting;

#[cfg(test)]
pub(crate) mod test_support;

use thiserror::Error;

pub use application::{
    AgentChanges, AgentService, NewAgent, NewTicket, ReportService, ReportWindows, TicketChanges, TicketService,
};
pub use domain::aggregates::{Agent, AgentError, Comment, Ticket, TicketError, TicketRecord};
pub use domain::events::TicketEvent;
pub use domain::value_objects::{
    AgentId, AgentStatus, CommentId, ParseEnumError, Priority, SlaPolicy, TicketId, TicketStatus,
};
pub use infrastructure::{InMemoryAgentRepository, InMemoryTicketRepository, Snapshot, SnapshotError, TracingEventPublisher};
pub use ports::outbound::{AgentRepository, EventPublisher, RepositoryError, TicketRepository};

// =============================================================================
// Error Types
// =============================================================================

#[derive(Error, Debug)]
pub enum SupportError {
    #[error("ticket {0} not found")]
    TicketNotFound(TicketId),

    #[error("agent {0} not found")]
    AgentNotFound(AgentId),

    #[error(transparent)]
    Ticket(#[from] TicketError),

    #[error(transparent)]
    Agent(#[from] AgentError),

    #[error("storage error: {0}")]
    Storage(#[from] RepositoryError),
}

pub type Result<T> = std::result::Result<T, SupportError>;
