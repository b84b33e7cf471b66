//! Outbound ports (store traits)
//!
//! Implementations are constructed once at startup and shared behind `Arc`;
//! tests inject their own doubles.

use async_trait::async_trait;

use crate::domain::aggregates::{Agent, Ticket};
use crate::domain::events::TicketEvent;
use crate::domain::value_objects::{AgentId, TicketId};

/// Ticket store port
#[async_trait]
pub trait TicketRepository: Send + Sync {
    /// Full snapshot, ordered by creation time then id
    async fn list_all(&self) -> Result<Vec<Ticket>, RepositoryError>;

    /// Find ticket by ID
    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError>;

    /// Insert or replace
    async fn save(&self, ticket: &Ticket) -> Result<(), RepositoryError>;

    /// Delete ticket, returning whether it existed
    async fn delete(&self, id: &TicketId) -> Result<bool, RepositoryError>;
}

/// Agent store port
#[async_trait]
pub trait AgentRepository: Send + Sync {
    /// Full snapshot, ordered by name then id
    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError>;

    async fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError>;

    async fn save(&self, agent: &Agent) -> Result<(), RepositoryError>;

    /// Delete agent; tickets keep their (now dangling) assignment
    async fn delete(&self, id: &AgentId) -> Result<bool, RepositoryError>;
}

/// Event publisher port
#[async_trait]
pub trait EventPublisher: Send + Sync {
    async fn publish(&self, events: Vec<TicketEvent>) -> Result<(), RepositoryError>;
}

/// Store access failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RepositoryError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
}
