//! In-memory store implementations
//!
//! One instance per process, shared through `Arc`. `DashMap` keeps handlers
//! on different tokio workers from serialising on a single lock.

use async_trait::async_trait;
use dashmap::DashMap;

use crate::domain::aggregates::{Agent, Ticket};
use crate::domain::events::TicketEvent;
use crate::domain::value_objects::{AgentId, TicketId};
use crate::ports::outbound::{AgentRepository, EventPublisher, RepositoryError, TicketRepository};

/// In-memory ticket store
#[derive(Default)]
pub struct InMemoryTicketRepository {
    tickets: DashMap<TicketId, Ticket>,
}

impl InMemoryTicketRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_tickets(tickets: impl IntoIterator<Item = Ticket>) -> Self {
        let repo = Self::new();
        for t in tickets {
            repo.tickets.insert(t.id(), t);
        }
        repo
    }
}

#[async_trait]
impl TicketRepository for InMemoryTicketRepository {
    async fn list_all(&self) -> Result<Vec<Ticket>, RepositoryError> {
        let mut all: Vec<Ticket> = self.tickets.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.created_at().cmp(&b.created_at()).then_with(|| a.id().cmp(&b.id())));
        Ok(all)
    }

    async fn find_by_id(&self, id: &TicketId) -> Result<Option<Ticket>, RepositoryError> {
        Ok(self.tickets.get(id).map(|e| e.value().clone()))
    }

    async fn save(&self, ticket: &Ticket) -> Result<(), RepositoryError> {
        self.tickets.insert(ticket.id(), ticket.clone());
        Ok(())
    }

    async fn delete(&self, id: &TicketId) -> Result<bool, RepositoryError> {
        Ok(self.tickets.remove(id).is_some())
    }
}

/// In-memory agent store
#[derive(Default)]
pub struct InMemoryAgentRepository {
    agents: DashMap<AgentId, Agent>,
}

impl InMemoryAgentRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_agents(agents: impl IntoIterator<Item = Agent>) -> Self {
        let repo = Self::new();
        for a in agents {
            repo.agents.insert(a.id, a);
        }
        repo
    }
}

#[async_trait]
impl AgentRepository for InMemoryAgentRepository {
    async fn list_all(&self) -> Result<Vec<Agent>, RepositoryError> {
        let mut all: Vec<Agent> = self.agents.iter().map(|e| e.value().clone()).collect();
        all.sort_by(|a, b| a.name.cmp(&b.name).then_with(|| a.id.cmp(&b.id)));
        Ok(all)
    }

    async fn find_by_id(&self, id: &AgentId) -> Result<Option<Agent>, RepositoryError> {
        Ok(self.agents.get(id).map(|e| e.value().clone()))
    }

    async fn save(&self, agent: &Agent) -> Result<(), RepositoryError> {
        self.agents.insert(agent.id, agent.clone());
        Ok(())
    }

    async fn delete(&self, id: &AgentId) -> Result<bool, RepositoryError> {
        Ok(self.agents.remove(id).is_some())
    }
}

/// Publishes events to the log
#[derive(Default)]
pub struct TracingEventPublisher;

#[async_trait]
impl EventPublisher for TracingEventPublisher {
    async fn publish(&self, events: Vec<TicketEvent>) -> Result<(), RepositoryError> {
        for event in events {
            tracing::info!(ticket_id = %event.ticket_id(), event = event.name(), "ticket event");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::Priority;
    use chrono::{TimeZone, Utc};

    #[tokio::test]
    async fn test_ticket_snapshot_is_ordered_by_creation() {
        let later = Ticket::create("later", "", Priority::Low, Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap()).unwrap();
        let earlier = Ticket::create("earlier", "", Priority::Low, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()).unwrap();
        let repo = InMemoryTicketRepository::with_tickets(vec![later, earlier]);

        let all = repo.list_all().await.unwrap();
        let subjects: Vec<&str> = all.iter().map(|t| t.subject()).collect();
        assert_eq!(subjects, vec!["earlier", "later"]);
    }

    #[tokio::test]
    async fn test_save_find_delete() {
        let repo = InMemoryTicketRepository::new();
        let t = Ticket::create("x", "", Priority::High, Utc::now()).unwrap();
        repo.save(&t).await.unwrap();
        assert_eq!(repo.find_by_id(&t.id()).await.unwrap().map(|t| t.id()), Some(t.id()));
        assert!(repo.delete(&t.id()).await.unwrap());
        assert!(!repo.delete(&t.id()).await.unwrap());
        assert!(repo.list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_agents_ordered_by_name() {
        let repo = InMemoryAgentRepository::with_agents(vec![
            Agent::new("Zoe", "z@example.com", 3).unwrap(),
            Agent::new("Abe", "a@example.com", 3).unwrap(),
        ]);
        let names: Vec<String> = repo.list_all().await.unwrap().into_iter().map(|a| a.name).collect();
        assert_eq!(names, vec!["Abe", "Zoe"]);
    }
}
