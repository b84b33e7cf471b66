//! Ticket workflow service

use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::aggregates::Ticket;
use crate::domain::value_objects::{AgentId, Priority, TicketId, TicketStatus};
use crate::ports::outbound::{AgentRepository, EventPublisher, TicketRepository};
use crate::{Result, SupportError};

#[derive(Debug, Clone, Default)]
pub struct NewTicket {
    pub subject: String,
    pub description: String,
    pub priority: Priority,
    pub assign_to: Option<AgentId>,
}

#[derive(Debug, Clone, Default)]
pub struct TicketChanges {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<Priority>,
}

/// Ticket application service
pub struct TicketService {
    tickets: Arc<dyn TicketRepository>,
    agents: Arc<dyn AgentRepository>,
    events: Arc<dyn EventPublisher>,
}

impl TicketService {
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        agents: Arc<dyn AgentRepository>,
        events: Arc<dyn EventPublisher>,
    ) -> Self {
        Self { tickets, agents, events }
    }

    pub async fn create(&self, new: NewTicket, now: DateTime<Utc>) -> Result<Ticket> {
        let mut ticket = Ticket::create(new.subject, new.description, new.priority, now)?;
        if let Some(agent_id) = new.assign_to {
            self.ensure_agent(&agent_id).await?;
            ticket.assign(agent_id, now);
        }
        self.commit(&mut ticket).await?;
        tracing::info!(ticket_id = %ticket.id(), priority = %ticket.priority(), "ticket created");
        Ok(ticket)
    }

    pub async fn get(&self, id: &TicketId) -> Result<Ticket> {
        self.tickets.find_by_id(id).await?.ok_or(SupportError::TicketNotFound(*id))
    }

    pub async fn list(&self) -> Result<Vec<Ticket>> {
        Ok(self.tickets.list_all().await?)
    }

    pub async fn update_details(&self, id: &TicketId, changes: TicketChanges, now: DateTime<Utc>) -> Result<Ticket> {
        let mut ticket = self.get(id).await?;
        ticket.update_details(changes.subject, changes.description, changes.priority, now)?;
        self.commit(&mut ticket).await?;
        Ok(ticket)
    }

    pub async fn change_status(&self, id: &TicketId, status: TicketStatus, now: DateTime<Utc>) -> Result<Ticket> {
        let mut ticket = self.get(id).await?;
        ticket.transition_to(status, now);
        self.commit(&mut ticket).await?;
        tracing::info!(ticket_id = %id, status = %status, "ticket status changed");
        Ok(ticket)
    }

    pub async fn advance(&self, id: &TicketId, now: DateTime<Utc>) -> Result<Ticket> {
        let mut ticket = self.get(id).await?;
        let status = ticket.advance(now)?;
        self.commit(&mut ticket).await?;
        tracing::info!(ticket_id = %id, status = %status, "ticket advanced");
        Ok(ticket)
    }

    pub async fn assign(&self, id: &TicketId, agent_id: AgentId, now: DateTime<Utc>) -> Result<Ticket> {
        self.ensure_agent(&agent_id).await?;
        let mut ticket = self.get(id).await?;
        ticket.assign(agent_id, now);
        self.commit(&mut ticket).await?;
        tracing::info!(ticket_id = %id, agent_id = %agent_id, "ticket assigned");
        Ok(ticket)
    }

    pub async fn unassign(&self, id: &TicketId, now: DateTime<Utc>) -> Result<Ticket> {
        let mut ticket = self.get(id).await?;
        ticket.unassign(now);
        self.commit(&mut ticket).await?;
        Ok(ticket)
    }

    pub async fn add_comment(
        &self,
        id: &TicketId,
        author: String,
        body: String,
        internal: bool,
        now: DateTime<Utc>,
    ) -> Result<Ticket> {
        let mut ticket = self.get(id).await?;
        ticket.add_comment(author, body, internal, now)?;
        self.commit(&mut ticket).await?;
        Ok(ticket)
    }

    pub async fn delete(&self, id: &TicketId) -> Result<()> {
        if !self.tickets.delete(id).await? {
            return Err(SupportError::TicketNotFound(*id));
        }
        tracing::info!(ticket_id = %id, "ticket deleted");
        Ok(())
    }

    async fn ensure_agent(&self, agent_id: &AgentId) -> Result<()> {
        match self.agents.find_by_id(agent_id).await? {
            Some(_) => Ok(()),
            None => Err(SupportError::AgentNotFound(*agent_id)),
        }
    }

    async fn commit(&self, ticket: &mut Ticket) -> Result<()> {
        self.tickets.save(ticket).await?;
        self.events.publish(ticket.take_events()).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::aggregates::Agent;
    use crate::domain::value_objects::AgentStatus;
    use crate::infrastructure::{InMemoryAgentRepository, InMemoryTicketRepository, TracingEventPublisher};
    use crate::test_support::ts;

    fn service_with(agents: Vec<Agent>) -> TicketService {
        TicketService::new(
            Arc::new(InMemoryTicketRepository::new()),
            Arc::new(InMemoryAgentRepository::with_agents(agents)),
            Arc::new(TracingEventPublisher),
        )
    }

    fn new_ticket(subject: &str) -> NewTicket {
        NewTicket { subject: subject.into(), priority: Priority::High, ..NewTicket::default() }
    }

    #[tokio::test]
    async fn test_create_and_assign() {
        let agent = Agent::new("Ada", "ada@example.com", 5).unwrap().with_status(AgentStatus::Online);
        let agent_id = agent.id;
        let svc = service_with(vec![agent]);

        let t = svc.create(new_ticket("Locked out"), ts(2024, 1, 1, 8, 0)).await.unwrap();
        let t = svc.assign(&t.id(), agent_id, ts(2024, 1, 1, 9, 0)).await.unwrap();
        assert_eq!(t.status(), TicketStatus::Assigned);
        assert_eq!(t.assigned_at(), Some(ts(2024, 1, 1, 9, 0)));

        let stored = svc.get(&t.id()).await.unwrap();
        assert_eq!(stored.assigned_to(), Some(agent_id));
    }

    #[tokio::test]
    async fn test_assign_to_unknown_agent_fails() {
        let svc = service_with(vec![]);
        let t = svc.create(new_ticket("x"), ts(2024, 1, 1, 8, 0)).await.unwrap();
        let err = svc.assign(&t.id(), AgentId::new(), ts(2024, 1, 1, 9, 0)).await.unwrap_err();
        assert!(matches!(err, SupportError::AgentNotFound(_)));
        let err = svc
            .create(NewTicket { assign_to: Some(AgentId::new()), ..new_ticket("y") }, ts(2024, 1, 1, 8, 0))
            .await
            .unwrap_err();
        assert!(matches!(err, SupportError::AgentNotFound(_)));
    }

    #[tokio::test]
    async fn test_status_updates_keep_first_resolution() {
        let svc = service_with(vec![]);
        let t = svc.create(new_ticket("x"), ts(2024, 1, 1, 8, 0)).await.unwrap();
        svc.change_status(&t.id(), TicketStatus::Resolved, ts(2024, 1, 2, 8, 0)).await.unwrap();
        svc.change_status(&t.id(), TicketStatus::InProgress, ts(2024, 1, 3, 8, 0)).await.unwrap();
        let t = svc.change_status(&t.id(), TicketStatus::Resolved, ts(2024, 1, 4, 8, 0)).await.unwrap();
        assert_eq!(t.resolved_at(), Some(ts(2024, 1, 2, 8, 0)));
        assert_eq!(t.updated_at(), ts(2024, 1, 4, 8, 0));
    }

    #[tokio::test]
    async fn test_advance_until_closed() {
        let svc = service_with(vec![]);
        let t = svc.create(new_ticket("x"), ts(2024, 1, 1, 8, 0)).await.unwrap();
        for _ in 0..5 {
            svc.advance(&t.id(), ts(2024, 1, 1, 9, 0)).await.unwrap();
        }
        let err = svc.advance(&t.id(), ts(2024, 1, 1, 10, 0)).await.unwrap_err();
        assert!(matches!(err, SupportError::Ticket(_)));
        assert_eq!(svc.get(&t.id()).await.unwrap().status(), TicketStatus::Closed);
    }

    #[tokio::test]
    async fn test_delete_missing_ticket() {
        let svc = service_with(vec![]);
        let err = svc.delete(&TicketId::new()).await.unwrap_err();
        assert!(matches!(err, SupportError::TicketNotFound(_)));
    }

    #[tokio::test]
    async fn test_comment_and_details() {
        let svc = service_with(vec![]);
        let t = svc.create(new_ticket("x"), ts(2024, 1, 1, 8, 0)).await.unwrap();
        let t = svc
            .add_comment(&t.id(), "ada".into(), "Rebooted the router".into(), false, ts(2024, 1, 1, 9, 0))
            .await
            .unwrap();
        assert_eq!(t.comments().len(), 1);
        let changes = TicketChanges { priority: Some(Priority::Urgent), ..TicketChanges::default() };
        let t = svc.update_details(&t.id(), changes, ts(2024, 1, 1, 10, 0)).await.unwrap();
        assert_eq!(t.priority(), Priority::Urgent);
        assert_eq!(t.subject(), "x");
    }
}
