//! Ticket Aggregate
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::events::TicketEvent;
use crate::domain::value_objects::{AgentId, CommentId, Priority, TicketId, TicketStatus};

/// Ticket aggregate.
///
/// `resolved_at` and `closed_at` are written by the first transition into
/// the matching status and never change afterwards. `assigned_at` follows
/// the same rule for the first assignment.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "TicketRecord", into = "TicketRecord")]
pub struct Ticket {
    id: TicketId,
    subject: String,
    description: String,
    status: TicketStatus,
    priority: Priority,
    assigned_to: Option<AgentId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    assigned_at: Option<DateTime<Utc>>,
    resolved_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    comments: Vec<Comment>,
    events: Vec<TicketEvent>,
}

/// Stored / wire shape of a ticket. Timestamps are taken as-is, so a record
/// may carry orderings the aggregate itself would never produce.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TicketRecord {
    pub id: TicketId,
    pub subject: String,
    #[serde(default)]
    pub description: String,
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub assigned_to: Option<AgentId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[serde(default)]
    pub assigned_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub resolved_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub closed_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub comments: Vec<Comment>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: CommentId,
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub internal: bool,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TicketError {
    #[error("ticket subject must not be empty")]
    EmptySubject,
    #[error("comment body must not be empty")]
    EmptyComment,
    #[error("ticket is closed; no further workflow step")]
    AlreadyClosed,
}

impl Ticket {
    pub fn create(
        subject: impl Into<String>,
        description: impl Into<String>,
        priority: Priority,
        now: DateTime<Utc>,
    ) -> Result<Self, TicketError> {
        let subject = subject.into();
        if subject.trim().is_empty() {
            return Err(TicketError::EmptySubject);
        }
        let id = TicketId::new();
        let mut t = Self {
            id, subject, description: description.into(), status: TicketStatus::Open, priority,
            assigned_to: None, created_at: now, updated_at: now, assigned_at: None,
            resolved_at: None, closed_at: None, comments: vec![], events: vec![],
        };
        t.raise_event(TicketEvent::Created { ticket_id: id });
        Ok(t)
    }

    /// Rebuild a ticket from a stored record without any validation
    pub fn restore(record: TicketRecord) -> Self {
        Self {
            id: record.id,
            subject: record.subject,
            description: record.description,
            status: record.status,
            priority: record.priority,
            assigned_to: record.assigned_to,
            created_at: record.created_at,
            updated_at: record.updated_at,
            assigned_at: record.assigned_at,
            resolved_at: record.resolved_at,
            closed_at: record.closed_at,
            comments: record.comments,
            events: vec![],
        }
    }

    pub fn to_record(&self) -> TicketRecord { self.clone().into() }

    pub fn id(&self) -> TicketId { self.id }
    pub fn subject(&self) -> &str { &self.subject }
    pub fn description(&self) -> &str { &self.description }
    pub fn status(&self) -> TicketStatus { self.status }
    pub fn priority(&self) -> Priority { self.priority }
    pub fn assigned_to(&self) -> Option<AgentId> { self.assigned_to }
    pub fn is_unassigned(&self) -> bool { self.assigned_to.is_none() }
    pub fn created_at(&self) -> DateTime<Utc> { self.created_at }
    pub fn updated_at(&self) -> DateTime<Utc> { self.updated_at }
    pub fn assigned_at(&self) -> Option<DateTime<Utc>> { self.assigned_at }
    pub fn resolved_at(&self) -> Option<DateTime<Utc>> { self.resolved_at }
    pub fn closed_at(&self) -> Option<DateTime<Utc>> { self.closed_at }
    pub fn comments(&self) -> &[Comment] { &self.comments }

    /// Write a new status; last write wins, the workflow order is not enforced.
    pub fn transition_to(&mut self, status: TicketStatus, now: DateTime<Utc>) {
        let from = self.status;
        self.status = status;
        match status {
            TicketStatus::Assigned => { self.assigned_at.get_or_insert(now); }
            TicketStatus::Resolved => { self.resolved_at.get_or_insert(now); }
            TicketStatus::Closed => { self.closed_at.get_or_insert(now); }
            _ => {}
        }
        self.touch(now);
        if from != status {
            self.raise_event(TicketEvent::StatusChanged { ticket_id: self.id, from, to: status });
        }
    }

    /// Move one step along open → pending-review → assigned → in-progress → resolved → closed
    pub fn advance(&mut self, now: DateTime<Utc>) -> Result<TicketStatus, TicketError> {
        let next = self.status.next().ok_or(TicketError::AlreadyClosed)?;
        self.transition_to(next, now);
        Ok(next)
    }

    pub fn assign(&mut self, agent_id: AgentId, now: DateTime<Utc>) {
        self.assigned_to = Some(agent_id);
        self.raise_event(TicketEvent::Assigned { ticket_id: self.id, agent_id });
        if matches!(self.status, TicketStatus::Open | TicketStatus::PendingReview) {
            self.transition_to(TicketStatus::Assigned, now);
        } else {
            self.touch(now);
        }
    }

    pub fn unassign(&mut self, now: DateTime<Utc>) {
        if self.assigned_to.take().is_some() {
            self.raise_event(TicketEvent::Unassigned { ticket_id: self.id });
        }
        self.touch(now);
    }

    pub fn update_details(
        &mut self,
        subject: Option<String>,
        description: Option<String>,
        priority: Option<Priority>,
        now: DateTime<Utc>,
    ) -> Result<(), TicketError> {
        if let Some(subject) = subject {
            if subject.trim().is_empty() {
                return Err(TicketError::EmptySubject);
            }
            self.subject = subject;
        }
        if let Some(description) = description { self.description = description; }
        if let Some(priority) = priority { self.priority = priority; }
        self.touch(now);
        Ok(())
    }

    pub fn add_comment(
        &mut self,
        author: impl Into<String>,
        body: impl Into<String>,
        internal: bool,
        now: DateTime<Utc>,
    ) -> Result<&Comment, TicketError> {
        let body = body.into();
        if body.trim().is_empty() {
            return Err(TicketError::EmptyComment);
        }
        self.comments.push(Comment { id: CommentId::new(), author: author.into(), body, internal, created_at: now });
        self.touch(now);
        self.raise_event(TicketEvent::CommentAdded { ticket_id: self.id });
        Ok(&self.comments[self.comments.len() - 1])
    }

    pub fn take_events(&mut self) -> Vec<TicketEvent> { std::mem::take(&mut self.events) }
    fn raise_event(&mut self, e: TicketEvent) { self.events.push(e); }
    fn touch(&mut self, now: DateTime<Utc>) { self.updated_at = now; }
}

impl From<TicketRecord> for Ticket {
    fn from(record: TicketRecord) -> Self { Ticket::restore(record) }
}

impl From<Ticket> for TicketRecord {
    fn from(t: Ticket) -> Self {
        TicketRecord {
            id: t.id,
            subject: t.subject,
            description: t.description,
            status: t.status,
            priority: t.priority,
            assigned_to: t.assigned_to,
            created_at: t.created_at,
            updated_at: t.updated_at,
            assigned_at: t.assigned_at,
            resolved_at: t.resolved_at,
            closed_at: t.closed_at,
            comments: t.comments,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 1, h, 0, 0).unwrap()
    }

    #[test]
    fn test_ticket_workflow() {
        let mut t = Ticket::create("Help needed", "Description", Priority::High, at(8)).unwrap();
        assert_eq!(t.status(), TicketStatus::Open);
        let agent = AgentId::new();
        t.assign(agent, at(9));
        assert_eq!(t.status(), TicketStatus::Assigned);
        assert_eq!(t.assigned_at(), Some(at(9)));
        assert_eq!(t.advance(at(10)).unwrap(), TicketStatus::InProgress);
        assert_eq!(t.advance(at(11)).unwrap(), TicketStatus::Resolved);
        assert_eq!(t.resolved_at(), Some(at(11)));
        assert_eq!(t.advance(at(12)).unwrap(), TicketStatus::Closed);
        assert_eq!(t.closed_at(), Some(at(12)));
        assert_eq!(t.advance(at(13)), Err(TicketError::AlreadyClosed));
    }

    #[test]
    fn test_resolution_timestamps_first_transition_wins() {
        let mut t = Ticket::create("Printer", "", Priority::Low, at(8)).unwrap();
        t.transition_to(TicketStatus::Resolved, at(9));
        t.transition_to(TicketStatus::InProgress, at(10));
        t.transition_to(TicketStatus::Resolved, at(11));
        t.transition_to(TicketStatus::Closed, at(12));
        t.transition_to(TicketStatus::Closed, at(13));
        assert_eq!(t.resolved_at(), Some(at(9)));
        assert_eq!(t.closed_at(), Some(at(12)));
        assert_eq!(t.updated_at(), at(13));
    }

    #[test]
    fn test_reassign_keeps_first_assignment_time() {
        let mut t = Ticket::create("VPN", "", Priority::Medium, at(8)).unwrap();
        t.assign(AgentId::new(), at(9));
        t.transition_to(TicketStatus::InProgress, at(10));
        let other = AgentId::new();
        t.assign(other, at(11));
        assert_eq!(t.assigned_to(), Some(other));
        assert_eq!(t.assigned_at(), Some(at(9)));
        assert_eq!(t.status(), TicketStatus::InProgress);
        assert_eq!(t.updated_at(), at(11));
    }

    #[test]
    fn test_events_are_drained() {
        let mut t = Ticket::create("Email", "", Priority::Urgent, at(8)).unwrap();
        t.assign(AgentId::new(), at(9));
        let names: Vec<&str> = t.take_events().iter().map(|e| e.name()).collect();
        assert_eq!(names, vec!["created", "assigned", "status_changed"]);
        assert!(t.take_events().is_empty());
    }

    #[test]
    fn test_rejects_empty_subject_and_comment() {
        assert_eq!(Ticket::create("  ", "", Priority::Low, at(8)).unwrap_err(), TicketError::EmptySubject);
        let mut t = Ticket::create("Disk", "", Priority::Low, at(8)).unwrap();
        assert_eq!(t.add_comment("agent", " ", false, at(9)).unwrap_err(), TicketError::EmptyComment);
        assert_eq!(t.add_comment("agent", "Looking", true, at(9)).unwrap().body, "Looking");
        assert_eq!(t.comments().len(), 1);
    }

    #[test]
    fn test_record_roundtrip_preserves_out_of_order_timestamps() {
        let created = at(12);
        let record = TicketRecord {
            id: TicketId::new(),
            subject: "Edited by hand".into(),
            description: String::new(),
            status: TicketStatus::Resolved,
            priority: Priority::High,
            assigned_to: None,
            created_at: created,
            updated_at: created,
            assigned_at: None,
            resolved_at: Some(created - Duration::hours(2)),
            closed_at: None,
            comments: vec![],
        };
        let json = serde_json::to_string(&Ticket::restore(record.clone())).unwrap();
        let back: Ticket = serde_json::from_str(&json).unwrap();
        assert_eq!(back.to_record(), record);
        assert!(json.contains("\"resolvedAt\""));
    }
}
