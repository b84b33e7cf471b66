//! Ticket fixtures for unit tests

use chrono::{DateTime, TimeZone, Utc};

use crate::domain::aggregates::{Ticket, TicketRecord};
use crate::domain::value_objects::{AgentId, Priority, TicketId, TicketStatus};

pub(crate) fn ts(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub(crate) struct TicketBuilder {
    record: TicketRecord,
}

/// Open, unassigned, medium ticket created (and last updated) at `created`
pub(crate) fn ticket(created: DateTime<Utc>) -> TicketBuilder {
    TicketBuilder {
        record: TicketRecord {
            id: TicketId::new(),
            subject: "fixture".into(),
            description: String::new(),
            status: TicketStatus::Open,
            priority: Priority::Medium,
            assigned_to: None,
            created_at: created,
            updated_at: created,
            assigned_at: None,
            resolved_at: None,
            closed_at: None,
            comments: vec![],
        },
    }
}

impl TicketBuilder {
    pub(crate) fn status(mut self, status: TicketStatus) -> Self {
        self.record.status = status;
        self
    }

    pub(crate) fn priority(mut self, priority: Priority) -> Self {
        self.record.priority = priority;
        self
    }

    pub(crate) fn subject(mut self, subject: &str) -> Self {
        self.record.subject = subject.into();
        self
    }

    pub(crate) fn assigned(mut self, agent: AgentId, at: DateTime<Utc>) -> Self {
        self.record.assigned_to = Some(agent);
        self.record.assigned_at = Some(at);
        self.touch(at)
    }

    pub(crate) fn assignee(mut self, agent: AgentId) -> Self {
        self.record.assigned_to = Some(agent);
        self
    }

    pub(crate) fn resolved(mut self, at: DateTime<Utc>) -> Self {
        self.record.resolved_at = Some(at);
        self.touch(at)
    }

    pub(crate) fn updated(mut self, at: DateTime<Utc>) -> Self {
        self.record.updated_at = at;
        self
    }

    fn touch(mut self, at: DateTime<Utc>) -> Self {
        if at > self.record.updated_at {
            self.record.updated_at = at;
        }
        self
    }

    pub(crate) fn build(self) -> Ticket {
        Ticket::restore(self.record)
    }
}
