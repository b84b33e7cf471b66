//! Support domain events
use serde::Serialize;

use crate::domain::value_objects::{AgentId, TicketId, TicketStatus};

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TicketEvent {
    Created { ticket_id: TicketId },
    Assigned { ticket_id: TicketId, agent_id: AgentId },
    Unassigned { ticket_id: TicketId },
    StatusChanged { ticket_id: TicketId, from: TicketStatus, to: TicketStatus },
    CommentAdded { ticket_id: TicketId },
}

impl TicketEvent {
    pub fn ticket_id(&self) -> TicketId {
        match self {
            TicketEvent::Created { ticket_id }
            | TicketEvent::Assigned { ticket_id, .. }
            | TicketEvent::Unassigned { ticket_id }
            | TicketEvent::StatusChanged { ticket_id, .. }
            | TicketEvent::CommentAdded { ticket_id } => *ticket_id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            TicketEvent::Created { .. } => "created",
            TicketEvent::Assigned { .. } => "assigned",
            TicketEvent::Unassigned { .. } => "unassigned",
            TicketEvent::StatusChanged { .. } => "status_changed",
            TicketEvent::CommentAdded { .. } => "comment_added",
        }
    }
}
