//! Request and response bodies
//!
//! Enum-valued fields arrive as text and are mapped to the domain enums
//! here, so an unknown status or priority is rejected with a 400 before it
//! reaches a service.

use helpdesk_support::reporting::SlaStatus;
use helpdesk_support::{
    AgentChanges, AgentId, AgentStatus, NewAgent, NewTicket, ParseEnumError, Priority, TicketChanges, TicketRecord,
    TicketStatus,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

fn parse_opt<T>(raw: Option<&str>) -> Result<Option<T>, ParseEnumError>
where
    T: std::str::FromStr<Err = ParseEnumError>,
{
    raw.map(str::parse).transpose()
}

// ============ Tickets ============

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketCreate {
    pub subject: String,
    #[serde(default)]
    pub description: String,
    /// low, medium, high or urgent. Defaults to medium.
    pub priority: Option<String>,
    pub assign_to: Option<AgentId>,
}

impl TicketCreate {
    pub fn into_command(self) -> Result<NewTicket, ParseEnumError> {
        Ok(NewTicket {
            priority: parse_opt(self.priority.as_deref())?.unwrap_or_default(),
            subject: self.subject,
            description: self.description,
            assign_to: self.assign_to,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct TicketUpdate {
    pub subject: Option<String>,
    pub description: Option<String>,
    pub priority: Option<String>,
}

impl TicketUpdate {
    pub fn into_changes(self) -> Result<TicketChanges, ParseEnumError> {
        Ok(TicketChanges {
            priority: parse_opt::<Priority>(self.priority.as_deref())?,
            subject: self.subject,
            description: self.description,
        })
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct StatusChange {
    /// open, pending-review, assigned, in-progress, resolved or closed
    pub status: String,
}

impl StatusChange {
    pub fn target(&self) -> Result<TicketStatus, ParseEnumError> {
        self.status.parse()
    }
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AssignRequest {
    pub agent_id: AgentId,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct CommentCreate {
    pub author: String,
    pub body: String,
    #[serde(default)]
    pub internal: bool,
}

/// A ticket together with its SLA deadline and current breach state
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct TicketDetail {
    #[serde(flatten)]
    pub ticket: TicketRecord,
    pub sla: SlaStatus,
}

// ============ Agents ============

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentCreate {
    pub name: String,
    pub email: String,
    pub max_tickets: u32,
    /// online, away, offline or at-capacity. Defaults to offline.
    pub status: Option<String>,
    pub team: Option<String>,
}

impl AgentCreate {
    pub fn into_command(self) -> Result<NewAgent, ParseEnumError> {
        Ok(NewAgent {
            status: parse_opt(self.status.as_deref())?.unwrap_or_default(),
            name: self.name,
            email: self.email,
            max_tickets: self.max_tickets,
            team: self.team,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AgentUpdate {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<String>,
    pub max_tickets: Option<u32>,
    /// An empty string removes the agent from its team
    pub team: Option<String>,
}

impl AgentUpdate {
    pub fn into_changes(self) -> Result<AgentChanges, ParseEnumError> {
        Ok(AgentChanges {
            status: parse_opt::<AgentStatus>(self.status.as_deref())?,
            name: self.name,
            email: self.email,
            max_tickets: self.max_tickets,
            team: self.team,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_create_priority_mapping() {
        let body: TicketCreate = serde_json::from_str(r#"{"subject":"VPN down","priority":"URGENT"}"#).unwrap();
        let cmd = body.into_command().unwrap();
        assert_eq!(cmd.priority, Priority::Urgent);
        assert_eq!(cmd.description, "");

        let body: TicketCreate = serde_json::from_str(r#"{"subject":"VPN down"}"#).unwrap();
        assert_eq!(body.into_command().unwrap().priority, Priority::Medium);

        let body: TicketCreate = serde_json::from_str(r#"{"subject":"VPN down","priority":"critical"}"#).unwrap();
        let err = body.into_command().unwrap_err();
        assert_eq!(err.value, "critical");
    }

    #[test]
    fn test_status_change_mapping() {
        let change = StatusChange { status: "In Progress".into() };
        assert_eq!(change.target().unwrap(), TicketStatus::InProgress);
        let change = StatusChange { status: "done".into() };
        assert!(change.target().is_err());
    }

    #[test]
    fn test_agent_mapping() {
        let body: AgentCreate =
            serde_json::from_str(r#"{"name":"Ada","email":"ada@example.com","maxTickets":5,"status":"at_capacity"}"#)
                .unwrap();
        let cmd = body.into_command().unwrap();
        assert_eq!(cmd.status, AgentStatus::AtCapacity);
        assert_eq!(cmd.max_tickets, 5);

        let update = AgentUpdate { status: Some("busy".into()), ..AgentUpdate::default() };
        assert!(update.into_changes().is_err());
        assert!(AgentUpdate::default().into_changes().unwrap().status.is_none());
    }

    #[test]
    fn test_ticket_detail_is_flat() {
        use chrono::TimeZone;
        use helpdesk_support::{SlaPolicy, Ticket};

        let now = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap();
        let ticket = Ticket::create("Printer jam", "", Priority::High, now).unwrap();
        let detail = TicketDetail {
            sla: helpdesk_support::reporting::sla_status(&ticket, now, &SlaPolicy::default()),
            ticket: ticket.to_record(),
        };
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["subject"], "Printer jam");
        assert_eq!(json["status"], "open");
        assert_eq!(json["sla"]["deadlineHours"], 24);
        assert_eq!(json["sla"]["breached"], false);
    }
}
