//! Agent entity
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{AgentId, AgentStatus};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub id: AgentId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub status: AgentStatus,
    pub max_tickets: u32,
    #[serde(default)]
    pub team: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AgentError {
    #[error("agent capacity must be at least one ticket")]
    ZeroCapacity,
    #[error("agent name must not be empty")]
    EmptyName,
}

impl Agent {
    pub fn new(name: impl Into<String>, email: impl Into<String>, max_tickets: u32) -> Result<Self, AgentError> {
        let name = name.into();
        if name.trim().is_empty() { return Err(AgentError::EmptyName); }
        if max_tickets == 0 { return Err(AgentError::ZeroCapacity); }
        Ok(Self { id: AgentId::new(), name, email: email.into(), status: AgentStatus::Offline, max_tickets, team: None })
    }

    pub fn with_status(mut self, status: AgentStatus) -> Self { self.status = status; self }
    pub fn with_team(mut self, team: impl Into<String>) -> Self { self.team = Some(team.into()); self }

    pub fn is_online(&self) -> bool { self.status == AgentStatus::Online }
    pub fn set_status(&mut self, status: AgentStatus) { self.status = status; }

    pub fn set_capacity(&mut self, max_tickets: u32) -> Result<(), AgentError> {
        if max_tickets == 0 { return Err(AgentError::ZeroCapacity); }
        self.max_tickets = max_tickets;
        Ok(())
    }

    pub fn rename(&mut self, name: impl Into<String>) -> Result<(), AgentError> {
        let name = name.into();
        if name.trim().is_empty() { return Err(AgentError::EmptyName); }
        self.name = name;
        Ok(())
    }
}
