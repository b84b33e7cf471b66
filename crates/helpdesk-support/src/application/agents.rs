//! Agent roster service

use std::sync::Arc;

use crate::domain::aggregates::Agent;
use crate::domain::value_objects::{AgentId, AgentStatus};
use crate::ports::outbound::AgentRepository;
use crate::{Result, SupportError};

#[derive(Debug, Clone)]
pub struct NewAgent {
    pub name: String,
    pub email: String,
    pub max_tickets: u32,
    pub status: AgentStatus,
    pub team: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct AgentChanges {
    pub name: Option<String>,
    pub email: Option<String>,
    pub status: Option<AgentStatus>,
    pub max_tickets: Option<u32>,
    /// A blank team name removes the agent from its team
    pub team: Option<String>,
}

pub struct AgentService {
    agents: Arc<dyn AgentRepository>,
}

impl AgentService {
    pub fn new(agents: Arc<dyn AgentRepository>) -> Self {
        Self { agents }
    }

    pub async fn create(&self, new: NewAgent) -> Result<Agent> {
        let mut agent = Agent::new(new.name, new.email, new.max_tickets)?.with_status(new.status);
        agent.team = new.team;
        self.agents.save(&agent).await?;
        tracing::info!(agent_id = %agent.id, "agent created");
        Ok(agent)
    }

    pub async fn get(&self, id: &AgentId) -> Result<Agent> {
        self.agents.find_by_id(id).await?.ok_or(SupportError::AgentNotFound(*id))
    }

    pub async fn list(&self) -> Result<Vec<Agent>> {
        Ok(self.agents.list_all().await?)
    }

    pub async fn update(&self, id: &AgentId, changes: AgentChanges) -> Result<Agent> {
        let mut agent = self.get(id).await?;
        if let Some(name) = changes.name { agent.rename(name)?; }
        if let Some(email) = changes.email { agent.email = email; }
        if let Some(status) = changes.status { agent.set_status(status); }
        if let Some(max) = changes.max_tickets { agent.set_capacity(max)?; }
        if let Some(team) = changes.team { agent.team = Some(team).filter(|t| !t.trim().is_empty()); }
        self.agents.save(&agent).await?;
        Ok(agent)
    }

    /// Removes the agent only; tickets keep their assignment reference
    pub async fn delete(&self, id: &AgentId) -> Result<()> {
        if !self.agents.delete(id).await? {
            return Err(SupportError::AgentNotFound(*id));
        }
        tracing::info!(agent_id = %id, "agent deleted");
        Ok(())
    }
}
