//! Report queries
//!
//! Every call takes a fresh snapshot from the stores and recomputes from
//! scratch. A store failure fails the whole query; there is no retry and
//! no partial result.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::domain::aggregates::{Agent, Ticket};
use crate::domain::value_objects::{SlaPolicy, TicketId};
use crate::ports::outbound::{AgentRepository, TicketRepository};
use crate::reporting::{
    self, AssignmentPoint, BreachPoint, DashboardSummary, ResolutionTimePoint, ResponseTimePoint, SlaStatus,
    TeamCapacity, UnassignedOverview, VolumePoint, TOP_UNASSIGNED_LIMIT,
};
use crate::{Result, SupportError};

/// Window lengths, in days, of the time-bucketed reports
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportWindows {
    /// Volume, first response, resolution and SLA reports
    pub trend_days: u32,
    /// Assignment activity
    pub activity_days: u32,
}

impl Default for ReportWindows {
    fn default() -> Self {
        Self { trend_days: 30, activity_days: 7 }
    }
}

pub struct ReportService {
    tickets: Arc<dyn TicketRepository>,
    agents: Arc<dyn AgentRepository>,
    sla: SlaPolicy,
    windows: ReportWindows,
}

impl ReportService {
    pub fn new(tickets: Arc<dyn TicketRepository>, agents: Arc<dyn AgentRepository>) -> Self {
        Self { tickets, agents, sla: SlaPolicy::default(), windows: ReportWindows::default() }
    }

    pub fn with_sla(mut self, sla: SlaPolicy) -> Self {
        self.sla = sla;
        self
    }

    pub fn with_windows(mut self, windows: ReportWindows) -> Self {
        self.windows = windows;
        self
    }

    pub fn sla(&self) -> &SlaPolicy {
        &self.sla
    }

    pub fn windows(&self) -> ReportWindows {
        self.windows
    }

    pub async fn volume_trend(&self, now: DateTime<Utc>) -> Result<Vec<VolumePoint>> {
        let tickets = self.ticket_snapshot("volume_trend").await?;
        Ok(reporting::volume_trend(&tickets, now, self.windows.trend_days))
    }

    pub async fn assignment_activity(&self, now: DateTime<Utc>) -> Result<Vec<AssignmentPoint>> {
        let tickets = self.ticket_snapshot("assignment_activity").await?;
        Ok(reporting::assignment_activity(&tickets, now, self.windows.activity_days))
    }

    pub async fn first_response_time(&self, now: DateTime<Utc>) -> Result<Vec<ResponseTimePoint>> {
        let tickets = self.ticket_snapshot("first_response_time").await?;
        Ok(reporting::first_response_time(&tickets, now, self.windows.trend_days))
    }

    pub async fn resolution_time(&self, now: DateTime<Utc>) -> Result<Vec<ResolutionTimePoint>> {
        let tickets = self.ticket_snapshot("resolution_time").await?;
        Ok(reporting::resolution_time(&tickets, now, self.windows.trend_days))
    }

    pub async fn sla_breaches(&self, now: DateTime<Utc>) -> Result<Vec<BreachPoint>> {
        let tickets = self.ticket_snapshot("sla_breaches").await?;
        Ok(reporting::breach_trend(&tickets, now, self.windows.trend_days, &self.sla))
    }

    pub async fn dashboard_summary(&self) -> Result<DashboardSummary> {
        let (tickets, agents) = self.full_snapshot("dashboard_summary").await?;
        Ok(reporting::summarize(&tickets, &agents))
    }

    pub async fn team_capacity(&self) -> Result<TeamCapacity> {
        let (tickets, agents) = self.full_snapshot("team_capacity").await?;
        Ok(reporting::team_capacity(&tickets, &agents))
    }

    pub async fn unassigned_overview(&self) -> Result<UnassignedOverview> {
        let tickets = self.ticket_snapshot("unassigned_overview").await?;
        Ok(reporting::unassigned_overview(&tickets, TOP_UNASSIGNED_LIMIT))
    }

    pub async fn ticket_sla(&self, id: &TicketId, now: DateTime<Utc>) -> Result<SlaStatus> {
        let ticket = self.tickets.find_by_id(id).await?.ok_or(SupportError::TicketNotFound(*id))?;
        Ok(reporting::sla_status(&ticket, now, &self.sla))
    }

    async fn ticket_snapshot(&self, report: &'static str) -> Result<Vec<Ticket>> {
        let tickets = self.tickets.list_all().await.map_err(|e| {
            tracing::error!(report, error = %e, "ticket snapshot failed");
            e
        })?;
        tracing::debug!(report, tickets = tickets.len(), "computing report");
        Ok(tickets)
    }

    async fn full_snapshot(&self, report: &'static str) -> Result<(Vec<Ticket>, Vec<Agent>)> {
        let tickets = self.ticket_snapshot(report).await?;
        let agents = self.agents.list_all().await.map_err(|e| {
            tracing::error!(report, error = %e, "agent snapshot failed");
            e
        })?;
        Ok((tickets, agents))
    }
}
