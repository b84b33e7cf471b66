//! Shared handler state

use chrono::{DateTime, Utc};
use helpdesk_support::{
    AgentRepository, AgentService, EventPublisher, InMemoryAgentRepository, InMemoryTicketRepository, ReportService,
    Snapshot, TicketRepository, TicketService, TracingEventPublisher,
};
use std::sync::Arc;

use crate::config::ServiceConfig;

/// Source of "now" for every request
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub tickets: Arc<TicketService>,
    pub agents: Arc<AgentService>,
    pub reports: Arc<ReportService>,
    clock: Clock,
}

impl AppState {
    /// Wire services over the given stores
    pub fn new(
        tickets: Arc<dyn TicketRepository>,
        agents: Arc<dyn AgentRepository>,
        events: Arc<dyn EventPublisher>,
        config: &ServiceConfig,
    ) -> Self {
        Self {
            tickets: Arc::new(TicketService::new(tickets.clone(), agents.clone(), events)),
            agents: Arc::new(AgentService::new(agents.clone())),
            reports: Arc::new(
                ReportService::new(tickets, agents)
                    .with_sla(config.sla.clone())
                    .with_windows(config.reports),
            ),
            clock: Arc::new(Utc::now),
        }
    }

    /// In-memory stores seeded from a snapshot
    pub fn in_memory(snapshot: Snapshot, config: &ServiceConfig) -> Self {
        tracing::info!(
            tickets = snapshot.tickets.len(),
            agents = snapshot.agents.len(),
            "seeding in-memory stores"
        );
        Self::new(
            Arc::new(InMemoryTicketRepository::with_tickets(snapshot.tickets)),
            Arc::new(InMemoryAgentRepository::with_agents(snapshot.agents)),
            Arc::new(TracingEventPublisher),
            config,
        )
    }

    pub fn with_clock(mut self, clock: impl Fn() -> DateTime<Utc> + Send + Sync + 'static) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    pub fn now(&self) -> DateTime<Utc> {
        (self.clock)()
    }
}
