//! Point-in-time dashboard figures
//!
//! Recomputed from the full ticket and agent snapshots on every call.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::HashMap;

use super::round1;
use crate::domain::aggregates::{Agent, Ticket};
use crate::domain::value_objects::{AgentId, Priority, TicketId, TicketStatus};

/// Default size of the unassigned triage list
pub const TOP_UNASSIGNED_LIMIT: usize = 10;

const AT_RISK_PERCENT: u64 = 80;
const FULL_PERCENT: u64 = 100;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub agents_online: u32,
    pub unassigned_tickets: u32,
    pub backlog: u32,
    pub new_tickets: u32,
    pub resolved_tickets: u32,
    pub avg_load_per_agent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AgentLoad {
    pub agent_id: AgentId,
    pub name: String,
    pub team: Option<String>,
    pub active_tickets: u32,
    pub max_tickets: u32,
    pub load_percent: f64,
}

/// Agents grouped by load.
///
/// Agents at or above 100% load appear in neither list. This mirrors the
/// long-standing dashboard behaviour and is kept as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TeamCapacity {
    pub available: Vec<AgentLoad>,
    pub at_risk: Vec<AgentLoad>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct PriorityBreakdown {
    pub low: u32,
    pub medium: u32,
    pub high: u32,
    pub urgent: u32,
}

impl PriorityBreakdown {
    fn bump(&mut self, priority: Priority) {
        match priority {
            Priority::Low => self.low += 1,
            Priority::Medium => self.medium += 1,
            Priority::High => self.high += 1,
            Priority::Urgent => self.urgent += 1,
        }
    }
}

/// One row of the unassigned triage list
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TriageEntry {
    pub id: TicketId,
    pub subject: String,
    pub priority: Priority,
    pub status: TicketStatus,
    pub created_at: DateTime<Utc>,
}

impl From<&Ticket> for TriageEntry {
    fn from(t: &Ticket) -> Self {
        Self {
            id: t.id(),
            subject: t.subject().to_string(),
            priority: t.priority(),
            status: t.status(),
            created_at: t.created_at(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct UnassignedOverview {
    pub by_priority: PriorityBreakdown,
    pub top: Vec<TriageEntry>,
}

fn count_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

fn count_where(tickets: &[Ticket], pred: impl Fn(&Ticket) -> bool) -> u32 {
    count_u32(tickets.iter().filter(|t| pred(t)).count())
}

pub fn summarize(tickets: &[Ticket], agents: &[Agent]) -> DashboardSummary {
    let agents_online = count_u32(agents.iter().filter(|a| a.is_online()).count());
    let assigned_open = count_where(tickets, |t| t.assigned_to().is_some() && t.status() != TicketStatus::Closed);
    let avg_load_per_agent = if agents_online == 0 {
        0.0
    } else {
        round1(f64::from(assigned_open) / f64::from(agents_online))
    };

    DashboardSummary {
        agents_online,
        unassigned_tickets: count_where(tickets, |t| t.is_unassigned() && t.status().is_active()),
        backlog: count_where(tickets, |t| t.status().is_active()),
        new_tickets: count_where(tickets, |t| matches!(t.status(), TicketStatus::Open | TicketStatus::Assigned)),
        resolved_tickets: count_where(tickets, |t| t.status() == TicketStatus::Resolved),
        avg_load_per_agent,
    }
}

/// Classify agents by the share of their capacity taken by active tickets:
/// below 80% available, 80% up to (not including) 100% at risk.
pub fn team_capacity(tickets: &[Ticket], agents: &[Agent]) -> TeamCapacity {
    let mut active: HashMap<AgentId, u32> = HashMap::new();
    for t in tickets.iter().filter(|t| t.status().is_active()) {
        if let Some(agent_id) = t.assigned_to() {
            *active.entry(agent_id).or_default() += 1;
        }
    }

    let mut capacity = TeamCapacity::default();
    for agent in agents.iter().filter(|a| a.max_tickets > 0) {
        let active_tickets = active.get(&agent.id).copied().unwrap_or(0);
        let used = u64::from(active_tickets) * 100;
        let max = u64::from(agent.max_tickets);
        let load = AgentLoad {
            agent_id: agent.id,
            name: agent.name.clone(),
            team: agent.team.clone(),
            active_tickets,
            max_tickets: agent.max_tickets,
            load_percent: round1(used as f64 / max as f64),
        };
        if used < AT_RISK_PERCENT * max {
            capacity.available.push(load);
        } else if used < FULL_PERCENT * max {
            capacity.at_risk.push(load);
        }
    }
    capacity
}

fn unassigned_not_closed(t: &Ticket) -> bool {
    t.is_unassigned() && t.status() != TicketStatus::Closed
}

pub fn unassigned_by_priority(tickets: &[Ticket]) -> PriorityBreakdown {
    let mut breakdown = PriorityBreakdown::default();
    for t in tickets.iter().filter(|t| unassigned_not_closed(t)) {
        breakdown.bump(t.priority());
    }
    breakdown
}

/// Unassigned tickets, most urgent first; equal priorities keep snapshot order
pub fn top_unassigned(tickets: &[Ticket], limit: usize) -> Vec<TriageEntry> {
    let mut queue: Vec<&Ticket> = tickets.iter().filter(|t| unassigned_not_closed(t)).collect();
    queue.sort_by(|a, b| b.priority().rank().cmp(&a.priority().rank()));
    queue.into_iter().take(limit).map(TriageEntry::from).collect()
}

pub fn unassigned_overview(tickets: &[Ticket], limit: usize) -> UnassignedOverview {
    UnassignedOverview {
        by_priority: unassigned_by_priority(tickets),
        top: top_unassigned(tickets, limit),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_objects::AgentStatus;
    use crate::test_support::{ticket, ts};

    fn agent(name: &str, max: u32, status: AgentStatus) -> Agent {
        Agent::new(name, format!("{name}@example.com"), max).unwrap().with_status(status)
    }

    fn t0() -> DateTime<Utc> {
        ts(2024, 2, 1, 9, 0)
    }

    #[test]
    fn test_summary_counts() {
        let ada = agent("ada", 5, AgentStatus::Online);
        let bob = agent("bob", 5, AgentStatus::Online);
        let cy = agent("cy", 5, AgentStatus::Away);
        let tickets = vec![
            ticket(t0()).build(),                                                        // open, unassigned
            ticket(t0()).status(TicketStatus::PendingReview).build(),                    // unassigned
            ticket(t0()).status(TicketStatus::Assigned).assignee(ada.id).build(),
            ticket(t0()).status(TicketStatus::InProgress).assignee(bob.id).build(),
            ticket(t0()).status(TicketStatus::Resolved).assignee(bob.id).build(),
            ticket(t0()).status(TicketStatus::Closed).assignee(ada.id).build(),
            ticket(t0()).status(TicketStatus::Resolved).build(),
        ];
        let s = summarize(&tickets, &[ada, bob, cy]);
        assert_eq!(s.agents_online, 2);
        assert_eq!(s.unassigned_tickets, 2);
        assert_eq!(s.backlog, 4);
        assert_eq!(s.new_tickets, 2);
        assert_eq!(s.resolved_tickets, 2);
        // assigned and not closed: 3 tickets over 2 online agents
        assert_eq!(s.avg_load_per_agent, 1.5);
    }

    #[test]
    fn test_summary_without_online_agents() {
        let s = summarize(&[ticket(t0()).build()], &[agent("ada", 5, AgentStatus::Offline)]);
        assert_eq!(s.agents_online, 0);
        assert_eq!(s.avg_load_per_agent, 0.0);
    }

    #[test]
    fn test_summary_of_nothing_is_zero() {
        let s = summarize(&[], &[]);
        assert_eq!(
            s,
            DashboardSummary {
                agents_online: 0,
                unassigned_tickets: 0,
                backlog: 0,
                new_tickets: 0,
                resolved_tickets: 0,
                avg_load_per_agent: 0.0,
            }
        );
    }

    #[test]
    fn test_avg_load_rounds_to_one_decimal() {
        let agents: Vec<Agent> = (0..3).map(|i| agent(&format!("a{i}"), 5, AgentStatus::Online)).collect();
        let tickets = vec![
            ticket(t0()).status(TicketStatus::Assigned).assignee(agents[0].id).build(),
            ticket(t0()).status(TicketStatus::Assigned).assignee(agents[1].id).build(),
        ];
        assert_eq!(summarize(&tickets, &agents).avg_load_per_agent, 0.7);
    }

    #[test]
    fn test_capacity_thresholds() {
        let under = agent("under", 10, AgentStatus::Online);
        let exactly_80 = agent("exactly_80", 5, AgentStatus::Online);
        let full = agent("full", 2, AgentStatus::Online);
        let mut tickets = Vec::new();
        for _ in 0..7 {
            tickets.push(ticket(t0()).status(TicketStatus::InProgress).assignee(under.id).build());
        }
        for _ in 0..4 {
            tickets.push(ticket(t0()).status(TicketStatus::Assigned).assignee(exactly_80.id).build());
        }
        for _ in 0..2 {
            tickets.push(ticket(t0()).status(TicketStatus::Assigned).assignee(full.id).build());
        }
        // resolved work does not count toward load
        tickets.push(ticket(t0()).status(TicketStatus::Resolved).assignee(under.id).build());

        let cap = team_capacity(&tickets, &[under.clone(), exactly_80.clone(), full.clone()]);
        let available: Vec<&str> = cap.available.iter().map(|l| l.name.as_str()).collect();
        let at_risk: Vec<&str> = cap.at_risk.iter().map(|l| l.name.as_str()).collect();
        assert_eq!(available, vec!["under"]);
        assert_eq!(at_risk, vec!["exactly_80"]);
        assert_eq!(cap.available[0].load_percent, 70.0);
        assert_eq!(cap.at_risk[0].load_percent, 80.0);
        assert_eq!(cap.at_risk[0].active_tickets, 4);
    }

    #[test]
    fn test_idle_agents_are_available() {
        let cap = team_capacity(&[], &[agent("idle", 3, AgentStatus::Offline)]);
        assert_eq!(cap.available.len(), 1);
        assert_eq!(cap.available[0].load_percent, 0.0);
        assert!(cap.at_risk.is_empty());
    }

    #[test]
    fn test_unassigned_breakdown_excludes_closed_and_assigned() {
        let ada = agent("ada", 5, AgentStatus::Online);
        let tickets = vec![
            ticket(t0()).priority(Priority::Urgent).build(),
            ticket(t0()).priority(Priority::Urgent).status(TicketStatus::Resolved).build(),
            ticket(t0()).priority(Priority::Urgent).status(TicketStatus::Closed).build(),
            ticket(t0()).priority(Priority::High).assignee(ada.id).build(),
            ticket(t0()).priority(Priority::Low).build(),
        ];
        let b = unassigned_by_priority(&tickets);
        assert_eq!(b, PriorityBreakdown { low: 1, medium: 0, high: 0, urgent: 2 });
    }

    #[test]
    fn test_top_unassigned_is_stable_by_priority() {
        let priorities = [Priority::Low, Priority::Urgent, Priority::Medium, Priority::Urgent, Priority::High];
        let tickets: Vec<Ticket> = priorities
            .iter()
            .enumerate()
            .map(|(i, p)| ticket(t0()).priority(*p).subject(&format!("t{i}")).build())
            .collect();
        let top = top_unassigned(&tickets, TOP_UNASSIGNED_LIMIT);
        let order: Vec<(Priority, &str)> = top.iter().map(|e| (e.priority, e.subject.as_str())).collect();
        assert_eq!(
            order,
            vec![
                (Priority::Urgent, "t1"),
                (Priority::Urgent, "t3"),
                (Priority::High, "t4"),
                (Priority::Medium, "t2"),
                (Priority::Low, "t0"),
            ]
        );
    }

    #[test]
    fn test_top_unassigned_truncates() {
        let tickets: Vec<Ticket> = (0..15).map(|_| ticket(t0()).build()).collect();
        assert_eq!(top_unassigned(&tickets, TOP_UNASSIGNED_LIMIT).len(), 10);
        let overview = unassigned_overview(&tickets, 3);
        assert_eq!(overview.top.len(), 3);
        assert_eq!(overview.by_priority.medium, 15);
    }
}
