//! Ticket metrics and reporting
//!
//! Pure functions over a ticket/agent snapshot. Nothing here touches a
//! store or the wall clock; callers pass the snapshot and "now".

pub mod calendar;
pub mod dashboard;
pub mod sla;
pub mod trend;

pub use calendar::{day_of, DayWindow};
pub use dashboard::{
    summarize, team_capacity, top_unassigned, unassigned_by_priority, unassigned_overview, AgentLoad,
    DashboardSummary, PriorityBreakdown, TeamCapacity, TriageEntry, UnassignedOverview, TOP_UNASSIGNED_LIMIT,
};
pub use sla::{breach_trend, is_breached, sla_status, BreachPoint, SlaStatus};
pub use trend::{
    assignment_activity, first_response_time, resolution_time, volume_trend, AssignmentPoint, ResolutionTimePoint,
    ResponseTimePoint, VolumePoint,
};

/// Round to one decimal place
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::round1;

    #[test]
    fn test_round1() {
        assert_eq!(round1(2.0 / 3.0), 0.7);
        assert_eq!(round1(1.25), 1.3);
        assert_eq!(round1(0.0), 0.0);
    }
}
