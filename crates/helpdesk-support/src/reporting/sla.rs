//! SLA breach evaluation
//!
//! A ticket is evaluated as of the end of a UTC calendar day. All
//! comparisons except "resolved after due" are by calendar day.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::calendar::{day_of, DayWindow};
use crate::domain::aggregates::Ticket;
use crate::domain::value_objects::SlaPolicy;

/// Breach count for one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct BreachPoint {
    pub date: NaiveDate,
    pub breaches: u32,
}

/// Deadline and current breach state of a single ticket
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct SlaStatus {
    /// Absent when the deadline falls outside the representable date range
    pub due_at: Option<DateTime<Utc>>,
    pub deadline_hours: u32,
    pub breached: bool,
}

/// Whether `ticket` counts as breached at the end of `day`.
///
/// Not breached before the ticket exists or before the day its deadline
/// falls on. A resolved or closed ticket is breached only if it was
/// resolved after the deadline and that resolution happened by `day`;
/// one without a resolution time never is. Anything still in flight past
/// its due day is breached. A deadline too far out to represent is never
/// reached.
pub fn is_breached(ticket: &Ticket, day: NaiveDate, policy: &SlaPolicy) -> bool {
    if day_of(ticket.created_at()) > day {
        return false;
    }
    let Some(due_at) = policy.due_at(ticket.created_at(), ticket.priority()) else {
        return false;
    };
    if day_of(due_at) > day {
        return false;
    }
    if ticket.status().is_active() {
        return true;
    }
    match ticket.resolved_at() {
        Some(resolved_at) => resolved_at > due_at && day_of(resolved_at) <= day,
        None => false,
    }
}

/// Breach count for each day of the trailing window. Each day is evaluated
/// on its own, so a ticket counts on every day it stays in breach.
pub fn breach_trend(tickets: &[Ticket], now: DateTime<Utc>, days: u32, policy: &SlaPolicy) -> Vec<BreachPoint> {
    DayWindow::ending_at(now, days)
        .days()
        .iter()
        .map(|date| BreachPoint {
            date: *date,
            breaches: u32::try_from(tickets.iter().filter(|t| is_breached(t, *date, policy)).count())
                .unwrap_or(u32::MAX),
        })
        .collect()
}

pub fn sla_status(ticket: &Ticket, now: DateTime<Utc>, policy: &SlaPolicy) -> SlaStatus {
    SlaStatus {
        due_at: policy.due_at(ticket.created_at(), ticket.priority()),
        deadline_hours: policy.deadline_hours(ticket.priority()),
        breached: is_breached(ticket, day_of(now), policy),
    }
}
