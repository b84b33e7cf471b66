//! Time-bucketed ticket reports
//!
//! Each report returns exactly one point per day of a trailing window,
//! oldest first, ending today. Days with no matching tickets report zero.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use super::calendar::{day_of, DayWindow};
use super::round1;
use crate::domain::aggregates::Ticket;

const MS_PER_MINUTE: f64 = 60_000.0;
const MS_PER_HOUR: f64 = 3_600_000.0;

/// Tickets created and resolved on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct VolumePoint {
    pub date: NaiveDate,
    pub created: u32,
    pub resolved: u32,
}

/// Assignment activity on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct AssignmentPoint {
    pub date: NaiveDate,
    pub assigned: u32,
    pub reassigned: u32,
}

/// Median first response on one day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResponseTimePoint {
    pub date: NaiveDate,
    pub median_minutes: i64,
    /// Durations that entered the median
    pub count: u32,
}

/// Mean resolution time on one day
#[derive(Debug, Clone, PartialEq, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ResolutionTimePoint {
    pub date: NaiveDate,
    pub avg_hours: f64,
    pub count: u32,
}

/// Created vs resolved counts per day
pub fn volume_trend(tickets: &[Ticket], now: DateTime<Utc>, days: u32) -> Vec<VolumePoint> {
    let window = DayWindow::ending_at(now, days);
    let mut created = vec![0u32; window.len()];
    let mut resolved = vec![0u32; window.len()];

    for t in tickets {
        if let Some(i) = window.index_of_instant(t.created_at()) {
            created[i] += 1;
        }
        if let Some(i) = t.resolved_at().and_then(|r| window.index_of_instant(r)) {
            resolved[i] += 1;
        }
    }

    window
        .days()
        .iter()
        .enumerate()
        .map(|(i, date)| VolumePoint { date: *date, created: created[i], resolved: resolved[i] })
        .collect()
}

/// Assignments per day, plus the "reassigned" proxy.
///
/// There is no assignment history, so `reassigned` counts tickets that
/// currently have an assignee and were last updated on `date`, on a
/// different day from their first assignment. Any later update to an
/// assigned ticket counts, not only a change of assignee.
pub fn assignment_activity(tickets: &[Ticket], now: DateTime<Utc>, days: u32) -> Vec<AssignmentPoint> {
    let window = DayWindow::ending_at(now, days);
    let mut assigned = vec![0u32; window.len()];
    let mut reassigned = vec![0u32; window.len()];

    for t in tickets {
        let Some(assigned_at) = t.assigned_at() else { continue };
        if let Some(i) = window.index_of_instant(assigned_at) {
            assigned[i] += 1;
        }
        if t.assigned_to().is_some() && day_of(assigned_at) != day_of(t.updated_at()) {
            if let Some(i) = window.index_of_instant(t.updated_at()) {
                reassigned[i] += 1;
            }
        }
    }

    window
        .days()
        .iter()
        .enumerate()
        .map(|(i, date)| AssignmentPoint { date: *date, assigned: assigned[i], reassigned: reassigned[i] })
        .collect()
}

/// Median minutes from creation to first response, per day of response.
///
/// A ticket is bucketed by its assignment time, or its resolution time when
/// it was never assigned; tickets with neither are not counted. Negative
/// durations come from hand-edited timestamps and are dropped.
pub fn first_response_time(tickets: &[Ticket], now: DateTime<Utc>, days: u32) -> Vec<ResponseTimePoint> {
    let window = DayWindow::ending_at(now, days);
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); window.len()];

    for t in tickets {
        // Tickets with neither timestamp have not been responded to and fall in no bucket.
        let Some(responded_at) = t.assigned_at().or(t.resolved_at()) else { continue };
        let Some(i) = window.index_of_instant(responded_at) else { continue };
        let minutes = elapsed_ms(t.created_at(), responded_at) / MS_PER_MINUTE;
        if minutes >= 0.0 {
            buckets[i].push(minutes);
        }
    }

    window
        .days()
        .iter()
        .zip(buckets.iter_mut())
        .map(|(date, minutes)| ResponseTimePoint {
            date: *date,
            median_minutes: median_rounded(minutes),
            count: len_u32(minutes),
        })
        .collect()
}

/// Mean hours from creation to resolution, per day of resolution
pub fn resolution_time(tickets: &[Ticket], now: DateTime<Utc>, days: u32) -> Vec<ResolutionTimePoint> {
    let window = DayWindow::ending_at(now, days);
    let mut buckets: Vec<Vec<f64>> = vec![Vec::new(); window.len()];

    for t in tickets {
        let Some(resolved_at) = t.resolved_at() else { continue };
        let Some(i) = window.index_of_instant(resolved_at) else { continue };
        let hours = elapsed_ms(t.created_at(), resolved_at) / MS_PER_HOUR;
        if hours >= 0.0 {
            buckets[i].push(hours);
        }
    }

    window
        .days()
        .iter()
        .zip(buckets.iter())
        .map(|(date, hours)| ResolutionTimePoint {
            date: *date,
            avg_hours: round1(mean(hours)),
            count: len_u32(hours),
        })
        .collect()
}

fn elapsed_ms(from: DateTime<Utc>, to: DateTime<Utc>) -> f64 {
    to.signed_duration_since(from).num_milliseconds() as f64
}

fn len_u32(values: &[f64]) -> u32 {
    u32::try_from(values.len()).unwrap_or(u32::MAX)
}

/// Median rounded to the nearest integer; an even-sized set averages its
/// two middle values before rounding. Empty input yields 0.
pub fn median_rounded(values: &mut [f64]) -> i64 {
    if values.is_empty() {
        return 0;
    }
    values.sort_by(f64::total_cmp);
    let mid = values.len() / 2;
    let median = if values.len() % 2 == 0 {
        (values[mid - 1] + values[mid]) / 2.0
    } else {
        values[mid]
    };
    median.round() as i64
}

/// Arithmetic mean, 0.0 for empty input
pub fn mean(values: &[f64]) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    values.iter().sum::<f64>() / values.len() as f64
}


#[cfg(test)]
mod proptests {
    use super::*;
    use crate::test_support::ticket;
    use chrono::{Duration, TimeZone};
    use proptest::prelude::*;

    fn contiguous(dates: &[NaiveDate]) -> bool {
        dates.windows(2).all(|w| w[1] == w[0] + Duration::days(1))
    }

    proptest! {
        #[test]
        fn window_shape_holds_for_any_length(
            days in 0u32..120,
            now_secs in 1_600_000_000i64..1_900_000_000,
            offsets in proptest::collection::vec(-200_000i64..200_000, 0..40),
        ) {
            let now = Utc.timestamp_opt(now_secs, 0).unwrap();
            let tickets: Vec<Ticket> = offsets
                .iter()
                .map(|m| ticket(now + Duration::minutes(*m)).resolved(now + Duration::minutes(m / 2)).build())
                .collect();

            let volume = volume_trend(&tickets, now, days);
            let dates: Vec<NaiveDate> = volume.iter().map(|p| p.date).collect();
            prop_assert_eq!(dates.len(), days as usize);
            prop_assert!(contiguous(&dates));
            if let Some(last) = dates.last() {
                prop_assert_eq!(*last, now.date_naive());
            }

            let resolution: Vec<NaiveDate> = resolution_time(&tickets, now, days).iter().map(|p| p.date).collect();
            prop_assert_eq!(&resolution, &dates);
            let response: Vec<NaiveDate> = first_response_time(&tickets, now, days).iter().map(|p| p.date).collect();
            prop_assert_eq!(&response, &dates);
        }
    }
}
