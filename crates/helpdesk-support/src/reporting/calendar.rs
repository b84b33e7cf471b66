//! Calendar-day windows
//!
//! Every report buckets by UTC calendar day. Local clocks never enter the
//! computation, so the same instant always lands in the same bucket.

use chrono::{DateTime, Days, NaiveDate, Utc};

/// UTC calendar day of an instant
pub fn day_of(instant: DateTime<Utc>) -> NaiveDate {
    instant.date_naive()
}

/// `len` contiguous days ending at (and including) `today`, oldest first
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayWindow {
    days: Vec<NaiveDate>,
}

impl DayWindow {
    pub fn trailing(today: NaiveDate, len: u32) -> Self {
        let days = (0..len)
            .rev()
            .filter_map(|back| today.checked_sub_days(Days::new(u64::from(back))))
            .collect();
        Self { days }
    }

    pub fn ending_at(now: DateTime<Utc>, len: u32) -> Self {
        Self::trailing(day_of(now), len)
    }

    pub fn days(&self) -> &[NaiveDate] {
        &self.days
    }

    pub fn len(&self) -> usize {
        self.days.len()
    }

    pub fn is_empty(&self) -> bool {
        self.days.is_empty()
    }

    /// Position of `date` inside the window
    pub fn index_of(&self, date: NaiveDate) -> Option<usize> {
        let start = *self.days.first()?;
        let offset = usize::try_from(date.signed_duration_since(start).num_days()).ok()?;
        (offset < self.days.len()).then_some(offset)
    }

    /// Position of the UTC day of `instant`, if any
    pub fn index_of_instant(&self, instant: DateTime<Utc>) -> Option<usize> {
        self.index_of(day_of(instant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_trailing_window_crosses_month_and_year() {
        let w = DayWindow::trailing(date(2024, 1, 2), 4);
        assert_eq!(w.days(), &[date(2023, 12, 30), date(2023, 12, 31), date(2024, 1, 1), date(2024, 1, 2)]);
    }

    #[test]
    fn test_index_of_bounds() {
        let w = DayWindow::trailing(date(2024, 3, 10), 7);
        assert_eq!(w.index_of(date(2024, 3, 4)), Some(0));
        assert_eq!(w.index_of(date(2024, 3, 10)), Some(6));
        assert_eq!(w.index_of(date(2024, 3, 3)), None);
        assert_eq!(w.index_of(date(2024, 3, 11)), None);
    }

    #[test]
    fn test_day_of_uses_utc() {
        let late = Utc.with_ymd_and_hms(2024, 1, 1, 23, 59, 59).unwrap();
        assert_eq!(day_of(late), date(2024, 1, 1));
        assert_eq!(day_of(late + chrono::Duration::seconds(1)), date(2024, 1, 2));
    }

    #[test]
    fn test_empty_window() {
        let w = DayWindow::trailing(date(2024, 1, 1), 0);
        assert!(w.is_empty());
        assert_eq!(w.index_of(date(2024, 1, 1)), None);
    }
}
