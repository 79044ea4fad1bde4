//! Booking lists, billing periods and monthly progress
//!
//! Grouping of validated bookings for the member's bookings page.

use std::cmp::Ordering;

use chrono::{DateTime, Datelike, Months, NaiveDate, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::session::BookingRecord;
use crate::status::{AttendancePolicy, BookingStatus};

/// Default monthly class goal shown on the progress card.
pub const DEFAULT_MONTHLY_GOAL: u32 = 12;

/// Bookings split into upcoming and past.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingLists {
    /// Confirmed bookings that have not started, earliest first
    pub upcoming: Vec<BookingRecord>,

    /// Everything else, most recent first
    pub past: Vec<BookingRecord>,
}

/// Split bookings into upcoming and past lists.
///
/// A booking is upcoming when it is stored as `Confirmed` and its session
/// starts at or after `now`. Every other booking (cancelled, attended or
/// confirmed but already started) is past. Upcoming is sorted by start time
/// ascending, past by start time descending; ties fall back to booking ID.
///
/// # Examples
///
/// ```
/// use chrono::{Duration, TimeZone, Utc};
/// use virexa_bookings::{partition, BookingRecord, BookingStatus, ClassSession};
/// use virexa_tiers::Tier;
///
/// let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
/// let booking = |id: &str, days: i64| BookingRecord {
///     id: id.to_string(),
///     status: BookingStatus::Confirmed,
///     session: ClassSession {
///         id: format!("session-{}", id),
///         start_time: now + Duration::days(days),
///         duration_minutes: 60,
///         required_tier: Tier::Basic,
///         max_capacity: 20,
///         current_bookings: 0,
///     },
/// };
///
/// let lists = partition(vec![booking("b", 2), booking("a", 1), booking("c", 3)], now);
/// let order: Vec<&str> = lists.upcoming.iter().map(|b| b.id.as_str()).collect();
/// assert_eq!(order, vec!["a", "b", "c"]);
/// assert!(lists.past.is_empty());
/// ```
pub fn partition<I>(records: I, now: DateTime<Utc>) -> BookingLists
where
    I: IntoIterator<Item = BookingRecord>,
{
    let (mut upcoming, mut past): (Vec<_>, Vec<_>) = records
        .into_iter()
        .partition(|record| is_upcoming(record, now));

    upcoming.sort_by(|a, b| by_start(a, b));
    past.sort_by(|a, b| by_start(b, a));

    BookingLists { upcoming, past }
}

fn is_upcoming(record: &BookingRecord, now: DateTime<Utc>) -> bool {
    record.status == BookingStatus::Confirmed && record.session.start_time >= now
}

fn by_start(a: &BookingRecord, b: &BookingRecord) -> Ordering {
    a.session
        .start_time
        .cmp(&b.session.start_time)
        .then_with(|| a.id.cmp(&b.id))
}

/// Bookings the member can confirm attendance for right now.
///
/// Most recent session first.
pub fn awaiting_confirmation<'a, I>(
    records: I,
    now: DateTime<Utc>,
    policy: &AttendancePolicy,
) -> Vec<&'a BookingRecord>
where
    I: IntoIterator<Item = &'a BookingRecord>,
{
    let mut pending: Vec<&BookingRecord> = records
        .into_iter()
        .filter(|record| record.can_confirm_attendance(now, policy))
        .collect();
    pending.sort_by(|a, b| by_start(b, a));
    pending
}

/// A calendar-month billing period in UTC, `[start, end)`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct BillingPeriod {
    /// First instant of the month
    pub start: DateTime<Utc>,

    /// First instant of the following month
    pub end: DateTime<Utc>,
}

impl BillingPeriod {
    /// The calendar month containing `now`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chrono::{TimeZone, Utc};
    /// use virexa_bookings::BillingPeriod;
    ///
    /// let now = Utc.with_ymd_and_hms(2024, 12, 18, 9, 30, 0).unwrap();
    /// let period = BillingPeriod::containing(now);
    /// assert_eq!(period.start, Utc.with_ymd_and_hms(2024, 12, 1, 0, 0, 0).unwrap());
    /// assert_eq!(period.end, Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap());
    /// ```
    pub fn containing(now: DateTime<Utc>) -> Self {
        let today = now.date_naive();
        let first = today.with_day(1).unwrap_or(today);
        let next = first
            .checked_add_months(Months::new(1))
            .unwrap_or(NaiveDate::MAX);

        Self {
            start: midnight(first),
            end: midnight(next),
        }
    }

    /// Check if `t` falls inside the period.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t < self.end
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::MIN))
}

/// Bookings that count against the quota in `period`.
///
/// Cancelled bookings give their place back and are not counted.
pub fn count_period_bookings<'a, I>(records: I, period: &BillingPeriod) -> u32
where
    I: IntoIterator<Item = &'a BookingRecord>,
{
    let count = records
        .into_iter()
        .filter(|record| record.is_active() && period.contains(record.session.start_time))
        .count();
    u32::try_from(count).unwrap_or(u32::MAX)
}

/// Progress figures for the bookings page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgressSummary {
    /// All valid bookings
    pub total: u32,

    /// Upcoming bookings
    pub upcoming: u32,

    /// Past bookings
    pub past: u32,

    /// Classes completed in the current billing period
    pub completed_this_period: u32,

    /// Monthly class goal
    pub goal: u32,

    /// Completion towards the goal, in `[0, 100]`
    pub progress_percent: f64,
}

/// Compute progress towards the monthly class goal.
///
/// A class counts as completed when it is stored as `Attended`, or stored as
/// `Confirmed` with a session that has already started, and its session
/// falls inside the billing period containing `now`.
pub fn progress(records: &[BookingRecord], now: DateTime<Utc>, goal: u32) -> ProgressSummary {
    let period = BillingPeriod::containing(now);
    let upcoming = records.iter().filter(|r| is_upcoming(r, now)).count();

    let completed = records
        .iter()
        .filter(|record| {
            let started = record.session.start_time < now;
            let done = match record.status {
                BookingStatus::Attended => true,
                BookingStatus::Confirmed => started,
                BookingStatus::Cancelled => false,
            };
            done && period.contains(record.session.start_time)
        })
        .count();

    let completed_this_period = u32::try_from(completed).unwrap_or(u32::MAX);
    let progress_percent = if goal == 0 {
        0.0
    } else {
        (f64::from(completed_this_period) / f64::from(goal) * 100.0).min(100.0)
    };

    ProgressSummary {
        total: u32::try_from(records.len()).unwrap_or(u32::MAX),
        upcoming: u32::try_from(upcoming).unwrap_or(u32::MAX),
        past: u32::try_from(records.len() - upcoming).unwrap_or(u32::MAX),
        completed_this_period,
        goal,
        progress_percent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::{booking, jan_10};
    use chrono::Duration;

    fn ids(records: &[BookingRecord]) -> Vec<&str> {
        records.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_upcoming_sorted_ascending() {
        let t = jan_10(10, 0);
        let now = t - Duration::hours(1);
        let records = vec![
            booking("plus-2d", BookingStatus::Confirmed, t + Duration::days(2)),
            booking("plus-1d", BookingStatus::Confirmed, t + Duration::days(1)),
            booking("plus-3d", BookingStatus::Confirmed, t + Duration::days(3)),
        ];

        let lists = partition(records, now);
        assert_eq!(ids(&lists.upcoming), vec!["plus-1d", "plus-2d", "plus-3d"]);
        assert!(lists.past.is_empty());
    }

    #[test]
    fn test_past_sorted_descending() {
        let now = jan_10(12, 0);
        let records = vec![
            booking("attended-old", BookingStatus::Attended, now - Duration::days(5)),
            booking("confirmed-elapsed", BookingStatus::Confirmed, now - Duration::days(1)),
            booking("cancelled-future", BookingStatus::Cancelled, now + Duration::days(2)),
            booking("attended-future", BookingStatus::Attended, now + Duration::days(1)),
        ];

        let lists = partition(records, now);
        assert!(lists.upcoming.is_empty());
        assert_eq!(
            ids(&lists.past),
            vec!["cancelled-future", "attended-future", "confirmed-elapsed", "attended-old"]
        );
    }

    #[test]
    fn test_confirmed_before_session_is_upcoming() {
        let start = jan_10(10, 0);
        let now = Utc.with_ymd_and_hms(2024, 1, 9, 9, 0, 0).unwrap();
        let lists = partition(vec![booking("b1", BookingStatus::Confirmed, start)], now);
        assert_eq!(ids(&lists.upcoming), vec!["b1"]);
        assert!(lists.past.is_empty());
    }

    #[test]
    fn test_session_starting_now_is_upcoming() {
        let now = jan_10(10, 0);
        let lists = partition(vec![booking("b1", BookingStatus::Confirmed, now)], now);
        assert_eq!(lists.upcoming.len(), 1);

        let lists = partition(vec![booking("b1", BookingStatus::Confirmed, now)], now + Duration::seconds(1));
        assert_eq!(lists.past.len(), 1);
    }

    #[test]
    fn test_ties_break_on_id() {
        let start = jan_10(10, 0);
        let now = start - Duration::days(1);
        let lists = partition(
            vec![
                booking("b", BookingStatus::Confirmed, start),
                booking("a", BookingStatus::Confirmed, start),
            ],
            now,
        );
        assert_eq!(ids(&lists.upcoming), vec!["a", "b"]);
    }

    #[test]
    fn test_awaiting_confirmation() {
        let policy = AttendancePolicy::default();
        let now = jan_10(11, 30);
        let records = vec![
            booking("in-window", BookingStatus::Confirmed, jan_10(10, 0)),
            booking("later-in-window", BookingStatus::Confirmed, jan_10(11, 0)),
            booking("already-attended", BookingStatus::Attended, jan_10(10, 0)),
            booking("too-old", BookingStatus::Confirmed, jan_10(8, 0)),
            booking("not-started", BookingStatus::Confirmed, jan_10(12, 0)),
        ];

        let pending = awaiting_confirmation(&records, now, &policy);
        let pending_ids: Vec<&str> = pending.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(pending_ids, vec!["later-in-window", "in-window"]);
    }

    #[test]
    fn test_billing_period_bounds() {
        let period = BillingPeriod::containing(jan_10(10, 0));
        assert_eq!(period.start, Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap());
        assert_eq!(period.end, Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap());
        assert!(period.contains(period.start));
        assert!(!period.contains(period.end));
    }

    #[test]
    fn test_count_period_bookings() {
        let period = BillingPeriod::containing(jan_10(10, 0));
        let records = vec![
            booking("jan-confirmed", BookingStatus::Confirmed, jan_10(10, 0)),
            booking("jan-attended", BookingStatus::Attended, jan_10(8, 0)),
            booking("jan-cancelled", BookingStatus::Cancelled, jan_10(9, 0)),
            booking(
                "feb-confirmed",
                BookingStatus::Confirmed,
                Utc.with_ymd_and_hms(2024, 2, 1, 0, 0, 0).unwrap(),
            ),
        ];
        assert_eq!(count_period_bookings(&records, &period), 2);
    }

    #[test]
    fn test_progress_summary() {
        let now = jan_10(12, 0);
        let records = vec![
            booking("attended", BookingStatus::Attended, jan_10(8, 0)),
            booking("elapsed", BookingStatus::Confirmed, jan_10(10, 0)),
            booking("cancelled", BookingStatus::Cancelled, jan_10(9, 0)),
            booking("upcoming", BookingStatus::Confirmed, jan_10(18, 0)),
            booking(
                "last-month",
                BookingStatus::Attended,
                Utc.with_ymd_and_hms(2023, 12, 20, 10, 0, 0).unwrap(),
            ),
        ];

        let summary = progress(&records, now, 4);
        assert_eq!(summary.total, 5);
        assert_eq!(summary.upcoming, 1);
        assert_eq!(summary.past, 4);
        assert_eq!(summary.completed_this_period, 2);
        assert_eq!(summary.progress_percent, 50.0);
    }

    #[test]
    fn test_progress_caps_and_zero_goal() {
        let now = jan_10(12, 0);
        let records = vec![
            booking("a", BookingStatus::Attended, jan_10(8, 0)),
            booking("b", BookingStatus::Attended, jan_10(9, 0)),
        ];
        assert_eq!(progress(&records, now, 1).progress_percent, 100.0);
        assert_eq!(progress(&records, now, 0).progress_percent, 0.0);
        assert_eq!(progress(&[], now, DEFAULT_MONTHLY_GOAL).total, 0);
    }
}
