//! Booking status and the time-derived effective status
//!
//! A booking's stored status changes only through explicit actions (see
//! [`transition`](crate::transition)). What the member sees is the
//! *effective* status, derived from the stored status and the clock every
//! time it is read and never written back.
//!
//! ```text
//!                 now < end               now >= end
//!   Confirmed ───────────────→ Confirmed ───────────→ Elapsed
//!   Attended  ─────────────────────────────────────→ Attended   (terminal)
//!   Cancelled ─────────────────────────────────────→ Cancelled  (terminal)
//!
//!   attendance window: [start, end + grace]
//! ```

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Default grace period after a session ends during which attendance can
/// still be confirmed.
pub const DEFAULT_ATTENDANCE_GRACE_MINUTES: u32 = 60;

/// Stored status of a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Booked and not yet confirmed as attended.
    Confirmed,

    /// Cancelled by the member or an administrator.
    Cancelled,

    /// Attendance confirmed.
    Attended,
}

impl BookingStatus {
    /// Parse a stored status string. Unknown strings yield `None`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "confirmed" => Some(BookingStatus::Confirmed),
            "cancelled" => Some(BookingStatus::Cancelled),
            "attended" => Some(BookingStatus::Attended),
            _ => None,
        }
    }

    /// Get string representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
            BookingStatus::Attended => "attended",
        }
    }

    /// Check if no time passing can change this status.
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Cancelled | BookingStatus::Attended)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of a booking as shown to the member at a given moment.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum EffectiveStatus {
    /// Confirmed and the session has not ended.
    Confirmed,

    /// Stored as confirmed, but the session has ended.
    Elapsed,

    /// Attendance confirmed.
    Attended,

    /// Cancelled.
    Cancelled,
}

impl EffectiveStatus {
    /// Label for status badges.
    pub fn label(&self) -> &'static str {
        match self {
            EffectiveStatus::Confirmed => "Confirmed",
            EffectiveStatus::Elapsed => "Past",
            EffectiveStatus::Attended => "Attended",
            EffectiveStatus::Cancelled => "Cancelled",
        }
    }

    /// Check if the booking belongs with finished sessions.
    pub fn is_finished(&self) -> bool {
        !matches!(self, EffectiveStatus::Confirmed)
    }
}

/// Compute the effective status of a booking at `now`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use virexa_bookings::{effective_status, BookingStatus, EffectiveStatus};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
/// let during = Utc.with_ymd_and_hms(2024, 1, 10, 10, 30, 0).unwrap();
/// let after = Utc.with_ymd_and_hms(2024, 1, 10, 11, 0, 0).unwrap();
///
/// assert_eq!(effective_status(BookingStatus::Confirmed, start, 60, during), EffectiveStatus::Confirmed);
/// assert_eq!(effective_status(BookingStatus::Confirmed, start, 60, after), EffectiveStatus::Elapsed);
/// assert_eq!(effective_status(BookingStatus::Cancelled, start, 60, during), EffectiveStatus::Cancelled);
/// ```
pub fn effective_status(
    status: BookingStatus,
    session_start: DateTime<Utc>,
    duration_minutes: u32,
    now: DateTime<Utc>,
) -> EffectiveStatus {
    match status {
        BookingStatus::Cancelled => EffectiveStatus::Cancelled,
        BookingStatus::Attended => EffectiveStatus::Attended,
        BookingStatus::Confirmed if now < session_end(session_start, duration_minutes) => {
            EffectiveStatus::Confirmed
        }
        BookingStatus::Confirmed => EffectiveStatus::Elapsed,
    }
}

/// End of a session starting at `start` and lasting `duration_minutes`.
pub fn session_end(start: DateTime<Utc>, duration_minutes: u32) -> DateTime<Utc> {
    start + Duration::minutes(i64::from(duration_minutes))
}

/// When attendance may be confirmed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendancePolicy {
    /// Time after the session ends during which confirmation stays open.
    pub grace: Duration,
}

impl AttendancePolicy {
    /// Policy with a grace period in minutes.
    pub fn with_grace_minutes(minutes: u32) -> Self {
        Self {
            grace: Duration::minutes(i64::from(minutes)),
        }
    }
}

impl Default for AttendancePolicy {
    fn default() -> Self {
        Self::with_grace_minutes(DEFAULT_ATTENDANCE_GRACE_MINUTES)
    }
}

/// Inclusive window in which attendance can be confirmed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct AttendanceWindow {
    /// Session start
    pub opens: DateTime<Utc>,

    /// Session end plus the grace period
    pub closes: DateTime<Utc>,
}

impl AttendanceWindow {
    /// Check if `now` falls inside the window, bounds included.
    pub fn contains(&self, now: DateTime<Utc>) -> bool {
        self.opens <= now && now <= self.closes
    }
}

/// Attendance window for a session.
pub fn attendance_window(
    session_start: DateTime<Utc>,
    duration_minutes: u32,
    policy: &AttendancePolicy,
) -> AttendanceWindow {
    AttendanceWindow {
        opens: session_start,
        closes: session_end(session_start, duration_minutes) + policy.grace,
    }
}

/// Check if the member may confirm attendance at `now`.
///
/// Only stored-`Confirmed` bookings qualify, and only inside the attendance
/// window.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use virexa_bookings::{can_confirm_attendance, AttendancePolicy, BookingStatus};
///
/// let start = Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap();
/// let policy = AttendancePolicy::default();
///
/// let mid_session = Utc.with_ymd_and_hms(2024, 1, 10, 10, 30, 0).unwrap();
/// assert!(can_confirm_attendance(BookingStatus::Confirmed, start, 60, mid_session, &policy));
///
/// let too_late = Utc.with_ymd_and_hms(2024, 1, 10, 13, 0, 0).unwrap();
/// assert!(!can_confirm_attendance(BookingStatus::Confirmed, start, 60, too_late, &policy));
/// ```
pub fn can_confirm_attendance(
    status: BookingStatus,
    session_start: DateTime<Utc>,
    duration_minutes: u32,
    now: DateTime<Utc>,
    policy: &AttendancePolicy,
) -> bool {
    status == BookingStatus::Confirmed
        && attendance_window(session_start, duration_minutes, policy).contains(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, minute, 0).unwrap()
    }

    fn start() -> DateTime<Utc> {
        at(10, 0)
    }

    #[test]
    fn test_status_parse() {
        assert_eq!(BookingStatus::parse("confirmed"), Some(BookingStatus::Confirmed));
        assert_eq!(BookingStatus::parse("attended"), Some(BookingStatus::Attended));
        assert_eq!(BookingStatus::parse("cancelled"), Some(BookingStatus::Cancelled));
        assert_eq!(BookingStatus::parse("Confirmed"), None);
        assert_eq!(BookingStatus::parse("scheduled"), None);
    }

    #[test]
    fn test_terminal_statuses_ignore_time() {
        let times = [
            Utc.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            at(10, 30),
            Utc.with_ymd_and_hms(2030, 1, 1, 0, 0, 0).unwrap(),
        ];
        for now in times {
            assert_eq!(
                effective_status(BookingStatus::Cancelled, start(), 60, now),
                EffectiveStatus::Cancelled
            );
            assert_eq!(
                effective_status(BookingStatus::Attended, start(), 60, now),
                EffectiveStatus::Attended
            );
        }
    }

    #[test]
    fn test_confirmed_elapses_at_session_end() {
        let status = BookingStatus::Confirmed;
        assert_eq!(effective_status(status, start(), 60, at(9, 0)), EffectiveStatus::Confirmed);
        assert_eq!(effective_status(status, start(), 60, at(10, 59)), EffectiveStatus::Confirmed);
        assert_eq!(effective_status(status, start(), 60, at(11, 0)), EffectiveStatus::Elapsed);
        assert_eq!(effective_status(status, start(), 60, at(13, 0)), EffectiveStatus::Elapsed);
    }

    #[test]
    fn test_attendance_window_bounds() {
        let window = attendance_window(start(), 60, &AttendancePolicy::default());
        assert_eq!(window.opens, at(10, 0));
        assert_eq!(window.closes, at(12, 0));
        assert!(window.contains(at(10, 0)));
        assert!(window.contains(at(12, 0)));
        assert!(!window.contains(at(9, 59)));
        assert!(!window.contains(at(12, 1)));
    }

    #[test]
    fn test_confirm_attendance_scenarios() {
        let policy = AttendancePolicy::default();

        assert!(can_confirm_attendance(BookingStatus::Confirmed, start(), 60, at(10, 30), &policy));
        assert!(can_confirm_attendance(BookingStatus::Confirmed, start(), 60, at(11, 45), &policy));
        assert!(!can_confirm_attendance(BookingStatus::Confirmed, start(), 60, at(13, 0), &policy));
        assert!(!can_confirm_attendance(BookingStatus::Confirmed, start(), 60, at(9, 0), &policy));
    }

    #[test]
    fn test_cancelled_and_attended_never_confirmable() {
        let policy = AttendancePolicy::default();
        for now in [at(9, 0), at(10, 30), at(11, 30), at(13, 0)] {
            assert!(!can_confirm_attendance(BookingStatus::Cancelled, start(), 60, now, &policy));
            assert!(!can_confirm_attendance(BookingStatus::Attended, start(), 60, now, &policy));
        }
    }

    #[test]
    fn test_custom_grace_period() {
        let policy = AttendancePolicy::with_grace_minutes(0);
        assert!(can_confirm_attendance(BookingStatus::Confirmed, start(), 45, at(10, 45), &policy));
        assert!(!can_confirm_attendance(BookingStatus::Confirmed, start(), 45, at(10, 46), &policy));
    }

    #[test]
    fn test_labels() {
        assert_eq!(EffectiveStatus::Elapsed.label(), "Past");
        assert!(EffectiveStatus::Elapsed.is_finished());
        assert!(!EffectiveStatus::Confirmed.is_finished());
        assert!(BookingStatus::Attended.is_terminal());
        assert!(!BookingStatus::Confirmed.is_terminal());
    }
}
