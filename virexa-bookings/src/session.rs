//! Validated class sessions and booking records
//!
//! These are the strict shapes the rules operate on. They are built from
//! content-store snapshots by [`snapshot`](crate::snapshot) and never
//! mutated by this crate.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use virexa_tiers::Tier;

use crate::status::{
    attendance_window, can_confirm_attendance, effective_status, session_end, AttendancePolicy,
    AttendanceWindow, BookingStatus, EffectiveStatus,
};

/// A scheduled class session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ClassSession {
    /// Session ID in the content store
    pub id: String,

    /// Start time
    pub start_time: DateTime<Utc>,

    /// Length of the class in minutes
    pub duration_minutes: u32,

    /// Minimum tier needed to book
    pub required_tier: Tier,

    /// Maximum number of bookings
    pub max_capacity: u32,

    /// Bookings taken so far
    pub current_bookings: u32,
}

impl ClassSession {
    /// When the session ends.
    pub fn end_time(&self) -> DateTime<Utc> {
        session_end(self.start_time, self.duration_minutes)
    }

    /// Places left, floored at zero.
    pub fn spots_remaining(&self) -> u32 {
        self.max_capacity.saturating_sub(self.current_bookings)
    }

    /// Check if no places are left.
    pub fn is_full(&self) -> bool {
        self.spots_remaining() == 0
    }

    /// Check if the session has started at `now`.
    pub fn has_started(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now
    }
}

/// A member's booking of a class session.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct BookingRecord {
    /// Booking ID in the content store
    pub id: String,

    /// Stored status
    pub status: BookingStatus,

    /// The booked session
    pub session: ClassSession,
}

impl BookingRecord {
    /// Effective status at `now`.
    pub fn effective_status(&self, now: DateTime<Utc>) -> EffectiveStatus {
        effective_status(
            self.status,
            self.session.start_time,
            self.session.duration_minutes,
            now,
        )
    }

    /// Attendance window for this booking's session.
    pub fn attendance_window(&self, policy: &AttendancePolicy) -> AttendanceWindow {
        attendance_window(self.session.start_time, self.session.duration_minutes, policy)
    }

    /// Check if the member may confirm attendance at `now`.
    pub fn can_confirm_attendance(&self, now: DateTime<Utc>, policy: &AttendancePolicy) -> bool {
        can_confirm_attendance(
            self.status,
            self.session.start_time,
            self.session.duration_minutes,
            now,
            policy,
        )
    }

    /// Check if this booking still holds a place (not cancelled).
    pub fn is_active(&self) -> bool {
        self.status != BookingStatus::Cancelled
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;
    use chrono::TimeZone;

    pub fn session_at(start_time: DateTime<Utc>) -> ClassSession {
        ClassSession {
            id: format!("session-{}", start_time.timestamp()),
            start_time,
            duration_minutes: 60,
            required_tier: Tier::Basic,
            max_capacity: 20,
            current_bookings: 5,
        }
    }

    pub fn booking(id: &str, status: BookingStatus, start_time: DateTime<Utc>) -> BookingRecord {
        BookingRecord {
            id: id.to_string(),
            status,
            session: session_at(start_time),
        }
    }

    pub fn jan_10(hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 1, 10, hour, minute, 0).unwrap()
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    #[test]
    fn test_capacity() {
        let mut session = session_at(jan_10(10, 0));
        assert_eq!(session.spots_remaining(), 15);
        assert!(!session.is_full());

        session.current_bookings = 20;
        assert!(session.is_full());

        session.current_bookings = 25;
        assert_eq!(session.spots_remaining(), 0);
        assert!(session.is_full());

        session.max_capacity = 0;
        session.current_bookings = 0;
        assert!(session.is_full());
    }

    #[test]
    fn test_session_times() {
        let session = session_at(jan_10(10, 0));
        assert_eq!(session.end_time(), jan_10(11, 0));
        assert!(!session.has_started(jan_10(9, 59)));
        assert!(session.has_started(jan_10(10, 0)));
    }

    #[test]
    fn test_record_helpers() {
        let policy = AttendancePolicy::default();
        let record = booking("b1", BookingStatus::Confirmed, jan_10(10, 0));

        assert_eq!(record.effective_status(jan_10(10, 30)), EffectiveStatus::Confirmed);
        assert_eq!(record.effective_status(jan_10(11, 30)), EffectiveStatus::Elapsed);
        assert!(record.can_confirm_attendance(jan_10(11, 30), &policy));
        assert_eq!(record.attendance_window(&policy).closes, jan_10(12, 0));
        assert!(record.is_active());
        assert!(!booking("b2", BookingStatus::Cancelled, jan_10(10, 0)).is_active());
    }
}
