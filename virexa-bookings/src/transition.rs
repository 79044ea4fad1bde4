//! Stored-status transitions
//!
//! The content store owns the write; this module only decides whether a
//! requested action is allowed and which status it would produce.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::session::BookingRecord;
use crate::status::{AttendancePolicy, BookingStatus};

/// Action a member or administrator requests on a booking.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingAction {
    /// Member confirms they attended
    ConfirmAttendance,

    /// Member cancels before the session starts
    Cancel,

    /// Administrator cancels from the back office
    AdminCancel,
}

impl BookingAction {
    /// Get string representation of the action.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingAction::ConfirmAttendance => "confirm_attendance",
            BookingAction::Cancel => "cancel",
            BookingAction::AdminCancel => "admin_cancel",
        }
    }
}

impl fmt::Display for BookingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an action was refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    /// The action does not apply to the booking's current status
    #[error("Cannot {action} a {from} booking")]
    NotAllowed {
        /// Current stored status
        from: BookingStatus,
        /// Requested action
        action: BookingAction,
    },

    /// Attendance confirmation requested outside the attendance window
    #[error("Attendance can only be confirmed between {opens} and {closes}")]
    OutsideAttendanceWindow {
        /// Window start
        opens: DateTime<Utc>,
        /// Window end
        closes: DateTime<Utc>,
    },

    /// Member cancellation requested after the session started
    #[error("Session has already started")]
    SessionStarted,
}

/// Result type for transition checks.
pub type TransitionResult<T> = Result<T, TransitionError>;

impl BookingStatus {
    /// Check if a stored status may move to `target`.
    pub fn can_transition_to(&self, target: &BookingStatus) -> bool {
        use BookingStatus::*;
        matches!(
            (self, target),
            (Confirmed, Attended) | (Confirmed, Cancelled) | (Attended, Cancelled)
        )
    }

    /// All statuses reachable from this one.
    pub fn valid_transitions(&self) -> Vec<BookingStatus> {
        [
            BookingStatus::Confirmed,
            BookingStatus::Cancelled,
            BookingStatus::Attended,
        ]
        .into_iter()
        .filter(|target| self.can_transition_to(target))
        .collect()
    }
}

/// Decide whether `action` is allowed on `record` at `now`.
///
/// Returns the status the booking would move to.
///
/// - `ConfirmAttendance`: stored `Confirmed` and inside the attendance window
/// - `Cancel`: stored `Confirmed` and the session has not started
/// - `AdminCancel`: any booking that is not already cancelled
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use virexa_bookings::{
///     authorize, AttendancePolicy, BookingAction, BookingRecord, BookingStatus, ClassSession,
/// };
/// use virexa_tiers::Tier;
///
/// let record = BookingRecord {
///     id: "booking-1".to_string(),
///     status: BookingStatus::Confirmed,
///     session: ClassSession {
///         id: "session-1".to_string(),
///         start_time: Utc.with_ymd_and_hms(2024, 1, 10, 10, 0, 0).unwrap(),
///         duration_minutes: 60,
///         required_tier: Tier::Basic,
///         max_capacity: 20,
///         current_bookings: 8,
///     },
/// };
/// let now = Utc.with_ymd_and_hms(2024, 1, 10, 11, 15, 0).unwrap();
///
/// let next = authorize(&record, BookingAction::ConfirmAttendance, now, &AttendancePolicy::default());
/// assert_eq!(next, Ok(BookingStatus::Attended));
/// assert!(authorize(&record, BookingAction::Cancel, now, &AttendancePolicy::default()).is_err());
/// ```
pub fn authorize(
    record: &BookingRecord,
    action: BookingAction,
    now: DateTime<Utc>,
    policy: &AttendancePolicy,
) -> TransitionResult<BookingStatus> {
    let not_allowed = TransitionError::NotAllowed {
        from: record.status,
        action,
    };

    let target = match action {
        BookingAction::ConfirmAttendance => {
            if record.status != BookingStatus::Confirmed {
                return Err(not_allowed);
            }
            let window = record.attendance_window(policy);
            if !window.contains(now) {
                return Err(TransitionError::OutsideAttendanceWindow {
                    opens: window.opens,
                    closes: window.closes,
                });
            }
            BookingStatus::Attended
        }
        BookingAction::Cancel => {
            if record.status != BookingStatus::Confirmed {
                return Err(not_allowed);
            }
            if record.session.has_started(now) {
                return Err(TransitionError::SessionStarted);
            }
            BookingStatus::Cancelled
        }
        BookingAction::AdminCancel => {
            if record.status == BookingStatus::Cancelled {
                return Err(not_allowed);
            }
            BookingStatus::Cancelled
        }
    };

    debug_assert!(record.status.can_transition_to(&target));
    Ok(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::fixtures::{booking, jan_10};

    #[test]
    fn test_transition_table() {
        use BookingStatus::*;
        assert!(Confirmed.can_transition_to(&Attended));
        assert!(Confirmed.can_transition_to(&Cancelled));
        assert!(Attended.can_transition_to(&Cancelled));
        assert!(!Cancelled.can_transition_to(&Confirmed));
        assert!(!Attended.can_transition_to(&Confirmed));
        assert!(!Confirmed.can_transition_to(&Confirmed));
        assert!(Cancelled.valid_transitions().is_empty());
        assert_eq!(Confirmed.valid_transitions(), vec![Cancelled, Attended]);
    }

    #[test]
    fn test_confirm_attendance_inside_window() {
        let policy = AttendancePolicy::default();
        let record = booking("b1", BookingStatus::Confirmed, jan_10(10, 0));

        assert_eq!(
            authorize(&record, BookingAction::ConfirmAttendance, jan_10(10, 30), &policy),
            Ok(BookingStatus::Attended)
        );
        assert_eq!(
            authorize(&record, BookingAction::ConfirmAttendance, jan_10(13, 0), &policy),
            Err(TransitionError::OutsideAttendanceWindow {
                opens: jan_10(10, 0),
                closes: jan_10(12, 0),
            })
        );
    }

    #[test]
    fn test_confirm_attendance_requires_confirmed() {
        let policy = AttendancePolicy::default();
        for status in [BookingStatus::Cancelled, BookingStatus::Attended] {
            let record = booking("b1", status, jan_10(10, 0));
            assert_eq!(
                authorize(&record, BookingAction::ConfirmAttendance, jan_10(10, 30), &policy),
                Err(TransitionError::NotAllowed {
                    from: status,
                    action: BookingAction::ConfirmAttendance,
                })
            );
        }
    }

    #[test]
    fn test_member_cancel_before_start_only() {
        let policy = AttendancePolicy::default();
        let record = booking("b1", BookingStatus::Confirmed, jan_10(10, 0));

        assert_eq!(
            authorize(&record, BookingAction::Cancel, jan_10(9, 0), &policy),
            Ok(BookingStatus::Cancelled)
        );
        assert_eq!(
            authorize(&record, BookingAction::Cancel, jan_10(10, 0), &policy),
            Err(TransitionError::SessionStarted)
        );
    }

    #[test]
    fn test_admin_cancel() {
        let policy = AttendancePolicy::default();
        let attended = booking("b1", BookingStatus::Attended, jan_10(10, 0));
        assert_eq!(
            authorize(&attended, BookingAction::AdminCancel, jan_10(15, 0), &policy),
            Ok(BookingStatus::Cancelled)
        );

        let cancelled = booking("b2", BookingStatus::Cancelled, jan_10(10, 0));
        assert!(authorize(&cancelled, BookingAction::AdminCancel, jan_10(9, 0), &policy).is_err());
    }

    #[test]
    fn test_error_messages() {
        let err = TransitionError::NotAllowed {
            from: BookingStatus::Cancelled,
            action: BookingAction::Cancel,
        };
        assert_eq!(err.to_string(), "Cannot cancel a cancelled booking");
    }
}
