//! # Virexa Bookings
//!
//! This crate provides the booking rules for the Virexa studio platform:
//! effective booking status, attendance confirmation, booking lists and
//! booking eligibility.
//!
//! ## Overview
//!
//! The virexa-bookings crate handles:
//! - **Snapshots**: Validating loosely-typed content-store documents
//! - **Status**: Stored status and the time-derived effective status
//! - **Attendance**: The window in which attendance can be confirmed
//! - **Transitions**: Which member and admin actions are allowed
//! - **Schedule**: Upcoming/past lists, billing periods, monthly progress
//! - **Eligibility**: What the booking button offers
//!
//! ## Architecture
//!
//! ```text
//! RawBooking (content store)
//!   └─ collect_valid ─→ BookingRecord
//!                          ├─ effective_status(now)
//!                          ├─ can_confirm_attendance(now)
//!                          ├─ authorize(action, now)
//!                          └─ partition / progress / count_period_bookings
//!
//! ClassSession + Subscription + usage ─→ evaluate_booking ─→ BookingDecision
//! ```
//!
//! Every rule takes `now` as an argument; nothing here reads the clock.
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use virexa_bookings::{collect_valid, partition, RawBooking, RawSession, SnapshotDefaults};
//!
//! let raw = RawBooking {
//!     id: Some("booking-1".to_string()),
//!     status: Some("confirmed".to_string()),
//!     class_session: Some(RawSession {
//!         id: Some("session-1".to_string()),
//!         start_time: Some("2024-01-10T10:00:00Z".to_string()),
//!         ..Default::default()
//!     }),
//! };
//!
//! let records = collect_valid(vec![raw], &SnapshotDefaults::default());
//! let now = Utc.with_ymd_and_hms(2024, 1, 9, 9, 0, 0).unwrap();
//! let lists = partition(records, now);
//! assert_eq!(lists.upcoming.len(), 1);
//! ```

pub mod eligibility;
pub mod schedule;
pub mod session;
pub mod snapshot;
pub mod status;
pub mod transition;

// Re-export main types
pub use eligibility::{evaluate_booking, has_active_booking, BookingDecision, BookingRequest};
pub use schedule::{
    awaiting_confirmation, count_period_bookings, partition, progress, BillingPeriod,
    BookingLists, ProgressSummary, DEFAULT_MONTHLY_GOAL,
};
pub use session::{BookingRecord, ClassSession};
pub use snapshot::{
    collect_valid, InvalidRecord, RawActivity, RawBooking, RawSession, SnapshotDefaults,
    SnapshotResult, DEFAULT_SESSION_MINUTES,
};
pub use status::{
    attendance_window, can_confirm_attendance, effective_status, session_end, AttendancePolicy,
    AttendanceWindow, BookingStatus, EffectiveStatus, DEFAULT_ATTENDANCE_GRACE_MINUTES,
};
pub use transition::{authorize, BookingAction, TransitionError, TransitionResult};
