//! Content-store snapshots and their validation
//!
//! Booking documents arrive from the content store with every field
//! optional. This module parses them into [`BookingRecord`]s and filters out
//! the ones that cannot be trusted (no status, no start time, and so on).
//! Dropped records are logged here, at the edge, and never reach the rules.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use virexa_tiers::Tier;

use crate::session::{BookingRecord, ClassSession};
use crate::status::BookingStatus;

/// Session length assumed when the activity has no duration.
pub const DEFAULT_SESSION_MINUTES: u32 = 60;

/// Reasons a snapshot is rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvalidRecord {
    /// Booking has no ID
    #[error("Booking has no id")]
    MissingId,

    /// Booking has no status
    #[error("Booking has no status")]
    MissingStatus,

    /// Status is not one of confirmed, cancelled or attended
    #[error("Unknown booking status: {0:?}")]
    UnknownStatus(String),

    /// Booking references no session
    #[error("Booking has no class session")]
    MissingSession,

    /// Session has no ID
    #[error("Class session has no id")]
    MissingSessionId,

    /// Session has no start time
    #[error("Class session has no start time")]
    MissingStartTime,

    /// Start time is not RFC 3339
    #[error("Invalid session start time: {0:?}")]
    InvalidStartTime(String),

    /// Activity duration below zero
    #[error("Negative session duration: {0}")]
    NegativeDuration(i64),

    /// Activity tier level is not a known tier
    #[error("Unknown tier level: {0:?}")]
    UnknownTier(String),

    /// Capacity or booking count below zero or out of range
    #[error("Invalid {field}: {value}")]
    InvalidCount {
        /// Field name
        field: &'static str,
        /// Offending value
        value: i64,
    },
}

/// Result type for snapshot parsing.
pub type SnapshotResult<T> = Result<T, InvalidRecord>;

/// Defaults applied to fields the content store may leave out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SnapshotDefaults {
    /// Session length when the activity has no duration
    pub duration_minutes: u32,
}

impl Default for SnapshotDefaults {
    fn default() -> Self {
        Self {
            duration_minutes: DEFAULT_SESSION_MINUTES,
        }
    }
}

/// Booking document as stored in the content store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawBooking {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: Option<String>,

    /// Status string
    pub status: Option<String>,

    /// Referenced session
    pub class_session: Option<RawSession>,
}

/// Class session document as stored in the content store.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawSession {
    /// Document ID
    #[serde(rename = "_id")]
    pub id: Option<String>,

    /// ISO-8601 start time
    pub start_time: Option<String>,

    /// Maximum bookings
    pub max_capacity: Option<i64>,

    /// Bookings taken so far
    pub current_bookings: Option<i64>,

    /// The activity being run
    pub activity: Option<RawActivity>,
}

/// Activity document embedded in a session.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RawActivity {
    /// Activity name
    pub name: Option<String>,

    /// Length in minutes
    pub duration: Option<i64>,

    /// Required tier name
    pub tier_level: Option<String>,
}

impl RawSession {
    /// Validate into a [`ClassSession`].
    ///
    /// Missing duration falls back to `defaults`, missing tier level to
    /// basic, missing capacity and booking count to zero. A tier level that
    /// is present but unknown rejects the session.
    pub fn into_session(self, defaults: &SnapshotDefaults) -> SnapshotResult<ClassSession> {
        let id = self.id.ok_or(InvalidRecord::MissingSessionId)?;
        let start_time = parse_start_time(self.start_time.as_deref())?;

        let activity = self.activity.unwrap_or_default();
        let duration_minutes = match activity.duration {
            Some(minutes) if minutes < 0 => return Err(InvalidRecord::NegativeDuration(minutes)),
            Some(minutes) => u32::try_from(minutes).map_err(|_| InvalidRecord::InvalidCount {
                field: "duration",
                value: minutes,
            })?,
            None => defaults.duration_minutes,
        };
        let required_tier = match activity.tier_level.as_deref() {
            Some(level) => Tier::parse(level).map_err(|e| InvalidRecord::UnknownTier(e.0))?,
            None => Tier::Basic,
        };

        Ok(ClassSession {
            id,
            start_time,
            duration_minutes,
            required_tier,
            max_capacity: parse_count("maxCapacity", self.max_capacity)?,
            current_bookings: parse_count("currentBookings", self.current_bookings)?,
        })
    }
}

impl RawBooking {
    /// Validate into a [`BookingRecord`].
    pub fn into_record(self, defaults: &SnapshotDefaults) -> SnapshotResult<BookingRecord> {
        let id = self.id.ok_or(InvalidRecord::MissingId)?;
        let raw_status = self.status.ok_or(InvalidRecord::MissingStatus)?;
        let status =
            BookingStatus::parse(&raw_status).ok_or(InvalidRecord::UnknownStatus(raw_status))?;
        let session = self
            .class_session
            .ok_or(InvalidRecord::MissingSession)?
            .into_session(defaults)?;

        Ok(BookingRecord {
            id,
            status,
            session,
        })
    }
}

fn parse_start_time(raw: Option<&str>) -> SnapshotResult<DateTime<Utc>> {
    let raw = raw.ok_or(InvalidRecord::MissingStartTime)?;
    DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| InvalidRecord::InvalidStartTime(raw.to_string()))
}

fn parse_count(field: &'static str, raw: Option<i64>) -> SnapshotResult<u32> {
    match raw {
        None => Ok(0),
        Some(value) => u32::try_from(value).map_err(|_| InvalidRecord::InvalidCount { field, value }),
    }
}

/// Parse booking snapshots, dropping invalid ones and duplicate IDs.
///
/// Each dropped snapshot is logged at `warn` level. When the same booking ID
/// appears more than once, the last snapshot wins and keeps the position of
/// the first.
///
/// # Examples
///
/// ```
/// use virexa_bookings::{collect_valid, RawBooking, RawSession, SnapshotDefaults};
///
/// let good = RawBooking {
///     id: Some("booking-1".to_string()),
///     status: Some("confirmed".to_string()),
///     class_session: Some(RawSession {
///         id: Some("session-1".to_string()),
///         start_time: Some("2024-01-10T10:00:00Z".to_string()),
///         ..Default::default()
///     }),
/// };
/// let no_status = RawBooking { status: None, ..good.clone() };
///
/// let records = collect_valid(vec![good, no_status], &SnapshotDefaults::default());
/// assert_eq!(records.len(), 1);
/// assert_eq!(records[0].session.duration_minutes, 60);
/// ```
pub fn collect_valid<I>(raws: I, defaults: &SnapshotDefaults) -> Vec<BookingRecord>
where
    I: IntoIterator<Item = RawBooking>,
{
    let mut records: Vec<BookingRecord> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();

    for raw in raws {
        let raw_id = raw.id.clone();
        let record = match raw.into_record(defaults) {
            Ok(record) => record,
            Err(e) => {
                tracing::warn!(booking_id = ?raw_id, error = %e, "Dropping invalid booking snapshot");
                continue;
            }
        };

        match positions.get(&record.id) {
            Some(&index) => {
                tracing::debug!(booking_id = %record.id, "Replacing duplicate booking snapshot");
                records[index] = record;
            }
            None => {
                positions.insert(record.id.clone(), records.len());
                records.push(record);
            }
        }
    }

    records
}
