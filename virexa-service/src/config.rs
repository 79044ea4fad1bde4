//! Service configuration for the booking rules.
//!
//! Configuration is loaded from environment variables with defaults that
//! match the studio's published policy.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use virexa_bookings::{
    AttendancePolicy, SnapshotDefaults, DEFAULT_ATTENDANCE_GRACE_MINUTES,
    DEFAULT_MONTHLY_GOAL, DEFAULT_SESSION_MINUTES,
};
use virexa_tiers::{PlanMatching, TierResolver};

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value.
    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue {
        /// Configuration key.
        key: String,
        /// Error message.
        message: String,
    },
}

/// Configuration for the booking rules service.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ServiceConfig {
    /// How plan identifiers are matched against tier names.
    pub plan_matching: PlanMatching,

    /// Minutes after a session ends during which attendance can be confirmed.
    pub attendance_grace_minutes: u32,

    /// Session length assumed when an activity has no duration.
    pub default_session_minutes: u32,

    /// Monthly class goal for the progress card.
    pub monthly_goal: u32,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            plan_matching: PlanMatching::Exact,
            attendance_grace_minutes: DEFAULT_ATTENDANCE_GRACE_MINUTES,
            default_session_minutes: DEFAULT_SESSION_MINUTES,
            monthly_goal: DEFAULT_MONTHLY_GOAL,
        }
    }
}

impl ServiceConfig {
    /// Load configuration from environment variables.
    ///
    /// Environment variables:
    /// - `VIREXA_PLAN_MATCHING`: `exact` or `case_insensitive` (default: exact)
    /// - `VIREXA_ATTENDANCE_GRACE_MINUTES`: Attendance grace period (default: 60)
    /// - `VIREXA_DEFAULT_SESSION_MINUTES`: Fallback session length (default: 60)
    /// - `VIREXA_MONTHLY_GOAL`: Monthly class goal (default: 12)
    ///
    /// Unparseable values fall back to the default; call
    /// [`validate`](Self::validate) to reject out-of-range values.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let default = Self::default();

        Self {
            plan_matching: lookup("VIREXA_PLAN_MATCHING")
                .and_then(|s| PlanMatching::parse(&s))
                .unwrap_or(default.plan_matching),
            attendance_grace_minutes: lookup("VIREXA_ATTENDANCE_GRACE_MINUTES")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default.attendance_grace_minutes),
            default_session_minutes: lookup("VIREXA_DEFAULT_SESSION_MINUTES")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default.default_session_minutes),
            monthly_goal: lookup("VIREXA_MONTHLY_GOAL")
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(default.monthly_goal),
        }
    }

    /// Validate configured values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_session_minutes == 0 {
            return Err(ConfigError::InvalidValue {
                key: "VIREXA_DEFAULT_SESSION_MINUTES".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        if self.monthly_goal == 0 {
            return Err(ConfigError::InvalidValue {
                key: "VIREXA_MONTHLY_GOAL".to_string(),
                message: "must be greater than zero".to_string(),
            });
        }
        Ok(())
    }

    /// Plan resolver for the configured matching mode.
    pub fn resolver(&self) -> TierResolver {
        TierResolver::new(self.plan_matching)
    }

    /// Attendance policy for the configured grace period.
    pub fn attendance_policy(&self) -> AttendancePolicy {
        AttendancePolicy::with_grace_minutes(self.attendance_grace_minutes)
    }

    /// Snapshot defaults for the configured session length.
    pub fn snapshot_defaults(&self) -> SnapshotDefaults {
        SnapshotDefaults {
            duration_minutes: self.default_session_minutes,
        }
    }
}
