//! Error types for the booking rules service
//!
//! Collaborator failures, missing documents and rejected transitions.

use thiserror::Error;
use virexa_bookings::{InvalidRecord, TransitionError};

use crate::config::ConfigError;

/// Service error types.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Identity provider lookup failed
    #[error("Identity source error: {0}")]
    IdentitySource(String),

    /// Booking store lookup failed
    #[error("Booking store error: {0}")]
    Store(String),

    /// Class session does not exist
    #[error("Class session not found: {0}")]
    SessionNotFound(String),

    /// Booking does not exist or is not visible to the caller
    #[error("Booking not found: {0}")]
    BookingNotFound(String),

    /// Stored document failed validation
    #[error("Invalid record: {0}")]
    InvalidRecord(#[from] InvalidRecord),

    /// Requested action is not allowed
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// Configuration error
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Result type for service operations.
pub type ServiceResult<T> = Result<T, ServiceError>;

impl ServiceError {
    /// Check if this error should be logged at error level.
    pub fn is_server_error(&self) -> bool {
        matches!(
            self,
            ServiceError::IdentitySource(_)
                | ServiceError::Store(_)
                | ServiceError::InvalidRecord(_)
                | ServiceError::Config(_)
        )
    }

    /// Get HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            ServiceError::SessionNotFound(_) | ServiceError::BookingNotFound(_) => 404,
            ServiceError::Transition(_) => 409,
            ServiceError::IdentitySource(_) | ServiceError::Store(_) => 502,
            ServiceError::InvalidRecord(_) | ServiceError::Config(_) => 500,
        }
    }

    /// Get error code for API responses.
    pub fn error_code(&self) -> &'static str {
        match self {
            ServiceError::IdentitySource(_) => "IDENTITY_SOURCE_ERROR",
            ServiceError::Store(_) => "STORE_ERROR",
            ServiceError::SessionNotFound(_) => "SESSION_NOT_FOUND",
            ServiceError::BookingNotFound(_) => "BOOKING_NOT_FOUND",
            ServiceError::InvalidRecord(_) => "INVALID_RECORD",
            ServiceError::Transition(TransitionError::NotAllowed { .. }) => "TRANSITION_NOT_ALLOWED",
            ServiceError::Transition(TransitionError::OutsideAttendanceWindow { .. }) => {
                "OUTSIDE_ATTENDANCE_WINDOW"
            }
            ServiceError::Transition(TransitionError::SessionStarted) => "SESSION_STARTED",
            ServiceError::Config(_) => "CONFIG_ERROR",
        }
    }
}
