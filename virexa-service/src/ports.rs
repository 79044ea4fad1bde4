//! Collaborator ports
//!
//! The identity provider owns user metadata and the content store owns
//! bookings and class sessions. Both are read-only from this crate's point
//! of view.

use async_trait::async_trait;
use serde_json::Value;
use virexa_bookings::{RawBooking, RawSession};

use crate::error::ServiceResult;

/// Source of a user's subscription metadata.
#[async_trait]
pub trait IdentitySource: Send + Sync {
    /// Get the public metadata object for `user_id`.
    ///
    /// Returns `None` when the user has no metadata at all.
    async fn plan_metadata(&self, user_id: &str) -> ServiceResult<Option<Value>>;
}

/// Read access to booking and class session documents.
#[async_trait]
pub trait BookingStore: Send + Sync {
    /// Get every booking document owned by `user_id`, in store order.
    async fn bookings_for_user(&self, user_id: &str) -> ServiceResult<Vec<RawBooking>>;

    /// Get a class session document.
    async fn session(&self, session_id: &str) -> ServiceResult<Option<RawSession>>;

    /// Get a booking document regardless of owner.
    async fn booking(&self, booking_id: &str) -> ServiceResult<Option<RawBooking>>;
}
