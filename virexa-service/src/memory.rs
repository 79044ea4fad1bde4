//! In-memory collaborators
//!
//! Suitable for single-process use and testing.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;
use virexa_bookings::{RawBooking, RawSession};

use crate::error::ServiceResult;
use crate::ports::{BookingStore, IdentitySource};

/// In-memory identity source keyed by user ID.
#[derive(Debug, Clone, Default)]
pub struct MemoryIdentitySource {
    metadata: Arc<RwLock<HashMap<String, Value>>>,
}

impl MemoryIdentitySource {
    /// Create an empty identity source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the public metadata for a user.
    pub async fn set_metadata(&self, user_id: impl Into<String>, metadata: Value) {
        self.metadata.write().await.insert(user_id.into(), metadata);
    }

    /// Remove a user's metadata.
    pub async fn clear_metadata(&self, user_id: &str) {
        self.metadata.write().await.remove(user_id);
    }
}

#[async_trait]
impl IdentitySource for MemoryIdentitySource {
    async fn plan_metadata(&self, user_id: &str) -> ServiceResult<Option<Value>> {
        Ok(self.metadata.read().await.get(user_id).cloned())
    }
}

#[derive(Debug, Clone)]
struct StoredBooking {
    owner: String,
    document: RawBooking,
}

/// In-memory booking store.
///
/// Documents are kept exactly as inserted, including ones that would fail
/// validation, so callers see the same shapes the content store returns.
#[derive(Debug, Clone, Default)]
pub struct MemoryBookingStore {
    bookings: Arc<RwLock<Vec<StoredBooking>>>,
    sessions: Arc<RwLock<HashMap<String, RawSession>>>,
}

impl MemoryBookingStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a booking document owned by `user_id`.
    pub async fn insert_booking(&self, user_id: impl Into<String>, booking: RawBooking) {
        self.bookings.write().await.push(StoredBooking {
            owner: user_id.into(),
            document: booking,
        });
    }

    /// Insert or replace a class session document.
    pub async fn insert_session(&self, session_id: impl Into<String>, session: RawSession) {
        self.sessions.write().await.insert(session_id.into(), session);
    }

    /// Number of stored booking documents.
    pub async fn booking_count(&self) -> usize {
        self.bookings.read().await.len()
    }
}

#[async_trait]
impl BookingStore for MemoryBookingStore {
    async fn bookings_for_user(&self, user_id: &str) -> ServiceResult<Vec<RawBooking>> {
        let bookings = self.bookings.read().await;
        Ok(bookings
            .iter()
            .filter(|stored| stored.owner == user_id)
            .map(|stored| stored.document.clone())
            .collect())
    }

    async fn session(&self, session_id: &str) -> ServiceResult<Option<RawSession>> {
        Ok(self.sessions.read().await.get(session_id).cloned())
    }

    async fn booking(&self, booking_id: &str) -> ServiceResult<Option<RawBooking>> {
        let bookings = self.bookings.read().await;
        // Later documents with the same ID replace earlier ones.
        Ok(bookings
            .iter()
            .rev()
            .find(|stored| stored.document.id.as_deref() == Some(booking_id))
            .map(|stored| stored.document.clone()))
    }
}
