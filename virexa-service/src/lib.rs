//! # Virexa Service
//!
//! This crate connects the Virexa booking rules to their collaborators: the
//! identity provider that holds plan metadata and the content store that
//! holds bookings and class sessions.
//!
//! ## Overview
//!
//! The virexa-service crate handles:
//! - **Ports**: `IdentitySource` and `BookingStore` traits
//! - **Memory Adapters**: In-process collaborators for tests and demos
//! - **Configuration**: Environment-based rule settings
//! - **Service**: Subscription lookup, bookings overview, booking checks
//!   and action authorization
//!
//! ## Architecture
//!
//! ```text
//! IdentitySource ──→ plan metadata ──→ Subscription
//!                                          │
//! BookingStore ───→ RawBooking ──→ collect_valid ──→ BookingRecord
//!                                          │
//!                                          ▼
//!                                  BookingsService
//!                                    ├─ overview(user, now)
//!                                    ├─ check_booking(user, session, now)
//!                                    └─ authorize_action(user, booking, action, now)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use serde_json::json;
//! use virexa_service::{BookingsService, MemoryBookingStore, MemoryIdentitySource};
//! use virexa_tiers::{Subscription, Tier};
//!
//! # tokio::runtime::Runtime::new().unwrap().block_on(async {
//! let identity = MemoryIdentitySource::new();
//! identity.set_metadata("user-1", json!({ "plan": "performance" })).await;
//!
//! let service = BookingsService::with_defaults(identity, MemoryBookingStore::new());
//! assert_eq!(
//!     service.subscription(Some("user-1")).await,
//!     Subscription::Active(Tier::Performance)
//! );
//!
//! let now = Utc.with_ymd_and_hms(2024, 1, 10, 8, 0, 0).unwrap();
//! let overview = service.overview("user-1", now).await.unwrap();
//! assert!(overview.lists.upcoming.is_empty());
//! # });
//! ```
//!
//! ## Feature Flags
//!
//! - `memory`: In-memory collaborators (enabled by default)

pub mod config;
pub mod error;
#[cfg(feature = "memory")]
pub mod memory;
pub mod ports;
pub mod service;

// Re-export main types
pub use config::{ConfigError, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
#[cfg(feature = "memory")]
pub use memory::{MemoryBookingStore, MemoryIdentitySource};
pub use ports::{BookingStore, IdentitySource};
pub use service::{BookingsOverview, BookingsService};
