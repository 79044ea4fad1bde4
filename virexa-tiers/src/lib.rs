//! # Virexa Tiers
//!
//! This crate provides subscription tiers for the Virexa studio platform,
//! shared by the booking rules and the member-facing screens.
//!
//! ## Overview
//!
//! The virexa-tiers crate handles:
//! - **Tiers**: Basic, Performance and Champion, ranked by hierarchy
//! - **Tier Info**: Booking limits, pricing, display text and colors
//! - **Resolution**: Mapping raw plan identifiers onto tiers
//! - **Metadata**: Finding the plan identifier in identity-provider metadata
//! - **Subscription**: Explicit "no subscription" versus "active tier"
//!
//! ## Architecture
//!
//! ```text
//! identity metadata ─→ plan_key_from_metadata ─→ plan key
//!                                                   │
//!                                      TierResolver / resolve_tier
//!                                                   │
//!                                                   ▼
//!                                         Subscription::Active(Tier)
//!                                                   │
//!                                                   └─ Tier::info() (limits, pricing)
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use serde_json::json;
//! use virexa_tiers::{plan_key_from_metadata, resolve_tier, BookingLimit, Tier};
//!
//! let metadata = json!({ "plan": "performance" });
//! let plan_key = plan_key_from_metadata(&metadata);
//! let tier = resolve_tier(plan_key.as_deref());
//!
//! assert_eq!(tier, Tier::Performance);
//! assert_eq!(tier.info().booking_limit, BookingLimit::Limited(12));
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Serialization support (enabled by default)

pub mod resolver;
pub mod subscription;
pub mod tiers;

// Re-export main types for convenience
pub use resolver::{
    plan_key_from_metadata, resolve_tier, PlanMatching, TierResolver, PLAN_METADATA_KEYS,
};
pub use subscription::Subscription;
pub use tiers::{
    compare_tiers, tier_info, BookingLimit, ParseTierError, Tier, TierInfo, TierPricing,
    FREE_TRIAL_DAYS,
};
