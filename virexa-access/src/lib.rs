//! # Virexa Access
//!
//! This crate provides the class access and booking quota rules for the
//! Virexa studio platform.
//!
//! ## Overview
//!
//! The virexa-access crate handles:
//! - **Class Access**: Tier hierarchy checks against a class's required tier
//! - **Access Decisions**: Subscribe versus upgrade prompts
//! - **Quota**: Remaining bookings in a billing period
//! - **Usage Stats**: Quota consumption for dashboards
//!
//! ## Architecture
//!
//! ```text
//! Access = hierarchy(member tier) >= hierarchy(required tier)
//!
//! Examples:
//!   champion → performance class   granted
//!   basic    → champion class      upgrade required (champion)
//!   (none)   → basic class         subscription required
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use virexa_access::{decide_access, usage_stats, AccessDecision};
//! use virexa_tiers::{BookingLimit, Subscription, Tier};
//!
//! let member = Subscription::Active(Tier::Performance);
//! assert_eq!(decide_access(&member, Tier::Basic), AccessDecision::Granted);
//!
//! let stats = usage_stats(Tier::Performance, 12);
//! assert_eq!(stats.remaining, BookingLimit::Limited(0));
//! assert!(stats.is_exhausted());
//! ```
//!
//! All functions are pure and can be called from any number of threads.

pub mod access;
pub mod quota;

// Re-export main types
pub use access::{accessible_tiers, can_access_class, decide_access, AccessDecision};
pub use quota::{remaining_bookings, usage_stats, UsageStats};
