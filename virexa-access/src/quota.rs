//! # Booking Quota
//!
//! Remaining bookings and usage statistics for a billing period. Counts are
//! unsigned, so a negative "used" value cannot reach these functions; a
//! count above the limit clamps to zero remaining and 100 percent used.

use serde::{Deserialize, Serialize};
use virexa_tiers::{BookingLimit, Tier};

/// Bookings still available in the billing period.
///
/// Unlimited tiers stay unlimited. Finite tiers report
/// `limit - used`, floored at zero.
///
/// # Examples
///
/// ```
/// use virexa_access::remaining_bookings;
/// use virexa_tiers::{BookingLimit, Tier};
///
/// assert_eq!(remaining_bookings(Tier::Basic, 2), BookingLimit::Limited(3));
/// assert_eq!(remaining_bookings(Tier::Basic, 9), BookingLimit::Limited(0));
/// assert_eq!(remaining_bookings(Tier::Champion, 400), BookingLimit::Unlimited);
/// ```
pub fn remaining_bookings(tier: Tier, used: u32) -> BookingLimit {
    match tier.booking_limit() {
        BookingLimit::Limited(limit) => BookingLimit::Limited(limit.saturating_sub(used)),
        BookingLimit::Unlimited => BookingLimit::Unlimited,
    }
}

/// Snapshot of quota consumption for the bookings page.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct UsageStats {
    /// Tier the stats were computed for
    pub tier: Tier,

    /// Bookings used in the period
    pub used: u32,

    /// Bookings allowed in the period
    pub limit: BookingLimit,

    /// Bookings left in the period
    pub remaining: BookingLimit,

    /// Whether the tier has no cap
    pub is_unlimited: bool,

    /// Share of the limit used, in `[0, 100]`; always 0 when unlimited
    pub percentage_used: f64,
}

impl UsageStats {
    /// Check if a finite quota has been used up.
    pub fn is_exhausted(&self) -> bool {
        matches!(self.remaining, BookingLimit::Limited(0))
    }
}

/// Compute usage statistics for a tier and a used-booking count.
///
/// # Example
///
/// ```
/// use virexa_access::usage_stats;
/// use virexa_tiers::{BookingLimit, Tier};
///
/// let stats = usage_stats(Tier::Performance, 3);
/// assert_eq!(stats.remaining, BookingLimit::Limited(9));
/// assert_eq!(stats.percentage_used, 25.0);
///
/// let stats = usage_stats(Tier::Champion, 30);
/// assert!(stats.is_unlimited);
/// assert_eq!(stats.percentage_used, 0.0);
/// ```
pub fn usage_stats(tier: Tier, used: u32) -> UsageStats {
    let limit = tier.booking_limit();

    UsageStats {
        tier,
        used,
        limit,
        remaining: remaining_bookings(tier, used),
        is_unlimited: limit.is_unlimited(),
        percentage_used: percentage_used(limit, used),
    }
}

fn percentage_used(limit: BookingLimit, used: u32) -> f64 {
    match limit {
        BookingLimit::Unlimited => 0.0,
        // An empty allowance is fully used.
        BookingLimit::Limited(0) => 100.0,
        BookingLimit::Limited(limit) => (f64::from(used) / f64::from(limit) * 100.0).min(100.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_remaining_never_negative() {
        assert_eq!(remaining_bookings(Tier::Basic, 0), BookingLimit::Limited(5));
        assert_eq!(remaining_bookings(Tier::Basic, 5), BookingLimit::Limited(0));
        assert_eq!(remaining_bookings(Tier::Basic, u32::MAX), BookingLimit::Limited(0));
        assert_eq!(remaining_bookings(Tier::Performance, 11), BookingLimit::Limited(1));
    }

    #[test]
    fn test_champion_is_unlimited() {
        for used in [0, 1, 12, 10_000] {
            assert_eq!(remaining_bookings(Tier::Champion, used), BookingLimit::Unlimited);
        }
    }

    #[test]
    fn test_usage_stats_fields() {
        let stats = usage_stats(Tier::Basic, 2);
        assert_eq!(stats.tier, Tier::Basic);
        assert_eq!(stats.used, 2);
        assert_eq!(stats.limit, BookingLimit::Limited(5));
        assert_eq!(stats.remaining, BookingLimit::Limited(3));
        assert!(!stats.is_unlimited);
        assert!((stats.percentage_used - 40.0).abs() < 1e-9);
        assert!(!stats.is_exhausted());
    }

    #[test]
    fn test_usage_caps_at_one_hundred() {
        let stats = usage_stats(Tier::Basic, 8);
        assert_eq!(stats.percentage_used, 100.0);
        assert!(stats.is_exhausted());
    }

    #[test]
    fn test_unlimited_usage_is_zero_percent() {
        let stats = usage_stats(Tier::Champion, 99);
        assert_eq!(stats.percentage_used, 0.0);
        assert_eq!(stats.remaining, BookingLimit::Unlimited);
        assert!(!stats.is_exhausted());
    }

    #[test]
    fn test_zero_limit_percentage() {
        assert_eq!(percentage_used(BookingLimit::Limited(0), 0), 100.0);
    }

    #[test]
    fn test_usage_serialization() {
        let json = serde_json::to_value(usage_stats(Tier::Champion, 4)).unwrap();
        assert_eq!(json["isUnlimited"], serde_json::json!(true));
        assert_eq!(json["remaining"], serde_json::json!("unlimited"));
        assert_eq!(json["percentageUsed"], serde_json::json!(0.0));
    }
}
