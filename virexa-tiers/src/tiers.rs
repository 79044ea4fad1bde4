//! Subscription tiers and their metadata
//!
//! This module defines the subscription tiers available to studio members,
//! their rank in the tier hierarchy and the metadata shown on pricing and
//! profile screens.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Length of the free trial offered on every paid plan, in days.
pub const FREE_TRIAL_DAYS: u32 = 3;

/// Subscription tier for a studio member.
///
/// Tiers determine which classes a member may book and how many bookings
/// they get per billing period.
///
/// # Tier Hierarchy
///
/// - **Basic**: entry plan, basic classes only
/// - **Performance**: basic and performance classes
/// - **Champion**: every class, unlimited bookings
///
/// # Examples
///
/// ```
/// use virexa_tiers::{BookingLimit, Tier};
///
/// let tier = Tier::Performance;
/// assert_eq!(tier.booking_limit(), BookingLimit::Limited(12));
/// assert!(tier > Tier::Basic);
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Entry tier
    Basic,

    /// Regular gym-goer tier
    Performance,

    /// Top tier with unlimited bookings
    Champion,
}

impl Tier {
    /// All tiers in ascending hierarchy order.
    pub const ALL: [Tier; 3] = [Tier::Basic, Tier::Performance, Tier::Champion];

    /// Rank of this tier in the hierarchy (basic = 1, champion = 3).
    pub fn hierarchy(&self) -> u8 {
        match self {
            Tier::Basic => 1,
            Tier::Performance => 2,
            Tier::Champion => 3,
        }
    }

    /// Monthly booking limit for this tier.
    pub fn booking_limit(&self) -> BookingLimit {
        match self {
            Tier::Basic => BookingLimit::Limited(5),
            Tier::Performance => BookingLimit::Limited(12),
            Tier::Champion => BookingLimit::Unlimited,
        }
    }

    /// Monthly and annual price for this tier.
    pub fn pricing(&self) -> TierPricing {
        match self {
            Tier::Basic => TierPricing {
                monthly_cents: 1900,
                annual_cents: 19000,
            },
            Tier::Performance => TierPricing {
                monthly_cents: 3900,
                annual_cents: 39000,
            },
            Tier::Champion => TierPricing {
                monthly_cents: 7900,
                annual_cents: 79000,
            },
        }
    }

    /// Get the full metadata record for this tier.
    ///
    /// # Examples
    ///
    /// ```
    /// use virexa_tiers::Tier;
    ///
    /// let info = Tier::Champion.info();
    /// assert_eq!(info.display_name, "Champion");
    /// assert!(info.booking_limit.is_unlimited());
    /// ```
    pub fn info(&self) -> TierInfo {
        match self {
            Tier::Basic => TierInfo {
                tier: *self,
                hierarchy: self.hierarchy(),
                booking_limit: self.booking_limit(),
                pricing: self.pricing(),
                display_name: self.display_name().to_string(),
                description: "Essential access for casual fitness.".to_string(),
                features: vec![
                    "5 class bookings per month".to_string(),
                    "Access to basic classes".to_string(),
                    "Class recordings for booked sessions".to_string(),
                    "Booking history".to_string(),
                ],
                access: "Basic classes only".to_string(),
                color: "bg-emerald-500 text-white".to_string(),
                free_trial_days: FREE_TRIAL_DAYS,
            },
            Tier::Performance => TierInfo {
                tier: *self,
                hierarchy: self.hierarchy(),
                booking_limit: self.booking_limit(),
                pricing: self.pricing(),
                display_name: self.display_name().to_string(),
                description: "Perfect for regular gym-goers.".to_string(),
                features: vec![
                    "12 class bookings per month".to_string(),
                    "Access to basic and performance classes".to_string(),
                    "Class recordings for booked sessions".to_string(),
                    "Monthly progress tracking".to_string(),
                    "Priority waitlist".to_string(),
                ],
                access: "Basic and Performance classes".to_string(),
                color: "bg-blue-500 text-white".to_string(),
                free_trial_days: FREE_TRIAL_DAYS,
            },
            Tier::Champion => TierInfo {
                tier: *self,
                hierarchy: self.hierarchy(),
                booking_limit: self.booking_limit(),
                pricing: self.pricing(),
                display_name: self.display_name().to_string(),
                description: "Unlimited access for the elite.".to_string(),
                features: vec![
                    "Unlimited class bookings".to_string(),
                    "Access to every class including Champion".to_string(),
                    "Class recordings for booked sessions".to_string(),
                    "Monthly progress tracking".to_string(),
                    "Priority waitlist".to_string(),
                    "Guest passes".to_string(),
                ],
                access: "All classes including Champion".to_string(),
                color: "bg-amber-500 text-white".to_string(),
                free_trial_days: FREE_TRIAL_DAYS,
            },
        }
    }

    /// Parse a tier from its exact string representation.
    ///
    /// Used for trusted content such as a class's required tier level. Plan
    /// identifiers coming from the identity source go through
    /// [`resolve_tier`](crate::resolve_tier) instead, which never fails.
    ///
    /// # Arguments
    ///
    /// * `s` - `"basic"`, `"performance"` or `"champion"`
    pub fn parse(s: &str) -> Result<Self, ParseTierError> {
        match s {
            "basic" => Ok(Tier::Basic),
            "performance" => Ok(Tier::Performance),
            "champion" => Ok(Tier::Champion),
            other => Err(ParseTierError(other.to_string())),
        }
    }

    /// Get string representation of the tier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Basic => "basic",
            Tier::Performance => "performance",
            Tier::Champion => "champion",
        }
    }

    /// Get a human-readable display name for the tier.
    pub fn display_name(&self) -> &'static str {
        match self {
            Tier::Basic => "Basic",
            Tier::Performance => "Performance",
            Tier::Champion => "Champion",
        }
    }

    /// The next tier up, used for upgrade prompts.
    pub fn next(&self) -> Option<Tier> {
        match self {
            Tier::Basic => Some(Tier::Performance),
            Tier::Performance => Some(Tier::Champion),
            Tier::Champion => None,
        }
    }

    /// Check if this is the highest tier.
    pub fn is_top(&self) -> bool {
        self.next().is_none()
    }
}

impl Default for Tier {
    fn default() -> Self {
        Tier::Basic
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Tier {
    type Err = ParseTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Tier::parse(s)
    }
}

/// Error returned when a string is not an exact tier name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown tier: {0:?}")]
pub struct ParseTierError(pub String);

/// Compare two tiers by hierarchy rank.
///
/// `Less`, `Equal` and `Greater` correspond to `a` ranking below, level with
/// or above `b`.
///
/// # Examples
///
/// ```
/// use std::cmp::Ordering;
/// use virexa_tiers::{compare_tiers, Tier};
///
/// assert_eq!(compare_tiers(Tier::Basic, Tier::Champion), Ordering::Less);
/// assert_eq!(compare_tiers(Tier::Performance, Tier::Performance), Ordering::Equal);
/// ```
pub fn compare_tiers(a: Tier, b: Tier) -> Ordering {
    a.hierarchy().cmp(&b.hierarchy())
}

/// Metadata lookup for a tier. Equivalent to [`Tier::info`].
pub fn tier_info(tier: Tier) -> TierInfo {
    tier.info()
}

/// Bookings allowed per billing period.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum BookingLimit {
    /// At most this many bookings
    Limited(u32),

    /// No cap
    Unlimited,
}

impl BookingLimit {
    /// Check if there is no cap.
    pub fn is_unlimited(&self) -> bool {
        matches!(self, BookingLimit::Unlimited)
    }

    /// The cap, or `None` when unlimited.
    pub fn as_option(&self) -> Option<u32> {
        match self {
            BookingLimit::Limited(n) => Some(*n),
            BookingLimit::Unlimited => None,
        }
    }
}

impl fmt::Display for BookingLimit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingLimit::Limited(n) => write!(f, "{}", n),
            BookingLimit::Unlimited => f.write_str("unlimited"),
        }
    }
}

/// Price of a tier in cents.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct TierPricing {
    /// Price per month
    pub monthly_cents: u32,

    /// Price per year when billed annually
    pub annual_cents: u32,
}

/// Everything the pricing and profile screens show about a tier.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TierInfo {
    /// The tier this record describes
    pub tier: Tier,

    /// Hierarchy rank
    pub hierarchy: u8,

    /// Bookings per billing period
    pub booking_limit: BookingLimit,

    /// Monthly and annual price
    pub pricing: TierPricing,

    /// Display name
    pub display_name: String,

    /// Short marketing description
    pub description: String,

    /// Feature list, in display order
    pub features: Vec<String>,

    /// Which classes the tier unlocks
    pub access: String,

    /// UI color token
    pub color: String,

    /// Free trial length in days
    pub free_trial_days: u32,
}
