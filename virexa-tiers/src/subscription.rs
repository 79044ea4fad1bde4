//! Member subscription state
//!
//! A member either holds an active tier or has no subscription at all.
//! Having no subscription is not the same as holding the basic tier: the
//! first prompts "subscribe", the second "upgrade".

use serde::{Deserialize, Serialize};

use crate::resolver::{resolve_tier, TierResolver};
use crate::tiers::Tier;

/// Subscription state of a viewer.
///
/// # Examples
///
/// ```
/// use virexa_tiers::{Subscription, Tier};
///
/// let none = Subscription::None;
/// assert_eq!(none.tier(), None);
///
/// let member = Subscription::from_plan_key(Some("stale-plan-id"));
/// assert_eq!(member, Subscription::Active(Tier::Basic));
/// ```
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(tag = "state", content = "tier", rename_all = "snake_case")]
pub enum Subscription {
    /// No subscription (signed out, or never subscribed)
    #[default]
    None,

    /// Active subscription at the given tier
    Active(Tier),
}

impl Subscription {
    /// Subscription for a known member, resolved with exact matching.
    ///
    /// A member always resolves to an active tier; unrecognized or missing
    /// plan keys give [`Tier::Basic`].
    pub fn from_plan_key(plan_key: Option<&str>) -> Self {
        Subscription::Active(resolve_tier(plan_key))
    }

    /// Subscription for a known member, resolved with the given resolver.
    pub fn resolve_with(resolver: &TierResolver, plan_key: Option<&str>) -> Self {
        Subscription::Active(resolver.resolve(plan_key))
    }

    /// The active tier, if any.
    pub fn tier(&self) -> Option<Tier> {
        match self {
            Subscription::None => None,
            Subscription::Active(tier) => Some(*tier),
        }
    }

    /// Check if there is an active tier.
    pub fn is_active(&self) -> bool {
        matches!(self, Subscription::Active(_))
    }
}

impl From<Tier> for Subscription {
    fn from(tier: Tier) -> Self {
        Subscription::Active(tier)
    }
}

impl From<Option<Tier>> for Subscription {
    fn from(tier: Option<Tier>) -> Self {
        tier.map_or(Subscription::None, Subscription::Active)
    }
}
