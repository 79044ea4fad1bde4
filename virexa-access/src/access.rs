//! # Class Access
//!
//! Decides whether a subscription unlocks a class. A class carries a
//! required tier; a member may book it when their tier ranks at least as
//! high in the hierarchy.

use serde::{Deserialize, Serialize};
use virexa_tiers::{Subscription, Tier};

/// Check if a member tier unlocks a class with the given required tier.
///
/// The check assumes a resolved tier. Viewers without a subscription are
/// handled by [`decide_access`], which returns
/// [`AccessDecision::SubscriptionRequired`] for them.
///
/// # Examples
///
/// ```
/// use virexa_access::can_access_class;
/// use virexa_tiers::Tier;
///
/// assert!(can_access_class(Tier::Champion, Tier::Performance));
/// assert!(can_access_class(Tier::Basic, Tier::Basic));
/// assert!(!can_access_class(Tier::Basic, Tier::Performance));
/// ```
pub fn can_access_class(user_tier: Tier, required_tier: Tier) -> bool {
    user_tier.hierarchy() >= required_tier.hierarchy()
}

/// Outcome of an access check for a viewer.
///
/// The two denial variants drive different prompts: a viewer with no
/// subscription is asked to subscribe, a member on a lower tier is asked to
/// upgrade to the required tier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(tag = "decision", rename_all = "snake_case")]
pub enum AccessDecision {
    /// The class is unlocked.
    Granted,

    /// No subscription; show the subscribe prompt.
    SubscriptionRequired,

    /// Tier too low; show the upgrade prompt for `required`.
    UpgradeRequired {
        /// Tier the class requires.
        required: Tier,
    },
}

impl AccessDecision {
    /// Check if access was granted.
    pub fn is_granted(&self) -> bool {
        matches!(self, AccessDecision::Granted)
    }
}

/// Decide access for a viewer's subscription.
///
/// # Arguments
///
/// * `subscription` - The viewer's subscription state
/// * `required_tier` - The tier the class requires
///
/// # Example
///
/// ```
/// use virexa_access::{decide_access, AccessDecision};
/// use virexa_tiers::{Subscription, Tier};
///
/// assert_eq!(
///     decide_access(&Subscription::None, Tier::Basic),
///     AccessDecision::SubscriptionRequired
/// );
/// assert_eq!(
///     decide_access(&Subscription::Active(Tier::Basic), Tier::Champion),
///     AccessDecision::UpgradeRequired { required: Tier::Champion }
/// );
/// ```
pub fn decide_access(subscription: &Subscription, required_tier: Tier) -> AccessDecision {
    match subscription {
        Subscription::None => AccessDecision::SubscriptionRequired,
        Subscription::Active(tier) if can_access_class(*tier, required_tier) => {
            AccessDecision::Granted
        }
        Subscription::Active(_) => AccessDecision::UpgradeRequired {
            required: required_tier,
        },
    }
}

/// Tiers that a member on `tier` can book, in ascending order.
pub fn accessible_tiers(tier: Tier) -> Vec<Tier> {
    Tier::ALL
        .into_iter()
        .filter(|required| can_access_class(tier, *required))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_matrix() {
        let cases = [
            (Tier::Basic, Tier::Basic, true),
            (Tier::Basic, Tier::Performance, false),
            (Tier::Basic, Tier::Champion, false),
            (Tier::Performance, Tier::Basic, true),
            (Tier::Performance, Tier::Performance, true),
            (Tier::Performance, Tier::Champion, false),
            (Tier::Champion, Tier::Basic, true),
            (Tier::Champion, Tier::Performance, true),
            (Tier::Champion, Tier::Champion, true),
        ];

        for (user, required, expected) in cases {
            assert_eq!(
                can_access_class(user, required),
                expected,
                "{} booking {}",
                user,
                required
            );
        }
    }

    #[test]
    fn test_decide_access_for_members() {
        let member = Subscription::Active(Tier::Performance);
        assert_eq!(decide_access(&member, Tier::Basic), AccessDecision::Granted);
        assert_eq!(decide_access(&member, Tier::Performance), AccessDecision::Granted);
        assert_eq!(
            decide_access(&member, Tier::Champion),
            AccessDecision::UpgradeRequired {
                required: Tier::Champion
            }
        );
    }

    #[test]
    fn test_no_subscription_is_not_an_upgrade() {
        for required in Tier::ALL {
            let decision = decide_access(&Subscription::None, required);
            assert_eq!(decision, AccessDecision::SubscriptionRequired);
            assert!(!decision.is_granted());
        }
    }

    #[test]
    fn test_accessible_tiers() {
        assert_eq!(accessible_tiers(Tier::Basic), vec![Tier::Basic]);
        assert_eq!(accessible_tiers(Tier::Champion), Tier::ALL.to_vec());
    }

    #[test]
    fn test_decision_serialization() {
        let json = serde_json::to_value(AccessDecision::UpgradeRequired {
            required: Tier::Champion,
        })
        .unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "decision": "upgrade_required", "required": "champion" })
        );
    }
}
