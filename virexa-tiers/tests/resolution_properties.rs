//! Property tests for plan resolution and tier ordering.

use std::cmp::Ordering;

use proptest::prelude::*;
use virexa_tiers::{compare_tiers, resolve_tier, PlanMatching, Tier, TierResolver};

fn tier_strategy() -> impl Strategy<Value = Tier> {
    prop_oneof![
        Just(Tier::Basic),
        Just(Tier::Performance),
        Just(Tier::Champion),
    ]
}

proptest! {
    #[test]
    fn unrecognized_plan_keys_resolve_to_basic(key in ".*") {
        prop_assume!(key != "performance" && key != "champion");
        prop_assert_eq!(resolve_tier(Some(key.as_str())), Tier::Basic);
    }

    #[test]
    fn exact_resolver_agrees_with_resolve_tier(key in proptest::option::of(".*")) {
        let resolver = TierResolver::new(PlanMatching::Exact);
        prop_assert_eq!(resolver.resolve(key.as_deref()), resolve_tier(key.as_deref()));
    }

    #[test]
    fn case_insensitive_resolver_never_ranks_below_exact(key in proptest::option::of("[ a-zA-Z]{0,16}")) {
        let lenient = TierResolver::new(PlanMatching::CaseInsensitive).resolve(key.as_deref());
        let strict = resolve_tier(key.as_deref());
        prop_assert!(lenient >= strict);
    }

    #[test]
    fn compare_tiers_matches_hierarchy(a in tier_strategy(), b in tier_strategy()) {
        prop_assert_eq!(compare_tiers(a, b), a.hierarchy().cmp(&b.hierarchy()));
        prop_assert_eq!(compare_tiers(a, b), compare_tiers(b, a).reverse());
        prop_assert_eq!(compare_tiers(a, b) == Ordering::Equal, a == b);
    }
}

#[test]
fn known_plans_resolve_exactly() {
    assert_eq!(resolve_tier(Some("champion")), Tier::Champion);
    assert_eq!(resolve_tier(Some("performance")), Tier::Performance);
}
