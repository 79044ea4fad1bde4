//! Plan identifier resolution
//!
//! Maps the raw plan identifier supplied by the identity provider onto a
//! [`Tier`]. Resolution is total: anything unrecognized degrades to
//! [`Tier::Basic`].

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::tiers::Tier;

/// Metadata keys that may carry the plan identifier, in lookup order.
///
/// Billing integrations write the first group; the trailing generic keys are
/// written by manual tier changes.
pub const PLAN_METADATA_KEYS: [&str; 10] = [
    "stripePlan",
    "product_id",
    "price_id",
    "subscription_plan",
    "subscriptionStatus",
    "subscription_status",
    "clerk_tier",
    "plan",
    "tier",
    "subscriptionTier",
];

/// Fields checked, in order, when a plan metadata value is an object.
const PLAN_OBJECT_FIELDS: [&str; 4] = ["id", "name", "slug", "plan_id"];

/// Resolve a raw plan identifier to a tier.
///
/// Returns [`Tier::Champion`] for exactly `"champion"`, [`Tier::Performance`]
/// for exactly `"performance"` and [`Tier::Basic`] for everything else,
/// including `None`, the empty string and mixed-case spellings.
///
/// # Examples
///
/// ```
/// use virexa_tiers::{resolve_tier, Tier};
///
/// assert_eq!(resolve_tier(Some("champion")), Tier::Champion);
/// assert_eq!(resolve_tier(Some("Champion")), Tier::Basic);
/// assert_eq!(resolve_tier(None), Tier::Basic);
/// ```
pub fn resolve_tier(plan_key: Option<&str>) -> Tier {
    match plan_key {
        Some("champion") => Tier::Champion,
        Some("performance") => Tier::Performance,
        _ => Tier::Basic,
    }
}

/// How plan identifiers are compared against tier names.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum PlanMatching {
    /// Byte-for-byte comparison
    #[default]
    Exact,

    /// Trim surrounding whitespace and ignore ASCII case
    CaseInsensitive,
}

impl PlanMatching {
    /// Parse a matching mode from configuration text.
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace('-', "_").as_str() {
            "exact" => Some(PlanMatching::Exact),
            "case_insensitive" | "insensitive" => Some(PlanMatching::CaseInsensitive),
            _ => None,
        }
    }
}

/// Plan resolver with a configurable matching mode.
///
/// # Examples
///
/// ```
/// use virexa_tiers::{PlanMatching, Tier, TierResolver};
///
/// let strict = TierResolver::default();
/// assert_eq!(strict.resolve(Some(" Performance ")), Tier::Basic);
///
/// let lenient = TierResolver::new(PlanMatching::CaseInsensitive);
/// assert_eq!(lenient.resolve(Some(" Performance ")), Tier::Performance);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TierResolver {
    matching: PlanMatching,
}

impl TierResolver {
    /// Create a resolver with the given matching mode.
    pub fn new(matching: PlanMatching) -> Self {
        Self { matching }
    }

    /// The matching mode in use.
    pub fn matching(&self) -> PlanMatching {
        self.matching
    }

    /// Resolve a raw plan identifier to a tier.
    pub fn resolve(&self, plan_key: Option<&str>) -> Tier {
        match self.matching {
            PlanMatching::Exact => resolve_tier(plan_key),
            PlanMatching::CaseInsensitive => {
                let normalized = plan_key.map(|key| key.trim().to_ascii_lowercase());
                resolve_tier(normalized.as_deref())
            }
        }
    }
}

/// Extract the raw plan identifier from identity-provider public metadata.
///
/// Looks through [`PLAN_METADATA_KEYS`] in order and takes the first value
/// that is not null, `false`, `0` or the empty string. Strings are returned
/// unchanged. Objects yield their `id`, `name`, `slug` or `plan_id` string
/// field, falling back to their compact JSON text. Other scalars yield their
/// JSON text.
///
/// # Examples
///
/// ```
/// use serde_json::json;
/// use virexa_tiers::plan_key_from_metadata;
///
/// let metadata = json!({ "plan": "performance", "tier": "champion" });
/// assert_eq!(plan_key_from_metadata(&metadata).as_deref(), Some("performance"));
///
/// let nested = json!({ "stripePlan": { "id": "champion" } });
/// assert_eq!(plan_key_from_metadata(&nested).as_deref(), Some("champion"));
/// ```
pub fn plan_key_from_metadata(metadata: &Value) -> Option<String> {
    let object = metadata.as_object()?;

    let value = PLAN_METADATA_KEYS
        .iter()
        .filter_map(|key| object.get(*key))
        .find(|value| is_truthy(value))?;

    Some(plan_key_from_value(value))
}

fn plan_key_from_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Object(fields) => PLAN_OBJECT_FIELDS
            .iter()
            .filter_map(|field| fields.get(*field))
            .find(|value| is_truthy(value))
            .map(|value| match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            })
            .unwrap_or_else(|| value.to_string()),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
