//! Configuration form of the tier table.
//!
//! This is the shape found in tier table files. Permission keys are kept as
//! strings here so that typos surface as registry construction errors instead
//! of being silently dropped by deserialization.

use serde::Deserialize;
use std::collections::BTreeMap;

use super::TierPricing;

/// The whole tier table document.
#[derive(Debug, Clone, Deserialize)]
pub struct TierTable {
    pub tiers: Vec<TierEntry>,
}

/// One tier as written in configuration.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TierEntry {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    pub order: u32,

    #[serde(default)]
    pub permissions: BTreeMap<String, bool>,

    #[serde(default)]
    pub pricing: Option<TierPricing>,

    #[serde(default, alias = "isHidden")]
    pub is_hidden: bool,

    #[serde(default, alias = "isDefault")]
    pub is_default: bool,
}

impl TierTable {
    /// Parses a YAML tier table document.
    pub fn from_yaml(source: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_entry() {
        let table = TierTable::from_yaml(
            r#"
tiers:
  - id: free
    order: 1
    is_default: true
    permissions:
      can_create_signals: false
"#,
        )
        .unwrap();

        assert_eq!(table.tiers.len(), 1);
        let free = &table.tiers[0];
        assert_eq!(free.id, "free");
        assert!(free.is_default);
        assert!(!free.is_hidden);
        assert_eq!(free.permissions.get("can_create_signals"), Some(&false));
    }

    #[test]
    fn accepts_camel_case_flags_and_pricing() {
        let table = TierTable::from_yaml(
            r#"
tiers:
  - id: founders
    order: 6
    isHidden: true
    pricing:
      monthlyPriceCents: 9900
      yearly_plan_ref: plan_founders_yearly
"#,
        )
        .unwrap();

        let founders = &table.tiers[0];
        assert!(founders.is_hidden);
        let pricing = founders.pricing.as_ref().unwrap();
        assert_eq!(pricing.monthly_price_cents, Some(9_900));
        assert_eq!(pricing.yearly_plan_ref.as_deref(), Some("plan_founders_yearly"));
    }

    #[test]
    fn rejects_unknown_entry_fields() {
        let result = TierTable::from_yaml(
            r#"
tiers:
  - id: free
    order: 1
    colour: blue
"#,
        );
        assert!(result.is_err());
    }
}
