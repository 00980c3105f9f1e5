//! Tier definitions as held by the registry.

use serde::{Deserialize, Serialize};

use super::{Permission, PermissionSet, TierId};

/// Billing metadata attached to a tier.
///
/// Irrelevant to permission logic. Money is stored in integer cents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierPricing {
    /// Monthly price in cents. None = not sold monthly.
    #[serde(default, alias = "monthlyPriceCents")]
    pub monthly_price_cents: Option<i64>,

    /// Yearly price in cents. None = not sold yearly.
    #[serde(default, alias = "yearlyPriceCents")]
    pub yearly_price_cents: Option<i64>,

    /// External billing plan reference for the monthly price.
    #[serde(default, alias = "monthlyPlanRef")]
    pub monthly_plan_ref: Option<String>,

    /// External billing plan reference for the yearly price.
    #[serde(default, alias = "yearlyPlanRef")]
    pub yearly_plan_ref: Option<String>,
}

/// One entry of the immutable tier table.
///
/// # Invariants (enforced by `TierRegistry` construction)
///
/// - `order` is unique across the table and is the sole basis for comparison
/// - `permissions` defines every known permission
/// - exactly one tier in the table has `is_default` set
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierDefinition {
    pub id: TierId,
    pub name: String,
    pub order: u32,
    pub permissions: PermissionSet,
    pub pricing: Option<TierPricing>,
    /// Excluded from upgrade suggestions and public listings, still assignable.
    pub is_hidden: bool,
    pub is_default: bool,
}

impl TierDefinition {
    /// Creates a visible, non-default tier without pricing.
    pub fn new(id: TierId, order: u32, permissions: PermissionSet) -> Self {
        Self {
            id,
            name: id.display_name().to_string(),
            order,
            permissions,
            pricing: None,
            is_hidden: false,
            is_default: false,
        }
    }

    pub fn hidden(mut self) -> Self {
        self.is_hidden = true;
        self
    }

    pub fn as_default(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Returns whether this tier grants the permission.
    pub fn grants(&self, permission: Permission) -> bool {
        self.permissions.get(permission)
    }
}
