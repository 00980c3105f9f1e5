//! Tier registry and resolver.
//!
//! The registry owns the static tier table and answers three questions:
//! which tier a subject is at, whether a subject holds a permission, and which
//! tier a subject should upgrade to.
//!
//! # Design Decisions
//!
//! - **Validated once**: malformed tables are rejected at construction with a
//!   `RegistryError`; no query ever fails afterwards
//! - **Fail closed**: unknown tier ids resolve to the default tier and unknown
//!   permission names are not granted
//! - **Immutable**: no interior mutability, share it as `Arc<TierRegistry>`
//!
//! # Example
//!
//! ```ignore
//! let registry = TierRegistry::from_table(table)?;
//! let allowed = registry.has_permission(Some("premium"), Permission::CanCreateSignals, false);
//! let next = registry.upgrade_target(Some("premium"), None);
//! ```

use std::collections::HashSet;
use thiserror::Error;

use super::{Permission, PermissionSet, TierDefinition, TierId, TierTable};

/// Configuration errors detected while building a registry.
///
/// Any of these must stop the process from starting.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("Tier table is empty")]
    Empty,

    #[error("Unknown tier id '{0}'")]
    UnknownTierId(String),

    #[error("Tier '{0}' is defined more than once")]
    DuplicateTier(TierId),

    #[error("Tiers '{first}' and '{second}' share order {order}")]
    DuplicateOrder {
        order: u32,
        first: TierId,
        second: TierId,
    },

    #[error("No tier is flagged as default")]
    NoDefaultTier,

    #[error("Tiers '{first}' and '{second}' are both flagged as default")]
    MultipleDefaultTiers { first: TierId, second: TierId },

    #[error("Tier '{tier}' does not define permission '{permission}'")]
    MissingPermission { tier: TierId, permission: Permission },

    #[error("Tier '{tier}' defines unknown permission '{name}'")]
    UnknownPermission { tier: TierId, name: String },

    #[error("Tier '{tier}' defines permission '{permission}' more than once")]
    DuplicatePermission { tier: TierId, permission: Permission },
}

/// Immutable, validated tier table.
///
/// # Invariants
///
/// - `tiers` is non-empty and sorted by strictly increasing `order`
/// - tier ids are unique
/// - `default_index` points at the only tier with `is_default`
/// - every tier defines every permission
#[derive(Debug, Clone)]
pub struct TierRegistry {
    tiers: Vec<TierDefinition>,
    default_index: usize,
}

impl TierRegistry {
    /// Builds a registry from tier definitions, validating every invariant.
    ///
    /// # Errors
    ///
    /// Returns `RegistryError` for an empty table, duplicate ids or orders,
    /// zero or several default tiers, or an incomplete permission set.
    pub fn new(mut tiers: Vec<TierDefinition>) -> Result<Self, RegistryError> {
        if tiers.is_empty() {
            return Err(RegistryError::Empty);
        }

        let mut seen = HashSet::new();
        for tier in &tiers {
            if !seen.insert(tier.id) {
                return Err(RegistryError::DuplicateTier(tier.id));
            }
            if let Some(permission) = tier.permissions.first_missing() {
                return Err(RegistryError::MissingPermission {
                    tier: tier.id,
                    permission,
                });
            }
        }

        tiers.sort_by_key(|t| t.order);
        if let Some(pair) = tiers.windows(2).find(|w| w[0].order == w[1].order) {
            return Err(RegistryError::DuplicateOrder {
                order: pair[0].order,
                first: pair[0].id,
                second: pair[1].id,
            });
        }

        let mut defaults = tiers
            .iter()
            .enumerate()
            .filter(|(_, t)| t.is_default);
        let default_index = match (defaults.next(), defaults.next()) {
            (None, _) => return Err(RegistryError::NoDefaultTier),
            (Some((_, first)), Some((_, second))) => {
                return Err(RegistryError::MultipleDefaultTiers {
                    first: first.id,
                    second: second.id,
                })
            }
            (Some((index, _)), None) => index,
        };

        Ok(Self {
            tiers,
            default_index,
        })
    }

    /// Builds a registry from the configuration form of the table.
    ///
    /// Permission keys are matched against the wire and client names of
    /// `Permission`; an unrecognized key is a configuration error.
    pub fn from_table(table: TierTable) -> Result<Self, RegistryError> {
        let mut definitions = Vec::with_capacity(table.tiers.len());

        for entry in table.tiers {
            let id: TierId = entry
                .id
                .parse()
                .map_err(|_| RegistryError::UnknownTierId(entry.id.clone()))?;

            let mut flags = Vec::with_capacity(entry.permissions.len());
            let mut defined = HashSet::new();
            for (name, granted) in entry.permissions {
                let permission = Permission::from_name(&name)
                    .ok_or(RegistryError::UnknownPermission { tier: id, name })?;
                // Wire and client names alias the same permission.
                if !defined.insert(permission) {
                    return Err(RegistryError::DuplicatePermission { tier: id, permission });
                }
                flags.push((permission, granted));
            }
            let permissions = PermissionSet::new(flags)
                .map_err(|permission| RegistryError::MissingPermission { tier: id, permission })?;

            definitions.push(TierDefinition {
                id,
                name: entry
                    .name
                    .unwrap_or_else(|| id.display_name().to_string()),
                order: entry.order,
                permissions,
                pricing: entry.pricing,
                is_hidden: entry.is_hidden,
                is_default: entry.is_default,
            });
        }

        Self::new(definitions)
    }

    /// All tiers in ascending order.
    pub fn tiers(&self) -> &[TierDefinition] {
        &self.tiers
    }

    /// Non-hidden tiers in ascending order (public listing).
    pub fn visible_tiers(&self) -> impl Iterator<Item = &TierDefinition> + '_ {
        self.tiers.iter().filter(|t| !t.is_hidden)
    }

    /// The fallback tier for unset or unrecognized tier ids.
    pub fn default_tier(&self) -> &TierDefinition {
        &self.tiers[self.default_index]
    }

    /// Returns the configured definition for a tier id, if present.
    pub fn get(&self, id: TierId) -> Option<&TierDefinition> {
        self.tiers.iter().find(|t| t.id == id)
    }

    /// Returns true if the id parses and is present in this table.
    pub fn contains(&self, id: TierId) -> bool {
        self.get(id).is_some()
    }

    /// Resolves a possibly absent or unrecognized tier id.
    ///
    /// Never fails: anything that does not name a configured tier resolves to
    /// the default tier.
    pub fn resolve_tier(&self, tier_id: Option<&str>) -> &TierDefinition {
        tier_id
            .and_then(|raw| raw.parse::<TierId>().ok())
            .and_then(|id| self.get(id))
            .unwrap_or_else(|| self.default_tier())
    }

    /// Does a subject at `subject_tier` hold `permission`?
    ///
    /// Privileged roles bypass tier checks and always get `true`.
    pub fn has_permission(
        &self,
        subject_tier: Option<&str>,
        permission: Permission,
        is_privileged: bool,
    ) -> bool {
        if is_privileged {
            return true;
        }
        self.resolve_tier(subject_tier).grants(permission)
    }

    /// Same as `has_permission` for a permission given by name.
    ///
    /// Unknown permission names are not granted unless the subject is privileged.
    pub fn has_permission_named(
        &self,
        subject_tier: Option<&str>,
        permission_name: &str,
        is_privileged: bool,
    ) -> bool {
        if is_privileged {
            return true;
        }
        Permission::from_name(permission_name)
            .map(|permission| self.has_permission(subject_tier, permission, false))
            .unwrap_or(false)
    }

    /// True iff `target` is a different tier with a strictly higher order.
    ///
    /// Lateral and downward moves are never reported as upgrades.
    pub fn can_upgrade(&self, current: Option<&str>, target: Option<&str>) -> bool {
        let current = self.resolve_tier(current);
        let target = self.resolve_tier(target);
        target.id != current.id && target.order > current.order
    }

    /// The cheapest visible tier granting `permission`, if any.
    pub fn lowest_tier_granting(&self, permission: Permission) -> Option<&TierDefinition> {
        self.visible_tiers().find(|t| t.grants(permission))
    }

    /// Where a subject at `current` should upgrade to.
    ///
    /// An explicit target resolves like any tier id. Without one, this is the
    /// next visible tier above the current one, or `None` at the top.
    pub fn upgrade_target(
        &self,
        current: Option<&str>,
        explicit_target: Option<&str>,
    ) -> Option<&TierDefinition> {
        if let Some(target) = explicit_target {
            return Some(self.resolve_tier(Some(target)));
        }
        let current_order = self.resolve_tier(current).order;
        self.visible_tiers().find(|t| t.order > current_order)
    }
}
