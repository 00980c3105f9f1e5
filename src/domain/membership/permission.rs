//! Gated permissions and per-tier permission sets.
//!
//! Permissions form a closed enumeration. A `PermissionSet` always carries an
//! explicit value for every permission, so a missing entry can never be read
//! as an implicit `false`.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// A named capability gating one platform feature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    #[serde(alias = "canAccessAffiliateTools")]
    CanAccessAffiliateTools,
    #[serde(alias = "canCreateSignals")]
    CanCreateSignals,
    #[serde(alias = "canAccessAIAdvisor")]
    CanAccessAiAdvisor,
    #[serde(alias = "canCreateCTAs")]
    CanCreateCtas,
    #[serde(alias = "canUseCustomDomains")]
    CanUseCustomDomains,
    #[serde(alias = "canDuplicateCourses")]
    CanDuplicateCourses,
}

impl Permission {
    /// Every known permission.
    pub const ALL: [Permission; 6] = [
        Permission::CanAccessAffiliateTools,
        Permission::CanCreateSignals,
        Permission::CanAccessAiAdvisor,
        Permission::CanCreateCtas,
        Permission::CanUseCustomDomains,
        Permission::CanDuplicateCourses,
    ];

    /// Snake-case wire name (config files, API).
    pub fn as_str(&self) -> &'static str {
        match self {
            Permission::CanAccessAffiliateTools => "can_access_affiliate_tools",
            Permission::CanCreateSignals => "can_create_signals",
            Permission::CanAccessAiAdvisor => "can_access_ai_advisor",
            Permission::CanCreateCtas => "can_create_ctas",
            Permission::CanUseCustomDomains => "can_use_custom_domains",
            Permission::CanDuplicateCourses => "can_duplicate_courses",
        }
    }

    /// Camel-case name used by the web client.
    pub fn client_name(&self) -> &'static str {
        match self {
            Permission::CanAccessAffiliateTools => "canAccessAffiliateTools",
            Permission::CanCreateSignals => "canCreateSignals",
            Permission::CanAccessAiAdvisor => "canAccessAIAdvisor",
            Permission::CanCreateCtas => "canCreateCTAs",
            Permission::CanUseCustomDomains => "canUseCustomDomains",
            Permission::CanDuplicateCourses => "canDuplicateCourses",
        }
    }

    /// Human-readable feature name for denial messages.
    pub fn feature_name(&self) -> &'static str {
        match self {
            Permission::CanAccessAffiliateTools => "Affiliate tools",
            Permission::CanCreateSignals => "Signal creation",
            Permission::CanAccessAiAdvisor => "AI advisor",
            Permission::CanCreateCtas => "CTA editor",
            Permission::CanUseCustomDomains => "Custom domains",
            Permission::CanDuplicateCourses => "Course duplication",
        }
    }

    /// Looks up a permission by either its wire or client name.
    ///
    /// Returns `None` for unknown names; callers treat that as "not granted".
    pub fn from_name(name: &str) -> Option<Permission> {
        let name = name.trim();
        Permission::ALL
            .into_iter()
            .find(|p| p.as_str() == name || p.client_name() == name)
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Complete mapping from every `Permission` to a grant flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PermissionSet(BTreeMap<Permission, bool>);

impl PermissionSet {
    /// Builds a set from explicit flags.
    ///
    /// # Errors
    ///
    /// Returns the first permission without a value if the flags are incomplete.
    pub fn new(flags: impl IntoIterator<Item = (Permission, bool)>) -> Result<Self, Permission> {
        let map: BTreeMap<Permission, bool> = flags.into_iter().collect();
        match Permission::ALL.into_iter().find(|p| !map.contains_key(p)) {
            Some(missing) => Err(missing),
            None => Ok(Self(map)),
        }
    }

    /// Builds a set granting exactly the listed permissions.
    pub fn granting(granted: &[Permission]) -> Self {
        Self(
            Permission::ALL
                .into_iter()
                .map(|p| (p, granted.contains(&p)))
                .collect(),
        )
    }

    /// Returns whether the permission is granted.
    pub fn get(&self, permission: Permission) -> bool {
        self.0.get(&permission).copied().unwrap_or(false)
    }

    /// First permission without an explicit value, if any.
    pub fn first_missing(&self) -> Option<Permission> {
        Permission::ALL.into_iter().find(|p| !self.0.contains_key(p))
    }

    /// Permissions granted by this set, in declaration order.
    pub fn granted(&self) -> impl Iterator<Item = Permission> + '_ {
        self.0.iter().filter(|(_, granted)| **granted).map(|(p, _)| *p)
    }

    /// All flags, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (Permission, bool)> + '_ {
        self.0.iter().map(|(p, granted)| (*p, *granted))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_name_accepts_wire_and_client_names() {
        for p in Permission::ALL {
            assert_eq!(Permission::from_name(p.as_str()), Some(p));
            assert_eq!(Permission::from_name(p.client_name()), Some(p));
        }
    }

    #[test]
    fn from_name_rejects_unknown() {
        assert_eq!(Permission::from_name("can_fly"), None);
        assert_eq!(Permission::from_name("CAN_CREATE_SIGNALS"), None);
    }

    #[test]
    fn deserializes_client_alias() {
        let p: Permission = serde_json::from_str("\"canAccessAIAdvisor\"").unwrap();
        assert_eq!(p, Permission::CanAccessAiAdvisor);
        let p: Permission = serde_json::from_str("\"can_create_ctas\"").unwrap();
        assert_eq!(p, Permission::CanCreateCtas);
    }

    #[test]
    fn new_rejects_incomplete_flags() {
        let result = PermissionSet::new([(Permission::CanCreateSignals, true)]);
        assert_eq!(result, Err(Permission::CanAccessAffiliateTools));
    }

    #[test]
    fn new_accepts_complete_flags() {
        let set = PermissionSet::new(Permission::ALL.into_iter().map(|p| (p, false))).unwrap();
        assert_eq!(set.first_missing(), None);
        assert_eq!(set.granted().count(), 0);
    }

    #[test]
    fn granting_sets_only_listed_permissions() {
        let set = PermissionSet::granting(&[Permission::CanCreateSignals]);
        assert!(set.get(Permission::CanCreateSignals));
        assert!(!set.get(Permission::CanUseCustomDomains));
        assert_eq!(set.iter().count(), Permission::ALL.len());
    }

    #[test]
    fn set_serializes_as_map() {
        let set = PermissionSet::granting(&[Permission::CanCreateCtas]);
        let json = serde_json::to_value(&set).unwrap();
        assert_eq!(json["can_create_ctas"], true);
        assert_eq!(json["can_create_signals"], false);
    }
}
