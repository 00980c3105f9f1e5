//! CheckPermissionHandler - Query handler for feature gating.
//!
//! This is the most frequently called query. It never fails on unknown tier
//! ids or permission names; both resolve to "not granted".

use std::sync::Arc;

use crate::domain::foundation::{Role, UserId};
use crate::domain::membership::{
    MembershipError, Permission, Subject, TierDefinition, TierId, TierRegistry,
};
use crate::ports::SubjectReader;

/// Query to check whether a user holds a permission.
#[derive(Debug, Clone)]
pub struct CheckPermissionQuery {
    pub user_id: UserId,
    /// Wire or client permission name, as sent by the caller.
    pub permission: String,
}

/// Result of a permission check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckPermissionResult {
    pub granted: bool,
    /// The tier the decision was made against (after fallback).
    pub tier: TierId,
    pub role: Role,
    /// Recognized permission, `None` for unknown names.
    pub permission: Option<Permission>,
    /// Cheapest visible tier above the current one that grants the
    /// permission, as configured. Only set when access is denied.
    pub upgrade_to: Option<TierDefinition>,
}

/// Handler for permission checks.
///
/// Unprovisioned or unknown subjects are evaluated as members at the default
/// tier.
pub struct CheckPermissionHandler {
    registry: Arc<TierRegistry>,
    reader: Arc<dyn SubjectReader>,
}

impl CheckPermissionHandler {
    pub fn new(registry: Arc<TierRegistry>, reader: Arc<dyn SubjectReader>) -> Self {
        Self { registry, reader }
    }

    pub async fn handle(
        &self,
        query: CheckPermissionQuery,
    ) -> Result<CheckPermissionResult, MembershipError> {
        let subject = self.reader.get_subject(&query.user_id).await?;
        let tier_key = subject.as_ref().and_then(Subject::tier_key);
        let role = subject.as_ref().map(|s| s.role).unwrap_or_default();

        let tier = self.registry.resolve_tier(tier_key).id;
        let permission = Permission::from_name(&query.permission);
        let granted =
            self.registry
                .has_permission_named(tier_key, &query.permission, role.is_privileged());

        let upgrade_to = if granted {
            None
        } else {
            permission.and_then(|p| self.upgrade_for(tier_key, p))
        };

        tracing::debug!(
            user_id = %query.user_id,
            permission = %query.permission,
            tier = %tier,
            role = %role,
            granted,
            "Permission check"
        );

        Ok(CheckPermissionResult {
            granted,
            tier,
            role,
            permission,
            upgrade_to,
        })
    }

    fn upgrade_for(
        &self,
        current: Option<&str>,
        permission: Permission,
    ) -> Option<TierDefinition> {
        let lowest = self.registry.lowest_tier_granting(permission)?;
        let target = Some(lowest.id.as_str());
        if !self.registry.can_upgrade(current, target) {
            return None;
        }
        self.registry.upgrade_target(current, target).cloned()
    }
}
