//! GetUpgradeTargetHandler - Query handler for upgrade suggestions.

use std::sync::Arc;

use crate::domain::foundation::UserId;
use crate::domain::membership::{
    MembershipError, Permission, Subject, TierDefinition, TierId, TierRegistry,
};
use crate::ports::SubjectReader;

/// Query for the tier a user should upgrade to.
///
/// `target` takes precedence over `permission`. With neither, the next
/// visible tier is suggested.
#[derive(Debug, Clone)]
pub struct GetUpgradeTargetQuery {
    pub user_id: UserId,
    pub permission: Option<String>,
    pub target: Option<String>,
}

/// Result of an upgrade target query.
#[derive(Debug, Clone)]
pub struct GetUpgradeTargetResult {
    pub current: TierId,
    /// `None` when the user is at or above the highest visible tier.
    pub target: Option<TierDefinition>,
    /// Whether moving to `target` is strictly upward.
    pub is_upgrade: bool,
}

/// Handler for upgrade target queries.
pub struct GetUpgradeTargetHandler {
    registry: Arc<TierRegistry>,
    reader: Arc<dyn SubjectReader>,
}

impl GetUpgradeTargetHandler {
    pub fn new(registry: Arc<TierRegistry>, reader: Arc<dyn SubjectReader>) -> Self {
        Self { registry, reader }
    }

    pub async fn handle(
        &self,
        query: GetUpgradeTargetQuery,
    ) -> Result<GetUpgradeTargetResult, MembershipError> {
        let subject = self.reader.get_subject(&query.user_id).await?;
        let tier_key = subject.as_ref().and_then(Subject::tier_key);

        // Unknown permission names fall through to the next visible tier.
        let explicit = query.target.as_deref().or_else(|| {
            query
                .permission
                .as_deref()
                .and_then(Permission::from_name)
                .and_then(|p| self.registry.lowest_tier_granting(p))
                .map(|t| t.id.as_str())
        });

        let target = self.registry.upgrade_target(tier_key, explicit).cloned();
        let is_upgrade = target
            .as_ref()
            .map(|t| self.registry.can_upgrade(tier_key, Some(t.id.as_str())))
            .unwrap_or(false);

        Ok(GetUpgradeTargetResult {
            current: self.registry.resolve_tier(tier_key).id,
            target,
            is_upgrade,
        })
    }
}
