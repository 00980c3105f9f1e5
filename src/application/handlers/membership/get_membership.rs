//! GetMembershipHandler - Query handler for retrieving membership details.

use std::sync::Arc;

use crate::domain::foundation::{Role, Timestamp, UserId};
use crate::domain::membership::{
    MembershipError, Permission, PermissionSet, TierDefinition, TierRegistry,
};
use crate::ports::SubjectReader;

/// Query to get a user's membership.
#[derive(Debug, Clone)]
pub struct GetMembershipQuery {
    pub user_id: UserId,
}

/// Membership details for UI display.
///
/// Expiry and trial fields are informational; `permissions` is computed from
/// the tier and role only.
#[derive(Debug, Clone)]
pub struct MembershipView {
    pub user_id: UserId,
    pub role: Role,
    pub tier: TierDefinition,
    /// Effective permissions (all granted for privileged roles).
    pub permissions: PermissionSet,
    pub expires_at: Option<Timestamp>,
    pub is_expired: bool,
    pub days_until_expiry: Option<u32>,
    pub is_in_trial: bool,
    pub trial_ends_at: Option<Timestamp>,
}

/// Result of successful membership query.
pub type GetMembershipResult = MembershipView;

/// Handler for retrieving membership details.
pub struct GetMembershipHandler {
    registry: Arc<TierRegistry>,
    reader: Arc<dyn SubjectReader>,
}

impl GetMembershipHandler {
    pub fn new(registry: Arc<TierRegistry>, reader: Arc<dyn SubjectReader>) -> Self {
        Self { registry, reader }
    }

    /// # Errors
    ///
    /// `NotFoundForUser` if the user has not been provisioned.
    pub async fn handle(
        &self,
        query: GetMembershipQuery,
    ) -> Result<GetMembershipResult, MembershipError> {
        let subject = self.reader.get_subject(&query.user_id).await?;
        let (role, subscription) = match subject {
            Some(subject) => match subject.subscription {
                Some(subscription) => (subject.role, subscription),
                None => return Err(MembershipError::not_found_for_user(query.user_id)),
            },
            None => return Err(MembershipError::not_found_for_user(query.user_id)),
        };

        let tier = self.registry.resolve_tier(Some(subscription.tier.as_str())).clone();
        let permissions = if role.is_privileged() {
            PermissionSet::granting(&Permission::ALL)
        } else {
            tier.permissions.clone()
        };

        let now = Timestamp::now();
        Ok(MembershipView {
            user_id: query.user_id,
            role,
            tier,
            permissions,
            expires_at: subscription.expires_at,
            is_expired: subscription.is_expired_at(&now),
            days_until_expiry: subscription.days_until_expiry(&now),
            is_in_trial: subscription.trial_active_at(&now),
            trial_ends_at: subscription.trial_ends_at,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::membership::InMemoryMembershipStore;
    use crate::config::TierConfig;
    use crate::domain::membership::{Subscription, TierId};
    use crate::ports::SubscriptionRepository;

    // ════════════════════════════════════════════════════════════════════════════
    // Test Helpers
    // ════════════════════════════════════════════════════════════════════════════

    fn test_user_id() -> UserId {
        UserId::new("test-user-123").unwrap()
    }

    fn handler(store: Arc<InMemoryMembershipStore>) -> GetMembershipHandler {
        let registry = TierConfig::default().load_registry().unwrap();
        GetMembershipHandler::new(Arc::new(registry), store)
    }

    fn query() -> GetMembershipQuery {
        GetMembershipQuery {
            user_id: test_user_id(),
        }
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Success Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn returns_membership_when_exists() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let (mut subscription, _) = Subscription::provision(test_user_id(), TierId::Vip);
        subscription.set_expiry(Some(Timestamp::now().add_days(10)));
        store.save(&subscription).await.unwrap();

        let view = handler(store).handle(query()).await.unwrap();

        assert_eq!(view.tier.id, TierId::Vip);
        assert_eq!(view.role, Role::Member);
        assert!(view.permissions.get(Permission::CanCreateSignals));
        assert!(!view.permissions.get(Permission::CanCreateCtas));
        assert!(!view.is_expired);
        assert!(matches!(view.days_until_expiry, Some(9) | Some(10)));
    }

    #[tokio::test]
    async fn expired_subscription_keeps_tier_permissions() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let (mut subscription, _) = Subscription::provision(test_user_id(), TierId::Pro);
        subscription.set_expiry(Some(Timestamp::now().minus_days(3)));
        store.save(&subscription).await.unwrap();

        let view = handler(store).handle(query()).await.unwrap();

        assert!(view.is_expired);
        assert_eq!(view.days_until_expiry, Some(0));
        assert!(view.permissions.get(Permission::CanUseCustomDomains));
    }

    #[tokio::test]
    async fn trial_window_is_reported() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let (mut subscription, _) = Subscription::provision(test_user_id(), TierId::Premium);
        subscription.start_trial(Timestamp::now().add_days(7));
        store.save(&subscription).await.unwrap();

        let view = handler(store).handle(query()).await.unwrap();

        assert!(view.is_in_trial);
        assert!(view.trial_ends_at.is_some());
    }

    #[tokio::test]
    async fn privileged_role_sees_every_permission() {
        let store = Arc::new(InMemoryMembershipStore::new());
        let (subscription, _) = Subscription::provision(test_user_id(), TierId::Free);
        store.save(&subscription).await.unwrap();
        store.set_role(&test_user_id(), Role::Admin).unwrap();

        let view = handler(store).handle(query()).await.unwrap();

        assert_eq!(view.tier.id, TierId::Free);
        assert_eq!(view.permissions.granted().count(), Permission::ALL.len());
    }

    // ════════════════════════════════════════════════════════════════════════════
    // Failure Tests
    // ════════════════════════════════════════════════════════════════════════════

    #[tokio::test]
    async fn unprovisioned_user_is_not_found() {
        let store = Arc::new(InMemoryMembershipStore::new());
        store.set_role(&test_user_id(), Role::Creator).unwrap();

        let result = handler(store).handle(query()).await;

        assert!(matches!(result, Err(MembershipError::NotFoundForUser(_))));
    }

    #[tokio::test]
    async fn unknown_user_is_not_found() {
        let result = handler(Arc::new(InMemoryMembershipStore::new()))
            .handle(query())
            .await;

        assert!(matches!(result, Err(MembershipError::NotFoundForUser(_))));
    }
}
