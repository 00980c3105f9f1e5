//! In-memory subject and subscription store.
//!
//! Implements both membership ports over shared maps. Suitable for
//! development, tests, and single-process deployments where the subject
//! record lives in memory. Nothing is persisted across restarts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, Role, UserId};
use crate::domain::membership::{Subject, Subscription};
use crate::ports::{SubjectReader, SubscriptionRepository};

/// In-memory implementation of `SubjectReader` and `SubscriptionRepository`.
///
/// A subject is known when it has a role or a subscription. Users with a
/// subscription but no registered role read back as `Role::Member`.
///
/// # Example
///
/// ```ignore
/// let store = Arc::new(InMemoryMembershipStore::new());
/// store.set_role(&admin_id, Role::Admin)?;
///
/// let reader: Arc<dyn SubjectReader> = store.clone();
/// let repo: Arc<dyn SubscriptionRepository> = store;
/// ```
#[derive(Default)]
pub struct InMemoryMembershipStore {
    roles: RwLock<HashMap<UserId, Role>>,
    subscriptions: RwLock<HashMap<UserId, Subscription>>,
}

impl InMemoryMembershipStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers or replaces the role of a subject.
    pub fn set_role(&self, user_id: &UserId, role: Role) -> Result<(), DomainError> {
        self.roles
            .write()
            .map_err(|_| lock_poisoned("roles"))?
            .insert(user_id.clone(), role);
        Ok(())
    }

    /// Number of stored subscriptions.
    pub fn subscription_count(&self) -> usize {
        self.subscriptions.read().map(|s| s.len()).unwrap_or(0)
    }
}

fn lock_poisoned(map: &str) -> DomainError {
    DomainError::new(
        ErrorCode::InternalError,
        format!("InMemoryMembershipStore: {} lock poisoned", map),
    )
}

#[async_trait]
impl SubjectReader for InMemoryMembershipStore {
    async fn get_subject(&self, user_id: &UserId) -> Result<Option<Subject>, DomainError> {
        let role = self
            .roles
            .read()
            .map_err(|_| lock_poisoned("roles"))?
            .get(user_id)
            .copied();
        let subscription = self
            .subscriptions
            .read()
            .map_err(|_| lock_poisoned("subscriptions"))?
            .get(user_id)
            .cloned();

        if role.is_none() && subscription.is_none() {
            return Ok(None);
        }

        Ok(Some(Subject {
            user_id: user_id.clone(),
            role: role.unwrap_or_default(),
            subscription,
        }))
    }
}

#[async_trait]
impl SubscriptionRepository for InMemoryMembershipStore {
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut subscriptions = self
            .subscriptions
            .write()
            .map_err(|_| lock_poisoned("subscriptions"))?;

        if subscriptions.contains_key(&subscription.user_id) {
            return Err(DomainError::new(
                ErrorCode::MembershipExists,
                format!("User {} already has a membership", subscription.user_id),
            ));
        }

        subscriptions.insert(subscription.user_id.clone(), subscription.clone());
        Ok(())
    }

    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError> {
        let mut subscriptions = self
            .subscriptions
            .write()
            .map_err(|_| lock_poisoned("subscriptions"))?;

        match subscriptions.get_mut(&subscription.user_id) {
            Some(existing) => {
                *existing = subscription.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::MembershipNotFound,
                format!("No membership found for user: {}", subscription.user_id),
            )),
        }
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError> {
        Ok(self
            .subscriptions
            .read()
            .map_err(|_| lock_poisoned("subscriptions"))?
            .get(user_id)
            .cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::membership::{TierChangeSource, TierId};

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn unknown_user_has_no_subject() {
        let store = InMemoryMembershipStore::new();
        assert!(store.get_subject(&user("ghost")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn role_only_subject_is_unprovisioned() {
        let store = InMemoryMembershipStore::new();
        store.set_role(&user("mod"), Role::Moderator).unwrap();

        let subject = store.get_subject(&user("mod")).await.unwrap().unwrap();
        assert_eq!(subject.role, Role::Moderator);
        assert!(subject.subscription.is_none());
    }

    #[tokio::test]
    async fn saved_subscription_defaults_to_member_role() {
        let store = InMemoryMembershipStore::new();
        let (subscription, _) = Subscription::provision(user("u1"), TierId::Free);
        store.save(&subscription).await.unwrap();

        let subject = store.get_subject(&user("u1")).await.unwrap().unwrap();
        assert_eq!(subject.role, Role::Member);
        assert_eq!(subject.subscription, Some(subscription));
        assert_eq!(store.subscription_count(), 1);
    }

    #[tokio::test]
    async fn save_twice_is_rejected() {
        let store = InMemoryMembershipStore::new();
        let (subscription, _) = Subscription::provision(user("u1"), TierId::Free);
        store.save(&subscription).await.unwrap();

        let err = store.save(&subscription).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MembershipExists);
    }

    #[tokio::test]
    async fn update_replaces_stored_subscription() {
        let store = InMemoryMembershipStore::new();
        let (mut subscription, _) = Subscription::provision(user("u1"), TierId::Free);
        store.save(&subscription).await.unwrap();

        subscription.change_tier(TierId::Vip, TierChangeSource::BillingEvent, None);
        store.update(&subscription).await.unwrap();

        let found = store.find_by_user(&user("u1")).await.unwrap().unwrap();
        assert_eq!(found.tier, TierId::Vip);
    }

    #[tokio::test]
    async fn update_missing_subscription_fails() {
        let store = InMemoryMembershipStore::new();
        let (subscription, _) = Subscription::provision(user("u1"), TierId::Free);

        let err = store.update(&subscription).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::MembershipNotFound);
    }
}
