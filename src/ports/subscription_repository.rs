//! Subscription repository port (write side).
//!
//! Persists the Subscription aggregate owned by a subject record.
//!
//! # Design
//!
//! - **One per user**: at most one subscription per user id
//! - **Serialized writes**: the implementation owns write ordering; the
//!   resolver only ever reads snapshots

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, UserId};
use crate::domain::membership::Subscription;

/// Repository port for Subscription persistence.
#[async_trait]
pub trait SubscriptionRepository: Send + Sync {
    /// Save a new subscription.
    ///
    /// # Errors
    ///
    /// - `MembershipExists` if the user already has a subscription
    /// - `DatabaseError` on persistence failure
    async fn save(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Update an existing subscription.
    ///
    /// # Errors
    ///
    /// - `MembershipNotFound` if the subscription doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn update(&self, subscription: &Subscription) -> Result<(), DomainError>;

    /// Find the subscription for a user.
    ///
    /// Returns `None` if the user has not been provisioned.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Option<Subscription>, DomainError>;
}
