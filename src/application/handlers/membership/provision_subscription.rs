//! ProvisionSubscriptionHandler - Command handler for provisioning a subject.

use std::sync::Arc;

use crate::domain::foundation::{EventEnvelope, UserId};
use crate::domain::membership::{MembershipError, MembershipEvent, Subscription, TierRegistry};
use crate::ports::{EventPublisher, SubscriptionRepository};

/// Command to provision a subscription at the default tier.
#[derive(Debug, Clone)]
pub struct ProvisionSubscriptionCommand {
    pub user_id: UserId,
}

/// Result of successful provisioning.
#[derive(Debug, Clone)]
pub struct ProvisionSubscriptionResult {
    pub subscription: Subscription,
    pub event: MembershipEvent,
}

/// Handler for provisioning subscriptions.
pub struct ProvisionSubscriptionHandler {
    registry: Arc<TierRegistry>,
    repository: Arc<dyn SubscriptionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ProvisionSubscriptionHandler {
    pub fn new(
        registry: Arc<TierRegistry>,
        repository: Arc<dyn SubscriptionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            registry,
            repository,
            event_publisher,
        }
    }

    pub async fn handle(
        &self,
        cmd: ProvisionSubscriptionCommand,
    ) -> Result<ProvisionSubscriptionResult, MembershipError> {
        // 1. Check if user already has a subscription
        if self.repository.find_by_user(&cmd.user_id).await?.is_some() {
            return Err(MembershipError::already_exists(cmd.user_id));
        }

        // 2. Create at the default tier
        let default_tier = self.registry.default_tier().id;
        let (subscription, event) = Subscription::provision(cmd.user_id, default_tier);

        // 3. Persist (a concurrent provision may have won the race)
        self.repository
            .save(&subscription)
            .await
            .map_err(|e| MembershipError::from_repository(&subscription.user_id, e))?;

        // 4. Publish
        self.event_publisher
            .publish(EventEnvelope::from_event(&event))
            .await?;

        tracing::info!(
            user_id = %subscription.user_id,
            tier = %default_tier,
            "Subscription provisioned"
        );

        Ok(ProvisionSubscriptionResult {
            subscription,
            event,
        })
    }
}
