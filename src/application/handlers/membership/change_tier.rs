//! ChangeTierHandler - Command handler for tier changes.
//!
//! Tier changes are driven from outside the resolver: an administrator
//! acting by hand, or a successful billing event. Any tier may change to any
//! other configured tier.

use std::sync::Arc;

use crate::domain::foundation::{EventEnvelope, Timestamp, UserId};
use crate::domain::membership::{
    MembershipError, MembershipEvent, Subscription, TierChangeSource, TierId, TierRegistry,
};
use crate::ports::{EventPublisher, SubjectReader, SubscriptionRepository};

/// Command to change a user's tier.
#[derive(Debug, Clone)]
pub struct ChangeTierCommand {
    pub user_id: UserId,
    /// Requested tier id as received.
    pub new_tier: String,
    pub source: TierChangeSource,
    /// Acting administrator. Required for administrative changes.
    pub changed_by: Option<UserId>,
    /// New end of the paid period, if the change sets one.
    pub expires_at: Option<Timestamp>,
    /// Starts a trial ending at this time.
    pub trial_ends_at: Option<Timestamp>,
}

/// Result of a tier change.
#[derive(Debug, Clone)]
pub struct ChangeTierResult {
    pub subscription: Subscription,
    pub previous_tier: TierId,
    /// Events in publication order. Empty when nothing changed.
    pub events: Vec<MembershipEvent>,
}

/// Handler for tier changes.
pub struct ChangeTierHandler {
    registry: Arc<TierRegistry>,
    reader: Arc<dyn SubjectReader>,
    repository: Arc<dyn SubscriptionRepository>,
    event_publisher: Arc<dyn EventPublisher>,
}

impl ChangeTierHandler {
    pub fn new(
        registry: Arc<TierRegistry>,
        reader: Arc<dyn SubjectReader>,
        repository: Arc<dyn SubscriptionRepository>,
        event_publisher: Arc<dyn EventPublisher>,
    ) -> Self {
        Self {
            registry,
            reader,
            repository,
            event_publisher,
        }
    }

    pub async fn handle(&self, cmd: ChangeTierCommand) -> Result<ChangeTierResult, MembershipError> {
        // 1. The target must be a configured tier
        let new_tier = cmd
            .new_tier
            .parse::<TierId>()
            .ok()
            .filter(|id| self.registry.contains(*id))
            .ok_or_else(|| MembershipError::invalid_tier(cmd.new_tier.clone()))?;

        // 2. Administrative changes require a privileged actor
        if cmd.source == TierChangeSource::Administrative {
            self.authorize(cmd.changed_by.as_ref()).await?;
        }

        // 3. Load, or provision on the fly
        let mut events = Vec::new();
        let (mut subscription, is_new) = match self.repository.find_by_user(&cmd.user_id).await? {
            Some(subscription) => (subscription, false),
            None => {
                let (subscription, event) =
                    Subscription::provision(cmd.user_id.clone(), self.registry.default_tier().id);
                events.push(event);
                (subscription, true)
            }
        };
        let previous_tier = subscription.tier;

        // 4. Apply
        if let Some(event) = subscription.change_tier(new_tier, cmd.source, cmd.changed_by.clone()) {
            events.push(event);
        }
        if let Some(expires_at) = cmd.expires_at {
            subscription.set_expiry(Some(expires_at));
        }
        if let Some(trial_ends_at) = cmd.trial_ends_at {
            subscription.start_trial(trial_ends_at);
        }

        // 5. Persist (a concurrent provision may have won the race)
        let persisted = if is_new {
            self.repository.save(&subscription).await
        } else {
            self.repository.update(&subscription).await
        };
        persisted.map_err(|e| MembershipError::from_repository(&cmd.user_id, e))?;

        // 6. Publish
        let envelopes = events.iter().map(EventEnvelope::from_event).collect();
        self.event_publisher.publish_all(envelopes).await?;

        if previous_tier != new_tier {
            tracing::info!(
                user_id = %cmd.user_id,
                previous_tier = %previous_tier,
                new_tier = %new_tier,
                source = ?cmd.source,
                changed_by = ?cmd.changed_by.as_ref().map(UserId::as_str),
                "Tier changed"
            );
        }

        Ok(ChangeTierResult {
            subscription,
            previous_tier,
            events,
        })
    }

    async fn authorize(&self, actor: Option<&UserId>) -> Result<(), MembershipError> {
        let actor = actor.ok_or_else(|| {
            MembershipError::validation("changed_by", "Administrative changes need an actor")
        })?;

        let privileged = self
            .reader
            .get_subject(actor)
            .await?
            .map(|subject| subject.is_privileged())
            .unwrap_or(false);

        if !privileged {
            tracing::warn!(actor = %actor, "Tier change rejected: actor is not privileged");
            return Err(MembershipError::forbidden(actor.clone()));
        }
        Ok(())
    }
}
