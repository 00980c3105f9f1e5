//! Membership domain events.
//!
//! Emitted when a subscription is provisioned or its tier changes. Consumers
//! use them for audit logging and cache invalidation.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{DomainEvent, Timestamp, UserId};

use super::TierId;

/// What triggered a tier change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierChangeSource {
    /// An administrator changed the tier by hand.
    Administrative,
    /// A successful billing event (purchase, renewal, plan change).
    BillingEvent,
}

/// Events that occur during the subscription lifecycle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MembershipEvent {
    /// A subject was provisioned at the default tier.
    Provisioned {
        user_id: UserId,
        tier: TierId,
        occurred_at: Timestamp,
    },

    /// The subject's tier was changed. Any direction is allowed.
    TierChanged {
        user_id: UserId,
        previous_tier: TierId,
        new_tier: TierId,
        source: TierChangeSource,
        changed_by: Option<UserId>,
        occurred_at: Timestamp,
    },
}

impl MembershipEvent {
    pub fn user_id(&self) -> &UserId {
        match self {
            MembershipEvent::Provisioned { user_id, .. }
            | MembershipEvent::TierChanged { user_id, .. } => user_id,
        }
    }
}

impl DomainEvent for MembershipEvent {
    fn event_type(&self) -> &'static str {
        match self {
            MembershipEvent::Provisioned { .. } => "membership.provisioned.v1",
            MembershipEvent::TierChanged { .. } => "membership.tier_changed.v1",
        }
    }

    fn aggregate_id(&self) -> String {
        self.user_id().to_string()
    }

    fn aggregate_type(&self) -> &'static str {
        "Subscription"
    }

    fn occurred_at(&self) -> Timestamp {
        match self {
            MembershipEvent::Provisioned { occurred_at, .. }
            | MembershipEvent::TierChanged { occurred_at, .. } => *occurred_at,
        }
    }
}
