//! Subject snapshot handed to gating decisions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Role, UserId};

use super::Subscription;

/// The user whose tier and role are being evaluated.
///
/// A snapshot: it reflects the subject as of the last read and may lag
/// behind the latest committed tier change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub user_id: UserId,
    pub role: Role,
    pub subscription: Option<Subscription>,
}

impl Subject {
    /// A subject with no subscription yet.
    pub fn new(user_id: UserId, role: Role) -> Self {
        Self {
            user_id,
            role,
            subscription: None,
        }
    }

    pub fn with_subscription(mut self, subscription: Subscription) -> Self {
        self.subscription = Some(subscription);
        self
    }

    /// Tier id to hand to the resolver; `None` when unprovisioned.
    pub fn tier_key(&self) -> Option<&'static str> {
        self.subscription.as_ref().map(|s| s.tier.as_str())
    }

    pub fn is_privileged(&self) -> bool {
        self.role.is_privileged()
    }
}
