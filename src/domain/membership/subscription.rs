//! Subscription aggregate.
//!
//! A subscription is owned by the subject record: it is created when the
//! subject is provisioned and only its tier changes afterwards.
//!
//! # Design Decisions
//!
//! - **No forbidden edges**: any tier may change to any other tier
//! - **Expiry and trial are informational**: neither changes effective
//!   permissions; the resolver only looks at `tier`

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Timestamp, UserId};

use super::{MembershipEvent, TierChangeSource, TierId};

/// A subject's membership subscription.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscription {
    /// Subject who owns this subscription.
    pub user_id: UserId,

    /// Current tier.
    pub tier: TierId,

    /// When the paid period ends, if it ends at all.
    pub expires_at: Option<Timestamp>,

    /// Whether the subject is in a trial window.
    pub is_in_trial: bool,

    /// When the trial window ends.
    pub trial_ends_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

impl Subscription {
    /// Provision a new subscription at the given default tier.
    pub fn provision(user_id: UserId, default_tier: TierId) -> (Self, MembershipEvent) {
        let now = Timestamp::now();
        let subscription = Self {
            user_id: user_id.clone(),
            tier: default_tier,
            expires_at: None,
            is_in_trial: false,
            trial_ends_at: None,
            created_at: now,
            updated_at: now,
        };
        let event = MembershipEvent::Provisioned {
            user_id,
            tier: default_tier,
            occurred_at: now,
        };
        (subscription, event)
    }

    /// Change the tier.
    ///
    /// Returns `None` when `new_tier` equals the current tier (nothing changes).
    pub fn change_tier(
        &mut self,
        new_tier: TierId,
        source: TierChangeSource,
        changed_by: Option<UserId>,
    ) -> Option<MembershipEvent> {
        if new_tier == self.tier {
            return None;
        }

        let previous_tier = self.tier;
        let now = Timestamp::now();
        self.tier = new_tier;
        self.updated_at = now;

        Some(MembershipEvent::TierChanged {
            user_id: self.user_id.clone(),
            previous_tier,
            new_tier,
            source,
            changed_by,
            occurred_at: now,
        })
    }

    /// Set or clear the end of the paid period.
    pub fn set_expiry(&mut self, expires_at: Option<Timestamp>) {
        self.expires_at = expires_at;
        self.updated_at = Timestamp::now();
    }

    /// Start a trial window ending at `ends_at`.
    pub fn start_trial(&mut self, ends_at: Timestamp) {
        self.is_in_trial = true;
        self.trial_ends_at = Some(ends_at);
        self.updated_at = Timestamp::now();
    }

    /// Whether `expires_at` lies before `now`. Display only.
    pub fn is_expired_at(&self, now: &Timestamp) -> bool {
        self.expires_at
            .map(|expires_at| expires_at.is_before(now))
            .unwrap_or(false)
    }

    /// Whole days until expiry; 0 once expired, `None` if it never expires.
    pub fn days_until_expiry(&self, now: &Timestamp) -> Option<u32> {
        self.expires_at
            .map(|expires_at| expires_at.duration_since(now).num_days().max(0) as u32)
    }

    /// Whether the trial window is still open at `now`.
    pub fn trial_active_at(&self, now: &Timestamp) -> bool {
        self.is_in_trial
            && self
                .trial_ends_at
                .map(|ends_at| ends_at.is_after(now))
                .unwrap_or(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provisioned() -> Subscription {
        Subscription::provision(UserId::new("user-1").unwrap(), TierId::Free).0
    }

    #[test]
    fn provision_starts_at_default_tier() {
        let (subscription, event) =
            Subscription::provision(UserId::new("user-1").unwrap(), TierId::Free);
        assert_eq!(subscription.tier, TierId::Free);
        assert!(subscription.expires_at.is_none());
        assert!(!subscription.is_in_trial);
        assert!(matches!(
            event,
            MembershipEvent::Provisioned { tier: TierId::Free, .. }
        ));
    }

    #[test]
    fn change_tier_emits_event() {
        let mut subscription = provisioned();
        let event = subscription
            .change_tier(TierId::Vip, TierChangeSource::BillingEvent, None)
            .unwrap();
        assert_eq!(subscription.tier, TierId::Vip);
        assert!(matches!(
            event,
            MembershipEvent::TierChanged {
                previous_tier: TierId::Free,
                new_tier: TierId::Vip,
                ..
            }
        ));
    }

    #[test]
    fn downgrade_is_allowed() {
        let mut subscription = provisioned();
        subscription.change_tier(TierId::Lifetime, TierChangeSource::Administrative, None);
        let event = subscription.change_tier(TierId::Premium, TierChangeSource::Administrative, None);
        assert!(event.is_some());
        assert_eq!(subscription.tier, TierId::Premium);
    }

    #[test]
    fn change_to_same_tier_is_noop() {
        let mut subscription = provisioned();
        let before = subscription.updated_at;
        assert!(subscription
            .change_tier(TierId::Free, TierChangeSource::Administrative, None)
            .is_none());
        assert_eq!(subscription.updated_at, before);
    }

    #[test]
    fn expiry_is_reported_not_enforced() {
        let mut subscription = provisioned();
        let now = Timestamp::now();
        subscription.set_expiry(Some(now.minus_days(1)));
        assert!(subscription.is_expired_at(&now));
        assert_eq!(subscription.days_until_expiry(&now), Some(0));
        assert_eq!(subscription.tier, TierId::Free);
    }

    #[test]
    fn no_expiry_never_expires() {
        let subscription = provisioned();
        let now = Timestamp::now();
        assert!(!subscription.is_expired_at(&now));
        assert_eq!(subscription.days_until_expiry(&now), None);
    }

    #[test]
    fn days_until_expiry_counts_whole_days() {
        let mut subscription = provisioned();
        let now = Timestamp::now();
        subscription.set_expiry(Some(now.add_days(10)));
        assert_eq!(subscription.days_until_expiry(&now), Some(10));
    }

    #[test]
    fn trial_window() {
        let mut subscription = provisioned();
        let now = Timestamp::now();
        subscription.start_trial(now.add_days(7));
        assert!(subscription.trial_active_at(&now));
        assert!(!subscription.trial_active_at(&now.add_days(8)));
    }
}
