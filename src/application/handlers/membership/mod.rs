//! Membership handlers.
//!
//! Command and query handlers over the tier registry and the subject's
//! subscription:
//!
//! ## Commands
//! - Provisioning a subscription at the default tier
//! - Changing a subscription's tier (administrative or billing)
//!
//! ## Queries
//! - Check a permission, with an upgrade suggestion when denied
//! - Get the upgrade target for a permission or tier
//! - Get membership details

mod change_tier;
mod check_permission;
mod get_membership;
mod get_upgrade_target;
mod provision_subscription;

// Commands
pub use change_tier::{ChangeTierCommand, ChangeTierHandler, ChangeTierResult};
pub use provision_subscription::{
    ProvisionSubscriptionCommand, ProvisionSubscriptionHandler, ProvisionSubscriptionResult,
};

// Queries
pub use check_permission::{CheckPermissionHandler, CheckPermissionQuery, CheckPermissionResult};
pub use get_membership::{GetMembershipHandler, GetMembershipQuery, GetMembershipResult, MembershipView};
pub use get_upgrade_target::{
    GetUpgradeTargetHandler, GetUpgradeTargetQuery, GetUpgradeTargetResult,
};
