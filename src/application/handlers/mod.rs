//! Application handlers.
//!
//! Command and query handlers that orchestrate domain operations.

pub mod membership;

pub use membership::{
    ChangeTierCommand, ChangeTierHandler, ChangeTierResult, CheckPermissionHandler,
    CheckPermissionQuery, CheckPermissionResult, GetMembershipHandler, GetMembershipQuery,
    GetMembershipResult, GetUpgradeTargetHandler, GetUpgradeTargetQuery, GetUpgradeTargetResult,
    MembershipView, ProvisionSubscriptionCommand, ProvisionSubscriptionHandler,
    ProvisionSubscriptionResult,
};
