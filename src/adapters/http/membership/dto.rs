//! HTTP DTOs (Data Transfer Objects) for membership endpoints.
//!
//! These types define the JSON request/response structure for the membership API.
//! They serve as the boundary between HTTP and the application layer.

use serde::{Deserialize, Serialize};

use crate::application::handlers::membership::{
    CheckPermissionResult, GetUpgradeTargetResult, MembershipView,
};
use crate::domain::foundation::{Role, Timestamp};
use crate::domain::membership::{PermissionSet, Subscription, TierDefinition, TierId, TierPricing};

// ════════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// Query string for `GET /membership/upgrade`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpgradeTargetParams {
    /// Permission the user is missing.
    #[serde(default)]
    pub permission: Option<String>,
    /// Explicit tier the user wants.
    #[serde(default)]
    pub target: Option<String>,
}

/// Request to change a member's tier.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeTierRequest {
    /// Target tier id.
    pub tier: String,
    /// New end of the paid period (ISO 8601).
    #[serde(default)]
    pub expires_at: Option<Timestamp>,
    /// Start a trial ending at this time (ISO 8601).
    #[serde(default)]
    pub trial_ends_at: Option<Timestamp>,
}

// ════════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════════

/// One tier as shown to clients.
#[derive(Debug, Clone, Serialize)]
pub struct TierResponse {
    pub id: TierId,
    pub name: String,
    pub order: u32,
    pub is_default: bool,
    pub permissions: PermissionSet,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pricing: Option<TierPricing>,
}

impl From<&TierDefinition> for TierResponse {
    fn from(tier: &TierDefinition) -> Self {
        Self {
            id: tier.id,
            name: tier.name.clone(),
            order: tier.order,
            is_default: tier.is_default,
            permissions: tier.permissions.clone(),
            pricing: tier.pricing.clone(),
        }
    }
}

/// Public tier listing.
#[derive(Debug, Clone, Serialize)]
pub struct TierListResponse {
    pub tiers: Vec<TierResponse>,
}

/// Membership details for the current user.
#[derive(Debug, Clone, Serialize)]
pub struct MembershipResponse {
    pub user_id: String,
    pub role: Role,
    pub tier: TierResponse,
    /// Effective permissions (tier flags, or everything for privileged roles).
    pub permissions: PermissionSet,
    /// End of the paid period (ISO 8601).
    pub expires_at: Option<String>,
    /// Display only; expired subscriptions keep their tier.
    pub is_expired: bool,
    pub days_until_expiry: Option<u32>,
    pub is_in_trial: bool,
    pub trial_ends_at: Option<String>,
}

impl From<MembershipView> for MembershipResponse {
    fn from(view: MembershipView) -> Self {
        Self {
            user_id: view.user_id.to_string(),
            role: view.role,
            tier: TierResponse::from(&view.tier),
            permissions: view.permissions,
            expires_at: view.expires_at.map(|t| t.to_rfc3339()),
            is_expired: view.is_expired,
            days_until_expiry: view.days_until_expiry,
            is_in_trial: view.is_in_trial,
            trial_ends_at: view.trial_ends_at.map(|t| t.to_rfc3339()),
        }
    }
}

/// Subscription state after a command.
#[derive(Debug, Clone, Serialize)]
pub struct SubscriptionResponse {
    pub user_id: String,
    pub tier: TierId,
    pub expires_at: Option<String>,
    pub is_in_trial: bool,
    pub trial_ends_at: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<&Subscription> for SubscriptionResponse {
    fn from(subscription: &Subscription) -> Self {
        Self {
            user_id: subscription.user_id.to_string(),
            tier: subscription.tier,
            expires_at: subscription.expires_at.map(|t| t.to_rfc3339()),
            is_in_trial: subscription.is_in_trial,
            trial_ends_at: subscription.trial_ends_at.map(|t| t.to_rfc3339()),
            created_at: subscription.created_at.to_rfc3339(),
            updated_at: subscription.updated_at.to_rfc3339(),
        }
    }
}

/// Response for a tier change.
#[derive(Debug, Clone, Serialize)]
pub struct ChangeTierResponse {
    pub previous_tier: TierId,
    pub changed: bool,
    pub subscription: SubscriptionResponse,
}

/// Result of a permission check.
#[derive(Debug, Clone, Serialize)]
pub struct PermissionCheckResponse {
    /// Permission name as requested.
    pub permission: String,
    pub granted: bool,
    pub tier: TierId,
    pub role: Role,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub upgrade_to: Option<TierId>,
    /// Denial message suitable for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl PermissionCheckResponse {
    pub fn from_result(requested: String, result: CheckPermissionResult) -> Self {
        let message = match (result.granted, result.permission, &result.upgrade_to) {
            (false, Some(permission), Some(tier)) => Some(format!(
                "{} requires the {} tier",
                permission.feature_name(),
                tier.name
            )),
            (false, Some(permission), None) => {
                Some(format!("{} is not available", permission.feature_name()))
            }
            (false, None, _) => Some(format!("Unknown permission: {}", requested)),
            (true, _, _) => None,
        };

        Self {
            permission: requested,
            granted: result.granted,
            tier: result.tier,
            role: result.role,
            upgrade_to: result.upgrade_to.map(|t| t.id),
            message,
        }
    }
}

/// Suggested upgrade.
#[derive(Debug, Clone, Serialize)]
pub struct UpgradeTargetResponse {
    pub current: TierId,
    pub target: Option<TierResponse>,
    pub is_upgrade: bool,
}

impl From<GetUpgradeTargetResult> for UpgradeTargetResponse {
    fn from(result: GetUpgradeTargetResult) -> Self {
        Self {
            current: result.current,
            target: result.target.as_ref().map(TierResponse::from),
            is_upgrade: result.is_upgrade,
        }
    }
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling.
    pub error_code: String,
    /// Human-readable error message.
    pub message: String,
    /// Additional details (optional).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// Create a new error response.
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: None,
        }
    }

    /// Create an error response with details.
    pub fn with_details(
        error_code: impl Into<String>,
        message: impl Into<String>,
        details: serde_json::Value,
    ) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            details: Some(details),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;
    use crate::domain::membership::Permission;

    #[test]
    fn upgrade_params_are_optional() {
        let params: UpgradeTargetParams = serde_json::from_str("{}").unwrap();
        assert!(params.permission.is_none());
        assert!(params.target.is_none());
    }

    #[test]
    fn change_tier_request_parses_timestamps() {
        let request: ChangeTierRequest = serde_json::from_str(
            r#"{ "tier": "vip", "expires_at": "2030-01-01T00:00:00Z" }"#,
        )
        .unwrap();
        assert_eq!(request.tier, "vip");
        assert!(request.expires_at.is_some());
        assert!(request.trial_ends_at.is_none());
    }

    #[test]
    fn tier_response_serializes_permission_map() {
        let tier = TierDefinition::new(
            TierId::Premium,
            2,
            PermissionSet::granting(&[Permission::CanCreateSignals]),
        );
        let json = serde_json::to_value(TierResponse::from(&tier)).unwrap();

        assert_eq!(json["id"], "premium");
        assert_eq!(json["name"], "Premium");
        assert_eq!(json["permissions"]["can_create_signals"], true);
        assert_eq!(json["permissions"]["can_create_ctas"], false);
        assert!(json.get("pricing").is_none());
    }

    #[test]
    fn subscription_response_uses_rfc3339() {
        let (subscription, _) =
            Subscription::provision(UserId::new("u-1").unwrap(), TierId::Free);
        let response = SubscriptionResponse::from(&subscription);

        assert_eq!(response.user_id, "u-1");
        assert!(response.created_at.contains('T'));
        assert!(response.expires_at.is_none());
    }

    #[test]
    fn denied_check_carries_upgrade_message() {
        let result = CheckPermissionResult {
            granted: false,
            tier: TierId::Free,
            role: Role::Member,
            permission: Some(Permission::CanCreateSignals),
            upgrade_to: Some(TierDefinition::new(TierId::Vip, 3, PermissionSet::granting(&[]))),
        };

        let response = PermissionCheckResponse::from_result("canCreateSignals".into(), result);

        assert_eq!(response.permission, "canCreateSignals");
        assert_eq!(
            response.message.as_deref(),
            Some("Signal creation requires the VIP tier")
        );
        assert_eq!(response.upgrade_to, Some(TierId::Vip));
    }

    #[test]
    fn denial_message_uses_configured_tier_name() {
        let founding = TierDefinition {
            name: "Founding Member".to_string(),
            ..TierDefinition::new(TierId::Lifetime, 5, PermissionSet::granting(&[]))
        };
        let result = CheckPermissionResult {
            granted: false,
            tier: TierId::Pro,
            role: Role::Member,
            permission: Some(Permission::CanDuplicateCourses),
            upgrade_to: Some(founding),
        };

        let json = serde_json::to_value(PermissionCheckResponse::from_result(
            "can_duplicate_courses".into(),
            result,
        ))
        .unwrap();

        assert_eq!(json["upgrade_to"], "lifetime");
        assert_eq!(
            json["message"],
            format!(
                "{} requires the Founding Member tier",
                Permission::CanDuplicateCourses.feature_name()
            )
        );
    }

    #[test]
    fn granted_check_has_no_message() {
        let result = CheckPermissionResult {
            granted: true,
            tier: TierId::Pro,
            role: Role::Creator,
            permission: Some(Permission::CanCreateCtas),
            upgrade_to: None,
        };

        let json =
            serde_json::to_value(PermissionCheckResponse::from_result("can_create_ctas".into(), result))
                .unwrap();

        assert_eq!(json["granted"], true);
        assert!(json.get("message").is_none());
        assert!(json.get("upgrade_to").is_none());
    }

    #[test]
    fn error_response_serializes_without_details_when_none() {
        let response = ErrorResponse::new("NOT_FOUND", "Not found");
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("details"));
    }

    #[test]
    fn error_response_with_details_includes_details() {
        let details = serde_json::json!({"field": "tier"});
        let response = ErrorResponse::with_details("INVALID_TIER", "Invalid", details.clone());
        assert_eq!(response.details, Some(details));
    }
}
