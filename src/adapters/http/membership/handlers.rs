//! HTTP handlers for membership endpoints.
//!
//! These handlers connect Axum routes to application layer command/query handlers.

use std::sync::Arc;

use async_trait::async_trait;
use axum::extract::{Json, Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;

use crate::application::handlers::membership::{
    ChangeTierCommand, ChangeTierHandler, CheckPermissionHandler, CheckPermissionQuery,
    GetMembershipHandler, GetMembershipQuery, GetUpgradeTargetHandler, GetUpgradeTargetQuery,
    ProvisionSubscriptionCommand, ProvisionSubscriptionHandler,
};
use crate::domain::foundation::UserId;
use crate::domain::membership::{MembershipError, TierChangeSource, TierRegistry};
use crate::ports::{EventPublisher, SubjectReader, SubscriptionRepository};

use super::dto::{
    ChangeTierRequest, ChangeTierResponse, ErrorResponse, MembershipResponse,
    PermissionCheckResponse, SubscriptionResponse, TierListResponse, TierResponse,
    UpgradeTargetParams, UpgradeTargetResponse,
};

// ════════════════════════════════════════════════════════════════════════════════
// Application State
// ════════════════════════════════════════════════════════════════════════════════

/// Shared application state containing all dependencies.
///
/// This struct is cloned for each request and contains Arc-wrapped dependencies
/// for efficient sharing across handlers.
#[derive(Clone)]
pub struct MembershipAppState {
    pub registry: Arc<TierRegistry>,
    pub subject_reader: Arc<dyn SubjectReader>,
    pub subscription_repository: Arc<dyn SubscriptionRepository>,
    pub event_publisher: Arc<dyn EventPublisher>,
}

impl MembershipAppState {
    /// Create handlers on demand from the shared state.
    pub fn check_permission_handler(&self) -> CheckPermissionHandler {
        CheckPermissionHandler::new(self.registry.clone(), self.subject_reader.clone())
    }

    pub fn get_upgrade_target_handler(&self) -> GetUpgradeTargetHandler {
        GetUpgradeTargetHandler::new(self.registry.clone(), self.subject_reader.clone())
    }

    pub fn get_membership_handler(&self) -> GetMembershipHandler {
        GetMembershipHandler::new(self.registry.clone(), self.subject_reader.clone())
    }

    pub fn provision_subscription_handler(&self) -> ProvisionSubscriptionHandler {
        ProvisionSubscriptionHandler::new(
            self.registry.clone(),
            self.subscription_repository.clone(),
            self.event_publisher.clone(),
        )
    }

    pub fn change_tier_handler(&self) -> ChangeTierHandler {
        ChangeTierHandler::new(
            self.registry.clone(),
            self.subject_reader.clone(),
            self.subscription_repository.clone(),
            self.event_publisher.clone(),
        )
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// User Context
// ════════════════════════════════════════════════════════════════════════════════

/// Authenticated user context extracted from request.
///
/// Authentication is owned by the identity collaborator in front of this
/// service; it forwards the subject id in the `X-User-Id` header.
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: UserId,
}

/// Rejection type for AuthenticatedUser extraction.
pub struct AuthenticationRequired;

impl IntoResponse for AuthenticationRequired {
    fn into_response(self) -> axum::response::Response {
        let error = ErrorResponse::new("AUTHENTICATION_REQUIRED", "Authentication is required");
        (StatusCode::UNAUTHORIZED, Json(error)).into_response()
    }
}

#[async_trait]
impl<S> axum::extract::FromRequestParts<S> for AuthenticatedUser
where
    S: Send + Sync,
{
    type Rejection = AuthenticationRequired;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        let user_id = parts
            .headers
            .get("X-User-Id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| UserId::new(s.trim()).ok())
            .ok_or(AuthenticationRequired)?;

        Ok(AuthenticatedUser { user_id })
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Query Handlers (GET endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// GET /api/tiers - Public tier listing (visible tiers, ascending)
pub async fn list_tiers(State(state): State<MembershipAppState>) -> impl IntoResponse {
    let tiers = state.registry.visible_tiers().map(TierResponse::from).collect();
    Json(TierListResponse { tiers })
}

/// GET /api/membership - Get current user's membership details
pub async fn get_membership(
    State(state): State<MembershipAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.get_membership_handler();
    let query = GetMembershipQuery {
        user_id: user.user_id,
    };

    let view = handler.handle(query).await?;

    Ok(Json(MembershipResponse::from(view)))
}

/// GET /api/membership/permissions/:permission - Check a permission
pub async fn check_permission(
    State(state): State<MembershipAppState>,
    user: AuthenticatedUser,
    Path(permission): Path<String>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.check_permission_handler();
    let query = CheckPermissionQuery {
        user_id: user.user_id,
        permission: permission.clone(),
    };

    let result = handler.handle(query).await?;

    Ok(Json(PermissionCheckResponse::from_result(permission, result)))
}

/// GET /api/membership/upgrade?permission=&target= - Suggested upgrade
pub async fn get_upgrade_target(
    State(state): State<MembershipAppState>,
    user: AuthenticatedUser,
    Query(params): Query<UpgradeTargetParams>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.get_upgrade_target_handler();
    let query = GetUpgradeTargetQuery {
        user_id: user.user_id,
        permission: params.permission,
        target: params.target,
    };

    let result = handler.handle(query).await?;

    Ok(Json(UpgradeTargetResponse::from(result)))
}

// ════════════════════════════════════════════════════════════════════════════════
// Command Handlers (POST/PUT endpoints)
// ════════════════════════════════════════════════════════════════════════════════

/// POST /api/membership - Provision the current user at the default tier
pub async fn provision_membership(
    State(state): State<MembershipAppState>,
    user: AuthenticatedUser,
) -> Result<impl IntoResponse, MembershipApiError> {
    let handler = state.provision_subscription_handler();
    let cmd = ProvisionSubscriptionCommand {
        user_id: user.user_id,
    };

    let result = handler.handle(cmd).await?;

    Ok((
        StatusCode::CREATED,
        Json(SubscriptionResponse::from(&result.subscription)),
    ))
}

/// PUT /api/admin/members/:user_id/tier - Administrative tier change
pub async fn change_member_tier(
    State(state): State<MembershipAppState>,
    user: AuthenticatedUser,
    Path(member_id): Path<String>,
    Json(request): Json<ChangeTierRequest>,
) -> Result<impl IntoResponse, MembershipApiError> {
    let member_id = UserId::new(member_id).map_err(MembershipError::from)?;

    let handler = state.change_tier_handler();
    let cmd = ChangeTierCommand {
        user_id: member_id,
        new_tier: request.tier,
        source: TierChangeSource::Administrative,
        changed_by: Some(user.user_id),
        expires_at: request.expires_at,
        trial_ends_at: request.trial_ends_at,
    };

    let result = handler.handle(cmd).await?;

    Ok(Json(ChangeTierResponse {
        previous_tier: result.previous_tier,
        changed: result.previous_tier != result.subscription.tier,
        subscription: SubscriptionResponse::from(&result.subscription),
    }))
}

// ════════════════════════════════════════════════════════════════════════════════
// Error Handling
// ════════════════════════════════════════════════════════════════════════════════

/// API error type that converts domain errors to HTTP responses.
#[derive(Debug)]
pub struct MembershipApiError(pub MembershipError);

impl From<MembershipError> for MembershipApiError {
    fn from(err: MembershipError) -> Self {
        Self(err)
    }
}

impl From<crate::domain::foundation::DomainError> for MembershipApiError {
    fn from(err: crate::domain::foundation::DomainError) -> Self {
        Self(MembershipError::from(err))
    }
}

impl IntoResponse for MembershipApiError {
    fn into_response(self) -> axum::response::Response {
        let (status, error_code) = match &self.0 {
            MembershipError::NotFoundForUser(_) => (StatusCode::NOT_FOUND, "MEMBERSHIP_NOT_FOUND"),
            MembershipError::AlreadyExists(_) => (StatusCode::CONFLICT, "MEMBERSHIP_EXISTS"),
            MembershipError::InvalidTier(_) => (StatusCode::BAD_REQUEST, "INVALID_TIER"),
            MembershipError::Forbidden(_) => (StatusCode::FORBIDDEN, "FORBIDDEN"),
            MembershipError::ValidationFailed { .. } => {
                (StatusCode::BAD_REQUEST, "VALIDATION_FAILED")
            }
            MembershipError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "Membership request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR")
            }
        };

        let body = match &self.0 {
            MembershipError::ValidationFailed { field, .. } => ErrorResponse::with_details(
                error_code,
                self.0.message(),
                serde_json::json!({ "field": field }),
            ),
            _ => ErrorResponse::new(error_code, self.0.message()),
        };
        (status, Json(body)).into_response()
    }
}
