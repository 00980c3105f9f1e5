//! Axum router configuration for membership endpoints.
//!
//! This module defines the route structure for membership-related API endpoints
//! and wires them to their corresponding handlers.

use axum::{
    routing::{get, put},
    Router,
};

use super::handlers::{
    change_member_tier, check_permission, get_membership, get_upgrade_target, list_tiers,
    provision_membership, MembershipAppState,
};

/// Create the membership API router.
///
/// # Routes
///
/// ## User Endpoints (require `X-User-Id`)
/// - `GET /` - Get current user's membership details
/// - `POST /` - Provision the current user at the default tier
/// - `GET /permissions/:permission` - Check a permission
/// - `GET /upgrade` - Suggested upgrade (`?permission=` or `?target=`)
pub fn membership_routes() -> Router<MembershipAppState> {
    Router::new()
        .route("/", get(get_membership).post(provision_membership))
        .route("/permissions/:permission", get(check_permission))
        .route("/upgrade", get(get_upgrade_target))
}

/// Create the admin router.
///
/// # Routes
/// - `PUT /members/:user_id/tier` - Change a member's tier (privileged roles only)
pub fn admin_routes() -> Router<MembershipAppState> {
    Router::new().route("/members/:user_id/tier", put(change_member_tier))
}

/// Create the complete membership module router.
///
/// Suitable for mounting at `/api`.
///
/// # Example
///
/// ```ignore
/// let app = Router::new()
///     .nest("/api", membership_router())
///     .with_state(app_state);
/// ```
pub fn membership_router() -> Router<MembershipAppState> {
    Router::new()
        .route("/tiers", get(list_tiers))
        .nest("/membership", membership_routes())
        .nest("/admin", admin_routes())
}
