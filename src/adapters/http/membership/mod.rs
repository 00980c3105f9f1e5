//! HTTP adapter for membership endpoints.
//!
//! Exposes the tier registry and subscriptions via REST API:
//! - `GET /api/tiers` - Public tier listing
//! - `GET /api/membership` - Get current user's membership
//! - `POST /api/membership` - Provision current user at the default tier
//! - `GET /api/membership/permissions/:permission` - Check a permission
//! - `GET /api/membership/upgrade` - Suggested upgrade
//! - `PUT /api/admin/members/:user_id/tier` - Administrative tier change

pub mod dto;
pub mod handlers;
pub mod routes;

pub use dto::*;
pub use handlers::{AuthenticatedUser, MembershipApiError, MembershipAppState};
pub use routes::membership_router;
