//! Platform roles carried on the subject record.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Role of a subject on the platform.
///
/// Roles come from the identity collaborator. Unknown role strings parse as
/// `Member`, so an unrecognized role never gains privileges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", from = "String")]
pub enum Role {
    #[default]
    Member,
    Creator,
    Moderator,
    Admin,
    SuperAdmin,
}

impl Role {
    /// Returns true if this role bypasses tier-based gating entirely.
    ///
    /// The bypass is unscoped: a privileged role holds every permission.
    pub fn is_privileged(&self) -> bool {
        matches!(self, Role::Admin | Role::SuperAdmin)
    }

    /// Wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Member => "member",
            Role::Creator => "creator",
            Role::Moderator => "moderator",
            Role::Admin => "admin",
            Role::SuperAdmin => "super_admin",
        }
    }

    /// Parses a role name leniently, falling back to `Member`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "creator" => Role::Creator,
            "moderator" => Role::Moderator,
            "admin" => Role::Admin,
            "super_admin" | "superadmin" => Role::SuperAdmin,
            _ => Role::Member,
        }
    }
}

impl From<String> for Role {
    fn from(raw: String) -> Self {
        Role::parse_lenient(&raw)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
