//! Membership tier identifiers.
//!
//! The set of tier ids is closed. Ordering between tiers is NOT derived from
//! the id; it comes from the `order` field of the configured tier table.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::foundation::ValidationError;

/// Identifier of a membership tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    Free,
    Premium,
    Vip,
    Pro,
    Lifetime,
    Founders,
}

impl TierId {
    /// Every known tier id.
    pub const ALL: [TierId; 6] = [
        TierId::Free,
        TierId::Premium,
        TierId::Vip,
        TierId::Pro,
        TierId::Lifetime,
        TierId::Founders,
    ];

    /// Wire name of the tier id.
    pub fn as_str(&self) -> &'static str {
        match self {
            TierId::Free => "free",
            TierId::Premium => "premium",
            TierId::Vip => "vip",
            TierId::Pro => "pro",
            TierId::Lifetime => "lifetime",
            TierId::Founders => "founders",
        }
    }

    /// Returns the display name used when a tier table omits one.
    pub fn display_name(&self) -> &'static str {
        match self {
            TierId::Free => "Free",
            TierId::Premium => "Premium",
            TierId::Vip => "VIP",
            TierId::Pro => "Pro",
            TierId::Lifetime => "Lifetime",
            TierId::Founders => "Founders",
        }
    }
}

impl fmt::Display for TierId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TierId {
    type Err = ValidationError;

    /// Parses a tier id, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase();
        TierId::ALL
            .into_iter()
            .find(|id| id.as_str() == normalized)
            .ok_or_else(|| ValidationError::invalid_format("tier", format!("unknown tier '{}'", s)))
    }
}
