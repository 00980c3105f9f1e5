//! Membership domain module.
//!
//! Handles tier definitions, permission resolution and the subscription a
//! subject holds.
//!
//! # Module Structure
//!
//! - `tier` - TierId closed enumeration
//! - `permission` - Permission enumeration and complete permission sets
//! - `tier_definition` - TierDefinition and pricing metadata
//! - `tier_table` - Configuration form of the tier table
//! - `registry` - TierRegistry, the validated resolver
//! - `subscription` - Subscription aggregate
//! - `subject` - Subject snapshot used by gating decisions

mod errors;
mod events;
mod permission;
mod registry;
mod subject;
mod subscription;
mod tier;
mod tier_definition;
mod tier_table;

pub use errors::MembershipError;
pub use events::{MembershipEvent, TierChangeSource};
pub use permission::{Permission, PermissionSet};
pub use registry::{RegistryError, TierRegistry};
pub use subject::Subject;
pub use subscription::Subscription;
pub use tier::TierId;
pub use tier_definition::{TierDefinition, TierPricing};
pub use tier_table::{TierEntry, TierTable};
