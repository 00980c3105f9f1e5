//! SignalFire Membership - Tier Registry & Resolver
//!
//! This crate owns the membership tiers of the SignalFire creator platform:
//! which tiers exist, what each one unlocks, which tier a member is on, and
//! what a member should upgrade to when a feature is locked.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
