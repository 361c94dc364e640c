//! Access policy: who may do what.
//!
//! ```text
//!   User ──► capabilities::resolve_capabilities ──► CapabilityMap   (actions)
//!   Plan ──► entitlements::resolve_entitlements ──► Entitlements    (UI tiers)
//! ```
//!
//! Both resolvers are pure and fail closed: the capability resolver denies
//! everything for a plan it has no map for, the entitlements resolver falls
//! back to the FREE record.

pub mod capabilities;
pub mod entitlements;

pub use capabilities::{
    base_capabilities, resolve_capabilities, role_overlay, AnalyticsTier, Capability,
    CapabilityKind, CapabilityMap, CapabilityValue, SupportTier,
};
pub use entitlements::{resolve_entitlements, DashboardTier, Entitlements, ExportTier, GrowLimit};
