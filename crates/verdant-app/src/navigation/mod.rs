//! # Navigation
//!
//! Route identifiers, the host navigator seam, and the routing guard that
//! keeps screen sections consistent with the active mode.

pub mod guard;
pub mod routes;

pub use guard::{decide, GuardDecision, GuardOutcome, RoutingGuard};
pub use routes::{MemoryNavigator, Navigator, RouteId};
