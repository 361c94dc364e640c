//! UI-facing facade for verdant-app.
//!
//! This module exposes the narrow surface that frontends should use:
//! - workflows (commands)
//! - store access (read/subscribe)
//! - view types to branch on

/// Commands.
pub mod workflows {
    pub use crate::workflows::mode::{clear_facility, select_facility, switch_mode};
}

/// Types frontends consume.
pub mod types {
    pub use crate::core::{AppConfig, AppContext};
    pub use crate::navigation::{GuardOutcome, MemoryNavigator, Navigator, RouteId, RoutingGuard};
    pub use crate::policies::{
        AnalyticsTier, Capability, CapabilityMap, DashboardTier, Entitlements, ExportTier,
        GrowLimit, SupportTier,
    };
    pub use crate::store::ModeFacilityStore;
    pub use crate::views::{
        AccessView, EntitlementsView, OnboardingInput, OnboardingStage, OnboardingView,
    };
    pub use verdant_core::reactive::{SetOutcome, Subscription};
    pub use verdant_core::{AccountMode, Facility, FacilityId, FacilityRole, Plan, User, UserId};
}

/// Capability checks.
pub mod authorization {
    pub use crate::authorization::*;
}
