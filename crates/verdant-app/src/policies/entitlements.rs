//! # Entitlements
//!
//! Coarse, UI-level feature tiers per billing plan. Screens use these to
//! decide which affordances to show at all; [`super::capabilities`] decides
//! whether a shown action may be performed.
//!
//! Entitlements depend on the plan only. An unrecognised plan gets the FREE
//! record.

use serde::{Deserialize, Serialize};
use tracing::warn;
use verdant_core::Plan;

/// Dashboard depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashboardTier {
    /// Summary widgets only
    Basic,
    /// Every widget
    Full,
}

/// Cap on concurrently active grows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum GrowLimit {
    /// At most this many active grows
    Limited(u32),
    /// No cap
    Unlimited,
}

impl GrowLimit {
    /// Whether another grow may be started with `active` grows running.
    pub fn allows_another(&self, active: u32) -> bool {
        match self {
            Self::Limited(max) => active < *max,
            Self::Unlimited => true,
        }
    }
}

/// Data export depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExportTier {
    /// No export
    None,
    /// CSV of grow logs
    Csv,
    /// CSV, PDF reports and raw sensor data
    Full,
}

/// Feature-tier record for a plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entitlements {
    /// Dashboard depth
    pub dashboards: DashboardTier,
    /// Active grow cap
    pub active_grow_limit: GrowLimit,
    /// AI grow assistant
    pub ai_assistant: bool,
    /// Export depth
    pub data_export: ExportTier,
    /// Seats including the account holder
    pub team_seats: u32,
    /// Public creator profile and affiliate links
    pub creator_profile: bool,
    /// Compliance tracking suite
    pub compliance_suite: bool,
}

impl Entitlements {
    /// The most restrictive record.
    pub const FREE: Self = Self {
        dashboards: DashboardTier::Basic,
        active_grow_limit: GrowLimit::Limited(3),
        ai_assistant: false,
        data_export: ExportTier::None,
        team_seats: 1,
        creator_profile: false,
        compliance_suite: false,
    };

    const PRO: Self = Self {
        dashboards: DashboardTier::Full,
        active_grow_limit: GrowLimit::Unlimited,
        ai_assistant: true,
        data_export: ExportTier::Csv,
        team_seats: 1,
        creator_profile: false,
        compliance_suite: false,
    };

    const INFLUENCER: Self = Self {
        creator_profile: true,
        ..Self::PRO
    };

    const COMMERCIAL: Self = Self {
        dashboards: DashboardTier::Full,
        active_grow_limit: GrowLimit::Unlimited,
        ai_assistant: true,
        data_export: ExportTier::Full,
        team_seats: 10,
        creator_profile: false,
        compliance_suite: true,
    };

    const FACILITY: Self = Self {
        team_seats: 50,
        ..Self::COMMERCIAL
    };

    /// Whether the full dashboard set is unlocked.
    pub fn has_full_dashboards(&self) -> bool {
        self.dashboards == DashboardTier::Full
    }
}

impl Default for Entitlements {
    fn default() -> Self {
        Self::FREE
    }
}

/// Resolve the entitlement record for a plan.
pub fn resolve_entitlements(plan: Plan) -> Entitlements {
    match plan {
        Plan::Free => Entitlements::FREE,
        Plan::Pro => Entitlements::PRO,
        Plan::Influencer => Entitlements::INFLUENCER,
        Plan::Commercial => Entitlements::COMMERCIAL,
        Plan::Facility => Entitlements::FACILITY,
        Plan::Unrecognized => {
            warn!(plan = %plan, "Unrecognized plan; using free entitlements");
            Entitlements::FREE
        }
    }
}
