//! # Capability Policy
//!
//! Maps a [`User`] to an action-level [`CapabilityMap`].
//!
//! Resolution is a pure function of the user record:
//!
//! 1. Pick the base map for the plan. Only FREE, PRO, COMMERCIAL and
//!    FACILITY have base maps; any other plan resolves to the empty map,
//!    which denies everything.
//! 2. In FACILITY mode, merge the role overlay on top. Overlay entries
//!    replace base entries, including turning a `true` into `false`. A
//!    missing or unrecognised role contributes nothing.
//!
//! Keys come from the closed [`Capability`] enum and every value is checked
//! against the key's [`CapabilityKind`], so a map can never hold a key or a
//! value shape the policy does not define.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::warn;
use verdant_core::{FacilityRole, Plan, User, VerdantError};

// ============================================================================
// Keys
// ============================================================================

/// Action-level permission keys.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Capability {
    /// See grows and their journals
    ViewGrows,
    /// Start a new grow
    CreateGrow,
    /// Edit grow details and logs
    EditGrows,
    /// Delete grows
    DeleteGrows,
    /// No cap on concurrently active grows
    UnlimitedGrows,
    /// Photo-based plant diagnosis
    PlantDiagnosis,
    /// Export grow data
    ExportData,
    /// Create and edit rooms
    ManageRooms,
    /// Pair and configure sensors
    ManageSensors,
    /// Generate compliance reports
    ComplianceReports,
    /// Manage team membership and roles
    TeamManage,
    /// Send facility invitations
    InviteMembers,
    /// Change plan and payment details
    ManageBilling,
    /// Apply actions to many plants at once
    BulkActions,
    /// Use API tokens
    ApiAccess,
    /// Analytics depth (tier)
    Analytics,
    /// Support channel (tier)
    Support,
}

/// Shape of the value a capability key carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapabilityKind {
    /// Boolean allow/deny
    Flag,
    /// Analytics tier
    AnalyticsTier,
    /// Support tier
    SupportTier,
}

impl Capability {
    /// Every capability key, in map order.
    pub fn all() -> &'static [Self] {
        &[
            Self::ViewGrows,
            Self::CreateGrow,
            Self::EditGrows,
            Self::DeleteGrows,
            Self::UnlimitedGrows,
            Self::PlantDiagnosis,
            Self::ExportData,
            Self::ManageRooms,
            Self::ManageSensors,
            Self::ComplianceReports,
            Self::TeamManage,
            Self::InviteMembers,
            Self::ManageBilling,
            Self::BulkActions,
            Self::ApiAccess,
            Self::Analytics,
            Self::Support,
        ]
    }

    /// Value shape for this key.
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Self::Analytics => CapabilityKind::AnalyticsTier,
            Self::Support => CapabilityKind::SupportTier,
            _ => CapabilityKind::Flag,
        }
    }

    /// Stable key used by UI collaborators.
    pub fn key(&self) -> &'static str {
        match self {
            Self::ViewGrows => "viewGrows",
            Self::CreateGrow => "createGrow",
            Self::EditGrows => "editGrows",
            Self::DeleteGrows => "deleteGrows",
            Self::UnlimitedGrows => "unlimitedGrows",
            Self::PlantDiagnosis => "plantDiagnosis",
            Self::ExportData => "exportData",
            Self::ManageRooms => "manageRooms",
            Self::ManageSensors => "manageSensors",
            Self::ComplianceReports => "complianceReports",
            Self::TeamManage => "teamManage",
            Self::InviteMembers => "inviteMembers",
            Self::ManageBilling => "manageBilling",
            Self::BulkActions => "bulkActions",
            Self::ApiAccess => "apiAccess",
            Self::Analytics => "analytics",
            Self::Support => "support",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// ============================================================================
// Values
// ============================================================================

/// Analytics depth.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalyticsTier {
    /// Summary charts
    Basic,
    /// Trends, comparisons, yield forecasting
    Advanced,
}

/// Support channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SupportTier {
    /// Community forum
    Community,
    /// Priority email
    Priority,
    /// Dedicated account manager
    Dedicated,
}

/// Value held for a capability key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CapabilityValue {
    /// Allow or deny
    Flag(bool),
    /// Analytics tier
    Analytics(AnalyticsTier),
    /// Support tier
    Support(SupportTier),
}

impl CapabilityValue {
    /// Value shape.
    pub fn kind(&self) -> CapabilityKind {
        match self {
            Self::Flag(_) => CapabilityKind::Flag,
            Self::Analytics(_) => CapabilityKind::AnalyticsTier,
            Self::Support(_) => CapabilityKind::SupportTier,
        }
    }

    /// Whether the value grants access. Any tier grants access.
    pub fn is_granted(&self) -> bool {
        match self {
            Self::Flag(allowed) => *allowed,
            Self::Analytics(_) | Self::Support(_) => true,
        }
    }
}

impl From<bool> for CapabilityValue {
    fn from(allowed: bool) -> Self {
        Self::Flag(allowed)
    }
}

impl From<AnalyticsTier> for CapabilityValue {
    fn from(tier: AnalyticsTier) -> Self {
        Self::Analytics(tier)
    }
}

impl From<SupportTier> for CapabilityValue {
    fn from(tier: SupportTier) -> Self {
        Self::Support(tier)
    }
}

// ============================================================================
// Capability Map
// ============================================================================

/// Mapping from capability keys to values.
///
/// Absent keys deny. Also used for role overlays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct CapabilityMap {
    entries: BTreeMap<Capability, CapabilityValue>,
}

impl CapabilityMap {
    /// A map with no entries. Denies everything.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a map, rejecting values whose shape does not match their key.
    pub fn from_entries<I, V>(entries: I) -> Result<Self, VerdantError>
    where
        I: IntoIterator<Item = (Capability, V)>,
        V: Into<CapabilityValue>,
    {
        let mut map = Self::empty();
        for (capability, value) in entries {
            map.insert(capability, value)?;
        }
        Ok(map)
    }

    /// Insert a value, returning the previous one.
    pub fn insert(
        &mut self,
        capability: Capability,
        value: impl Into<CapabilityValue>,
    ) -> Result<Option<CapabilityValue>, VerdantError> {
        let value = value.into();
        if value.kind() != capability.kind() {
            return Err(VerdantError::invalid(format!(
                "capability '{capability}' expects {:?}, got {:?}",
                capability.kind(),
                value.kind()
            )));
        }
        Ok(self.entries.insert(capability, value))
    }

    /// Whether the capability is granted. Absent keys deny.
    pub fn can(&self, capability: Capability) -> bool {
        self.entries
            .get(&capability)
            .is_some_and(CapabilityValue::is_granted)
    }

    /// Raw value for a key.
    pub fn get(&self, capability: Capability) -> Option<CapabilityValue> {
        self.entries.get(&capability).copied()
    }

    /// Analytics tier, if present.
    pub fn analytics_tier(&self) -> Option<AnalyticsTier> {
        match self.get(Capability::Analytics) {
            Some(CapabilityValue::Analytics(tier)) => Some(tier),
            _ => None,
        }
    }

    /// Support tier, if present.
    pub fn support_tier(&self) -> Option<SupportTier> {
        match self.get(Capability::Support) {
            Some(CapabilityValue::Support(tier)) => Some(tier),
            _ => None,
        }
    }

    /// Whether the key has an entry (granted or not).
    pub fn contains(&self, capability: Capability) -> bool {
        self.entries.contains_key(&capability)
    }

    /// Keys present in the map.
    pub fn keys(&self) -> impl Iterator<Item = Capability> + '_ {
        self.entries.keys().copied()
    }

    /// Entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (Capability, CapabilityValue)> + '_ {
        self.entries.iter().map(|(k, v)| (*k, *v))
    }

    /// Keys whose value grants access.
    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        self.iter()
            .filter(|(_, value)| value.is_granted())
            .map(|(capability, _)| capability)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map has no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Shallow merge: every overlay entry replaces the base entry.
    pub fn merge_overlay(&mut self, overlay: &CapabilityMap) {
        for (capability, value) in overlay.iter() {
            self.entries.insert(capability, value);
        }
    }

    // Static tables below only use well-shaped values.
    fn table(flags: &[(Capability, bool)], tiers: &[CapabilityValue]) -> Self {
        let mut entries = BTreeMap::new();
        for (capability, allowed) in flags {
            debug_assert_eq!(capability.kind(), CapabilityKind::Flag);
            entries.insert(*capability, CapabilityValue::Flag(*allowed));
        }
        for tier in tiers {
            let key = match tier {
                CapabilityValue::Analytics(_) => Capability::Analytics,
                CapabilityValue::Support(_) => Capability::Support,
                CapabilityValue::Flag(_) => continue,
            };
            entries.insert(key, *tier);
        }
        Self { entries }
    }
}

// ============================================================================
// Base Maps
// ============================================================================

use Capability::*;

/// Base capability map for a plan, or `None` for plans without one.
pub fn base_capabilities(plan: Plan) -> Option<CapabilityMap> {
    let map = match plan {
        Plan::Free => CapabilityMap::table(
            &[
                (ViewGrows, true),
                (CreateGrow, true),
                (EditGrows, true),
                (DeleteGrows, true),
                (UnlimitedGrows, false),
                (PlantDiagnosis, false),
                (ExportData, false),
                (ManageRooms, false),
                (ManageSensors, false),
                (ComplianceReports, false),
                (TeamManage, false),
                (InviteMembers, false),
                (ManageBilling, true),
                (BulkActions, false),
                (ApiAccess, false),
            ],
            &[AnalyticsTier::Basic.into(), SupportTier::Community.into()],
        ),
        Plan::Pro => CapabilityMap::table(
            &[
                (ViewGrows, true),
                (CreateGrow, true),
                (EditGrows, true),
                (DeleteGrows, true),
                (UnlimitedGrows, true),
                (PlantDiagnosis, true),
                (ExportData, true),
                (ManageRooms, false),
                (ManageSensors, true),
                (ComplianceReports, false),
                (TeamManage, false),
                (InviteMembers, false),
                (ManageBilling, true),
                (BulkActions, false),
                (ApiAccess, false),
            ],
            &[AnalyticsTier::Advanced.into(), SupportTier::Priority.into()],
        ),
        Plan::Commercial => CapabilityMap::table(
            &[
                (ViewGrows, true),
                (CreateGrow, true),
                (EditGrows, true),
                (DeleteGrows, true),
                (UnlimitedGrows, true),
                (PlantDiagnosis, true),
                (ExportData, true),
                (ManageRooms, true),
                (ManageSensors, true),
                (ComplianceReports, true),
                (TeamManage, true),
                (InviteMembers, true),
                (ManageBilling, true),
                (BulkActions, true),
                (ApiAccess, true),
            ],
            &[AnalyticsTier::Advanced.into(), SupportTier::Priority.into()],
        ),
        Plan::Facility => CapabilityMap::table(
            &[
                (ViewGrows, true),
                (CreateGrow, true),
                (EditGrows, true),
                (DeleteGrows, true),
                (UnlimitedGrows, true),
                (PlantDiagnosis, true),
                (ExportData, true),
                (ManageRooms, true),
                (ManageSensors, true),
                (ComplianceReports, true),
                (TeamManage, false),
                (InviteMembers, true),
                (ManageBilling, true),
                (BulkActions, true),
                (ApiAccess, true),
            ],
            &[AnalyticsTier::Advanced.into(), SupportTier::Dedicated.into()],
        ),
        Plan::Influencer | Plan::Unrecognized => return None,
    };
    Some(map)
}

/// Role overlay applied in FACILITY mode, or `None` for roles without one.
pub fn role_overlay(role: FacilityRole) -> Option<CapabilityMap> {
    let overlay = match role {
        FacilityRole::Owner => CapabilityMap::table(
            &[
                (TeamManage, true),
                (InviteMembers, true),
                (ManageBilling, true),
                (ManageRooms, true),
                (DeleteGrows, true),
            ],
            &[],
        ),
        FacilityRole::Admin => CapabilityMap::table(
            &[
                (TeamManage, true),
                (InviteMembers, true),
                (ManageRooms, true),
                (ManageBilling, false),
            ],
            &[],
        ),
        FacilityRole::Manager => CapabilityMap::table(
            &[
                (TeamManage, true),
                (InviteMembers, true),
                (ManageRooms, true),
                (ManageBilling, false),
                (ApiAccess, false),
            ],
            &[],
        ),
        FacilityRole::Staff => CapabilityMap::table(
            &[
                (TeamManage, false),
                (InviteMembers, false),
                (ManageBilling, false),
                (ManageRooms, false),
                (DeleteGrows, false),
                (ComplianceReports, false),
                (BulkActions, false),
                (ApiAccess, false),
            ],
            &[],
        ),
        FacilityRole::Viewer => CapabilityMap::table(
            &[
                (CreateGrow, false),
                (EditGrows, false),
                (DeleteGrows, false),
                (ExportData, false),
                (ManageRooms, false),
                (ManageSensors, false),
                (TeamManage, false),
                (InviteMembers, false),
                (ManageBilling, false),
                (BulkActions, false),
                (ApiAccess, false),
            ],
            &[],
        ),
        FacilityRole::Unrecognized => return None,
    };
    Some(overlay)
}

/// Resolve the capability map for a user.
///
/// The FACILITY plan grants team management only through an OWNER, ADMIN or
/// MANAGER overlay, so it is withheld outside FACILITY mode.
pub fn resolve_capabilities(user: &User) -> CapabilityMap {
    let Some(mut capabilities) = base_capabilities(user.plan) else {
        warn!(user = %user.id, plan = %user.plan, "No capability map for plan; denying all");
        return CapabilityMap::empty();
    };

    if !user.mode.is_facility() {
        return capabilities;
    }

    match user.facility_role {
        Some(role) => match role_overlay(role) {
            Some(overlay) => capabilities.merge_overlay(&overlay),
            None => {
                warn!(
                    user = %user.id,
                    role = %role,
                    "No overlay for facility role; using plan map"
                );
            }
        },
        None => {
            warn!(user = %user.id, "Facility mode without a facility role; using plan map");
        }
    }
    capabilities
}
