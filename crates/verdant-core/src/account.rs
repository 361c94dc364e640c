//! # Account Model
//!
//! Billing plans, operating modes and facility roles as delivered by the
//! identity collaborator, plus the `User` and `Facility` records built from
//! them.
//!
//! Plans and roles are open on the wire: a label this build does not know
//! parses to `Unrecognized` so that policy code can fail closed instead of
//! erroring. Modes are a closed domain; an unknown mode label is a parse error.

use crate::errors::VerdantError;
use crate::identifiers::{FacilityId, UserId};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Plan
// ============================================================================

/// Billing tier determining the base capability and entitlement sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Plan {
    /// Free tier
    Free,
    /// Paid individual grower
    Pro,
    /// Creator / influencer programme
    Influencer,
    /// Commercial operation
    Commercial,
    /// Multi-tenant facility operation
    Facility,
    /// A plan label this build does not know about
    #[serde(other)]
    Unrecognized,
}

impl Plan {
    /// All plans that carry a known label.
    pub fn known() -> &'static [Self] {
        &[
            Self::Free,
            Self::Pro,
            Self::Influencer,
            Self::Commercial,
            Self::Facility,
        ]
    }

    /// Parse a wire label. Unknown labels yield [`Plan::Unrecognized`].
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "FREE" => Self::Free,
            "PRO" => Self::Pro,
            "INFLUENCER" => Self::Influencer,
            "COMMERCIAL" => Self::Commercial,
            "FACILITY" => Self::Facility,
            _ => Self::Unrecognized,
        }
    }

    /// Wire label for this plan.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Free => "FREE",
            Self::Pro => "PRO",
            Self::Influencer => "INFLUENCER",
            Self::Commercial => "COMMERCIAL",
            Self::Facility => "FACILITY",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Account Mode
// ============================================================================

/// The active top-level operating context.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AccountMode {
    /// Personal grows
    Personal,
    /// Commercial operation (process default)
    #[default]
    Commercial,
    /// Multi-tenant facility context
    Facility,
}

impl AccountMode {
    /// All modes in display order.
    pub fn all() -> &'static [Self] {
        &[Self::Personal, Self::Commercial, Self::Facility]
    }

    /// Wire label for this mode.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Personal => "PERSONAL",
            Self::Commercial => "COMMERCIAL",
            Self::Facility => "FACILITY",
        }
    }

    /// Whether role overlays apply in this mode.
    #[inline]
    pub fn is_facility(&self) -> bool {
        matches!(self, Self::Facility)
    }
}

impl fmt::Display for AccountMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for AccountMode {
    type Err = VerdantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PERSONAL" => Ok(Self::Personal),
            "COMMERCIAL" => Ok(Self::Commercial),
            "FACILITY" => Ok(Self::Facility),
            other => Err(VerdantError::invalid(format!("unknown account mode '{other}'"))),
        }
    }
}

// ============================================================================
// Facility Role
// ============================================================================

/// Role held within the selected facility.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FacilityRole {
    /// Facility owner
    Owner,
    /// Platform or facility administrator
    Admin,
    /// Operations manager
    Manager,
    /// Grow staff
    Staff,
    /// Read-only member
    Viewer,
    /// A role label this build does not know about
    #[serde(other)]
    Unrecognized,
}

impl FacilityRole {
    /// All roles that carry a known label.
    pub fn known() -> &'static [Self] {
        &[
            Self::Owner,
            Self::Admin,
            Self::Manager,
            Self::Staff,
            Self::Viewer,
        ]
    }

    /// Parse a wire label. Unknown labels yield [`FacilityRole::Unrecognized`].
    pub fn parse(label: &str) -> Self {
        match label.trim().to_ascii_uppercase().as_str() {
            "OWNER" => Self::Owner,
            "ADMIN" => Self::Admin,
            "MANAGER" => Self::Manager,
            "STAFF" => Self::Staff,
            "VIEWER" => Self::Viewer,
            _ => Self::Unrecognized,
        }
    }

    /// Wire label for this role.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Owner => "OWNER",
            Self::Admin => "ADMIN",
            Self::Manager => "MANAGER",
            Self::Staff => "STAFF",
            Self::Viewer => "VIEWER",
            Self::Unrecognized => "UNRECOGNIZED",
        }
    }
}

impl fmt::Display for FacilityRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ============================================================================
// Records
// ============================================================================

/// Identity record supplied by the identity collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Account identifier
    pub id: UserId,
    /// Billing plan
    pub plan: Plan,
    /// Operating mode the identity record was issued for
    pub mode: AccountMode,
    /// Role in the selected facility, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_role: Option<FacilityRole>,
    /// Selected facility, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub facility_id: Option<FacilityId>,
}

impl User {
    /// Create a user with no facility membership.
    pub fn new(id: impl Into<UserId>, plan: Plan, mode: AccountMode) -> Self {
        Self {
            id: id.into(),
            plan,
            mode,
            facility_role: None,
            facility_id: None,
        }
    }

    /// Attach a facility membership.
    #[must_use]
    pub fn with_facility(mut self, facility_id: impl Into<FacilityId>, role: FacilityRole) -> Self {
        self.facility_id = Some(facility_id.into());
        self.facility_role = Some(role);
        self
    }

    /// Replace the operating mode.
    #[must_use]
    pub fn in_mode(mut self, mode: AccountMode) -> Self {
        self.mode = mode;
        self
    }
}

/// A multi-tenant grow facility.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Facility {
    /// Facility identifier
    pub id: FacilityId,
    /// Display name
    pub name: String,
}

impl Facility {
    /// Create a facility record.
    pub fn new(id: impl Into<FacilityId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plan_parse_is_case_insensitive() {
        assert_eq!(Plan::parse("pro"), Plan::Pro);
        assert_eq!(Plan::parse(" FACILITY "), Plan::Facility);
        assert_eq!(Plan::parse("ENTERPRISE"), Plan::Unrecognized);
    }

    #[test]
    fn test_plan_unknown_label_deserializes_unrecognized() {
        let plan: Plan = serde_json::from_str("\"PLATINUM\"").unwrap();
        assert_eq!(plan, Plan::Unrecognized);
        let plan: Plan = serde_json::from_str("\"INFLUENCER\"").unwrap();
        assert_eq!(plan, Plan::Influencer);
    }

    #[test]
    fn test_mode_parse_rejects_unknown() {
        assert_eq!("facility".parse::<AccountMode>().unwrap(), AccountMode::Facility);
        assert!("enterprise".parse::<AccountMode>().is_err());
        assert_eq!(AccountMode::default(), AccountMode::Commercial);
    }

    #[test]
    fn test_role_parse() {
        assert_eq!(FacilityRole::parse("staff"), FacilityRole::Staff);
        assert_eq!(FacilityRole::parse("janitor"), FacilityRole::Unrecognized);
    }

    #[test]
    fn test_known_labels_parse_back() {
        for plan in Plan::known() {
            assert_eq!(Plan::parse(plan.label()), *plan);
        }
        for role in FacilityRole::known() {
            assert_eq!(FacilityRole::parse(role.label()), *role);
        }
        assert!(!Plan::known().contains(&Plan::Unrecognized));
    }

    #[test]
    fn test_user_deserializes_from_identity_record() {
        let json = r#"{"id":"u1","plan":"FACILITY","mode":"FACILITY","facilityRole":"STAFF","facilityId":"f1"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(
            user,
            User::new("u1", Plan::Facility, AccountMode::Facility)
                .with_facility("f1", FacilityRole::Staff)
        );
    }

    #[test]
    fn test_user_without_facility_fields() {
        let json = r#"{"id":"u2","plan":"FREE","mode":"PERSONAL"}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert!(user.facility_role.is_none());
        assert!(user.facility_id.is_none());
    }
}
