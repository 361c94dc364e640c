//! # Onboarding Stages
//!
//! First-run sequencing derived from tenant data counts. Nothing is stored:
//! the stage is recomputed on every evaluation, so it moves backward when
//! the underlying data regresses (e.g. the last room is deleted).
//!
//! Evaluation order, first match wins:
//!
//! 1. any count still loading → `loading`
//! 2. a pending invitation → `join-facility`
//! 3. no facility → `create-facility`
//! 4. several facilities → `pick-facility`
//! 5. one facility, no rooms → `first-setup`
//! 6. one facility, rooms, no grows → `start-grow`
//! 7. otherwise → `dashboard`

use crate::navigation::RouteId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Tenant data counts supplied by the data-fetch collaborator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingInput {
    /// Facilities the user belongs to
    pub facility_count: u32,
    /// Rooms in the facility
    pub room_count: u32,
    /// Grows in the facility
    pub grow_count: u32,
    /// Facility invitations awaiting a response
    pub pending_invite_count: u32,
    /// Whether any of the counts is still being fetched
    pub any_loading: bool,
}

impl OnboardingInput {
    /// Fully loaded counts.
    pub fn counts(facilities: u32, rooms: u32, grows: u32, pending_invites: u32) -> Self {
        Self {
            facility_count: facilities,
            room_count: rooms,
            grow_count: grows,
            pending_invite_count: pending_invites,
            any_loading: false,
        }
    }

    /// Counts with at least one fetch in flight.
    pub fn loading() -> Self {
        Self {
            any_loading: true,
            ..Self::default()
        }
    }
}

/// Onboarding stage, in first-run order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OnboardingStage {
    /// Counts still loading
    Loading,
    /// A facility invitation is waiting
    JoinFacility,
    /// No facility yet
    CreateFacility,
    /// More than one facility; choose one
    PickFacility,
    /// Facility has no rooms
    FirstSetup,
    /// Rooms exist but no grow
    StartGrow,
    /// Onboarding finished
    Dashboard,
}

impl OnboardingStage {
    /// All stages in order.
    pub fn all() -> &'static [Self] {
        &[
            Self::Loading,
            Self::JoinFacility,
            Self::CreateFacility,
            Self::PickFacility,
            Self::FirstSetup,
            Self::StartGrow,
            Self::Dashboard,
        ]
    }

    /// Kebab-case label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::JoinFacility => "join-facility",
            Self::CreateFacility => "create-facility",
            Self::PickFacility => "pick-facility",
            Self::FirstSetup => "first-setup",
            Self::StartGrow => "start-grow",
            Self::Dashboard => "dashboard",
        }
    }

    /// Route the host lands on for this stage. `None` while loading.
    pub fn landing_route(self) -> Option<RouteId> {
        match self {
            Self::Loading => None,
            Self::JoinFacility => Some(RouteId::JoinFacility),
            Self::CreateFacility => Some(RouteId::CreateFacility),
            Self::PickFacility => Some(RouteId::FacilitySelect),
            Self::FirstSetup => Some(RouteId::FacilitySetup),
            Self::StartGrow => Some(RouteId::StartGrow),
            Self::Dashboard => Some(RouteId::FacilityHome),
        }
    }

    /// Whether onboarding is finished.
    pub fn is_complete(self) -> bool {
        self == Self::Dashboard
    }
}

impl fmt::Display for OnboardingStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Derive the onboarding stage from counts.
pub fn resolve_onboarding_stage(input: &OnboardingInput) -> OnboardingStage {
    if input.any_loading {
        return OnboardingStage::Loading;
    }
    if input.pending_invite_count > 0 {
        return OnboardingStage::JoinFacility;
    }
    match input.facility_count {
        0 => OnboardingStage::CreateFacility,
        1 if input.room_count == 0 => OnboardingStage::FirstSetup,
        1 if input.grow_count == 0 => OnboardingStage::StartGrow,
        1 => OnboardingStage::Dashboard,
        _ => OnboardingStage::PickFacility,
    }
}
