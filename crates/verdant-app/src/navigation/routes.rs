//! # Route Table
//!
//! Statically enumerated route identifiers and the navigator seam.
//! Paths are opaque to the core; the host's navigation layer owns them.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt;
use verdant_core::AccountMode;

/// Route identifiers the core can redirect to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RouteId {
    /// Personal mode home
    PersonalHome,
    /// Commercial mode home
    CommercialHome,
    /// Facility mode home
    FacilityHome,
    /// Facility picker
    FacilitySelect,
    /// Accept a pending facility invitation
    JoinFacility,
    /// Create the first facility
    CreateFacility,
    /// First rooms and equipment setup
    FacilitySetup,
    /// Start the first grow
    StartGrow,
}

impl RouteId {
    /// All routes.
    pub fn all() -> &'static [RouteId] {
        &[
            RouteId::PersonalHome,
            RouteId::CommercialHome,
            RouteId::FacilityHome,
            RouteId::FacilitySelect,
            RouteId::JoinFacility,
            RouteId::CreateFacility,
            RouteId::FacilitySetup,
            RouteId::StartGrow,
        ]
    }

    /// Home route of a mode.
    pub fn home_for(mode: AccountMode) -> RouteId {
        match mode {
            AccountMode::Personal => RouteId::PersonalHome,
            AccountMode::Commercial => RouteId::CommercialHome,
            AccountMode::Facility => RouteId::FacilityHome,
        }
    }

    /// Path handed to the navigator.
    pub fn path(&self) -> &'static str {
        match self {
            RouteId::PersonalHome => "/(personal)/home",
            RouteId::CommercialHome => "/(commercial)/dashboard",
            RouteId::FacilityHome => "/(facility)/dashboard",
            RouteId::FacilitySelect => "/facility/select",
            RouteId::JoinFacility => "/onboarding/join-facility",
            RouteId::CreateFacility => "/onboarding/create-facility",
            RouteId::FacilitySetup => "/onboarding/first-setup",
            RouteId::StartGrow => "/onboarding/start-grow",
        }
    }

    /// Reverse lookup of [`RouteId::path`].
    pub fn from_path(path: &str) -> Option<RouteId> {
        RouteId::all().iter().copied().find(|route| route.path() == path)
    }
}

impl fmt::Display for RouteId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

/// Navigation primitive provided by the host.
pub trait Navigator {
    /// Replace the current route without adding a history entry.
    fn replace(&self, target_path: &str);

    /// Path currently shown, if the host tracks it.
    fn current_path(&self) -> Option<String> {
        None
    }
}

impl<N: Navigator + ?Sized> Navigator for &N {
    fn replace(&self, target_path: &str) {
        (**self).replace(target_path);
    }

    fn current_path(&self) -> Option<String> {
        (**self).current_path()
    }
}

/// In-memory navigator tracking the current path and every `replace` call.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    state: Mutex<MemoryNavigatorState>,
}

#[derive(Debug, Default)]
struct MemoryNavigatorState {
    current: Option<String>,
    replaced: Vec<String>,
}

impl MemoryNavigator {
    /// Navigator with no current path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Navigator already showing `path`.
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            state: Mutex::new(MemoryNavigatorState {
                current: Some(path.into()),
                replaced: Vec::new(),
            }),
        }
    }

    /// Paths passed to `replace`, oldest first.
    pub fn replaced(&self) -> Vec<String> {
        self.state.lock().replaced.clone()
    }

    /// Number of `replace` calls.
    pub fn replace_count(&self) -> usize {
        self.state.lock().replaced.len()
    }

    /// Simulate the user navigating somewhere (not recorded as a replace).
    pub fn visit(&self, path: impl Into<String>) {
        self.state.lock().current = Some(path.into());
    }
}

impl Navigator for MemoryNavigator {
    fn replace(&self, target_path: &str) {
        let mut state = self.state.lock();
        state.current = Some(target_path.to_string());
        state.replaced.push(target_path.to_string());
    }

    fn current_path(&self) -> Option<String> {
        self.state.lock().current.clone()
    }
}
