//! # Mode and Facility Store
//!
//! Two independent observable cells: the current [`AccountMode`] and the
//! selected [`Facility`]. They share the [`ObservableCell`] contract:
//! stable snapshot references, no-op on equal values, ordered synchronous
//! notification, and deferred re-entrant sets.
//!
//! The store is owned by [`crate::AppContext`]; each context has its own
//! store, so isolated instances never share state.

use std::sync::Arc;
use verdant_core::reactive::{ObservableCell, SetOutcome, Subscription};
use verdant_core::{AccountMode, Facility};

/// Observable state for the active mode and the selected facility.
#[derive(Debug, Clone)]
pub struct ModeFacilityStore {
    mode: ObservableCell<AccountMode>,
    facility: ObservableCell<Option<Facility>>,
}

impl Default for ModeFacilityStore {
    fn default() -> Self {
        Self::new(AccountMode::default())
    }
}

impl ModeFacilityStore {
    /// Create a store in `initial_mode` with no facility selected.
    pub fn new(initial_mode: AccountMode) -> Self {
        Self {
            mode: ObservableCell::new("account_mode", initial_mode),
            facility: ObservableCell::new("selected_facility", None),
        }
    }

    // ------------------------------------------------------------------
    // Mode
    // ------------------------------------------------------------------

    /// Current mode snapshot.
    pub fn mode_snapshot(&self) -> Arc<AccountMode> {
        self.mode.snapshot()
    }

    /// Current mode.
    pub fn mode(&self) -> AccountMode {
        *self.mode.snapshot()
    }

    /// Listen for mode changes.
    pub fn subscribe_mode<F>(&self, listener: F) -> Subscription<AccountMode>
    where
        F: Fn(&Arc<AccountMode>) + Send + Sync + 'static,
    {
        self.mode.subscribe(listener)
    }

    /// Set the mode. Setting the current mode is a no-op.
    pub fn set_mode(&self, mode: AccountMode) -> SetOutcome {
        self.mode.set(mode)
    }

    // ------------------------------------------------------------------
    // Facility
    // ------------------------------------------------------------------

    /// Current facility snapshot.
    pub fn facility_snapshot(&self) -> Arc<Option<Facility>> {
        self.facility.snapshot()
    }

    /// Clone of the selected facility.
    pub fn selected_facility(&self) -> Option<Facility> {
        self.facility.get()
    }

    /// Whether a facility is selected.
    pub fn has_selected_facility(&self) -> bool {
        self.facility.snapshot().is_some()
    }

    /// Listen for selection changes.
    pub fn subscribe_facility<F>(&self, listener: F) -> Subscription<Option<Facility>>
    where
        F: Fn(&Arc<Option<Facility>>) + Send + Sync + 'static,
    {
        self.facility.subscribe(listener)
    }

    /// Replace the selection.
    pub fn set_facility(&self, facility: Option<Facility>) -> SetOutcome {
        self.facility.set(facility)
    }

    /// Select a facility.
    pub fn select_facility(&self, facility: Facility) -> SetOutcome {
        self.set_facility(Some(facility))
    }

    /// Clear the selection.
    pub fn clear_facility(&self) -> SetOutcome {
        self.set_facility(None)
    }
}
