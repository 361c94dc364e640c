//! Mode and facility workflows.
//!
//! These pair a store mutation with the navigation it implies. A mutation
//! that changes nothing navigates nowhere. A mutation issued from inside a
//! store listener is deferred by the store, and navigation is left to
//! whoever observes the deferred change.

use crate::core::AppContext;
use crate::navigation::{decide, GuardDecision, Navigator, RouteId};
use tracing::{debug, info};
use verdant_core::reactive::SetOutcome;
use verdant_core::{AccountMode, Facility};

/// Landing route for `mode` given the current selection.
fn landing_for(mode: AccountMode, facility_selected: bool) -> RouteId {
    match decide(mode, mode, facility_selected) {
        GuardDecision::Allow => RouteId::home_for(mode),
        GuardDecision::Redirect(target) => target,
    }
}

/// Switch the active mode and land on its home.
///
/// Entering FACILITY mode without a selected facility lands on the picker.
pub fn switch_mode<N>(ctx: &AppContext, mode: AccountMode, navigator: &N) -> SetOutcome
where
    N: Navigator + ?Sized,
{
    let store = ctx.store();
    let previous = store.mode();
    let outcome = store.set_mode(mode);
    match outcome {
        SetOutcome::Applied => {
            let target = landing_for(mode, store.has_selected_facility());
            info!(from = %previous, to = %mode, target = %target, "Switched mode");
            navigator.replace(target.path());
        }
        SetOutcome::Unchanged => debug!(mode = %mode, "Mode unchanged"),
        SetOutcome::Deferred => debug!(mode = %mode, "Mode switch deferred"),
    }
    outcome
}

/// Select a facility, enter FACILITY mode, and land on the facility home.
///
/// Returns the outcome of the facility selection.
pub fn select_facility<N>(ctx: &AppContext, facility: Facility, navigator: &N) -> SetOutcome
where
    N: Navigator + ?Sized,
{
    let store = ctx.store();
    let facility_id = facility.id.clone();
    let selection = store.select_facility(facility);
    let mode = store.set_mode(AccountMode::Facility);

    if selection.is_applied() || mode.is_applied() {
        info!(facility = %facility_id, "Selected facility");
        navigator.replace(RouteId::FacilityHome.path());
    } else {
        debug!(facility = %facility_id, ?selection, ?mode, "Facility selection unchanged");
    }
    selection
}

/// Clear the facility selection. The mode is left as is; facility sections
/// will send the user to the picker.
pub fn clear_facility(ctx: &AppContext) -> SetOutcome {
    let outcome = ctx.store().clear_facility();
    if outcome.is_applied() {
        info!("Cleared facility selection");
    }
    outcome
}
