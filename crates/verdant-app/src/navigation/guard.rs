//! # Routing Guard
//!
//! Reconciles a screen section's required mode with the store.
//!
//! Decision order (first match wins):
//!
//! | required  | actual    | facility selected | outcome                 |
//! |-----------|-----------|-------------------|-------------------------|
//! | FACILITY  | any       | no                | redirect → select       |
//! | X         | X         | -                 | allow                   |
//! | X         | Y ≠ X     | -                 | redirect → home of Y    |
//!
//! Facility sections without a selection always go to the picker, so
//! facility mode never silently shows another mode's content.
//!
//! While a redirect is pending the guarded section must render nothing. A
//! redirect is issued at most once per target: the guard remembers the last
//! target it sent and also skips `replace` when the navigator already shows
//! it.

use super::routes::{Navigator, RouteId};
use crate::store::ModeFacilityStore;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use verdant_core::AccountMode;

/// Pure guard decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", tag = "outcome", content = "target")]
pub enum GuardDecision {
    /// Render the section
    Allow,
    /// Send the user elsewhere
    Redirect(RouteId),
}

/// Decide whether a section requiring `required` may render.
///
/// A mismatched section always lands on the home of the actual mode. In
/// FACILITY mode without a selection that home is itself guarded, so the
/// user reaches the picker on a second hop from the facility home's guard.
pub fn decide(
    required: AccountMode,
    actual: AccountMode,
    facility_selected: bool,
) -> GuardDecision {
    if required == AccountMode::Facility && !facility_selected {
        return GuardDecision::Redirect(RouteId::FacilitySelect);
    }
    if required == actual {
        return GuardDecision::Allow;
    }
    GuardDecision::Redirect(RouteId::home_for(actual))
}

/// What the host should render for the guarded section.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardOutcome {
    /// Render the section's content
    Render,
    /// Render nothing; navigation to `target` is under way
    Redirecting {
        /// Redirect target
        target: RouteId,
    },
}

impl GuardOutcome {
    /// Whether the guarded content may be rendered.
    #[inline]
    pub fn should_render(&self) -> bool {
        matches!(self, Self::Render)
    }
}

/// Stateful guard for one screen section.
#[derive(Debug, Clone)]
pub struct RoutingGuard {
    required: AccountMode,
    pending: Option<RouteId>,
}

impl RoutingGuard {
    /// Guard for a section that requires `required`.
    pub fn new(required: AccountMode) -> Self {
        Self {
            required,
            pending: None,
        }
    }

    /// Mode the section requires.
    pub fn required_mode(&self) -> AccountMode {
        self.required
    }

    /// Target of the redirect issued last, if still pending.
    pub fn pending_redirect(&self) -> Option<RouteId> {
        self.pending
    }

    /// Evaluate against the store, issuing at most one `replace` per target.
    pub fn evaluate<N>(&mut self, store: &ModeFacilityStore, navigator: &N) -> GuardOutcome
    where
        N: Navigator + ?Sized,
    {
        let actual = store.mode();
        let facility_selected = store.has_selected_facility();

        let target = match decide(self.required, actual, facility_selected) {
            GuardDecision::Allow => {
                self.pending = None;
                return GuardOutcome::Render;
            }
            GuardDecision::Redirect(target) => target,
        };

        if self.pending == Some(target) {
            debug!(target = %target, "Redirect already issued");
        } else if navigator.current_path().as_deref() == Some(target.path()) {
            debug!(target = %target, "Already at redirect target");
            self.pending = Some(target);
        } else {
            info!(
                required = %self.required,
                actual = %actual,
                facility_selected,
                target = %target,
                "Redirecting guarded section"
            );
            navigator.replace(target.path());
            self.pending = Some(target);
        }
        GuardOutcome::Redirecting { target }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::navigation::routes::MemoryNavigator;
    use verdant_core::Facility;

    #[test]
    fn test_decision_table_is_exhaustive() {
        for required in AccountMode::all() {
            for actual in AccountMode::all() {
                for selected in [false, true] {
                    let decision = decide(*required, *actual, selected);
                    let expected = if *required == AccountMode::Facility && !selected {
                        GuardDecision::Redirect(RouteId::FacilitySelect)
                    } else if required == actual {
                        GuardDecision::Allow
                    } else {
                        GuardDecision::Redirect(RouteId::home_for(*actual))
                    };
                    assert_eq!(decision, expected, "{required}/{actual}/{selected}");
                }
            }
        }
    }

    #[test]
    fn test_facility_mode_without_selection_goes_to_picker() {
        assert_eq!(
            decide(AccountMode::Facility, AccountMode::Facility, false),
            GuardDecision::Redirect(RouteId::FacilitySelect)
        );
        assert_eq!(
            decide(AccountMode::Facility, AccountMode::Facility, true),
            GuardDecision::Allow
        );
    }

    #[test]
    fn test_mismatch_goes_home_of_actual_mode() {
        assert_eq!(
            decide(AccountMode::Personal, AccountMode::Commercial, false),
            GuardDecision::Redirect(RouteId::CommercialHome)
        );
        assert_eq!(
            decide(AccountMode::Facility, AccountMode::Personal, true),
            GuardDecision::Redirect(RouteId::PersonalHome)
        );
    }

    #[test]
    fn test_personal_user_on_facility_section_redirects_once_to_picker() {
        let store = ModeFacilityStore::new(AccountMode::Personal);
        let nav = MemoryNavigator::new();
        let mut guard = RoutingGuard::new(AccountMode::Facility);

        for _ in 0..3 {
            let outcome = guard.evaluate(&store, &nav);
            assert_eq!(
                outcome,
                GuardOutcome::Redirecting {
                    target: RouteId::FacilitySelect
                }
            );
            assert!(!outcome.should_render());
        }
        assert_eq!(nav.replaced(), vec![RouteId::FacilitySelect.path()]);
    }

    #[test]
    fn test_no_replace_when_already_at_target() {
        let store = ModeFacilityStore::new(AccountMode::Commercial);
        let nav = MemoryNavigator::at(RouteId::CommercialHome.path());
        let mut guard = RoutingGuard::new(AccountMode::Personal);

        assert!(!guard.evaluate(&store, &nav).should_render());
        assert_eq!(nav.replace_count(), 0);
        assert_eq!(guard.pending_redirect(), Some(RouteId::CommercialHome));
    }

    #[test]
    fn test_allow_clears_pending_and_new_target_redirects_again() {
        let store = ModeFacilityStore::new(AccountMode::Facility);
        let nav = MemoryNavigator::new();
        let mut guard = RoutingGuard::new(AccountMode::Facility);

        guard.evaluate(&store, &nav);
        store.select_facility(Facility::new("f1", "North Barn"));
        assert_eq!(guard.evaluate(&store, &nav), GuardOutcome::Render);
        assert_eq!(guard.pending_redirect(), None);

        store.set_mode(AccountMode::Personal);
        guard.evaluate(&store, &nav);
        assert_eq!(
            nav.replaced(),
            vec![RouteId::FacilitySelect.path(), RouteId::PersonalHome.path()]
        );
    }

    #[test]
    fn test_unselected_facility_mode_reaches_picker_via_facility_home() {
        let store = ModeFacilityStore::new(AccountMode::Facility);
        let nav = MemoryNavigator::new();

        let mut commercial = RoutingGuard::new(AccountMode::Commercial);
        assert!(!commercial.evaluate(&store, &nav).should_render());
        let mut facility_home = RoutingGuard::new(AccountMode::Facility);
        assert!(!facility_home.evaluate(&store, &nav).should_render());

        assert_eq!(
            nav.replaced(),
            vec![RouteId::FacilityHome.path(), RouteId::FacilitySelect.path()]
        );
    }

    #[test]
    fn test_matching_mode_renders_without_navigation() {
        let store = ModeFacilityStore::default();
        let nav = MemoryNavigator::new();
        let mut guard = RoutingGuard::new(AccountMode::Commercial);
        assert!(guard.evaluate(&store, &nav).should_render());
        assert_eq!(nav.replace_count(), 0);
        assert_eq!(guard.required_mode(), AccountMode::Commercial);
    }
}
