//! Read-only values screens branch on.

use super::onboarding::{resolve_onboarding_stage, OnboardingInput, OnboardingStage};
use crate::policies::{resolve_capabilities, resolve_entitlements, CapabilityMap, Entitlements};
use serde::Serialize;
use verdant_core::{Plan, User};

/// Action-level access for the current user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AccessView {
    /// Resolved capabilities
    pub can: CapabilityMap,
    /// Billing plan they were resolved from
    pub plan: Plan,
}

impl AccessView {
    /// Resolve from a user record.
    pub fn for_user(user: &User) -> Self {
        Self {
            can: resolve_capabilities(user),
            plan: user.plan,
        }
    }
}

/// UI-level feature tiers for the current plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct EntitlementsView {
    /// Billing plan
    pub plan: Plan,
    /// Resolved tiers
    pub entitlements: Entitlements,
}

impl EntitlementsView {
    /// Resolve from a plan.
    pub fn for_plan(plan: Plan) -> Self {
        Self {
            plan,
            entitlements: resolve_entitlements(plan),
        }
    }
}

/// Current onboarding stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnboardingView {
    /// Derived stage
    pub stage: OnboardingStage,
}

impl OnboardingView {
    /// Derive from counts.
    pub fn from_input(input: &OnboardingInput) -> Self {
        Self {
            stage: resolve_onboarding_stage(input),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policies::Capability;
    use verdant_core::AccountMode;

    #[test]
    fn test_access_view_serializes_can_and_plan() {
        let view = AccessView::for_user(&User::new("u1", Plan::Free, AccountMode::Personal));
        assert!(!view.can.can(Capability::PlantDiagnosis));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["plan"], "FREE");
        assert_eq!(json["can"]["viewGrows"], true);
        assert_eq!(json["can"]["support"], "community");
    }

    #[test]
    fn test_onboarding_view_serializes_label() {
        let view = OnboardingView::from_input(&OnboardingInput::counts(0, 0, 0, 0));
        let json = serde_json::to_value(view).unwrap();
        assert_eq!(json, serde_json::json!({ "stage": "create-facility" }));
    }

    #[test]
    fn test_entitlements_view() {
        let view = EntitlementsView::for_plan(Plan::Commercial);
        assert!(view.entitlements.compliance_suite);
        assert_eq!(view.plan, Plan::Commercial);
    }
}
