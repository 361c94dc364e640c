//! # View State Module
//!
//! Read-only values handed to the UI collaborator. They serialize to the
//! shapes screens branch on:
//!
//! - `{ can, plan }` for action gating
//! - `{ plan, entitlements }` for feature tiers
//! - `{ stage }` for first-run sequencing

pub mod access;
pub mod onboarding;

pub use access::{AccessView, EntitlementsView, OnboardingView};
pub use onboarding::{resolve_onboarding_stage, OnboardingInput, OnboardingStage};
