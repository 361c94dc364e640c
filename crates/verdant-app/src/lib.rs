//! # Verdant App - Portable Headless Application Core
//!
//! Decides what an account may do and where it may go:
//!
//! - [`policies`]: plan/mode/role → capabilities, plan → entitlements
//! - [`store`]: observable current mode and selected facility
//! - [`navigation`]: route table and the routing guard
//! - [`views`]: onboarding stage derivation and read-only UI values
//! - [`workflows`]: mode switching and facility selection
//! - [`authorization`]: `require_*` helpers over capability maps
//!
//! Everything hangs off an [`AppContext`] owned by the host's root:
//!
//! ```rust
//! use verdant_app::navigation::{MemoryNavigator, RouteId};
//! use verdant_app::{workflows, AppContext};
//! use verdant_core::AccountMode;
//!
//! let ctx = AppContext::default();
//! let nav = MemoryNavigator::new();
//!
//! let mut guard = ctx.guard(AccountMode::Facility);
//! assert!(!guard.evaluate(ctx.store(), &nav).should_render());
//! assert_eq!(nav.replaced(), vec![RouteId::FacilitySelect.path()]);
//!
//! workflows::switch_mode(&ctx, AccountMode::Personal, &nav);
//! assert_eq!(ctx.store().mode(), AccountMode::Personal);
//! ```

#![forbid(unsafe_code)]

pub mod authorization;
pub mod core;
pub mod navigation;
pub mod policies;
pub mod store;
pub mod ui;
pub mod views;
pub mod workflows;

pub use crate::core::{AppConfig, AppContext};
pub use store::ModeFacilityStore;
