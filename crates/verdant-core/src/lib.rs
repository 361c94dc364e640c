//! Verdant Core - foundation layer
//!
//! Domain vocabulary and runtime-agnostic building blocks shared by the
//! application crates. Nothing in here makes policy decisions.
//!
//! - [`account`]: plans, operating modes, facility roles, users, facilities
//! - [`identifiers`]: opaque account and facility identifiers
//! - [`errors`]: unified error type
//! - [`config`]: layered configuration trait
//! - [`reactive`]: observable cells with ordered, re-entrancy-safe notification

#![forbid(unsafe_code)]

pub mod account;
pub mod config;
pub mod errors;
pub mod identifiers;
pub mod reactive;

pub use account::{AccountMode, Facility, FacilityRole, Plan, User};
pub use config::VerdantConfig;
pub use errors::{Result, VerdantError};
pub use identifiers::{FacilityId, UserId};
