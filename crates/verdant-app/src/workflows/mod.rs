//! # Workflows
//!
//! Commands that mutate application state on behalf of the UI.

pub mod mode;

pub use mode::{clear_facility, select_facility, switch_mode};
