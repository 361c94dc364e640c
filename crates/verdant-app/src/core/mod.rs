//! # Core Application Module
//!
//! - [`AppContext`]: root-owned context holding configuration and the store
//! - [`AppConfig`]: application configuration

mod app;

pub use app::{AppConfig, AppContext};
