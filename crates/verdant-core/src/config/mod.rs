//! Configuration traits shared by Verdant crates.

mod traits;

pub use traits::{VerdantConfig, LOG_LEVELS};
