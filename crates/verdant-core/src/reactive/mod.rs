//! # Reactive Primitives
//!
//! - [`ObservableCell<T>`]: a value with synchronous, ordered change
//!   notification and stable snapshot references.
//! - [`Subscription<T>`]: handle used to remove a listener.
//! - [`SetOutcome`]: what a `set` call did.
//!
//! ## Usage
//!
//! ```rust
//! use verdant_core::reactive::{ObservableCell, SetOutcome};
//!
//! let cell = ObservableCell::new("counter", 0u32);
//! let sub = cell.subscribe(|value| println!("now {value}"));
//!
//! assert_eq!(cell.set(1), SetOutcome::Applied);
//! assert_eq!(cell.set(1), SetOutcome::Unchanged);
//! assert!(sub.unsubscribe());
//! ```

mod cell;

pub use cell::{ObservableCell, SetOutcome, Subscription};
