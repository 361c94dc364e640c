//! ObservableCell<T> - a push-based reactive value
//!
//! `ObservableCell<T>` holds an immutable snapshot behind an `Arc` and
//! notifies registered listeners synchronously whenever the value changes.
//!
//! # Contract
//!
//! - `snapshot()` returns the same `Arc` until the next effective mutation, so
//!   callers can skip redundant work with `Arc::ptr_eq`.
//! - `set(next)` with a value equal to the current one is a no-op: no new
//!   snapshot, no notification.
//! - An effective `set` replaces the snapshot and calls every listener that
//!   was registered when the cycle started, in registration order, before
//!   returning.
//! - A listener registered during a cycle is not called in that cycle.
//! - A `set` issued from inside a listener is queued and applied after the
//!   running cycle has finished, in FIFO order. Each queued value that differs
//!   from the value current at that point starts its own cycle.

use parking_lot::Mutex;
use std::collections::VecDeque;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

type Callback<T> = Arc<dyn Fn(&Arc<T>) + Send + Sync>;

struct ListenerEntry<T> {
    id: u64,
    active: Arc<AtomicBool>,
    callback: Callback<T>,
}

impl<T> Clone for ListenerEntry<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id,
            active: self.active.clone(),
            callback: self.callback.clone(),
        }
    }
}

struct CellState<T> {
    value: Arc<T>,
    version: u64,
    listeners: Vec<ListenerEntry<T>>,
    next_listener_id: u64,
    notifying: bool,
    deferred: VecDeque<T>,
}

impl<T> CellState<T> {
    fn begin_cycle(&mut self) -> (Arc<T>, Vec<ListenerEntry<T>>) {
        self.notifying = true;
        (self.value.clone(), self.listeners.clone())
    }
}

/// Outcome of [`ObservableCell::set`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetOutcome {
    /// The value equalled the current one; nothing happened.
    Unchanged,
    /// The value was replaced and listeners were notified.
    Applied,
    /// Issued during a notification cycle; queued for after the cycle.
    Deferred,
}

impl SetOutcome {
    /// Whether the value was replaced by this call.
    #[inline]
    pub fn is_applied(&self) -> bool {
        matches!(self, Self::Applied)
    }
}

/// A reactive value with synchronous change notification.
///
/// Clones share the same underlying cell.
pub struct ObservableCell<T> {
    name: &'static str,
    inner: Arc<Mutex<CellState<T>>>,
}

impl<T> Clone for ObservableCell<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name,
            inner: self.inner.clone(),
        }
    }
}

impl<T: PartialEq + Send + Sync + 'static> ObservableCell<T> {
    /// Create a cell with the given initial value. `name` is used in logs.
    pub fn new(name: &'static str, value: T) -> Self {
        Self {
            name,
            inner: Arc::new(Mutex::new(CellState {
                value: Arc::new(value),
                version: 0,
                listeners: Vec::new(),
                next_listener_id: 0,
                notifying: false,
                deferred: VecDeque::new(),
            })),
        }
    }

    /// Name used for diagnostics.
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// Current immutable snapshot.
    pub fn snapshot(&self) -> Arc<T> {
        self.inner.lock().value.clone()
    }

    /// Number of effective mutations since creation.
    pub fn version(&self) -> u64 {
        self.inner.lock().version
    }

    /// Number of registered listeners.
    pub fn listener_count(&self) -> usize {
        self.inner.lock().listeners.len()
    }

    /// Whether a notification cycle is running.
    pub fn is_notifying(&self) -> bool {
        self.inner.lock().notifying
    }

    /// Register a listener for future changes.
    ///
    /// The listener is not called with the current value.
    pub fn subscribe<F>(&self, listener: F) -> Subscription<T>
    where
        F: Fn(&Arc<T>) + Send + Sync + 'static,
    {
        let mut state = self.inner.lock();
        let id = state.next_listener_id;
        state.next_listener_id += 1;
        let active = Arc::new(AtomicBool::new(true));
        state.listeners.push(ListenerEntry {
            id,
            active: active.clone(),
            callback: Arc::new(listener),
        });
        Subscription {
            id,
            active,
            cell: Arc::downgrade(&self.inner),
        }
    }

    /// Replace the value, notifying listeners if it changed.
    pub fn set(&self, next: T) -> SetOutcome {
        let (mut snapshot, mut listeners) = {
            let mut state = self.inner.lock();
            if state.notifying {
                state.deferred.push_back(next);
                debug!(
                    cell = self.name,
                    queued = state.deferred.len(),
                    "Deferring re-entrant set until notification cycle completes"
                );
                return SetOutcome::Deferred;
            }
            if *state.value == next {
                return SetOutcome::Unchanged;
            }
            state.value = Arc::new(next);
            state.version += 1;
            debug!(cell = self.name, version = state.version, "Cell updated");
            state.begin_cycle()
        };

        let _cycle = CycleGuard { cell: &self.inner };
        loop {
            for entry in &listeners {
                if entry.active.load(Ordering::Acquire) {
                    (entry.callback)(&snapshot);
                }
            }

            let mut state = self.inner.lock();
            let mut replaced = false;
            while let Some(pending) = state.deferred.pop_front() {
                if *state.value != pending {
                    state.value = Arc::new(pending);
                    state.version += 1;
                    replaced = true;
                    break;
                }
            }
            if !replaced {
                drop(state);
                return SetOutcome::Applied;
            }
            debug!(
                cell = self.name,
                version = state.version,
                "Applying deferred set"
            );
            (snapshot, listeners) = state.begin_cycle();
        }
    }

    /// Replace the value with `f(current)`.
    pub fn update<F>(&self, f: F) -> SetOutcome
    where
        F: FnOnce(&T) -> T,
    {
        let current = self.snapshot();
        self.set(f(&current))
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> ObservableCell<T> {
    /// Clone of the current value.
    pub fn get(&self) -> T {
        self.inner.lock().value.as_ref().clone()
    }
}

impl<T: fmt::Debug> fmt::Debug for ObservableCell<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.lock();
        f.debug_struct("ObservableCell")
            .field("name", &self.name)
            .field("value", &state.value)
            .field("version", &state.version)
            .field("listeners", &state.listeners.len())
            .finish()
    }
}

/// Ends a cycle, including one cut short by a panicking listener. Sets
/// deferred by an unwound cycle are discarded so they cannot surface after
/// a later, unrelated `set`.
struct CycleGuard<'a, T> {
    cell: &'a Mutex<CellState<T>>,
}

impl<T> Drop for CycleGuard<'_, T> {
    fn drop(&mut self) {
        let mut state = self.cell.lock();
        state.notifying = false;
        if !state.deferred.is_empty() {
            warn!(
                discarded = state.deferred.len(),
                "Notification cycle unwound; dropping deferred sets"
            );
            state.deferred.clear();
        }
    }
}

/// Handle returned by [`ObservableCell::subscribe`].
///
/// Dropping the handle keeps the listener registered; call
/// [`Subscription::unsubscribe`] to remove it.
#[must_use = "keep the handle to be able to unsubscribe"]
pub struct Subscription<T> {
    id: u64,
    active: Arc<AtomicBool>,
    cell: Weak<Mutex<CellState<T>>>,
}

impl<T> Subscription<T> {
    /// Remove the listener. It is not called again, even later in a cycle
    /// that is already running.
    ///
    /// Returns `false` if it was already removed or the cell is gone.
    pub fn unsubscribe(self) -> bool {
        let was_active = self.active.swap(false, Ordering::AcqRel);
        if let Some(cell) = self.cell.upgrade() {
            cell.lock().listeners.retain(|entry| entry.id != self.id);
        }
        was_active && self.cell.strong_count() > 0
    }

    /// Whether the listener is still registered.
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::Acquire) && self.cell.strong_count() > 0
    }
}

impl<T> fmt::Debug for Subscription<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    type Listener = Box<dyn Fn(&Arc<u32>) + Send + Sync>;

    fn recorder() -> (Arc<Mutex<Vec<String>>>, impl Fn(&str) -> Listener) {
        let log = Arc::new(Mutex::new(Vec::new()));
        let log_for = log.clone();
        let make = move |tag: &str| {
            let log = log_for.clone();
            let tag = tag.to_string();
            Box::new(move |v: &Arc<u32>| log.lock().push(format!("{tag}:{v}")))
                as Listener
        };
        (log, make)
    }

    #[test]
    fn test_snapshot_reference_is_stable_until_change() {
        let cell = ObservableCell::new("test", 1u32);
        let a = cell.snapshot();
        let b = cell.snapshot();
        assert!(Arc::ptr_eq(&a, &b));

        assert_eq!(cell.set(2), SetOutcome::Applied);
        let c = cell.snapshot();
        assert!(!Arc::ptr_eq(&a, &c));
        assert_eq!(*c, 2);
    }

    #[test]
    fn test_equal_set_is_noop() {
        let cell = ObservableCell::new("test", 7u32);
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let _sub = cell.subscribe(move |_| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let before = cell.snapshot();
        assert_eq!(cell.set(7), SetOutcome::Unchanged);
        assert!(Arc::ptr_eq(&before, &cell.snapshot()));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(cell.version(), 0);
    }

    #[test]
    fn test_listeners_notified_in_registration_order() {
        let cell = ObservableCell::new("test", 0u32);
        let (log, make) = recorder();
        let _a = cell.subscribe(make("a"));
        let _b = cell.subscribe(make("b"));
        let _c = cell.subscribe(make("c"));

        cell.set(5);
        assert_eq!(*log.lock(), vec!["a:5", "b:5", "c:5"]);
    }

    #[test]
    fn test_listener_added_during_cycle_waits_for_next_cycle() {
        let cell = ObservableCell::new("test", 0u32);
        let (log, make) = recorder();
        let late = Arc::new(Mutex::new(Vec::new()));

        let cell_in = cell.clone();
        let late_in = late.clone();
        let added = Arc::new(AtomicBool::new(false));
        let _outer = cell.subscribe(move |_| {
            if !added.swap(true, Ordering::SeqCst) {
                let late = late_in.clone();
                let sub = cell_in.subscribe(move |v| late.lock().push(**v));
                std::mem::forget(sub);
            }
        });
        let _tail = cell.subscribe(make("tail"));

        cell.set(1);
        assert!(late.lock().is_empty());
        assert_eq!(*log.lock(), vec!["tail:1"]);

        cell.set(2);
        assert_eq!(*late.lock(), vec![2]);
    }

    #[test]
    fn test_reentrant_set_is_deferred_until_cycle_completes() {
        let cell = ObservableCell::new("test", 0u32);
        let (log, make) = recorder();

        let cell_in = cell.clone();
        let outcomes = Arc::new(Mutex::new(Vec::new()));
        let outcomes_in = outcomes.clone();
        let _bump = cell.subscribe(move |v| {
            if **v == 1 {
                outcomes_in.lock().push(cell_in.set(10));
            }
        });
        let _watch = cell.subscribe(make("watch"));

        assert_eq!(cell.set(1), SetOutcome::Applied);
        // The second listener saw 1 before the deferred 10 was applied.
        assert_eq!(*log.lock(), vec!["watch:1", "watch:10"]);
        assert_eq!(*outcomes.lock(), vec![SetOutcome::Deferred]);
        assert_eq!(*cell.snapshot(), 10);
        assert!(!cell.is_notifying());
    }

    #[test]
    fn test_deferred_equal_value_is_dropped() {
        let cell = ObservableCell::new("test", 0u32);
        let calls = Arc::new(AtomicUsize::new(0));
        let cell_in = cell.clone();
        let counter = calls.clone();
        let _sub = cell.subscribe(move |v| {
            counter.fetch_add(1, Ordering::SeqCst);
            let _ = cell_in.set(**v);
        });

        cell.set(3);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(cell.version(), 1);
    }

    #[test]
    fn test_unsubscribe_stops_notifications() {
        let cell = ObservableCell::new("test", 0u32);
        let (log, make) = recorder();
        let sub = cell.subscribe(make("a"));
        cell.set(1);
        assert!(sub.is_active());
        assert!(sub.unsubscribe());
        cell.set(2);
        assert_eq!(*log.lock(), vec!["a:1"]);
        assert_eq!(cell.listener_count(), 0);
    }

    #[test]
    fn test_unsubscribe_during_cycle_skips_remaining_call() {
        let cell = ObservableCell::new("test", 0u32);
        let (log, make) = recorder();
        let victim: Arc<Mutex<Option<Subscription<u32>>>> = Arc::new(Mutex::new(None));

        let victim_in = victim.clone();
        let _first = cell.subscribe(move |_| {
            if let Some(sub) = victim_in.lock().take() {
                sub.unsubscribe();
            }
        });
        *victim.lock() = Some(cell.subscribe(make("victim")));

        cell.set(1);
        assert!(log.lock().is_empty());
    }

    #[test]
    fn test_panicking_listener_discards_deferred_sets() {
        let cell = ObservableCell::new("test", 0u32);
        let seen = Arc::new(Mutex::new(Vec::new()));

        let deferring = cell.clone();
        let _defer = cell.subscribe(move |v| {
            if **v == 1 {
                deferring.set(99);
            }
        });
        let _boom = cell.subscribe(|v| {
            if **v == 1 {
                panic!("listener failure");
            }
        });
        let seen_in = seen.clone();
        let _watch = cell.subscribe(move |v| seen_in.lock().push(**v));

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| cell.set(1)));
        assert!(result.is_err());
        assert!(!cell.is_notifying());
        assert_eq!(cell.get(), 1);

        assert_eq!(cell.set(5), SetOutcome::Applied);
        assert_eq!(cell.get(), 5);
        assert_eq!(*seen.lock(), vec![5]);
    }

    #[test]
    fn test_update_applies_function() {
        let cell = ObservableCell::new("test", 2u32);
        assert_eq!(cell.update(|v| v * 3), SetOutcome::Applied);
        assert_eq!(cell.get(), 6);
        assert_eq!(cell.update(|v| *v), SetOutcome::Unchanged);
    }

    #[test]
    fn test_clones_share_state() {
        let cell = ObservableCell::new("test", 0u32);
        let other = cell.clone();
        other.set(4);
        assert_eq!(cell.get(), 4);
        assert_eq!(cell.name(), "test");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn listeners_see_each_distinct_change_in_order(
                values in prop::collection::vec(0u32..4, 0..32),
            ) {
                let cell = ObservableCell::new("prop", 0u32);
                let seen = Arc::new(Mutex::new(Vec::new()));
                let seen_in = seen.clone();
                let _sub = cell.subscribe(move |v| seen_in.lock().push(**v));

                let mut expected = Vec::new();
                let mut current = 0u32;
                for value in values {
                    let outcome = cell.set(value);
                    if value == current {
                        prop_assert_eq!(outcome, SetOutcome::Unchanged);
                    } else {
                        prop_assert_eq!(outcome, SetOutcome::Applied);
                        expected.push(value);
                        current = value;
                    }
                }
                prop_assert_eq!(&*seen.lock(), &expected);
                prop_assert_eq!(cell.version(), expected.len() as u64);
            }
        }
    }
}
