//! Global tracker container.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Web Worker keeps the module alive, so the tracker lives for the
//! whole browser session and every request goes through the same instance.

use std::cell::RefCell;

use crate::error::Result;
use crate::game::tracker::LifeTracker;

thread_local! {
    static TRACKER: RefCell<LifeTracker> = RefCell::new(LifeTracker::new());
}

/// Execute a closure with read access to the tracker.
pub fn with_tracker<F, R>(f: F) -> R
where
    F: FnOnce(&LifeTracker) -> R,
{
    TRACKER.with(|t| f(&t.borrow()))
}

/// Execute a closure with mutable access to the tracker. This is the only
/// mutation path, so cross-player history stays in one serialized order.
pub fn with_tracker_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut LifeTracker) -> R,
{
    TRACKER.with(|t| f(&mut t.borrow_mut()))
}

/// Replace the tracker with a fresh one (start of a new session, tests).
pub fn reset_tracker() {
    TRACKER.with(|t| {
        *t.borrow_mut() = LifeTracker::new();
    });
}

/// Serialize the current tracker snapshot as JSON.
pub fn export_state_json() -> Result<String> {
    Ok(with_tracker(|t| serde_json::to_string(&t.snapshot()))?)
}
