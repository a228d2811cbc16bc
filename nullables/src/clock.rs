//! Nullable clock: deterministic time for testing.

use quad_types::Timestamp;
use std::cell::Cell;

/// A deterministic clock for testing.
///
/// Time only advances when you tell it to.
pub struct NullClock {
    current: Cell<u64>,
}

impl NullClock {
    pub fn new(initial_secs: u64) -> Self {
        Self {
            current: Cell::new(initial_secs),
        }
    }

    pub fn now(&self) -> Timestamp {
        Timestamp::new(self.current.get())
    }

    pub fn advance(&self, secs: u64) {
        self.current.set(self.current.get() + secs);
    }

    /// Jump to just past `deadline`, where evaluation is allowed.
    pub fn pass(&self, deadline: Timestamp) {
        self.current.set(deadline.as_secs() + 1);
    }
}
