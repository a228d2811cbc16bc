//! Block-time timestamps and voting deadlines.
//!
//! The engine never reads the clock itself; every operation receives `now`
//! from its caller so evaluation is deterministic.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Unix time in whole seconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Timestamp(u64);

impl Timestamp {
    pub const EPOCH: Self = Self(0);

    pub fn new(secs: u64) -> Self {
        Self(secs)
    }

    pub fn as_secs(&self) -> u64 {
        self.0
    }

    /// This timestamp moved `secs` into the future, saturating at `u64::MAX`.
    pub fn plus_secs(self, secs: u64) -> Self {
        Self(self.0.saturating_add(secs))
    }

    /// Seconds from `now` until this timestamp; zero once it has passed.
    pub fn remaining_from(&self, now: Timestamp) -> u64 {
        self.0.saturating_sub(now.0)
    }

    /// Whether `now` has reached this deadline. A deadline is reached at its
    /// own second.
    pub fn is_reached(&self, now: Timestamp) -> bool {
        now.0 >= self.0
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn deadline_is_reached_at_its_own_second() {
        let deadline = Timestamp::new(100).plus_secs(50);
        assert!(!deadline.is_reached(Timestamp::new(149)));
        assert!(deadline.is_reached(Timestamp::new(150)));
        assert_eq!(deadline.remaining_from(Timestamp::new(120)), 30);
        assert_eq!(deadline.remaining_from(Timestamp::new(200)), 0);
    }

    #[test]
    fn plus_secs_saturates() {
        assert_eq!(Timestamp::new(u64::MAX - 1).plus_secs(10).as_secs(), u64::MAX);
    }
}
