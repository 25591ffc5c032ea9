//! Nullable tick source: deterministic ticks for testing.

use reserve_types::Tick;
use std::cell::Cell;

/// A deterministic tick counter for testing.
///
/// The counter only advances when you tell it to.
pub struct NullTicker {
    current: Cell<u64>,
}

impl NullTicker {
    pub fn new(initial: u64) -> Self {
        Self {
            current: Cell::new(initial),
        }
    }

    /// Get the current tick.
    pub fn now(&self) -> Tick {
        Tick::new(self.current.get())
    }

    /// Advance by a number of ticks.
    pub fn advance(&self, ticks: u64) {
        self.current.set(self.current.get() + ticks);
    }

    /// Set the counter to a specific value.
    pub fn set(&self, tick: u64) {
        self.current.set(tick);
    }
}

impl Default for NullTicker {
    fn default() -> Self {
        Self::new(0)
    }
}
