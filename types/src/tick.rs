//! Tick type used as the sole time proxy.
//!
//! Ticks are supplied by the host (block height, slot, or any other
//! monotonically increasing counter). The engine never reads a wall clock.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the host's monotonically increasing tick counter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tick(u64);

impl Tick {
    /// Tick zero.
    pub const ZERO: Self = Self(0);

    pub fn new(value: u64) -> Self {
        Self(value)
    }

    /// Ticks elapsed since this tick (relative to `now`). Zero if `now` precedes it.
    pub fn elapsed_since(&self, now: Tick) -> u64 {
        now.0.saturating_sub(self.0)
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
