//! Pause gate: blocks new entries only.
//!
//! Exits (`withdraw_staking`, `emergency_withdraw`) never consult the gate,
//! so a pause can never trap depositor funds.

use crate::error::StakingError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PauseGate {
    paused: bool,
}

impl PauseGate {
    pub fn new(paused: bool) -> Self {
        Self { paused }
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn resume(&mut self) {
        self.paused = false;
    }

    /// Fail with [`StakingError::StakingPaused`] while paused.
    pub fn ensure_open(&self) -> Result<(), StakingError> {
        if self.paused {
            Err(StakingError::StakingPaused)
        } else {
            Ok(())
        }
    }
}
