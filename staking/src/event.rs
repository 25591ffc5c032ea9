//! Events emitted by the staking engine for subscribers.

use reserve_types::{Address, Tick};
use serde::Serialize;

/// Engine-level events that observers can subscribe to via the [`EventBus`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum StakingEvent {
    /// A plan was registered.
    PlanCreated {
        plan_id: String,
        reward_rate_bps: u32,
        duration_ticks: u64,
        vesting_period_ticks: u64,
    },
    /// A position was opened and both principal and reward are in custody.
    Staked {
        owner: Address,
        index: usize,
        plan_id: String,
        principal: u128,
        reward: u128,
        start_tick: Tick,
    },
    /// Vested tranches were paid out.
    StakeWithdrawn {
        owner: Address,
        index: usize,
        principal: u128,
        reward: u128,
        tranches_claimed: u64,
        completed: bool,
    },
    /// A position was closed early; unvested reward stays in custody.
    EmergencyWithdraw {
        owner: Address,
        index: usize,
        principal: u128,
        forfeited_reward: u128,
    },
    StakingPaused,
    StakingResumed,
    /// Custody surplus was moved out.
    ExcessSwept { recipient: Address, amount: u128 },
    OperatorTransferred { previous: Address, current: Address },
}

/// Synchronous fan-out event bus for staking events.
///
/// Listeners are invoked inline after the emitting operation has committed;
/// keep handlers fast.
pub struct EventBus {
    listeners: Vec<Box<dyn Fn(&StakingEvent) + Send + Sync>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StakingEvent) + Send + Sync>) {
        self.listeners.push(listener);
    }

    pub fn emit(&self, event: &StakingEvent) {
        for listener in &self.listeners {
            listener(event);
        }
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
