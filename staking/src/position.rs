//! Positions and the per-owner append-only position ledger.

use crate::plan::Plan;
use crate::vesting::{cumulative_release, Release};
use reserve_types::{Address, Tick};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// One depositor's locked principal against one plan.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub owner: Address,
    pub plan_id: String,
    pub principal: u128,
    /// Fixed at creation: `principal * rate / 10_000`.
    pub reward_total: u128,
    pub start_tick: Tick,
    /// Copied from the plan at creation.
    pub tranche_count: u64,
    pub tranches_claimed: u64,
    /// Cleared on full vesting or emergency exit; never set again.
    pub active: bool,
}

impl Position {
    /// A fresh active position with nothing claimed.
    pub fn open(
        owner: Address,
        plan: &Plan,
        principal: u128,
        reward_total: u128,
        start_tick: Tick,
    ) -> Self {
        Self {
            owner,
            plan_id: plan.id.clone(),
            principal,
            reward_total,
            start_tick,
            tranche_count: plan.tranche_count(),
            tranches_claimed: 0,
            active: true,
        }
    }

    /// Principal already paid out by regular withdrawals.
    pub fn released_principal(&self) -> u128 {
        self.released().0
    }

    /// Reward already paid out by regular withdrawals.
    pub fn released_reward(&self) -> u128 {
        self.released().1
    }

    /// Principal still held in custody for this position.
    pub fn remaining_principal(&self) -> u128 {
        self.principal - self.released_principal()
    }

    /// Reward still held in custody for this position.
    pub fn remaining_reward(&self) -> u128 {
        self.reward_total - self.released_reward()
    }

    pub fn is_fully_vested(&self) -> bool {
        self.tranches_claimed >= self.tranche_count
    }

    fn released(&self) -> (u128, u128) {
        cumulative_release(
            self.principal,
            self.reward_total,
            self.tranches_claimed,
            self.tranche_count,
        )
    }

    /// Advance the claimed tranche count after a successful payout.
    pub fn apply_release(&mut self, release: &Release) {
        self.tranches_claimed = release.vested_tranches;
        if self.is_fully_vested() {
            self.active = false;
        }
    }

    /// Close the position without further vesting.
    pub fn close(&mut self) {
        self.active = false;
    }
}

/// Per-owner append-only position sequences.
///
/// Indices are permanent: entries are never removed or compacted, only their
/// `active` flag flips.
#[derive(Clone, Debug, Default)]
pub struct PositionLedger {
    positions: HashMap<Address, Vec<Position>>,
}

impl PositionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a position for its owner and return its permanent index.
    pub fn append(&mut self, position: Position) -> usize {
        let list = self.positions.entry(position.owner.clone()).or_default();
        list.push(position);
        list.len() - 1
    }

    pub fn get(&self, owner: &Address, index: usize) -> Option<&Position> {
        self.positions.get(owner).and_then(|list| list.get(index))
    }

    pub fn get_mut(&mut self, owner: &Address, index: usize) -> Option<&mut Position> {
        self.positions.get_mut(owner).and_then(|list| list.get_mut(index))
    }

    /// The position at `index` if it exists and is still active.
    pub fn get_active(&self, owner: &Address, index: usize) -> Option<&Position> {
        self.get(owner, index).filter(|p| p.active)
    }

    /// Number of positions ever created for `owner`, including inactive ones.
    pub fn count(&self, owner: &Address) -> usize {
        self.positions.get(owner).map_or(0, Vec::len)
    }

    /// All positions of `owner` in index order.
    pub fn positions_of(&self, owner: &Address) -> &[Position] {
        self.positions.get(owner).map(Vec::as_slice).unwrap_or(&[])
    }
}
