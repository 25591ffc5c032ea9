//! Aggregate accounting: running liability totals.
//!
//! Totals are never recomputed by scanning positions. Every mutation is
//! staged first ([`Aggregates::stage_entry`], [`Aggregates::stage_exit`]),
//! which performs all checked arithmetic, and committed only after the
//! matching fund movement succeeded. Commit itself cannot fail.

use crate::error::StakingError;
use reserve_types::Address;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Global liability totals.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Totals {
    /// Unclaimed principal over active positions.
    pub total_staked: u128,
    /// Unclaimed reward over active positions.
    pub total_pending_reward: u128,
    /// Reward ever paid to depositors. Never decreases.
    pub total_reward_claimed: u128,
}

impl Totals {
    /// What custody must hold: staked principal plus pending reward.
    pub fn owed(&self) -> Option<u128> {
        self.total_staked.checked_add(self.total_pending_reward)
    }
}

/// Aggregate values computed ahead of a fund movement, applied by
/// [`Aggregates::commit`].
#[derive(Clone, Debug, PartialEq, Eq)]
#[must_use = "a staged update does nothing until committed"]
pub struct AggregateUpdate {
    totals: Totals,
    plan_id: String,
    plan_staked: u128,
    owner: Address,
    owner_staked: u128,
}

/// Global, per-plan and per-owner running totals.
#[derive(Clone, Debug, Default)]
pub struct Aggregates {
    totals: Totals,
    staked_by_plan: HashMap<String, u128>,
    staked_by_owner: HashMap<Address, u128>,
}

impl Aggregates {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn totals(&self) -> Totals {
        self.totals
    }

    pub fn total_staked(&self) -> u128 {
        self.totals.total_staked
    }

    pub fn total_pending_reward(&self) -> u128 {
        self.totals.total_pending_reward
    }

    pub fn total_reward_claimed(&self) -> u128 {
        self.totals.total_reward_claimed
    }

    /// Unclaimed principal staked under `plan_id`.
    pub fn staked_by_plan(&self, plan_id: &str) -> u128 {
        self.staked_by_plan.get(plan_id).copied().unwrap_or(0)
    }

    /// Unclaimed principal staked by `owner` across all plans.
    pub fn staked_by_owner(&self, owner: &Address) -> u128 {
        self.staked_by_owner.get(owner).copied().unwrap_or(0)
    }

    /// Stage a new position of `principal` with `reward` escrowed.
    pub fn stage_entry(
        &self,
        plan_id: &str,
        owner: &Address,
        principal: u128,
        reward: u128,
    ) -> Result<AggregateUpdate, StakingError> {
        let totals = Totals {
            total_staked: self
                .totals
                .total_staked
                .checked_add(principal)
                .ok_or(StakingError::Overflow)?,
            total_pending_reward: self
                .totals
                .total_pending_reward
                .checked_add(reward)
                .ok_or(StakingError::Overflow)?,
            total_reward_claimed: self.totals.total_reward_claimed,
        };
        totals.owed().ok_or(StakingError::Overflow)?;
        Ok(AggregateUpdate {
            totals,
            plan_id: plan_id.to_string(),
            plan_staked: self
                .staked_by_plan(plan_id)
                .checked_add(principal)
                .ok_or(StakingError::Overflow)?,
            owner: owner.clone(),
            owner_staked: self
                .staked_by_owner(owner)
                .checked_add(principal)
                .ok_or(StakingError::Overflow)?,
        })
    }

    /// Stage the removal of `principal` and `reward` from the liabilities.
    ///
    /// `paid_reward` is the part of `reward` actually paid to the depositor;
    /// it is added to the claimed total. Forfeited reward passes `0`.
    pub fn stage_exit(
        &self,
        plan_id: &str,
        owner: &Address,
        principal: u128,
        reward: u128,
        paid_reward: u128,
    ) -> Result<AggregateUpdate, StakingError> {
        let totals = Totals {
            total_staked: self
                .totals
                .total_staked
                .checked_sub(principal)
                .ok_or(StakingError::Overflow)?,
            total_pending_reward: self
                .totals
                .total_pending_reward
                .checked_sub(reward)
                .ok_or(StakingError::Overflow)?,
            total_reward_claimed: self
                .totals
                .total_reward_claimed
                .checked_add(paid_reward)
                .ok_or(StakingError::Overflow)?,
        };
        Ok(AggregateUpdate {
            totals,
            plan_id: plan_id.to_string(),
            plan_staked: self
                .staked_by_plan(plan_id)
                .checked_sub(principal)
                .ok_or(StakingError::Overflow)?,
            owner: owner.clone(),
            owner_staked: self
                .staked_by_owner(owner)
                .checked_sub(principal)
                .ok_or(StakingError::Overflow)?,
        })
    }

    /// Apply a staged update.
    pub fn commit(&mut self, update: AggregateUpdate) {
        self.totals = update.totals;
        self.staked_by_plan.insert(update.plan_id, update.plan_staked);
        self.staked_by_owner.insert(update.owner, update.owner_staked);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn staging_does_not_mutate() {
        let agg = Aggregates::new();
        let alice = Address::new("alice");
        let _staged = agg.stage_entry("bronze", &alice, 10_000, 1000).unwrap();
        assert_eq!(agg.totals(), Totals::default());
        assert_eq!(agg.staked_by_plan("bronze"), 0);
    }

    #[test]
    fn entry_then_partial_and_final_exit() {
        let mut agg = Aggregates::new();
        let alice = Address::new("alice");
        let update = agg.stage_entry("test", &alice, 10_000, 1000).unwrap();
        agg.commit(update);
        assert_eq!(agg.total_staked(), 10_000);
        assert_eq!(agg.total_pending_reward(), 1000);
        assert_eq!(agg.staked_by_owner(&alice), 10_000);

        let update = agg.stage_exit("test", &alice, 5000, 500, 500).unwrap();
        agg.commit(update);
        assert_eq!(agg.total_staked(), 5000);
        assert_eq!(agg.total_pending_reward(), 500);
        assert_eq!(agg.total_reward_claimed(), 500);
        assert_eq!(agg.staked_by_plan("test"), 5000);

        let update = agg.stage_exit("test", &alice, 5000, 500, 500).unwrap();
        agg.commit(update);
        assert_eq!(agg.totals().owed(), Some(0));
        assert_eq!(agg.total_reward_claimed(), 1000);
    }

    #[test]
    fn forfeit_does_not_count_as_claimed() {
        let mut agg = Aggregates::new();
        let alice = Address::new("alice");
        agg.commit(agg.stage_entry("p", &alice, 10_000, 1000).unwrap());
        agg.commit(agg.stage_exit("p", &alice, 10_000, 1000, 0).unwrap());
        assert_eq!(agg.total_pending_reward(), 0);
        assert_eq!(agg.total_reward_claimed(), 0);
    }

    #[test]
    fn per_scope_totals_are_independent() {
        let mut agg = Aggregates::new();
        let alice = Address::new("alice");
        let bob = Address::new("bob");
        agg.commit(agg.stage_entry("test1", &alice, 10_000, 1000).unwrap());
        agg.commit(agg.stage_entry("test2", &alice, 5000, 500).unwrap());
        agg.commit(agg.stage_entry("test1", &bob, 7, 0).unwrap());
        assert_eq!(agg.staked_by_plan("test1"), 10_007);
        assert_eq!(agg.staked_by_plan("test2"), 5000);
        assert_eq!(agg.staked_by_owner(&alice), 15_000);
        assert_eq!(agg.staked_by_owner(&bob), 7);
        assert_eq!(agg.total_staked(), 15_007);
    }

    #[test]
    fn overflow_and_underflow_are_rejected() {
        let mut agg = Aggregates::new();
        let alice = Address::new("alice");
        agg.commit(agg.stage_entry("p", &alice, u128::MAX - 1, 0).unwrap());
        assert!(matches!(
            agg.stage_entry("p", &alice, 2, 0),
            Err(StakingError::Overflow)
        ));
        assert!(matches!(
            agg.stage_entry("q", &Address::new("bob"), 0, 2),
            Err(StakingError::Overflow)
        ));
        assert!(matches!(
            agg.stage_exit("p", &alice, 0, 1, 0),
            Err(StakingError::Overflow)
        ));
    }
}
