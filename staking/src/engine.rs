//! The staking engine: entry, exit, emergency exit, pause and sweep over a
//! host fungible asset.
//!
//! Every mutating operation takes `&mut self` and runs to completion before
//! the next one starts. Each follows the same shape: validate, stage the
//! aggregate update (all checked arithmetic happens here), move funds on the
//! host ledger, then commit the position and the staged aggregates. A failure
//! before the commit leaves the engine untouched; a failure of the second
//! inbound pull on entry is compensated in [`crate::funder::escrow_entry`].

use crate::accounting::{Aggregates, Totals};
use crate::config::StakingConfig;
use crate::error::StakingError;
use crate::event::{EventBus, StakingEvent};
use crate::funder::{escrow_entry, TreasuryFunder};
use crate::pause::PauseGate;
use crate::plan::{PlanInfo, PlanRegistry};
use crate::position::{Position, PositionLedger};
use crate::sweep::{ExcessSweeper, SolvencyReport};
use crate::vesting::{Release, VestingEngine};
use reserve_asset::FungibleAsset;
use reserve_types::{Address, Tick};
use serde::{Deserialize, Serialize};

/// Outcome of an emergency exit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmergencyExit {
    /// Unreleased principal returned to the owner.
    pub principal: u128,
    /// Unreleased reward left in custody as excess.
    pub forfeited_reward: u128,
}

/// The staking engine over a host ledger `A`.
pub struct StakingEngine<A: FungibleAsset> {
    asset: A,
    custody: Address,
    operator: Address,
    funder: TreasuryFunder,
    plans: PlanRegistry,
    positions: PositionLedger,
    aggregates: Aggregates,
    gate: PauseGate,
    events: EventBus,
}

impl<A: FungibleAsset> StakingEngine<A> {
    /// Create an engine holding funds in `custody` and pulling rewards from `funder`.
    pub fn new(asset: A, custody: Address, funder: Address, operator: Address) -> Self {
        Self {
            asset,
            custody,
            operator,
            funder: TreasuryFunder::new(funder),
            plans: PlanRegistry::new(),
            positions: PositionLedger::new(),
            aggregates: Aggregates::new(),
            gate: PauseGate::default(),
            events: EventBus::new(),
        }
    }

    /// Build an engine from configuration, registering the configured plans.
    pub fn from_config(config: &StakingConfig, asset: A) -> Result<Self, StakingError> {
        config.validate()?;
        let mut engine = Self::new(
            asset,
            config.custody.clone(),
            config.funder.clone(),
            config.operator.clone(),
        );
        engine.gate = PauseGate::new(config.start_paused);
        for plan in &config.plans {
            engine.register_plan(
                &plan.id,
                plan.reward_rate_bps,
                plan.duration_ticks,
                u128::from(plan.extra_param),
                plan.vesting_period_ticks,
            )?;
        }
        tracing::info!(
            custody = %engine.custody,
            funder = %engine.funder.account(),
            operator = %engine.operator,
            plans = engine.plans.len(),
            paused = engine.gate.is_paused(),
            "staking engine configured"
        );
        Ok(engine)
    }

    /// Register a listener for every event emitted after a successful operation.
    pub fn subscribe(&mut self, listener: Box<dyn Fn(&StakingEvent) + Send + Sync>) {
        self.events.subscribe(listener);
    }

    pub fn asset(&self) -> &A {
        &self.asset
    }

    pub fn custody(&self) -> &Address {
        &self.custody
    }

    pub fn operator(&self) -> &Address {
        &self.operator
    }

    pub fn funder(&self) -> &Address {
        self.funder.account()
    }

    fn ensure_operator(&self, caller: &Address) -> Result<(), StakingError> {
        if *caller != self.operator {
            return Err(StakingError::Unauthorized(caller.clone()));
        }
        Ok(())
    }

    // ── Operator ───────────────────────────────────────────────────────

    /// Register a new immutable plan.
    pub fn create_plan(
        &mut self,
        caller: &Address,
        id: &str,
        reward_rate_bps: u32,
        duration_ticks: u64,
        extra_param: u128,
        vesting_period_ticks: u64,
    ) -> Result<PlanInfo, StakingError> {
        self.ensure_operator(caller)?;
        self.register_plan(
            id,
            reward_rate_bps,
            duration_ticks,
            extra_param,
            vesting_period_ticks,
        )
    }

    fn register_plan(
        &mut self,
        id: &str,
        reward_rate_bps: u32,
        duration_ticks: u64,
        extra_param: u128,
        vesting_period_ticks: u64,
    ) -> Result<PlanInfo, StakingError> {
        let info = self
            .plans
            .create_plan(
                id,
                reward_rate_bps,
                duration_ticks,
                extra_param,
                vesting_period_ticks,
            )?
            .info();
        tracing::info!(
            plan = %info.id,
            reward_rate_bps,
            duration_ticks,
            vesting_period_ticks,
            tranches = info.tranche_count,
            "plan created"
        );
        self.events.emit(&StakingEvent::PlanCreated {
            plan_id: info.id.clone(),
            reward_rate_bps,
            duration_ticks,
            vesting_period_ticks,
        });
        Ok(info)
    }

    /// Block new entries. Exits remain available.
    pub fn pause_staking(&mut self, caller: &Address) -> Result<(), StakingError> {
        self.ensure_operator(caller)?;
        self.gate.pause();
        tracing::info!("staking paused");
        self.events.emit(&StakingEvent::StakingPaused);
        Ok(())
    }

    pub fn resume_staking(&mut self, caller: &Address) -> Result<(), StakingError> {
        self.ensure_operator(caller)?;
        self.gate.resume();
        tracing::info!("staking resumed");
        self.events.emit(&StakingEvent::StakingResumed);
        Ok(())
    }

    /// Move custody balance not owed to any active position to `recipient`.
    ///
    /// Returns the amount moved; zero excess is a successful no-op. The
    /// custody account itself is not a valid recipient.
    pub fn transfer_excess_reward(
        &mut self,
        caller: &Address,
        recipient: &Address,
    ) -> Result<u128, StakingError> {
        self.ensure_operator(caller)?;
        if *recipient == self.custody {
            return Err(StakingError::InvalidRecipient(recipient.clone()));
        }
        let totals = self.aggregates.totals();
        let amount = ExcessSweeper::sweep(&self.asset, &self.custody, recipient, &totals)?;
        if amount > 0 {
            tracing::info!(recipient = %recipient, amount, "excess swept");
            self.events.emit(&StakingEvent::ExcessSwept {
                recipient: recipient.clone(),
                amount,
            });
        } else {
            tracing::debug!(recipient = %recipient, "no excess to sweep");
        }
        Ok(amount)
    }

    /// Hand the operator role to `new_operator`.
    pub fn transfer_operator(
        &mut self,
        caller: &Address,
        new_operator: Address,
    ) -> Result<(), StakingError> {
        self.ensure_operator(caller)?;
        if !new_operator.is_valid() {
            return Err(StakingError::Config(format!(
                "operator address {:?} is not valid",
                new_operator.as_str()
            )));
        }
        let previous = std::mem::replace(&mut self.operator, new_operator);
        tracing::info!(previous = %previous, current = %self.operator, "operator transferred");
        self.events.emit(&StakingEvent::OperatorTransferred {
            previous,
            current: self.operator.clone(),
        });
        Ok(())
    }

    // ── Depositor ──────────────────────────────────────────────────────

    /// Open a position of `amount` under `plan_id` starting at `now`.
    ///
    /// Pulls `amount` from `caller` and the plan's reward from the funder
    /// into custody, both using allowances granted to the custody account.
    /// Returns the new position's permanent index.
    pub fn enter_staking(
        &mut self,
        caller: &Address,
        amount: u128,
        plan_id: &str,
        now: Tick,
    ) -> Result<usize, StakingError> {
        self.gate.ensure_open()?;
        if amount == 0 {
            return Err(StakingError::ZeroAmount);
        }
        let plan = self.plans.get(plan_id)?;
        let reward = plan.reward_for(amount)?;
        amount.checked_add(reward).ok_or(StakingError::Overflow)?;
        let update = self.aggregates.stage_entry(plan_id, caller, amount, reward)?;

        escrow_entry(
            &self.asset,
            &self.custody,
            caller,
            amount,
            &self.funder,
            reward,
        )?;

        let index = self
            .positions
            .append(Position::open(caller.clone(), plan, amount, reward, now));
        self.aggregates.commit(update);

        tracing::info!(
            owner = %caller,
            index,
            plan = %plan_id,
            principal = amount,
            reward,
            start = %now,
            "stake entered"
        );
        self.events.emit(&StakingEvent::Staked {
            owner: caller.clone(),
            index,
            plan_id: plan_id.to_string(),
            principal: amount,
            reward,
            start_tick: now,
        });
        Ok(index)
    }

    /// What [`Self::withdraw_staking`] would pay at `now`, without side effects.
    pub fn preview_release(
        &self,
        owner: &Address,
        index: usize,
        now: Tick,
    ) -> Result<Release, StakingError> {
        let position = self
            .positions
            .get_active(owner, index)
            .ok_or_else(|| StakingError::NotActive {
                owner: owner.clone(),
                index,
            })?;
        let plan = self.plans.get(&position.plan_id)?;
        VestingEngine::compute_release(position, plan, now).ok_or_else(|| {
            StakingError::NotYetVested {
                owner: owner.clone(),
                index,
            }
        })
    }

    /// Pay out every tranche of the caller's position `index` vested by `now`.
    pub fn withdraw_staking(
        &mut self,
        caller: &Address,
        index: usize,
        now: Tick,
    ) -> Result<Release, StakingError> {
        let release = self.preview_release(caller, index, now)?;
        let total = release.total().ok_or(StakingError::Overflow)?;
        let plan_id = self
            .positions
            .get(caller, index)
            .map(|p| p.plan_id.clone())
            .ok_or_else(|| StakingError::NotActive {
                owner: caller.clone(),
                index,
            })?;
        let update = self.aggregates.stage_exit(
            &plan_id,
            caller,
            release.principal,
            release.reward,
            release.reward,
        )?;

        if total > 0 {
            self.asset.transfer(&self.custody, caller, total)?;
        }

        let position = self
            .positions
            .get_mut(caller, index)
            .ok_or_else(|| StakingError::NotActive {
                owner: caller.clone(),
                index,
            })?;
        position.apply_release(&release);
        let tranches_claimed = position.tranches_claimed;
        self.aggregates.commit(update);

        tracing::info!(
            owner = %caller,
            index,
            plan = %plan_id,
            principal = release.principal,
            reward = release.reward,
            tranches = release.newly_vested,
            completed = release.completes,
            "stake withdrawn"
        );
        self.events.emit(&StakingEvent::StakeWithdrawn {
            owner: caller.clone(),
            index,
            principal: release.principal,
            reward: release.reward,
            tranches_claimed,
            completed: release.completes,
        });
        Ok(release)
    }

    /// Close the caller's position `index` immediately.
    ///
    /// Returns the unreleased principal; the unreleased reward is forfeited
    /// and stays in custody, recoverable by [`Self::transfer_excess_reward`].
    pub fn emergency_withdraw(
        &mut self,
        caller: &Address,
        index: usize,
    ) -> Result<EmergencyExit, StakingError> {
        let position = self
            .positions
            .get_active(caller, index)
            .ok_or_else(|| StakingError::NotActive {
                owner: caller.clone(),
                index,
            })?;
        let exit = EmergencyExit {
            principal: position.remaining_principal(),
            forfeited_reward: position.remaining_reward(),
        };
        let plan_id = position.plan_id.clone();
        let update = self.aggregates.stage_exit(
            &plan_id,
            caller,
            exit.principal,
            exit.forfeited_reward,
            0,
        )?;

        if exit.principal > 0 {
            self.asset.transfer(&self.custody, caller, exit.principal)?;
        }

        self.positions
            .get_mut(caller, index)
            .ok_or_else(|| StakingError::NotActive {
                owner: caller.clone(),
                index,
            })?
            .close();
        self.aggregates.commit(update);

        tracing::info!(
            owner = %caller,
            index,
            plan = %plan_id,
            principal = exit.principal,
            forfeited_reward = exit.forfeited_reward,
            "emergency withdraw"
        );
        self.events.emit(&StakingEvent::EmergencyWithdraw {
            owner: caller.clone(),
            index,
            principal: exit.principal,
            forfeited_reward: exit.forfeited_reward,
        });
        Ok(exit)
    }

    // ── Queries ────────────────────────────────────────────────────────

    pub fn get_plan_info(&self, plan_id: &str) -> Result<PlanInfo, StakingError> {
        self.plans.get_plan_info(plan_id)
    }

    /// Plan ids in creation order.
    pub fn plan_ids(&self) -> &[String] {
        self.plans.ids()
    }

    /// Number of positions ever opened by `owner`, inactive ones included.
    pub fn get_stakes_indexes(&self, owner: &Address) -> usize {
        self.positions.count(owner)
    }

    /// Snapshot of `owner`'s position at `index`, active or not.
    pub fn get_stake_info(&self, owner: &Address, index: usize) -> Option<&Position> {
        self.positions.get(owner, index)
    }

    pub fn positions_of(&self, owner: &Address) -> &[Position] {
        self.positions.positions_of(owner)
    }

    pub fn get_staked_amount_by_plan(&self, plan_id: &str) -> u128 {
        self.aggregates.staked_by_plan(plan_id)
    }

    pub fn get_user_staked_amount(&self, owner: &Address) -> u128 {
        self.aggregates.staked_by_owner(owner)
    }

    pub fn total_staked_amount(&self) -> u128 {
        self.aggregates.total_staked()
    }

    pub fn total_pending_reward_amount(&self) -> u128 {
        self.aggregates.total_pending_reward()
    }

    pub fn total_reward_amount_claimed(&self) -> u128 {
        self.aggregates.total_reward_claimed()
    }

    pub fn totals(&self) -> Totals {
        self.aggregates.totals()
    }

    pub fn staking_paused(&self) -> bool {
        self.gate.is_paused()
    }

    /// Compare the custody balance on the host ledger against what is owed.
    pub fn solvency(&self) -> Result<SolvencyReport, StakingError> {
        SolvencyReport::reconcile(
            self.asset.balance_of(&self.custody),
            &self.aggregates.totals(),
        )
    }
}
