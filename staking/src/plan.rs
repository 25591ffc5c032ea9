//! Plan registry: immutable named reward/vesting templates.

use crate::error::StakingError;
use reserve_types::bps_of;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A reward/vesting template. Never mutated after registration.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Plan {
    pub id: String,
    /// Reward as basis points of principal, truncated.
    pub reward_rate_bps: u32,
    pub duration_ticks: u64,
    /// Recorded verbatim. No engine behaviour depends on it.
    pub extra_param: u128,
    /// `0` means a single cliff tranche at `duration_ticks`.
    pub vesting_period_ticks: u64,
}

impl Plan {
    /// Validate the fields and build a plan.
    pub fn new(
        id: impl Into<String>,
        reward_rate_bps: u32,
        duration_ticks: u64,
        extra_param: u128,
        vesting_period_ticks: u64,
    ) -> Result<Self, StakingError> {
        let id = id.into();
        if id.is_empty() {
            return Err(StakingError::EmptyPlanId);
        }
        if duration_ticks == 0 {
            return Err(StakingError::ZeroDuration);
        }
        if vesting_period_ticks != 0 && duration_ticks % vesting_period_ticks != 0 {
            return Err(StakingError::VestingPeriodMismatch {
                duration: duration_ticks,
                vesting_period: vesting_period_ticks,
            });
        }
        Ok(Self {
            id,
            reward_rate_bps,
            duration_ticks,
            extra_param,
            vesting_period_ticks,
        })
    }

    /// Number of equal tranches a position on this plan vests in.
    pub fn tranche_count(&self) -> u64 {
        if self.vesting_period_ticks == 0 {
            1
        } else {
            self.duration_ticks / self.vesting_period_ticks
        }
    }

    /// Ticks per tranche. A cliff plan is one period spanning the full duration.
    pub fn effective_vesting_period(&self) -> u64 {
        if self.vesting_period_ticks == 0 {
            self.duration_ticks
        } else {
            self.vesting_period_ticks
        }
    }

    pub fn is_cliff(&self) -> bool {
        self.vesting_period_ticks == 0
    }

    /// `principal * reward_rate_bps / 10_000`, truncated.
    pub fn reward_for(&self, principal: u128) -> Result<u128, StakingError> {
        bps_of(principal, self.reward_rate_bps).ok_or(StakingError::Overflow)
    }

    pub fn info(&self) -> PlanInfo {
        PlanInfo {
            id: self.id.clone(),
            reward_rate_bps: self.reward_rate_bps,
            duration_ticks: self.duration_ticks,
            extra_param: self.extra_param,
            vesting_period_ticks: self.vesting_period_ticks,
            effective_vesting_period_ticks: self.effective_vesting_period(),
            tranche_count: self.tranche_count(),
        }
    }
}

/// Read-only view of a plan, including derived fields.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanInfo {
    pub id: String,
    pub reward_rate_bps: u32,
    pub duration_ticks: u64,
    pub extra_param: u128,
    pub vesting_period_ticks: u64,
    pub effective_vesting_period_ticks: u64,
    pub tranche_count: u64,
}

/// Append-only registry of plans keyed by id.
#[derive(Clone, Debug, Default)]
pub struct PlanRegistry {
    plans: HashMap<String, Plan>,
    /// Plan ids in creation order.
    order: Vec<String>,
}

impl PlanRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new plan. Existing ids are never overwritten.
    pub fn create_plan(
        &mut self,
        id: impl Into<String>,
        reward_rate_bps: u32,
        duration_ticks: u64,
        extra_param: u128,
        vesting_period_ticks: u64,
    ) -> Result<&Plan, StakingError> {
        let plan = Plan::new(
            id,
            reward_rate_bps,
            duration_ticks,
            extra_param,
            vesting_period_ticks,
        )?;
        if self.plans.contains_key(&plan.id) {
            return Err(StakingError::DuplicatePlan(plan.id));
        }
        let id = plan.id.clone();
        self.order.push(id.clone());
        Ok(self.plans.entry(id).or_insert(plan))
    }

    pub fn get(&self, id: &str) -> Result<&Plan, StakingError> {
        self.plans
            .get(id)
            .ok_or_else(|| StakingError::PlanNotFound(id.to_string()))
    }

    pub fn get_plan_info(&self, id: &str) -> Result<PlanInfo, StakingError> {
        self.get(id).map(Plan::info)
    }

    /// Plan ids in creation order.
    pub fn ids(&self) -> &[String] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
