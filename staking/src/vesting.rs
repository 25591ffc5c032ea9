//! Vesting engine: pure tranche-release arithmetic.
//!
//! Releases use cumulative-floor differencing. After `k` of `n` tranches the
//! depositor has been paid `F(k) = floor(T·k/n)` in total, where `T` is
//! principal plus reward. Of that, `floor(P·F(k)/T)` is principal and the
//! rest is reward. Both cumulative series are non-decreasing and end at
//! exactly `P` and `R`, so the final tranche absorbs every remainder and no
//! unit is lost or paid twice.

use crate::plan::Plan;
use crate::position::Position;
use reserve_types::{mul_div_floor_wide, Tick};
use serde::{Deserialize, Serialize};

/// Amounts that become payable on one exit call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Release {
    pub principal: u128,
    pub reward: u128,
    /// Tranches vested as of `now`; becomes the position's `tranches_claimed`.
    pub vested_tranches: u64,
    /// Tranches newly covered by this release (may be more than one).
    pub newly_vested: u64,
    /// Whether this release pays the final tranche.
    pub completes: bool,
}

impl Release {
    /// Principal plus reward, `None` on overflow.
    pub fn total(&self) -> Option<u128> {
        self.principal.checked_add(self.reward)
    }
}

/// `floor(amount * k / n)` for `k <= n`.
///
/// With `k <= n` the whole part is at most `amount` and the remainder part
/// is below `n * n`, so neither term can overflow.
pub fn tranche_floor(amount: u128, k: u64, n: u64) -> u128 {
    if n == 0 || k >= n {
        return amount;
    }
    let (k, n) = (k as u128, n as u128);
    (amount / n) * k + (amount % n) * k / n
}

/// Cumulative `(principal, reward)` paid once `k` of `n` tranches are claimed.
pub fn cumulative_release(principal: u128, reward: u128, k: u64, n: u64) -> (u128, u128) {
    let total = principal.saturating_add(reward);
    if total == 0 {
        return (0, 0);
    }
    let paid = tranche_floor(total, k, n);
    // paid <= total keeps the quotient within principal.
    let paid_principal = mul_div_floor_wide(principal, paid, total).unwrap_or(principal);
    (paid_principal, paid - paid_principal)
}

/// Stateless tranche computation over a position and the current tick.
pub struct VestingEngine;

impl VestingEngine {
    /// Tranches vested at `now`, capped at the position's tranche count.
    pub fn vested_tranches(position: &Position, plan: &Plan, now: Tick) -> u64 {
        let effective = position
            .start_tick
            .elapsed_since(now)
            .min(plan.duration_ticks);
        if plan.vesting_period_ticks == 0 {
            if effective >= plan.duration_ticks {
                1
            } else {
                0
            }
        } else {
            (effective / plan.vesting_period_ticks).min(position.tranche_count)
        }
    }

    /// Compute the release owed to `position` at `now`.
    ///
    /// Returns `None` when no tranche matured since the last claim. The
    /// position itself is not modified.
    pub fn compute_release(position: &Position, plan: &Plan, now: Tick) -> Option<Release> {
        let vested = Self::vested_tranches(position, plan, now);
        if vested <= position.tranches_claimed {
            return None;
        }
        let n = position.tranche_count;
        let (p_before, r_before) =
            cumulative_release(position.principal, position.reward_total, position.tranches_claimed, n);
        let (p_after, r_after) =
            cumulative_release(position.principal, position.reward_total, vested, n);
        tracing::debug!(
            owner = %position.owner,
            plan = %position.plan_id,
            vested,
            claimed = position.tranches_claimed,
            tranches = n,
            "computed vesting release"
        );
        Some(Release {
            principal: p_after - p_before,
            reward: r_after - r_before,
            vested_tranches: vested,
            newly_vested: vested - position.tranches_claimed,
            completes: vested == n,
        })
    }
}
