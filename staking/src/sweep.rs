//! Excess sweeping and solvency reconciliation.

use crate::accounting::Totals;
use crate::error::StakingError;
use reserve_asset::FungibleAsset;
use reserve_types::Address;
use serde::{Deserialize, Serialize};

/// Custody balance compared against what active positions are owed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolvencyReport {
    pub custody_balance: u128,
    /// `total_staked + total_pending_reward`.
    pub owed: u128,
    /// Custody balance above `owed`: forfeited reward or stray deposits.
    pub excess: u128,
    /// `owed` above custody balance. Non-zero only if the host ledger moved
    /// custody funds behind the engine's back.
    pub shortfall: u128,
}

impl SolvencyReport {
    pub fn reconcile(custody_balance: u128, totals: &Totals) -> Result<Self, StakingError> {
        let owed = totals.owed().ok_or(StakingError::Overflow)?;
        Ok(Self {
            custody_balance,
            owed,
            excess: custody_balance.saturating_sub(owed),
            shortfall: owed.saturating_sub(custody_balance),
        })
    }

    pub fn is_solvent(&self) -> bool {
        self.shortfall == 0
    }
}

/// Recovers custody balance that no active position is owed.
pub struct ExcessSweeper;

impl ExcessSweeper {
    /// Transfer exactly the current excess from `custody` to `recipient`.
    ///
    /// Returns the amount moved. Zero excess is a successful no-op.
    pub fn sweep<A: FungibleAsset>(
        asset: &A,
        custody: &Address,
        recipient: &Address,
        totals: &Totals,
    ) -> Result<u128, StakingError> {
        let report = SolvencyReport::reconcile(asset.balance_of(custody), totals)?;
        if !report.is_solvent() {
            tracing::warn!(
                custody_balance = report.custody_balance,
                owed = report.owed,
                shortfall = report.shortfall,
                "custody holds less than owed: nothing to sweep"
            );
        }
        if report.excess == 0 {
            return Ok(0);
        }
        asset.transfer(custody, recipient, report.excess)?;
        Ok(report.excess)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reserve_nullables::NullLedger;

    fn totals(staked: u128, pending: u128) -> Totals {
        Totals {
            total_staked: staked,
            total_pending_reward: pending,
            total_reward_claimed: 0,
        }
    }

    #[test]
    fn report_splits_excess_and_shortfall() {
        let report = SolvencyReport::reconcile(12_000, &totals(10_000, 1000)).unwrap();
        assert_eq!((report.excess, report.shortfall), (1000, 0));
        assert!(report.is_solvent());

        let report = SolvencyReport::reconcile(10_500, &totals(10_000, 1000)).unwrap();
        assert_eq!((report.excess, report.shortfall), (0, 500));
        assert!(!report.is_solvent());
    }

    #[test]
    fn sweeps_only_the_surplus() {
        let ledger = NullLedger::new();
        let vault = Address::new("vault");
        let ops = Address::new("ops");
        ledger.mint(&vault, 11_250);
        let moved = ExcessSweeper::sweep(&ledger, &vault, &ops, &totals(10_000, 1000)).unwrap();
        assert_eq!(moved, 250);
        assert_eq!(ledger.balance_of(&vault), 11_000);
        assert_eq!(
            ExcessSweeper::sweep(&ledger, &vault, &ops, &totals(10_000, 1000)).unwrap(),
            0
        );
    }

    #[test]
    fn shortfall_sweeps_nothing() {
        let ledger = NullLedger::new();
        let vault = Address::new("vault");
        ledger.mint(&vault, 5);
        let moved =
            ExcessSweeper::sweep(&ledger, &vault, &Address::new("ops"), &totals(10, 0)).unwrap();
        assert_eq!(moved, 0);
        assert_eq!(ledger.balance_of(&vault), 5);
    }
}
