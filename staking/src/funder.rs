//! Treasury-funded reward escrow.
//!
//! Rewards are not minted or drawn from an internal pool: at entry the
//! engine pulls them from a funding account that granted the custody account
//! an allowance on the host ledger. The funder is injected at construction;
//! the engine never owns it.

use crate::error::StakingError;
use reserve_asset::{AssetError, FungibleAsset};
use reserve_types::Address;

/// The pre-approved account that supplies reward tokens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreasuryFunder {
    account: Address,
}

impl TreasuryFunder {
    pub fn new(account: Address) -> Self {
        Self { account }
    }

    pub fn account(&self) -> &Address {
        &self.account
    }

    /// Pull `amount` from the funder into `custody` using the funder's
    /// allowance to `custody`. A zero amount moves nothing.
    pub fn pull_reward<A: FungibleAsset>(
        &self,
        asset: &A,
        custody: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        if amount == 0 {
            return Ok(());
        }
        asset.transfer_from(custody, &self.account, custody, amount)
    }
}

/// Move both legs of an entry into custody as one unit.
///
/// Both source balances are checked up front, then the reward is pulled from
/// the funder and only afterwards the principal from the depositor. A failure
/// on the funder's side therefore moves nothing and leaves the depositor's
/// allowance untouched. If the principal pull fails the reward is returned to
/// the funder before the error is returned; the funder's allowance consumed
/// by that pull is not restored.
pub fn escrow_entry<A: FungibleAsset>(
    asset: &A,
    custody: &Address,
    depositor: &Address,
    principal: u128,
    funder: &TreasuryFunder,
    reward: u128,
) -> Result<(), StakingError> {
    ensure_balance(asset, funder.account(), reward)?;
    ensure_balance(asset, depositor, principal)?;

    funder.pull_reward(asset, custody, reward)?;

    if let Err(original) = asset.transfer_from(custody, depositor, custody, principal) {
        if reward > 0 {
            if let Err(rollback) = asset.transfer(custody, funder.account(), reward) {
                tracing::error!(
                    depositor = %depositor,
                    funder = %funder.account(),
                    reward,
                    original = %original,
                    rollback = %rollback,
                    "principal pull failed and reward refund failed"
                );
                return Err(StakingError::RollbackFailed { original, rollback });
            }
        }
        tracing::warn!(
            depositor = %depositor,
            funder = %funder.account(),
            principal,
            reward,
            error = %original,
            "principal pull failed: reward returned to funder"
        );
        return Err(StakingError::TransferFailed(original));
    }
    Ok(())
}

fn ensure_balance<A: FungibleAsset>(
    asset: &A,
    owner: &Address,
    needed: u128,
) -> Result<(), AssetError> {
    let available = asset.balance_of(owner);
    if available < needed {
        return Err(AssetError::InsufficientBalance { needed, available });
    }
    Ok(())
}
