//! Nullable ledger: thread-safe in-memory fungible asset for testing.

use reserve_asset::{AssetError, FungibleAsset};
use reserve_types::Address;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

/// An in-memory balance ledger with ERC-20 style allowances.
///
/// Besides the [`FungibleAsset`] operations it can mint balances out of thin
/// air and freeze accounts so that every outbound movement from them is
/// rejected, which is how tests simulate the host ledger's own policies.
pub struct NullLedger {
    balances: Mutex<HashMap<Address, u128>>,
    allowances: Mutex<HashMap<(Address, Address), u128>>,
    frozen: Mutex<HashSet<Address>>,
}

impl NullLedger {
    pub fn new() -> Self {
        Self {
            balances: Mutex::new(HashMap::new()),
            allowances: Mutex::new(HashMap::new()),
            frozen: Mutex::new(HashSet::new()),
        }
    }

    /// Credit `amount` to `owner` without a counterparty.
    pub fn mint(&self, owner: &Address, amount: u128) {
        let mut balances = self.balances.lock().unwrap();
        let entry = balances.entry(owner.clone()).or_insert(0);
        *entry = entry.saturating_add(amount);
    }

    /// Current allowance `owner` has granted to `spender`.
    pub fn allowance(&self, owner: &Address, spender: &Address) -> u128 {
        self.allowances
            .lock()
            .unwrap()
            .get(&(owner.clone(), spender.clone()))
            .copied()
            .unwrap_or(0)
    }

    /// Reject every outbound movement from `owner` until [`Self::unfreeze`].
    pub fn freeze(&self, owner: &Address) {
        self.frozen.lock().unwrap().insert(owner.clone());
    }

    pub fn unfreeze(&self, owner: &Address) {
        self.frozen.lock().unwrap().remove(owner);
    }

    /// Sum of all balances.
    pub fn total_supply(&self) -> u128 {
        self.balances.lock().unwrap().values().sum()
    }

    fn move_balance(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError> {
        if self.frozen.lock().unwrap().contains(from) {
            return Err(AssetError::Rejected(format!("{from} is frozen")));
        }
        let mut balances = self.balances.lock().unwrap();
        let available = balances.get(from).copied().unwrap_or(0);
        if available < amount {
            return Err(AssetError::InsufficientBalance {
                needed: amount,
                available,
            });
        }
        if from == to {
            return Ok(());
        }
        let to_balance = balances.get(to).copied().unwrap_or(0);
        let credited = to_balance
            .checked_add(amount)
            .ok_or_else(|| AssetError::Overflow(to.to_string()))?;
        balances.insert(from.clone(), available - amount);
        balances.insert(to.clone(), credited);
        Ok(())
    }
}

impl Default for NullLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl FungibleAsset for NullLedger {
    fn balance_of(&self, owner: &Address) -> u128 {
        self.balances.lock().unwrap().get(owner).copied().unwrap_or(0)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError> {
        self.move_balance(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        let key = (from.clone(), spender.clone());
        let allowed = self.allowances.lock().unwrap().get(&key).copied().unwrap_or(0);
        if allowed < amount {
            return Err(AssetError::InsufficientAllowance {
                needed: amount,
                available: allowed,
            });
        }
        self.move_balance(from, to, amount)?;
        self.allowances.lock().unwrap().insert(key, allowed - amount);
        Ok(())
    }

    fn approve(&self, owner: &Address, spender: &Address, amount: u128) -> Result<(), AssetError> {
        self.allowances
            .lock()
            .unwrap()
            .insert((owner.clone(), spender.clone()), amount);
        Ok(())
    }
}
