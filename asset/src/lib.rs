//! Fungible-asset interface consumed by the staking engine.
//!
//! The host balance ledger (minting, burning, rate limits, whitelists) lives
//! outside this workspace. The engine depends only on the four operations of
//! [`FungibleAsset`]; any backend (the real ledger, an in-memory double for
//! testing) implements this trait.

pub mod error;

pub use error::AssetError;

use reserve_types::Address;
use std::sync::Arc;

/// The four-operation fungible-asset interface.
///
/// Methods take `&self`; implementations that hold mutable state use interior
/// mutability so one ledger instance can be shared between the engine and
/// the accounts that interact with it.
pub trait FungibleAsset {
    /// Current balance of `owner`.
    fn balance_of(&self, owner: &Address) -> u128;

    /// Move `amount` from `from` to `to`, authorised by `from` itself.
    fn transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError>;

    /// Move `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance previously granted by `from` to `spender`.
    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError>;

    /// Set the allowance `owner` grants to `spender`.
    fn approve(&self, owner: &Address, spender: &Address, amount: u128) -> Result<(), AssetError>;
}

impl<T: FungibleAsset + ?Sized> FungibleAsset for &T {
    fn balance_of(&self, owner: &Address) -> u128 {
        (**self).balance_of(owner)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError> {
        (**self).transfer(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        (**self).transfer_from(spender, from, to, amount)
    }

    fn approve(&self, owner: &Address, spender: &Address, amount: u128) -> Result<(), AssetError> {
        (**self).approve(owner, spender, amount)
    }
}

impl<T: FungibleAsset + ?Sized> FungibleAsset for Arc<T> {
    fn balance_of(&self, owner: &Address) -> u128 {
        (**self).balance_of(owner)
    }

    fn transfer(&self, from: &Address, to: &Address, amount: u128) -> Result<(), AssetError> {
        (**self).transfer(from, to, amount)
    }

    fn transfer_from(
        &self,
        spender: &Address,
        from: &Address,
        to: &Address,
        amount: u128,
    ) -> Result<(), AssetError> {
        (**self).transfer_from(spender, from, to, amount)
    }

    fn approve(&self, owner: &Address, spender: &Address, amount: u128) -> Result<(), AssetError> {
        (**self).approve(owner, spender, amount)
    }
}
