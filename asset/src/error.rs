use thiserror::Error;

/// Failure reported by the host ledger. The staking engine treats every
/// variant as an opaque transfer failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AssetError {
    #[error("insufficient balance: need {needed}, have {available}")]
    InsufficientBalance { needed: u128, available: u128 },

    #[error("insufficient allowance: need {needed}, have {available}")]
    InsufficientAllowance { needed: u128, available: u128 },

    #[error("balance overflow for {0}")]
    Overflow(String),

    #[error("transfer rejected by ledger policy: {0}")]
    Rejected(String),
}
