//! Staking-engine errors.

use reserve_asset::AssetError;
use reserve_types::Address;
use thiserror::Error;

/// Coarse classification of a [`StakingError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Malformed input, rejected before any state is read for mutation.
    Validation,
    /// The request is well-formed but the current state does not allow it.
    State,
    /// The host ledger refused a fund movement.
    Transfer,
    /// The caller lacks the operator role.
    Authorization,
    /// An amount left the representable range.
    Arithmetic,
}

#[derive(Debug, Error)]
pub enum StakingError {
    #[error("plan {0} already exists")]
    DuplicatePlan(String),

    #[error("plan id must not be empty")]
    EmptyPlanId,

    #[error("plan duration must be non-zero")]
    ZeroDuration,

    #[error("vesting period {vesting_period} does not evenly divide duration {duration}")]
    VestingPeriodMismatch { duration: u64, vesting_period: u64 },

    #[error("stake amount must be non-zero")]
    ZeroAmount,

    #[error("plan {0} not found")]
    PlanNotFound(String),

    #[error("stake {index} of {owner} is not active")]
    NotActive { owner: Address, index: usize },

    #[error("stake {index} of {owner} has no newly vested tranche")]
    NotYetVested { owner: Address, index: usize },

    #[error("staking is paused")]
    StakingPaused,

    #[error("{0} is not the operator")]
    Unauthorized(Address),

    #[error("transfer failed: {0}")]
    TransferFailed(#[from] AssetError),

    #[error("transfer failed ({original}) and the compensating refund also failed ({rollback})")]
    RollbackFailed {
        original: AssetError,
        rollback: AssetError,
    },

    #[error("arithmetic overflow in staking computation")]
    Overflow,

    #[error("config error: {0}")]
    Config(String),

    #[error("{0} cannot receive swept excess")]
    InvalidRecipient(Address),
}

impl StakingError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            StakingError::DuplicatePlan(_)
            | StakingError::EmptyPlanId
            | StakingError::ZeroDuration
            | StakingError::VestingPeriodMismatch { .. }
            | StakingError::ZeroAmount
            | StakingError::PlanNotFound(_)
            | StakingError::Config(_)
            | StakingError::InvalidRecipient(_) => ErrorKind::Validation,
            StakingError::NotActive { .. }
            | StakingError::NotYetVested { .. }
            | StakingError::StakingPaused => ErrorKind::State,
            StakingError::TransferFailed(_) | StakingError::RollbackFailed { .. } => {
                ErrorKind::Transfer
            }
            StakingError::Unauthorized(_) => ErrorKind::Authorization,
            StakingError::Overflow => ErrorKind::Arithmetic,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_follow_taxonomy() {
        assert_eq!(StakingError::ZeroDuration.kind(), ErrorKind::Validation);
        assert_eq!(StakingError::StakingPaused.kind(), ErrorKind::State);
        let transfer: StakingError = AssetError::InsufficientAllowance {
            needed: 1,
            available: 0,
        }
        .into();
        assert_eq!(transfer.kind(), ErrorKind::Transfer);
        assert_eq!(
            StakingError::Unauthorized(Address::new("mallory")).kind(),
            ErrorKind::Authorization
        );
    }

    #[test]
    fn messages_name_the_position() {
        let err = StakingError::NotActive {
            owner: Address::new("alice"),
            index: 3,
        };
        assert_eq!(err.to_string(), "stake 3 of alice is not active");
    }
}
