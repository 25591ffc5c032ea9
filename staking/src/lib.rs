//! Staking with linear tranche vesting over a fungible host ledger.
//!
//! Depositors lock principal under an operator-defined [`Plan`]. The plan's
//! fixed reward is pulled from a pre-approved funder at entry, so every
//! position is fully collateralized from the moment it opens. Principal and
//! reward then vest together in equal tranches and are withdrawn by the
//! owner; an emergency exit returns the unvested principal and forfeits the
//! unvested reward to the custody excess.
//!
//! The [`StakingEngine`] is generic over [`reserve_asset::FungibleAsset`] and
//! takes the current [`reserve_types::Tick`] as an explicit argument, so the
//! same engine runs against an in-memory ledger in tests and a real host in
//! production.

pub mod accounting;
pub mod config;
pub mod engine;
pub mod error;
pub mod event;
pub mod funder;
pub mod pause;
pub mod plan;
pub mod position;
pub mod sweep;
pub mod vesting;

pub use accounting::{AggregateUpdate, Aggregates, Totals};
pub use config::{PlanConfig, StakingConfig};
pub use engine::{EmergencyExit, StakingEngine};
pub use error::{ErrorKind, StakingError};
pub use event::{EventBus, StakingEvent};
pub use funder::TreasuryFunder;
pub use pause::PauseGate;
pub use plan::{Plan, PlanInfo, PlanRegistry};
pub use position::{Position, PositionLedger};
pub use sweep::{ExcessSweeper, SolvencyReport};
pub use vesting::{Release, VestingEngine};
