//! Nullable infrastructure for deterministic testing.
//!
//! The staking engine's external dependencies (the host balance ledger and
//! the tick counter) are abstracted behind traits or plain values. This
//! crate provides test-friendly implementations that:
//! - Return deterministic values
//! - Can be controlled programmatically (seed balances, freeze accounts)
//! - Never touch the filesystem or network
//!
//! Usage: swap the real ledger for [`NullLedger`] in tests.

pub mod ledger;
pub mod ticker;

pub use ledger::NullLedger;
pub use ticker::NullTicker;
