//! Fundamental types for the reserve staking engine.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! addresses, ticks, and the basis-point arithmetic used for reward computation.

pub mod address;
pub mod amount;
pub mod tick;

pub use address::Address;
pub use amount::{bps_of, mul_div_floor, mul_div_floor_wide, BPS_DENOMINATOR};
pub use tick::Tick;
