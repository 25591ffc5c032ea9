//! Shared utilities for the reserve workspace.

pub mod logging;

pub use logging::{init_logging, LogFormat};
