//! Engine configuration with TOML file support.

use reserve_types::Address;
use reserve_utils::LogFormat;
use serde::{Deserialize, Serialize};

use crate::StakingError;

/// Configuration for a staking engine instance.
///
/// Can be loaded from a TOML file via [`StakingConfig::from_toml_file`] or
/// built programmatically with [`StakingConfig::new`] (e.g. for tests).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StakingConfig {
    /// Account on the host ledger that holds staked principal and escrowed reward.
    pub custody: Address,

    /// Pre-approved account that funds rewards at entry.
    pub funder: Address,

    /// Account allowed to create plans, pause, resume and sweep.
    pub operator: Address,

    /// Whether entries are blocked from the start.
    #[serde(default)]
    pub start_paused: bool,

    /// Log format: "human" or "json".
    #[serde(default)]
    pub log_format: LogFormat,

    /// Log level filter: "trace", "debug", "info", "warn", "error".
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Plans registered when the engine is built.
    #[serde(default)]
    pub plans: Vec<PlanConfig>,
}

/// A plan registered at construction time.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanConfig {
    pub id: String,
    pub reward_rate_bps: u32,
    pub duration_ticks: u64,
    /// TOML integers are 64-bit; widened to the plan's `u128` on registration.
    #[serde(default)]
    pub extra_param: u64,
    #[serde(default)]
    pub vesting_period_ticks: u64,
}

// ── Serde default helpers ──────────────────────────────────────────────

fn default_log_level() -> String {
    "info".to_string()
}

// ── Impl ───────────────────────────────────────────────────────────────

impl StakingConfig {
    pub fn new(custody: Address, funder: Address, operator: Address) -> Self {
        Self {
            custody,
            funder,
            operator,
            start_paused: false,
            log_format: LogFormat::default(),
            log_level: default_log_level(),
            plans: Vec::new(),
        }
    }

    /// Load configuration from a TOML file.
    pub fn from_toml_file(path: impl AsRef<std::path::Path>) -> Result<Self, StakingError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| StakingError::Config(e.to_string()))?;
        Self::from_toml_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_toml_str(s: &str) -> Result<Self, StakingError> {
        let config: Self = toml::from_str(s).map_err(|e| StakingError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to a TOML string.
    pub fn to_toml_string(&self) -> Result<String, StakingError> {
        toml::to_string_pretty(self).map_err(|e| StakingError::Config(e.to_string()))
    }

    /// Install the global tracing subscriber described by `log_format` and
    /// `log_level`. Returns `false` if one was already installed.
    pub fn init_logging(&self) -> bool {
        reserve_utils::init_logging(self.log_format, &self.log_level)
    }

    /// Check that every configured address is usable.
    pub fn validate(&self) -> Result<(), StakingError> {
        for (role, address) in [
            ("custody", &self.custody),
            ("funder", &self.funder),
            ("operator", &self.operator),
        ] {
            if !address.is_valid() {
                return Err(StakingError::Config(format!(
                    "{role} address {:?} is not valid",
                    address.as_str()
                )));
            }
        }
        if self.custody == self.funder {
            return Err(StakingError::Config(
                "custody and funder must be distinct accounts".to_string(),
            ));
        }
        Ok(())
    }
}
