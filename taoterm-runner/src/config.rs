//! Serializable audit configuration.
//!
//! Every field has a default, so a config file only needs the values it
//! overrides:
//!
//! ```toml
//! risk_budget = 2500.0
//!
//! [watchlist]
//! adx_min = 25.0
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use taoterm_core::{TradePlanRules, WatchlistRule};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config value: {0}")]
    Invalid(String),
}

/// Everything an audit needs besides the symbol.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AuditConfig {
    /// Dollars the trader accepts losing if the stop is hit.
    pub risk_budget: f64,

    /// Calendar days of history requested from the provider. Two years keeps
    /// the 200-bar SMA well clear of its warmup.
    pub lookback_days: i64,

    pub trade_plan: TradePlanRules,

    pub watchlist: WatchlistRule,

    pub provider: ProviderConfig,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            risk_budget: 1000.0,
            lookback_days: 730,
            trade_plan: TradePlanRules::default(),
            watchlist: WatchlistRule::default(),
            provider: ProviderConfig::default(),
        }
    }
}

/// Upper bound on `ProviderConfig::max_retries`.
pub const MAX_RETRIES: u32 = 10;

/// HTTP provider behaviour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub max_retries: u32,
    pub base_delay_ms: u64,
    pub timeout_secs: u64,
    /// How long the circuit breaker refuses requests after tripping.
    pub cooldown_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            base_delay_ms: 500,
            timeout_secs: 30,
            cooldown_secs: 30 * 60,
        }
    }
}

impl AuditConfig {
    /// Read and validate a TOML config file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: AuditConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.risk_budget.is_finite() && self.risk_budget > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "risk_budget must be positive, got {}",
                self.risk_budget
            )));
        }
        if self.lookback_days < 1 {
            return Err(ConfigError::Invalid(format!(
                "lookback_days must be at least 1, got {}",
                self.lookback_days
            )));
        }
        if self.provider.max_retries > MAX_RETRIES {
            return Err(ConfigError::Invalid(format!(
                "provider.max_retries must be at most {MAX_RETRIES}, got {}",
                self.provider.max_retries
            )));
        }
        let rules = &self.trade_plan;
        for (name, value) in [
            ("trade_plan.stop_atr", rules.stop_atr),
            ("trade_plan.target1_atr", rules.target1_atr),
            ("trade_plan.target2_atr", rules.target2_atr),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be positive, got {value}"
                )));
            }
        }
        Ok(())
    }
}
