//! Trade plan generator.
//!
//! Stop and targets are expressed in ATR multiples from the current price;
//! size is the whole number of shares whose stop-out loss fits the risk budget.
//!
//! # Formula
//! ```text
//! stop_loss      = price - stop_atr * ATR
//! take_profit_1  = price + target1_atr * ATR
//! take_profit_2  = price + target2_atr * ATR
//! risk_per_share = price - stop_loss
//! shares         = floor(risk_budget / risk_per_share)
//! ```
//!
//! # Example
//! - Price: $100, ATR: $2, risk budget: $1,000
//! - Stop: $97.00, targets: $102.40 / $105.00
//! - Risk per share: $3.00, shares: 333

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    #[error("risk per share is {risk_per_share}; position size is undefined")]
    DegenerateRisk { risk_per_share: f64 },

    #[error("risk budget must be a positive amount, got {budget}")]
    InvalidRiskBudget { budget: f64 },
}

/// ATR multiples used to place the stop and targets.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TradePlanRules {
    pub stop_atr: f64,
    pub target1_atr: f64,
    pub target2_atr: f64,
}

impl Default for TradePlanRules {
    fn default() -> Self {
        Self {
            stop_atr: 1.5,
            target1_atr: 1.2,
            target2_atr: 2.5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TradePlan {
    pub stop_loss: f64,
    pub take_profit_1: f64,
    pub take_profit_2: f64,
    pub risk_per_share: f64,
    pub suggested_shares: u64,
}

impl TradePlan {
    /// Dollar loss if the whole suggested position is stopped out.
    pub fn capital_at_risk(&self) -> f64 {
        self.suggested_shares as f64 * self.risk_per_share
    }
}

impl TradePlanRules {
    pub fn build(&self, price: f64, atr: f64, risk_budget: f64) -> Result<TradePlan, PlanError> {
        if !(risk_budget.is_finite() && risk_budget > 0.0) {
            return Err(PlanError::InvalidRiskBudget {
                budget: risk_budget,
            });
        }

        let stop_loss = price - self.stop_atr * atr;
        let take_profit_1 = price + self.target1_atr * atr;
        let take_profit_2 = price + self.target2_atr * atr;
        let risk_per_share = price - stop_loss;

        if atr == 0.0 || !(risk_per_share.is_finite() && risk_per_share > 0.0) {
            return Err(PlanError::DegenerateRisk { risk_per_share });
        }

        Ok(TradePlan {
            stop_loss,
            take_profit_1,
            take_profit_2,
            risk_per_share,
            suggested_shares: (risk_budget / risk_per_share).floor() as u64,
        })
    }
}

/// Build a trade plan with the default 1.5 / 1.2 / 2.5 ATR rules.
pub fn build_trade_plan(price: f64, atr: f64, risk_budget: f64) -> Result<TradePlan, PlanError> {
    TradePlanRules::default().build(price, atr, risk_budget)
}
