//! Homeowner financial profile

use crate::error::{EngineError, Result};
use serde::{Deserialize, Serialize};

/// Financial inputs describing one homeowner's situation
///
/// The engine accepts any values here, including over-leveraged homes
/// (mortgage above home value); those simply produce negative equity.
/// Use `validate` at the edges where input comes from a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FinancialProfile {
    pub home_value: f64,
    pub mortgage_balance: f64,
    pub cash_needed: f64,
    /// FICO-style score, typically 300-850
    pub credit_score: u32,
    /// Debt-to-income ratio in percent
    pub dti_ratio: f64,
    pub time_horizon_years: u32,
    /// Expected annual home price appreciation in percent (may be negative)
    pub appreciation_rate_pct: f64,
}

impl Default for FinancialProfile {
    fn default() -> Self {
        Self {
            home_value: 500_000.0,
            mortgage_balance: 200_000.0,
            cash_needed: 75_000.0,
            credit_score: 700,
            dti_ratio: 35.0,
            time_horizon_years: 10,
            appreciation_rate_pct: 4.0,
        }
    }
}

impl FinancialProfile {
    /// Home value less the mortgage balance
    pub fn equity(&self) -> f64 {
        self.home_value - self.mortgage_balance
    }

    /// Mortgage balance as a percent of home value
    pub fn loan_to_value_pct(&self) -> f64 {
        self.mortgage_balance / self.home_value * 100.0
    }

    pub fn equity_pct(&self) -> f64 {
        100.0 - self.loan_to_value_pct()
    }

    /// Reject inputs the calculators treat as contract violations
    pub fn validate(&self) -> Result<()> {
        if self.home_value.is_nan() || self.home_value <= 0.0 {
            return Err(invalid("home_value", format!("must be positive, got {}", self.home_value)));
        }
        if self.cash_needed.is_nan() || self.cash_needed <= 0.0 {
            return Err(invalid("cash_needed", format!("must be positive, got {}", self.cash_needed)));
        }
        if self.mortgage_balance < 0.0 {
            return Err(invalid("mortgage_balance", format!("must not be negative, got {}", self.mortgage_balance)));
        }
        if self.time_horizon_years == 0 {
            return Err(invalid("time_horizon_years", "must be at least 1".to_string()));
        }
        if self.equity() < 0.0 {
            log::warn!(
                "Mortgage balance {:.2} exceeds home value {:.2}; results will show negative equity",
                self.mortgage_balance,
                self.home_value
            );
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: String) -> EngineError {
    EngineError::InvalidProfile { field, reason }
}
