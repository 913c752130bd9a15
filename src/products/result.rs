//! Cost result structures shared by the product calculators

use crate::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The three financing products the engine compares
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductKind {
    /// Home equity investment (shared appreciation, no monthly payment)
    Hei,
    /// Fixed-rate amortizing home equity loan
    HomeEquityLoan,
    /// Variable-rate home equity line of credit
    Heloc,
}

impl ProductKind {
    pub const ALL: [ProductKind; 3] = [ProductKind::Hei, ProductKind::HomeEquityLoan, ProductKind::Heloc];

    pub fn label(&self) -> &'static str {
        match self {
            ProductKind::Hei => "HEI",
            ProductKind::HomeEquityLoan => "Home Equity Loan",
            ProductKind::Heloc => "HELOC",
        }
    }
}

impl fmt::Display for ProductKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for ProductKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hei" => Ok(ProductKind::Hei),
            "heq" | "loan" | "home_equity_loan" | "home-equity-loan" => Ok(ProductKind::HomeEquityLoan),
            "heloc" => Ok(ProductKind::Heloc),
            other => Err(EngineError::UnknownProduct(other.to_string())),
        }
    }
}

/// Product-specific fields that don't fit the common cost breakdown
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ProductDetail {
    Hei {
        /// Home value after the investor's risk adjustment
        adjusted_value: f64,
        /// Share of future home value owed to the investor, in percent
        equity_share_pct: f64,
        /// Home value at settlement
        future_home_value: f64,
        /// Investor's claim at settlement
        investor_payout: f64,
    },
    HomeEquityLoan {
        interest_rate_pct: f64,
    },
    Heloc {
        initial_rate_pct: f64,
        rate_cap_pct: f64,
        /// First interest-only payment of the draw phase (0 with no draw phase)
        draw_payment: f64,
        /// First amortizing payment of the repayment phase (0 with no repay phase)
        repay_payment: f64,
        draw_years: u32,
        repay_years: u32,
        /// Every monthly payment, draw phase first
        monthly_payments: Vec<f64>,
    },
}

/// Full cost breakdown of one product over its term
///
/// Values are unrounded; formatting belongs to whoever renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostResult {
    pub product: ProductKind,

    /// Lump sum the homeowner receives at funding
    pub cash_received: f64,

    /// Representative monthly payment (0 for the HEI, average for the HELOC)
    pub monthly_payment: f64,

    /// Sum of scheduled payments, or the investor payout for the HEI
    pub total_payments: f64,

    /// Interest paid over the term, or the investor payout for the HEI
    pub total_interest_or_payout: f64,

    /// One-time origination fee in dollars
    pub origination_cost: f64,

    /// Everything the homeowner pays: payments/payout plus origination
    pub total_cost: f64,

    /// Annualized cost in percent
    pub effective_rate_pct: f64,

    pub term_years: u32,

    pub detail: ProductDetail,
}

impl CostResult {
    /// Total cost less the cash received
    pub fn net_cost(&self) -> f64 {
        self.total_cost - self.cash_received
    }

    pub fn equity_share_pct(&self) -> Option<f64> {
        match self.detail {
            ProductDetail::Hei { equity_share_pct, .. } => Some(equity_share_pct),
            _ => None,
        }
    }

    pub fn future_home_value(&self) -> Option<f64> {
        match self.detail {
            ProductDetail::Hei { future_home_value, .. } => Some(future_home_value),
            _ => None,
        }
    }

    /// (draw, repay) payment pair for a HELOC
    pub fn heloc_payments(&self) -> Option<(f64, f64)> {
        match self.detail {
            ProductDetail::Heloc { draw_payment, repay_payment, .. } => Some((draw_payment, repay_payment)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_labels_parse() {
        assert_eq!("HEI".parse::<ProductKind>().unwrap(), ProductKind::Hei);
        assert_eq!("heq".parse::<ProductKind>().unwrap(), ProductKind::HomeEquityLoan);
        assert_eq!("Heloc".parse::<ProductKind>().unwrap(), ProductKind::Heloc);
        assert!("reverse_mortgage".parse::<ProductKind>().is_err());
    }

    #[test]
    fn test_detail_serializes_with_tag() {
        let detail = ProductDetail::HomeEquityLoan { interest_rate_pct: 7.5 };
        let json = serde_json::to_string(&detail).unwrap();
        assert_eq!(json, r#"{"type":"home_equity_loan","interest_rate_pct":7.5}"#);
    }
}
