//! Per-product pricing terms and their configuration sources

use crate::products::{
    DEFAULT_HEI_ORIGINATION_FEE_PCT, DEFAULT_HEI_RISK_ADJUST_PCT, DEFAULT_HELOC_DRAW_YEARS,
    DEFAULT_HELOC_ORIGINATION_FEE_PCT, DEFAULT_HELOC_RATE_CAP_PCT, DEFAULT_HELOC_RATE_INCREASE_PCT,
    DEFAULT_HELOC_RATE_PCT, DEFAULT_LOAN_ORIGINATION_FEE_PCT, DEFAULT_LOAN_RATE_PCT,
};
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

/// HEI investor terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HeiTerms {
    pub risk_adjust_pct: f64,
    pub origination_fee_pct: f64,
}

impl Default for HeiTerms {
    fn default() -> Self {
        Self {
            risk_adjust_pct: DEFAULT_HEI_RISK_ADJUST_PCT,
            origination_fee_pct: DEFAULT_HEI_ORIGINATION_FEE_PCT,
        }
    }
}

/// Fixed home equity loan terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoanTerms {
    pub annual_rate_pct: f64,
    pub origination_fee_pct: f64,
}

impl Default for LoanTerms {
    fn default() -> Self {
        Self {
            annual_rate_pct: DEFAULT_LOAN_RATE_PCT,
            origination_fee_pct: DEFAULT_LOAN_ORIGINATION_FEE_PCT,
        }
    }
}

/// HELOC terms
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HelocTerms {
    pub initial_rate_pct: f64,
    pub rate_cap_pct: f64,
    /// Length of the interest-only draw period
    pub draw_years: u32,
    pub annual_rate_increase_pct: f64,
    pub origination_fee_pct: f64,
}

impl Default for HelocTerms {
    fn default() -> Self {
        Self {
            initial_rate_pct: DEFAULT_HELOC_RATE_PCT,
            rate_cap_pct: DEFAULT_HELOC_RATE_CAP_PCT,
            draw_years: DEFAULT_HELOC_DRAW_YEARS,
            annual_rate_increase_pct: DEFAULT_HELOC_RATE_INCREASE_PCT,
            origination_fee_pct: DEFAULT_HELOC_ORIGINATION_FEE_PCT,
        }
    }
}

impl HelocTerms {
    /// Map a horizon onto (draw years, repay years).
    ///
    /// The draw period fills the horizon first; anything past it is repayment.
    pub fn split_horizon(&self, years: u32) -> (u32, u32) {
        (years.min(self.draw_years), years.saturating_sub(self.draw_years))
    }
}

/// Terms for all three products
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ProductTerms {
    pub hei: HeiTerms,
    pub loan: LoanTerms,
    pub heloc: HelocTerms,
}

impl ProductTerms {
    /// Defaults overridden by any of the supported environment variables:
    ///   HEQ_RATE, HEQ_ORIGINATION_FEE, HELOC_RATE, HELOC_CAP, HELOC_DRAW_YEARS,
    ///   HELOC_RATE_INCREASE, HELOC_ORIGINATION_FEE, HEI_RISK_ADJUST, HEI_ORIGINATION_FEE
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Same as `from_env` but reading values from an arbitrary source
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let read = |key: &str, default: f64| parse_or_default(key, lookup(key), default);
        Self {
            hei: HeiTerms {
                risk_adjust_pct: read("HEI_RISK_ADJUST", defaults.hei.risk_adjust_pct),
                origination_fee_pct: read("HEI_ORIGINATION_FEE", defaults.hei.origination_fee_pct),
            },
            loan: LoanTerms {
                annual_rate_pct: read("HEQ_RATE", defaults.loan.annual_rate_pct),
                origination_fee_pct: read("HEQ_ORIGINATION_FEE", defaults.loan.origination_fee_pct),
            },
            heloc: HelocTerms {
                initial_rate_pct: read("HELOC_RATE", defaults.heloc.initial_rate_pct),
                rate_cap_pct: read("HELOC_CAP", defaults.heloc.rate_cap_pct),
                draw_years: parse_or_default("HELOC_DRAW_YEARS", lookup("HELOC_DRAW_YEARS"), defaults.heloc.draw_years),
                annual_rate_increase_pct: read("HELOC_RATE_INCREASE", defaults.heloc.annual_rate_increase_pct),
                origination_fee_pct: read("HELOC_ORIGINATION_FEE", defaults.heloc.origination_fee_pct),
            },
        }
    }
}

/// Parsed value of `key`, or `default` (with a warning) when it doesn't parse
fn parse_or_default<T: FromStr>(key: &str, raw: Option<String>, default: T) -> T {
    match raw {
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring {}={:?}: not a valid value", key, raw);
            default
        }),
        None => default,
    }
}
