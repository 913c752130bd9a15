//! Appreciation sensitivity of the HEI against the fixed loan

use crate::products::{calc_hei, calc_home_equity_loan};
use crate::profile::{FinancialProfile, ProductTerms};
use serde::{Deserialize, Serialize};

/// Appreciation rates at which the summary table is evaluated
pub const SCENARIO_RATES_PCT: [f64; 4] = [2.0, 4.0, 6.0, 8.0];

/// Largest number of points a sweep axis may have
pub const MAX_SWEEP_POINTS: usize = 10_000;

/// Inclusive appreciation axis in percent
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start_pct: f64,
    pub end_pct: f64,
    pub step_pct: f64,
}

impl Default for SweepRange {
    fn default() -> Self {
        Self {
            start_pct: 0.0,
            end_pct: 10.0,
            step_pct: 0.5,
        }
    }
}

impl SweepRange {
    /// Axis values, computed by index so steps don't accumulate float error.
    ///
    /// A non-finite, empty or backwards range, or one with more than
    /// `MAX_SWEEP_POINTS` points, collapses to the single point `start_pct`.
    pub fn rates(&self) -> Vec<f64> {
        let finite = self.start_pct.is_finite() && self.end_pct.is_finite() && self.step_pct.is_finite();
        if !finite || self.step_pct <= 0.0 || self.end_pct < self.start_pct {
            return vec![self.start_pct];
        }
        let steps = ((self.end_pct - self.start_pct) / self.step_pct + 1e-9).floor();
        if steps >= MAX_SWEEP_POINTS as f64 {
            log::warn!(
                "Sweep {}..{} step {} exceeds {} points; using {} only",
                self.start_pct,
                self.end_pct,
                self.step_pct,
                MAX_SWEEP_POINTS,
                self.start_pct
            );
            return vec![self.start_pct];
        }
        (0..=steps as usize).map(|i| self.start_pct + i as f64 * self.step_pct).collect()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensitivityPoint {
    pub appreciation_rate_pct: f64,
    pub hei_total_cost: f64,
    pub hei_effective_rate_pct: f64,
    /// Fixed loan cost; does not depend on appreciation
    pub loan_total_cost: f64,
}

impl SensitivityPoint {
    /// HEI cost minus loan cost (negative when the HEI is cheaper)
    pub fn hei_premium(&self) -> f64 {
        self.hei_total_cost - self.loan_total_cost
    }

    pub fn hei_is_cheaper(&self) -> bool {
        self.hei_premium() < 0.0
    }
}

/// HEI cost across `range`, with the loan held at its full-term cost
pub fn appreciation_sweep(profile: &FinancialProfile, terms: &ProductTerms, range: &SweepRange) -> Vec<SensitivityPoint> {
    sensitivity_at(profile, terms, &range.rates())
}

/// HEI cost at each of `rates_pct`
pub fn sensitivity_at(profile: &FinancialProfile, terms: &ProductTerms, rates_pct: &[f64]) -> Vec<SensitivityPoint> {
    let horizon = profile.time_horizon_years;
    let loan_total_cost = calc_home_equity_loan(
        profile.cash_needed,
        terms.loan.annual_rate_pct,
        horizon,
        terms.loan.origination_fee_pct,
    )
    .total_cost;

    rates_pct
        .iter()
        .map(|&rate| {
            let hei = calc_hei(
                profile.home_value,
                profile.cash_needed,
                rate,
                horizon,
                terms.hei.risk_adjust_pct,
                terms.hei.origination_fee_pct,
            );
            SensitivityPoint {
                appreciation_rate_pct: rate,
                hei_total_cost: hei.total_cost,
                hei_effective_rate_pct: hei.effective_rate_pct,
                loan_total_cost,
            }
        })
        .collect()
}

/// Lowest swept appreciation rate at which the HEI stops being cheaper
pub fn crossover_rate(points: &[SensitivityPoint]) -> Option<f64> {
    points
        .iter()
        .find(|p| !p.hei_is_cheaper())
        .map(|p| p.appreciation_rate_pct)
}
