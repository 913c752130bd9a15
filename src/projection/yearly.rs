//! Year-by-year cumulative cost trajectories

use crate::products::{calc_heloc, calc_hei, calc_home_equity_loan};
use crate::profile::{FinancialProfile, ProductTerms};
use serde::{Deserialize, Serialize};

/// Cumulative cost of each product if the horizon ended at `year`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct YearlyCostPoint {
    pub year: u32,
    /// Settlement cost of an HEI with a `year`-long term
    pub hei_cost: f64,
    /// Loan payments plus origination accrued through `year`
    pub loan_cumulative_cost: f64,
    /// Full cost of a HELOC truncated at `year`
    pub heloc_cumulative_cost: f64,
}

impl YearlyCostPoint {
    /// Cheaper of the two traditional products at this point
    pub fn cheaper_traditional(&self) -> f64 {
        self.loan_cumulative_cost.min(self.heloc_cumulative_cost)
    }

    pub fn hei_exceeds_traditional(&self) -> bool {
        self.hei_cost > self.cheaper_traditional()
    }
}

/// One point per year from 1 through the profile's horizon.
///
/// The loan's cumulative cost is a straight-line accrual of the level
/// payment capped at the full-term cost, not a partial amortization.
/// Charts downstream depend on that shape.
pub fn yearly_costs(profile: &FinancialProfile, terms: &ProductTerms) -> Vec<YearlyCostPoint> {
    let horizon = profile.time_horizon_years;
    let loan = calc_home_equity_loan(
        profile.cash_needed,
        terms.loan.annual_rate_pct,
        horizon,
        terms.loan.origination_fee_pct,
    );

    (1..=horizon)
        .map(|year| {
            let hei = calc_hei(
                profile.home_value,
                profile.cash_needed,
                profile.appreciation_rate_pct,
                year,
                terms.hei.risk_adjust_pct,
                terms.hei.origination_fee_pct,
            );

            let accrued = loan.monthly_payment * (year * 12) as f64 + loan.origination_cost;

            let (draw_years, repay_years) = terms.heloc.split_horizon(year);
            let heloc = calc_heloc(
                profile.cash_needed,
                terms.heloc.initial_rate_pct,
                terms.heloc.rate_cap_pct,
                draw_years,
                repay_years,
                terms.heloc.annual_rate_increase_pct,
                terms.heloc.origination_fee_pct,
            );

            YearlyCostPoint {
                year,
                hei_cost: hei.total_cost,
                loan_cumulative_cost: accrued.min(loan.total_cost),
                heloc_cumulative_cost: heloc.total_cost,
            }
        })
        .collect()
}

/// First year (1-based) in which the HEI costs more than the cheaper
/// traditional product, if it ever does
pub fn find_breakeven_year(points: &[YearlyCostPoint]) -> Option<u32> {
    points.iter().find(|p| p.hei_exceeds_traditional()).map(|p| p.year)
}
