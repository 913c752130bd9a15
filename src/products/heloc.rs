//! Home equity line of credit cost model
//!
//! A HELOC runs in two phases on one rate path:
//! - Draw phase: interest-only on the full line
//! - Repayment phase: amortizing, re-solved against the remaining balance and
//!   remaining months whenever the rate moves
//!
//! The rate steps up by a fixed increment at every year boundary, never
//! beyond the cap.

use super::result::{CostResult, ProductDetail, ProductKind};
use crate::amortization::amortize_variable_rate;

/// Default initial HELOC rate (annual percent)
pub const DEFAULT_HELOC_RATE_PCT: f64 = 8.25;

/// Default lifetime rate cap (annual percent)
pub const DEFAULT_HELOC_RATE_CAP_PCT: f64 = 18.0;

/// Default draw period length in years
pub const DEFAULT_HELOC_DRAW_YEARS: u32 = 10;

/// Default yearly rate increase (percentage points)
pub const DEFAULT_HELOC_RATE_INCREASE_PCT: f64 = 0.25;

/// Default HELOC origination fee, percent of the line
pub const DEFAULT_HELOC_ORIGINATION_FEE_PCT: f64 = 0.5;

/// Annual rate in effect for each year of the line.
///
/// Year 0 uses `initial_rate_pct` as given; each later year adds
/// `annual_increase_pct` and clamps at `rate_cap_pct`.
pub fn rate_path(initial_rate_pct: f64, rate_cap_pct: f64, annual_increase_pct: f64, years: u32) -> Vec<f64> {
    let mut rates = Vec::with_capacity(years as usize);
    let mut rate = initial_rate_pct;
    for _ in 0..years {
        rates.push(rate);
        rate = (rate + annual_increase_pct).min(rate_cap_pct);
    }
    rates
}

/// Cost of a HELOC drawn in full at funding
pub fn calc_heloc(
    cash_needed: f64,
    initial_rate_pct: f64,
    rate_cap_pct: f64,
    draw_years: u32,
    repay_years: u32,
    annual_rate_increase_pct: f64,
    origination_fee_pct: f64,
) -> CostResult {
    let annual_rates = rate_path(
        initial_rate_pct,
        rate_cap_pct,
        annual_rate_increase_pct,
        draw_years + repay_years,
    );
    let (draw_rates, repay_rates) = annual_rates.split_at(draw_years as usize);

    let mut monthly_payments: Vec<f64> = draw_rates
        .iter()
        .flat_map(|&annual| std::iter::repeat(cash_needed * annual / 1200.0).take(12))
        .collect();
    let draw_months = monthly_payments.len();

    let repay_monthly_rates: Vec<f64> = repay_rates
        .iter()
        .flat_map(|&annual| std::iter::repeat(annual / 1200.0).take(12))
        .collect();
    let repayment = amortize_variable_rate(cash_needed, &repay_monthly_rates);
    monthly_payments.extend_from_slice(&repayment.payments);

    let total_payments: f64 = monthly_payments.iter().sum();
    let origination_cost = cash_needed * (origination_fee_pct / 100.0);
    let average_payment = if monthly_payments.is_empty() {
        0.0
    } else {
        total_payments / monthly_payments.len() as f64
    };
    // No draw phase means no interest-only payment
    let draw_payment = monthly_payments[..draw_months].first().copied().unwrap_or(0.0);
    let repay_payment = monthly_payments.get(draw_months).copied().unwrap_or(0.0);

    log::debug!(
        "HELOC {} draw + {} repay years: {} payments, outstanding balance {:.6}",
        draw_years,
        repay_years,
        monthly_payments.len(),
        repayment.ending_balance,
    );

    CostResult {
        product: ProductKind::Heloc,
        cash_received: cash_needed,
        monthly_payment: average_payment,
        total_payments,
        total_interest_or_payout: total_payments - cash_needed,
        origination_cost,
        total_cost: total_payments + origination_cost,
        effective_rate_pct: initial_rate_pct,
        term_years: draw_years + repay_years,
        detail: ProductDetail::Heloc {
            initial_rate_pct,
            rate_cap_pct,
            draw_payment,
            repay_payment,
            draw_years,
            repay_years,
            monthly_payments,
        },
    }
}
