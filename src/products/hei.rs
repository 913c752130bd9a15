//! Home equity investment (shared appreciation) cost model

use super::result::{CostResult, ProductDetail, ProductKind};

/// Investor's default haircut on the appraised value, in percent
pub const DEFAULT_HEI_RISK_ADJUST_PCT: f64 = 85.0;

/// Default HEI origination fee, percent of cash received
pub const DEFAULT_HEI_ORIGINATION_FEE_PCT: f64 = 3.5;

/// Cost of an HEI settled after `term_years`.
///
/// The investor values the home at `risk_adjust_pct` of its current value,
/// so the equity share bought with `cash_needed` is larger than the nominal
/// ratio. At settlement the investor takes that share of the appreciated
/// home value. There is never a monthly payment.
///
/// A zero `term_years` is a caller contract violation. Zero `cash_needed`
/// yields a NaN effective rate (0/0), which callers must handle.
pub fn calc_hei(
    home_value: f64,
    cash_needed: f64,
    appreciation_rate_pct: f64,
    term_years: u32,
    risk_adjust_pct: f64,
    origination_fee_pct: f64,
) -> CostResult {
    let adjusted_value = home_value * (risk_adjust_pct / 100.0);
    let equity_share = cash_needed / adjusted_value;
    let future_home_value = home_value * (1.0 + appreciation_rate_pct / 100.0).powi(term_years as i32);
    let investor_payout = future_home_value * equity_share;
    let origination_cost = cash_needed * (origination_fee_pct / 100.0);
    let total_cost = investor_payout + origination_cost;
    let effective_rate_pct = ((total_cost / cash_needed).powf(1.0 / term_years as f64) - 1.0) * 100.0;

    CostResult {
        product: ProductKind::Hei,
        cash_received: cash_needed,
        monthly_payment: 0.0,
        total_payments: investor_payout,
        total_interest_or_payout: investor_payout,
        origination_cost,
        total_cost,
        effective_rate_pct,
        term_years,
        detail: ProductDetail::Hei {
            adjusted_value,
            equity_share_pct: equity_share * 100.0,
            future_home_value,
            investor_payout,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn reference() -> CostResult {
        calc_hei(500_000.0, 75_000.0, 4.0, 10, 85.0, 3.5)
    }

    #[test]
    fn test_reference_scenario() {
        let r = reference();

        assert_abs_diff_eq!(r.equity_share_pct().unwrap(), 17.647, epsilon = 0.001);
        assert_abs_diff_eq!(r.future_home_value().unwrap(), 740_122.14, epsilon = 0.01);
        assert_abs_diff_eq!(r.total_interest_or_payout, 130_609.79, epsilon = 0.01);
        assert_abs_diff_eq!(r.origination_cost, 2_625.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.total_cost, 133_234.79, epsilon = 0.01);
        assert_abs_diff_eq!(r.effective_rate_pct, 5.9146, epsilon = 0.0001);
        assert_eq!(r.cash_received, 75_000.0);
        assert_eq!(r.term_years, 10);
    }

    #[test]
    fn test_adjusted_value_applies_haircut() {
        match reference().detail {
            ProductDetail::Hei { adjusted_value, .. } => assert_abs_diff_eq!(adjusted_value, 425_000.0, epsilon = 1e-9),
            other => panic!("unexpected detail {:?}", other),
        }
    }

    #[test]
    fn test_monthly_payment_always_zero() {
        for (home, cash, appr, term, risk, fee) in [
            (500_000.0, 75_000.0, 4.0, 10, 85.0, 3.5),
            (250_000.0, 200_000.0, -3.0, 1, 70.0, 0.0),
            (1_200_000.0, 15_000.0, 10.0, 30, 100.0, 4.0),
            (400_000.0, 0.0, 0.0, 5, 85.0, 3.5),
        ] {
            assert_eq!(calc_hei(home, cash, appr, term, risk, fee).monthly_payment, 0.0);
        }
    }

    #[test]
    fn test_one_year_effective_rate_matches_appreciation() {
        // No haircut, no fee: the investor's claim grows exactly with the home
        let r = calc_hei(500_000.0, 75_000.0, 6.0, 1, 100.0, 0.0);
        assert_relative_eq!(r.effective_rate_pct, 6.0, max_relative = 1e-9);

        // With a haircut the one-year rate is the grossed-up claim less principal
        let r = calc_hei(500_000.0, 75_000.0, 6.0, 1, 85.0, 0.0);
        assert_relative_eq!(r.effective_rate_pct, (1.06 / 0.85 - 1.0) * 100.0, max_relative = 1e-9);
    }

    #[test]
    fn test_cost_rises_with_appreciation() {
        let low = calc_hei(500_000.0, 75_000.0, 2.0, 10, 85.0, 3.5);
        let high = calc_hei(500_000.0, 75_000.0, 6.0, 10, 85.0, 3.5);
        assert!(high.total_cost > low.total_cost);
    }

    #[test]
    fn test_depreciation_is_not_an_error() {
        let r = calc_hei(500_000.0, 75_000.0, -5.0, 10, 85.0, 3.5);
        assert!(r.total_cost.is_finite());
        assert!(r.future_home_value().unwrap() < 500_000.0);
    }

    #[test]
    fn test_zero_cash_needed_gives_nan_effective_rate() {
        let r = calc_hei(500_000.0, 0.0, 4.0, 10, 85.0, 3.5);
        assert_eq!(r.total_cost, 0.0);
        assert_eq!(r.equity_share_pct(), Some(0.0));
        assert!(r.effective_rate_pct.is_nan());
    }

    #[test]
    fn test_zero_home_value_gives_non_finite_share() {
        let r = calc_hei(0.0, 75_000.0, 4.0, 10, 85.0, 3.5);
        assert!(!r.equity_share_pct().unwrap().is_finite());
    }
}
