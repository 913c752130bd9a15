//! Fixed-rate home equity loan cost model

use super::result::{CostResult, ProductDetail, ProductKind};
use crate::amortization::fixed_payment;

/// Default fixed loan rate (annual percent)
pub const DEFAULT_LOAN_RATE_PCT: f64 = 7.5;

/// Default loan origination fee, percent of principal
pub const DEFAULT_LOAN_ORIGINATION_FEE_PCT: f64 = 1.0;

/// Cost of a level-payment loan of `cash_needed` over `term_years`
pub fn calc_home_equity_loan(
    cash_needed: f64,
    annual_rate_pct: f64,
    term_years: u32,
    origination_fee_pct: f64,
) -> CostResult {
    let num_payments = term_years * 12;
    let monthly_payment = fixed_payment(cash_needed, annual_rate_pct / 1200.0, num_payments);
    let total_payments = monthly_payment * num_payments as f64;
    let origination_cost = cash_needed * (origination_fee_pct / 100.0);

    CostResult {
        product: ProductKind::HomeEquityLoan,
        cash_received: cash_needed,
        monthly_payment,
        total_payments,
        total_interest_or_payout: total_payments - cash_needed,
        origination_cost,
        total_cost: total_payments + origination_cost,
        effective_rate_pct: annual_rate_pct,
        term_years,
        detail: ProductDetail::HomeEquityLoan {
            interest_rate_pct: annual_rate_pct,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_reference_scenario() {
        let r = calc_home_equity_loan(75_000.0, 7.5, 10, 1.0);

        assert_abs_diff_eq!(r.monthly_payment, 890.26, epsilon = 0.01);
        assert_abs_diff_eq!(r.total_payments, 106_831.59, epsilon = 0.01);
        assert_abs_diff_eq!(r.total_interest_or_payout, 31_831.59, epsilon = 0.01);
        assert_abs_diff_eq!(r.origination_cost, 750.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.total_cost, 107_581.59, epsilon = 0.01);
        assert_eq!(r.effective_rate_pct, 7.5);
    }

    #[test]
    fn test_zero_rate_loan_has_no_interest() {
        let r = calc_home_equity_loan(60_000.0, 0.0, 5, 0.0);
        assert_eq!(r.monthly_payment, 1_000.0);
        assert_abs_diff_eq!(r.total_interest_or_payout, 0.0, epsilon = 1e-9);
        assert_abs_diff_eq!(r.total_cost, 60_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_longer_term_lowers_payment_raises_cost() {
        let short = calc_home_equity_loan(75_000.0, 7.5, 10, 1.0);
        let long = calc_home_equity_loan(75_000.0, 7.5, 20, 1.0);
        assert!(long.monthly_payment < short.monthly_payment);
        assert!(long.total_cost > short.total_cost);
    }
}
