//! Annuity arithmetic shared by every product calculator
//!
//! Two building blocks:
//! - `fixed_payment`: level payment that retires a principal over `n` periods
//! - `amortize_variable_rate`: period-by-period schedule where the rate may
//!   change every period (used by the HELOC repayment phase)

use serde::{Deserialize, Serialize};

/// Level payment that fully amortizes `principal` over `num_periods` periods.
///
/// A zero periodic rate falls back to straight-line repayment
/// (`principal / num_periods`) instead of the annuity formula, which would
/// divide zero by zero.
///
/// `num_periods == 0` is a caller contract violation.
pub fn fixed_payment(principal: f64, periodic_rate: f64, num_periods: u32) -> f64 {
    debug_assert!(num_periods > 0, "fixed_payment requires at least one period");

    let n = num_periods as f64;
    if periodic_rate == 0.0 {
        return principal / n;
    }

    let growth = (1.0 + periodic_rate).powf(n);
    principal * (periodic_rate * growth) / (growth - 1.0)
}

/// Result of stepping a balance through a variable-rate schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmortizationSchedule {
    /// Sum of every payment made
    pub total_paid: f64,

    /// Payment made in each period, in order
    pub payments: Vec<f64>,

    /// Balance left after the last payment (zero within float tolerance)
    pub ending_balance: f64,
}

impl AmortizationSchedule {
    pub fn first_payment(&self) -> Option<f64> {
        self.payments.first().copied()
    }

    pub fn total_interest(&self, principal: f64) -> f64 {
        self.total_paid - principal
    }
}

/// Amortize `principal` over one period per entry of `rates_by_period`.
///
/// Each period charges interest at that period's rate, then re-solves the
/// level payment as if that rate held for all remaining periods. The payment
/// is capped at balance + interest so the final period can never overshoot.
/// Stepping stops early once the balance is retired.
pub fn amortize_variable_rate(principal: f64, rates_by_period: &[f64]) -> AmortizationSchedule {
    let total_periods = rates_by_period.len();
    let mut balance = principal;
    let mut payments = Vec::with_capacity(total_periods);

    for (period, &rate) in rates_by_period.iter().enumerate() {
        if balance <= 0.0 {
            break;
        }

        let remaining = (total_periods - period) as u32;
        let interest = balance * rate;
        let payment = fixed_payment(balance, rate, remaining).min(balance + interest);

        balance -= payment - interest;
        payments.push(payment);
    }

    AmortizationSchedule {
        total_paid: payments.iter().sum(),
        payments,
        ending_balance: balance,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn test_zero_rate_is_straight_line() {
        for (principal, n) in [(75_000.0, 120), (1_000.0, 7), (0.0, 12), (123_456.78, 1)] {
            assert_eq!(fixed_payment(principal, 0.0, n), principal / n as f64);
        }
    }

    #[test]
    fn test_fixed_payment_matches_annuity_table() {
        // 7.5% APR, 10 years
        let payment = fixed_payment(75_000.0, 0.075 / 12.0, 120);
        assert_abs_diff_eq!(payment, 890.26, epsilon = 0.01);
    }

    #[test]
    fn test_fixed_payment_retires_balance() {
        for (principal, rate, n) in [(75_000.0, 0.00625, 120), (250_000.0, 0.005, 360), (10_000.0, 0.02, 12)] {
            let payment = fixed_payment(principal, rate, n);
            let mut balance: f64 = principal;
            for _ in 0..n {
                balance = balance * (1.0 + rate) - payment;
            }
            assert_abs_diff_eq!(balance, 0.0, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_single_period_repays_principal_plus_interest() {
        assert_relative_eq!(fixed_payment(1_000.0, 0.01, 1), 1_010.0, max_relative = 1e-12);
    }

    #[test]
    fn test_constant_rate_schedule_matches_level_payment() {
        let rates = vec![0.005; 60];
        let schedule = amortize_variable_rate(20_000.0, &rates);
        let level = fixed_payment(20_000.0, 0.005, 60);

        assert_eq!(schedule.payments.len(), 60);
        for payment in &schedule.payments {
            assert_relative_eq!(*payment, level, max_relative = 1e-9);
        }
        assert_abs_diff_eq!(schedule.ending_balance, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_rising_rates_raise_payments_and_retire_balance() {
        let rates: Vec<f64> = (0..5)
            .flat_map(|year| std::iter::repeat(0.06 / 12.0 + year as f64 * 0.001).take(12))
            .collect();
        let schedule = amortize_variable_rate(50_000.0, &rates);

        assert!(schedule.payments[12] > schedule.payments[11]);
        assert!(schedule.payments[48] > schedule.payments[36]);
        assert_abs_diff_eq!(schedule.ending_balance, 0.0, epsilon = 1e-6);
        assert!(schedule.total_interest(50_000.0) > 0.0);
    }

    #[test]
    fn test_empty_schedule() {
        let schedule = amortize_variable_rate(10_000.0, &[]);
        assert!(schedule.payments.is_empty());
        assert_eq!(schedule.total_paid, 0.0);
        assert_eq!(schedule.ending_balance, 10_000.0);
        assert_eq!(schedule.first_payment(), None);
    }

    #[test]
    fn test_zero_principal_makes_no_payments() {
        let schedule = amortize_variable_rate(0.0, &[0.01; 12]);
        assert!(schedule.payments.is_empty());
        assert_eq!(schedule.total_paid, 0.0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "at least one period")]
    fn test_zero_periods_is_rejected() {
        fixed_payment(1_000.0, 0.01, 0);
    }
}
