//! Side-by-side comparison of the three products for one profile

use crate::products::{calc_heloc, calc_hei, calc_home_equity_loan, CostResult, ProductDetail, ProductKind};
use crate::profile::{FinancialProfile, ProductTerms};
use crate::qualification::{check_qualification, Qualification};
use serde::{Deserialize, Serialize};

/// Appreciation rates bracketing the HEI risk swing
const SWING_LOW_PCT: f64 = 2.0;
const SWING_HIGH_PCT: f64 = 6.0;

/// Loan payment above this share of the cash needed is flagged as heavy
const HEAVY_PAYMENT_RATIO: f64 = 0.015;

/// All three products priced over the profile's horizon
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comparison {
    pub hei: CostResult,
    pub home_equity_loan: CostResult,
    pub heloc: CostResult,
    pub qualification: Qualification,
}

impl Comparison {
    pub fn run(profile: &FinancialProfile, terms: &ProductTerms) -> Self {
        let horizon = profile.time_horizon_years;

        let hei = calc_hei(
            profile.home_value,
            profile.cash_needed,
            profile.appreciation_rate_pct,
            horizon,
            terms.hei.risk_adjust_pct,
            terms.hei.origination_fee_pct,
        );
        let home_equity_loan = calc_home_equity_loan(
            profile.cash_needed,
            terms.loan.annual_rate_pct,
            horizon,
            terms.loan.origination_fee_pct,
        );
        let (draw_years, repay_years) = terms.heloc.split_horizon(horizon);
        let heloc = calc_heloc(
            profile.cash_needed,
            terms.heloc.initial_rate_pct,
            terms.heloc.rate_cap_pct,
            draw_years,
            repay_years,
            terms.heloc.annual_rate_increase_pct,
            terms.heloc.origination_fee_pct,
        );
        let qualification = check_qualification(
            profile.credit_score,
            profile.dti_ratio,
            profile.home_value,
            profile.mortgage_balance,
        );

        log::debug!(
            "Compared over {} years: hei={:.2} loan={:.2} heloc={:.2}",
            horizon,
            hei.total_cost,
            home_equity_loan.total_cost,
            heloc.total_cost
        );

        Self {
            hei,
            home_equity_loan,
            heloc,
            qualification,
        }
    }

    pub fn result(&self, product: ProductKind) -> &CostResult {
        match product {
            ProductKind::Hei => &self.hei,
            ProductKind::HomeEquityLoan => &self.home_equity_loan,
            ProductKind::Heloc => &self.heloc,
        }
    }

    /// Lowest total cost regardless of eligibility (ties go to the later product)
    pub fn cheapest(&self) -> ProductKind {
        self.min_by(ProductKind::ALL.iter().copied(), |r| r.total_cost)
    }

    /// Lowest total cost among qualified products, or overall if none qualify
    pub fn cheapest_qualified(&self) -> ProductKind {
        let qualified: Vec<ProductKind> = ProductKind::ALL
            .iter()
            .copied()
            .filter(|&p| self.qualification.qualifies_for(p))
            .collect();
        if qualified.is_empty() {
            self.cheapest()
        } else {
            self.min_by(qualified.into_iter(), |r| r.total_cost)
        }
    }

    /// Lowest representative monthly payment
    pub fn lowest_monthly(&self) -> ProductKind {
        self.min_by(ProductKind::ALL.iter().copied(), |r| r.monthly_payment)
    }

    /// Total cost of `a` minus total cost of `b`
    pub fn cost_difference(&self, a: ProductKind, b: ProductKind) -> f64 {
        self.result(a).total_cost - self.result(b).total_cost
    }

    fn min_by<I, F>(&self, products: I, key: F) -> ProductKind
    where
        I: Iterator<Item = ProductKind>,
        F: Fn(&CostResult) -> f64,
    {
        products
            .fold(None, |best: Option<ProductKind>, p| match best {
                Some(b) if key(self.result(b)) < key(self.result(p)) => Some(b),
                _ => Some(p),
            })
            .unwrap_or(ProductKind::Hei)
    }
}

/// Headline verdict, checked in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    /// Low appreciation and HEI-eligible
    HeiFavorable,
    /// High appreciation makes the shared equity expensive
    AvoidHei,
    /// Only the HEI's looser requirements are met
    HeiOnlyOption,
    /// Loan payment is a large share of the cash received
    PaymentsSignificant,
    LoanSafest,
}

impl Verdict {
    pub fn headline(&self) -> &'static str {
        match self {
            Verdict::HeiFavorable => "HEI looks favorable.",
            Verdict::AvoidHei => "Avoid HEI at this appreciation rate.",
            Verdict::HeiOnlyOption => "HEI may be your best option.",
            Verdict::PaymentsSignificant => "Monthly payments are significant.",
            Verdict::LoanSafest => "Home Equity Loan is the safest bet.",
        }
    }
}

/// Multi-factor recommendation built on a comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub lowest_cost: ProductKind,
    pub lowest_cost_amount: f64,
    pub best_cash_flow: ProductKind,
    /// Always the fixed loan: its cost is known at funding
    pub lowest_risk: ProductKind,
    /// HEI cost at 6% appreciation minus cost at 2%
    pub hei_swing: f64,
    pub easiest_to_qualify: ProductKind,
    pub verdict: Verdict,
}

pub fn recommend(profile: &FinancialProfile, terms: &ProductTerms, comparison: &Comparison) -> Recommendation {
    let q = &comparison.qualification;
    let lowest_cost = comparison.cheapest_qualified();

    let hei_at = |rate: f64| {
        calc_hei(
            profile.home_value,
            profile.cash_needed,
            rate,
            profile.time_horizon_years,
            terms.hei.risk_adjust_pct,
            terms.hei.origination_fee_pct,
        )
        .total_cost
    };
    let hei_swing = hei_at(SWING_HIGH_PCT) - hei_at(SWING_LOW_PCT);

    let easiest_to_qualify = if q.hei.qualified {
        ProductKind::Hei
    } else if q.home_equity_loan.qualified {
        ProductKind::HomeEquityLoan
    } else {
        ProductKind::Heloc
    };

    let appreciation = profile.appreciation_rate_pct;
    let verdict = if appreciation <= 2.5 && q.hei.qualified {
        Verdict::HeiFavorable
    } else if appreciation >= 5.0 {
        Verdict::AvoidHei
    } else if !q.home_equity_loan.qualified && !q.heloc.qualified && q.hei.qualified {
        Verdict::HeiOnlyOption
    } else if comparison.home_equity_loan.monthly_payment > profile.cash_needed * HEAVY_PAYMENT_RATIO {
        Verdict::PaymentsSignificant
    } else {
        Verdict::LoanSafest
    };

    Recommendation {
        lowest_cost,
        lowest_cost_amount: comparison.result(lowest_cost).total_cost,
        best_cash_flow: comparison.lowest_monthly(),
        lowest_risk: ProductKind::HomeEquityLoan,
        hei_swing,
        easiest_to_qualify,
        verdict,
    }
}

/// Payment burden of one product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlowLine {
    pub product: ProductKind,
    pub label: String,
    pub monthly: f64,
    pub annual: f64,
    /// Total cost over the product's term
    pub over_term: f64,
    /// Nothing is paid until settlement
    pub deferred: bool,
}

/// Cash an HEI keeps in hand compared with the fixed loan's payments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeiCashFlowSavings {
    pub monthly: f64,
    pub annual: f64,
    pub over_horizon: f64,
    /// HEI total cost due when the agreement settles
    pub owed_at_settlement: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    /// HEI, home equity loan, HELOC in that order
    pub lines: Vec<CashFlowLine>,
    /// `None` when the loan has no payment to save
    pub hei_savings: Option<HeiCashFlowSavings>,
}

impl CashFlow {
    pub fn line(&self, product: ProductKind) -> Option<&CashFlowLine> {
        self.lines.iter().find(|l| l.product == product)
    }

    /// Largest monthly payment across the products
    pub fn max_monthly(&self) -> f64 {
        self.lines.iter().map(|l| l.monthly).fold(0.0, f64::max)
    }
}

/// Monthly and annual burden of each product plus the HEI's cash-flow advantage.
///
/// The HELOC line shows its draw-phase payment, or the first repayment when
/// the line has no draw phase.
pub fn cash_flow(profile: &FinancialProfile, comparison: &Comparison) -> CashFlow {
    let loan = &comparison.home_equity_loan;
    let heloc = &comparison.heloc;

    let (heloc_label, heloc_monthly) = match &heloc.detail {
        ProductDetail::Heloc { draw_years: 0, repay_payment, .. } => ("HELOC (Repay)", *repay_payment),
        ProductDetail::Heloc { draw_payment, .. } => ("HELOC (Draw)", *draw_payment),
        _ => ("HELOC", heloc.monthly_payment),
    };

    let line = |product: ProductKind, label: &str, monthly: f64, result: &CostResult, deferred: bool| CashFlowLine {
        product,
        label: label.to_string(),
        monthly,
        annual: monthly * 12.0,
        over_term: result.total_cost,
        deferred,
    };

    let lines = vec![
        line(ProductKind::Hei, "HEI", 0.0, &comparison.hei, true),
        line(ProductKind::HomeEquityLoan, "Home Equity Loan", loan.monthly_payment, loan, false),
        line(ProductKind::Heloc, heloc_label, heloc_monthly, heloc, false),
    ];

    let hei_savings = (loan.monthly_payment > 0.0).then(|| HeiCashFlowSavings {
        monthly: loan.monthly_payment,
        annual: loan.monthly_payment * 12.0,
        over_horizon: loan.monthly_payment * (profile.time_horizon_years * 12) as f64,
        owed_at_settlement: comparison.hei.total_cost,
    });

    CashFlow { lines, hei_savings }
}
