//! Rule-based eligibility screening for each product
//!
//! Every criterion is evaluated and reported, pass or fail, so callers can
//! show a full checklist rather than only the first failure.

use crate::products::ProductKind;
use serde::{Deserialize, Serialize};

pub const HEI_MIN_CREDIT_SCORE: u32 = 500;
pub const HEI_MIN_EQUITY_PCT: f64 = 25.0;

pub const LOAN_MIN_CREDIT_SCORE: u32 = 620;
pub const LOAN_MAX_DTI_PCT: f64 = 43.0;
pub const LOAN_MIN_EQUITY_PCT: f64 = 15.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReasonStatus {
    Met,
    Unmet,
    /// Informational; never affects eligibility
    Advisory,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reason {
    pub text: String,
    pub status: ReasonStatus,
}

impl Reason {
    fn check(met: bool, pass_text: String, fail_text: String) -> Self {
        if met {
            Self { text: pass_text, status: ReasonStatus::Met }
        } else {
            Self { text: fail_text, status: ReasonStatus::Unmet }
        }
    }

    fn advisory(text: &str) -> Self {
        Self {
            text: text.to_string(),
            status: ReasonStatus::Advisory,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QualificationResult {
    pub qualified: bool,
    /// One entry per criterion, in display order
    pub reasons: Vec<Reason>,
}

impl QualificationResult {
    pub fn reason_texts(&self) -> Vec<&str> {
        self.reasons.iter().map(|r| r.text.as_str()).collect()
    }

    pub fn failures(&self) -> impl Iterator<Item = &Reason> {
        self.reasons.iter().filter(|r| r.status == ReasonStatus::Unmet)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Qualification {
    pub hei: QualificationResult,
    pub home_equity_loan: QualificationResult,
    pub heloc: QualificationResult,
}

impl Qualification {
    pub fn for_product(&self, product: ProductKind) -> &QualificationResult {
        match product {
            ProductKind::Hei => &self.hei,
            ProductKind::HomeEquityLoan => &self.home_equity_loan,
            ProductKind::Heloc => &self.heloc,
        }
    }

    pub fn qualifies_for(&self, product: ProductKind) -> bool {
        self.for_product(product).qualified
    }
}

/// Screen all three products against the homeowner's credit, DTI and equity
pub fn check_qualification(
    credit_score: u32,
    dti_ratio: f64,
    home_value: f64,
    mortgage_balance: f64,
) -> Qualification {
    let loan_to_value = mortgage_balance / home_value * 100.0;
    let equity = 100.0 - loan_to_value;

    let hei_credit = credit_score >= HEI_MIN_CREDIT_SCORE;
    let hei_equity = equity >= HEI_MIN_EQUITY_PCT;
    let hei = QualificationResult {
        qualified: hei_credit && hei_equity,
        reasons: vec![
            Reason::check(
                hei_credit,
                format!("Credit score meets minimum ({}+)", HEI_MIN_CREDIT_SCORE),
                format!("Credit score below {} minimum", HEI_MIN_CREDIT_SCORE),
            ),
            equity_reason(hei_equity, equity, HEI_MIN_EQUITY_PCT),
            Reason {
                text: "No DTI requirement".to_string(),
                status: ReasonStatus::Met,
            },
        ],
    };

    let loan_credit = credit_score >= LOAN_MIN_CREDIT_SCORE;
    let loan_dti = dti_ratio <= LOAN_MAX_DTI_PCT;
    let loan_equity = equity >= LOAN_MIN_EQUITY_PCT;
    let traditional_reasons = vec![
        Reason::check(
            loan_credit,
            format!("Credit score meets minimum ({}+)", LOAN_MIN_CREDIT_SCORE),
            format!("Credit score below {} (yours: {})", LOAN_MIN_CREDIT_SCORE, credit_score),
        ),
        Reason::check(
            loan_dti,
            format!("DTI ratio OK ({}% <= {}%)", dti_ratio, LOAN_MAX_DTI_PCT),
            format!("DTI ratio too high ({}% > {}%)", dti_ratio, LOAN_MAX_DTI_PCT),
        ),
        equity_reason(loan_equity, equity, LOAN_MIN_EQUITY_PCT),
    ];
    let traditional_qualified = loan_credit && loan_dti && loan_equity;

    let home_equity_loan = QualificationResult {
        qualified: traditional_qualified,
        reasons: traditional_reasons.clone(),
    };

    let mut heloc_reasons = traditional_reasons;
    heloc_reasons.push(Reason::advisory("Note: Variable rate - payments may increase"));
    let heloc = QualificationResult {
        qualified: traditional_qualified,
        reasons: heloc_reasons,
    };

    log::debug!(
        "Qualification at {:.1}% equity: hei={} loan={} heloc={}",
        equity,
        hei.qualified,
        home_equity_loan.qualified,
        heloc.qualified
    );

    Qualification {
        hei,
        home_equity_loan,
        heloc,
    }
}

fn equity_reason(met: bool, equity: f64, minimum: f64) -> Reason {
    Reason::check(
        met,
        format!("Sufficient equity ({:.0}% >= {}%)", equity, minimum),
        format!("Insufficient equity ({:.0}% < {}%)", equity, minimum),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_everyone_qualifies() {
        let q = check_qualification(650, 30.0, 500_000.0, 350_000.0);

        assert!(q.hei.qualified);
        assert!(q.home_equity_loan.qualified);
        assert!(q.heloc.qualified);
        assert_eq!(
            q.hei.reason_texts(),
            vec!["Credit score meets minimum (500+)", "Sufficient equity (30% >= 25%)", "No DTI requirement"]
        );
        assert_eq!(
            q.home_equity_loan.reason_texts(),
            vec!["Credit score meets minimum (620+)", "DTI ratio OK (30% <= 43%)", "Sufficient equity (30% >= 15%)"]
        );
    }

    #[test]
    fn test_thin_equity_disqualifies_all() {
        let q = check_qualification(550, 50.0, 500_000.0, 480_000.0);

        for product in ProductKind::ALL {
            let result = q.for_product(product);
            assert!(!result.qualified, "{} should not qualify", product);
            assert!(
                result.reasons.iter().any(|r| r.text.starts_with("Insufficient equity (4% <")),
                "{} missing equity failure: {:?}",
                product,
                result.reason_texts()
            );
        }
        assert!(q.hei.reason_texts().contains(&"Insufficient equity (4% < 25%)"));
        assert!(q.heloc.reason_texts().contains(&"Insufficient equity (4% < 15%)"));
    }

    #[test]
    fn test_all_criteria_reported_without_short_circuit() {
        let q = check_qualification(550, 50.0, 500_000.0, 480_000.0);

        assert_eq!(
            q.home_equity_loan.reason_texts(),
            vec![
                "Credit score below 620 (yours: 550)",
                "DTI ratio too high (50% > 43%)",
                "Insufficient equity (4% < 15%)",
            ]
        );
        assert_eq!(q.home_equity_loan.failures().count(), 3);
        // HEI credit still passes even though equity fails
        assert_eq!(q.hei.reasons[0].status, ReasonStatus::Met);
    }

    #[test]
    fn test_heloc_always_carries_advisory() {
        for (score, dti, mortgage) in [(800, 10.0, 0.0), (400, 60.0, 490_000.0)] {
            let q = check_qualification(score, dti, 500_000.0, mortgage);
            let last = q.heloc.reasons.last().unwrap();
            assert_eq!(last.status, ReasonStatus::Advisory);
            assert_eq!(q.heloc.reasons.len(), q.home_equity_loan.reasons.len() + 1);
        }
    }

    #[test]
    fn test_boundaries_are_inclusive() {
        // 25% equity, 500 score, 43% DTI
        let q = check_qualification(500, 43.0, 400_000.0, 300_000.0);
        assert!(q.hei.qualified);

        let q = check_qualification(620, 43.0, 400_000.0, 340_000.0);
        assert!(q.qualifies_for(ProductKind::HomeEquityLoan));
        assert!(q.qualifies_for(ProductKind::Heloc));
    }

    #[test]
    fn test_dti_does_not_affect_hei() {
        let q = check_qualification(700, 95.0, 500_000.0, 100_000.0);
        assert!(q.hei.qualified);
        assert!(!q.home_equity_loan.qualified);
    }

    #[test]
    fn test_underwater_home_reports_negative_equity() {
        let q = check_qualification(780, 20.0, 400_000.0, 440_000.0);
        assert!(!q.hei.qualified);
        assert!(q.hei.reason_texts().contains(&"Insufficient equity (-10% < 25%)"));
    }
}
