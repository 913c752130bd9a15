//! Plain-text comparison report
//!
//! Rounding happens here and nowhere else: the engine hands over raw values.

use crate::comparison::Comparison;
use crate::products::{ProductDetail, ProductKind};
use crate::profile::FinancialProfile;
use crate::scenario::ScenarioBook;
use chrono::NaiveDate;
use std::fmt::{self, Write};

/// Whole dollars with thousands separators, e.g. `$133,235` or `-$2,500`
pub fn format_dollars(amount: f64) -> String {
    if !amount.is_finite() {
        return format!("${}", amount);
    }
    let rounded = amount.abs().round() as u64;
    let digits = rounded.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if amount < 0.0 && rounded > 0 {
        format!("-${}", grouped)
    } else {
        format!("${}", grouped)
    }
}

/// Difference with an explicit sign, e.g. `+$25,653`
fn format_signed(amount: f64) -> String {
    if amount > 0.0 {
        format!("+{}", format_dollars(amount))
    } else {
        format_dollars(amount)
    }
}

/// Render the downloadable comparison report
pub fn render_report(
    profile: &FinancialProfile,
    comparison: &Comparison,
    scenarios: &ScenarioBook,
    generated: NaiveDate,
) -> String {
    let mut out = String::new();
    write_report(&mut out, profile, comparison, scenarios, generated)
        .expect("writing to a String cannot fail");
    out
}

fn write_report(
    out: &mut String,
    profile: &FinancialProfile,
    comparison: &Comparison,
    scenarios: &ScenarioBook,
    generated: NaiveDate,
) -> fmt::Result {
    let heavy = "=".repeat(50);
    let light = "-".repeat(50);
    let hei = &comparison.hei;
    let loan = &comparison.home_equity_loan;
    let heloc = &comparison.heloc;

    writeln!(out, "HOME EQUITY COMPARISON REPORT")?;
    writeln!(out, "Generated: {}", generated.format("%B %-d, %Y"))?;
    writeln!(out, "{}", heavy)?;
    writeln!(out)?;

    writeln!(out, "YOUR HOME")?;
    writeln!(out, "  Home Value:        {}", format_dollars(profile.home_value))?;
    writeln!(out, "  Mortgage Balance:  {}", format_dollars(profile.mortgage_balance))?;
    writeln!(
        out,
        "  Available Equity:  {} ({:.0}%)",
        format_dollars(profile.equity()),
        profile.equity_pct()
    )?;
    writeln!(out, "  Credit Score:      {}", profile.credit_score)?;
    writeln!(out, "  DTI Ratio:         {}%", profile.dti_ratio)?;
    writeln!(out)?;

    writeln!(out, "SCENARIO")?;
    writeln!(out, "  Cash Needed:       {}", format_dollars(profile.cash_needed))?;
    writeln!(out, "  Time Horizon:      {} years", profile.time_horizon_years)?;
    writeln!(out, "  Appreciation Rate: {}%/year", profile.appreciation_rate_pct)?;
    writeln!(out)?;

    writeln!(out, "{}", light)?;
    writeln!(out, "COMPARISON RESULTS")?;
    writeln!(out, "{}", light)?;
    writeln!(out)?;

    writeln!(out, "HEI (Home Equity Investment)")?;
    writeln!(out, "  Total Cost:        {}", format_dollars(hei.total_cost))?;
    writeln!(out, "  Monthly Payment:   $0 (deferred)")?;
    writeln!(out, "  Effective Rate:    {:.1}%", hei.effective_rate_pct)?;
    writeln!(out, "  Equity Shared:     {:.1}%", hei.equity_share_pct().unwrap_or(0.0))?;
    writeln!(out, "  Investor Payout:   {}", format_dollars(hei.total_interest_or_payout))?;
    writeln!(out)?;

    writeln!(out, "Home Equity Loan")?;
    writeln!(out, "  Total Cost:        {}", format_dollars(loan.total_cost))?;
    writeln!(out, "  Monthly Payment:   {}", format_dollars(loan.monthly_payment))?;
    writeln!(out, "  Interest Rate:     {}% (fixed)", loan.effective_rate_pct)?;
    writeln!(out, "  Total Interest:    {}", format_dollars(loan.total_interest_or_payout))?;
    writeln!(out)?;

    writeln!(out, "HELOC")?;
    writeln!(out, "  Total Cost:        {}", format_dollars(heloc.total_cost))?;
    if let ProductDetail::Heloc {
        initial_rate_pct,
        rate_cap_pct,
        draw_payment,
        repay_payment,
        ..
    } = &heloc.detail
    {
        writeln!(out, "  Draw Payment:      {}/mo", format_dollars(*draw_payment))?;
        writeln!(out, "  Repay Payment:     {}/mo", format_dollars(*repay_payment))?;
        writeln!(out, "  Initial Rate:      {}% (variable)", initial_rate_pct)?;
        writeln!(out, "  Rate Cap:          {}%", rate_cap_pct)?;
    }
    writeln!(out, "  Total Interest:    {}", format_dollars(heloc.total_interest_or_payout))?;
    writeln!(out)?;

    writeln!(out, "{}", light)?;
    writeln!(out, "COST DIFFERENCE")?;
    for (label, a, b) in [
        ("HEI vs HE Loan:  ", ProductKind::Hei, ProductKind::HomeEquityLoan),
        ("HEI vs HELOC:    ", ProductKind::Hei, ProductKind::Heloc),
        ("HE Loan vs HELOC:", ProductKind::HomeEquityLoan, ProductKind::Heloc),
    ] {
        writeln!(out, "  {} {}", label, format_signed(comparison.cost_difference(a, b)))?;
    }
    writeln!(out, "{}", heavy)?;

    if !scenarios.is_empty() {
        writeln!(out)?;
        writeln!(out, "SAVED SCENARIOS")?;
        for s in scenarios.iter() {
            writeln!(
                out,
                "  {}: {}% appr, {} cash, {}yr -> Best: {}",
                s.label,
                s.profile.appreciation_rate_pct,
                format_dollars(s.profile.cash_needed),
                s.profile.time_horizon_years,
                s.cheapest
            )?;
        }
    }

    writeln!(out)?;
    write!(out, "Generated by home_equity_engine")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::ProductTerms;

    #[test]
    fn test_format_dollars() {
        assert_eq!(format_dollars(0.0), "$0");
        assert_eq!(format_dollars(999.4), "$999");
        assert_eq!(format_dollars(1_000.0), "$1,000");
        assert_eq!(format_dollars(133_234.79), "$133,235");
        assert_eq!(format_dollars(1_234_567.0), "$1,234,567");
        assert_eq!(format_dollars(-2_500.0), "-$2,500");
        assert_eq!(format_dollars(-0.2), "$0");
    }

    #[test]
    fn test_report_contents() {
        let profile = FinancialProfile::default();
        let terms = ProductTerms::default();
        let comparison = Comparison::run(&profile, &terms);
        let mut scenarios = ScenarioBook::new();
        scenarios.capture(&profile, &terms);

        let date = NaiveDate::from_ymd_opt(2026, 3, 5).unwrap();
        let report = render_report(&profile, &comparison, &scenarios, date);

        assert!(report.starts_with("HOME EQUITY COMPARISON REPORT\nGenerated: March 5, 2026\n"));
        assert!(report.contains("  Available Equity:  $300,000 (60%)"));
        assert!(report.contains("  Total Cost:        $133,235"));
        assert!(report.contains("  Monthly Payment:   $890"));
        assert!(report.contains("  Draw Payment:      $516/mo"));
        assert!(report.contains("  HEI vs HE Loan:   +$25,653"));
        assert!(report.contains("  HE Loan vs HELOC: +$36,894"));
        assert!(report.contains("  Scenario 1: 4% appr, $75,000 cash, 10yr -> Best: HELOC"));
    }

    #[test]
    fn test_report_without_scenarios() {
        let profile = FinancialProfile::default();
        let comparison = Comparison::run(&profile, &ProductTerms::default());
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let report = render_report(&profile, &comparison, &ScenarioBook::new(), date);
        assert!(!report.contains("SAVED SCENARIOS"));
    }

    #[test]
    fn test_repay_only_heloc_reports_no_draw_payment() {
        let profile = FinancialProfile::default();
        let mut terms = ProductTerms::default();
        terms.heloc.draw_years = 0;
        let comparison = Comparison::run(&profile, &terms);
        let date = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap();
        let report = render_report(&profile, &comparison, &ScenarioBook::new(), date);

        assert!(report.contains("  Draw Payment:      $0/mo"));
        assert!(!report.contains("  Repay Payment:     $0/mo"));
        assert!(report.ends_with("\nGenerated by home_equity_engine"));
    }
}
