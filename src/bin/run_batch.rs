//! Run comparisons for a batch of profiles from a CSV file
//!
//! Usage: run_batch [input.csv] [output.csv]
//! Product terms come from the environment (HEQ_RATE, HELOC_RATE, ...).

use anyhow::{Context, Result};
use home_equity_engine::comparison::{recommend, Comparison, Recommendation};
use home_equity_engine::products::ProductKind;
use home_equity_engine::profile::{load_profiles, ProductTerms, ProfileRecord};
use home_equity_engine::projection::{find_breakeven_year, yearly_costs};
use rayon::prelude::*;
use std::env;
use std::fs::File;
use std::io::Write;
use std::time::Instant;

const DEFAULT_INPUT: &str = "profiles.csv";
const DEFAULT_OUTPUT: &str = "batch_comparison_output.csv";

/// Outcome for one input row
struct BatchRow {
    profile_id: u32,
    comparison: Comparison,
    recommendation: Recommendation,
    breakeven_year: Option<u32>,
}

fn run_one(record: &ProfileRecord, terms: &ProductTerms) -> Option<BatchRow> {
    if let Err(e) = record.profile.validate() {
        log::warn!("Skipping profile {}: {}", record.profile_id, e);
        return None;
    }
    let comparison = Comparison::run(&record.profile, terms);
    let recommendation = recommend(&record.profile, terms, &comparison);
    let breakeven_year = find_breakeven_year(&yearly_costs(&record.profile, terms));
    Some(BatchRow {
        profile_id: record.profile_id,
        comparison,
        recommendation,
        breakeven_year,
    })
}

fn qualified_flag(comparison: &Comparison, product: ProductKind) -> u8 {
    u8::from(comparison.qualification.qualifies_for(product))
}

fn main() -> Result<()> {
    env_logger::init();

    let mut args = env::args().skip(1);
    let input_path = args.next().unwrap_or_else(|| DEFAULT_INPUT.to_string());
    let output_path = args.next().unwrap_or_else(|| DEFAULT_OUTPUT.to_string());

    let start = Instant::now();
    println!("Loading profiles from {}...", input_path);
    let records = load_profiles(&input_path).with_context(|| format!("Failed to load {}", input_path))?;
    println!("Loaded {} profiles in {:?}", records.len(), start.elapsed());

    let terms = ProductTerms::from_env();

    println!("Running comparisons...");
    let run_start = Instant::now();
    let rows: Vec<BatchRow> = records.par_iter().filter_map(|r| run_one(r, &terms)).collect();
    println!("Comparisons complete in {:?}", run_start.elapsed());

    let mut file = File::create(&output_path).with_context(|| format!("Failed to create {}", output_path))?;
    writeln!(
        file,
        "ProfileID,HEI_TotalCost,HEI_EffRate,Loan_Monthly,Loan_TotalCost,HELOC_Monthly,HELOC_TotalCost,\
         HEI_Qualified,Loan_Qualified,HELOC_Qualified,Cheapest,CheapestQualified,Verdict,BreakevenYear"
    )?;

    let mut cheapest_counts = [0usize; 3];
    for row in &rows {
        let c = &row.comparison;
        let cheapest_idx = ProductKind::ALL
            .iter()
            .position(|&p| p == row.recommendation.lowest_cost)
            .unwrap_or(0);
        cheapest_counts[cheapest_idx] += 1;

        writeln!(
            file,
            "{},{:.2},{:.4},{:.2},{:.2},{:.2},{:.2},{},{},{},{},{},{:?},{}",
            row.profile_id,
            c.hei.total_cost,
            c.hei.effective_rate_pct,
            c.home_equity_loan.monthly_payment,
            c.home_equity_loan.total_cost,
            c.heloc.monthly_payment,
            c.heloc.total_cost,
            qualified_flag(c, ProductKind::Hei),
            qualified_flag(c, ProductKind::HomeEquityLoan),
            qualified_flag(c, ProductKind::Heloc),
            c.cheapest(),
            row.recommendation.lowest_cost,
            row.recommendation.verdict,
            row.breakeven_year.map(|y| y.to_string()).unwrap_or_default(),
        )?;
    }

    println!("Output written to {}", output_path);

    println!("\nBatch Summary:");
    println!("  Profiles compared: {} of {}", rows.len(), records.len());
    for (product, count) in ProductKind::ALL.iter().zip(cheapest_counts) {
        println!("  Lowest qualified cost {:<17} {}", format!("{}:", product), count);
    }
    println!("\nTotal time: {:?}", start.elapsed());
    Ok(())
}
