//! Home Equity Engine CLI
//!
//! Compare an HEI, a fixed home equity loan and a HELOC for one homeowner

use anyhow::{bail, Context, Result};
use chrono::Local;
use clap::{Args, Parser, Subcommand};
use home_equity_engine::comparison::{cash_flow, recommend, Comparison};
use home_equity_engine::products::{rank_providers, ProductKind};
use home_equity_engine::profile::{FinancialProfile, ProductTerms};
use home_equity_engine::projection::{
    appreciation_sweep, crossover_rate, find_breakeven_year, sensitivity_at, yearly_costs, SweepRange,
    SCENARIO_RATES_PCT,
};
use home_equity_engine::report::{format_dollars, render_report};
use home_equity_engine::store::{
    EmploymentStatus, JsonFileStore, PropertyType, PropertyUse, Snapshot, SnapshotStore, WIZARD_STEPS,
};
use std::fs;
use std::path::PathBuf;

const DEFAULT_SNAPSHOT_PATH: &str = "heq_snapshot.json";

#[derive(Debug, Parser)]
#[command(name = "heq", version, about = "Home equity product cost comparison")]
struct Cli {
    /// Snapshot file holding the saved profile, terms, wizard state and scenarios
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Price all three products, check qualification and recommend one
    Compare(OutputArgs),
    /// Cumulative cost of each product for every year of the horizon
    Yearly(OutputArgs),
    /// HEI cost across a range of appreciation rates
    Sweep(SweepArgs),
    /// Quote every HEI provider in the catalog, cheapest first
    Providers(OutputArgs),
    /// Write the plain-text comparison report
    Report(ReportArgs),
    /// Manage saved scenarios in the snapshot
    Scenario {
        #[command(subcommand)]
        action: ScenarioAction,
    },
    /// Move through the application wizard
    Wizard(WizardArgs),
}

#[derive(Debug, Subcommand)]
enum ScenarioAction {
    /// Save the current inputs (overrides included) and results as a new scenario
    Capture(InputArgs),
    /// List saved scenarios
    List,
    /// Remove one scenario by id
    Remove { id: u64 },
    /// Remove every scenario
    Clear,
}

/// Profile and term overrides; anything omitted comes from the snapshot or defaults.
///
/// Overrides given to any command are saved back to the snapshot, so later
/// commands start from them.
#[derive(Debug, Args, Clone)]
struct InputArgs {
    #[arg(long)]
    home_value: Option<f64>,

    #[arg(long)]
    mortgage_balance: Option<f64>,

    #[arg(long)]
    cash_needed: Option<f64>,

    #[arg(long)]
    credit_score: Option<u32>,

    /// Debt-to-income ratio in percent
    #[arg(long)]
    dti: Option<f64>,

    /// Years until sale or payoff
    #[arg(long)]
    horizon: Option<u32>,

    /// Expected annual home appreciation in percent
    #[arg(long)]
    appreciation: Option<f64>,

    /// Fixed loan APR in percent
    #[arg(long)]
    loan_rate: Option<f64>,

    #[arg(long)]
    loan_fee: Option<f64>,

    /// HELOC starting rate in percent
    #[arg(long)]
    heloc_rate: Option<f64>,

    #[arg(long)]
    heloc_cap: Option<f64>,

    #[arg(long)]
    heloc_draw_years: Option<u32>,

    #[arg(long)]
    heloc_rate_increase: Option<f64>,

    #[arg(long)]
    heloc_fee: Option<f64>,

    #[arg(long)]
    hei_risk_adjust: Option<f64>,

    #[arg(long)]
    hei_fee: Option<f64>,
}

#[derive(Debug, Args, Clone)]
struct OutputArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

#[derive(Debug, Args, Clone)]
struct SweepArgs {
    #[command(flatten)]
    output: OutputArgs,

    #[arg(long, default_value_t = 0.0)]
    start: f64,

    #[arg(long, default_value_t = 10.0)]
    end: f64,

    #[arg(long, default_value_t = 0.5)]
    step: f64,
}

#[derive(Debug, Args, Clone)]
struct ReportArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Write to this file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args, Clone)]
struct WizardArgs {
    /// Jump to step 1-5
    #[arg(long, conflicts_with_all = ["next", "back"])]
    step: Option<u8>,

    #[arg(long, conflicts_with = "back")]
    next: bool,

    #[arg(long)]
    back: bool,

    /// Product chosen to apply for (hei, loan, heloc)
    #[arg(long)]
    select: Option<ProductKind>,

    /// single_family, condo, townhouse or multi_family
    #[arg(long)]
    property_type: Option<PropertyType>,

    /// primary, secondary or investment
    #[arg(long)]
    property_use: Option<PropertyUse>,

    /// employed, self_employed, retired or other
    #[arg(long)]
    employment: Option<EmploymentStatus>,

    /// Gross annual income in dollars
    #[arg(long)]
    income: Option<f64>,
}

impl InputArgs {
    fn has_overrides(&self) -> bool {
        let profile = [self.home_value, self.mortgage_balance, self.cash_needed, self.dti, self.appreciation];
        let terms = [
            self.loan_rate,
            self.loan_fee,
            self.heloc_rate,
            self.heloc_cap,
            self.heloc_rate_increase,
            self.heloc_fee,
            self.hei_risk_adjust,
            self.hei_fee,
        ];
        profile.iter().chain(terms.iter()).any(Option::is_some)
            || self.credit_score.is_some()
            || self.horizon.is_some()
            || self.heloc_draw_years.is_some()
    }

    fn apply(&self, profile: &mut FinancialProfile, terms: &mut ProductTerms) {
        fn set<T: Copy>(target: &mut T, value: Option<T>) {
            if let Some(v) = value {
                *target = v;
            }
        }

        set(&mut profile.home_value, self.home_value);
        set(&mut profile.mortgage_balance, self.mortgage_balance);
        set(&mut profile.cash_needed, self.cash_needed);
        set(&mut profile.credit_score, self.credit_score);
        set(&mut profile.dti_ratio, self.dti);
        set(&mut profile.time_horizon_years, self.horizon);
        set(&mut profile.appreciation_rate_pct, self.appreciation);

        set(&mut terms.loan.annual_rate_pct, self.loan_rate);
        set(&mut terms.loan.origination_fee_pct, self.loan_fee);
        set(&mut terms.heloc.initial_rate_pct, self.heloc_rate);
        set(&mut terms.heloc.rate_cap_pct, self.heloc_cap);
        set(&mut terms.heloc.draw_years, self.heloc_draw_years);
        set(&mut terms.heloc.annual_rate_increase_pct, self.heloc_rate_increase);
        set(&mut terms.heloc.origination_fee_pct, self.heloc_fee);
        set(&mut terms.hei.risk_adjust_pct, self.hei_risk_adjust);
        set(&mut terms.hei.origination_fee_pct, self.hei_fee);
    }
}

/// Snapshot store plus whether the user pointed at one explicitly
struct Session {
    store: JsonFileStore,
    explicit: bool,
}

impl Session {
    fn new(path: Option<PathBuf>) -> Self {
        let explicit = path.is_some();
        let path = path.unwrap_or_else(|| PathBuf::from(DEFAULT_SNAPSHOT_PATH));
        Self {
            store: JsonFileStore::new(path),
            explicit,
        }
    }

    /// Saved state, or defaults with terms from the environment
    fn load(&self) -> Result<Snapshot> {
        let stored = if self.explicit || self.store.path().exists() {
            self.store
                .load()
                .with_context(|| format!("Failed to read snapshot {}", self.store.path().display()))?
        } else {
            None
        };
        Ok(stored.unwrap_or_else(|| Snapshot {
            terms: ProductTerms::from_env(),
            ..Snapshot::default()
        }))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        self.store
            .save(snapshot)
            .with_context(|| format!("Failed to write snapshot {}", self.store.path().display()))
    }

    /// Snapshot with the command-line overrides applied and validated.
    /// Any override is persisted before the snapshot is returned.
    fn resolve(&self, input: &InputArgs) -> Result<Snapshot> {
        let mut snapshot = self.load()?;
        input.apply(&mut snapshot.profile, &mut snapshot.terms);
        snapshot.profile.validate()?;
        if input.has_overrides() {
            self.save(&snapshot)?;
            log::info!("Saved updated inputs to {}", self.store.path().display());
        }
        Ok(snapshot)
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();
    let session = Session::new(cli.snapshot);

    match cli.command {
        Command::Compare(args) => {
            let snapshot = session.resolve(&args.input)?;
            print_comparison(&snapshot.profile, &snapshot.terms, args.json)
        }
        Command::Yearly(args) => {
            let snapshot = session.resolve(&args.input)?;
            print_yearly(&snapshot.profile, &snapshot.terms, args.json)
        }
        Command::Sweep(args) => {
            let snapshot = session.resolve(&args.output.input)?;
            let range = SweepRange {
                start_pct: args.start,
                end_pct: args.end,
                step_pct: args.step,
            };
            print_sweep(&snapshot.profile, &snapshot.terms, &range, args.output.json)
        }
        Command::Providers(args) => {
            let snapshot = session.resolve(&args.input)?;
            print_providers(&snapshot.profile, args.json)
        }
        Command::Report(args) => {
            let snapshot = session.resolve(&args.input)?;
            let comparison = Comparison::run(&snapshot.profile, &snapshot.terms);
            let report = render_report(
                &snapshot.profile,
                &comparison,
                &snapshot.scenarios,
                Local::now().date_naive(),
            );
            match args.output {
                Some(path) => {
                    fs::write(&path, report).with_context(|| format!("Failed to write {}", path.display()))?;
                    println!("Report written to: {}", path.display());
                }
                None => println!("{}", report),
            }
            Ok(())
        }
        Command::Scenario { action } => run_scenario_action(&session, action),
        Command::Wizard(args) => run_wizard(&session, &args),
    }
}

fn print_comparison(profile: &FinancialProfile, terms: &ProductTerms, json: bool) -> Result<()> {
    let comparison = Comparison::run(profile, terms);
    let recommendation = recommend(profile, terms, &comparison);
    let flow = cash_flow(profile, &comparison);

    if json {
        let out = serde_json::json!({
            "comparison": comparison,
            "recommendation": recommendation,
            "cash_flow": flow,
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!(
        "Home {}  Mortgage {}  Cash {}  Horizon {}yr  Appreciation {}%",
        format_dollars(profile.home_value),
        format_dollars(profile.mortgage_balance),
        format_dollars(profile.cash_needed),
        profile.time_horizon_years,
        profile.appreciation_rate_pct
    );
    println!();
    println!(
        "{:<18} {:>12} {:>12} {:>14} {:>10} {:>10}",
        "Product", "Monthly", "Total Cost", "Interest/Share", "Eff Rate", "Qualified"
    );
    println!("{}", "-".repeat(82));
    for product in ProductKind::ALL {
        let r = comparison.result(product);
        println!(
            "{:<18} {:>12} {:>12} {:>14} {:>9.2}% {:>10}",
            product.label(),
            format_dollars(r.monthly_payment),
            format_dollars(r.total_cost),
            format_dollars(r.total_interest_or_payout),
            r.effective_rate_pct,
            if comparison.qualification.qualifies_for(product) { "yes" } else { "no" }
        );
    }

    println!();
    for product in ProductKind::ALL {
        println!("{}:", product.label());
        for reason in &comparison.qualification.for_product(product).reasons {
            println!("  [{:?}] {}", reason.status, reason.text);
        }
    }

    println!();
    println!("{}", recommendation.verdict.headline());
    println!(
        "  Lowest cost:        {} ({})",
        recommendation.lowest_cost,
        format_dollars(recommendation.lowest_cost_amount)
    );
    println!("  Best cash flow:     {}", recommendation.best_cash_flow);
    println!("  Lowest risk:        {}", recommendation.lowest_risk);
    println!("  Easiest to qualify: {}", recommendation.easiest_to_qualify);
    println!("  HEI swing (2%-6%):  {}", format_dollars(recommendation.hei_swing));

    println!();
    println!("Cash flow:");
    for line in &flow.lines {
        if line.deferred {
            println!("  {:<18} {:>10}/mo {:>12}", line.label, "$0", "Deferred");
        } else {
            println!(
                "  {:<18} {:>10}/mo {:>12}/yr",
                line.label,
                format_dollars(line.monthly),
                format_dollars(line.annual)
            );
        }
    }
    if let Some(savings) = flow.hei_savings {
        println!(
            "  The HEI keeps {}/month ({}/year) in hand versus the loan, {} over {} years, \
             but {} is owed at settlement.",
            format_dollars(savings.monthly),
            format_dollars(savings.annual),
            format_dollars(savings.over_horizon),
            profile.time_horizon_years,
            format_dollars(savings.owed_at_settlement)
        );
    }
    Ok(())
}

fn print_yearly(profile: &FinancialProfile, terms: &ProductTerms, json: bool) -> Result<()> {
    let points = yearly_costs(profile, terms);
    let breakeven = find_breakeven_year(&points);

    if json {
        let out = serde_json::json!({ "points": points, "breakeven_year": breakeven });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{:>4} {:>12} {:>12} {:>12}", "Year", "HEI", "HE Loan", "HELOC");
    println!("{}", "-".repeat(43));
    for p in &points {
        println!(
            "{:>4} {:>12} {:>12} {:>12}",
            p.year,
            format_dollars(p.hei_cost),
            format_dollars(p.loan_cumulative_cost),
            format_dollars(p.heloc_cumulative_cost)
        );
    }
    match breakeven {
        Some(year) => println!("\nHEI becomes more expensive than traditional options in year {}", year),
        None => println!("\nHEI stays cheaper than traditional options through year {}", points.len()),
    }
    Ok(())
}

fn print_sweep(profile: &FinancialProfile, terms: &ProductTerms, range: &SweepRange, json: bool) -> Result<()> {
    let points = appreciation_sweep(profile, terms, range);
    let table = sensitivity_at(profile, terms, &SCENARIO_RATES_PCT);
    let crossover = crossover_rate(&points);

    if json {
        let out = serde_json::json!({ "sweep": points, "scenarios": table, "crossover_rate_pct": crossover });
        println!("{}", serde_json::to_string_pretty(&out)?);
        return Ok(());
    }

    println!("{:>8} {:>12} {:>10} {:>12}", "Appr %", "HEI Cost", "Eff Rate", "vs Loan");
    println!("{}", "-".repeat(45));
    for p in &points {
        println!(
            "{:>8.1} {:>12} {:>9.2}% {:>12}",
            p.appreciation_rate_pct,
            format_dollars(p.hei_total_cost),
            p.hei_effective_rate_pct,
            format_dollars(p.hei_premium())
        );
    }
    if let Some(rate) = crossover {
        println!("\nHEI costs more than the loan from {:.1}% appreciation", rate);
    }

    println!();
    for p in &table {
        println!(
            "  At {}% appreciation: HEI {} ({:.1}%), {} vs loan, {} is cheaper",
            p.appreciation_rate_pct,
            format_dollars(p.hei_total_cost),
            p.hei_effective_rate_pct,
            format_dollars(p.hei_premium()),
            if p.hei_is_cheaper() { "HEI" } else { "loan" }
        );
    }
    Ok(())
}

fn print_providers(profile: &FinancialProfile, json: bool) -> Result<()> {
    let quotes = rank_providers(profile);

    if json {
        println!("{}", serde_json::to_string_pretty(&quotes)?);
        return Ok(());
    }

    println!(
        "{:<10} {:>6} {:>8} {:>12} {:>10} {:>9}",
        "Provider", "Term", "Share", "Total Cost", "Eff Rate", "Eligible"
    );
    println!("{}", "-".repeat(60));
    for q in &quotes {
        println!(
            "{:<10} {:>5}y {:>7.1}% {:>12} {:>9.2}% {:>9}",
            q.name,
            q.term_years,
            q.equity_share_pct,
            format_dollars(q.total_cost),
            q.effective_rate_pct,
            if q.eligible { "yes" } else { "no" }
        );
    }
    Ok(())
}

fn run_scenario_action(session: &Session, action: ScenarioAction) -> Result<()> {
    match action {
        ScenarioAction::Capture(input) => {
            let mut snapshot = session.resolve(&input)?;
            let (profile, terms) = (snapshot.profile.clone(), snapshot.terms);
            let scenario = snapshot.scenarios.capture(&profile, &terms);
            println!(
                "Saved {} (id {}): best is {} at {}",
                scenario.label,
                scenario.id,
                scenario.cheapest,
                format_dollars(match scenario.cheapest {
                    ProductKind::Hei => scenario.hei.total_cost,
                    ProductKind::HomeEquityLoan => scenario.home_equity_loan.total_cost,
                    ProductKind::Heloc => scenario.heloc.total_cost,
                })
            );
            session.save(&snapshot)
        }
        ScenarioAction::List => {
            let snapshot = session.load()?;
            if snapshot.scenarios.is_empty() {
                println!("No saved scenarios");
            }
            for s in snapshot.scenarios.iter() {
                println!(
                    "{:>3}  {:<12} {}% appr, {} cash, {}yr  HEI {}  Loan {}  HELOC {}  -> {}",
                    s.id,
                    s.label,
                    s.profile.appreciation_rate_pct,
                    format_dollars(s.profile.cash_needed),
                    s.profile.time_horizon_years,
                    format_dollars(s.hei.total_cost),
                    format_dollars(s.home_equity_loan.total_cost),
                    format_dollars(s.heloc.total_cost),
                    s.cheapest
                );
            }
            Ok(())
        }
        ScenarioAction::Remove { id } => {
            let mut snapshot = session.load()?;
            if !snapshot.scenarios.remove(id) {
                bail!("No scenario with id {}", id);
            }
            session.save(&snapshot)
        }
        ScenarioAction::Clear => {
            let mut snapshot = session.load()?;
            snapshot.scenarios.clear();
            session.save(&snapshot)
        }
    }
}

fn run_wizard(session: &Session, args: &WizardArgs) -> Result<()> {
    let mut snapshot = session.load()?;
    let wizard = &mut snapshot.wizard;

    let moved = if let Some(step) = args.step {
        wizard.go_to_step(step)
    } else if args.next {
        wizard.advance()
    } else if args.back {
        wizard.go_back()
    } else {
        true
    };
    if !moved {
        log::warn!("Wizard step unchanged at {}", wizard.current_step);
    }
    if let Some(product) = args.select {
        wizard.selected_product = Some(product);
    }
    if let Some(property_type) = args.property_type {
        wizard.property_type = Some(property_type);
    }
    if let Some(property_use) = args.property_use {
        wizard.property_use = property_use;
    }
    if let Some(employment) = args.employment {
        wizard.employment_status = Some(employment);
    }
    if let Some(income) = args.income {
        wizard.annual_income = Some(income);
    }

    println!(
        "Step {} of {}{}",
        wizard.current_step,
        WIZARD_STEPS,
        wizard
            .selected_product
            .map(|p| format!(", applying for {}", p))
            .unwrap_or_default()
    );
    session.save(&snapshot)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_snapshot(name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("heq-cli-{}-{}.json", name, std::process::id()));
        let _ = fs::remove_file(&path);
        path
    }

    fn input_of(args: &[&str]) -> InputArgs {
        let argv = ["heq", "compare"].iter().chain(args.iter()).copied();
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Compare(output) => output.input,
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_overrides_are_persisted() {
        let path = temp_snapshot("persist");
        let session = Session::new(Some(path.clone()));

        let resolved = session.resolve(&input_of(&["--cash-needed", "90000", "--heloc-cap", "12"])).unwrap();
        assert_eq!(resolved.profile.cash_needed, 90_000.0);

        // A later command without flags starts from the saved inputs
        let reloaded = session.resolve(&input_of(&[])).unwrap();
        assert_eq!(reloaded.profile.cash_needed, 90_000.0);
        assert_eq!(reloaded.terms.heloc.rate_cap_pct, 12.0);
        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_no_overrides_writes_nothing() {
        let path = temp_snapshot("untouched");
        let session = Session::new(Some(path.clone()));

        assert!(!input_of(&[]).has_overrides());
        session.resolve(&input_of(&[])).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn test_invalid_override_is_not_saved() {
        let path = temp_snapshot("invalid");
        let session = Session::new(Some(path.clone()));

        let input = input_of(&["--horizon", "0"]);
        assert!(input.has_overrides());
        assert!(session.resolve(&input).is_err());
        assert!(!path.exists());
    }
}
