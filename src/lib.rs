//! Home Equity Engine - lifetime cost comparison for home equity financing
//!
//! This library provides:
//! - Cost calculators for home equity investments (HEI), fixed home equity loans and HELOCs
//! - Rule-based qualification screening for each product
//! - Year-by-year cost trajectories and appreciation sensitivity sweeps
//! - Recommendations, saved scenarios, snapshot persistence and text reports

pub mod error;
pub mod amortization;
pub mod products;
pub mod qualification;
pub mod profile;
pub mod projection;
pub mod comparison;
pub mod scenario;
pub mod store;
pub mod report;

// Re-export commonly used types
pub use error::{EngineError, Result};
pub use products::{calc_heloc, calc_hei, calc_home_equity_loan, CostResult, ProductDetail, ProductKind};
pub use profile::{FinancialProfile, ProductTerms};
pub use qualification::{check_qualification, Qualification, QualificationResult};
pub use projection::{appreciation_sweep, find_breakeven_year, yearly_costs, SensitivityPoint, YearlyCostPoint};
pub use comparison::{cash_flow, recommend, CashFlow, Comparison, Recommendation, Verdict};
pub use scenario::ScenarioBook;
pub use store::{JsonFileStore, Snapshot, SnapshotStore};
