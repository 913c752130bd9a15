//! CSV loader for batches of profiles
//!
//! Expected header:
//! ProfileID,HomeValue,MortgageBalance,CashNeeded,CreditScore,DTI,TimeHorizon,Appreciation

use super::FinancialProfile;
use crate::error::Result;
use csv::Reader;
use std::path::Path;

#[derive(Debug, serde::Deserialize)]
struct CsvRow {
    #[serde(rename = "ProfileID")]
    profile_id: u32,
    #[serde(rename = "HomeValue")]
    home_value: f64,
    #[serde(rename = "MortgageBalance")]
    mortgage_balance: f64,
    #[serde(rename = "CashNeeded")]
    cash_needed: f64,
    #[serde(rename = "CreditScore")]
    credit_score: u32,
    #[serde(rename = "DTI")]
    dti_ratio: f64,
    #[serde(rename = "TimeHorizon")]
    time_horizon_years: u32,
    #[serde(rename = "Appreciation")]
    appreciation_rate_pct: f64,
}

impl CsvRow {
    fn into_record(self) -> ProfileRecord {
        ProfileRecord {
            profile_id: self.profile_id,
            profile: FinancialProfile {
                home_value: self.home_value,
                mortgage_balance: self.mortgage_balance,
                cash_needed: self.cash_needed,
                credit_score: self.credit_score,
                dti_ratio: self.dti_ratio,
                time_horizon_years: self.time_horizon_years,
                appreciation_rate_pct: self.appreciation_rate_pct,
            },
        }
    }
}

/// A profile tagged with the identifier it had in the input file
#[derive(Debug, Clone, PartialEq)]
pub struct ProfileRecord {
    pub profile_id: u32,
    pub profile: FinancialProfile,
}

/// Load all profiles from a CSV file
pub fn load_profiles<P: AsRef<Path>>(path: P) -> Result<Vec<ProfileRecord>> {
    let reader = Reader::from_path(path)?;
    read_rows(reader)
}

/// Load profiles from any reader (e.g., string buffer, stdin)
pub fn load_profiles_from_reader<R: std::io::Read>(reader: R) -> Result<Vec<ProfileRecord>> {
    read_rows(Reader::from_reader(reader))
}

fn read_rows<R: std::io::Read>(mut reader: Reader<R>) -> Result<Vec<ProfileRecord>> {
    let mut records = Vec::new();
    for result in reader.deserialize() {
        let row: CsvRow = result?;
        records.push(row.into_record());
    }
    log::debug!("Loaded {} profiles", records.len());
    Ok(records)
}
