//! HEI provider catalog and per-provider quotes

use super::hei::calc_hei;
use crate::profile::FinancialProfile;
use serde::{Deserialize, Serialize};

/// Published terms of one HEI provider
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HeiProvider {
    pub name: &'static str,
    pub origination_fee_pct: f64,
    pub risk_adjust_pct: f64,
    /// Settlement term; shorter horizons settle early
    pub max_term_years: u32,
    pub min_credit_score: u32,
    pub max_funding: f64,
    pub coverage: &'static str,
    pub url: &'static str,
}

pub const HEI_PROVIDERS: [HeiProvider; 5] = [
    HeiProvider {
        name: "Hometap",
        origination_fee_pct: 3.5,
        risk_adjust_pct: 85.0,
        max_term_years: 10,
        min_credit_score: 600,
        max_funding: 600_000.0,
        coverage: "16 states + DC",
        url: "https://www.hometap.com/",
    },
    HeiProvider {
        name: "Point",
        origination_fee_pct: 3.9,
        risk_adjust_pct: 80.0,
        max_term_years: 30,
        min_credit_score: 500,
        max_funding: 600_000.0,
        coverage: "Nationwide (select markets)",
        url: "https://point.com/hei",
    },
    HeiProvider {
        name: "Unlock",
        origination_fee_pct: 3.0,
        risk_adjust_pct: 82.0,
        max_term_years: 10,
        min_credit_score: 500,
        max_funding: 500_000.0,
        coverage: "Nationwide (select markets)",
        url: "https://www.unlock.com/",
    },
    HeiProvider {
        name: "Splitero",
        origination_fee_pct: 4.0,
        risk_adjust_pct: 88.0,
        max_term_years: 30,
        min_credit_score: 500,
        max_funding: 500_000.0,
        coverage: "Select states",
        url: "https://www.splitero.com/",
    },
    HeiProvider {
        name: "Aspire",
        origination_fee_pct: 3.5,
        risk_adjust_pct: 83.0,
        max_term_years: 15,
        min_credit_score: 660,
        max_funding: 250_000.0,
        coverage: "12 states + DC",
        url: "https://www.aspirehei.com/",
    },
];

/// One provider's HEI priced against a profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderQuote {
    pub name: String,
    pub origination_fee_pct: f64,
    pub risk_adjust_pct: f64,
    pub term_years: u32,
    pub adjusted_value: f64,
    pub equity_share_pct: f64,
    pub investor_payout: f64,
    pub origination_cost: f64,
    pub total_cost: f64,
    pub effective_rate_pct: f64,
    pub future_home_value: f64,
    /// Credit score and requested cash fall within the provider's limits
    pub eligible: bool,
}

impl HeiProvider {
    pub fn quote(&self, profile: &FinancialProfile) -> ProviderQuote {
        let term_years = profile.time_horizon_years.min(self.max_term_years);
        let result = calc_hei(
            profile.home_value,
            profile.cash_needed,
            profile.appreciation_rate_pct,
            term_years,
            self.risk_adjust_pct,
            self.origination_fee_pct,
        );

        ProviderQuote {
            name: self.name.to_string(),
            origination_fee_pct: self.origination_fee_pct,
            risk_adjust_pct: self.risk_adjust_pct,
            term_years,
            adjusted_value: profile.home_value * self.risk_adjust_pct / 100.0,
            equity_share_pct: result.equity_share_pct().unwrap_or(0.0),
            investor_payout: result.total_interest_or_payout,
            origination_cost: result.origination_cost,
            total_cost: result.total_cost,
            effective_rate_pct: result.effective_rate_pct,
            future_home_value: result.future_home_value().unwrap_or(0.0),
            eligible: profile.credit_score >= self.min_credit_score && profile.cash_needed <= self.max_funding,
        }
    }
}

/// Quote every catalog provider, cheapest first
pub fn rank_providers(profile: &FinancialProfile) -> Vec<ProviderQuote> {
    let mut quotes: Vec<ProviderQuote> = HEI_PROVIDERS.iter().map(|p| p.quote(profile)).collect();
    quotes.sort_by(|a, b| a.total_cost.total_cmp(&b.total_cost));
    quotes
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ranking_is_sorted_by_cost() {
        let quotes = rank_providers(&FinancialProfile::default());
        assert_eq!(quotes.len(), HEI_PROVIDERS.len());
        for pair in quotes.windows(2) {
            assert!(pair[0].total_cost <= pair[1].total_cost);
        }
    }

    #[test]
    fn test_term_capped_by_provider() {
        let profile = FinancialProfile {
            time_horizon_years: 20,
            ..FinancialProfile::default()
        };
        let quotes = rank_providers(&profile);
        let term_of = |name: &str| quotes.iter().find(|q| q.name == name).unwrap().term_years;

        assert_eq!(term_of("Hometap"), 10);
        assert_eq!(term_of("Aspire"), 15);
        assert_eq!(term_of("Point"), 20);
    }

    #[test]
    fn test_eligibility_limits() {
        let profile = FinancialProfile {
            credit_score: 620,
            cash_needed: 300_000.0,
            ..FinancialProfile::default()
        };
        let quotes = rank_providers(&profile);
        let eligible = |name: &str| quotes.iter().find(|q| q.name == name).unwrap().eligible;

        assert!(eligible("Hometap"));
        assert!(eligible("Point"));
        // Aspire needs 660+ and funds at most $250K
        assert!(!eligible("Aspire"));
    }
}
