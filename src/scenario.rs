//! Saved scenarios for side-by-side what-if comparisons
//!
//! A scenario freezes the inputs and headline results of one comparison so
//! the user can change sliders and come back to it later.

use crate::comparison::Comparison;
use crate::products::{CostResult, ProductKind};
use crate::profile::{FinancialProfile, ProductTerms};
use serde::{Deserialize, Serialize};

/// Headline figures for one product in a scenario
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioCost {
    pub total_cost: f64,
    pub effective_rate_pct: f64,
    pub monthly_payment: f64,
}

impl From<&CostResult> for ScenarioCost {
    fn from(result: &CostResult) -> Self {
        Self {
            total_cost: result.total_cost,
            effective_rate_pct: result.effective_rate_pct,
            monthly_payment: result.monthly_payment,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: u64,
    pub label: String,
    pub profile: FinancialProfile,
    pub terms: ProductTerms,
    pub hei: ScenarioCost,
    pub home_equity_loan: ScenarioCost,
    pub heloc: ScenarioCost,
    /// Cheapest product regardless of eligibility
    pub cheapest: ProductKind,
}

/// Ordered collection of captured scenarios
///
/// # Example
/// ```ignore
/// let mut book = ScenarioBook::new();
/// let id = book.capture(&profile, &terms).id;
/// profile.appreciation_rate_pct = 6.0;
/// book.capture(&profile, &terms);
/// let restored = book.get(id).unwrap().profile.clone();
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioBook {
    scenarios: Vec<Scenario>,
    next_id: u64,
}

impl ScenarioBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Run a comparison for the inputs and store it as the next scenario
    pub fn capture(&mut self, profile: &FinancialProfile, terms: &ProductTerms) -> &Scenario {
        let comparison = Comparison::run(profile, terms);
        self.next_id += 1;

        let scenario = Scenario {
            id: self.next_id,
            label: format!("Scenario {}", self.scenarios.len() + 1),
            profile: profile.clone(),
            terms: *terms,
            hei: (&comparison.hei).into(),
            home_equity_loan: (&comparison.home_equity_loan).into(),
            heloc: (&comparison.heloc).into(),
            cheapest: comparison.cheapest(),
        };
        log::info!("Captured {} (cheapest: {})", scenario.label, scenario.cheapest);

        self.scenarios.push(scenario);
        &self.scenarios[self.scenarios.len() - 1]
    }

    /// Remove a scenario; returns false if the id was unknown
    pub fn remove(&mut self, id: u64) -> bool {
        let before = self.scenarios.len();
        self.scenarios.retain(|s| s.id != id);
        self.scenarios.len() != before
    }

    pub fn get(&self, id: u64) -> Option<&Scenario> {
        self.scenarios.iter().find(|s| s.id == id)
    }

    pub fn clear(&mut self) {
        self.scenarios.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = &Scenario> {
        self.scenarios.iter()
    }

    pub fn len(&self) -> usize {
        self.scenarios.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scenarios.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_records_inputs_and_results() {
        let mut book = ScenarioBook::new();
        let profile = FinancialProfile::default();
        let terms = ProductTerms::default();

        let scenario = book.capture(&profile, &terms).clone();
        assert_eq!(scenario.label, "Scenario 1");
        assert_eq!(scenario.profile, profile);
        assert_eq!(scenario.hei.monthly_payment, 0.0);
        assert_eq!(scenario.cheapest, ProductKind::Heloc);
        assert_eq!(book.len(), 1);
    }

    #[test]
    fn test_ids_stay_unique_after_removal() {
        let mut book = ScenarioBook::new();
        let profile = FinancialProfile::default();
        let terms = ProductTerms::default();

        let first = book.capture(&profile, &terms).id;
        let second = book.capture(&profile, &terms).id;
        assert!(book.remove(first));
        assert!(!book.remove(first));

        let third = book.capture(&profile, &terms);
        assert_ne!(third.id, second);
        assert_eq!(third.label, "Scenario 2");
        assert!(book.get(first).is_none());
        assert!(book.get(second).is_some());
    }

    #[test]
    fn test_scenarios_track_changing_inputs() {
        let mut book = ScenarioBook::new();
        let terms = ProductTerms::default();
        let mut profile = FinancialProfile::default();

        book.capture(&profile, &terms);
        profile.appreciation_rate_pct = 8.0;
        book.capture(&profile, &terms);

        let costs: Vec<f64> = book.iter().map(|s| s.hei.total_cost).collect();
        assert!(costs[1] > costs[0]);

        book.clear();
        assert!(book.is_empty());
    }
}
