//! Snapshot persistence
//!
//! The engine never touches storage itself. Callers load a snapshot at
//! startup, hand its profile and terms to the calculators, and save a fresh
//! snapshot after every change.

use crate::error::{EngineError, Result};
use crate::products::ProductKind;
use crate::profile::{FinancialProfile, ProductTerms};
use crate::scenario::ScenarioBook;
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Number of steps in the application wizard
pub const WIZARD_STEPS: u8 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyType {
    SingleFamily,
    Condo,
    Townhouse,
    MultiFamily,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropertyUse {
    #[default]
    Primary,
    Secondary,
    Investment,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmploymentStatus {
    Employed,
    SelfEmployed,
    Retired,
    Other,
}

impl FromStr for PropertyType {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "single_family" => Ok(PropertyType::SingleFamily),
            "condo" => Ok(PropertyType::Condo),
            "townhouse" => Ok(PropertyType::Townhouse),
            "multi_family" => Ok(PropertyType::MultiFamily),
            _ => Err(invalid_choice("property type", s)),
        }
    }
}

impl FromStr for PropertyUse {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "primary" => Ok(PropertyUse::Primary),
            "secondary" => Ok(PropertyUse::Secondary),
            "investment" => Ok(PropertyUse::Investment),
            _ => Err(invalid_choice("property use", s)),
        }
    }
}

impl FromStr for EmploymentStatus {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "employed" => Ok(EmploymentStatus::Employed),
            "self_employed" => Ok(EmploymentStatus::SelfEmployed),
            "retired" => Ok(EmploymentStatus::Retired),
            "other" => Ok(EmploymentStatus::Other),
            _ => Err(invalid_choice("employment status", s)),
        }
    }
}

fn invalid_choice(field: &'static str, value: &str) -> EngineError {
    EngineError::InvalidChoice {
        field,
        value: value.to_string(),
    }
}

/// Where the user is in the guided application flow, plus the applicant
/// details collected along the way
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WizardState {
    /// 1-based step
    pub current_step: u8,
    pub selected_product: Option<ProductKind>,
    pub property_type: Option<PropertyType>,
    pub property_use: PropertyUse,
    pub employment_status: Option<EmploymentStatus>,
    pub annual_income: Option<f64>,
}

impl Default for WizardState {
    fn default() -> Self {
        Self {
            current_step: 1,
            selected_product: None,
            property_type: None,
            property_use: PropertyUse::Primary,
            employment_status: None,
            annual_income: None,
        }
    }
}

impl WizardState {
    /// Move to `step`; out-of-range steps are ignored. Returns whether it moved.
    pub fn go_to_step(&mut self, step: u8) -> bool {
        if !(1..=WIZARD_STEPS).contains(&step) {
            return false;
        }
        self.current_step = step;
        true
    }

    pub fn advance(&mut self) -> bool {
        self.go_to_step(self.current_step.saturating_add(1))
    }

    pub fn go_back(&mut self) -> bool {
        self.go_to_step(self.current_step.saturating_sub(1))
    }
}

/// Everything persisted between sessions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Snapshot {
    pub profile: FinancialProfile,
    pub terms: ProductTerms,
    pub wizard: WizardState,
    pub scenarios: ScenarioBook,
}

/// Opaque load/save of a snapshot
pub trait SnapshotStore {
    /// `Ok(None)` when nothing has been saved yet
    fn load(&self) -> Result<Option<Snapshot>>;

    fn save(&self, snapshot: &Snapshot) -> Result<()>;

    /// Stored snapshot, or the default one
    fn load_or_default(&self) -> Result<Snapshot> {
        Ok(self.load()?.unwrap_or_default())
    }
}

/// Snapshot kept as pretty-printed JSON in one file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl SnapshotStore for JsonFileStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        if !self.path.exists() {
            log::debug!("No snapshot at {}", self.path.display());
            return Ok(None);
        }
        let raw = fs::read_to_string(&self.path)?;
        Ok(Some(serde_json::from_str(&raw)?))
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, serde_json::to_string_pretty(snapshot)?)?;
        log::debug!("Saved snapshot to {}", self.path.display());
        Ok(())
    }
}

/// In-process store holding the serialized snapshot
#[derive(Debug, Default)]
pub struct MemoryStore {
    raw: RefCell<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SnapshotStore for MemoryStore {
    fn load(&self) -> Result<Option<Snapshot>> {
        match self.raw.borrow().as_deref() {
            Some(raw) => Ok(Some(serde_json::from_str(raw)?)),
            None => Ok(None),
        }
    }

    fn save(&self, snapshot: &Snapshot) -> Result<()> {
        *self.raw.borrow_mut() = Some(serde_json::to_string(snapshot)?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wizard_ignores_out_of_range_steps() {
        let mut wizard = WizardState::default();
        assert!(!wizard.go_back());
        assert!(!wizard.go_to_step(0));
        assert!(!wizard.go_to_step(6));
        assert_eq!(wizard.current_step, 1);

        assert!(wizard.go_to_step(5));
        assert!(!wizard.advance());
        assert_eq!(wizard.current_step, 5);
    }

    #[test]
    fn test_applicant_details_round_trip() {
        let store = MemoryStore::new();
        let mut snapshot = Snapshot::default();
        snapshot.wizard.property_type = Some(PropertyType::MultiFamily);
        snapshot.wizard.property_use = PropertyUse::Investment;
        snapshot.wizard.employment_status = Some(EmploymentStatus::SelfEmployed);
        snapshot.wizard.annual_income = Some(85_000.0);

        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap().unwrap().wizard, snapshot.wizard);

        let raw = serde_json::to_value(snapshot.wizard).unwrap();
        assert_eq!(raw["property_type"], "multi_family");
        assert_eq!(raw["employment_status"], "self_employed");
    }

    #[test]
    fn test_older_wizard_state_defaults_applicant_details() {
        let wizard: WizardState = serde_json::from_str(r#"{"current_step": 2, "selected_product": "heloc"}"#).unwrap();
        assert_eq!(wizard.selected_product, Some(ProductKind::Heloc));
        assert_eq!(wizard.property_use, PropertyUse::Primary);
        assert_eq!(wizard.property_type, None);
        assert_eq!(wizard.annual_income, None);
    }

    #[test]
    fn test_parse_applicant_choices() {
        assert_eq!("single-family".parse::<PropertyType>().unwrap(), PropertyType::SingleFamily);
        assert_eq!("Investment".parse::<PropertyUse>().unwrap(), PropertyUse::Investment);
        assert_eq!("retired".parse::<EmploymentStatus>().unwrap(), EmploymentStatus::Retired);
        assert!(matches!(
            "castle".parse::<PropertyType>(),
            Err(EngineError::InvalidChoice { field: "property type", .. })
        ));
    }

    #[test]
    fn test_empty_store_loads_default() {
        let store = MemoryStore::new();
        assert_eq!(store.load().unwrap(), None);
        assert_eq!(store.load_or_default().unwrap(), Snapshot::default());
    }

    #[test]
    fn test_snapshot_reloads_verbatim() {
        let store = MemoryStore::new();
        let mut snapshot = Snapshot::default();
        snapshot.profile.cash_needed = 120_000.0;
        snapshot.terms.heloc.rate_cap_pct = 12.0;
        snapshot.wizard.selected_product = Some(ProductKind::Heloc);
        let (profile, terms) = (snapshot.profile.clone(), snapshot.terms);
        snapshot.scenarios.capture(&profile, &terms);

        store.save(&snapshot).unwrap();
        let loaded = store.load().unwrap().unwrap();
        assert_eq!(loaded.profile, snapshot.profile);
        assert_eq!(loaded.terms, snapshot.terms);
        assert_eq!(loaded.wizard, snapshot.wizard);
        assert_eq!(loaded.scenarios.len(), 1);
        let scenario = loaded.scenarios.iter().next().unwrap();
        assert_eq!(scenario.label, "Scenario 1");
        assert_eq!(scenario.profile, profile);
    }

    #[test]
    fn test_partial_snapshot_fills_defaults() {
        let raw = r#"{"profile": {"home_value": 650000}, "wizard": {"current_step": 3}}"#;
        let snapshot: Snapshot = serde_json::from_str(raw).unwrap();
        assert_eq!(snapshot.profile.home_value, 650_000.0);
        assert_eq!(snapshot.profile.cash_needed, 75_000.0);
        assert_eq!(snapshot.wizard.current_step, 3);
        assert_eq!(snapshot.terms, ProductTerms::default());
        assert!(snapshot.scenarios.is_empty());
    }

    #[test]
    fn test_file_store() {
        let path = std::env::temp_dir().join(format!("heq-snapshot-{}.json", std::process::id()));
        let store = JsonFileStore::new(&path);
        let _ = fs::remove_file(&path);

        assert_eq!(store.load().unwrap(), None);
        let mut snapshot = Snapshot::default();
        snapshot.profile.credit_score = 640;
        store.save(&snapshot).unwrap();
        assert_eq!(store.load().unwrap(), Some(snapshot));

        fs::write(&path, "not json").unwrap();
        assert!(matches!(store.load(), Err(EngineError::Json(_))));
        fs::remove_file(&path).unwrap();
    }
}
