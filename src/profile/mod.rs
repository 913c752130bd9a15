//! Homeowner profile, product terms and profile loading

mod data;
mod terms;
pub mod loader;

pub use data::FinancialProfile;
pub use terms::{HeiTerms, HelocTerms, LoanTerms, ProductTerms};
pub use loader::{load_profiles, load_profiles_from_reader, ProfileRecord};
