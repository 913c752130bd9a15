//! Product cost calculators: HEI, fixed home equity loan and HELOC

mod result;
mod hei;
mod loan;
mod heloc;
mod providers;

pub use result::{CostResult, ProductDetail, ProductKind};
pub use hei::{calc_hei, DEFAULT_HEI_ORIGINATION_FEE_PCT, DEFAULT_HEI_RISK_ADJUST_PCT};
pub use loan::{calc_home_equity_loan, DEFAULT_LOAN_ORIGINATION_FEE_PCT, DEFAULT_LOAN_RATE_PCT};
pub use heloc::{
    calc_heloc, rate_path, DEFAULT_HELOC_DRAW_YEARS, DEFAULT_HELOC_ORIGINATION_FEE_PCT,
    DEFAULT_HELOC_RATE_CAP_PCT, DEFAULT_HELOC_RATE_INCREASE_PCT, DEFAULT_HELOC_RATE_PCT,
};
pub use providers::{rank_providers, HeiProvider, ProviderQuote, HEI_PROVIDERS};
