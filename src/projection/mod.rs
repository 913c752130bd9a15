//! Comparative projections: yearly cost trajectories and sensitivity sweeps

mod yearly;
mod sensitivity;

pub use yearly::{find_breakeven_year, yearly_costs, YearlyCostPoint};
pub use sensitivity::{
    appreciation_sweep, crossover_rate, sensitivity_at, SensitivityPoint, SweepRange, MAX_SWEEP_POINTS,
    SCENARIO_RATES_PCT,
};
