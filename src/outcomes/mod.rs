//! Hazard, survival and population aggregates derived from solved paths

mod aggregate;
mod hazard;
mod summary;

pub use aggregate::{
    aggregate_reemployment_wage, population_shares, CohortSeries, ZeroExitPolicy, ZeroMassPolicy,
};
pub use hazard::{expected_duration, hazard_series, survival_series, HazardSurvival};
pub use summary::{relative_change, PolicyComparison};
