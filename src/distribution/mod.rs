//! Wage-offer distributions

mod wage;

pub use wage::{TruncatedWageDistribution, DEGENERATE_MASS};
