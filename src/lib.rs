//! Job Search - finite-horizon McCall search model with endogenous effort
//!
//! This library provides:
//! - Truncated log-normal wage offers and their conditional expectations
//! - Steady-state reservation wage and search effort under a constant benefit
//! - Backward induction over weeks of unemployment for stepped UI schedules
//! - Hazard, survival, population composition and aggregate reemployment wages
//! - Parallel scenario runs comparing 104-week and 52-week UI policies

pub mod error;
pub mod numerics;
pub mod distribution;
pub mod assumptions;
pub mod search;
pub mod outcomes;
pub mod scenario;

// Re-export commonly used types
pub use error::{Result, SearchError};
pub use assumptions::{Assumptions, ModelParameters, SolverSettings, WorkerType};
pub use distribution::TruncatedWageDistribution;
pub use search::{BackwardInductionEngine, BenefitPolicy, PolicyId, SteadyState, SteadyStateSolver, TimePath};
pub use outcomes::{HazardSurvival, PolicyComparison, ZeroExitPolicy, ZeroMassPolicy};
pub use scenario::{ScenarioConfig, ScenarioResult, ScenarioRunner};
