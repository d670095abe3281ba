//! Optimal search behaviour: effort costs, benefit schedules, the steady
//! state boundary and the backward induction over weeks of unemployment

mod cost;
mod engine;
mod path;
mod policy;
mod steady_state;
mod worker;

pub use cost::{benefit_utility, wage_utility, EffortCostModel};
pub use engine::BackwardInductionEngine;
pub use path::{EffortCorner, TimePath, TimePathBuilder, WeekSolution};
pub use policy::{BenefitPolicy, PolicyId};
pub use steady_state::{SteadyState, SteadyStateSolver};
pub use worker::WorkerModel;
