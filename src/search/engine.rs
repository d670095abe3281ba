//! Backward induction over weeks of unemployment
//!
//! Starting from the steady-state reservation wage at week `T + 1`, each
//! week `t = T..=0` is solved from week `t + 1` alone:
//!
//! - effort: `e_t = clamp(c'^{-1}(β/(1-β) · EX(w_{t+1})), 0, 1)`
//! - reservation wage: `ln w_t = (1-β)(U(b_t) - c(e_t)) + β ln w_{t+1} + β e_t EX(w_{t+1})`
//! - value of unemployment: `V_t = ln w_t / (1-β)`
//! - expected reemployment wage: mean offer above `w_t`
//!
//! A single pass, no fixed-point iteration.

use crate::assumptions::ModelParameters;
use crate::error::Result;
use crate::search::EffortCorner;

use super::cost::{benefit_utility, wage_utility};
use super::path::{TimePath, TimePathBuilder, WeekSolution};
use super::policy::BenefitPolicy;
use super::steady_state::SteadyState;
use super::worker::WorkerModel;

/// Finite-horizon solver for one `(worker, policy)` pair at a time
#[derive(Debug, Clone)]
pub struct BackwardInductionEngine {
    params: ModelParameters,
    horizon: usize,
}

impl BackwardInductionEngine {
    /// Create an engine solving weeks `0..=horizon`
    pub fn new(params: ModelParameters, horizon: usize) -> Self {
        Self { params, horizon }
    }

    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Solve the full path for a worker under a benefit policy
    ///
    /// A degenerate reemployment-wage conditional is fatal for the pair and
    /// comes back tagged with its week.
    pub fn solve(&self, model: &WorkerModel, policy: &BenefitPolicy, boundary: &SteadyState) -> Result<TimePath> {
        let mut builder = TimePathBuilder::new(self.horizon, boundary.reservation_wage);

        while let Some(t) = builder.next_week() {
            let week = self.solve_week(model, policy.benefit(t), builder.continuation_wage(), t)?;
            builder.push(week)?;
        }

        let path = builder.freeze()?;
        let corners = path.corner_weeks();
        if let Some((first, corner)) = corners.first() {
            log::warn!(
                "{}: effort at a corner in {} of {} weeks (first at week {first}, {corner:?})",
                model.name(),
                corners.len(),
                path.weeks()
            );
        }
        log::debug!(
            "{}: solved {} weeks, w_0 = {:.6}, e_0 = {:.6}",
            model.name(),
            path.weeks(),
            path.reservation_wage()[0],
            path.effort()[0]
        );

        Ok(path)
    }

    /// One step of the recursion given next week's reservation wage
    fn solve_week(&self, model: &WorkerModel, benefit: f64, next_wage: f64, t: usize) -> Result<WeekSolution> {
        let beta = self.params.beta;
        let surplus = model.distribution.expected_log_surplus_above(next_wage)?;

        let unconstrained = model
            .cost
            .marginal_cost_inverse(self.params.discount_ratio() * surplus)?;
        let (effort, corner) = clamp_effort(unconstrained);

        let log_wage = (1.0 - beta) * (benefit_utility(benefit, self.params.eta) - model.cost.cost(effort))
            + beta * wage_utility(next_wage)
            + beta * model.cost.search_production(effort) * surplus;
        let reservation_wage = log_wage.exp();

        let reemployment_wage = model
            .distribution
            .expected_wage_above(reservation_wage)
            .map_err(|e| e.at_week(t))?;

        Ok(WeekSolution {
            reservation_wage,
            effort,
            value: wage_utility(reservation_wage) / (1.0 - beta),
            reemployment_wage,
            corner,
        })
    }
}

/// Clamp effort to `[0, 1]`, reporting which bound bit
fn clamp_effort(effort: f64) -> (f64, Option<EffortCorner>) {
    if effort > 1.0 {
        (1.0, Some(EffortCorner::Upper))
    } else if effort < 0.0 {
        (0.0, Some(EffortCorner::Lower))
    } else {
        (effort, None)
    }
}
