//! Infinite-horizon steady state under a constant benefit
//!
//! Solves jointly for the reservation wage `w` and effort `e`:
//!
//! 1. `e = c'^{-1}( β/(1-β) · EX(w) )`
//! 2. `ln w = U(b) - c(e) + β/(1-β) · e · EX(w)`
//!
//! where `EX(w)` is the expected log-surplus of an offer above `w`.
//! Equation 2 is the stationary point of the weekly recursion
//! `ln w_t = (1-β)(U(b) - c(e)) + β ln w_{t+1} + β e EX(w_{t+1})`, so a
//! recursion started from this boundary reproduces it exactly under `b`.

use serde::{Deserialize, Serialize};

use crate::assumptions::{ModelParameters, SolverSettings};
use crate::error::Result;
use crate::numerics::{solve_2d, NewtonSettings};

use super::cost::{benefit_utility, wage_utility};
use super::worker::WorkerModel;

/// Solved boundary condition for one worker type and benefit level
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SteadyState {
    pub reservation_wage: f64,
    pub effort: f64,
    /// Constant benefit the state was solved for
    pub benefit: f64,
    /// Residual norm at the returned point
    pub residual: f64,
    pub iterations: usize,
}

/// Root solver for [`SteadyState`]
#[derive(Debug, Clone)]
pub struct SteadyStateSolver {
    params: ModelParameters,
    initial_guess: (f64, f64),
    newton: NewtonSettings,
}

impl SteadyStateSolver {
    pub fn new(params: ModelParameters, settings: &SolverSettings) -> Self {
        Self {
            params,
            initial_guess: settings.initial_guess,
            newton: NewtonSettings {
                tolerance: settings.tolerance,
                max_iterations: settings.max_iterations,
                ..Default::default()
            },
        }
    }

    /// Replace the starting point of the root solve
    pub fn with_initial_guess(mut self, w0: f64, e0: f64) -> Self {
        self.initial_guess = (w0, e0);
        self
    }

    /// Residuals of the two steady-state equations at `(w, e)`
    pub fn residuals(&self, model: &WorkerModel, benefit: f64, w: f64, e: f64) -> Result<[f64; 2]> {
        let ratio = self.params.discount_ratio();
        let surplus = model.distribution.expected_log_surplus_above(w)?;

        let effort_condition = e - model.cost.marginal_cost_inverse(ratio * surplus)?;
        let value_matching = wage_utility(w)
            - (benefit_utility(benefit, self.params.eta) - model.cost.cost(e))
            - ratio * model.cost.search_production(e) * surplus;

        Ok([effort_condition, value_matching])
    }

    /// Solve for the steady state at a constant `benefit`
    ///
    /// Fails with `NonConvergence` when the residual is still above the
    /// tolerance after the iteration cap.
    pub fn solve(&self, model: &WorkerModel, benefit: f64) -> Result<SteadyState> {
        let (w0, e0) = self.initial_guess;
        let root = solve_2d(
            |x| self.residuals(model, benefit, x[0], x[1]),
            |x| x[0] > 0.0 && x[1] >= 0.0 && x[0].is_finite() && x[1].is_finite(),
            [w0, e0],
            &self.newton,
        )?;

        log::info!(
            "steady state for {} at b = {benefit}: w = {:.6}, e = {:.6} (residual {:.2e}, {} iterations)",
            model.name(),
            root.x[0],
            root.x[1],
            root.residual,
            root.iterations
        );

        Ok(SteadyState {
            reservation_wage: root.x[0],
            effort: root.x[1],
            benefit,
            residual: root.residual,
            iterations: root.iterations,
        })
    }

    /// Steady state at the worker's own benefit floor
    pub fn solve_floor(&self, model: &WorkerModel) -> Result<SteadyState> {
        self.solve(model, model.worker.b_floor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::WorkerType;
    use crate::error::SearchError;

    fn reference_worker() -> WorkerType {
        WorkerType {
            name: "reference".into(),
            k: 4.0,
            mu: 1.0,
            sigma: 0.5,
            benefit_level: 3.0,
            b_floor: 2.0,
            entry_share: 1.0,
        }
    }

    fn model(worker: &WorkerType) -> (WorkerModel, SteadyStateSolver) {
        let params = ModelParameters::default();
        let settings = SolverSettings::default();
        let model = WorkerModel::new(worker, &params, settings.quadrature_tolerance).unwrap();
        (model, SteadyStateSolver::new(params, &settings))
    }

    #[test]
    fn test_reference_steady_state_converges() {
        let (model, solver) = model(&reference_worker());
        let ss = solver.solve(&model, 2.0).unwrap();

        assert!(ss.residual < 1e-6);
        assert!(ss.reservation_wage > 2.0);
        assert!(ss.effort > 0.0 && ss.effort < 1.0);
        // Independently computed reference point
        assert!((ss.reservation_wage - 8.0196).abs() < 1e-3, "w_ss = {}", ss.reservation_wage);
        assert!((ss.effort - 0.7712).abs() < 1e-3, "e_ss = {}", ss.effort);
    }

    #[test]
    fn test_residuals_vanish_at_solution() {
        let (model, solver) = model(&reference_worker());
        let ss = solver.solve_floor(&model).unwrap();
        let r = solver.residuals(&model, 2.0, ss.reservation_wage, ss.effort).unwrap();
        assert!(r[0].abs() < 1e-6 && r[1].abs() < 1e-6);
    }

    #[test]
    fn test_higher_benefit_raises_reservation_wage() {
        let (model, solver) = model(&reference_worker());
        let low = solver.solve(&model, 2.0).unwrap();
        let high = solver.solve(&model, 3.0).unwrap();
        assert!(high.reservation_wage > low.reservation_wage);
        assert!(high.effort < low.effort);
    }

    #[test]
    fn test_iteration_cap_reports_non_convergence() {
        let worker = reference_worker();
        let params = ModelParameters::default();
        let settings = SolverSettings {
            max_iterations: 1,
            tolerance: 1e-14,
            ..Default::default()
        };
        let model = WorkerModel::new(&worker, &params, settings.quadrature_tolerance).unwrap();
        let solver = SteadyStateSolver::new(params, &settings);

        match solver.solve(&model, 2.0).unwrap_err() {
            SearchError::NonConvergence { residual, iterations, .. } => {
                assert!(residual > 1e-14);
                assert_eq!(iterations, 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_infeasible_initial_guess() {
        let (model, solver) = model(&reference_worker());
        let solver = solver.with_initial_guess(-1.0, 0.5);
        assert!(solver.solve(&model, 2.0).is_err());
    }
}
