//! Damped Newton iteration for two-equation systems
//!
//! The Jacobian is approximated by forward differences, so only residual
//! evaluations are needed. Steps are halved until the iterate is feasible
//! and the residual norm decreases.

use crate::error::{Result, SearchError};

/// Iteration controls for [`solve_2d`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NewtonSettings {
    /// Residual norm accepted as converged
    pub tolerance: f64,
    /// Maximum Newton steps before giving up
    pub max_iterations: usize,
    /// Relative step for the finite-difference Jacobian
    pub jacobian_step: f64,
    /// Smallest damping factor tried in the line search
    pub min_damping: f64,
}

impl Default for NewtonSettings {
    fn default() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 100,
            jacobian_step: 1e-7,
            min_damping: 1.0 / 1024.0,
        }
    }
}

/// Converged root with its diagnostics
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Root2 {
    pub x: [f64; 2],
    pub residual: f64,
    pub iterations: usize,
}

fn norm(v: [f64; 2]) -> f64 {
    v[0].hypot(v[1])
}

fn non_convergence(x: [f64; 2], residual: f64, iterations: usize) -> SearchError {
    SearchError::NonConvergence {
        residual,
        iterate: (x[0], x[1]),
        iterations,
    }
}

/// Solve `f(x) = 0` from `x0`
///
/// `feasible` bounds the region the line search may step into. Errors from
/// `f` are propagated unchanged; exhausting the iteration budget, a singular
/// Jacobian or a stalled line search yields `NonConvergence` carrying the
/// last iterate and its residual.
pub fn solve_2d<F, P>(f: F, feasible: P, x0: [f64; 2], settings: &NewtonSettings) -> Result<Root2>
where
    F: Fn([f64; 2]) -> Result<[f64; 2]>,
    P: Fn([f64; 2]) -> bool,
{
    if !feasible(x0) {
        return Err(SearchError::InvalidParameter(format!(
            "initial guess ({}, {}) is outside the feasible region",
            x0[0], x0[1]
        )));
    }

    let mut x = x0;
    let mut fx = f(x)?;
    let mut residual = norm(fx);

    for iteration in 0..settings.max_iterations {
        log::debug!(
            "newton iteration {iteration}: x = ({:.10}, {:.10}), residual = {residual:.3e}",
            x[0],
            x[1]
        );
        if residual <= settings.tolerance {
            return Ok(Root2 { x, residual, iterations: iteration });
        }

        // Forward-difference Jacobian, column by column
        let mut jac = [[0.0; 2]; 2];
        for j in 0..2 {
            let h = settings.jacobian_step * x[j].abs().max(1.0);
            let mut xh = x;
            xh[j] += h;
            let fh = f(xh)?;
            for i in 0..2 {
                jac[i][j] = (fh[i] - fx[i]) / h;
            }
        }

        let det = jac[0][0] * jac[1][1] - jac[0][1] * jac[1][0];
        if !det.is_finite() || det.abs() < 1e-300 {
            return Err(non_convergence(x, residual, iteration));
        }
        let step = [
            -(jac[1][1] * fx[0] - jac[0][1] * fx[1]) / det,
            -(jac[0][0] * fx[1] - jac[1][0] * fx[0]) / det,
        ];

        let mut damping = 1.0;
        let accepted = loop {
            let candidate = [x[0] + damping * step[0], x[1] + damping * step[1]];
            if feasible(candidate) {
                let fc = f(candidate)?;
                let rc = norm(fc);
                if rc < residual || damping <= settings.min_damping {
                    break Some((candidate, fc, rc));
                }
            }
            if damping <= settings.min_damping {
                break None;
            }
            damping *= 0.5;
        };

        match accepted {
            Some((candidate, fc, rc)) => {
                x = candidate;
                fx = fc;
                residual = rc;
            }
            None => return Err(non_convergence(x, residual, iteration)),
        }
    }

    if residual <= settings.tolerance {
        Ok(Root2 {
            x,
            residual,
            iterations: settings.max_iterations,
        })
    } else {
        Err(non_convergence(x, residual, settings.max_iterations))
    }
}
