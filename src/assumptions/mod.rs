//! Model assumptions: shared scalars, worker types and solver controls

pub mod loader;

pub use loader::{load_worker_types, load_worker_types_from_reader};

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SearchError};

/// Calibrated log-location of the high-skilled wage distribution (model scale)
pub const MU_HIGH_SKILLED: f64 = 1.716_691_284_803_24;

/// Calibrated log-scale shared by both wage distributions
pub const SIGMA_MODEL: f64 = 0.549_806_416_754_46;

/// Model-scale UI benefit for a high-skilled worker
pub const BENEFIT_HIGH_SKILLED: f64 = 3.525_115_143_269_59;

/// Low-skilled wage location and benefit relative to high-skilled
pub const LOW_SKILL_SCALE: f64 = 0.9;

/// Scalars shared by every worker type
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ModelParameters {
    /// Weekly discount factor
    pub beta: f64,

    /// Curvature of the effort cost function
    pub gamma: f64,

    /// CRRA coefficient for benefit utility
    pub eta: f64,

    /// Upper bound of the wage support
    pub w_max: f64,

    /// Social-assistance level paid once UI runs out
    pub post_benefit: f64,
}

impl Default for ModelParameters {
    fn default() -> Self {
        Self {
            beta: 0.999014,
            gamma: 1.5,
            eta: 0.5,
            w_max: 20.0,
            post_benefit: 2.0,
        }
    }
}

impl ModelParameters {
    pub fn validate(&self) -> Result<()> {
        if !(self.beta > 0.0 && self.beta < 1.0) {
            return Err(SearchError::InvalidParameter(format!("beta must lie in (0, 1), got {}", self.beta)));
        }
        if !(self.gamma > 0.0) {
            return Err(SearchError::InvalidParameter(format!("gamma must be positive, got {}", self.gamma)));
        }
        if !self.eta.is_finite() || (self.eta - 1.0).abs() < 1e-12 {
            return Err(SearchError::InvalidParameter(format!("eta must be finite and differ from 1, got {}", self.eta)));
        }
        if !(self.w_max > 0.0) {
            return Err(SearchError::InvalidParameter(format!("w_max must be positive, got {}", self.w_max)));
        }
        if !(self.post_benefit > 0.0) {
            return Err(SearchError::InvalidParameter(format!(
                "post_benefit must be positive, got {}",
                self.post_benefit
            )));
        }
        Ok(())
    }

    /// `beta / (1 - beta)`, the weight on the continuation surplus
    pub fn discount_ratio(&self) -> f64 {
        self.beta / (1.0 - self.beta)
    }
}

/// One class of unemployed worker
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerType {
    /// Label used in output files
    pub name: String,

    /// Scale of the effort cost
    pub k: f64,

    /// Log-location of the wage-offer distribution
    pub mu: f64,

    /// Log-scale of the wage-offer distribution
    pub sigma: f64,

    /// UI benefit paid before the cutoff
    pub benefit_level: f64,

    /// Constant benefit that anchors the steady state
    pub b_floor: f64,

    /// Share of new entrants into unemployment
    pub entry_share: f64,
}

impl WorkerType {
    pub fn high_skilled() -> Self {
        Self {
            name: "high".to_string(),
            k: 4.0,
            mu: MU_HIGH_SKILLED,
            sigma: SIGMA_MODEL,
            benefit_level: BENEFIT_HIGH_SKILLED,
            b_floor: 2.0,
            entry_share: 0.5,
        }
    }

    pub fn low_skilled() -> Self {
        Self {
            name: "low".to_string(),
            k: 8.0,
            mu: LOW_SKILL_SCALE * MU_HIGH_SKILLED,
            sigma: SIGMA_MODEL,
            benefit_level: LOW_SKILL_SCALE * BENEFIT_HIGH_SKILLED,
            b_floor: 2.0,
            entry_share: 0.5,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if !(self.k > 0.0) {
            return Err(SearchError::InvalidParameter(format!("{}: k must be positive", self.name)));
        }
        if !(self.sigma > 0.0) || !self.mu.is_finite() {
            return Err(SearchError::InvalidParameter(format!(
                "{}: wage distribution needs finite mu and positive sigma",
                self.name
            )));
        }
        if !(self.benefit_level > 0.0) || !(self.b_floor > 0.0) {
            return Err(SearchError::InvalidParameter(format!("{}: benefits must be positive", self.name)));
        }
        if !(0.0..=1.0).contains(&self.entry_share) {
            return Err(SearchError::InvalidParameter(format!(
                "{}: entry share {} outside [0, 1]",
                self.name, self.entry_share
            )));
        }
        Ok(())
    }
}

/// Numerical controls for the solver and the horizon
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverSettings {
    /// Starting point `(w0, e0)` for the steady-state root solve
    pub initial_guess: (f64, f64),

    /// Residual norm the steady state must reach
    pub tolerance: f64,

    /// Newton iteration cap
    pub max_iterations: usize,

    /// Absolute tolerance of the expectation integrals
    pub quadrature_tolerance: f64,

    /// Number of weeks `T`; paths cover `0..=T` plus the boundary `T + 1`
    pub horizon: usize,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            initial_guess: (7.0, 0.5),
            tolerance: 1e-8,
            max_iterations: 100,
            quadrature_tolerance: 1.49e-8,
            horizon: 200,
        }
    }
}

/// Container for everything a scenario run needs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Assumptions {
    pub parameters: ModelParameters,
    pub worker_types: Vec<WorkerType>,
    pub solver: SolverSettings,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self::default_calibration()
    }
}

impl Assumptions {
    /// High- and low-skilled workers calibrated to Danish income and UI data
    pub fn default_calibration() -> Self {
        Self {
            parameters: ModelParameters::default(),
            worker_types: vec![WorkerType::high_skilled(), WorkerType::low_skilled()],
            solver: SolverSettings::default(),
        }
    }

    /// Default parameters with worker types read from a CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let assumptions = Self {
            worker_types: load_worker_types(path)?,
            ..Self::default_calibration()
        };
        assumptions.validate()?;
        Ok(assumptions)
    }

    pub fn validate(&self) -> Result<()> {
        self.parameters.validate()?;
        if self.worker_types.is_empty() {
            return Err(SearchError::InvalidParameter("at least one worker type is required".into()));
        }
        for worker in &self.worker_types {
            worker.validate()?;
        }
        let total_share: f64 = self.worker_types.iter().map(|w| w.entry_share).sum();
        if (total_share - 1.0).abs() > 1e-9 {
            return Err(SearchError::InvalidParameter(format!(
                "entry shares must sum to 1, got {total_share}"
            )));
        }
        if self.solver.horizon == 0 {
            return Err(SearchError::InvalidParameter("horizon must be at least one week".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_calibration_is_valid() {
        let assumptions = Assumptions::default_calibration();
        assert!(assumptions.validate().is_ok());
        assert_eq!(assumptions.worker_types.len(), 2);

        let high = &assumptions.worker_types[0];
        let low = &assumptions.worker_types[1];
        assert!(high.mu > low.mu);
        assert!(high.k < low.k);
        assert!(high.benefit_level > low.benefit_level);
        assert!((low.mu - 0.9 * high.mu).abs() < 1e-12);
    }

    #[test]
    fn test_parameter_validation() {
        let bad_beta = ModelParameters { beta: 1.0, ..Default::default() };
        assert!(bad_beta.validate().is_err());

        let log_eta = ModelParameters { eta: 1.0, ..Default::default() };
        assert!(log_eta.validate().is_err());

        let params = ModelParameters::default();
        assert!((params.discount_ratio() - 0.999014 / 0.000986).abs() < 1e-6);
    }

    #[test]
    fn test_entry_shares_must_sum_to_one() {
        let mut assumptions = Assumptions::default_calibration();
        assumptions.worker_types[0].entry_share = 0.7;
        assert!(assumptions.validate().is_err());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let json = r#"{ "solver": { "horizon": 120 } }"#;
        let assumptions: Assumptions = serde_json::from_str(json).unwrap();
        assert_eq!(assumptions.solver.horizon, 120);
        assert_eq!(assumptions.solver.initial_guess, (7.0, 0.5));
        assert_eq!(assumptions.parameters, ModelParameters::default());
        assert_eq!(assumptions.worker_types.len(), 2);
    }
}
