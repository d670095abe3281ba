//! Scenario runner for the full set of worker types and UI policies
//!
//! Builds the per-worker models once, solves each worker's steady state,
//! then runs every `(worker type, policy)` pair in parallel. Pairs share
//! nothing mutable, so results come back in the fixed list order regardless
//! of scheduling.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::assumptions::Assumptions;
use crate::error::{Result, SearchError};
use crate::outcomes::{
    aggregate_reemployment_wage, population_shares, CohortSeries, HazardSurvival, PolicyComparison,
    ZeroExitPolicy, ZeroMassPolicy,
};
use crate::search::{
    BackwardInductionEngine, BenefitPolicy, PolicyId, SteadyState, SteadyStateSolver, TimePath, WorkerModel,
};

/// Everything a run reads from a JSON config file
///
/// Every field is optional; missing ones fall back to the default calibration
/// and to propagating degenerate aggregates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScenarioConfig {
    #[serde(flatten)]
    pub assumptions: Assumptions,
    pub zero_mass: ZeroMassPolicy,
    pub zero_exit: ZeroExitPolicy,
}

impl ScenarioConfig {
    pub fn from_json_path(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| SearchError::Load(format!("{}: {e}", path.display())))?;
        let config: ScenarioConfig = serde_json::from_str(&text)?;
        config.assumptions.validate()?;
        Ok(config)
    }
}

/// Solved path and outcomes for one `(worker type, policy)` pair
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PairResult {
    pub worker: String,
    pub entry_share: f64,
    pub policy: PolicyId,
    pub benefit_policy: BenefitPolicy,
    pub steady_state: SteadyState,
    pub path: TimePath,
    pub outcomes: HazardSurvival,
    pub expected_duration: f64,
}

impl PairResult {
    fn cohort(&self) -> CohortSeries {
        CohortSeries {
            name: self.worker.clone(),
            entry_share: self.entry_share,
            hazard: self.outcomes.hazard.clone(),
            survival: self.outcomes.survival.clone(),
            reemployment_wage: self.path.reemployment_wage().to_vec(),
        }
    }
}

/// Population-level series for one policy
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PolicyAggregate {
    pub policy: PolicyId,
    /// Worker names, in the order of `shares`
    pub workers: Vec<String>,
    /// One share series of length `T + 2` per worker
    pub shares: Vec<Vec<f64>>,
    /// Length `T + 1`
    pub aggregate_wage: Vec<f64>,
}

/// Output of a complete run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScenarioResult {
    pub horizon: usize,
    /// Worker-major, policies in [`PolicyId::ALL`] order
    pub pairs: Vec<PairResult>,
    pub policies: Vec<PolicyAggregate>,
    pub comparisons: Vec<PolicyComparison>,
}

impl ScenarioResult {
    pub fn pair(&self, worker: &str, policy: PolicyId) -> Option<&PairResult> {
        self.pairs.iter().find(|p| p.worker == worker && p.policy == policy)
    }

    pub fn policy(&self, policy: PolicyId) -> Option<&PolicyAggregate> {
        self.policies.iter().find(|p| p.policy == policy)
    }
}

/// Pre-loaded scenario runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::from_csv_path(Path::new("workers.csv"))?
///     .with_zero_exit_policy(ZeroExitPolicy::CarryForward);
/// let result = runner.run()?;
/// for cmp in &result.comparisons {
///     println!("{}: {:+.1}%", cmp.worker, 100.0 * cmp.relative_change);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    assumptions: Assumptions,
    zero_mass: ZeroMassPolicy,
    zero_exit: ZeroExitPolicy,
}

impl ScenarioRunner {
    /// Runner over the default two-type calibration
    pub fn new() -> Self {
        Self::with_assumptions(Assumptions::default_calibration())
    }

    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            assumptions,
            zero_mass: ZeroMassPolicy::default(),
            zero_exit: ZeroExitPolicy::default(),
        }
    }

    pub fn with_config(config: ScenarioConfig) -> Self {
        Self {
            assumptions: config.assumptions,
            zero_mass: config.zero_mass,
            zero_exit: config.zero_exit,
        }
    }

    /// Default parameters with worker types from a CSV file
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        Ok(Self::with_assumptions(Assumptions::from_csv_path(path)?))
    }

    pub fn from_json_path(path: &Path) -> Result<Self> {
        Ok(Self::with_config(ScenarioConfig::from_json_path(path)?))
    }

    pub fn with_zero_mass_policy(mut self, policy: ZeroMassPolicy) -> Self {
        self.zero_mass = policy;
        self
    }

    pub fn with_zero_exit_policy(mut self, policy: ZeroExitPolicy) -> Self {
        self.zero_exit = policy;
        self
    }

    pub fn assumptions(&self) -> &Assumptions {
        &self.assumptions
    }

    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.assumptions
    }

    /// Solve every `(worker type, policy)` pair
    ///
    /// The outer error covers invalid assumptions. Each pair carries its own
    /// result, so a worker whose steady state fails does not hide the others.
    pub fn solve_pairs(&self) -> Result<Vec<Result<PairResult>>> {
        self.assumptions.validate()?;
        let params = self.assumptions.parameters;
        let settings = self.assumptions.solver;

        let models = self
            .assumptions
            .worker_types
            .iter()
            .map(|worker| WorkerModel::new(worker, &params, settings.quadrature_tolerance))
            .collect::<Result<Vec<_>>>()?;

        // The boundary depends on the worker only, not on the policy
        let solver = SteadyStateSolver::new(params, &settings);
        let steady_states: Vec<Result<SteadyState>> =
            models.par_iter().map(|model| solver.solve_floor(model)).collect();

        let engine = BackwardInductionEngine::new(params, settings.horizon);
        let tasks: Vec<(usize, PolicyId)> = (0..models.len())
            .flat_map(|i| PolicyId::ALL.into_iter().map(move |id| (i, id)))
            .collect();

        Ok(tasks
            .par_iter()
            .map(|&(i, id)| {
                let steady_state = steady_states[i].clone()?;
                self.solve_pair(&engine, &models[i], id, &steady_state)
            })
            .collect())
    }

    fn solve_pair(
        &self,
        engine: &BackwardInductionEngine,
        model: &WorkerModel,
        id: PolicyId,
        steady_state: &SteadyState,
    ) -> Result<PairResult> {
        let benefit_policy = id.policy_for(&model.worker, &self.assumptions.parameters);
        let path = engine.solve(model, &benefit_policy, steady_state)?;
        let outcomes = HazardSurvival::from_path(&path, &model.distribution);
        let expected_duration = outcomes.expected_duration();

        log::info!("{} under {id}: expected duration {expected_duration:.2} weeks", model.name());

        Ok(PairResult {
            worker: model.name().to_string(),
            entry_share: model.worker.entry_share,
            policy: id,
            benefit_policy,
            steady_state: *steady_state,
            path,
            outcomes,
            expected_duration,
        })
    }

    /// Solve all pairs, then aggregate per policy and compare durations
    ///
    /// Fails with the first pair error in list order.
    pub fn run(&self) -> Result<ScenarioResult> {
        let pairs = self.solve_pairs()?.into_iter().collect::<Result<Vec<_>>>()?;

        let policies = PolicyId::ALL
            .iter()
            .map(|&id| self.aggregate_policy(id, &pairs))
            .collect::<Result<Vec<_>>>()?;

        // Pairs are worker-major with the baseline first in each chunk
        let comparisons = pairs
            .chunks_exact(PolicyId::ALL.len())
            .map(|chunk| {
                PolicyComparison::new(
                    chunk[0].worker.clone(),
                    chunk[0].expected_duration,
                    chunk[1].expected_duration,
                )
            })
            .collect();

        Ok(ScenarioResult {
            horizon: self.assumptions.solver.horizon,
            pairs,
            policies,
            comparisons,
        })
    }

    fn aggregate_policy(&self, id: PolicyId, pairs: &[PairResult]) -> Result<PolicyAggregate> {
        let cohorts: Vec<CohortSeries> = pairs
            .iter()
            .filter(|p| p.policy == id)
            .map(PairResult::cohort)
            .collect();

        let shares = population_shares(&cohorts, self.zero_mass)?;
        let aggregate_wage = aggregate_reemployment_wage(&cohorts, self.zero_exit)?;
        log::info!("aggregated {} worker types under {id}", cohorts.len());

        Ok(PolicyAggregate {
            policy: id,
            workers: cohorts.into_iter().map(|c| c.name).collect(),
            shares,
            aggregate_wage,
        })
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
