//! Per-worker bundle of read-only model components

use crate::assumptions::{ModelParameters, WorkerType};
use crate::distribution::TruncatedWageDistribution;
use crate::error::Result;
use crate::numerics::QuadratureTolerance;

use super::cost::EffortCostModel;

/// A worker type with its wage distribution and cost model built
///
/// Immutable after construction; shared by reference across the policy runs
/// of the same worker type.
#[derive(Debug, Clone)]
pub struct WorkerModel {
    pub worker: WorkerType,
    pub distribution: TruncatedWageDistribution,
    pub cost: EffortCostModel,
}

impl WorkerModel {
    pub fn new(worker: &WorkerType, params: &ModelParameters, quadrature_tolerance: f64) -> Result<Self> {
        worker.validate()?;
        let distribution = TruncatedWageDistribution::with_tolerance(
            worker.mu,
            worker.sigma,
            params.w_max,
            QuadratureTolerance::with_absolute(quadrature_tolerance),
        )?;
        let cost = EffortCostModel::new(worker.k, params.gamma)?;

        Ok(Self {
            worker: worker.clone(),
            distribution,
            cost,
        })
    }

    pub fn name(&self) -> &str {
        &self.worker.name
    }
}
