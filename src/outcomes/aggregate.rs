//! Population composition and the aggregate reemployment wage
//!
//! Population shares compare survival rates directly, `S_i(t) / Σ_j S_j(t)`.
//! Exits in week `t` enter the aggregate wage with weight `p_i h_i(t) S_i(t)`,
//! where `p_i` is the entry share.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// What to do when no one of any type is left unemployed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroMassPolicy {
    /// Fail with `DegenerateConditional`
    #[default]
    Propagate,
    /// Fall back to equal shares across types
    EvenSplit,
}

/// What to do in a week where no one of any type exits
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ZeroExitPolicy {
    /// Fail with `DegenerateConditional`
    #[default]
    Propagate,
    /// Repeat the previous week's aggregate; fails if week 0 has no exits
    CarryForward,
    /// Record NaN for the week
    Nan,
}

/// Hazard, survival and reemployment wage of one worker type under a policy
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CohortSeries {
    pub name: String,
    pub entry_share: f64,
    /// Length `T + 1`
    pub hazard: Vec<f64>,
    /// Length `T + 2`
    pub survival: Vec<f64>,
    /// Length `T + 1`
    pub reemployment_wage: Vec<f64>,
}

fn check_lengths(cohorts: &[CohortSeries]) -> Result<usize> {
    let first = cohorts
        .first()
        .ok_or_else(|| SearchError::InvalidParameter("no cohorts to aggregate".into()))?;
    let weeks = first.hazard.len();

    for cohort in cohorts {
        if cohort.hazard.len() != weeks
            || cohort.reemployment_wage.len() != weeks
            || cohort.survival.len() != weeks + 1
        {
            return Err(SearchError::InvalidParameter(format!(
                "cohort {} does not share the common horizon",
                cohort.name
            )));
        }
    }
    Ok(weeks)
}

/// Share of each type in the combined survival, per week `0..=T+1`
///
/// Entry shares do not enter here. Returns one series per cohort, in input
/// order.
pub fn population_shares(cohorts: &[CohortSeries], on_zero: ZeroMassPolicy) -> Result<Vec<Vec<f64>>> {
    let weeks = check_lengths(cohorts)?;
    let mut shares = vec![Vec::with_capacity(weeks + 1); cohorts.len()];

    for t in 0..=weeks {
        let total: f64 = cohorts.iter().map(|c| c.survival[t]).sum();

        if total > 0.0 {
            for (series, cohort) in shares.iter_mut().zip(cohorts) {
                series.push(cohort.survival[t] / total);
            }
        } else {
            match on_zero {
                ZeroMassPolicy::Propagate => {
                    return Err(SearchError::DegenerateConditional {
                        quantity: "population share",
                        week: Some(t),
                    });
                }
                ZeroMassPolicy::EvenSplit => {
                    log::warn!("no unemployed left at week {t}, splitting shares evenly");
                    let even = 1.0 / cohorts.len() as f64;
                    for series in shares.iter_mut() {
                        series.push(even);
                    }
                }
            }
        }
    }

    Ok(shares)
}

/// Exit-weighted mean reemployment wage across types, per week `0..=T`
pub fn aggregate_reemployment_wage(cohorts: &[CohortSeries], on_zero: ZeroExitPolicy) -> Result<Vec<f64>> {
    let weeks = check_lengths(cohorts)?;
    let mut aggregate: Vec<f64> = Vec::with_capacity(weeks);

    for t in 0..weeks {
        let (weighted, normalizer) = cohorts.iter().fold((0.0, 0.0), |(num, den), c| {
            let weight = c.hazard[t] * c.survival[t] * c.entry_share;
            (num + weight * c.reemployment_wage[t], den + weight)
        });

        if normalizer > 0.0 {
            aggregate.push(weighted / normalizer);
            continue;
        }

        let degenerate = SearchError::DegenerateConditional {
            quantity: "aggregate reemployment wage",
            week: Some(t),
        };
        match on_zero {
            ZeroExitPolicy::Propagate => return Err(degenerate),
            ZeroExitPolicy::CarryForward => {
                let previous = aggregate.last().copied().ok_or(degenerate)?;
                aggregate.push(previous);
            }
            ZeroExitPolicy::Nan => aggregate.push(f64::NAN),
        }
    }

    Ok(aggregate)
}
