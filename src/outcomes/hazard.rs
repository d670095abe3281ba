//! Exit hazard and survival in unemployment

use serde::{Deserialize, Serialize};

use crate::distribution::TruncatedWageDistribution;
use crate::search::TimePath;

/// `h_t = e_t · (1 - F(w_{t+1}))` for `t = 0..=T`
///
/// Uses the untruncated CDF: an offer above next week's reservation wage
/// ends the spell.
pub fn hazard_series(path: &TimePath, distribution: &TruncatedWageDistribution) -> Vec<f64> {
    let w = path.reservation_wage();
    path.effort()
        .iter()
        .enumerate()
        .map(|(t, &e)| e * (1.0 - distribution.cumulative(w[t + 1])))
        .collect()
}

/// `S_0 = 1`, `S_{t+1} = S_t (1 - h_t)`; one entry longer than the hazard
pub fn survival_series(hazard: &[f64]) -> Vec<f64> {
    let mut survival = Vec::with_capacity(hazard.len() + 1);
    survival.push(1.0);
    let mut current = 1.0;
    for &h in hazard {
        current *= 1.0 - h;
        survival.push(current);
    }
    survival
}

/// Expected weeks unemployed within the horizon, `Σ_t S_t`
pub fn expected_duration(survival: &[f64]) -> f64 {
    survival.iter().sum()
}

/// Hazard and survival for one `(worker, policy)` pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HazardSurvival {
    /// Length `T + 1`
    pub hazard: Vec<f64>,
    /// Length `T + 2`, starts at one
    pub survival: Vec<f64>,
}

impl HazardSurvival {
    pub fn from_path(path: &TimePath, distribution: &TruncatedWageDistribution) -> Self {
        let hazard = hazard_series(path, distribution);
        let survival = survival_series(&hazard);
        Self { hazard, survival }
    }

    pub fn expected_duration(&self) -> f64 {
        expected_duration(&self.survival)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::search::{TimePathBuilder, WeekSolution};
    use approx::assert_relative_eq;

    #[test]
    fn test_survival_from_constant_hazard() {
        let survival = survival_series(&[0.5, 0.5, 0.5]);
        assert_eq!(survival, vec![1.0, 0.5, 0.25, 0.125]);
        assert_relative_eq!(expected_duration(&survival), 1.875, epsilon = 1e-12);
    }

    #[test]
    fn test_empty_hazard() {
        assert_eq!(survival_series(&[]), vec![1.0]);
    }

    #[test]
    fn test_hazard_uses_next_week_wage() {
        let dist = TruncatedWageDistribution::new(1.0, 0.5, 20.0).unwrap();
        let mut builder = TimePathBuilder::new(1, 6.0);
        for (w, e) in [(5.0, 0.4), (4.0, 0.8)] {
            builder
                .push(WeekSolution {
                    reservation_wage: w,
                    effort: e,
                    value: 0.0,
                    reemployment_wage: w + 1.0,
                    corner: None,
                })
                .unwrap();
        }
        let path = builder.freeze().unwrap();
        // w = [4, 5, 6], e = [0.8, 0.4]
        let result = HazardSurvival::from_path(&path, &dist);

        assert_relative_eq!(result.hazard[0], 0.8 * (1.0 - dist.cumulative(5.0)), epsilon = 1e-15);
        assert_relative_eq!(result.hazard[1], 0.4 * (1.0 - dist.cumulative(6.0)), epsilon = 1e-15);
        assert_eq!(result.survival.len(), 3);
        assert_eq!(result.survival[0], 1.0);
        assert!(result.survival.windows(2).all(|s| s[1] <= s[0]));
    }
}
