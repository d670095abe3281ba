//! Effort cost, search production and flow utilities

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Convex cost of search effort `c(e) = k e^(1+γ) / (1+γ)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EffortCostModel {
    pub k: f64,
    pub gamma: f64,
}

impl EffortCostModel {
    pub fn new(k: f64, gamma: f64) -> Result<Self> {
        if !(k > 0.0) || !(gamma > 0.0) {
            return Err(SearchError::InvalidParameter(format!(
                "effort cost needs k > 0 and gamma > 0, got k = {k}, gamma = {gamma}"
            )));
        }
        Ok(Self { k, gamma })
    }

    pub fn cost(&self, effort: f64) -> f64 {
        self.k * effort.powf(1.0 + self.gamma) / (1.0 + self.gamma)
    }

    /// Inverse of `c'(e) = k e^γ`: the effort whose marginal cost equals `x`
    pub fn marginal_cost_inverse(&self, x: f64) -> Result<f64> {
        if !(x >= 0.0) {
            return Err(SearchError::InvalidParameter(format!(
                "marginal cost inverse undefined for {x}"
            )));
        }
        Ok((x / self.k).powf(1.0 / self.gamma))
    }

    /// Offer-arrival probability; linear in effort
    pub fn search_production(&self, effort: f64) -> f64 {
        effort
    }
}

/// CRRA flow utility of a benefit, `(b^(1-η) - 1) / (1-η)`
pub fn benefit_utility(benefit: f64, eta: f64) -> f64 {
    (benefit.powf(1.0 - eta) - 1.0) / (1.0 - eta)
}

/// Flow utility of employment at wage `w`
pub fn wage_utility(wage: f64) -> f64 {
    wage.ln()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cost_shape() {
        let model = EffortCostModel::new(4.0, 1.5).unwrap();
        assert_eq!(model.cost(0.0), 0.0);
        assert_relative_eq!(model.cost(1.0), 4.0 / 2.5, epsilon = 1e-12);
        assert!(model.cost(0.6) < model.cost(0.7));
    }

    #[test]
    fn test_marginal_cost_inverse_round_trip() {
        let model = EffortCostModel::new(8.0, 1.5).unwrap();
        let effort: f64 = 0.37;
        let marginal = model.k * effort.powf(model.gamma);
        assert_relative_eq!(model.marginal_cost_inverse(marginal).unwrap(), effort, epsilon = 1e-12);
        assert_eq!(model.marginal_cost_inverse(0.0).unwrap(), 0.0);
        assert!(model.marginal_cost_inverse(-0.1).is_err());
    }

    #[test]
    fn test_invalid_cost_parameters() {
        assert!(EffortCostModel::new(0.0, 1.5).is_err());
        assert!(EffortCostModel::new(4.0, -1.0).is_err());
    }

    #[test]
    fn test_utilities() {
        // b = 1 gives zero utility for any eta
        assert_eq!(benefit_utility(1.0, 0.5), 0.0);
        // eta = 0.5: 2(√b - 1)
        assert_relative_eq!(benefit_utility(4.0, 0.5), 2.0, epsilon = 1e-12);
        assert_relative_eq!(wage_utility(1.0_f64.exp()), 1.0, epsilon = 1e-12);
    }
}
