//! Log-normal wage-offer distribution truncated to `[0, w_max]`
//!
//! Mass above `w_max` is discarded, not redistributed: both conditional
//! expectations below integrate only up to `w_max` and normalise by
//! `CDF(w_max)` (or by the mass between the threshold and `w_max`).

use statrs::distribution::{Continuous, ContinuousCDF, LogNormal};

use crate::error::{Result, SearchError};
use crate::numerics::{integrate, QuadratureTolerance};

/// Probability mass at or below which a conditional denominator counts as zero
pub const DEGENERATE_MASS: f64 = 1e-14;

/// Wage offers for one worker type
#[derive(Debug, Clone)]
pub struct TruncatedWageDistribution {
    law: LogNormal,
    mu: f64,
    sigma: f64,
    w_max: f64,
    /// `CDF(w_max)`, the mass kept by the truncation
    mass: f64,
    tolerance: QuadratureTolerance,
}

impl TruncatedWageDistribution {
    /// Build from the log-location `mu`, log-scale `sigma` and the wage cap
    pub fn new(mu: f64, sigma: f64, w_max: f64) -> Result<Self> {
        Self::with_tolerance(mu, sigma, w_max, QuadratureTolerance::default())
    }

    /// Same as [`new`](Self::new) with an explicit quadrature tolerance
    pub fn with_tolerance(mu: f64, sigma: f64, w_max: f64, tolerance: QuadratureTolerance) -> Result<Self> {
        if !(w_max > 0.0) || !w_max.is_finite() {
            return Err(SearchError::InvalidParameter(format!("w_max must be positive, got {w_max}")));
        }
        let law = LogNormal::new(mu, sigma)
            .map_err(|e| SearchError::InvalidParameter(format!("log-normal({mu}, {sigma}): {e}")))?;
        let mass = law.cdf(w_max);
        if mass <= DEGENERATE_MASS {
            return Err(SearchError::InvalidParameter(format!(
                "no probability mass below w_max = {w_max}"
            )));
        }

        Ok(Self {
            law,
            mu,
            sigma,
            w_max,
            mass,
            tolerance,
        })
    }

    pub fn mu(&self) -> f64 {
        self.mu
    }

    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    pub fn w_max(&self) -> f64 {
        self.w_max
    }

    /// Probability mass retained by the truncation, `CDF(w_max)`
    pub fn truncated_mass(&self) -> f64 {
        self.mass
    }

    /// Untruncated log-normal density; zero for `w <= 0`
    pub fn density(&self, w: f64) -> f64 {
        if w <= 0.0 {
            0.0
        } else {
            self.law.pdf(w)
        }
    }

    /// Untruncated log-normal CDF; zero for `w <= 0`
    pub fn cumulative(&self, w: f64) -> f64 {
        if w <= 0.0 {
            0.0
        } else {
            self.law.cdf(w)
        }
    }

    /// `∫_threshold^{w_max} (ln x - ln threshold) f(x) dx / CDF(w_max)`
    ///
    /// Zero once the threshold reaches the cap.
    pub fn expected_log_surplus_above(&self, threshold: f64) -> Result<f64> {
        if !(threshold > 0.0) {
            return Err(SearchError::InvalidParameter(format!(
                "log-surplus threshold must be positive, got {threshold}"
            )));
        }
        if threshold >= self.w_max {
            return Ok(0.0);
        }

        let ln_threshold = threshold.ln();
        let integral = integrate(
            |x| {
                if x > 0.0 {
                    (x.ln() - ln_threshold) * self.law.pdf(x)
                } else {
                    0.0
                }
            },
            threshold,
            self.w_max,
            &self.tolerance,
        );

        Ok(integral.value / self.mass)
    }

    /// Mean accepted wage: `∫_threshold^{w_max} x f(x) dx / (CDF(w_max) - CDF(threshold))`
    ///
    /// Fails with `DegenerateConditional` when no mass lies between the
    /// threshold and the cap; the caller decides the fallback.
    pub fn expected_wage_above(&self, threshold: f64) -> Result<f64> {
        let denominator = self.mass - self.cumulative(threshold);
        if threshold >= self.w_max || denominator <= DEGENERATE_MASS {
            return Err(SearchError::degenerate("expected reemployment wage"));
        }

        let integral = integrate(
            |x| if x > 0.0 { x * self.law.pdf(x) } else { 0.0 },
            threshold.max(0.0),
            self.w_max,
            &self.tolerance,
        );

        Ok(integral.value / denominator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use statrs::distribution::Normal;

    fn std_normal() -> Normal {
        Normal::new(0.0, 1.0).unwrap()
    }

    #[test]
    fn test_density_and_cumulative_guard_non_positive() {
        let dist = TruncatedWageDistribution::new(1.0, 0.5, 20.0).unwrap();
        assert_eq!(dist.density(0.0), 0.0);
        assert_eq!(dist.density(-3.0), 0.0);
        assert_eq!(dist.cumulative(-1.0), 0.0);
        // Median of a log-normal is e^mu
        assert_relative_eq!(dist.cumulative(1.0_f64.exp()), 0.5, epsilon = 1e-12);
        assert!(dist.truncated_mass() < 1.0);
    }

    #[test]
    fn test_log_surplus_matches_closed_form() {
        let (mu, sigma, w_max): (f64, f64, f64) = (1.0, 0.5, 20.0);
        let dist = TruncatedWageDistribution::new(mu, sigma, w_max).unwrap();
        let n = std_normal();

        for &a in &[0.5, 2.0, 4.0, 8.0] {
            let alpha = (f64::ln(a) - mu) / sigma;
            let beta = (f64::ln(w_max) - mu) / sigma;
            let expected = ((mu - f64::ln(a)) * (n.cdf(beta) - n.cdf(alpha))
                + sigma * (n.pdf(alpha) - n.pdf(beta)))
                / n.cdf(beta);
            let got = dist.expected_log_surplus_above(a).unwrap();
            assert_relative_eq!(got, expected, epsilon = 1e-7);
        }
    }

    #[test]
    fn test_log_surplus_zero_at_cap() {
        let dist = TruncatedWageDistribution::new(1.0, 0.5, 20.0).unwrap();
        assert_eq!(dist.expected_log_surplus_above(20.0).unwrap(), 0.0);
        assert_eq!(dist.expected_log_surplus_above(35.0).unwrap(), 0.0);
        assert!(dist.expected_log_surplus_above(0.0).is_err());
    }

    #[test]
    fn test_log_surplus_decreasing_in_threshold() {
        let dist = TruncatedWageDistribution::new(1.7, 0.55, 20.0).unwrap();
        let mut last = f64::INFINITY;
        for i in 1..20 {
            let value = dist.expected_log_surplus_above(i as f64).unwrap();
            assert!(value < last);
            assert!(value >= 0.0);
            last = value;
        }
    }

    #[test]
    fn test_expected_wage_matches_closed_form() {
        let (mu, sigma, w_max): (f64, f64, f64) = (1.0, 0.5, 20.0);
        let dist = TruncatedWageDistribution::new(mu, sigma, w_max).unwrap();
        let n = std_normal();

        let a: f64 = 3.0;
        let upper = (w_max.ln() - mu - sigma * sigma) / sigma;
        let lower = (a.ln() - mu - sigma * sigma) / sigma;
        let partial_mean = (mu + 0.5 * sigma * sigma).exp() * (n.cdf(upper) - n.cdf(lower));
        let expected = partial_mean / (dist.truncated_mass() - dist.cumulative(a));

        let got = dist.expected_wage_above(a).unwrap();
        assert_relative_eq!(got, expected, epsilon = 1e-7);
        assert!(got > a && got < w_max);
    }

    #[test]
    fn test_expected_wage_degenerate_at_cap() {
        let dist = TruncatedWageDistribution::new(1.0, 0.5, 20.0).unwrap();
        let err = dist.expected_wage_above(20.0).unwrap_err();
        assert!(matches!(err, SearchError::DegenerateConditional { week: None, .. }));
    }

    #[test]
    fn test_invalid_construction() {
        assert!(TruncatedWageDistribution::new(1.0, 0.0, 20.0).is_err());
        assert!(TruncatedWageDistribution::new(1.0, 0.5, 0.0).is_err());
    }
}
