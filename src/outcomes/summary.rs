//! Duration comparison between the baseline and the reform

use serde::{Deserialize, Serialize};

/// Relative change `(reform - base) / base`, as a fraction
pub fn relative_change(base: f64, reform: f64) -> f64 {
    (reform - base) / base
}

/// Expected duration of one worker type under both policies
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PolicyComparison {
    pub worker: String,
    pub baseline_duration: f64,
    pub reform_duration: f64,
    /// Fraction, so -0.12 is a twelve percent drop
    pub relative_change: f64,
}

impl PolicyComparison {
    pub fn new(worker: impl Into<String>, baseline_duration: f64, reform_duration: f64) -> Self {
        Self {
            worker: worker.into(),
            baseline_duration,
            reform_duration,
            relative_change: relative_change(baseline_duration, reform_duration),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relative_change() {
        assert!((relative_change(40.0, 30.0) + 0.25).abs() < 1e-12);
        assert!((relative_change(20.0, 25.0) - 0.25).abs() < 1e-12);
        assert_eq!(relative_change(10.0, 10.0), 0.0);
    }

    #[test]
    fn test_comparison_fills_change() {
        let cmp = PolicyComparison::new("high", 39.3, 34.3);
        assert_eq!(cmp.worker, "high");
        assert!(cmp.relative_change < 0.0);
        assert!((cmp.relative_change - (34.3 - 39.3) / 39.3).abs() < 1e-12);
    }
}
