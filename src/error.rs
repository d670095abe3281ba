//! Error types for the job-search solver

use thiserror::Error;

/// Result alias used throughout the library
pub type Result<T> = std::result::Result<T, SearchError>;

/// Failures surfaced by the numerical core
///
/// None of these are retried internally: the computation is deterministic,
/// so re-running with identical inputs reproduces the same failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SearchError {
    /// Root finder residual still above tolerance after the iteration cap
    #[error("steady state did not converge after {iterations} iterations: residual {residual:.3e} at (w = {}, e = {})", iterate.0, iterate.1)]
    NonConvergence {
        residual: f64,
        iterate: (f64, f64),
        iterations: usize,
    },

    /// Denominator of a conditional expectation is numerically zero
    #[error("degenerate conditional in {quantity}{}", week.map(|w| format!(" at week {w}")).unwrap_or_default())]
    DegenerateConditional {
        quantity: &'static str,
        week: Option<usize>,
    },

    /// Rejected configuration or argument
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Reading a configuration or assumption file failed
    #[error("failed to load input: {0}")]
    Load(String),
}

impl SearchError {
    /// Degenerate conditional without a week attached yet
    pub fn degenerate(quantity: &'static str) -> Self {
        SearchError::DegenerateConditional { quantity, week: None }
    }

    /// Attach the offending week to a degenerate-conditional failure
    pub fn at_week(self, t: usize) -> Self {
        match self {
            SearchError::DegenerateConditional { quantity, .. } => {
                SearchError::DegenerateConditional { quantity, week: Some(t) }
            }
            other => other,
        }
    }
}

impl From<csv::Error> for SearchError {
    fn from(err: csv::Error) -> Self {
        SearchError::Load(err.to_string())
    }
}

impl From<serde_json::Error> for SearchError {
    fn from(err: serde_json::Error) -> Self {
        SearchError::Load(err.to_string())
    }
}

impl From<std::io::Error> for SearchError {
    fn from(err: std::io::Error) -> Self {
        SearchError::Load(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_at_week_attaches_index() {
        let err = SearchError::degenerate("expected reemployment wage").at_week(17);
        assert_eq!(
            err,
            SearchError::DegenerateConditional {
                quantity: "expected reemployment wage",
                week: Some(17),
            }
        );
        assert!(err.to_string().contains("week 17"));
    }

    #[test]
    fn test_at_week_leaves_other_errors() {
        let err = SearchError::InvalidParameter("beta".into()).at_week(3);
        assert_eq!(err, SearchError::InvalidParameter("beta".into()));
    }
}
