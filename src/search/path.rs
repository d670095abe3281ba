//! Week-indexed solution paths and the builder that fills them backwards

use serde::{Deserialize, Serialize};

use crate::error::{Result, SearchError};

/// Which bound the optimal effort was clamped to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffortCorner {
    /// Unconstrained optimum was below zero; unreachable while the inverse
    /// marginal cost is non-negative
    Lower,
    /// Unconstrained optimum was above one
    Upper,
}

/// Everything solved for a single week
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WeekSolution {
    pub reservation_wage: f64,
    pub effort: f64,
    pub value: f64,
    pub reemployment_wage: f64,
    pub corner: Option<EffortCorner>,
}

/// Optimal behaviour over weeks `0..=T`
///
/// `reservation_wage` has `T + 2` entries: index `T + 1` is the steady-state
/// boundary. The remaining series have `T + 1` entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimePath {
    horizon: usize,
    reservation_wage: Vec<f64>,
    effort: Vec<f64>,
    value: Vec<f64>,
    reemployment_wage: Vec<f64>,
    corners: Vec<Option<EffortCorner>>,
}

impl TimePath {
    pub fn horizon(&self) -> usize {
        self.horizon
    }

    /// Number of solved weeks, `T + 1`
    pub fn weeks(&self) -> usize {
        self.horizon + 1
    }

    pub fn reservation_wage(&self) -> &[f64] {
        &self.reservation_wage
    }

    pub fn effort(&self) -> &[f64] {
        &self.effort
    }

    pub fn value(&self) -> &[f64] {
        &self.value
    }

    pub fn reemployment_wage(&self) -> &[f64] {
        &self.reemployment_wage
    }

    pub fn corners(&self) -> &[Option<EffortCorner>] {
        &self.corners
    }

    /// Reservation wage at the boundary slot `T + 1`
    pub fn boundary_wage(&self) -> f64 {
        self.reservation_wage[self.horizon + 1]
    }

    /// Weeks where effort sits at a corner, in increasing order
    pub fn corner_weeks(&self) -> Vec<(usize, EffortCorner)> {
        self.corners
            .iter()
            .enumerate()
            .filter_map(|(t, c)| c.map(|corner| (t, corner)))
            .collect()
    }

    pub fn has_corner_solutions(&self) -> bool {
        self.corners.iter().any(Option::is_some)
    }
}

/// Fills a [`TimePath`] strictly from week `T` down to week `0`
///
/// The boundary is fixed at construction. Each push writes the next lower
/// week, so no index can be written twice or out of order.
#[derive(Debug, Clone)]
pub struct TimePathBuilder {
    horizon: usize,
    /// Number of weeks still to fill; the next week written is `remaining - 1`
    remaining: usize,
    reservation_wage: Vec<f64>,
    effort: Vec<f64>,
    value: Vec<f64>,
    reemployment_wage: Vec<f64>,
    corners: Vec<Option<EffortCorner>>,
}

impl TimePathBuilder {
    pub fn new(horizon: usize, boundary_wage: f64) -> Self {
        let weeks = horizon + 1;
        let mut reservation_wage = vec![f64::NAN; weeks + 1];
        reservation_wage[weeks] = boundary_wage;

        Self {
            horizon,
            remaining: weeks,
            reservation_wage,
            effort: vec![f64::NAN; weeks],
            value: vec![f64::NAN; weeks],
            reemployment_wage: vec![f64::NAN; weeks],
            corners: vec![None; weeks],
        }
    }

    /// Week the next push will fill, or `None` once complete
    pub fn next_week(&self) -> Option<usize> {
        self.remaining.checked_sub(1)
    }

    /// Reservation wage one week after the next week to fill
    pub fn continuation_wage(&self) -> f64 {
        self.reservation_wage[self.remaining]
    }

    /// Record the solution for [`next_week`](Self::next_week)
    pub fn push(&mut self, week: WeekSolution) -> Result<usize> {
        let t = self.next_week().ok_or_else(|| {
            SearchError::InvalidParameter("time path already complete".into())
        })?;

        self.reservation_wage[t] = week.reservation_wage;
        self.effort[t] = week.effort;
        self.value[t] = week.value;
        self.reemployment_wage[t] = week.reemployment_wage;
        self.corners[t] = week.corner;
        self.remaining = t;

        Ok(t)
    }

    /// Freeze into an immutable path; every week must have been filled
    pub fn freeze(self) -> Result<TimePath> {
        if self.remaining != 0 {
            return Err(SearchError::InvalidParameter(format!(
                "time path incomplete: weeks 0..{} unfilled",
                self.remaining
            )));
        }

        Ok(TimePath {
            horizon: self.horizon,
            reservation_wage: self.reservation_wage,
            effort: self.effort,
            value: self.value,
            reemployment_wage: self.reemployment_wage,
            corners: self.corners,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn week(w: f64) -> WeekSolution {
        WeekSolution {
            reservation_wage: w,
            effort: 0.5,
            value: w.ln() / 0.001,
            reemployment_wage: w + 1.0,
            corner: None,
        }
    }

    #[test]
    fn test_builder_fills_backwards() {
        let mut builder = TimePathBuilder::new(2, 9.0);
        assert_eq!(builder.next_week(), Some(2));
        assert_eq!(builder.continuation_wage(), 9.0);

        assert_eq!(builder.push(week(8.0)).unwrap(), 2);
        assert_eq!(builder.continuation_wage(), 8.0);
        assert_eq!(builder.push(week(7.0)).unwrap(), 1);
        assert_eq!(builder.push(week(6.0)).unwrap(), 0);
        assert_eq!(builder.next_week(), None);

        let path = builder.freeze().unwrap();
        assert_eq!(path.reservation_wage(), &[6.0, 7.0, 8.0, 9.0]);
        assert_eq!(path.effort().len(), 3);
        assert_eq!(path.boundary_wage(), 9.0);
        assert!(!path.has_corner_solutions());
    }

    #[test]
    fn test_builder_rejects_extra_push() {
        let mut builder = TimePathBuilder::new(0, 5.0);
        builder.push(week(5.0)).unwrap();
        assert!(builder.push(week(4.0)).is_err());
        assert_eq!(builder.freeze().unwrap().boundary_wage(), 5.0);
    }

    #[test]
    fn test_incomplete_path_cannot_freeze() {
        let mut builder = TimePathBuilder::new(3, 5.0);
        builder.push(week(5.0)).unwrap();
        assert!(builder.freeze().is_err());
    }

    #[test]
    fn test_corner_weeks_reported_in_order() {
        let mut builder = TimePathBuilder::new(2, 5.0);
        builder.push(WeekSolution { corner: Some(EffortCorner::Upper), ..week(5.0) }).unwrap();
        builder.push(week(5.0)).unwrap();
        builder.push(WeekSolution { corner: Some(EffortCorner::Upper), ..week(5.0) }).unwrap();

        let path = builder.freeze().unwrap();
        assert_eq!(path.corner_weeks(), vec![(0, EffortCorner::Upper), (2, EffortCorner::Upper)]);
    }
}
