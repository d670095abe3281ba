//! UI benefit schedules indexed by weeks of unemployment

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::assumptions::{ModelParameters, WorkerType};

/// Benefit paid as a function of elapsed unemployment duration
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BenefitPolicy {
    /// Same level every week
    Constant { level: f64 },
    /// `pre` through week `cutoff` (inclusive), `post` afterwards
    Stepped { pre: f64, cutoff: usize, post: f64 },
}

impl BenefitPolicy {
    /// Benefit paid in week `t`
    pub fn benefit(&self, t: usize) -> f64 {
        match *self {
            BenefitPolicy::Constant { level } => level,
            BenefitPolicy::Stepped { pre, cutoff, post } => {
                if t <= cutoff {
                    pre
                } else {
                    post
                }
            }
        }
    }

    /// Last week paid at the high level, if the schedule steps
    pub fn cutoff(&self) -> Option<usize> {
        match *self {
            BenefitPolicy::Constant { .. } => None,
            BenefitPolicy::Stepped { cutoff, .. } => Some(cutoff),
        }
    }

    /// Benefit for every week `0..=horizon`
    pub fn schedule(&self, horizon: usize) -> Vec<f64> {
        (0..=horizon).map(|t| self.benefit(t)).collect()
    }
}

/// The UI reforms compared by the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum PolicyId {
    /// Current Danish rules: benefits for two years
    Ui104Weeks,
    /// Proposed reform: benefits for one year
    Ui52Weeks,
}

impl PolicyId {
    /// Fixed iteration order; the baseline comes first
    pub const ALL: [PolicyId; 2] = [PolicyId::Ui104Weeks, PolicyId::Ui52Weeks];

    pub fn cutoff_week(&self) -> usize {
        match self {
            PolicyId::Ui104Weeks => 104,
            PolicyId::Ui52Weeks => 52,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            PolicyId::Ui104Weeks => "UI - 104 weeks",
            PolicyId::Ui52Weeks => "UI - 52 weeks",
        }
    }

    /// Short identifier for file names
    pub fn slug(&self) -> &'static str {
        match self {
            PolicyId::Ui104Weeks => "ui104",
            PolicyId::Ui52Weeks => "ui52",
        }
    }

    /// The schedule this policy implies for one worker type
    pub fn policy_for(&self, worker: &WorkerType, params: &ModelParameters) -> BenefitPolicy {
        BenefitPolicy::Stepped {
            pre: worker.benefit_level,
            cutoff: self.cutoff_week(),
            post: params.post_benefit,
        }
    }
}

impl fmt::Display for PolicyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
