//! Detection of telemetry stream restarts from time regressions.

use serde::{Deserialize, Serialize};

/// When a new sample time counts as a regression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestartPolicy {
    /// Restart only if time moved strictly backward.
    #[default]
    Strict,
    /// A repeated time also starts a new run.
    NonIncreasing,
}

impl RestartPolicy {
    pub fn is_regression(self, t: f64, latest: f64) -> bool {
        match self {
            RestartPolicy::Strict => t < latest,
            RestartPolicy::NonIncreasing => t <= latest,
        }
    }
}

/// Outcome of checking a sample time against the last accepted one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamState {
    Running,
    /// The stream began anew; accumulated series must be discarded.
    Reset,
}

/// Remembers the last accepted sample time.
#[derive(Debug, Clone, Default)]
pub struct RestartDetector {
    policy: RestartPolicy,
    latest_t: Option<f64>,
}

impl RestartDetector {
    pub fn new(policy: RestartPolicy) -> Self {
        Self {
            policy,
            latest_t: None,
        }
    }

    /// Classify `t` without recording it. Calling this repeatedly is side-effect free.
    pub fn check(&self, t: f64) -> StreamState {
        match self.latest_t {
            Some(latest) if self.policy.is_regression(t, latest) => StreamState::Reset,
            _ => StreamState::Running,
        }
    }

    /// Record `t` as the last accepted time.
    pub fn observe(&mut self, t: f64) {
        self.latest_t = Some(t);
    }

    pub fn latest_t(&self) -> Option<f64> {
        self.latest_t
    }

    pub fn forget(&mut self) {
        self.latest_t = None;
    }
}
