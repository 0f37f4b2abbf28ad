//! Per-instance execution result attached by the correlation engine.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::record::Outcome;
use super::status::Status;

/// Result of one concrete scenario instance (a plain scenario, or one
/// example row of an outline).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ScenarioRun {
    /// Rollup of the step statuses and the record's overall outcome.
    pub status: Status,
    /// Overall outcome reported by the matched record, if one matched.
    pub outcome: Option<Outcome>,
    /// Statuses of the inherited background steps, feature background first.
    pub background_steps: Vec<Status>,
    /// Statuses of the scenario's own steps, by ordinal.
    pub steps: Vec<Status>,
    #[serde(with = "super::duration_millis")]
    pub duration: Duration,
    pub failure: Option<String>,
    /// Report file the matched record came from.
    pub source: Option<String>,
}

impl ScenarioRun {
    /// An instance no record matched.
    pub fn not_executed(background_steps: usize, steps: usize) -> Self {
        Self {
            background_steps: vec![Status::NotExecuted; background_steps],
            steps: vec![Status::NotExecuted; steps],
            ..Default::default()
        }
    }

    /// All step statuses, background first.
    pub fn all_steps(&self) -> impl Iterator<Item = Status> + '_ {
        self.background_steps.iter().chain(self.steps.iter()).copied()
    }

    pub fn is_executed(&self) -> bool {
        self.outcome.is_some()
    }
}
