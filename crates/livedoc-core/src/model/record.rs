//! Normalized test-execution records produced by the result adapters.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::status::Status;

/// Outcome reported by a test runner for a scenario or a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Passed,
    Failed,
    Skipped,
    Pending,
    Undefined,
}

impl Outcome {
    /// Parse a runner's status label. Accepts the vocabularies of the
    /// supported report formats, case-insensitively.
    pub fn from_label(label: &str) -> Option<Outcome> {
        match label.trim().to_ascii_lowercase().as_str() {
            "passed" | "pass" | "success" | "succeeded" | "ok" | "done" => Some(Outcome::Passed),
            "failed" | "fail" | "failure" | "error" | "errored" | "broken" | "ambiguous" => {
                Some(Outcome::Failed)
            }
            "skipped" | "skip" | "ignored" | "notrun" | "not_run" | "disabled" => {
                Some(Outcome::Skipped)
            }
            "pending" | "inconclusive" | "wip" => Some(Outcome::Pending),
            "undefined" | "unknown" | "missing" | "unimplemented" => Some(Outcome::Undefined),
            _ => None,
        }
    }

    /// Severity consistent with [`Status::severity`].
    pub fn severity(self) -> u8 {
        Status::from(self).severity()
    }

    /// The more severe of two outcomes.
    pub fn worst(self, other: Outcome) -> Outcome {
        if other.severity() > self.severity() {
            other
        } else {
            self
        }
    }

    pub fn is_passed(self) -> bool {
        self == Outcome::Passed
    }
}

impl From<Outcome> for Status {
    fn from(outcome: Outcome) -> Self {
        match outcome {
            Outcome::Passed => Status::Passed,
            Outcome::Failed => Status::Failed,
            Outcome::Skipped => Status::Skipped,
            Outcome::Pending => Status::Pending,
            Outcome::Undefined => Status::Undefined,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(Status::from(*self).name())
    }
}

/// One executed test as reported by a runner, normalized across formats.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionRecord {
    /// Report file the record was read from.
    pub source: String,
    /// Name of the adapter that produced the record.
    pub format: String,
    /// Feature file path as the runner reported it, when available.
    pub feature_path: Option<String>,
    /// Feature title as the runner reported it, when available.
    pub feature_name: Option<String>,
    pub scenario_name: String,
    /// Source line of the scenario, or of the example row for outline
    /// instances, when the format reports one.
    pub line: Option<u32>,
    /// Zero-based index of the example row across all example blocks of
    /// the outline, when the format reports one.
    pub example_index: Option<usize>,
    /// Per-step outcomes by ordinal, background steps first. Empty when the
    /// format only reports scenario-level results.
    pub steps: Vec<Outcome>,
    pub outcome: Outcome,
    #[serde(with = "super::duration_millis")]
    pub duration: Duration,
    pub failure: Option<String>,
}

impl ExecutionRecord {
    /// A scenario-level record with no location metadata.
    pub fn new(
        source: impl Into<String>,
        format: impl Into<String>,
        scenario_name: impl Into<String>,
        outcome: Outcome,
    ) -> Self {
        Self {
            source: source.into(),
            format: format.into(),
            feature_path: None,
            feature_name: None,
            scenario_name: scenario_name.into(),
            line: None,
            example_index: None,
            steps: Vec::new(),
            outcome,
            duration: Duration::ZERO,
            failure: None,
        }
    }

    pub fn with_feature_path(mut self, path: impl Into<String>) -> Self {
        self.feature_path = Some(path.into());
        self
    }

    pub fn with_feature_name(mut self, name: impl Into<String>) -> Self {
        self.feature_name = Some(name.into());
        self
    }

    pub fn with_line(mut self, line: u32) -> Self {
        self.line = Some(line);
        self
    }

    pub fn with_example_index(mut self, index: usize) -> Self {
        self.example_index = Some(index);
        self
    }

    pub fn with_steps(mut self, steps: Vec<Outcome>) -> Self {
        self.steps = steps;
        self
    }

    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = duration;
        self
    }

    pub fn with_failure(mut self, failure: impl Into<String>) -> Self {
        self.failure = Some(failure.into());
        self
    }
}
