//! Status values attached to steps, scenario instances, and containers.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Status of a step, a concrete scenario instance, or a rolled-up container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Passed,
    Failed,
    Skipped,
    Pending,
    Undefined,
    #[default]
    NotExecuted,
}

impl Status {
    /// Every status, in display order.
    pub const ALL: [Status; 6] = [
        Status::Passed,
        Status::Failed,
        Status::Skipped,
        Status::Pending,
        Status::Undefined,
        Status::NotExecuted,
    ];

    /// Rollup precedence. Higher wins.
    ///
    /// `NotExecuted < Passed < Skipped < Undefined < Pending < Failed`
    pub fn severity(self) -> u8 {
        match self {
            Status::NotExecuted => 0,
            Status::Passed => 1,
            Status::Skipped => 2,
            Status::Undefined => 3,
            Status::Pending => 4,
            Status::Failed => 5,
        }
    }

    /// Map a status into the view selected by `options`: statuses whose
    /// category is switched off count as `Passed`.
    pub fn fold(self, options: RollupOptions) -> Status {
        match self {
            Status::Skipped if !options.include_skipped => Status::Passed,
            Status::Pending | Status::Undefined if !options.include_pending => Status::Passed,
            other => other,
        }
    }

    /// True for every status except `NotExecuted`.
    pub fn is_executed(self) -> bool {
        self != Status::NotExecuted
    }

    /// Returns the display name of the status.
    pub fn name(self) -> &'static str {
        match self {
            Status::Passed => "passed",
            Status::Failed => "failed",
            Status::Skipped => "skipped",
            Status::Pending => "pending",
            Status::Undefined => "undefined",
            Status::NotExecuted => "not_executed",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Flags that decide which child statuses may influence a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RollupOptions {
    /// When false, `Skipped` counts as `Passed`.
    pub include_skipped: bool,
    /// When false, `Pending` and `Undefined` both count as `Passed`.
    /// The raw status stays on each instance run.
    pub include_pending: bool,
}

impl Default for RollupOptions {
    fn default() -> Self {
        Self {
            include_skipped: true,
            include_pending: true,
        }
    }
}
