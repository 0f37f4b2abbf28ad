//! Non-fatal correlation findings surfaced in the generated document.

use std::fmt;

use livedoc_core::model::ExecutionRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A record matched several scenarios; none of them took it.
    AmbiguousMatch,
    /// A record matched no scenario.
    UnmatchedRecord,
    /// An outline's positional records and free rows differ in number.
    ExampleCountMismatch,
    /// A record named an example row the outline does not have.
    UnresolvedExample,
    /// A scenario has no result. Outlines with only some rows missing are
    /// reported in verbose mode.
    NotExecuted,
}

impl WarningKind {
    pub fn name(self) -> &'static str {
        match self {
            WarningKind::AmbiguousMatch => "ambiguous_match",
            WarningKind::UnmatchedRecord => "unmatched_record",
            WarningKind::ExampleCountMismatch => "example_count_mismatch",
            WarningKind::UnresolvedExample => "unresolved_example",
            WarningKind::NotExecuted => "not_executed",
        }
    }
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CorrelationWarning {
    pub kind: WarningKind,
    /// Feature the warning concerns: the scenario's file for scenario-side
    /// warnings, the record's reported path for record-side ones.
    pub feature_path: Option<String>,
    pub scenario_name: String,
    pub message: String,
}

impl CorrelationWarning {
    pub(crate) fn ambiguous(record: &ExecutionRecord, candidates: &[String]) -> Self {
        Self {
            kind: WarningKind::AmbiguousMatch,
            feature_path: record.feature_path.clone(),
            scenario_name: record.scenario_name.clone(),
            message: format!(
                "result from {} matches {} scenarios ({}); left unassigned",
                record.source,
                candidates.len(),
                candidates.join(", ")
            ),
        }
    }

    pub(crate) fn unmatched(record: &ExecutionRecord) -> Self {
        Self {
            kind: WarningKind::UnmatchedRecord,
            feature_path: record.feature_path.clone(),
            scenario_name: record.scenario_name.clone(),
            message: format!("result from {} matches no scenario", record.source),
        }
    }

    pub(crate) fn count_mismatch(path: &str, scenario: &str, rows: usize, records: usize) -> Self {
        let detail = if records > rows {
            format!("{} excess results excluded", records - rows)
        } else {
            format!("{} rows left without a result", rows - records)
        };
        Self {
            kind: WarningKind::ExampleCountMismatch,
            feature_path: Some(path.to_string()),
            scenario_name: scenario.to_string(),
            message: format!("{records} results for {rows} example rows; {detail}"),
        }
    }

    pub(crate) fn unresolved(path: &str, record: &ExecutionRecord, index: usize, rows: usize) -> Self {
        Self {
            kind: WarningKind::UnresolvedExample,
            feature_path: Some(path.to_string()),
            scenario_name: record.scenario_name.clone(),
            message: format!(
                "result from {} names example row {index} but the outline has {rows}; excluded",
                record.source
            ),
        }
    }

    pub(crate) fn not_executed(path: &str, scenario: &str, missing: usize, total: usize) -> Self {
        let message = if total == 1 {
            "no result found".to_string()
        } else {
            format!("{missing} of {total} example rows have no result")
        };
        Self {
            kind: WarningKind::NotExecuted,
            feature_path: Some(path.to_string()),
            scenario_name: scenario.to_string(),
            message,
        }
    }
}

impl fmt::Display for CorrelationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.feature_path {
            Some(path) => write!(f, "[{}] {} ({}): {}", self.kind, self.scenario_name, path, self.message),
            None => write!(f, "[{}] {}: {}", self.kind, self.scenario_name, self.message),
        }
    }
}
