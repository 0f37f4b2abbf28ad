//! livedoc generic JSON: the neutral record schema for runners without a
//! native adapter.
//!
//! ```json
//! { "records": [
//!   { "feature_path": "features/pay.feature", "scenario": "Pay by card",
//!     "line": 12, "example_index": 0, "outcome": "failed",
//!     "steps": ["passed", "failed", "skipped"], "duration_ms": 40,
//!     "failure": "card declined" }
//! ] }
//! ```

use std::path::Path;
use std::time::Duration;

use livedoc_core::errors::ResultError;
use livedoc_core::model::{ExecutionRecord, Outcome};
use serde::Deserialize;

use super::{has_extension, read, sniff, ResultAdapter};

const FORMAT: &str = "livedoc-json";

pub struct GenericJsonAdapter;

#[derive(Debug, Deserialize)]
struct Document {
    records: Vec<WireRecord>,
}

#[derive(Debug, Deserialize)]
struct WireRecord {
    #[serde(default, alias = "feature", alias = "uri")]
    feature_path: Option<String>,
    #[serde(default)]
    feature_name: Option<String>,
    #[serde(alias = "scenario", alias = "name")]
    scenario_name: String,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default, alias = "row")]
    example_index: Option<usize>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(alias = "status")]
    outcome: String,
    #[serde(default, alias = "duration")]
    duration_ms: Option<u64>,
    #[serde(default, alias = "error", alias = "message")]
    failure: Option<String>,
}

fn outcome(path: &Path, label: &str) -> Result<Outcome, ResultError> {
    Outcome::from_label(label)
        .ok_or_else(|| ResultError::malformed(path, FORMAT, format!("unknown outcome `{label}`")))
}

impl ResultAdapter for GenericJsonAdapter {
    fn name(&self) -> &'static str {
        FORMAT
    }

    fn can_parse(&self, path: &Path) -> bool {
        if !has_extension(path, &["json"]) {
            return false;
        }
        sniff(path).is_some_and(|head| {
            head.trim_start().starts_with('{') && head.contains("\"records\"")
        })
    }

    fn parse(&self, path: &Path) -> Result<Vec<ExecutionRecord>, ResultError> {
        let content = read(path)?;
        let document: Document = serde_json::from_str(&content)
            .map_err(|e| ResultError::malformed(path, FORMAT, e.to_string()))?;

        let source = path.display().to_string();
        document
            .records
            .into_iter()
            .map(|wire| -> Result<ExecutionRecord, ResultError> {
                let steps = wire
                    .steps
                    .iter()
                    .map(|s| outcome(path, s))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(ExecutionRecord {
                    source: source.clone(),
                    format: FORMAT.to_string(),
                    feature_path: wire.feature_path.filter(|p| !p.is_empty()),
                    feature_name: wire.feature_name.filter(|n| !n.is_empty()),
                    scenario_name: wire.scenario_name.trim().to_string(),
                    line: wire.line,
                    example_index: wire.example_index,
                    steps,
                    outcome: outcome(path, &wire.outcome)?,
                    duration: Duration::from_millis(wire.duration_ms.unwrap_or(0)),
                    failure: wire.failure,
                })
            })
            .collect()
    }
}
