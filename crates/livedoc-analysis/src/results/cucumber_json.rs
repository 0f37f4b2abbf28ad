//! Cucumber JSON (`json` formatter of cucumber-jvm, cucumber-js,
//! cucumber-ruby, cucumber-rs).
//!
//! Top level is an array of features; each feature lists `elements` of
//! type `background` or `scenario`. A background element applies to the
//! scenario element that follows it. Outline instances are separate
//! scenario elements whose `line` is the example row line.

use std::path::Path;
use std::time::Duration;

use livedoc_core::errors::ResultError;
use livedoc_core::model::{ExecutionRecord, Outcome};
use serde::Deserialize;

use super::{has_extension, read, sniff, ResultAdapter};

const FORMAT: &str = "cucumber-json";

pub struct CucumberJsonAdapter;

#[derive(Debug, Deserialize)]
struct JsonFeature {
    #[serde(default)]
    uri: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    elements: Vec<JsonElement>,
}

#[derive(Debug, Deserialize)]
struct JsonElement {
    #[serde(default, rename = "type")]
    kind: Option<String>,
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    name: String,
    #[serde(default)]
    line: Option<u32>,
    #[serde(default)]
    steps: Vec<JsonStep>,
    #[serde(default)]
    before: Vec<JsonHook>,
    #[serde(default)]
    after: Vec<JsonHook>,
}

#[derive(Debug, Deserialize)]
struct JsonStep {
    #[serde(default)]
    keyword: String,
    #[serde(default)]
    hidden: bool,
    #[serde(default)]
    result: Option<JsonResult>,
}

#[derive(Debug, Deserialize)]
struct JsonHook {
    #[serde(default)]
    result: Option<JsonResult>,
}

#[derive(Debug, Deserialize)]
struct JsonResult {
    #[serde(default)]
    status: String,
    /// Nanoseconds.
    #[serde(default)]
    duration: Option<u64>,
    #[serde(default)]
    error_message: Option<String>,
}

impl JsonResult {
    fn outcome(&self) -> Outcome {
        Outcome::from_label(&self.status).unwrap_or(Outcome::Undefined)
    }
}

impl JsonElement {
    fn is_background(&self) -> bool {
        let kind = self.kind.as_deref().unwrap_or_default();
        kind.eq_ignore_ascii_case("background")
            || (kind.is_empty()
                && self
                    .keyword
                    .as_deref()
                    .is_some_and(|k| k.trim().eq_ignore_ascii_case("background")))
    }
}

impl JsonStep {
    /// cucumber-js lists hooks as hidden steps keyed `Before`/`After`.
    fn is_hook(&self) -> bool {
        let keyword = self.keyword.trim();
        self.hidden || keyword == "Before" || keyword == "After"
    }
}

/// Accumulates one scenario element (plus its background) into a record.
#[derive(Default)]
struct Accumulator {
    steps: Vec<Outcome>,
    hooks: Vec<Outcome>,
    duration: u64,
    failure: Option<String>,
}

impl Accumulator {
    fn result(&mut self, result: Option<&JsonResult>, is_hook: bool) {
        let outcome = result.map_or(Outcome::Skipped, JsonResult::outcome);
        if is_hook {
            self.hooks.push(outcome);
        } else {
            self.steps.push(outcome);
        }
        if let Some(r) = result {
            self.duration = self.duration.saturating_add(r.duration.unwrap_or(0));
            if self.failure.is_none() {
                self.failure = r.error_message.clone().filter(|m| !m.trim().is_empty());
            }
        }
    }

    fn element(&mut self, element: &JsonElement) {
        for hook in &element.before {
            self.result(hook.result.as_ref(), true);
        }
        for step in &element.steps {
            self.result(step.result.as_ref(), step.is_hook());
        }
        for hook in &element.after {
            self.result(hook.result.as_ref(), true);
        }
    }

    fn outcome(&self) -> Outcome {
        self.steps
            .iter()
            .chain(&self.hooks)
            .copied()
            .reduce(Outcome::worst)
            .unwrap_or(Outcome::Passed)
    }
}

impl ResultAdapter for CucumberJsonAdapter {
    fn name(&self) -> &'static str {
        FORMAT
    }

    fn can_parse(&self, path: &Path) -> bool {
        if !has_extension(path, &["json"]) {
            return false;
        }
        let Some(head) = sniff(path) else {
            return false;
        };
        let head = head.trim_start();
        head.starts_with('[')
            && (head.contains("\"elements\"")
                || head.contains("\"uri\"")
                || head.trim_end() == "[]")
    }

    fn parse(&self, path: &Path) -> Result<Vec<ExecutionRecord>, ResultError> {
        let content = read(path)?;
        let features: Vec<JsonFeature> = serde_json::from_str(&content)
            .map_err(|e| ResultError::malformed(path, FORMAT, e.to_string()))?;

        let source = path.display().to_string();
        let mut records = Vec::new();

        for feature in &features {
            let mut background: Option<&JsonElement> = None;
            for element in &feature.elements {
                if element.is_background() {
                    background = Some(element);
                    continue;
                }

                let mut acc = Accumulator::default();
                if let Some(bg) = background.take() {
                    acc.element(bg);
                }
                acc.element(element);

                let mut record =
                    ExecutionRecord::new(source.clone(), FORMAT, element.name.trim(), acc.outcome())
                        .with_steps(acc.steps.clone())
                        .with_duration(Duration::from_nanos(acc.duration));
                record.feature_path = feature.uri.clone().filter(|u| !u.is_empty());
                record.feature_name = feature.name.clone().filter(|n| !n.is_empty());
                record.line = element.line;
                record.failure = acc.failure.take();
                records.push(record);
            }
        }

        tracing::debug!(path = %path.display(), records = records.len(), "cucumber json parsed");
        Ok(records)
    }
}
