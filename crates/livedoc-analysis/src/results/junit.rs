//! JUnit XML (`testsuites` / `testsuite` / `testcase`).
//!
//! Understands two Gherkin-specific conventions on top of plain JUnit:
//! - cucumber-rs case names `[Rule: R: ]Scenario: name: path:line:col`
//! - cucumber-jvm `system-out` step listings (`Given x.......passed`)

use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use livedoc_core::errors::ResultError;
use livedoc_core::model::{ExecutionRecord, Outcome};
use quick_xml::events::Event;
use quick_xml::Reader;
use regex::Regex;

use super::xml::{attributes, cdata, end_tag, tag, text};
use super::{has_extension, read, seconds, sniff, ResultAdapter};

const FORMAT: &str = "junit";

static CUCUMBER_RS_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:Rule: (?P<rule>.*?): )?Scenario: (?P<name>.*): (?:(?P<path>.+):)?(?P<line>\d+):(?P<col>\d+)$",
    )
    .expect("static regex")
});

static STEP_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?m)^\s*\S+\s.*?\.{3,}\s*(?P<status>[A-Za-z_]+)\s*$").expect("static regex")
});

pub struct JUnitAdapter;

impl JUnitAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JUnitAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// What character data currently belongs to.
#[derive(Clone, Copy, PartialEq)]
enum Capture {
    None,
    Failure,
    Skipped,
    SystemOut,
}

#[derive(Default)]
struct Case {
    name: String,
    classname: Option<String>,
    suite: Option<String>,
    file: Option<String>,
    line: Option<u32>,
    duration: Duration,
    outcome: Option<Outcome>,
    message: Option<String>,
    body: String,
    system_out: String,
}

impl Case {
    fn from_attributes(e: &quick_xml::events::BytesStart<'_>, suite: Option<&String>) -> Self {
        let mut attrs = attributes(e);
        Case {
            name: attrs.remove("name").unwrap_or_default(),
            classname: attrs.remove("classname").filter(|c| !c.is_empty()),
            suite: suite.cloned(),
            file: attrs.remove("file").filter(|f| !f.is_empty()),
            line: attrs.get("line").and_then(|l| l.trim().parse().ok()),
            duration: attrs.get("time").map(|t| seconds(t)).unwrap_or_default(),
            ..Default::default()
        }
    }

    fn fail(&mut self, e: &quick_xml::events::BytesStart<'_>) {
        self.outcome = Some(Outcome::Failed);
        if self.message.is_none() {
            self.message = attributes(e).remove("message").filter(|m| !m.is_empty());
        }
    }

    fn skip(&mut self, e: &quick_xml::events::BytesStart<'_>) {
        let message = attributes(e).remove("message").unwrap_or_default();
        let lower = message.to_lowercase();
        let outcome = if lower.contains("pending") {
            Outcome::Pending
        } else if lower.contains("undefined") {
            Outcome::Undefined
        } else {
            Outcome::Skipped
        };
        self.outcome = Some(self.outcome.map_or(outcome, |o| o.worst(outcome)));
        if self.message.is_none() && !message.is_empty() {
            self.message = Some(message);
        }
    }

    fn into_record(self, source: &str) -> ExecutionRecord {
        let steps: Vec<Outcome> = STEP_LINE
            .captures_iter(&self.system_out)
            .filter_map(|c| Outcome::from_label(&c["status"]))
            .collect();

        let mut outcome = self.outcome.unwrap_or(Outcome::Passed);
        if let Some(worst) = steps.iter().copied().reduce(Outcome::worst) {
            outcome = outcome.worst(worst);
        }

        let mut record = ExecutionRecord::new(source, FORMAT, self.name.trim(), outcome)
            .with_steps(steps)
            .with_duration(self.duration);

        if let Some(caps) = CUCUMBER_RS_NAME.captures(&self.name) {
            record.scenario_name = caps["name"].trim().to_string();
            record.feature_path = caps.name("path").map(|p| p.as_str().to_string());
            record.line = caps["line"].parse().ok();
        } else {
            record.line = self.line;
            record.feature_path = self
                .file
                .filter(|f| f.to_ascii_lowercase().ends_with(".feature"));
        }

        record.feature_name = self
            .classname
            .or_else(|| self.suite.as_deref().and_then(suite_feature_name));

        let body = self.body.trim();
        record.failure = self
            .message
            .or_else(|| (!body.is_empty()).then(|| body.to_string()));
        record
    }
}

/// Feature title from a cucumber-rs suite name `Feature: title[: path]`.
fn suite_feature_name(suite: &str) -> Option<String> {
    let rest = suite.strip_prefix("Feature: ")?;
    let title = rest.split(": ").next().unwrap_or(rest).trim();
    (!title.is_empty()).then(|| title.to_string())
}

impl ResultAdapter for JUnitAdapter {
    fn name(&self) -> &'static str {
        FORMAT
    }

    fn can_parse(&self, path: &Path) -> bool {
        has_extension(path, &["xml"]) && sniff(path).is_some_and(|head| head.contains("<testsuite"))
    }

    fn parse(&self, path: &Path) -> Result<Vec<ExecutionRecord>, ResultError> {
        let content = read(path)?;
        let source = path.display().to_string();

        let mut reader = Reader::from_str(&content);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut suites: Vec<String> = Vec::new();
        let mut saw_root = false;
        let mut current: Option<Case> = None;
        let mut capture = Capture::None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ResultError::malformed(path, FORMAT, e.to_string()))?;

            match event {
                Event::Start(e) => match tag(&e).as_str() {
                    "testsuites" => saw_root = true,
                    "testsuite" => {
                        saw_root = true;
                        suites.push(attributes(&e).remove("name").unwrap_or_default());
                    }
                    "testcase" => current = Some(Case::from_attributes(&e, suites.last())),
                    "failure" | "error" => {
                        if let Some(case) = current.as_mut() {
                            case.fail(&e);
                            capture = Capture::Failure;
                        }
                    }
                    "skipped" => {
                        if let Some(case) = current.as_mut() {
                            case.skip(&e);
                            capture = Capture::Skipped;
                        }
                    }
                    "system-out" if current.is_some() => capture = Capture::SystemOut,
                    _ => {}
                },
                Event::Empty(e) => match tag(&e).as_str() {
                    "testsuites" | "testsuite" => saw_root = true,
                    "testcase" => {
                        let case = Case::from_attributes(&e, suites.last());
                        records.push(case.into_record(&source));
                    }
                    "failure" | "error" => {
                        if let Some(case) = current.as_mut() {
                            case.fail(&e);
                        }
                    }
                    "skipped" => {
                        if let Some(case) = current.as_mut() {
                            case.skip(&e);
                        }
                    }
                    _ => {}
                },
                Event::Text(t) => append(&mut current, capture, &text(&t)),
                Event::CData(c) => append(&mut current, capture, &cdata(&c)),
                Event::End(e) => match end_tag(&e).as_str() {
                    "testsuite" => {
                        suites.pop();
                    }
                    "testcase" => {
                        if let Some(case) = current.take() {
                            records.push(case.into_record(&source));
                        }
                        capture = Capture::None;
                    }
                    "failure" | "error" | "skipped" | "system-out" => capture = Capture::None,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(ResultError::malformed(path, FORMAT, "no <testsuite> element"));
        }
        tracing::debug!(path = %path.display(), records = records.len(), "junit parsed");
        Ok(records)
    }
}

fn append(current: &mut Option<Case>, capture: Capture, chunk: &str) {
    let Some(case) = current.as_mut() else {
        return;
    };
    let target = match capture {
        Capture::None => return,
        Capture::Failure | Capture::Skipped => &mut case.body,
        Capture::SystemOut => &mut case.system_out,
    };
    if !target.is_empty() {
        target.push('\n');
    }
    target.push_str(chunk);
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(content: &str) -> (tempfile::TempDir, std::path::PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TEST-cucumber.xml");
        std::fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_cucumber_jvm_steps_from_system_out() {
        let (_dir, path) = write(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<testsuite name="io.cucumber.core.plugin.JUnitFormatter" tests="2" failures="1">
  <testcase classname="Eating" name="eat some" time="0.500">
    <failure message="expected 7 but was 8" type="java.lang.AssertionError"><![CDATA[stack]]></failure>
    <system-out><![CDATA[Given there are 12 cucumbers.........................passed
When I eat 5 cucumbers......................................failed
Then I should have 7 cucumbers..............................skipped
]]></system-out>
  </testcase>
  <testcase classname="Eating" name="eat none" time="0.010"/>
</testsuite>"#,
        );
        let adapter = JUnitAdapter::new();
        assert!(adapter.can_parse(&path));
        let records = adapter.parse(&path).unwrap();
        assert_eq!(records.len(), 2);

        let failed = &records[0];
        assert_eq!(failed.scenario_name, "eat some");
        assert_eq!(failed.feature_name.as_deref(), Some("Eating"));
        assert_eq!(failed.outcome, Outcome::Failed);
        assert_eq!(failed.steps, vec![Outcome::Passed, Outcome::Failed, Outcome::Skipped]);
        assert_eq!(failed.failure.as_deref(), Some("expected 7 but was 8"));
        assert_eq!(failed.duration, Duration::from_millis(500));

        assert_eq!(records[1].outcome, Outcome::Passed);
        assert!(records[1].steps.is_empty());
    }

    #[test]
    fn test_cucumber_rs_case_names() {
        let (_dir, path) = write(
            r#"<testsuites>
  <testsuite name="Feature: Animals: features/animals.feature">
    <testcase name="Rule: Cats: Scenario: hungry cat: features/animals.feature:12:5" time="0.001"/>
    <testcase name="Scenario: sleepy dog: features/animals.feature:20:3" time="0.001">
      <skipped/>
    </testcase>
  </testsuite>
</testsuites>"#,
        );
        let records = JUnitAdapter::new().parse(&path).unwrap();
        assert_eq!(records[0].scenario_name, "hungry cat");
        assert_eq!(records[0].feature_path.as_deref(), Some("features/animals.feature"));
        assert_eq!(records[0].line, Some(12));
        assert_eq!(records[0].feature_name.as_deref(), Some("Animals"));
        assert_eq!(records[1].scenario_name, "sleepy dog");
        assert_eq!(records[1].outcome, Outcome::Skipped);
    }

    #[test]
    fn test_pending_skip_message() {
        let (_dir, path) = write(
            r#"<testsuite name="s"><testcase classname="F" name="p"><skipped message="The scenario has pending or undefined step(s)"/></testcase></testsuite>"#,
        );
        let records = JUnitAdapter::new().parse(&path).unwrap();
        assert_eq!(records[0].outcome, Outcome::Pending);
    }

    #[test]
    fn test_broken_xml_is_malformed() {
        let (_dir, path) = write("<testsuite name=\"s\"><testcase name=\"a\"></testsuite>");
        let adapter = JUnitAdapter::new();
        assert!(adapter.can_parse(&path));
        assert!(matches!(adapter.parse(&path), Err(ResultError::Malformed { .. })));
    }
}
