//! NUnit 3 XML (`test-run`), as produced for SpecFlow/Reqnroll features.
//!
//! SpecFlow generates one fixture per feature and one test method per
//! scenario; both carry the Gherkin title in a `Description` property.
//! Outline instances are `test-case`s under a `ParameterizedMethod`
//! suite. Per-step outcomes come from the SpecFlow trace in `output`.

use std::path::Path;
use std::sync::LazyLock;
use std::time::Duration;

use livedoc_core::errors::ResultError;
use livedoc_core::model::{ExecutionRecord, Outcome};
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;
use regex::Regex;

use super::xml::{attributes, cdata, end_tag, tag, text};
use super::{has_extension, read, seconds, sniff, ResultAdapter};

const FORMAT: &str = "nunit3";

static TRACE_LINE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?mi)^\s*->\s*(?P<status>done|error|pending|skipped|no matching step definition)",
    )
    .expect("static regex")
});

pub struct NUnitAdapter;

impl NUnitAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for NUnitAdapter {
    fn default() -> Self {
        Self::new()
    }
}

/// An open `test-suite` or `test-case` element.
#[derive(Default)]
struct Node {
    is_case: bool,
    kind: String,
    name: String,
    description: Option<String>,
    result: String,
    label: String,
    duration: Duration,
    message: String,
    output: String,
}

impl Node {
    fn open(e: &BytesStart<'_>, is_case: bool) -> Self {
        let mut attrs = attributes(e);
        Node {
            is_case,
            kind: attrs.remove("type").unwrap_or_default(),
            name: attrs.remove("name").unwrap_or_default(),
            result: attrs.remove("result").unwrap_or_default(),
            label: attrs.remove("label").unwrap_or_default(),
            duration: attrs.get("duration").map(|d| seconds(d)).unwrap_or_default(),
            ..Default::default()
        }
    }

    fn outcome(&self) -> Outcome {
        match self.result.to_ascii_lowercase().as_str() {
            "passed" | "warning" => Outcome::Passed,
            "failed" => Outcome::Failed,
            "inconclusive" => Outcome::Pending,
            "skipped" => Outcome::Skipped,
            other => Outcome::from_label(other)
                .or_else(|| Outcome::from_label(&self.label))
                .unwrap_or(Outcome::Undefined),
        }
    }
}

#[derive(Clone, Copy, PartialEq)]
enum Capture {
    None,
    Message,
    Output,
}

/// Method name without the argument list: `Eat("12","7",null)` → `Eat`.
fn method_name(name: &str) -> &str {
    name.split('(').next().unwrap_or(name).trim()
}

fn trace_outcome(label: &str) -> Outcome {
    match label.to_ascii_lowercase().as_str() {
        "done" => Outcome::Passed,
        "error" => Outcome::Failed,
        "pending" => Outcome::Pending,
        "skipped" => Outcome::Skipped,
        _ => Outcome::Undefined,
    }
}

fn finish_case(case: Node, ancestors: &[Node], source: &str) -> ExecutionRecord {
    let parameterized = ancestors
        .last()
        .filter(|n| n.kind.eq_ignore_ascii_case("ParameterizedMethod"));

    let scenario_name = case
        .description
        .clone()
        .or_else(|| parameterized.and_then(|p| p.description.clone()))
        .unwrap_or_else(|| {
            let owner = parameterized.map_or(case.name.as_str(), |p| p.name.as_str());
            method_name(owner).to_string()
        });

    let feature_name = ancestors
        .iter()
        .rev()
        .find(|n| n.kind.eq_ignore_ascii_case("TestFixture"))
        .map(|f| f.description.clone().unwrap_or_else(|| f.name.clone()));

    let steps: Vec<Outcome> = TRACE_LINE
        .captures_iter(&case.output)
        .map(|c| trace_outcome(&c["status"]))
        .collect();

    let mut record = ExecutionRecord::new(source, FORMAT, scenario_name.trim(), case.outcome())
        .with_steps(steps)
        .with_duration(case.duration);
    record.feature_name = feature_name.filter(|n| !n.is_empty());
    let message = case.message.trim();
    if !message.is_empty() {
        record.failure = Some(message.to_string());
    }
    record
}

impl ResultAdapter for NUnitAdapter {
    fn name(&self) -> &'static str {
        FORMAT
    }

    fn can_parse(&self, path: &Path) -> bool {
        has_extension(path, &["xml"]) && sniff(path).is_some_and(|head| head.contains("<test-run"))
    }

    fn parse(&self, path: &Path) -> Result<Vec<ExecutionRecord>, ResultError> {
        let content = read(path)?;
        let source = path.display().to_string();

        let mut reader = Reader::from_str(&content);
        reader.config_mut().trim_text(true);

        let mut records = Vec::new();
        let mut stack: Vec<Node> = Vec::new();
        let mut saw_root = false;
        let mut capture = Capture::None;

        loop {
            let event = reader
                .read_event()
                .map_err(|e| ResultError::malformed(path, FORMAT, e.to_string()))?;

            match event {
                Event::Start(e) => match tag(&e).as_str() {
                    "test-run" => saw_root = true,
                    "test-suite" => stack.push(Node::open(&e, false)),
                    "test-case" => stack.push(Node::open(&e, true)),
                    "message" if stack.last().is_some_and(|n| n.is_case) => {
                        capture = Capture::Message
                    }
                    "output" if stack.last().is_some_and(|n| n.is_case) => {
                        capture = Capture::Output
                    }
                    _ => {}
                },
                Event::Empty(e) => match tag(&e).as_str() {
                    "test-run" => saw_root = true,
                    "test-case" => {
                        let case = Node::open(&e, true);
                        records.push(finish_case(case, &stack, &source));
                    }
                    "property" => {
                        let mut attrs = attributes(&e);
                        let is_description = attrs
                            .get("name")
                            .is_some_and(|n| n.eq_ignore_ascii_case("Description"));
                        if let (true, Some(owner)) = (is_description, stack.last_mut()) {
                            owner.description = attrs.remove("value").filter(|v| !v.is_empty());
                        }
                    }
                    _ => {}
                },
                Event::Text(t) => append(&mut stack, capture, &text(&t)),
                Event::CData(c) => append(&mut stack, capture, &cdata(&c)),
                Event::End(e) => match end_tag(&e).as_str() {
                    "test-suite" => {
                        stack.pop();
                    }
                    "test-case" => {
                        if let Some(case) = stack.pop() {
                            records.push(finish_case(case, &stack, &source));
                        }
                        capture = Capture::None;
                    }
                    "message" | "output" => capture = Capture::None,
                    _ => {}
                },
                Event::Eof => break,
                _ => {}
            }
        }

        if !saw_root {
            return Err(ResultError::malformed(path, FORMAT, "no <test-run> element"));
        }
        tracing::debug!(path = %path.display(), records = records.len(), "nunit parsed");
        Ok(records)
    }
}

fn append(stack: &mut [Node], capture: Capture, chunk: &str) {
    let Some(case) = stack.last_mut().filter(|n| n.is_case) else {
        return;
    };
    let target = match capture {
        Capture::None => return,
        Capture::Message => &mut case.message,
        Capture::Output => &mut case.output,
    };
    if !target.is_empty() {
        target.push('\n');
    }
    target.push_str(chunk);
}

#[cfg(test)]
mod tests {
    use super::*;

    const REPORT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<test-run id="2" testcasecount="3" result="Failed">
  <test-suite type="Assembly" name="Shop.Specs.dll">
    <test-suite type="TestFixture" name="CheckoutFeature" fullname="Shop.Specs.CheckoutFeature">
      <properties>
        <property name="Description" value="Checkout" />
      </properties>
      <test-case name="PayByCard" fullname="Shop.Specs.CheckoutFeature.PayByCard" result="Failed" duration="0.25">
        <properties>
          <property name="Description" value="Pay by card" />
        </properties>
        <failure>
          <message><![CDATA[card declined]]></message>
        </failure>
        <output><![CDATA[Given a cart
-> done: Steps.GivenACart() (0.0s)
When I pay by card
-> error: card declined
Then I see a receipt
-> skipped because of previous errors
]]></output>
      </test-case>
      <test-suite type="ParameterizedMethod" name="Discount" result="Passed">
        <properties>
          <property name="Description" value="Apply discount" />
        </properties>
        <test-case name="Discount(&quot;gold&quot;,&quot;10&quot;,null)" result="Passed" duration="0.5" />
        <test-case name="Discount(&quot;silver&quot;,&quot;5&quot;,null)" result="Skipped" label="Ignored" duration="0" />
      </test-suite>
    </test-suite>
  </test-suite>
</test-run>"#;

    #[test]
    fn test_specflow_report() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("TestResult.xml");
        std::fs::write(&path, REPORT).unwrap();

        let adapter = NUnitAdapter::new();
        assert!(adapter.can_parse(&path));
        let records = adapter.parse(&path).unwrap();
        assert_eq!(records.len(), 3);

        let pay = &records[0];
        assert_eq!(pay.scenario_name, "Pay by card");
        assert_eq!(pay.feature_name.as_deref(), Some("Checkout"));
        assert_eq!(pay.outcome, Outcome::Failed);
        assert_eq!(pay.steps, vec![Outcome::Passed, Outcome::Failed, Outcome::Skipped]);
        assert_eq!(pay.failure.as_deref(), Some("card declined"));

        assert_eq!(records[1].scenario_name, "Apply discount");
        assert_eq!(records[1].outcome, Outcome::Passed);
        assert_eq!(records[2].scenario_name, "Apply discount");
        assert_eq!(records[2].outcome, Outcome::Skipped);
    }

    #[test]
    fn test_method_name_strips_arguments() {
        assert_eq!(method_name("Discount(\"gold\",\"10\",null)"), "Discount");
        assert_eq!(method_name("PayByCard"), "PayByCard");
    }

    #[test]
    fn test_trace_outcomes() {
        assert_eq!(trace_outcome("No matching step definition"), Outcome::Undefined);
        assert_eq!(trace_outcome("pending"), Outcome::Pending);
    }
}
