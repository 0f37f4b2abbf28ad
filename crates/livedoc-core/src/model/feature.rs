//! Specification entities: feature, rule, background, scenario, example, step.

use serde::{Deserialize, Serialize};

use super::run::ScenarioRun;
use super::status::Status;

/// One parsed specification file.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Feature {
    /// Feature title. Empty when the file gives none.
    pub name: String,
    pub description: String,
    /// Grammar language used for keywords (`en` unless the file declares one).
    pub language: String,
    /// Path relative to the scanned specification root, `/`-separated.
    pub path: String,
    /// Tags without the leading `@`.
    pub tags: Vec<String>,
    /// Free-text `#` comments in source order (language directive excluded).
    pub comments: Vec<String>,
    pub background: Option<Background>,
    pub rules: Vec<Rule>,
    pub scenarios: Vec<Scenario>,
    pub status: Status,
}

/// A rule or top-level scenario, in declaration order.
#[derive(Debug, Clone, Copy)]
pub enum FeatureChild<'a> {
    Rule(&'a Rule),
    Scenario(&'a Scenario),
}

impl FeatureChild<'_> {
    fn line(&self) -> u32 {
        match self {
            FeatureChild::Rule(r) => r.line,
            FeatureChild::Scenario(s) => s.line,
        }
    }
}

impl Feature {
    /// Rules and top-level scenarios interleaved in declaration order.
    pub fn children(&self) -> Vec<FeatureChild<'_>> {
        let mut children: Vec<FeatureChild<'_>> = self
            .rules
            .iter()
            .map(FeatureChild::Rule)
            .chain(self.scenarios.iter().map(FeatureChild::Scenario))
            .collect();
        children.sort_by_key(|c| c.line());
        children
    }

    /// Every scenario of the feature with the rule that owns it, if any.
    pub fn all_scenarios(&self) -> impl Iterator<Item = (Option<&Rule>, &Scenario)> {
        self.scenarios.iter().map(|s| (None, s)).chain(
            self.rules
                .iter()
                .flat_map(|r| r.scenarios.iter().map(move |s| (Some(r), s))),
        )
    }

    /// Number of background steps a scenario inherits, given its owning rule.
    pub fn inherited_step_count(&self, rule: Option<&Rule>) -> usize {
        let feature_steps = self.background.as_ref().map_or(0, |b| b.steps.len());
        let rule_steps = rule
            .and_then(|r| r.background.as_ref())
            .map_or(0, |b| b.steps.len());
        feature_steps + rule_steps
    }

    /// Inherited background steps for a scenario under `rule`:
    /// feature background first, then the rule background.
    pub fn inherited_steps<'a>(&'a self, rule: Option<&'a Rule>) -> Vec<&'a Step> {
        self.background
            .iter()
            .chain(rule.and_then(|r| r.background.as_ref()))
            .flat_map(|b| b.steps.iter())
            .collect()
    }
}

/// A `Rule:` block grouping scenarios under a business rule.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Rule {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub line: u32,
    pub background: Option<Background>,
    pub scenarios: Vec<Scenario>,
    pub status: Status,
}

/// Steps implicitly prepended to every scenario in scope.
/// Carries no status: results are recorded per scenario instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Background {
    pub name: String,
    pub description: String,
    pub line: u32,
    pub steps: Vec<Step>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioKind {
    #[default]
    Plain,
    Outline,
}

/// A scenario, or a scenario outline with its example tables.
///
/// `examples` is non-empty exactly when `kind` is `Outline`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    pub description: String,
    pub tags: Vec<String>,
    pub line: u32,
    pub kind: ScenarioKind,
    pub steps: Vec<Step>,
    pub examples: Vec<Example>,
    /// Result of the single instance of a plain scenario.
    /// Outline instances keep theirs on each [`ExampleRow`].
    pub run: ScenarioRun,
    pub status: Status,
}

impl Scenario {
    pub fn is_outline(&self) -> bool {
        self.kind == ScenarioKind::Outline
    }

    /// Number of concrete instances: 1 for a plain scenario, one per data
    /// row for an outline.
    pub fn instance_count(&self) -> usize {
        if self.is_outline() {
            self.examples.iter().map(|e| e.rows.len()).sum()
        } else {
            1
        }
    }

    /// Example rows across all example blocks, in declaration order.
    pub fn rows(&self) -> impl Iterator<Item = (&Example, &ExampleRow)> {
        self.examples
            .iter()
            .flat_map(|e| e.rows.iter().map(move |r| (e, r)))
    }

    /// Scenario name with `<placeholder>` tokens bound from one row.
    pub fn instance_name(&self, example: &Example, row: &ExampleRow) -> String {
        bind_placeholders(&self.name, &example.header, &row.cells)
    }
}

/// One `Examples:` block of an outline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Example {
    pub name: String,
    pub tags: Vec<String>,
    pub line: u32,
    /// Column names; unique within the row.
    pub header: Vec<String>,
    pub rows: Vec<ExampleRow>,
    pub status: Status,
}

/// One data row of an example table: a concrete scenario instance.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ExampleRow {
    /// Source line of the row, used to correlate results that identify
    /// outline instances by line.
    pub line: u32,
    /// Cell values; same length as the owning example's header.
    pub cells: Vec<String>,
    pub run: ScenarioRun,
}

impl ExampleRow {
    /// Value of `column` in this row.
    pub fn value<'a>(&'a self, header: &[String], column: &str) -> Option<&'a str> {
        header
            .iter()
            .position(|h| h == column)
            .and_then(|i| self.cells.get(i))
            .map(String::as_str)
    }
}

/// Normalized step keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum StepKeyword {
    #[default]
    Given,
    When,
    Then,
    And,
    But,
}

impl StepKeyword {
    pub fn name(self) -> &'static str {
        match self {
            StepKeyword::Given => "Given",
            StepKeyword::When => "When",
            StepKeyword::Then => "Then",
            StepKeyword::And => "And",
            StepKeyword::But => "But",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DataTable {
    /// Row 0 is conventionally a header but is not treated specially.
    pub rows: Vec<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Step {
    pub keyword: StepKeyword,
    /// Keyword as written in the file (may be localized).
    pub keyword_text: String,
    /// Step text; may contain `<placeholder>` tokens in outlines.
    pub text: String,
    pub line: u32,
    pub doc_string: Option<String>,
    pub data_table: Option<DataTable>,
    /// For plain scenarios the step's own status; for outline templates the
    /// rollup of that step across all rows. Background steps stay
    /// `NotExecuted` (see [`ScenarioRun::background_steps`]).
    pub status: Status,
}

impl Step {
    /// Step text with placeholders bound from one example row.
    pub fn bound_text(&self, header: &[String], cells: &[String]) -> String {
        bind_placeholders(&self.text, header, cells)
    }
}

fn bind_placeholders(template: &str, header: &[String], cells: &[String]) -> String {
    if !template.contains('<') {
        return template.to_string();
    }
    header
        .iter()
        .zip(cells)
        .fold(template.to_string(), |acc, (name, value)| {
            acc.replace(&format!("<{name}>"), value)
        })
}
