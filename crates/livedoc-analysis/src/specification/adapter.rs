//! Syntax tree → Universal Specification Model.

use livedoc_core::model::{
    Background, DataTable, Example, ExampleRow, Feature, Rule, Scenario, ScenarioKind,
    ScenarioRun, Step, StepKeyword,
};

use super::source::{table_row_lines, SourceInfo};

/// Localised `But` keywords. Any other continuation keyword is `And`.
const BUT_KEYWORDS: &[&str] = &[
    "but", "mais", "aber", "pero", "ma", "maar", "men", "mutta", "ale", "но", "但是",
];

/// Build a [`Feature`] from one parsed file.
///
/// `path` is stored as given; `source` is the file text the tree came from,
/// used to recover comments and example row lines.
pub fn convert(tree: &gherkin::Feature, source: &str, path: &str, language: &str) -> Feature {
    let info = SourceInfo::scan(source);

    Feature {
        name: tree.name.trim().to_string(),
        description: text(tree.description.clone()),
        language: language.to_string(),
        path: path.to_string(),
        tags: tags(&tree.tags),
        comments: info.comments,
        background: tree.background.as_ref().map(background),
        rules: tree.rules.iter().map(|r| rule(r, source)).collect(),
        scenarios: tree.scenarios.iter().map(|s| scenario(s, source)).collect(),
        status: Default::default(),
    }
}

fn rule(tree: &gherkin::Rule, source: &str) -> Rule {
    Rule {
        name: tree.name.trim().to_string(),
        description: text(tree.description.clone()),
        tags: tags(&tree.tags),
        line: tree.position.line as u32,
        background: tree.background.as_ref().map(background),
        scenarios: tree.scenarios.iter().map(|s| scenario(s, source)).collect(),
        status: Default::default(),
    }
}

fn background(tree: &gherkin::Background) -> Background {
    Background {
        name: text(tree.name.clone()),
        description: text(tree.description.clone()),
        line: tree.position.line as u32,
        steps: steps(&tree.steps),
    }
}

fn scenario(tree: &gherkin::Scenario, source: &str) -> Scenario {
    // Blocks without a table contribute no instances.
    let examples: Vec<Example> = tree
        .examples
        .iter()
        .filter_map(|e| example(e, source))
        .collect();
    let kind = if examples.is_empty() {
        ScenarioKind::Plain
    } else {
        ScenarioKind::Outline
    };
    let steps = steps(&tree.steps);

    Scenario {
        name: tree.name.trim().to_string(),
        description: text(tree.description.clone()),
        tags: tags(&tree.tags),
        line: tree.position.line as u32,
        kind,
        run: ScenarioRun::default(),
        steps,
        examples,
        status: Default::default(),
    }
}

fn example(tree: &gherkin::Examples, source: &str) -> Option<Example> {
    let table = tree.table.as_ref()?;
    let (header, body) = table.rows.split_first()?;
    let header: Vec<String> = header.iter().map(|c| c.trim().to_string()).collect();

    let line = tree.position.line as u32;
    let row_lines = table_row_lines(source, tree.position.line);

    let rows = body
        .iter()
        .enumerate()
        .map(|(i, cells)| ExampleRow {
            // Row 0 of `row_lines` is the header.
            line: row_lines.get(i + 1).copied().unwrap_or(line),
            cells: cells.iter().map(|c| c.trim().to_string()).collect(),
            run: ScenarioRun::default(),
        })
        .collect();

    Some(Example {
        name: text(tree.name.clone()),
        tags: tags(&tree.tags),
        line,
        header,
        rows,
        status: Default::default(),
    })
}

fn steps(tree: &[gherkin::Step]) -> Vec<Step> {
    let mut out = Vec::with_capacity(tree.len());
    // Keyword text and type that opened the current run of same-typed steps.
    let mut run_head: Option<(&str, gherkin::StepType)> = None;

    for s in tree {
        let keyword_text = s.keyword.trim();
        let keyword = match run_head {
            Some((head, ty)) if ty == s.ty && (keyword_text != head || keyword_text == "*") => {
                continuation(keyword_text)
            }
            _ => {
                run_head = Some((keyword_text, s.ty));
                primary(s.ty)
            }
        };

        out.push(Step {
            keyword,
            keyword_text: keyword_text.to_string(),
            text: s.value.trim().to_string(),
            line: s.position.line as u32,
            doc_string: s.docstring.clone(),
            data_table: s.table.as_ref().map(|t| DataTable {
                rows: t
                    .rows
                    .iter()
                    .map(|r| r.iter().map(|c| c.trim().to_string()).collect())
                    .collect(),
            }),
            status: Default::default(),
        });
    }
    out
}

fn primary(ty: gherkin::StepType) -> StepKeyword {
    match ty {
        gherkin::StepType::Given => StepKeyword::Given,
        gherkin::StepType::When => StepKeyword::When,
        gherkin::StepType::Then => StepKeyword::Then,
    }
}

fn continuation(keyword_text: &str) -> StepKeyword {
    let lower = keyword_text.to_lowercase();
    if BUT_KEYWORDS.contains(&lower.as_str()) {
        StepKeyword::But
    } else {
        StepKeyword::And
    }
}

/// Optional or plain grammar text, trimmed, absence as empty.
fn text(value: impl Into<Option<String>>) -> String {
    value
        .into()
        .map(|s| s.trim().to_string())
        .unwrap_or_default()
}

fn tags(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|t| t.trim().trim_start_matches('@').to_string())
        .filter(|t| !t.is_empty())
        .collect()
}
