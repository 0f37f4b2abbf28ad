//! Specification adapter over real feature files.

use std::fs;
use std::path::Path;

use livedoc_analysis::specification::{parse_directory, parse_file, parse_str};
use livedoc_core::config::ScanConfig;
use livedoc_core::errors::{PipelineError, SpecificationError};
use livedoc_core::model::{ScenarioKind, StepKeyword};

const FULL: &str = r#"@billing
Feature: Invoices
  Invoices are issued monthly.

  # owner: finance
  Background:
    Given a customer "ACME"

  Scenario: Issue invoice
    Given an order:
      | item | qty |
      | pen  | 2   |
    When the month closes
    And the invoice run starts
    But no credit note exists
    Then an invoice is sent:
      """
      Dear ACME
      """

  @slow
  Rule: Reminders
    Background:
      Given the invoice is overdue

    Scenario Outline: Remind after <days> days
      When <days> days pass
      Then a reminder is sent

      @first
      Examples: early
        | days |
        | 7    |
        | 14   |
"#;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

#[test]
fn test_full_feature_structure() {
    let feature = parse_str(FULL, "billing/invoices.feature").unwrap();

    assert_eq!(feature.name, "Invoices");
    assert_eq!(feature.language, "en");
    assert_eq!(feature.tags, vec!["billing"]);
    assert!(feature.description.contains("issued monthly"));
    assert_eq!(feature.comments, vec!["owner: finance"]);

    let background = feature.background.as_ref().unwrap();
    assert_eq!(background.steps.len(), 1);

    let scenario = &feature.scenarios[0];
    assert_eq!(scenario.kind, ScenarioKind::Plain);
    let keywords: Vec<StepKeyword> = scenario.steps.iter().map(|s| s.keyword).collect();
    assert_eq!(
        keywords,
        vec![
            StepKeyword::Given,
            StepKeyword::When,
            StepKeyword::And,
            StepKeyword::But,
            StepKeyword::Then
        ]
    );
    let table = scenario.steps[0].data_table.as_ref().unwrap();
    assert_eq!(table.rows, vec![vec!["item", "qty"], vec!["pen", "2"]]);
    assert_eq!(scenario.steps[4].doc_string.as_deref().map(str::trim), Some("Dear ACME"));

    let rule = &feature.rules[0];
    assert_eq!(rule.name, "Reminders");
    assert_eq!(rule.tags, vec!["slow"]);
    assert_eq!(feature.inherited_step_count(Some(rule)), 2);

    let outline = &rule.scenarios[0];
    assert_eq!(outline.kind, ScenarioKind::Outline);
    assert_eq!(outline.instance_count(), 2);
    let example = &outline.examples[0];
    assert_eq!(example.name, "early");
    assert_eq!(example.tags, vec!["first"]);
    assert_eq!(example.header, vec!["days"]);
    let lines: Vec<u32> = example.rows.iter().map(|r| r.line).collect();
    assert_eq!(lines, vec![33, 34]);
    let names: Vec<String> = outline.rows().map(|(e, r)| outline.instance_name(e, r)).collect();
    assert_eq!(names, vec!["Remind after 7 days", "Remind after 14 days"]);
}

#[test]
fn test_parsing_is_deterministic() {
    let first = parse_str(FULL, "invoices.feature").unwrap();
    let second = parse_str(FULL, "invoices.feature").unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_language_directive() {
    let text = "# language: fr\nFonctionnalité: Panier\n  Scénario: Ajouter\n    Soit un panier vide\n";
    let feature = parse_str(text, "panier.feature").unwrap();
    assert_eq!(feature.language, "fr");
    assert_eq!(feature.name, "Panier");
    assert_eq!(feature.scenarios[0].steps[0].keyword, StepKeyword::Given);
    assert!(feature.comments.is_empty());
}

#[test]
fn test_unknown_language_is_rejected() {
    let text = "# language: xx-nowhere\nFeature: F\n";
    assert!(matches!(
        parse_str(text, "f.feature"),
        Err(SpecificationError::UnsupportedLanguage { .. })
    ));
}

#[test]
fn test_grammar_error_names_the_file() {
    let err = parse_str("Given no feature here\n", "broken.feature").unwrap_err();
    assert!(matches!(err, SpecificationError::Grammar { .. }));
    assert_eq!(err.path().to_str(), Some("broken.feature"));
}

#[test]
fn test_duplicate_example_column_is_rejected() {
    let text = "\
Feature: Sums
  Scenario Outline: add <a>
    Given <a> plus <a>

    Examples:
      | a | a |
      | 1 | 2 |
";
    let err = parse_str(text, "sums.feature").unwrap_err();
    match err {
        SpecificationError::Grammar { path, message } => {
            assert_eq!(path.to_str(), Some("sums.feature"));
            assert!(message.contains("duplicate example column `a`"), "{message}");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_parse_file_checks_extension() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "notes.txt", "Feature: F\n");
    let err = parse_file(&dir.path().join("notes.txt"), Some(dir.path()), "feature").unwrap_err();
    assert!(matches!(err, SpecificationError::UnsupportedExtension { .. }));

    let missing = parse_file(&dir.path().join("gone.feature"), None, "feature").unwrap_err();
    assert!(matches!(missing, SpecificationError::NotFound { .. }));
}

#[test]
fn test_directory_skips_malformed_files() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "a.feature", "Feature: A\n  Scenario: one\n    Given x\n");
    write(dir.path(), "nested/b.feature", "Feature: B\n  Scenario: two\n    Given y\n");
    write(dir.path(), "nested/broken.feature", "this is not gherkin\n");
    write(dir.path(), "readme.md", "# not a feature\n");

    let result = parse_directory(dir.path(), &ScanConfig::default()).unwrap();

    let paths: Vec<&str> = result.data.iter().map(|f| f.path.as_str()).collect();
    assert_eq!(paths, vec!["a.feature", "nested/b.feature"]);
    assert_eq!(result.errors.len(), 1);
    assert!(matches!(result.errors[0], PipelineError::Specification(_)));
}

#[test]
fn test_directory_honours_ignore_file() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "keep.feature", "Feature: Keep\n");
    write(dir.path(), "drafts/skip.feature", "Feature: Skip\n");
    write(dir.path(), ".livedocignore", "drafts/\n");

    let result = parse_directory(dir.path(), &ScanConfig::default()).unwrap();
    assert_eq!(result.data.len(), 1);
    assert_eq!(result.data[0].name, "Keep");
}
