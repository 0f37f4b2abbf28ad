//! End-to-end generation from directories on disk.

use std::fs;
use std::path::Path;

use chrono::{TimeZone, Utc};
use livedoc_analysis::correlation::WarningKind;
use livedoc_analysis::pipeline::{collect_result_files, generate, GenerationRequest};
use livedoc_core::config::{LivedocConfig, ScanConfig};
use livedoc_core::errors::{LivedocErrorCode, PipelineError, ScanError};
use livedoc_core::model::Status;

const CHECKOUT: &str = "\
@shop
Feature: Checkout
  Scenario: Pay by card
    Given a cart
    When I pay
    Then it is paid

  Scenario Outline: Pay <amount>
    Given <amount> in the cart
    Examples:
      | amount |
      | 5      |
      | 10     |
";

const RESULTS: &str = r#"{ "records": [
  { "feature_path": "features/checkout.feature", "scenario": "Pay by card",
    "outcome": "failed", "steps": ["passed", "failed", "skipped"], "failure": "declined" },
  { "feature_path": "features/checkout.feature", "scenario": "Pay 5", "outcome": "passed" },
  { "scenario": "Somewhere else", "outcome": "passed" }
] }"#;

fn write(dir: &Path, name: &str, content: &str) {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, content).unwrap();
}

fn project() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "features/checkout.feature", CHECKOUT);
    write(dir.path(), "results/run.json", RESULTS);
    dir
}

fn at() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap()
}

#[test]
fn test_generates_decorated_document() {
    let dir = project();
    let request = GenerationRequest::new(dir.path().join("features")).with_results(dir.path().join("results"));

    let result = generate(&request, at()).unwrap();
    let doc = &result.data;

    assert!(result.is_clean());
    assert_eq!(doc.features.len(), 1);
    let feature = &doc.features[0];
    assert_eq!(feature.path, "checkout.feature");
    assert_eq!(feature.status, Status::Failed);
    assert_eq!(feature.scenarios[0].status, Status::Failed);
    assert_eq!(feature.scenarios[1].status, Status::Passed);

    assert_eq!(doc.summary.scenarios.total, 3);
    assert_eq!(doc.summary.scenarios.failed, 1);
    assert_eq!(doc.summary.scenarios.passed, 1);
    assert_eq!(doc.summary.scenarios.not_executed, 1);
    assert_eq!(doc.summary.by_tag["shop"].total, 3);

    assert_eq!(doc.warnings.len(), 1);
    assert_eq!(doc.warnings[0].kind, WarningKind::UnmatchedRecord);
    assert_eq!(doc.generated_at, at());
}

#[test]
fn test_generation_is_deterministic() {
    let dir = project();
    let request = GenerationRequest::new(dir.path().join("features")).with_results(dir.path().join("results"));
    let first = generate(&request, at()).unwrap().data;
    let second = generate(&request, at()).unwrap().data;
    assert_eq!(first, second);
    assert_eq!(first.to_json().unwrap(), second.to_json().unwrap());
}

#[test]
fn test_no_results_leaves_everything_not_executed() {
    let dir = project();
    let request = GenerationRequest::new(dir.path().join("features"));
    let doc = generate(&request, at()).unwrap().data;
    assert_eq!(doc.features[0].status, Status::NotExecuted);
    assert_eq!(doc.summary.scenarios.not_executed, 3);
    assert_eq!(doc.warnings.len(), 2);
    assert!(doc.warnings.iter().all(|w| w.kind == WarningKind::NotExecuted));
}

#[test]
fn test_verbose_reports_missing_instances() {
    let dir = project();
    let mut config = LivedocConfig::default();
    config.generation.verbose = Some(true);
    let request = GenerationRequest::new(dir.path().join("features"))
        .with_results(dir.path().join("results/run.json"))
        .with_config(config);

    let doc = generate(&request, at()).unwrap().data;
    assert!(doc
        .warnings
        .iter()
        .any(|w| w.kind == WarningKind::NotExecuted && w.message.contains("1 of 2")));
}

#[test]
fn test_bad_inputs_are_reported_not_fatal() {
    let dir = project();
    write(dir.path(), "features/broken.feature", "not gherkin\n");
    write(dir.path(), "results/broken.json", r#"{ "records": "nope" }"#);
    write(dir.path(), "results/coverage.xml", "<coverage/>");
    let request = GenerationRequest::new(dir.path().join("features")).with_results(dir.path().join("results"));

    let result = generate(&request, at()).unwrap();
    let doc = &result.data;

    assert_eq!(doc.features.len(), 1);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(doc.input_errors.len(), 2);
    assert!(doc.input_errors.iter().any(|e| e.path.as_deref().is_some_and(|p| p.ends_with("broken.feature"))));
    assert_eq!(doc.unrecognized_results.len(), 1);
    assert!(!doc.is_complete());
}

#[test]
fn test_missing_features_dir_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    let request = GenerationRequest::new(dir.path().join("nowhere"));
    let err = generate(&request, at()).unwrap_err();
    assert!(matches!(err, PipelineError::Scan(ScanError::DirectoryNotFound { .. })));
}

#[test]
fn test_missing_results_path_is_fatal() {
    let dir = project();
    let request = GenerationRequest::new(dir.path().join("features")).with_results(dir.path().join("absent"));
    let err = generate(&request, at()).unwrap_err();
    assert!(matches!(err, PipelineError::Scan(ScanError::DirectoryNotFound { .. })));
}

#[test]
fn test_empty_specification_tree_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    write(dir.path(), "features/readme.md", "nothing here");
    let request = GenerationRequest::new(dir.path().join("features"));
    let err = generate(&request, at()).unwrap_err();
    assert!(matches!(err, PipelineError::NoSpecifications { .. }));
    assert!(!err.error_code().is_empty());
}

#[test]
fn test_explicit_thread_count() {
    let dir = project();
    let mut config = LivedocConfig::default();
    config.scan.threads = Some(2);
    let request = GenerationRequest::new(dir.path().join("features"))
        .with_results(dir.path().join("results"))
        .with_config(config);
    let doc = generate(&request, at()).unwrap().data;
    assert_eq!(doc.features[0].status, Status::Failed);
}

#[test]
fn test_result_files_are_collected_once() {
    let dir = project();
    write(dir.path(), "results/nested/junit.xml", "<testsuite/>");
    write(dir.path(), "results/notes.txt", "x");
    let inputs = vec![dir.path().join("results"), dir.path().join("results/run.json")];

    let (files, errors) = collect_result_files(&inputs, &ScanConfig::default()).unwrap();

    assert!(errors.is_empty());
    let names: Vec<String> = files
        .iter()
        .map(|f| f.strip_prefix(dir.path()).unwrap().to_string_lossy().replace('\\', "/"))
        .collect();
    assert_eq!(names, vec!["results/nested/junit.xml", "results/run.json"]);
}
