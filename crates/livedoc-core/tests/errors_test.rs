//! Tests for error codes and non-fatal error collection.

use std::path::PathBuf;

use livedoc_core::errors::{
    ConfigError, LivedocErrorCode, PipelineError, PipelineResult, ResultError, ScanError,
    SpecificationError,
};

#[test]
fn test_every_variant_has_a_code() {
    let errors: Vec<PipelineError> = vec![
        SpecificationError::NotFound { path: "a.feature".into() }.into(),
        SpecificationError::UnsupportedExtension {
            path: "a.txt".into(),
            expected: "feature".into(),
        }
        .into(),
        SpecificationError::UnsupportedLanguage {
            path: "a.feature".into(),
            language: "xx".into(),
        }
        .into(),
        SpecificationError::Grammar {
            path: "a.feature".into(),
            message: "unexpected".into(),
        }
        .into(),
        ResultError::malformed("r.xml", "junit", "no testsuite").into(),
        ScanError::DirectoryNotFound { path: "missing".into() }.into(),
        ConfigError::FileNotFound { path: "livedoc.toml".into() }.into(),
        PipelineError::NoSpecifications { root: "specs".into() },
    ];

    let codes: Vec<&str> = errors.iter().map(|e| e.error_code()).collect();
    assert_eq!(
        codes,
        vec![
            "SPEC_NOT_FOUND",
            "SPEC_UNSUPPORTED_EXTENSION",
            "SPEC_UNSUPPORTED_LANGUAGE",
            "SPEC_PARSE_ERROR",
            "RESULT_PARSE_ERROR",
            "SCAN_ERROR",
            "CONFIG_ERROR",
            "NO_SPECIFICATIONS",
        ]
    );
}

#[test]
fn test_coded_string_names_the_file() {
    let err = SpecificationError::Grammar {
        path: PathBuf::from("specs/checkout.feature"),
        message: "expected Feature".into(),
    };
    let coded = err.coded_string();
    assert!(coded.starts_with("[SPEC_PARSE_ERROR] "));
    assert!(coded.contains("specs/checkout.feature"));
    assert_eq!(err.path(), &PathBuf::from("specs/checkout.feature"));
}

#[test]
fn test_result_error_path() {
    let err = ResultError::Io {
        path: "out/cucumber.json".into(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
    };
    assert_eq!(err.path(), &PathBuf::from("out/cucumber.json"));
    assert_eq!(err.error_code(), "IO_ERROR");
}

#[test]
fn test_pipeline_result_collects_errors() {
    let mut result: PipelineResult<Vec<u32>> = PipelineResult::new(vec![1, 2]);
    assert!(result.is_clean());

    result.add_error(ResultError::malformed("bad.json", "cucumber-json", "not an array"));
    result.add_error(ScanError::NotADirectory { path: "file.txt".into() });

    assert!(!result.is_clean());
    assert_eq!(result.error_count(), 2);
    assert_eq!(result.data, vec![1, 2]);
}
