//! File and directory entry points of the specification adapter.

use std::path::{Component, Path};

use livedoc_core::config::ScanConfig;
use livedoc_core::constants::DEFAULT_LANGUAGE;
use livedoc_core::errors::{PipelineResult, ScanError, SpecificationError};
use livedoc_core::model::Feature;
use rayon::prelude::*;
use rustc_hash::FxHashSet;

use super::adapter::convert;
use super::source::SourceInfo;
use crate::scanner::{ScanOptions, Scanner};

/// Parse feature text. `path` labels the result and any error.
pub fn parse_str(content: &str, path: &str) -> Result<Feature, SpecificationError> {
    let info = SourceInfo::scan(content);
    let language = info.language.as_deref().unwrap_or(DEFAULT_LANGUAGE);

    let env = gherkin::GherkinEnv::new(language).map_err(|_| {
        SpecificationError::UnsupportedLanguage {
            path: path.into(),
            language: language.to_string(),
        }
    })?;

    let tree = gherkin::Feature::parse(content, env).map_err(|e| SpecificationError::Grammar {
        path: path.into(),
        message: e.to_string(),
    })?;

    let feature = convert(&tree, content, path, language);
    if let Some(column) = duplicate_column(&feature) {
        return Err(SpecificationError::Grammar {
            path: path.into(),
            message: format!("duplicate example column `{column}`"),
        });
    }
    Ok(feature)
}

/// First example header cell that repeats within its row.
fn duplicate_column(feature: &Feature) -> Option<&str> {
    feature
        .all_scenarios()
        .flat_map(|(_, scenario)| scenario.examples.iter())
        .find_map(|example| {
            let mut seen = FxHashSet::default();
            example
                .header
                .iter()
                .find(|column| !seen.insert(column.as_str()))
                .map(String::as_str)
        })
}

/// Parse one feature file. The stored path is relative to `root` when given.
pub fn parse_file(
    file: &Path,
    root: Option<&Path>,
    extension: &str,
) -> Result<Feature, SpecificationError> {
    if !file.is_file() {
        return Err(SpecificationError::NotFound {
            path: file.to_path_buf(),
        });
    }
    let matches_ext = file
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension));
    if !matches_ext {
        return Err(SpecificationError::UnsupportedExtension {
            path: file.to_path_buf(),
            expected: extension.to_string(),
        });
    }

    let content = std::fs::read_to_string(file).map_err(|source| SpecificationError::Io {
        path: file.to_path_buf(),
        source,
    })?;

    let label = relative_path(file, root);
    parse_str(&content, &label).map_err(|e| relabel(e, file))
}

/// Parse every specification file under `root` in parallel.
///
/// Fails only when `root` is missing or not a directory. Per-file failures
/// are collected next to the parsed features, which are sorted by path.
pub fn parse_directory(
    root: &Path,
    config: &ScanConfig,
) -> Result<PipelineResult<Vec<Feature>>, ScanError> {
    let scan = Scanner::new(ScanOptions::specifications(root, config)).scan()?;
    let extension = config.effective_feature_extension();

    let parsed: Vec<Result<Feature, SpecificationError>> = scan
        .files
        .par_iter()
        .map(|file| parse_file(file, Some(root), extension))
        .collect();

    let mut result = PipelineResult::new(Vec::with_capacity(parsed.len()));
    for error in scan.errors {
        result.add_error(error);
    }
    for outcome in parsed {
        match outcome {
            Ok(feature) => result.data.push(feature),
            Err(e) => {
                tracing::warn!(path = %e.path().display(), error = %e, "skipping specification");
                result.add_error(e);
            }
        }
    }
    result.data.sort_by(|a, b| a.path.cmp(&b.path));

    tracing::info!(
        root = %root.display(),
        features = result.data.len(),
        errors = result.error_count(),
        "parsed specifications"
    );
    Ok(result)
}

/// `file` relative to `root`, `/`-separated. Falls back to the full path
/// when `file` is outside `root`.
pub fn relative_path(file: &Path, root: Option<&Path>) -> String {
    let rel = root
        .and_then(|r| file.strip_prefix(r).ok())
        .unwrap_or(file);
    let parts: Vec<String> = rel
        .components()
        .filter_map(|c| match c {
            Component::Normal(p) => Some(p.to_string_lossy().into_owned()),
            Component::CurDir => None,
            Component::RootDir => Some(String::new()),
            other => Some(other.as_os_str().to_string_lossy().into_owned()),
        })
        .collect();
    parts.join("/")
}

/// Errors from `parse_str` carry the display label; point them at the file.
fn relabel(error: SpecificationError, file: &Path) -> SpecificationError {
    let path = file.to_path_buf();
    match error {
        SpecificationError::UnsupportedLanguage { language, .. } => {
            SpecificationError::UnsupportedLanguage { path, language }
        }
        SpecificationError::Grammar { message, .. } => SpecificationError::Grammar { path, message },
        other => other,
    }
}
