//! Result adapters: native test-runner reports into [`ExecutionRecord`]s.
//!
//! 4 formats: Cucumber JSON, livedoc generic JSON, JUnit XML, NUnit 3 XML.

pub mod cucumber_json;
pub mod generic_json;
pub mod junit;
pub mod nunit;
mod xml;

use std::io::Read;
use std::path::{Path, PathBuf};

use livedoc_core::constants::SNIFF_BYTES;
use livedoc_core::errors::ResultError;
use livedoc_core::model::ExecutionRecord;
use rayon::prelude::*;

/// One supported report schema.
pub trait ResultAdapter: Send + Sync {
    /// Format name recorded on every produced record.
    fn name(&self) -> &'static str;

    /// Cheap recognition: extension plus a sniff of the file head.
    /// Must not fail; unreadable files are simply not recognized.
    fn can_parse(&self, path: &Path) -> bool;

    /// Full parse. Only called after `can_parse` returned true, so a schema
    /// mismatch here is a [`ResultError::Malformed`].
    fn parse(&self, path: &Path) -> Result<Vec<ExecutionRecord>, ResultError>;
}

/// Create an adapter by format name.
pub fn create_adapter(format: &str) -> Option<Box<dyn ResultAdapter>> {
    match format {
        "cucumber-json" => Some(Box::new(cucumber_json::CucumberJsonAdapter)),
        "livedoc-json" => Some(Box::new(generic_json::GenericJsonAdapter)),
        "junit" => Some(Box::new(junit::JUnitAdapter::new())),
        "nunit3" => Some(Box::new(nunit::NUnitAdapter::new())),
        _ => None,
    }
}

/// List all available adapter format names, in default selection order.
pub fn available_formats() -> &'static [&'static str] {
    &["cucumber-json", "livedoc-json", "junit", "nunit3"]
}

/// Records, errors, and unrecognized files from one batch of result files.
#[derive(Debug, Default)]
pub struct ParsedResults {
    pub records: Vec<ExecutionRecord>,
    pub errors: Vec<ResultError>,
    /// Files no adapter recognized. Skipped, not fatal.
    pub unrecognized: Vec<PathBuf>,
}

/// Ordered adapter list; the first adapter that recognizes a file wins.
pub struct ResultRegistry {
    adapters: Vec<Box<dyn ResultAdapter>>,
}

impl Default for ResultRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}

impl ResultRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            adapters: Vec::new(),
        }
    }

    /// Every built-in adapter in [`available_formats`] order.
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        for format in available_formats() {
            if let Some(adapter) = create_adapter(format) {
                registry.register(adapter);
            }
        }
        registry
    }

    /// Append an adapter; it is consulted after the ones already present.
    pub fn register(&mut self, adapter: Box<dyn ResultAdapter>) {
        self.adapters.push(adapter);
    }

    pub fn formats(&self) -> Vec<&'static str> {
        self.adapters.iter().map(|a| a.name()).collect()
    }

    pub fn adapter_for(&self, path: &Path) -> Option<&dyn ResultAdapter> {
        self.adapters
            .iter()
            .find(|a| a.can_parse(path))
            .map(|a| a.as_ref())
    }

    /// Parse one file. `None` when no adapter recognizes it.
    pub fn parse_file(&self, path: &Path) -> Option<Result<Vec<ExecutionRecord>, ResultError>> {
        let adapter = self.adapter_for(path)?;
        tracing::debug!(path = %path.display(), format = adapter.name(), "parsing result file");
        Some(adapter.parse(path))
    }

    /// Parse many files in parallel. Records keep the order of `files`.
    pub fn parse_files(&self, files: &[PathBuf]) -> ParsedResults {
        let outcomes: Vec<(&PathBuf, Option<Result<Vec<ExecutionRecord>, ResultError>>)> = files
            .par_iter()
            .map(|file| (file, self.parse_file(file)))
            .collect();

        let mut parsed = ParsedResults::default();
        for (file, outcome) in outcomes {
            match outcome {
                Some(Ok(records)) => parsed.records.extend(records),
                Some(Err(e)) => {
                    tracing::warn!(path = %file.display(), error = %e, "skipping result file");
                    parsed.errors.push(e);
                }
                None => {
                    tracing::info!(path = %file.display(), "unrecognized result file");
                    parsed.unrecognized.push(file.clone());
                }
            }
        }
        tracing::info!(
            files = files.len(),
            records = parsed.records.len(),
            errors = parsed.errors.len(),
            unrecognized = parsed.unrecognized.len(),
            "parsed results"
        );
        parsed
    }
}

/// Extension check, case-insensitive.
pub(crate) fn has_extension(path: &Path, extensions: &[&str]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
}

/// The first [`SNIFF_BYTES`] of a file, lossily decoded.
pub(crate) fn sniff(path: &Path) -> Option<String> {
    let file = std::fs::File::open(path).ok()?;
    let mut head = Vec::with_capacity(SNIFF_BYTES);
    file.take(SNIFF_BYTES as u64).read_to_end(&mut head).ok()?;
    Some(String::from_utf8_lossy(&head).into_owned())
}

/// Whole file as text.
pub(crate) fn read(path: &Path) -> Result<String, ResultError> {
    std::fs::read_to_string(path).map_err(|source| ResultError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Seconds as reported by XML runners (`"0.123"`, `"0,123"`).
pub(crate) fn seconds(raw: &str) -> std::time::Duration {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|s| s.is_finite() && *s >= 0.0)
        .map(std::time::Duration::from_secs_f64)
        .unwrap_or_default()
}
