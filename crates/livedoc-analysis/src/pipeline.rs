//! End-to-end generation: specifications and results in, one
//! `DocumentationSet` out.
//!
//! Two failure tiers: a missing input directory or an empty specification
//! tree aborts the run; everything else is recorded and the document is
//! still produced.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use livedoc_core::config::{LivedocConfig, ScanConfig};
use livedoc_core::errors::{PipelineError, PipelineResult, ScanError};

use crate::aggregation::{DocumentationSet, InputError};
use crate::correlation::correlate;
use crate::results::ResultRegistry;
use crate::scanner::{ScanOptions, Scanner};
use crate::specification::parse_directory;

/// Extensions considered when a result input is a directory.
pub const RESULT_EXTENSIONS: &[&str] = &["json", "xml"];

/// Inputs of one generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerationRequest {
    /// Root of the specification tree. Feature paths are relative to it.
    pub features_dir: PathBuf,
    /// Result report files or directories holding them.
    pub results: Vec<PathBuf>,
    pub config: LivedocConfig,
}

impl GenerationRequest {
    pub fn new(features_dir: impl Into<PathBuf>) -> Self {
        Self {
            features_dir: features_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_results(mut self, path: impl Into<PathBuf>) -> Self {
        self.results.push(path.into());
        self
    }

    pub fn with_config(mut self, config: LivedocConfig) -> Self {
        self.config = config;
        self
    }
}

/// Run the whole pipeline with the default result adapters.
pub fn generate(
    request: &GenerationRequest,
    generated_at: DateTime<Utc>,
) -> Result<PipelineResult<DocumentationSet>, PipelineError> {
    generate_with(request, &ResultRegistry::with_defaults(), generated_at)
}

/// Run the whole pipeline with a caller-supplied adapter registry.
pub fn generate_with(
    request: &GenerationRequest,
    registry: &ResultRegistry,
    generated_at: DateTime<Utc>,
) -> Result<PipelineResult<DocumentationSet>, PipelineError> {
    let threads = request.config.scan.effective_threads();
    if threads == 0 {
        return run(request, registry, generated_at);
    }
    match rayon::ThreadPoolBuilder::new().num_threads(threads).build() {
        Ok(pool) => pool.install(|| run(request, registry, generated_at)),
        Err(e) => {
            tracing::warn!(threads, error = %e, "using the global thread pool");
            run(request, registry, generated_at)
        }
    }
}

fn run(
    request: &GenerationRequest,
    registry: &ResultRegistry,
    generated_at: DateTime<Utc>,
) -> Result<PipelineResult<DocumentationSet>, PipelineError> {
    let scan_config = &request.config.scan;
    let generation = &request.config.generation;

    for input in &request.results {
        if !input.exists() {
            return Err(ScanError::DirectoryNotFound { path: input.clone() }.into());
        }
    }

    let specs = parse_directory(&request.features_dir, scan_config)?;
    let found_any = !specs.data.is_empty()
        || specs
            .errors
            .iter()
            .any(|e| matches!(e, PipelineError::Specification(_)));
    if !found_any {
        return Err(PipelineError::NoSpecifications {
            root: request.features_dir.clone(),
        });
    }
    let mut features = specs.data;
    let mut errors = specs.errors;

    let (result_files, scan_errors) = collect_result_files(&request.results, scan_config)?;
    errors.extend(scan_errors.into_iter().map(PipelineError::from));

    let parsed = registry.parse_files(&result_files);
    errors.extend(parsed.errors.into_iter().map(PipelineError::from));

    let options = generation.rollup_options();
    let report = correlate(
        &mut features,
        &parsed.records,
        options,
        generation.effective_verbose(),
    );

    let input_errors = errors.iter().map(InputError::from).collect();
    let unrecognized = parsed
        .unrecognized
        .iter()
        .map(|p| p.display().to_string())
        .collect();

    let document = DocumentationSet::build(
        features,
        report.warnings,
        input_errors,
        unrecognized,
        options,
        generated_at,
    );

    tracing::info!(
        features = document.features.len(),
        scenarios = document.summary.scenarios.total,
        warnings = document.warnings.len(),
        errors = errors.len(),
        "documentation generated"
    );

    let mut result = PipelineResult::new(document);
    result.errors = errors;
    Ok(result)
}

/// Expand result inputs: files are taken as given, directories are
/// scanned for [`RESULT_EXTENSIONS`]. Output is sorted and deduplicated.
pub fn collect_result_files(
    inputs: &[PathBuf],
    config: &ScanConfig,
) -> Result<(Vec<PathBuf>, Vec<ScanError>), ScanError> {
    let mut files = Vec::new();
    let mut errors = Vec::new();

    for input in inputs {
        if input.is_file() {
            files.push(input.clone());
            continue;
        }
        let scan = Scanner::new(ScanOptions::from_config(input, config, RESULT_EXTENSIONS)).scan()?;
        files.extend(scan.files);
        errors.extend(scan.errors);
    }

    files.sort();
    files.dedup();
    Ok((files, errors))
}
