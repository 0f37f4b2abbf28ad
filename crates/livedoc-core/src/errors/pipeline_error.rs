//! Pipeline errors and non-fatal error collection.

use std::path::PathBuf;

use super::error_code::{self, LivedocErrorCode};
use super::{ConfigError, ResultError, ScanError, SpecificationError};

/// Errors that can occur during a generation run.
/// Aggregates subsystem errors via `From` conversions.
///
/// Only `Scan` (missing input directory) and `NoSpecifications` abort a run;
/// the per-file variants are collected into a [`PipelineResult`].
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("Scan error: {0}")]
    Scan(#[from] ScanError),

    #[error("Specification error: {0}")]
    Specification(#[from] SpecificationError),

    #[error("Result error: {0}")]
    Result(#[from] ResultError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("No specification files found under {root}")]
    NoSpecifications { root: PathBuf },
}

impl LivedocErrorCode for PipelineError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Scan(e) => e.error_code(),
            Self::Specification(e) => e.error_code(),
            Self::Result(e) => e.error_code(),
            Self::Config(e) => e.error_code(),
            Self::NoSpecifications { .. } => error_code::NO_SPECIFICATIONS,
        }
    }
}

/// Result of a batch that accumulates non-fatal errors.
/// Allows partial results to be returned even when some files fail.
#[derive(Debug, Default)]
pub struct PipelineResult<T: Default = ()> {
    /// The successful result data.
    pub data: T,
    /// Non-fatal errors collected during the batch.
    pub errors: Vec<PipelineError>,
}

impl<T: Default> PipelineResult<T> {
    /// Create a new pipeline result with no errors.
    pub fn new(data: T) -> Self {
        Self {
            data,
            errors: Vec::new(),
        }
    }

    /// Add a non-fatal error to the result.
    pub fn add_error(&mut self, error: impl Into<PipelineError>) {
        self.errors.push(error.into());
    }

    /// Returns true if there are no non-fatal errors.
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }

    /// Returns the number of non-fatal errors.
    pub fn error_count(&self) -> usize {
        self.errors.len()
    }
}
