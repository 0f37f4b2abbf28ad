//! The renderer contract.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use livedoc_core::errors::{LivedocErrorCode, PipelineError, ScanError};
use livedoc_core::model::{Feature, RollupOptions};
use serde::{Deserialize, Serialize};

use super::summary::Summary;
use crate::correlation::CorrelationWarning;

/// An input that could not be used, as shown in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputError {
    pub code: String,
    pub path: Option<String>,
    pub message: String,
}

impl From<&PipelineError> for InputError {
    fn from(error: &PipelineError) -> Self {
        let path: Option<PathBuf> = match error {
            PipelineError::Specification(e) => Some(e.path().clone()),
            PipelineError::Result(e) => Some(e.path().clone()),
            PipelineError::Scan(
                ScanError::DirectoryNotFound { path }
                | ScanError::NotADirectory { path }
                | ScanError::Io { path, .. },
            ) => Some(path.clone()),
            PipelineError::NoSpecifications { root } => Some(root.clone()),
            PipelineError::Config(_) => None,
        };
        InputError {
            code: error.error_code().to_string(),
            path: path.map(|p| p.display().to_string()),
            message: error.to_string(),
        }
    }
}

/// Everything rendering needs: the status-decorated features, counts,
/// and every omission made along the way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentationSet {
    pub features: Vec<Feature>,
    pub summary: Summary,
    pub warnings: Vec<CorrelationWarning>,
    pub input_errors: Vec<InputError>,
    pub unrecognized_results: Vec<String>,
    pub generated_at: DateTime<Utc>,
}

impl DocumentationSet {
    /// Assemble the document. Takes ownership of the features: nothing is
    /// mutated after this point.
    pub fn build(
        features: Vec<Feature>,
        warnings: Vec<CorrelationWarning>,
        input_errors: Vec<InputError>,
        unrecognized_results: Vec<String>,
        options: RollupOptions,
        generated_at: DateTime<Utc>,
    ) -> Self {
        let summary = Summary::build(&features, options);
        Self {
            features,
            summary,
            warnings,
            input_errors,
            unrecognized_results,
            generated_at,
        }
    }

    /// Pretty JSON for renderers.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// True when every input was used and every record placed.
    pub fn is_complete(&self) -> bool {
        self.warnings.is_empty() && self.input_errors.is_empty() && self.unrecognized_results.is_empty()
    }
}
