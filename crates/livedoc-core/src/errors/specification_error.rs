//! Specification (feature file) errors.

use std::path::PathBuf;

use super::error_code::{self, LivedocErrorCode};

/// Errors that can occur while turning one feature file into a `Feature`.
/// Every variant names the file so batch reports stay attributable.
#[derive(Debug, thiserror::Error)]
pub enum SpecificationError {
    #[error("Specification file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Not a specification file (expected .{expected}): {path}")]
    UnsupportedExtension { path: PathBuf, expected: String },

    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Unsupported specification language `{language}` in {path}")]
    UnsupportedLanguage { path: PathBuf, language: String },

    #[error("Grammar error in {path}: {message}")]
    Grammar { path: PathBuf, message: String },
}

impl SpecificationError {
    /// The file this error is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::NotFound { path }
            | Self::UnsupportedExtension { path, .. }
            | Self::Io { path, .. }
            | Self::UnsupportedLanguage { path, .. }
            | Self::Grammar { path, .. } => path,
        }
    }
}

impl LivedocErrorCode for SpecificationError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::NotFound { .. } => error_code::SPEC_NOT_FOUND,
            Self::UnsupportedExtension { .. } => error_code::SPEC_UNSUPPORTED_EXTENSION,
            Self::UnsupportedLanguage { .. } => error_code::SPEC_UNSUPPORTED_LANGUAGE,
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Grammar { .. } => error_code::SPEC_PARSE_ERROR,
        }
    }
}
