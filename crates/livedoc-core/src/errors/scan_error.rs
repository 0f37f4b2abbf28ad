//! Scanner errors.

use std::path::PathBuf;

use super::error_code::{self, LivedocErrorCode};

/// Errors that can occur while discovering input files.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    #[error("Input directory does not exist: {path}")]
    DirectoryNotFound { path: PathBuf },

    #[error("Input path is not a directory: {path}")]
    NotADirectory { path: PathBuf },

    #[error("IO error scanning {path}: {message}")]
    Io { path: PathBuf, message: String },
}

impl LivedocErrorCode for ScanError {
    fn error_code(&self) -> &'static str {
        error_code::SCAN_ERROR
    }
}
