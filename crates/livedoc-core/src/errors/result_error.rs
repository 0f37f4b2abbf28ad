//! Test-result report errors.

use std::path::PathBuf;

use super::error_code::{self, LivedocErrorCode};

/// Errors raised by a result adapter that recognized a file
/// but could not read it against its schema.
#[derive(Debug, thiserror::Error)]
pub enum ResultError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Malformed {format} report {path}: {message}")]
    Malformed {
        path: PathBuf,
        format: String,
        message: String,
    },
}

impl ResultError {
    /// Shorthand for a schema mismatch in `format`.
    pub fn malformed(path: impl Into<PathBuf>, format: &str, message: impl Into<String>) -> Self {
        Self::Malformed {
            path: path.into(),
            format: format.to_string(),
            message: message.into(),
        }
    }

    /// The report file this error is about.
    pub fn path(&self) -> &PathBuf {
        match self {
            Self::Io { path, .. } | Self::Malformed { path, .. } => path,
        }
    }
}

impl LivedocErrorCode for ResultError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::Io { .. } => error_code::IO_ERROR,
            Self::Malformed { .. } => error_code::RESULT_PARSE_ERROR,
        }
    }
}
