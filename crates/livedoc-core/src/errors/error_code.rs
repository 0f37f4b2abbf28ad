//! LivedocErrorCode trait for stable, renderer-facing error codes.

/// Trait for attaching a stable code to every livedoc error.
/// Renderers show the code next to the message so omissions in the
/// generated document can be traced back to their cause.
pub trait LivedocErrorCode {
    /// Returns the error code string (e.g., "SPEC_PARSE_ERROR").
    fn error_code(&self) -> &'static str;

    /// Returns the formatted string: `[ERROR_CODE] message`.
    fn coded_string(&self) -> String
    where
        Self: std::fmt::Display,
    {
        format!("[{}] {}", self.error_code(), self)
    }
}

pub const SPEC_NOT_FOUND: &str = "SPEC_NOT_FOUND";
pub const SPEC_UNSUPPORTED_EXTENSION: &str = "SPEC_UNSUPPORTED_EXTENSION";
pub const SPEC_UNSUPPORTED_LANGUAGE: &str = "SPEC_UNSUPPORTED_LANGUAGE";
pub const SPEC_PARSE_ERROR: &str = "SPEC_PARSE_ERROR";
pub const RESULT_PARSE_ERROR: &str = "RESULT_PARSE_ERROR";
pub const IO_ERROR: &str = "IO_ERROR";
pub const SCAN_ERROR: &str = "SCAN_ERROR";
pub const CONFIG_ERROR: &str = "CONFIG_ERROR";
pub const NO_SPECIFICATIONS: &str = "NO_SPECIFICATIONS";
