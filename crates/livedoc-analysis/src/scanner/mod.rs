//! Scanner: input file discovery.
//!
//! - `ignore` crate for gitignore-style pattern matching
//! - `rayon` for parallel metadata checks

mod ignores;
mod types;
mod walker;

pub use ignores::{IgnorePatterns, DEFAULT_IGNORE_DIRS, IGNORE_FILE_NAME};
pub use types::{ScanOptions, ScanResult, ScanStats};
pub use walker::Scanner;
