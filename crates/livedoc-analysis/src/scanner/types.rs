//! Scanner types.

use std::path::{Path, PathBuf};
use std::time::Duration;

use livedoc_core::config::ScanConfig;
use livedoc_core::errors::ScanError;

/// What to look for under one root.
#[derive(Debug, Clone)]
pub struct ScanOptions {
    pub root: PathBuf,
    /// Accepted file extensions without the dot, compared case-insensitively.
    /// Empty accepts every file.
    pub extensions: Vec<String>,
    /// Additional patterns to ignore (beyond defaults).
    pub extra_ignores: Vec<String>,
    /// Files larger than this are skipped.
    pub max_file_size: u64,
    pub follow_symlinks: bool,
}

impl ScanOptions {
    /// Options for `root` driven by the `[scan]` config section.
    pub fn from_config(root: &Path, config: &ScanConfig, extensions: &[&str]) -> Self {
        Self {
            root: root.to_path_buf(),
            extensions: extensions.iter().map(|e| e.to_string()).collect(),
            extra_ignores: config.extra_ignore.clone(),
            max_file_size: config.effective_max_file_size(),
            follow_symlinks: config.effective_follow_symlinks(),
        }
    }

    /// Options for specification files under `root`.
    pub fn specifications(root: &Path, config: &ScanConfig) -> Self {
        Self::from_config(root, config, &[config.effective_feature_extension()])
    }

    pub(crate) fn accepts(&self, path: &Path) -> bool {
        if self.extensions.is_empty() {
            return true;
        }
        path.extension()
            .and_then(|e| e.to_str())
            .is_some_and(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
    }
}

/// Statistics about the scan.
#[derive(Debug, Clone, Default)]
pub struct ScanStats {
    pub total_files: usize,
    pub total_bytes: u64,
    /// Files skipped for exceeding the size limit.
    pub files_skipped: usize,
    pub duration: Duration,
}

/// Result of a scan operation.
#[derive(Debug, Default)]
pub struct ScanResult {
    pub root: PathBuf,
    /// Matching files, sorted.
    pub files: Vec<PathBuf>,
    pub stats: ScanStats,
    /// Non-fatal errors (unreadable entries).
    pub errors: Vec<ScanError>,
}
