//! Scanner configuration.

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_FEATURE_EXTENSION, DEFAULT_MAX_FILE_SIZE};

/// Configuration for input file discovery.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct ScanConfig {
    /// Specification file extension, without the dot. Default: "feature".
    pub feature_extension: Option<String>,
    /// Maximum file size in bytes. Default: 10MB.
    pub max_file_size: Option<u64>,
    /// Number of worker threads (0 = auto). Default: 0.
    pub threads: Option<usize>,
    /// Additional gitignore-style patterns to skip.
    #[serde(default)]
    pub extra_ignore: Vec<String>,
    /// Follow symbolic links. Default: false.
    pub follow_symlinks: Option<bool>,
}

impl ScanConfig {
    /// Returns the effective specification extension, defaulting to "feature".
    pub fn effective_feature_extension(&self) -> &str {
        self.feature_extension
            .as_deref()
            .unwrap_or(DEFAULT_FEATURE_EXTENSION)
    }

    /// Returns the effective max file size, defaulting to 10MB.
    pub fn effective_max_file_size(&self) -> u64 {
        self.max_file_size.unwrap_or(DEFAULT_MAX_FILE_SIZE)
    }

    /// Returns the effective thread count, defaulting to 0 (auto).
    pub fn effective_threads(&self) -> usize {
        self.threads.unwrap_or(0)
    }

    /// Returns whether symlinks are followed, defaulting to false.
    pub fn effective_follow_symlinks(&self) -> bool {
        self.follow_symlinks.unwrap_or(false)
    }
}
