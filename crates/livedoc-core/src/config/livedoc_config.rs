//! Top-level livedoc configuration with layered resolution.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use super::{GenerationConfig, ScanConfig};
use crate::constants::{PROJECT_CONFIG_FILE, USER_CONFIG_DIR};
use crate::errors::ConfigError;

/// Top-level configuration aggregating all sub-configs.
///
/// Resolution order (highest priority first):
/// 1. Explicit overrides (applied via `apply_overrides`)
/// 2. Environment variables (`LIVEDOC_*`)
/// 3. Project config (`livedoc.toml` in project root)
/// 4. User config (`~/.livedoc/config.toml`)
/// 5. Compiled defaults
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct LivedocConfig {
    pub generation: GenerationConfig,
    pub scan: ScanConfig,
}

/// Override values supplied by the embedding tool (CLI, build hook).
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub include_skipped: Option<bool>,
    pub include_pending: Option<bool>,
    pub verbose: Option<bool>,
    pub threads: Option<usize>,
}

impl LivedocConfig {
    /// Load configuration with layered resolution rooted at `root`.
    pub fn load(root: &Path, overrides: Option<&ConfigOverrides>) -> Result<Self, ConfigError> {
        let mut config = Self::default();

        // Lowest priority: user config. A broken user file is fatal only
        // when it fails to parse; unreadable files fall back to defaults.
        if let Some(user_config_path) = Self::user_config_path() {
            if user_config_path.exists() {
                match Self::merge_toml_file(&mut config, &user_config_path) {
                    Ok(()) => {}
                    Err(e @ ConfigError::ParseError { .. }) => return Err(e),
                    Err(e) => {
                        tracing::warn!(error = %e, "ignoring unreadable user config");
                    }
                }
            }
        }

        let project_config_path = root.join(PROJECT_CONFIG_FILE);
        if project_config_path.exists() {
            Self::merge_toml_file(&mut config, &project_config_path)?;
        }

        Self::apply_env_overrides(&mut config);

        if let Some(overrides) = overrides {
            Self::apply_overrides(&mut config, overrides);
        }

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(toml_str).map_err(|e| ConfigError::ParseError {
            path: "<string>".to_string(),
            message: e.to_string(),
        })?;
        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate the configuration values.
    pub fn validate(config: &LivedocConfig) -> Result<(), ConfigError> {
        if config.scan.max_file_size == Some(0) {
            return Err(ConfigError::ValidationFailed {
                field: "scan.max_file_size".to_string(),
                message: "must be greater than 0".to_string(),
            });
        }
        if let Some(ref ext) = config.scan.feature_extension {
            if ext.is_empty() || ext.starts_with('.') {
                return Err(ConfigError::ValidationFailed {
                    field: "scan.feature_extension".to_string(),
                    message: "must be non-empty and given without a leading dot".to_string(),
                });
            }
        }
        Ok(())
    }

    /// Returns the user config path: `~/.livedoc/config.toml`.
    fn user_config_path() -> Option<PathBuf> {
        home_dir().map(|h| h.join(USER_CONFIG_DIR).join("config.toml"))
    }

    /// Merge a TOML file into the existing config.
    /// Unknown keys are silently ignored (forward-compatible).
    fn merge_toml_file(config: &mut LivedocConfig, path: &Path) -> Result<(), ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let file_config: LivedocConfig =
            toml::from_str(&content).map_err(|e| ConfigError::ParseError {
                path: path.display().to_string(),
                message: e.to_string(),
            })?;

        Self::merge(config, &file_config);
        Ok(())
    }

    /// Merge `other` into `base`; `other` wins wherever it has a value.
    fn merge(base: &mut LivedocConfig, other: &LivedocConfig) {
        if other.generation.include_skipped.is_some() {
            base.generation.include_skipped = other.generation.include_skipped;
        }
        if other.generation.include_pending.is_some() {
            base.generation.include_pending = other.generation.include_pending;
        }
        if other.generation.verbose.is_some() {
            base.generation.verbose = other.generation.verbose;
        }

        if other.scan.feature_extension.is_some() {
            base.scan.feature_extension = other.scan.feature_extension.clone();
        }
        if other.scan.max_file_size.is_some() {
            base.scan.max_file_size = other.scan.max_file_size;
        }
        if other.scan.threads.is_some() {
            base.scan.threads = other.scan.threads;
        }
        if !other.scan.extra_ignore.is_empty() {
            base.scan.extra_ignore = other.scan.extra_ignore.clone();
        }
        if other.scan.follow_symlinks.is_some() {
            base.scan.follow_symlinks = other.scan.follow_symlinks;
        }
    }

    /// Apply environment variable overrides.
    /// Pattern: `LIVEDOC_INCLUDE_SKIPPED`, `LIVEDOC_SCAN_THREADS`, etc.
    fn apply_env_overrides(config: &mut LivedocConfig) {
        if let Some(v) = env_parse::<bool>("LIVEDOC_INCLUDE_SKIPPED") {
            config.generation.include_skipped = Some(v);
        }
        if let Some(v) = env_parse::<bool>("LIVEDOC_INCLUDE_PENDING") {
            config.generation.include_pending = Some(v);
        }
        if let Some(v) = env_parse::<bool>("LIVEDOC_VERBOSE") {
            config.generation.verbose = Some(v);
        }
        if let Some(v) = env_parse::<usize>("LIVEDOC_SCAN_THREADS") {
            config.scan.threads = Some(v);
        }
        if let Some(v) = env_parse::<u64>("LIVEDOC_SCAN_MAX_FILE_SIZE") {
            config.scan.max_file_size = Some(v);
        }
        if let Ok(v) = std::env::var("LIVEDOC_FEATURE_EXTENSION") {
            config.scan.feature_extension = Some(v);
        }
    }

    /// Apply explicit overrides (highest priority).
    pub fn apply_overrides(config: &mut LivedocConfig, overrides: &ConfigOverrides) {
        if let Some(v) = overrides.include_skipped {
            config.generation.include_skipped = Some(v);
        }
        if let Some(v) = overrides.include_pending {
            config.generation.include_pending = Some(v);
        }
        if let Some(v) = overrides.verbose {
            config.generation.verbose = Some(v);
        }
        if let Some(v) = overrides.threads {
            config.scan.threads = Some(v);
        }
    }

    /// Serialize the config back to TOML.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::ParseError {
            path: "<serialization>".to_string(),
            message: e.to_string(),
        })
    }
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.trim().parse().ok())
}

/// Cross-platform home directory resolution.
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
