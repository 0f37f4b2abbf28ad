//! Shared constants for the livedoc engine.

/// livedoc version string.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Default specification file extension (without the dot).
pub const DEFAULT_FEATURE_EXTENSION: &str = "feature";

/// Maximum input file size in bytes (default: 10MB).
pub const DEFAULT_MAX_FILE_SIZE: u64 = 10 * 1024 * 1024;

/// Project-level configuration file name.
pub const PROJECT_CONFIG_FILE: &str = "livedoc.toml";

/// User-level configuration directory under `$HOME`.
pub const USER_CONFIG_DIR: &str = ".livedoc";

/// Environment variable holding the tracing filter.
pub const LOG_ENV_VAR: &str = "LIVEDOC_LOG";

/// Filter used when `LIVEDOC_LOG` is unset or invalid.
pub const DEFAULT_LOG_FILTER: &str = "livedoc=info";

/// Grammar language assumed when a file has no `# language:` directive.
pub const DEFAULT_LANGUAGE: &str = "en";

/// Bytes read from a result file when sniffing its format.
pub const SNIFF_BYTES: usize = 8 * 1024;
