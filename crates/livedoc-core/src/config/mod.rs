//! Configuration system for livedoc.
//! TOML-based, layered resolution: overrides > env > project > user > defaults.

pub mod generation_config;
pub mod livedoc_config;
pub mod scan_config;

pub use generation_config::GenerationConfig;
pub use livedoc_config::{ConfigOverrides, LivedocConfig};
pub use scan_config::ScanConfig;
