//! livedoc-core: shared foundation of the livedoc living-documentation engine.
//!
//! - Model: the framework-neutral specification model, statuses, and
//!   normalized execution records
//! - Errors: one `thiserror` enum per subsystem plus stable error codes
//! - Config: layered TOML configuration
//! - Tracing: `LIVEDOC_LOG`-driven subscriber setup

pub mod config;
pub mod constants;
pub mod errors;
pub mod model;
pub mod tracing;

pub use config::{GenerationConfig, LivedocConfig, ScanConfig};
pub use errors::{
    ConfigError, LivedocErrorCode, PipelineError, PipelineResult, ResultError, ScanError,
    SpecificationError,
};
pub use model::{
    Background, DataTable, Example, ExampleRow, ExecutionRecord, Feature, Outcome,
    RollupOptions, Rule, Scenario, ScenarioKind, ScenarioRun, Status, Step, StepKeyword,
};
