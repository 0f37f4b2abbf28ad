//! Universal Specification Model.
//!
//! Framework-neutral representation of a Given/When/Then specification
//! (features, rules, backgrounds, scenarios, outlines with example tables,
//! steps) plus the normalized execution records the correlation engine
//! matches against it. Everything here is plain data: built once by the
//! specification adapter, status fields filled in by correlation, then
//! handed read-only to rendering.

pub mod duration_millis;
pub mod feature;
pub mod record;
pub mod run;
pub mod status;

pub use feature::{
    Background, DataTable, Example, ExampleRow, Feature, FeatureChild, Rule, Scenario,
    ScenarioKind, Step, StepKeyword,
};
pub use record::{ExecutionRecord, Outcome};
pub use run::ScenarioRun;
pub use status::{RollupOptions, Status};
