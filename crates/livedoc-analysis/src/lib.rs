//! livedoc-analysis: the living-documentation engines.
//!
//! Scanner, specification adapter (Gherkin), result adapter registry,
//! status correlation, aggregation, and the end-to-end pipeline.

pub mod aggregation;
pub mod correlation;
pub mod pipeline;
pub mod results;
pub mod scanner;
pub mod specification;

pub use aggregation::{DocumentationSet, InputError, StatusCounts, Summary};
pub use correlation::{correlate, CorrelationReport, CorrelationWarning, WarningKind};
pub use pipeline::{generate, generate_with, GenerationRequest};
pub use results::{ResultAdapter, ResultRegistry};
