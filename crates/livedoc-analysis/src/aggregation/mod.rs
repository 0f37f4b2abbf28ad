//! Aggregation & summary: status counts and the `DocumentationSet`
//! handed to rendering. Pure functions, no I/O.

pub mod counts;
pub mod document;
pub mod summary;

pub use counts::StatusCounts;
pub use document::{DocumentationSet, InputError};
pub use summary::{FeatureSummary, Summary};
