//! Status correlation: match execution records to scenario instances,
//! derive step and instance statuses, roll statuses up the tree.
//!
//! Single-threaded over the merged inputs. Never fails: every record
//! that cannot be placed becomes a [`CorrelationWarning`].

pub mod engine;
pub mod matching;
pub mod rollup;
pub mod steps;
pub mod warnings;

pub use engine::{correlate, CorrelationReport};
pub use rollup::{apply_rollup, rollup};
pub use steps::instance_run;
pub use warnings::{CorrelationWarning, WarningKind};
