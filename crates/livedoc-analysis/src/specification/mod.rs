//! Specification adapter: Gherkin feature files into the
//! Universal Specification Model.
//!
//! The `gherkin` crate owns tokenizing and grammar; this module maps its
//! syntax tree onto [`livedoc_core::Feature`], recovers what the tree does
//! not carry (comments, example row lines), and runs whole directories in
//! parallel with a continue-on-error policy.

pub mod adapter;
pub mod parser;
pub mod source;

pub use adapter::convert;
pub use parser::{parse_directory, parse_file, parse_str, relative_path};
pub use source::SourceInfo;
