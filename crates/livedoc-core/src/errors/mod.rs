//! Error handling for livedoc.
//! One error enum per subsystem, `thiserror` only, zero `anyhow`.

pub mod config_error;
pub mod error_code;
pub mod pipeline_error;
pub mod result_error;
pub mod scan_error;
pub mod specification_error;

pub use config_error::ConfigError;
pub use error_code::LivedocErrorCode;
pub use pipeline_error::{PipelineError, PipelineResult};
pub use result_error::ResultError;
pub use scan_error::ScanError;
pub use specification_error::SpecificationError;
