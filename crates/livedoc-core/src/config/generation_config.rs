//! Generation configuration: the flags the correlation rollup and the
//! summary builder honor.

use serde::{Deserialize, Serialize};

use crate::model::RollupOptions;

/// Configuration for document generation.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct GenerationConfig {
    /// Let `Skipped` children influence container status. Default: true.
    pub include_skipped: Option<bool>,
    /// Let `Pending`/`Undefined` children influence container status. Default: true.
    pub include_pending: Option<bool>,
    /// Report every scenario left without a result as a warning. Default: false.
    pub verbose: Option<bool>,
}

impl GenerationConfig {
    /// Returns the effective include-skipped flag, defaulting to true.
    pub fn effective_include_skipped(&self) -> bool {
        self.include_skipped.unwrap_or(true)
    }

    /// Returns the effective include-pending flag, defaulting to true.
    pub fn effective_include_pending(&self) -> bool {
        self.include_pending.unwrap_or(true)
    }

    /// Returns the effective verbose flag, defaulting to false.
    pub fn effective_verbose(&self) -> bool {
        self.verbose.unwrap_or(false)
    }

    /// The rollup flags, passed explicitly into the correlation engine.
    pub fn rollup_options(&self) -> RollupOptions {
        RollupOptions {
            include_skipped: self.effective_include_skipped(),
            include_pending: self.effective_include_pending(),
        }
    }
}
