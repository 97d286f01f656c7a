//! Configuration schema types for `stackrot.toml`
//!
//! Every section and field has a default, so an empty file is a valid config.

use serde::{Deserialize, Serialize};

use crate::direction::RotationDirection;

/// Rotation defaults
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RotateConfig {
    /// Direction used when a caller does not name one
    #[serde(default)]
    pub direction: RotationDirection,
}

/// Evaluation options for lazy arrays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComputeConfig {
    /// Evaluate blocks in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Size of a dedicated thread pool; the global rayon pool is used when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<usize>,
}

fn default_parallel() -> bool {
    true
}

impl Default for ComputeConfig {
    fn default() -> Self {
        Self { parallel: default_parallel(), threads: None }
    }
}

impl ComputeConfig {
    /// Evaluate blocks one after another on the calling thread.
    pub fn sequential() -> Self {
        Self { parallel: false, threads: None }
    }
}

/// Complete `stackrot.toml` configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct StackrotConfig {
    #[serde(default)]
    pub rotate: RotateConfig,
    #[serde(default)]
    pub compute: ComputeConfig,
}

impl StackrotConfig {
    /// Check semantic constraints the TOML types cannot express.
    ///
    /// Returns a list of problems; empty means valid.
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();
        if self.compute.threads == Some(0) {
            errors.push("compute.threads must be at least 1".to_string());
        }
        if self.compute.threads.is_some() && !self.compute.parallel {
            errors.push("compute.threads has no effect when compute.parallel = false".to_string());
        }
        errors
    }
}
