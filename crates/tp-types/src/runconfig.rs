//! Run configurations and the sweep-generator contract.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of one load combination inside a run configuration.
///
/// Combinations are ordered, and measurement snapshots submitted for the run
/// are aligned positionally with this list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadCombination {
    pub model_name: String,
    pub batch_size: u32,
    /// Concurrency setting passed to the load generator, e.g. "4" or "1:16:2".
    pub concurrency_range: String,
}

impl LoadCombination {
    pub fn new(model_name: impl Into<String>, batch_size: u32, concurrency_range: impl Into<String>) -> Self {
        Self {
            model_name: model_name.into(),
            batch_size,
            concurrency_range: concurrency_range.into(),
        }
    }
}

/// One concrete combination of serving parameters under evaluation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunConfig {
    pub id: Uuid,
    pub model_name: String,
    pub combinations: Vec<LoadCombination>,
    pub created_at: DateTime<Utc>,
}

impl RunConfig {
    pub fn new(model_name: impl Into<String>, combinations: Vec<LoadCombination>) -> Self {
        Self {
            id: Uuid::new_v4(),
            model_name: model_name.into(),
            combinations,
            created_at: Utc::now(),
        }
    }
}

/// Single-pass producer of run configurations for a sweep.
///
/// `None` is the end-of-sequence signal and is final: once a generator is
/// exhausted it stays exhausted, and iterating again requires a fresh
/// instance. Concrete sweep strategies (batch-size x instance-count x
/// concurrency enumeration, adaptive search, ...) live outside this core.
pub trait RunConfigGenerator {
    /// The next run configuration to evaluate, or `None` once the search
    /// space is exhausted.
    fn next_run_config(&mut self) -> Option<RunConfig>;
}
