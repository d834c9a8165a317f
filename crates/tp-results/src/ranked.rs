//! Accumulated measurements for one explored run configuration.

use std::collections::BTreeMap;

use tp_types::{GpuId, MeasurementSnapshot, MetricRow, RunConfig};

/// The measurement record for a single run configuration.
///
/// Snapshots are kept in append order, one per monitoring pass, and are never
/// reordered or deduplicated. A `RankedResult` carries no comparison logic of
/// its own; ordering exists only relative to a comparator (see
/// [`crate::ThreeWayCompare`] and [`crate::OrderedBy`]).
#[derive(Debug, Clone, PartialEq)]
pub struct RankedResult {
    run_config: RunConfig,
    gpu_snapshots: Vec<BTreeMap<GpuId, MetricRow>>,
    host_snapshots: Vec<MetricRow>,
}

impl RankedResult {
    pub fn new(run_config: RunConfig) -> Self {
        Self {
            run_config,
            gpu_snapshots: Vec::new(),
            host_snapshots: Vec::new(),
        }
    }

    /// Append one monitoring pass's output to the matching sequence.
    pub fn add_data(&mut self, snapshot: MeasurementSnapshot) {
        match snapshot {
            MeasurementSnapshot::Gpu(rows) => self.gpu_snapshots.push(rows),
            MeasurementSnapshot::Host(row) => self.host_snapshots.push(row),
        }
    }

    pub fn gpu_snapshots(&self) -> &[BTreeMap<GpuId, MetricRow>] {
        &self.gpu_snapshots
    }

    pub fn host_snapshots(&self) -> &[MetricRow] {
        &self.host_snapshots
    }

    /// Both snapshot sequences, GPU-scoped first.
    pub fn measurements(&self) -> (&[BTreeMap<GpuId, MetricRow>], &[MetricRow]) {
        (&self.gpu_snapshots, &self.host_snapshots)
    }

    pub fn run_config(&self) -> &RunConfig {
        &self.run_config
    }

    /// Hand back the owned run configuration, consuming the result.
    pub fn into_run_config(self) -> RunConfig {
        self.run_config
    }
}
