//! Metric identifiers and raw measurement shapes.
//!
//! A [`MetricKind`] names one measured quantity. Kinds are split across two
//! universes: GPU-scoped kinds are reported once per GPU, host-scoped kinds
//! once per monitoring pass. Which universe a kind belongs to is declared by
//! the kind lists handed to the comparator and the result manager, not baked
//! into the kind itself.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Identifier for a measured quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MetricKind {
    // GPU-scoped
    GpuUtilization,
    GpuUsedMemory,
    GpuFreeMemory,
    GpuPowerUsage,
    // Host-scoped
    Throughput,
    AvgLatency,
    P99Latency,
    CpuUsedRam,
    CpuAvailableRam,
}

impl MetricKind {
    /// Base column label, without an aggregation tag.
    pub fn base_label(&self) -> &'static str {
        match self {
            Self::GpuUtilization => "GPU Utilization (%)",
            Self::GpuUsedMemory => "GPU Used Memory (MB)",
            Self::GpuFreeMemory => "GPU Free Memory (MB)",
            Self::GpuPowerUsage => "GPU Power Usage (W)",
            Self::Throughput => "Throughput (infer/sec)",
            Self::AvgLatency => "Average Latency (ms)",
            Self::P99Latency => "p99 Latency (ms)",
            Self::CpuUsedRam => "CPU Used RAM (MB)",
            Self::CpuAvailableRam => "CPU Available RAM (MB)",
        }
    }

    /// Column header with an aggregation-tag prefix, e.g. `Max Throughput (infer/sec)`.
    pub fn label(&self, tag: &str) -> String {
        if tag.is_empty() {
            self.base_label().to_string()
        } else {
            format!("{} {}", tag, self.base_label())
        }
    }
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}

/// Identifier of one GPU on the inference host.
pub type GpuId = u32;

/// One row of metric values, aligned positionally with a kind list.
pub type MetricRow = Vec<f64>;

/// The output of one monitoring pass for one run configuration.
///
/// Host metrics arrive as a single row; GPU metrics arrive as one row per GPU.
/// `BTreeMap` keeps per-GPU iteration order stable for table output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum MeasurementSnapshot {
    Host(MetricRow),
    Gpu(BTreeMap<GpuId, MetricRow>),
}

impl MeasurementSnapshot {
    pub fn is_gpu_scoped(&self) -> bool {
        matches!(self, Self::Gpu(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn label_prefixes_aggregation_tag() {
        assert_eq!(
            MetricKind::Throughput.label("Max"),
            "Max Throughput (infer/sec)"
        );
        assert_eq!(MetricKind::GpuUtilization.label(""), "GPU Utilization (%)");
    }

    #[test]
    fn kinds_are_hashable_and_comparable() {
        use std::collections::HashMap;

        let mut index = HashMap::new();
        index.insert(MetricKind::Throughput, 0usize);
        index.insert(MetricKind::P99Latency, 1usize);
        assert_eq!(index.get(&MetricKind::Throughput), Some(&0));
        assert_ne!(MetricKind::Throughput, MetricKind::AvgLatency);
    }

    #[test]
    fn snapshot_scope_check() {
        let host = MeasurementSnapshot::Host(vec![1.0, 2.0]);
        let gpu = MeasurementSnapshot::Gpu(BTreeMap::from([(0, vec![0.5])]));
        assert!(!host.is_gpu_scoped());
        assert!(gpu.is_gpu_scoped());
    }
}
