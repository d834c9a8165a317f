//! Sweep-level result collection and table compilation.

use std::collections::{BTreeMap, HashMap};
use std::rc::Rc;

use tp_types::{GpuId, MeasurementSnapshot, MetricKind, MetricRow, ResultError, RunConfig, TpResult};

use crate::comparator::ResultComparator;
use crate::queue::RankingQueue;
use crate::ranked::RankedResult;
use crate::table::{ResultTable, TableCell};

/// Table key for standalone-server GPU telemetry.
pub const SERVER_ONLY_TABLE: &str = "server_gpu_metrics";
/// Table key for per-model GPU metrics.
pub const MODEL_GPU_TABLE: &str = "model_gpu_metrics";
/// Table key for per-model host metrics.
pub const MODEL_HOST_TABLE: &str = "model_host_metrics";

const HOST_HEADERS: [&str; 3] = ["Model", "Batch", "Concurrency"];
const GPU_HEADERS: [&str; 4] = ["Model", "GPU ID", "Batch", "Concurrency"];
const SERVER_ROW_LABEL: &str = "inference-server";

/// Collects per-configuration results for one model sweep and compiles them
/// into output tables in best-to-worst order.
///
/// Expected call sequence: `create_tables` and `set_result_comparator` once,
/// then per run configuration `init_result` / `add_model_data`* /
/// `complete_result`, and `compile` once at sweep end. Server telemetry goes
/// straight to its table via `add_server_data` and never enters the ranking.
/// Single-threaded; concurrent callers need external serialization.
pub struct ResultManager {
    tables: HashMap<String, ResultTable>,
    comparator: Option<Rc<ResultComparator>>,
    queue: Option<RankingQueue<RankedResult, ResultComparator>>,
    current: Option<RankedResult>,
}

impl ResultManager {
    pub fn new() -> Self {
        Self {
            tables: HashMap::new(),
            comparator: None,
            queue: None,
            current: None,
        }
    }

    /// Set the comparator that orders this sweep's results. Must be called
    /// before the first `init_result`.
    pub fn set_result_comparator(&mut self, comparator: ResultComparator) {
        let comparator = Rc::new(comparator);
        self.queue = Some(RankingQueue::new(Rc::clone(&comparator)));
        self.comparator = Some(comparator);
    }

    /// Create the three output tables: server-only and model GPU metrics
    /// (GPU identity columns) and model host metrics (host identity columns).
    /// Metric columns are labeled through each kind with the aggregation tag
    /// as prefix.
    pub fn create_tables(
        &mut self,
        gpu_kinds: &[MetricKind],
        host_kinds: &[MetricKind],
        aggregation_tag: &str,
    ) {
        self.add_table(SERVER_ONLY_TABLE, "Server Only", &GPU_HEADERS, gpu_kinds, aggregation_tag);
        self.add_table(MODEL_GPU_TABLE, "Models (GPU Metrics)", &GPU_HEADERS, gpu_kinds, aggregation_tag);
        self.add_table(MODEL_HOST_TABLE, "Models (Inference)", &HOST_HEADERS, host_kinds, aggregation_tag);
        tracing::debug!("created {} result tables", self.tables.len());
    }

    /// Start accumulating a fresh result for `run_config`.
    pub fn init_result(&mut self, run_config: RunConfig) -> TpResult<()> {
        if self.tables.is_empty() {
            return Err(uninitialized("cannot initialize results without tables"));
        }
        if self.comparator.is_none() {
            return Err(uninitialized(
                "cannot initialize results without setting a result comparator",
            ));
        }
        self.current = Some(RankedResult::new(run_config));
        Ok(())
    }

    /// Write standalone-server telemetry directly into the server-only table,
    /// one row per GPU. Columns that do not apply to a standalone server get
    /// `default_value`.
    pub fn add_server_data(
        &mut self,
        measurements: &BTreeMap<GpuId, MetricRow>,
        default_value: TableCell,
    ) -> TpResult<()> {
        for (gpu_id, metrics) in measurements {
            let mut row = vec![
                TableCell::from(SERVER_ROW_LABEL),
                TableCell::Integer(u64::from(*gpu_id)),
                default_value.clone(),
                default_value.clone(),
            ];
            row.extend(metrics.iter().map(|v| TableCell::Float(*v)));
            self.table_mut(SERVER_ONLY_TABLE)?.insert_row(row);
        }
        Ok(())
    }

    /// Append one monitoring pass's measurements to the in-progress result.
    pub fn add_model_data(&mut self, snapshot: MeasurementSnapshot) -> TpResult<()> {
        let current = self
            .current
            .as_mut()
            .ok_or_else(|| uninitialized("no result in progress; call init_result first"))?;
        current.add_data(snapshot);
        Ok(())
    }

    /// Push the in-progress result into the ranking queue.
    pub fn complete_result(&mut self) -> TpResult<()> {
        let result = self
            .current
            .take()
            .ok_or_else(|| uninitialized("no result in progress; call init_result first"))?;
        let queue = self
            .queue
            .as_mut()
            .ok_or_else(|| uninitialized("result comparator was never set"))?;
        queue.push(result)
    }

    /// Drain the ranking queue best-to-worst and flatten every result into
    /// the model tables.
    ///
    /// Each combination of a result's run configuration yields one host row
    /// and one GPU row per GPU id, zipped positionally against the result's
    /// snapshots.
    pub fn compile(&mut self) -> TpResult<()> {
        if self.tables.is_empty() {
            return Err(uninitialized("cannot compile results without tables"));
        }
        let mut ranked = Vec::new();
        if let Some(queue) = self.queue.as_mut() {
            tracing::debug!("compiling {} ranked results", queue.len());
            while let Some(result) = queue.pop_best()? {
                ranked.push(result);
            }
        }
        for result in &ranked {
            self.compile_result(result)?;
        }
        Ok(())
    }

    pub fn all_tables(&self) -> &HashMap<String, ResultTable> {
        &self.tables
    }

    pub fn server_table(&self) -> TpResult<&ResultTable> {
        self.table(SERVER_ONLY_TABLE)
    }

    /// The model GPU-metrics and host-metrics tables, in that order.
    pub fn model_tables(&self) -> TpResult<(&ResultTable, &ResultTable)> {
        Ok((self.table(MODEL_GPU_TABLE)?, self.table(MODEL_HOST_TABLE)?))
    }

    fn compile_result(&mut self, result: &RankedResult) -> TpResult<()> {
        let (gpu_snapshots, host_snapshots) = result.measurements();
        let combinations = &result.run_config().combinations;

        for (i, combination) in combinations.iter().enumerate() {
            match host_snapshots.get(i) {
                Some(row) => {
                    let mut cells = vec![
                        TableCell::Text(combination.model_name.clone()),
                        TableCell::Integer(u64::from(combination.batch_size)),
                        TableCell::Text(combination.concurrency_range.clone()),
                    ];
                    cells.extend(row.iter().map(|v| TableCell::Float(*v)));
                    self.table_mut(MODEL_HOST_TABLE)?.insert_row(cells);
                }
                None => tracing::warn!(
                    model = %combination.model_name,
                    combination = i,
                    "no host snapshot for combination; skipping row"
                ),
            }

            match gpu_snapshots.get(i) {
                Some(per_gpu) => {
                    for (gpu_id, metrics) in per_gpu {
                        let mut cells = vec![
                            TableCell::Text(combination.model_name.clone()),
                            TableCell::Integer(u64::from(*gpu_id)),
                            TableCell::Integer(u64::from(combination.batch_size)),
                            TableCell::Text(combination.concurrency_range.clone()),
                        ];
                        cells.extend(metrics.iter().map(|v| TableCell::Float(*v)));
                        self.table_mut(MODEL_GPU_TABLE)?.insert_row(cells);
                    }
                }
                None => tracing::warn!(
                    model = %combination.model_name,
                    combination = i,
                    "no GPU snapshot for combination; skipping rows"
                ),
            }
        }
        Ok(())
    }

    fn add_table(
        &mut self,
        key: &str,
        title: &str,
        identity_headers: &[&str],
        kinds: &[MetricKind],
        aggregation_tag: &str,
    ) {
        let mut headers: Vec<String> = identity_headers.iter().map(|h| h.to_string()).collect();
        headers.extend(kinds.iter().map(|kind| kind.label(aggregation_tag)));
        self.tables
            .insert(key.to_string(), ResultTable::new(title, headers));
    }

    fn table(&self, key: &str) -> TpResult<&ResultTable> {
        self.tables.get(key).ok_or_else(|| unknown_table(key))
    }

    fn table_mut(&mut self, key: &str) -> TpResult<&mut ResultTable> {
        self.tables.get_mut(key).ok_or_else(|| unknown_table(key))
    }
}

impl Default for ResultManager {
    fn default() -> Self {
        Self::new()
    }
}

fn uninitialized(message: &str) -> tp_types::TpError {
    ResultError::UninitializedResultState {
        message: message.to_string(),
    }
    .into()
}

fn unknown_table(key: &str) -> tp_types::TpError {
    ResultError::UnknownTableKey {
        key: key.to_string(),
    }
    .into()
}
