//! Multi-criterion three-way comparison of ranked results.

use std::cmp::Ordering;
use std::collections::HashMap;

use tp_types::{MetricKind, MetricRow, ResultError, TpResult};

use crate::ranked::RankedResult;

/// A three-way comparison capability over values of type `T`.
///
/// Entities stay free of comparison logic; anything that needs an ordering
/// takes one of these (see [`OrderedBy`] and [`crate::RankingQueue`]).
pub trait ThreeWayCompare<T> {
    /// `Greater` means `a` is better than `b`.
    fn compare(&self, a: &T, b: &T) -> TpResult<Ordering>;
}

/// Compares two [`RankedResult`]s under configured metric priorities.
///
/// Construction fixes the column index of every GPU-scoped and host-scoped
/// metric kind, the priority order in which kinds decide the comparison, and
/// a tolerance threshold given as a percentage.
///
/// For each result the accumulated snapshots are averaged column-wise per
/// universe (every GPU row of every snapshot contributes one row to the GPU
/// average). Priorities are then walked in order: with `value_a` as the
/// baseline, a difference exceeding `percent/100 * value_a` decides the
/// comparison; a difference within the threshold defers to the next priority.
/// The baseline is always taken from the first argument, so the relation is
/// not symmetric near the threshold.
#[derive(Debug, Clone)]
pub struct ResultComparator {
    gpu_index: HashMap<MetricKind, usize>,
    host_index: HashMap<MetricKind, usize>,
    priorities: Vec<MetricKind>,
    threshold_factor: f64,
}

impl ResultComparator {
    pub fn new(
        gpu_kinds: &[MetricKind],
        host_kinds: &[MetricKind],
        priorities: Vec<MetricKind>,
        threshold_percent: f64,
    ) -> Self {
        let gpu_index = gpu_kinds.iter().copied().zip(0..).collect();
        let host_index = host_kinds.iter().copied().zip(0..).collect();
        Self {
            gpu_index,
            host_index,
            priorities,
            threshold_factor: threshold_percent / 100.0,
        }
    }

    /// Column-wise averages of a result's snapshots: `(gpu_avg, host_avg)`.
    /// An empty snapshot sequence averages to an empty row.
    fn averages(result: &RankedResult) -> (MetricRow, MetricRow) {
        let gpu_rows: Vec<&MetricRow> = result
            .gpu_snapshots()
            .iter()
            .flat_map(|snapshot| snapshot.values())
            .collect();
        let host_rows: Vec<&MetricRow> = result.host_snapshots().iter().collect();
        (average_rows(&gpu_rows), average_rows(&host_rows))
    }
}

impl ThreeWayCompare<RankedResult> for ResultComparator {
    fn compare(&self, a: &RankedResult, b: &RankedResult) -> TpResult<Ordering> {
        let (gpu_a, host_a) = Self::averages(a);
        let (gpu_b, host_b) = Self::averages(b);

        for priority in &self.priorities {
            let (avg_a, avg_b, idx) = if let Some(&idx) = self.gpu_index.get(priority) {
                (&gpu_a, &gpu_b, idx)
            } else if let Some(&idx) = self.host_index.get(priority) {
                (&host_a, &host_b, idx)
            } else {
                return Err(ResultError::UnknownMetricCategory { kind: *priority }.into());
            };

            // Short average rows (including empty ones) read as 0.0 so that a
            // result without snapshots still compares instead of failing.
            let value_a = avg_a.get(idx).copied().unwrap_or(0.0);
            let value_b = avg_b.get(idx).copied().unwrap_or(0.0);

            let threshold = self.threshold_factor * value_a;
            let diff = value_a - value_b;
            if diff > threshold {
                return Ok(Ordering::Greater);
            }
            if diff < -threshold {
                return Ok(Ordering::Less);
            }
        }
        Ok(Ordering::Equal)
    }
}

fn average_rows(rows: &[&MetricRow]) -> MetricRow {
    let Some(first) = rows.first() else {
        return MetricRow::new();
    };
    let width = first.len();
    let mut avg = vec![0.0; width];
    for row in rows {
        for (slot, value) in avg.iter_mut().zip(row.iter()) {
            *slot += value;
        }
    }
    for slot in &mut avg {
        *slot /= rows.len() as f64;
    }
    avg
}

/// Borrows a value together with a comparator, deriving the standard
/// comparison operators from the comparator's three-way result.
///
/// A comparator failure surfaces as `partial_cmp() == None` (and `==` false),
/// which keeps the adapter usable for any [`ThreeWayCompare`] without baking
/// per-entity ordering in.
pub struct OrderedBy<'a, T, C: ThreeWayCompare<T>> {
    value: &'a T,
    comparator: &'a C,
}

impl<'a, T, C: ThreeWayCompare<T>> OrderedBy<'a, T, C> {
    pub fn new(value: &'a T, comparator: &'a C) -> Self {
        Self { value, comparator }
    }

    pub fn value(&self) -> &T {
        self.value
    }
}

impl<T, C: ThreeWayCompare<T>> PartialEq for OrderedBy<'_, T, C> {
    fn eq(&self, other: &Self) -> bool {
        matches!(
            self.comparator.compare(self.value, other.value),
            Ok(Ordering::Equal)
        )
    }
}

impl<T, C: ThreeWayCompare<T>> PartialOrd for OrderedBy<'_, T, C> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.comparator.compare(self.value, other.value).ok()
    }
}
