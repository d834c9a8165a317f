//! # tp-results
//!
//! Result ranking for TunePilot sweeps.
//!
//! A [`ResultComparator`] ranks accumulated measurements under configurable
//! metric priorities and a tolerance threshold; [`ResultManager`] collects one
//! [`RankedResult`] per explored run configuration into a comparator-ordered
//! queue and flattens them best-to-worst into output tables.

mod comparator;
mod manager;
mod queue;
mod ranked;
mod table;

pub use comparator::{OrderedBy, ResultComparator, ThreeWayCompare};
pub use manager::{
    ResultManager, MODEL_GPU_TABLE, MODEL_HOST_TABLE, SERVER_ONLY_TABLE,
};
pub use queue::RankingQueue;
pub use ranked::RankedResult;
pub use table::{ResultTable, TableCell};
