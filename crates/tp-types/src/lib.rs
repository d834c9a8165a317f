pub mod errors;
pub mod metrics;
pub mod runconfig;

pub use errors::*;
pub use metrics::*;
pub use runconfig::*;
