use thiserror::Error;

/// Errors reported by the `Result`-returning entry points.
///
/// Routine misses are not errors: `get`, `contains`, and `delete` report
/// them through `Option`/`bool`.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    #[error("key not found")]
    KeyNotFound,
    #[error("invalid base capacity {0}: must be non-negative and allocatable")]
    InvalidCapacity(isize),
    #[error("invalid load thresholds: grow above {grow_above}%, shrink below {shrink_below}%")]
    InvalidConfig { grow_above: usize, shrink_below: usize },
}
