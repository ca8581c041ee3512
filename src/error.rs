use thiserror::Error;

/// Errors surfaced while a driver or operator is running.
///
/// Per-run failures (`ConfigurationInvalid`, `DimensionMismatch`) propagate
/// up and halt the driver. Per-chromosome failures (a fully degenerate
/// centroid set, a non-finite objective) are absorbed by the drivers, which
/// assign the worst fitness so selection culls the chromosome.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    ConfigurationInvalid(&'static str),

    #[error("dimension mismatch: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// Every centroid row is dead at assignment time, leaving an instance
    /// without a cluster to join.
    #[error("instance without group: all centroids are dead")]
    DegenerateCluster,
}

pub type Result<T> = std::result::Result<T, Error>;
