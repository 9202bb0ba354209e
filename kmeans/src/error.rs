use thiserror::Error;

/// Errors returned by k-means operations.
#[derive(Debug, Error)]
pub enum KMeansError {
    #[error("no data points")]
    Empty,

    #[error("k must be positive")]
    ZeroClusters,

    #[error("cannot pick {k} distinct points from {n} observations")]
    TooFewPoints { k: usize, n: usize },

    #[error("dimension mismatch at point {index}: expected {expected}, got {got}")]
    DimensionMismatch {
        index: usize,
        expected: usize,
        got: usize,
    },

    #[error("point {index} has a non-finite component")]
    NonFinite { index: usize },

    #[error("cluster {cluster} is empty")]
    EmptyCluster { cluster: usize },
}

pub type Result<T> = std::result::Result<T, KMeansError>;
