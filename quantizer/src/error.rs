use thiserror::Error;

/// Errors returned by quantizer operations.
#[derive(Debug, Error)]
pub enum QuantizerError {
    #[error("gesture has no samples")]
    EmptyGesture,

    #[error("quantizer is not trained")]
    NotTrained,

    #[error("quantizer has {got} centroids, expected {expected}")]
    CentroidCount { expected: usize, got: usize },

    #[error("centroid {index} is not finite")]
    NonFiniteCentroid { index: usize },
}

pub type Result<T> = std::result::Result<T, QuantizerError>;
