use thiserror::Error;
use wiigee_hmm::HmmError;
use wiigee_quantizer::QuantizerError;

/// Errors returned by gesture models and the classifier.
#[derive(Debug, Error)]
pub enum RecognizerError {
    #[error("no training gestures")]
    NoGestures,

    #[error("training gesture {index} has no samples")]
    EmptyGesture { index: usize },

    #[error("model {id} is not trained")]
    NotTrained { id: u32 },

    #[error("model {id}: {what} is {got}, expected {expected}")]
    Inconsistent {
        id: u32,
        what: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("quantizer: {0}")]
    Quantizer(#[from] QuantizerError),

    #[error("hmm: {0}")]
    Hmm(#[from] HmmError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, RecognizerError>;
