use thiserror::Error;

/// Errors returned by gesture operations.
#[derive(Debug, Error)]
pub enum GestureError {
    #[error("line {line}: expected 3 values, found {found}: {text}")]
    Parse {
        line: usize,
        found: usize,
        text: String,
    },

    #[error("no samples")]
    Empty,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, GestureError>;
