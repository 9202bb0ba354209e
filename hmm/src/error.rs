use thiserror::Error;

/// Errors returned by HMM operations.
#[derive(Debug, Error)]
pub enum HmmError {
    #[error("model needs at least one state and one observation symbol")]
    ZeroSize,

    #[error("empty observation sequence")]
    EmptySequence,

    #[error("symbol {symbol} out of range: model has {observations} observation symbols")]
    SymbolOutOfRange { symbol: usize, observations: usize },

    #[error("no training sequence has a non-zero probability")]
    NoUsableSequence,

    #[error("{table} has {got} entries, expected {expected}")]
    Shape {
        table: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("{table} holds a value outside [0, 1]")]
    BadProbability { table: &'static str },
}

pub type Result<T> = std::result::Result<T, HmmError>;
