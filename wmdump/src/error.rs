use thiserror::Error;

/// Errors returned while reading wmdump logs.
#[derive(Debug, Error)]
pub enum WmdumpError {
    #[error("malformed {kind} report: {text}")]
    Malformed { kind: &'static str, text: String },

    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<WmdumpError>,
    },

    #[error("sample {index} has no timestamp")]
    MissingTimestamp { index: usize },

    #[error("sample {index} is timestamped before its predecessor")]
    TimeWentBackwards { index: usize },

    #[error("sample period must be positive")]
    ZeroPeriod,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, WmdumpError>;
