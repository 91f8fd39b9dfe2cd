use thiserror::Error;

/// Errors produced by the measurement and analysis pipeline.
///
/// Apart from `Io` and `Json`, every variant is a deterministic validation failure and is
/// never retried.
#[derive(Error, Debug)]
pub enum BenchError {
    #[error("Invalid workload spec: {0}")]
    InvalidSpec(String),

    #[error("Insufficient data in {column} column: need at least {required} samples, got {n}")]
    InsufficientData {
        column: String,
        n: usize,
        required: usize,
    },

    #[error("Degenerate block size: {0} (must be at least 1)")]
    DegenerateBlock(usize),

    #[error("Invalid timing series: {0}")]
    InvalidSeries(String),

    #[error("Student's t distribution unavailable: {0}")]
    Distribution(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, BenchError>;
