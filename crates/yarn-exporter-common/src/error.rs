use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExporterError {
    #[error("invalid metric kind: {0}")]
    InvalidKind(String),
    #[error("invalid metric name: {0}")]
    InvalidMetricName(String),
    #[error("label arity mismatch for {metric}: expected {expected} values, got {actual}")]
    LabelArityMismatch {
        metric: String,
        expected: usize,
        actual: usize,
    },
    #[error("upstream error: {0}")]
    Upstream(String),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

impl ExporterError {
    /// Errors that come from the polled cluster rather than from this process.
    pub fn is_upstream(&self) -> bool {
        matches!(self, Self::Upstream(_))
    }
}

pub type Result<T> = std::result::Result<T, ExporterError>;
