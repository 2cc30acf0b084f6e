use polars::error::PolarsError;
use thiserror::Error;

/// Errors that can occur during a pipeline run.
///
/// The pipeline performs no local recovery: every variant is fatal for the
/// run and propagates up to the binary, which reports it and exits non-zero.
#[derive(Debug, Error)]
pub enum EtlError {
    #[error("dataframe operation failed: {0}")]
    Polars(#[from] PolarsError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid path pattern `{pattern}`: {source}")]
    Pattern {
        pattern: String,
        source: regex::Error,
    },
}

pub type Result<T> = std::result::Result<T, EtlError>;
