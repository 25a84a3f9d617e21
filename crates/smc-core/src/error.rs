//! Unified error type for the analysis core.
//!
//! [`SmcError`] gives every crate in the workspace (`smc-io`, `smc-algo`,
//! `smc-cli`) one error type to return, with a variant per row of the
//! error-kind table in the specification. Each variant maps to a stable
//! process exit code at the CLI boundary; see `smc-cli::run`.

use thiserror::Error;

/// Unified error type for all `smc-*` operations.
#[derive(Error, Debug)]
pub enum SmcError {
    /// Bad or missing CLI arguments. Exit code 1.
    #[error("argument error: {0}")]
    ArgError(String),

    /// Filesystem access failures from a loader. Exit code 2.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Malformed protobuf, YAML, or JSON input. Exit code 2.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// A required field was missing, or a referenced label is unknown.
    /// Not fatal by itself; callers log and continue per the label-
    /// defaulting policy. Exit code 2 if it reaches the CLI unhandled.
    #[error("schema error: {0}")]
    SchemaError(String),

    /// Numerical failure: negative probability, `T(i) > 1`, or a NaN
    /// produced during iteration. Exit code 3.
    #[error("numeric error: {0}")]
    NumericError(String),

    /// Catch-all for errors bubbled up through `anyhow` at the CLI
    /// boundary.
    #[error("{0}")]
    Other(String),
}

/// Convenience alias for `Result<T, SmcError>`.
pub type SmcResult<T> = Result<T, SmcError>;

impl From<anyhow::Error> for SmcError {
    fn from(err: anyhow::Error) -> Self {
        SmcError::Other(err.to_string())
    }
}

impl From<serde_json::Error> for SmcError {
    fn from(err: serde_json::Error) -> Self {
        SmcError::DecodeError(err.to_string())
    }
}
