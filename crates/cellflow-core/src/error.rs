//! Error types for cellflow-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while handling cell addresses
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Range whose start column lies after its end column
    #[error("Start column must be before end column")]
    ReversedColumns,

    /// Range whose start row lies after its end row
    #[error("Start row must be before end row")]
    ReversedRows,

    /// Column or row outside the representable grid
    #[error("Cell address out of bounds: {0}")]
    OutOfBounds(String),
}
