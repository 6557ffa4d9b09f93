//! Error types for graph updates

use cellflow_formula::FormulaError;
use thiserror::Error;

/// Result type alias using [`GraphError`]
pub type Result<T> = std::result::Result<T, GraphError>;

/// Reasons a cell update can be refused
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The new formula would make the cell depend on itself through other cells
    #[error("Circular reference: {0}")]
    CircularReference(String),

    /// The formula could not be turned into dependencies
    #[error(transparent)]
    Formula(#[from] FormulaError),
}
