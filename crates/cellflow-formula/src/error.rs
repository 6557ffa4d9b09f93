//! Formula error types

use thiserror::Error;

/// Result type for formula operations
pub type FormulaResult<T> = std::result::Result<T, FormulaError>;

/// Errors that can occur during formula parsing or evaluation
///
/// None of these escape the crate's public `parse`/`evaluate` entry points;
/// they are turned into [`Equation::Error`](crate::Equation::Error) or
/// [`Value::Error`](crate::Value::Error) and carried as data.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    /// Bare token that is neither a number, a cell reference nor a range
    #[error("Unknown value: {0}")]
    UnknownValue(String),

    /// Opening quote without a closing one
    #[error("Unterminated string")]
    UnterminatedString,

    /// Expression consisting of no tokens
    #[error("Empty expression")]
    EmptyExpression,

    /// Expression starting with `)`
    #[error("Unexpected close paren at start of expression")]
    UnexpectedCloseParen,

    /// More than one token where a single value was expected
    #[error("Unexpected tokens after simple value")]
    TrailingTokens,

    /// Tokens following the close paren of a function call
    #[error("Unexpected tokens after function call")]
    TrailingAfterCall,

    /// Function call whose parentheses never close
    #[error("Unmatched open paren")]
    UnmatchedParen,

    /// Function calls nested past the parser's limit
    #[error("Formula nested deeper than {0} levels")]
    TooDeep(usize),

    /// `(` not followed by a bare function name
    #[error("Expected function name")]
    MissingFunctionName,

    /// Malformed or reversed range bounds
    #[error(transparent)]
    InvalidRange(#[from] cellflow_core::Error),

    /// Range expanding to more cells than the configured limit
    #[error("Range {range} covers {cells} cells, more than the limit of {limit}")]
    RangeTooLarge { range: String, cells: u64, limit: u64 },

    /// Function name not present in the registry
    #[error("Unknown function {0}")]
    UnknownFunction(String),

    /// Range that contains the cell being evaluated
    #[error("Self referencing cell: {0}")]
    SelfReference(String),

    /// A range expression used as a cell's final value
    #[error("Cannot return cell range as value")]
    RangeAsValue,

    /// Function received arguments it cannot work with
    #[error("{function} requires at least one numeric argument")]
    MissingArguments { function: &'static str },

    /// Division by zero
    #[error("Division by zero")]
    DivisionByZero,
}
