//! Formula Abstract Syntax Tree types

use cellflow_core::{CellAddress, CellRange};
use std::fmt;

/// Formula expression AST
///
/// An equation is owned by the cell it was parsed for and replaced wholesale
/// whenever that cell's text changes.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "camelCase"))]
pub enum Equation {
    // === Literals ===
    /// Numeric literal
    Number { value: f64 },
    /// String literal
    String { value: String },

    // === References ===
    /// Single cell reference
    CellReference { cell: CellAddress },
    /// Rectangular range reference, start corner top-left
    CellRange { range: CellRange },

    // === Function call ===
    /// Prefix function call; `name` is upper-cased
    Function {
        name: String,
        arguments: Vec<Equation>,
    },

    /// Parse failure captured as data
    Error { message: String },
}

impl Equation {
    /// Numeric literal
    pub fn number(value: f64) -> Self {
        Equation::Number { value }
    }

    /// String literal
    pub fn string(value: impl Into<String>) -> Self {
        Equation::String {
            value: value.into(),
        }
    }

    /// Single cell reference
    pub fn reference(cell: CellAddress) -> Self {
        Equation::CellReference { cell }
    }

    /// Range reference
    pub fn range(range: CellRange) -> Self {
        Equation::CellRange { range }
    }

    /// Function call; the name is upper-cased
    pub fn function(name: &str, arguments: Vec<Equation>) -> Self {
        Equation::Function {
            name: name.to_uppercase(),
            arguments,
        }
    }

    /// Captured parse failure
    pub fn error(message: impl Into<String>) -> Self {
        Equation::Error {
            message: message.into(),
        }
    }

    /// Check if this is a captured parse failure
    pub fn is_error(&self) -> bool {
        matches!(self, Equation::Error { .. })
    }
}

/// Renders canonical formula text, e.g. `(ADD 1 A2 "x" B1:C3)`.
///
/// Every variant except [`Equation::Error`] renders to text that parses back
/// into an equal equation.
impl fmt::Display for Equation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Equation::Number { value } => write!(f, "{}", value),
            Equation::String { value } => write!(f, "\"{}\"", value),
            Equation::CellReference { cell } => write!(f, "{}", cell),
            Equation::CellRange { range } => write!(f, "{}", range),
            Equation::Function { name, arguments } => {
                write!(f, "({}", name)?;
                for argument in arguments {
                    write!(f, " {}", argument)?;
                }
                write!(f, ")")
            }
            Equation::Error { message } => write!(f, "#ERROR: {}", message),
        }
    }
}
