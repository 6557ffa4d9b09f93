//! Formula evaluator
//!
//! Evaluates equation ASTs against the current cell values to produce values.

use crate::ast::Equation;
use crate::error::FormulaError;
use crate::functions::FunctionRegistry;
use ahash::AHashMap;
use cellflow_core::{CellAddress, CellRange};
use std::fmt;

/// Value types during formula evaluation
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Value {
    Number(f64),
    String(String),
    Error {
        message: String,
    },
    #[default]
    Empty,
    /// Expanded range, rows top to bottom. Only legal as a function argument.
    Array(Vec<Vec<Value>>),
}

impl Value {
    /// Create an error value
    pub fn error(message: impl Into<String>) -> Self {
        Value::Error {
            message: message.into(),
        }
    }

    /// Numeric content, if this is a number
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Text content, if this is a string
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }

    /// Check if this is an error
    pub fn is_error(&self) -> bool {
        matches!(self, Value::Error { .. })
    }

    /// Get the error message if this is one
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Value::Error { message } => Some(message),
            _ => None,
        }
    }

    /// Check if this is the absence of a value
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    /// Check if this is an expanded range
    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }
}

impl From<FormulaError> for Value {
    fn from(error: FormulaError) -> Self {
        Value::error(error.to_string())
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Number(n)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

/// Renders the value for display: errors show their message, `Empty` is blank.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    write!(f, "{}", *n as i64)
                } else {
                    write!(f, "{}", n)
                }
            }
            Value::String(s) => f.write_str(s),
            Value::Error { message } => f.write_str(message),
            Value::Empty => Ok(()),
            Value::Array(rows) => {
                let rows: Vec<String> = rows
                    .iter()
                    .map(|row| {
                        row.iter()
                            .map(|v| v.to_string())
                            .collect::<Vec<_>>()
                            .join(", ")
                    })
                    .collect();
                write!(f, "{{{}}}", rows.join("; "))
            }
        }
    }
}

/// Context for formula evaluation
pub struct EvaluationContext<'a> {
    /// Key of the cell whose equation is being evaluated
    pub current_cell: &'a str,
    /// Already-computed cell values
    pub values: &'a AHashMap<String, Value>,
    /// Functions callable from formulas
    pub functions: &'a FunctionRegistry,
}

impl<'a> EvaluationContext<'a> {
    /// Create a new evaluation context
    pub fn new(
        current_cell: &'a str,
        values: &'a AHashMap<String, Value>,
        functions: &'a FunctionRegistry,
    ) -> Self {
        Self {
            current_cell,
            values,
            functions,
        }
    }

    /// Get the current value of a cell
    pub fn cell_value(&self, cell: &CellAddress) -> Value {
        self.values.get(&cell.to_key()).cloned().unwrap_or_default()
    }

    /// Get a range of cell values as an array
    ///
    /// A range covering the current cell is reported as a self reference.
    pub fn range_values(&self, range: &CellRange) -> Value {
        let covers_current = CellAddress::parse(self.current_cell)
            .map(|current| range.contains(&current))
            .unwrap_or(false);
        if covers_current {
            return FormulaError::SelfReference(self.current_cell.to_string()).into();
        }

        Value::Array(
            range
                .rows()
                .iter()
                .map(|row| row.iter().map(|cell| self.cell_value(cell)).collect())
                .collect(),
        )
    }

    /// Evaluate an equation
    pub fn evaluate(&self, equation: &Equation) -> Value {
        match equation {
            Equation::Number { value } => Value::Number(*value),
            Equation::String { value } => Value::String(value.clone()),
            Equation::CellReference { cell } => self.cell_value(cell),
            Equation::CellRange { range } => self.range_values(range),
            Equation::Function { name, arguments } => self.evaluate_function(name, arguments),
            Equation::Error { message } => Value::error(message.as_str()),
        }
    }

    /// Evaluate a function call
    fn evaluate_function(&self, name: &str, arguments: &[Equation]) -> Value {
        let func = match self.functions.get(name) {
            Some(func) => func,
            None => return FormulaError::UnknownFunction(name.to_string()).into(),
        };

        let args: Vec<Value> = arguments.iter().map(|arg| self.evaluate(arg)).collect();

        tracing::trace!(function = name, args = args.len(), "calling function");
        func(&args)
    }
}

/// Evaluate an equation for `current_cell`
///
/// `None` stands for an empty cell and evaluates to [`Value::Empty`].
pub fn evaluate(
    equation: Option<&Equation>,
    current_cell: &str,
    values: &AHashMap<String, Value>,
    functions: &FunctionRegistry,
) -> Value {
    match equation {
        Some(equation) => EvaluationContext::new(current_cell, values, functions).evaluate(equation),
        None => Value::Empty,
    }
}
