//! # cellflow
//!
//! An in-memory formula engine for a grid of named cells.
//!
//! Each cell holds formula text. The engine parses it into an [`Equation`],
//! tracks which cells it depends on, evaluates it, and re-evaluates every
//! dependent cell whenever a cell changes.
//!
//! ## Formula syntax
//!
//! - a number: `42`
//! - a quoted string: `"text"`
//! - a cell reference: `A1`, `AB23`
//! - a range, only meaningful as a function argument: `A1:B10`
//! - a prefix function call: `(ADD 1 (TIMES A1 2) B1:B3)`
//!
//! ## Example
//!
//! ```rust
//! use cellflow::prelude::*;
//!
//! let mut graph = DependencyGraph::new(FunctionRegistry::builtin());
//!
//! graph.update_cells([
//!     ("A1", "A2"),
//!     ("A2", "2"),
//!     ("A3", "(TIMES A1 A2 3)"),
//! ]);
//!
//! assert_eq!(graph.value_of_cell("A1"), &Value::Number(2.0));
//! assert_eq!(graph.value_of_cell("A3"), &Value::Number(12.0));
//! assert_eq!(graph.cells_dependent_on("A2"), vec!["A1", "A3"]);
//! ```

pub mod error;
pub mod graph;
pub mod options;
pub mod prelude;

pub use error::{GraphError, Result};
pub use graph::DependencyGraph;
pub use options::{GraphOptions, DEFAULT_MAX_RANGE_CELLS};

// Re-export core types
pub use cellflow_core::{CellAddress, CellRange};

// Re-export formula types
pub use cellflow_formula::{
    evaluate, parse, tokenize, try_parse, Equation, FormulaError, FormulaResult, FunctionImpl,
    FunctionRegistry, Token, Value,
};
