//! # cellflow-formula
//!
//! Formula parser and evaluator for cellflow.
//!
//! This crate provides:
//! - Tokenizing formula text (parentheses, quoted strings, bare values)
//! - Parsing prefix function-call formulas (text → [`Equation`])
//! - Evaluating equations against cell values (→ [`Value`])
//! - A pluggable [`FunctionRegistry`] with the default arithmetic functions
//! - Dependency extraction and the two-way [`DependencyIndex`]
//!
//! ## Example
//!
//! ```rust
//! use cellflow_formula::{evaluate, parse, FunctionRegistry, Value};
//! use ahash::AHashMap;
//!
//! let equation = parse("(ADD 1 (TIMES 2 3))");
//! let values = AHashMap::new();
//! let registry = FunctionRegistry::builtin();
//!
//! let result = evaluate(equation.as_ref(), "A1", &values, &registry);
//! assert_eq!(result, Value::Number(7.0));
//! ```

pub mod ast;
pub mod dependency;
pub mod error;
pub mod evaluator;
pub mod functions;
pub mod parser;
pub mod tokenizer;

pub use ast::Equation;
pub use dependency::{collect_dependencies, DependencyIndex};
pub use error::{FormulaError, FormulaResult};
pub use evaluator::{evaluate, Value};
pub use functions::{FunctionImpl, FunctionRegistry};
pub use parser::{parse, try_parse};
pub use tokenizer::{tokenize, Token};
