//! Prelude module - common imports for cellflow users
//!
//! ```rust
//! use cellflow::prelude::*;
//! ```

pub use crate::{
    CellAddress, CellRange, DependencyGraph, Equation, FunctionRegistry, GraphError,
    GraphOptions, Value,
};
