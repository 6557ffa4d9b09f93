//! Cell dependency graph and incremental recalculation
//!
//! [`DependencyGraph`] owns every cell's equation and computed value together
//! with the two-way dependency index. Updating a cell re-parses its text,
//! rewires its dependency edges, evaluates it, and re-evaluates everything
//! that transitively depends on it.
//!
//! # Example
//!
//! ```rust
//! use cellflow::{DependencyGraph, FunctionRegistry, Value};
//!
//! let mut graph = DependencyGraph::new(FunctionRegistry::builtin());
//! graph.update_cell("A1", "2");
//! graph.update_cell("A2", "3");
//! graph.update_cell("B1", "(ADD A1 A2)");
//! assert_eq!(graph.value_of_cell("B1"), &Value::Number(5.0));
//!
//! graph.update_cell("A1", "10");
//! assert_eq!(graph.value_of_cell("B1"), &Value::Number(13.0));
//! assert_eq!(graph.cells_dependent_on("A1"), vec!["B1"]);
//! ```

use crate::error::{GraphError, Result};
use crate::options::GraphOptions;
use ahash::{AHashMap, AHashSet};
use cellflow_core::CellAddress;
use cellflow_formula::{
    collect_dependencies, evaluate, parse, DependencyIndex, Equation, FormulaError,
    FunctionRegistry, Value,
};

static EMPTY: Value = Value::Empty;

/// Stateful formula engine for one spreadsheet
///
/// Cells are plain string keys; a cell without an equation or value behaves
/// as empty. All operations run to completion synchronously, cascade
/// included.
#[derive(Debug)]
pub struct DependencyGraph {
    options: GraphOptions,
    /// Functions callable from formulas, fixed at construction
    functions: FunctionRegistry,
    /// Cell → parsed equation (absent = empty cell)
    expressions: AHashMap<String, Equation>,
    /// Cell → computed value (absent = empty)
    values: AHashMap<String, Value>,
    /// Cell ↔ cells it depends on / cells depending on it
    index: DependencyIndex,
    /// Cells refused for closing a cycle → the dependencies they asked for
    circular: AHashMap<String, AHashSet<String>>,
}

impl Default for DependencyGraph {
    /// Graph with the builtin arithmetic functions
    fn default() -> Self {
        Self::new(FunctionRegistry::builtin())
    }
}

impl DependencyGraph {
    /// Create a graph calling into `functions`, with default options
    pub fn new(functions: FunctionRegistry) -> Self {
        Self::with_options(functions, GraphOptions::default())
    }

    /// Create a graph with custom options
    pub fn with_options(functions: FunctionRegistry, options: GraphOptions) -> Self {
        Self {
            options,
            functions,
            expressions: AHashMap::new(),
            values: AHashMap::new(),
            index: DependencyIndex::new(),
            circular: AHashMap::new(),
        }
    }

    /// Options this graph was created with
    pub fn options(&self) -> &GraphOptions {
        &self.options
    }

    /// Function registry this graph evaluates with
    pub fn functions(&self) -> &FunctionRegistry {
        &self.functions
    }

    /// Set a cell's formula text and recalculate everything depending on it
    ///
    /// Failures never escape. A formula that would close a dependency cycle
    /// is stored without edges and evaluates to a circular reference error
    /// until a later update breaks the cycle.
    /// Any other failure leaves the cell untouched, unless
    /// [`GraphOptions::surface_update_failures`] is set, in which case the
    /// failure becomes the cell's error value.
    pub fn update_cell(&mut self, cell: &str, raw: &str) {
        let key = canonical_key(cell);
        match self.try_update_cell(&key, raw) {
            Ok(()) => {}
            Err(e) if self.options.surface_update_failures => {
                tracing::warn!(cell = %key, error = %e, "update failed, recording error");
                self.record_failure(&key, &e);
            }
            Err(e) => {
                tracing::warn!(cell = %key, error = %e, "update failed, cell left unchanged");
            }
        }
    }

    /// Set a cell's formula text, reporting refused updates
    ///
    /// On `Err` nothing about the graph has changed.
    pub fn try_update_cell(&mut self, cell: &str, raw: &str) -> Result<()> {
        let key = canonical_key(cell);
        let expression = parse(raw);

        let mut dependencies =
            collect_dependencies(expression.as_ref(), self.options.max_range_cells)?;

        // A direct self reference is dropped rather than reported
        if dependencies.contains(&key) {
            dependencies.clear();
        }

        self.circular.remove(&key);
        let cyclic = self.index.would_create_cycle(&key, &dependencies);
        if cyclic {
            tracing::warn!(cell = %key, "refusing dependency edges that close a cycle");
            self.circular.insert(key.clone(), std::mem::take(&mut dependencies));
        }

        tracing::debug!(cell = %key, dependencies = dependencies.len(), "updating cell");
        self.index.replace_precedents(&key, dependencies);
        match expression {
            Some(expression) => {
                self.expressions.insert(key.clone(), expression);
            }
            None => {
                self.expressions.remove(&key);
            }
        }

        if cyclic {
            let error = GraphError::CircularReference(key.clone());
            self.values.insert(key.clone(), Value::error(error.to_string()));
            self.evaluate_dependents(&key);
        } else {
            self.evaluate_cell_and_all_dependencies(&key);
        }
        self.retry_circular();

        Ok(())
    }

    /// Apply updates in order; later entries see values committed by earlier ones
    ///
    /// There is no rollback: each entry is committed before the next runs.
    pub fn update_cells<I, C, R>(&mut self, updates: I)
    where
        I: IntoIterator<Item = (C, R)>,
        C: AsRef<str>,
        R: AsRef<str>,
    {
        for (cell, raw) in updates {
            self.update_cell(cell.as_ref(), raw.as_ref());
        }
    }

    /// Re-evaluate a cell, then every cell that transitively depends on it
    pub fn evaluate_cell_and_all_dependencies(&mut self, cell: &str) {
        let key = canonical_key(cell);
        self.evaluate_cell(&key);
        self.evaluate_dependents(&key);
    }

    /// Current value of a cell ([`Value::Empty`] when it has none)
    pub fn value_of_cell(&self, cell: &str) -> &Value {
        self.values.get(&canonical_key(cell)).unwrap_or(&EMPTY)
    }

    /// Cells whose formulas reference `cell`, sorted by key
    pub fn cells_dependent_on(&self, cell: &str) -> Vec<&str> {
        let mut cells: Vec<&str> = self.index.dependents(&canonical_key(cell)).collect();
        cells.sort_unstable();
        cells
    }

    /// Cells referenced by `cell`'s formula, sorted by key
    pub fn precedents_of(&self, cell: &str) -> Vec<&str> {
        let mut cells: Vec<&str> = self.index.precedents(&canonical_key(cell)).collect();
        cells.sort_unstable();
        cells
    }

    /// Parsed equation stored for a cell
    pub fn expression_of(&self, cell: &str) -> Option<&Equation> {
        self.expressions.get(&canonical_key(cell))
    }

    /// Cells currently refused for closing a dependency cycle, sorted by key
    pub fn circular_cells(&self) -> Vec<&str> {
        let mut cells: Vec<&str> = self.circular.keys().map(String::as_str).collect();
        cells.sort_unstable();
        cells
    }

    /// Every cell holding an equation or a value, sorted by key
    pub fn cells(&self) -> Vec<&str> {
        let mut cells: Vec<&str> = self
            .expressions
            .keys()
            .chain(self.values.keys())
            .map(String::as_str)
            .collect();
        cells.sort_unstable();
        cells.dedup();
        cells
    }

    fn evaluate_dependents(&mut self, key: &str) {
        for dependent in self.index.recalc_order(key) {
            tracing::trace!(cell = %dependent, source = key, "recalculating dependent");
            self.evaluate_cell(&dependent);
        }
    }

    fn evaluate_cell(&mut self, key: &str) {
        let value = evaluate(
            self.expressions.get(key),
            key,
            &self.values,
            &self.functions,
        );

        let value = if value.is_array() {
            FormulaError::RangeAsValue.into()
        } else {
            value
        };

        match value {
            Value::Empty => {
                self.values.remove(key);
            }
            value => {
                self.values.insert(key.to_string(), value);
            }
        }
    }

    /// Install the edges of every refused cell whose cycle is now broken
    fn retry_circular(&mut self) {
        loop {
            let ready = {
                let mut cells: Vec<&String> = self.circular.keys().collect();
                cells.sort_unstable();
                cells
                    .into_iter()
                    .find(|cell| !self.index.would_create_cycle(cell, &self.circular[*cell]))
                    .cloned()
            };

            let cell = match ready {
                Some(cell) => cell,
                None => break,
            };
            if let Some(dependencies) = self.circular.remove(&cell) {
                tracing::debug!(cell = %cell, "cycle broken, restoring dependencies");
                self.index.replace_precedents(&cell, dependencies);
                self.evaluate_cell_and_all_dependencies(&cell);
            }
        }
    }

    fn record_failure(&mut self, key: &str, error: &GraphError) {
        self.circular.remove(key);
        self.index.clear_precedents(key);
        self.expressions
            .insert(key.to_string(), Equation::error(error.to_string()));
        self.evaluate_cell_and_all_dependencies(key);
        self.retry_circular();
    }
}

/// Canonical key for cell addresses (`A01` → `A1`); other keys pass through
fn canonical_key(cell: &str) -> String {
    CellAddress::parse(cell)
        .map(|address| address.to_key())
        .unwrap_or_else(|_| cell.to_string())
}
