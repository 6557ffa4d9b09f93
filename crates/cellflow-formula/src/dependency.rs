//! Dependency tracking for formula cells

use crate::ast::Equation;
use crate::error::{FormulaError, FormulaResult};
use ahash::{AHashMap, AHashSet};

/// Collect every cell an equation refers to
///
/// A reference contributes itself, a range contributes every cell of its
/// rectangle, and a function contributes the union of its arguments. Ranges
/// larger than `max_range_cells` are rejected.
pub fn collect_dependencies(
    equation: Option<&Equation>,
    max_range_cells: u64,
) -> FormulaResult<AHashSet<String>> {
    let mut dependencies = AHashSet::new();
    if let Some(equation) = equation {
        walk(equation, max_range_cells, &mut dependencies)?;
    }
    Ok(dependencies)
}

fn walk(equation: &Equation, max_range_cells: u64, out: &mut AHashSet<String>) -> FormulaResult<()> {
    match equation {
        Equation::Number { .. } | Equation::String { .. } | Equation::Error { .. } => {}
        Equation::CellReference { cell } => {
            out.insert(cell.to_key());
        }
        Equation::CellRange { range } => {
            let cells = range.cell_count();
            if cells > max_range_cells {
                return Err(FormulaError::RangeTooLarge {
                    range: range.to_string(),
                    cells,
                    limit: max_range_cells,
                });
            }
            out.extend(range.cells().map(|cell| cell.to_key()));
        }
        Equation::Function { arguments, .. } => {
            for argument in arguments {
                walk(argument, max_range_cells, out)?;
            }
        }
    }
    Ok(())
}

/// Two-way dependency index between cell keys
///
/// - `precedents[B]` = cells that B depends on
/// - `dependents[A]` = cells that depend on A
///
/// Both maps are always mutual inverses; empty sets are removed rather than
/// stored.
#[derive(Debug, Default, Clone)]
pub struct DependencyIndex {
    /// Cell → Cells that depend on it (dependents)
    dependents: AHashMap<String, AHashSet<String>>,
    /// Cell → Cells it depends on (precedents)
    precedents: AHashMap<String, AHashSet<String>>,
}

impl DependencyIndex {
    /// Create a new empty index
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the full precedent set of `cell`, keeping both maps in sync
    pub fn replace_precedents(&mut self, cell: &str, precedents: AHashSet<String>) {
        self.clear_precedents(cell);

        for precedent in &precedents {
            self.dependents
                .entry(precedent.clone())
                .or_default()
                .insert(cell.to_string());
        }

        if !precedents.is_empty() {
            self.precedents.insert(cell.to_string(), precedents);
        }
    }

    /// Remove every edge from `cell` to the cells it depends on
    pub fn clear_precedents(&mut self, cell: &str) {
        if let Some(precedents) = self.precedents.remove(cell) {
            for precedent in precedents {
                if let Some(deps) = self.dependents.get_mut(&precedent) {
                    deps.remove(cell);
                    if deps.is_empty() {
                        self.dependents.remove(&precedent);
                    }
                }
            }
        }
    }

    /// Get cells that depend on the given cell
    pub fn dependents(&self, cell: &str) -> impl Iterator<Item = &str> + '_ {
        self.dependents
            .get(cell)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Get cells that the given cell depends on
    pub fn precedents(&self, cell: &str) -> impl Iterator<Item = &str> + '_ {
        self.precedents
            .get(cell)
            .into_iter()
            .flat_map(|set| set.iter().map(String::as_str))
    }

    /// Check whether making `cell` depend on `candidates` would close a cycle
    ///
    /// That is the case when any candidate is `cell` itself or already
    /// depends on `cell`, directly or transitively.
    pub fn would_create_cycle(&self, cell: &str, candidates: &AHashSet<String>) -> bool {
        if candidates.contains(cell) {
            return true;
        }

        let mut visited: AHashSet<&str> = AHashSet::new();
        let mut stack: Vec<&str> = vec![cell];

        while let Some(current) = stack.pop() {
            for dependent in self.dependents(current) {
                if candidates.contains(dependent) {
                    return true;
                }
                if visited.insert(dependent) {
                    stack.push(dependent);
                }
            }
        }

        false
    }

    /// Transitive dependents of `cell` in recalculation order
    ///
    /// Every cell appears once, after all of its precedents that are
    /// themselves in the list. `cell` itself is not included.
    pub fn recalc_order(&self, cell: &str) -> Vec<String> {
        let mut result = Vec::new();
        let mut visited: AHashSet<&str> = AHashSet::new();
        let mut in_stack: AHashSet<&str> = AHashSet::new();

        // Iterative DFS: (cell, children already pushed)
        let mut stack: Vec<(&str, bool)> = vec![(cell, false)];
        while let Some((current, expanded)) = stack.pop() {
            if expanded {
                in_stack.remove(current);
                visited.insert(current);
                result.push(current);
                continue;
            }
            if visited.contains(current) || in_stack.contains(current) {
                // Circular reference - skip
                continue;
            }

            in_stack.insert(current);
            stack.push((current, true));
            for dependent in self.dependents(current) {
                if !visited.contains(dependent) && !in_stack.contains(dependent) {
                    stack.push((dependent, false));
                }
            }
        }

        // Post-order puts dependents first; reverse for dependencies first
        result
            .into_iter()
            .rev()
            .filter(|c| *c != cell)
            .map(str::to_string)
            .collect()
    }
}
