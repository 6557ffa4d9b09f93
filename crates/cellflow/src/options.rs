//! Graph configuration

/// Largest range, in cells, accepted by default
pub const DEFAULT_MAX_RANGE_CELLS: u64 = 1_000_000;

/// Options for a [`DependencyGraph`](crate::DependencyGraph)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GraphOptions {
    /// Record failed updates as an error value on the cell instead of
    /// silently keeping the cell's previous state (default: false)
    pub surface_update_failures: bool,
    /// Maximum number of cells a single range may cover (default: 1,000,000)
    pub max_range_cells: u64,
}

impl Default for GraphOptions {
    fn default() -> Self {
        Self {
            surface_update_failures: false,
            max_range_cells: DEFAULT_MAX_RANGE_CELLS,
        }
    }
}

impl GraphOptions {
    /// Create options with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set whether failed updates are recorded on the cell
    pub fn with_surface_update_failures(mut self, surface: bool) -> Self {
        self.surface_update_failures = surface;
        self
    }

    /// Set the maximum number of cells a range may cover
    pub fn with_max_range_cells(mut self, max: u64) -> Self {
        self.max_range_cells = max;
        self
    }
}
