//! # cellflow-core
//!
//! Cell addressing primitives shared by the cellflow crates.
//!
//! - [`CellAddress`] - a single grid position (`A1`, `AB23`)
//! - [`CellRange`] - an ordered rectangle of cells (`A1:B10`)
//!
//! ## Example
//!
//! ```rust
//! use cellflow_core::{CellAddress, CellRange};
//!
//! let start = CellAddress::parse("A1").unwrap();
//! let end = CellAddress::parse("B2").unwrap();
//! let range = CellRange::new(start, end).unwrap();
//!
//! assert_eq!(range.cell_count(), 4);
//! assert!(range.contains(&CellAddress::parse("B1").unwrap()));
//! ```

pub mod address;
pub mod error;

pub use address::{CellAddress, CellRange, CellRangeIterator};
pub use error::{Error, Result};
