//! Cell address and range types

use crate::error::{Error, Result};
use lazy_regex::regex_captures;
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// A cell address (e.g., "A1", "AB23")
///
/// Addresses are written as one or more uppercase column letters followed by
/// a row number. The row is kept exactly as written (so `A0` is a valid key);
/// the column is stored as a 0-based index (`A` = 0, `Z` = 25, `AA` = 26).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellAddress {
    /// Column index (0-based, A=0, B=1, ..., AA=26)
    pub col: u32,
    /// Row number as written in the key
    pub row: u32,
}

impl CellAddress {
    /// Create a new cell address
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Parse a cell address from its key
    ///
    /// # Examples
    /// ```
    /// use cellflow_core::CellAddress;
    ///
    /// let addr = CellAddress::parse("A1").unwrap();
    /// assert_eq!(addr.col, 0);
    /// assert_eq!(addr.row, 1);
    ///
    /// let addr = CellAddress::parse("AB23").unwrap();
    /// assert_eq!(addr.col, 27);
    /// assert_eq!(addr.row, 23);
    ///
    /// assert!(CellAddress::parse("a1").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<Self> {
        let (_, letters, digits) = regex_captures!(r"^([A-Z]+)([0-9]+)$", s)
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;

        let col = Self::letters_to_column(letters)?;
        let row = digits
            .parse::<u32>()
            .map_err(|_| Error::OutOfBounds(s.to_string()))?;

        Ok(Self { col, row })
    }

    /// Convert column index to letters (0 = A, 25 = Z, 26 = AA, etc.)
    pub fn column_to_letters(col: u32) -> String {
        let mut letters = Vec::new();
        let mut n = col as u64 + 1;

        while n > 0 {
            n -= 1;
            letters.push((n % 26) as u8 + b'A');
            n /= 26;
        }

        letters.iter().rev().map(|&b| b as char).collect()
    }

    /// Convert column letters to index (A = 0, Z = 25, AA = 26, etc.)
    pub fn letters_to_column(letters: &str) -> Result<u32> {
        if letters.is_empty() {
            return Err(Error::InvalidAddress("empty column letters".into()));
        }

        let mut col: u64 = 0;
        for c in letters.chars() {
            if !c.is_ascii_uppercase() {
                return Err(Error::InvalidAddress(format!(
                    "invalid column letter '{}'",
                    c
                )));
            }
            col = col * 26 + (c as u64 - 'A' as u64 + 1);
            if col > u32::MAX as u64 {
                return Err(Error::OutOfBounds(letters.to_string()));
            }
        }

        Ok((col - 1) as u32)
    }

    /// Column letters of this address
    pub fn column_letters(&self) -> String {
        Self::column_to_letters(self.col)
    }

    /// Format as the canonical cell key
    pub fn to_key(&self) -> String {
        format!("{}{}", self.column_letters(), self.row)
    }
}

impl fmt::Display for CellAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.column_letters(), self.row)
    }
}

impl FromStr for CellAddress {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

// Row-major: A1 < B1 < A2
impl Ord for CellAddress {
    fn cmp(&self, other: &Self) -> Ordering {
        self.row.cmp(&other.row).then(self.col.cmp(&other.col))
    }
}

impl PartialOrd for CellAddress {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// A rectangular range of cells (e.g., "A1:B10")
///
/// The start corner is always top-left and the end corner bottom-right;
/// reversed corners are rejected rather than swapped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellRange {
    /// Start address (top-left)
    pub start: CellAddress,
    /// End address (bottom-right)
    pub end: CellAddress,
}

impl CellRange {
    /// Create a new cell range
    pub fn new(start: CellAddress, end: CellAddress) -> Result<Self> {
        if start.col > end.col {
            return Err(Error::ReversedColumns);
        }
        if start.row > end.row {
            return Err(Error::ReversedRows);
        }

        Ok(Self { start, end })
    }

    /// Create a single-cell range
    pub fn single(addr: CellAddress) -> Self {
        Self {
            start: addr,
            end: addr,
        }
    }

    /// Parse a range from `A1:B10` notation
    pub fn parse(s: &str) -> Result<Self> {
        let (start, end) = s
            .split_once(':')
            .ok_or_else(|| Error::InvalidAddress(s.to_string()))?;

        Self::new(CellAddress::parse(start)?, CellAddress::parse(end)?)
    }

    /// Check if a cell is within this range
    pub fn contains(&self, addr: &CellAddress) -> bool {
        addr.row >= self.start.row
            && addr.row <= self.end.row
            && addr.col >= self.start.col
            && addr.col <= self.end.col
    }

    /// Get the number of rows in the range
    pub fn row_count(&self) -> u64 {
        (self.end.row - self.start.row) as u64 + 1
    }

    /// Get the number of columns in the range
    pub fn col_count(&self) -> u64 {
        (self.end.col - self.start.col) as u64 + 1
    }

    /// Get the total number of cells in the range
    pub fn cell_count(&self) -> u64 {
        self.row_count() * self.col_count()
    }

    /// Cell addresses grouped by row, top to bottom, each row left to right
    pub fn rows(&self) -> Vec<Vec<CellAddress>> {
        (self.start.row..=self.end.row)
            .map(|row| {
                (self.start.col..=self.end.col)
                    .map(|col| CellAddress::new(col, row))
                    .collect()
            })
            .collect()
    }

    /// Iterate over all cell addresses in the range (row by row)
    pub fn cells(&self) -> CellRangeIterator {
        CellRangeIterator {
            range: *self,
            current_row: self.start.row as u64,
            current_col: self.start.col as u64,
        }
    }
}

impl fmt::Display for CellRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.start, self.end)
    }
}

impl FromStr for CellRange {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

/// Iterator over cells in a range
pub struct CellRangeIterator {
    range: CellRange,
    current_row: u64,
    current_col: u64,
}

impl CellRangeIterator {
    fn remaining(&self) -> u64 {
        let end_row = self.range.end.row as u64;
        if self.current_row > end_row {
            return 0;
        }
        let cols = self.range.col_count();
        let full_rows = end_row - self.current_row;
        full_rows * cols + (self.range.end.col as u64 - self.current_col + 1)
    }
}

impl Iterator for CellRangeIterator {
    type Item = CellAddress;

    fn next(&mut self) -> Option<Self::Item> {
        if self.current_row > self.range.end.row as u64 {
            return None;
        }

        let addr = CellAddress::new(self.current_col as u32, self.current_row as u32);

        self.current_col += 1;
        if self.current_col > self.range.end.col as u64 {
            self.current_col = self.range.start.col as u64;
            self.current_row += 1;
        }

        Some(addr)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = usize::try_from(self.remaining()).unwrap_or(usize::MAX);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for CellRangeIterator {}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn addr(s: &str) -> CellAddress {
        CellAddress::parse(s).unwrap()
    }

    #[test]
    fn test_column_to_letters() {
        assert_eq!(CellAddress::column_to_letters(0), "A");
        assert_eq!(CellAddress::column_to_letters(1), "B");
        assert_eq!(CellAddress::column_to_letters(25), "Z");
        assert_eq!(CellAddress::column_to_letters(26), "AA");
        assert_eq!(CellAddress::column_to_letters(27), "AB");
        assert_eq!(CellAddress::column_to_letters(701), "ZZ");
        assert_eq!(CellAddress::column_to_letters(702), "AAA");
    }

    #[test]
    fn test_letters_to_column() {
        assert_eq!(CellAddress::letters_to_column("A").unwrap(), 0);
        assert_eq!(CellAddress::letters_to_column("Z").unwrap(), 25);
        assert_eq!(CellAddress::letters_to_column("AA").unwrap(), 26);
        assert_eq!(CellAddress::letters_to_column("XFD").unwrap(), 16383);
        assert!(CellAddress::letters_to_column("").is_err());
        assert!(CellAddress::letters_to_column("a").is_err());
    }

    #[test]
    fn test_parse_address() {
        assert_eq!(addr("A1"), CellAddress::new(0, 1));
        assert_eq!(addr("AB23"), CellAddress::new(27, 23));
        assert_eq!(addr("C0"), CellAddress::new(2, 0));

        assert!(CellAddress::parse("").is_err());
        assert!(CellAddress::parse("1A").is_err());
        assert!(CellAddress::parse("A").is_err());
        assert!(CellAddress::parse("A1B").is_err());
        assert!(CellAddress::parse("$A$1").is_err());
        assert!(matches!(
            CellAddress::parse("A99999999999"),
            Err(Error::OutOfBounds(_))
        ));
    }

    #[test]
    fn test_key_normalises_leading_zeros() {
        assert_eq!(addr("A01").to_key(), "A1");
        assert_eq!(addr("AB23").to_string(), "AB23");
    }

    #[test]
    fn test_address_ordering_is_row_major() {
        let mut cells = vec![addr("B2"), addr("A2"), addr("B1"), addr("A1")];
        cells.sort();
        assert_eq!(cells, vec![addr("A1"), addr("B1"), addr("A2"), addr("B2")]);
    }

    #[test]
    fn test_range_rejects_reversed_corners() {
        assert_eq!(
            CellRange::new(addr("B1"), addr("A2")),
            Err(Error::ReversedColumns)
        );
        assert_eq!(
            CellRange::new(addr("A2"), addr("B1")),
            Err(Error::ReversedRows)
        );
        assert!(CellRange::new(addr("A1"), addr("A1")).is_ok());
    }

    #[test]
    fn test_range_rows_and_cells() {
        let range = CellRange::parse("A1:B3").unwrap();
        assert_eq!(range.row_count(), 3);
        assert_eq!(range.col_count(), 2);
        assert_eq!(range.cell_count(), 6);

        let rows = range.rows();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], vec![addr("A1"), addr("B1")]);
        assert_eq!(rows[2], vec![addr("A3"), addr("B3")]);

        let keys: Vec<String> = range.cells().map(|a| a.to_key()).collect();
        assert_eq!(keys, vec!["A1", "B1", "A2", "B2", "A3", "B3"]);
        assert_eq!(range.cells().len(), 6);
    }

    #[test]
    fn test_range_contains() {
        let range = CellRange::parse("B2:C4").unwrap();
        assert!(range.contains(&addr("B2")));
        assert!(range.contains(&addr("C4")));
        assert!(!range.contains(&addr("A2")));
        assert!(!range.contains(&addr("B5")));
        assert_eq!(range.to_string(), "B2:C4");
    }
}
