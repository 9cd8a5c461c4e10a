//! 1-based rectangular regions, as passed to the host's `getRange(row, column, rows, columns)`.

use crate::address::{CellAddress, CellRange};
use crate::error::{Error, Result};
use std::fmt;

/// A rectangle addressed by its 1-based top-left corner and its size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Region {
    /// First row (1-based)
    pub start_row: u32,
    /// First column (1-based)
    pub start_column: u32,
    /// Number of rows
    pub row_count: u32,
    /// Number of columns
    pub column_count: u32,
}

impl Region {
    pub const fn new(start_row: u32, start_column: u32, row_count: u32, column_count: u32) -> Self {
        Self {
            start_row,
            start_column,
            row_count,
            column_count,
        }
    }

    /// A single cell at 1-based `(row, column)`.
    pub const fn cell(row: u32, column: u32) -> Self {
        Self::new(row, column, 1, 1)
    }

    /// Resolve to a 0-based [`CellRange`].
    ///
    /// Fails if any coordinate or count is zero, or if the rectangle runs
    /// past the addressable grid.
    pub fn to_cell_range(&self) -> Result<CellRange> {
        if self.start_row == 0 || self.start_column == 0 {
            return Err(Error::InvalidRegion(format!(
                "{self}: start row and column must be >= 1"
            )));
        }
        if self.row_count == 0 || self.column_count == 0 {
            return Err(Error::InvalidRegion(format!(
                "{self}: row and column counts must be >= 1"
            )));
        }

        let start = CellAddress::from_numbers(self.start_row, self.start_column)?;
        let end_row = u64::from(self.start_row) + u64::from(self.row_count) - 1;
        let end_column = u64::from(self.start_column) + u64::from(self.column_count) - 1;
        let end = CellAddress::from_numbers(
            u32::try_from(end_row).map_err(|_| Error::RowOutOfBounds(end_row, crate::MAX_ROWS))?,
            u32::try_from(end_column)
                .map_err(|_| Error::ColumnOutOfBounds(end_column, crate::MAX_COLUMNS))?,
        )?;

        Ok(CellRange::new(start, end))
    }
}

impl From<(u32, u32, u32, u32)> for Region {
    fn from((start_row, start_column, row_count, column_count): (u32, u32, u32, u32)) -> Self {
        Self::new(start_row, start_column, row_count, column_count)
    }
}

impl From<CellRange> for Region {
    fn from(range: CellRange) -> Self {
        Self::new(
            range.start.row_number(),
            range.start.column_number(),
            range.row_count(),
            range.col_count(),
        )
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}, {}, {})",
            self.start_row, self.start_column, self.row_count, self.column_count
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_region_to_cell_range() {
        let range = Region::new(2, 2, 14, 1).to_cell_range().unwrap();
        assert_eq!(range.to_string(), "B2:B15");

        let range = Region::cell(1, 1).to_cell_range().unwrap();
        assert_eq!(range.to_string(), "A1");
    }

    #[test]
    fn test_region_rejects_zero() {
        assert!(matches!(
            Region::new(0, 1, 1, 1).to_cell_range(),
            Err(Error::InvalidRegion(_))
        ));
        assert!(matches!(
            Region::new(1, 1, 0, 1).to_cell_range(),
            Err(Error::InvalidRegion(_))
        ));
    }

    #[test]
    fn test_region_rejects_overflow() {
        assert!(matches!(
            Region::new(crate::MAX_ROWS, 1, 2, 1).to_cell_range(),
            Err(Error::RowOutOfBounds(..))
        ));
        assert!(matches!(
            Region::new(1, u32::MAX, 1, 2).to_cell_range(),
            Err(Error::ColumnOutOfBounds(..))
        ));
    }

    #[test]
    fn test_region_from_cell_range() {
        let range = CellRange::parse("C3:D7").unwrap();
        assert_eq!(Region::from(range), Region::new(3, 3, 5, 2));
        assert_eq!(Region::from((3, 3, 5, 2)), Region::new(3, 3, 5, 2));
    }
}
