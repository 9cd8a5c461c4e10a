//! The host spreadsheet service, seen from the facade.
//!
//! A host owns the spreadsheet data; the facade only ever holds handles into
//! it. Handles are cheap to create and are looked up again for every call,
//! so a host is free to hand out fresh values each time.
//!
//! All methods take `&self`: hosts serialize access to the underlying
//! document themselves (the in-memory host uses `RefCell`).

use sheet_access_core::{Color, DataValidation, RangeReference, Region};

use crate::error::HostResult;

/// An open spreadsheet document.
pub trait SpreadsheetService {
    type Sheet: SheetHandle;

    /// Look up a sheet by its exact name.
    fn sheet_by_name(&self, name: &str) -> Option<Self::Sheet>;
}

/// One sheet of a spreadsheet.
pub trait SheetHandle {
    type Range: RangeHandle;

    /// The sheet's name.
    fn name(&self) -> String;

    /// The range covering a 1-based region.
    fn range(&self, region: Region) -> HostResult<Self::Range>;

    /// The range named by `A1` notation (`B2` or `B2:B15`).
    fn range_by_a1(&self, a1: &str) -> HostResult<Self::Range>;

    /// 1-based number of the last row holding content, 0 when empty.
    fn last_row(&self) -> HostResult<u32>;

    /// 1-based number of the last column holding content, 0 when empty.
    fn last_column(&self) -> HostResult<u32>;
}

/// A rectangular block of cells on a sheet.
pub trait RangeHandle {
    /// Where this range lives.
    fn reference(&self) -> RangeReference;

    /// Value of the top-left cell.
    fn value(&self) -> HostResult<String>;

    /// All values, rows outer.
    fn values(&self) -> HostResult<Vec<Vec<String>>>;

    /// Set every cell in the range to `value`.
    fn set_value(&self, value: &str) -> HostResult<()>;

    /// Replace the range's values; `values` must match the range's shape.
    fn set_values(&self, values: &[Vec<String>]) -> HostResult<()>;

    /// Remove rows duplicating an earlier row in the given 1-based sheet
    /// columns (all columns of the range when empty). Values differing only
    /// in letter case count as equal.
    fn remove_duplicates(&self, columns: &[u32]) -> HostResult<()>;

    /// Turn every cell into a checkbox.
    fn insert_checkboxes(&self) -> HostResult<()>;

    fn set_background(&self, color: Color) -> HostResult<()>;

    fn clear_background(&self) -> HostResult<()>;

    /// Apply `rule` to every cell, replacing any existing rule.
    fn set_data_validation(&self, rule: &DataValidation) -> HostResult<()>;
}
