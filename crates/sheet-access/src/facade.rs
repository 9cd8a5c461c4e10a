//! The sheet access facade.

use sheet_access_core::{position, Color, DataValidation, Region};

use crate::error::{Error, Result};
use crate::host::{RangeHandle, SheetHandle, SpreadsheetService};

/// The range handle type of a spreadsheet service.
pub type RangeOf<S> = <<S as SpreadsheetService>::Sheet as SheetHandle>::Range;

/// Validated access to one spreadsheet.
///
/// Every operation takes a sheet name, looks the sheet up again, and fails
/// with [`Error::SheetNotFound`] before touching the host when it is absent.
/// Position strings are checked against the `A1` patterns in
/// [`sheet_access_core::position`] before they are forwarded.
pub struct SheetAccess<S> {
    spreadsheet: S,
}

impl<S: SpreadsheetService> SheetAccess<S> {
    pub fn new(spreadsheet: S) -> Self {
        Self { spreadsheet }
    }

    /// The wrapped spreadsheet handle.
    pub fn spreadsheet(&self) -> &S {
        &self.spreadsheet
    }

    pub fn into_inner(self) -> S {
        self.spreadsheet
    }

    /// Get the sheet called `sheet_name`.
    pub fn sheet_by_name(&self, sheet_name: &str) -> Result<S::Sheet> {
        self.spreadsheet.sheet_by_name(sheet_name).ok_or_else(|| {
            tracing::warn!(sheet = sheet_name, "sheet not found");
            Error::SheetNotFound(sheet_name.to_string())
        })
    }

    /// Get the range covering `region` (1-based row, column, row count, column count).
    pub fn range(&self, sheet_name: &str, region: impl Into<Region>) -> Result<RangeOf<S>> {
        let region = region.into();
        tracing::debug!(sheet = sheet_name, %region, "range");
        let sheet = self.sheet_by_name(sheet_name)?;
        Ok(sheet.range(region)?)
    }

    /// Get the range named by `positions`, e.g. `B2:B15`.
    ///
    /// A malformed string fails with [`Error::InvalidPosition`].
    pub fn range_by_positions(&self, sheet_name: &str, positions: &str) -> Result<RangeOf<S>> {
        tracing::debug!(sheet = sheet_name, positions, "range_by_positions");
        let sheet = self.sheet_by_name(sheet_name)?;
        if !position::is_range_position(positions) {
            return Err(Error::InvalidPosition(positions.to_string()));
        }
        Ok(sheet.range_by_a1(positions)?)
    }

    /// Read the value of the cell at `position`, e.g. `B2`.
    pub fn cell_value(&self, sheet_name: &str, position: &str) -> Result<String> {
        tracing::debug!(sheet = sheet_name, position, "cell_value");
        let sheet = self.sheet_by_name(sheet_name)?;
        if !position::is_cell_position(position) {
            return Err(Error::InvalidPosition(position.to_string()));
        }
        Ok(sheet.range_by_a1(position)?.value()?)
    }

    /// Read the rows of the range named by `positions`, e.g. `A6:X385`.
    pub fn rows_by_positions(&self, sheet_name: &str, positions: &str) -> Result<Vec<Vec<String>>> {
        tracing::debug!(sheet = sheet_name, positions, "rows_by_positions");
        let sheet = self.sheet_by_name(sheet_name)?;
        if !position::is_range_position(positions) {
            return Err(Error::InvalidPositions(positions.to_string()));
        }
        Ok(sheet.range_by_a1(positions)?.values()?)
    }

    /// Read the rows of `region`.
    pub fn rows(&self, sheet_name: &str, region: impl Into<Region>) -> Result<Vec<Vec<String>>> {
        Ok(self.range(sheet_name, region)?.values()?)
    }

    /// Write `values` into `region`. The shape is checked by the host.
    pub fn set_values(
        &self,
        sheet_name: &str,
        region: impl Into<Region>,
        values: &[Vec<String>],
    ) -> Result<()> {
        Ok(self.range(sheet_name, region)?.set_values(values)?)
    }

    /// Write `value` into the cell at 1-based `(row, column)`.
    pub fn set_value(&self, sheet_name: &str, row: u32, column: u32, value: &str) -> Result<()> {
        Ok(self
            .range(sheet_name, Region::cell(row, column))?
            .set_value(value)?)
    }

    /// Number of the last row with content.
    pub fn last_row(&self, sheet_name: &str) -> Result<u32> {
        Ok(self.sheet_by_name(sheet_name)?.last_row()?)
    }

    /// Number of the last column with content.
    pub fn last_column(&self, sheet_name: &str) -> Result<u32> {
        Ok(self.sheet_by_name(sheet_name)?.last_column()?)
    }

    /// Remove rows of `region` that duplicate an earlier row, comparing the
    /// 1-based sheet `columns` (every column of the region when empty).
    pub fn remove_duplicates(
        &self,
        sheet_name: &str,
        columns: &[u32],
        region: impl Into<Region>,
    ) -> Result<()> {
        Ok(self.range(sheet_name, region)?.remove_duplicates(columns)?)
    }

    /// Insert checkboxes into every cell of `region`.
    pub fn set_checkbox(&self, sheet_name: &str, region: impl Into<Region>) -> Result<()> {
        Ok(self.range(sheet_name, region)?.insert_checkboxes()?)
    }

    /// Paint the background of `region`.
    pub fn set_background_color(
        &self,
        sheet_name: &str,
        region: impl Into<Region>,
        color: Color,
    ) -> Result<()> {
        Ok(self.range(sheet_name, region)?.set_background(color)?)
    }

    /// Reset the background of `region` to the host default.
    pub fn clear_background_color(
        &self,
        sheet_name: &str,
        region: impl Into<Region>,
    ) -> Result<()> {
        Ok(self.range(sheet_name, region)?.clear_background()?)
    }

    /// Restrict `region` to the values found in `items_range`, shown as a dropdown.
    pub fn set_pulldown_rule(
        &self,
        sheet_name: &str,
        region: impl Into<Region>,
        items_range: &RangeOf<S>,
    ) -> Result<()> {
        let target = self.range(sheet_name, region)?;
        let rule = DataValidation::value_in_range(items_range.reference());
        tracing::debug!(sheet = sheet_name, criteria = %rule.criteria, "set_pulldown_rule");
        Ok(target.set_data_validation(&rule)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::MemorySpreadsheet;
    use pretty_assertions::assert_eq;

    fn access() -> SheetAccess<MemorySpreadsheet> {
        let book = MemorySpreadsheet::new();
        book.insert_sheet("Sheet1").unwrap();
        SheetAccess::new(book)
    }

    #[test]
    fn test_cell_value_scenario() {
        let access = access();
        access.set_value("Sheet1", 1, 1, "42").unwrap();
        assert_eq!(access.cell_value("Sheet1", "A1").unwrap(), "42");
        assert_eq!(access.cell_value("Sheet1", "A1").unwrap(), "42");
    }

    #[test]
    fn test_missing_sheet_message() {
        let err = access().last_row("Missing").unwrap_err();
        assert!(matches!(&err, Error::SheetNotFound(name) if name == "Missing"));
        assert_eq!(err.to_string(), "sheetName: Missing is not found.");
    }

    #[test]
    fn test_position_errors() {
        let access = access();
        assert!(access.cell_value("Sheet1", "B2").is_ok());

        let err = access.cell_value("Sheet1", "2B").unwrap_err();
        assert_eq!(err.to_string(), "position: 2B is invalid format.");

        let err = access.rows_by_positions("Sheet1", "B2").unwrap_err();
        assert_eq!(err.to_string(), "positions: B2 is invalid format.");

        let err = access.range_by_positions("Sheet1", "B2").unwrap_err();
        assert!(matches!(err, Error::InvalidPosition(p) if p == "B2"));
    }

    #[test]
    fn test_missing_sheet_checked_before_position() {
        let err = access().cell_value("Missing", "2B").unwrap_err();
        assert!(matches!(err, Error::SheetNotFound(_)));
    }

    #[test]
    fn test_set_value_round_trip() {
        let access = access();
        access.set_value("Sheet1", 3, 2, "hello").unwrap();
        assert_eq!(
            access.rows("Sheet1", (3, 2, 1, 1)).unwrap(),
            vec![vec!["hello".to_string()]]
        );
    }

    #[test]
    fn test_host_errors_are_wrapped() {
        let err = access().rows("Sheet1", (0, 1, 1, 1)).unwrap_err();
        assert!(matches!(err, Error::Host(_)));
    }
}
