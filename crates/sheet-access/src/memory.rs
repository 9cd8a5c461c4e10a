//! An in-process host spreadsheet.
//!
//! [`MemorySpreadsheet`] implements the host traits over plain Rust data so
//! the facade and the entry points can run without a remote platform. It is
//! a cheap, clonable handle: every clone sees the same document.
//!
//! Sheet handles hold only a weak reference to their data, matching the
//! facade's rule that sheets are looked up per call and never owned.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use ahash::{AHashMap, AHashSet};
use serde::Deserialize;
use sheet_access_core::{
    CellAddress, CellRange, Color, DataValidation, RangeReference, Region, ValidationCriteria,
};

use crate::error::{HostError, HostResult};
use crate::host::{RangeHandle, SheetHandle, SpreadsheetService};

/// Most cells a single range may cover. Every range operation touches each
/// cell, so larger ranges are refused up front.
pub const MAX_CELLS: u64 = 10_000_000;

#[derive(Debug, Clone, Default, PartialEq)]
struct Cell {
    value: String,
    background: Option<Color>,
    validation: Option<DataValidation>,
}

impl Cell {
    fn is_blank(&self) -> bool {
        self.value.is_empty() && self.background.is_none() && self.validation.is_none()
    }
}

#[derive(Debug, Default)]
struct SheetData {
    cells: AHashMap<CellAddress, Cell>,
}

impl SheetData {
    fn value(&self, addr: &CellAddress) -> String {
        self.cells
            .get(addr)
            .map(|cell| cell.value.clone())
            .unwrap_or_default()
    }

    fn put(&mut self, addr: CellAddress, cell: Cell) {
        if cell.is_blank() {
            self.cells.remove(&addr);
        } else {
            self.cells.insert(addr, cell);
        }
    }

    fn update(&mut self, addr: CellAddress, f: impl FnOnce(&mut Cell)) {
        let mut cell = self.cells.remove(&addr).unwrap_or_default();
        f(&mut cell);
        self.put(addr, cell);
    }

    fn values(&self, range: &CellRange) -> Vec<Vec<String>> {
        (range.start.row..=range.end.row)
            .map(|row| {
                (range.start.col..=range.end.col)
                    .map(|col| self.value(&CellAddress::new(row, col)))
                    .collect()
            })
            .collect()
    }

    fn last_content(&self, key: impl Fn(&CellAddress) -> u32) -> u32 {
        self.cells
            .iter()
            .filter(|(_, cell)| !cell.value.is_empty())
            .map(|(addr, _)| key(addr) + 1)
            .max()
            .unwrap_or(0)
    }
}

#[derive(Debug, Default)]
struct Book {
    sheets: Vec<(String, Rc<RefCell<SheetData>>)>,
}

impl Book {
    fn find(&self, name: &str) -> Option<&Rc<RefCell<SheetData>>> {
        self.sheets
            .iter()
            .find(|(sheet_name, _)| sheet_name == name)
            .map(|(_, data)| data)
    }
}

/// A spreadsheet document held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySpreadsheet {
    book: Rc<RefCell<Book>>,
}

impl MemorySpreadsheet {
    /// Create a document with no sheets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a document from a fixture, one sheet per entry, in order.
    pub fn from_fixture(fixture: &WorkbookFixture) -> HostResult<Self> {
        let book = Self::new();
        for sheet in &fixture.sheets {
            book.insert_sheet_with_rows(&sheet.name, &sheet.rows)?;
        }
        Ok(book)
    }

    /// Append an empty sheet.
    pub fn insert_sheet(&self, name: &str) -> HostResult<MemorySheet> {
        let mut book = self.book.borrow_mut();
        if book.find(name).is_some() {
            return Err(HostError::DuplicateSheet(name.to_string()));
        }
        let data = Rc::new(RefCell::new(SheetData::default()));
        let sheet = MemorySheet::new(name, &data);
        book.sheets.push((name.to_string(), data));
        tracing::debug!(sheet = name, "inserted sheet");
        Ok(sheet)
    }

    /// Append a sheet filled with `rows` starting at `A1`. Rows may be ragged.
    pub fn insert_sheet_with_rows(
        &self,
        name: &str,
        rows: &[Vec<String>],
    ) -> HostResult<MemorySheet> {
        let sheet = self.insert_sheet(name)?;
        sheet.with_data(|data| {
            for (r, row) in rows.iter().enumerate() {
                for (c, value) in row.iter().enumerate() {
                    let addr = CellAddress::new(r as u32, c as u32);
                    data.update(addr, |cell| cell.value = value.clone());
                }
            }
        })?;
        Ok(sheet)
    }

    /// Delete a sheet. Outstanding handles to it start failing with
    /// [`HostError::SheetRemoved`].
    pub fn remove_sheet(&self, name: &str) -> bool {
        let mut book = self.book.borrow_mut();
        let before = book.sheets.len();
        book.sheets.retain(|(sheet_name, _)| sheet_name != name);
        before != book.sheets.len()
    }

    /// Sheet names in document order.
    pub fn sheet_names(&self) -> Vec<String> {
        self.book
            .borrow()
            .sheets
            .iter()
            .map(|(name, _)| name.clone())
            .collect()
    }

    fn cell(&self, sheet_name: &str, row: u32, column: u32) -> HostResult<Option<Cell>> {
        let addr = CellAddress::from_numbers(row, column)?;
        let book = self.book.borrow();
        let data = book
            .find(sheet_name)
            .ok_or_else(|| HostError::UnknownSheet(sheet_name.to_string()))?;
        let cell = data.borrow().cells.get(&addr).cloned();
        Ok(cell)
    }

    /// Background of the cell at 1-based `(row, column)`.
    pub fn background_at(
        &self,
        sheet_name: &str,
        row: u32,
        column: u32,
    ) -> HostResult<Option<Color>> {
        Ok(self.cell(sheet_name, row, column)?.and_then(|cell| cell.background))
    }

    /// Validation rule of the cell at 1-based `(row, column)`.
    pub fn validation_at(
        &self,
        sheet_name: &str,
        row: u32,
        column: u32,
    ) -> HostResult<Option<DataValidation>> {
        Ok(self.cell(sheet_name, row, column)?.and_then(|cell| cell.validation))
    }

    /// Whether the cell at 1-based `(row, column)` is a checkbox.
    pub fn is_checkbox(&self, sheet_name: &str, row: u32, column: u32) -> HostResult<bool> {
        Ok(self
            .validation_at(sheet_name, row, column)?
            .is_some_and(|rule| rule.criteria == ValidationCriteria::Checkbox))
    }

    /// Whether `value` would satisfy the validation rule of the cell at
    /// 1-based `(row, column)`. Cells without a rule accept anything.
    pub fn accepts(
        &self,
        sheet_name: &str,
        row: u32,
        column: u32,
        value: &str,
    ) -> HostResult<bool> {
        let Some(rule) = self.validation_at(sheet_name, row, column)? else {
            return Ok(true);
        };
        let allowed: Vec<String> = match &rule.criteria {
            ValidationCriteria::ValueInRange { source } => {
                let book = self.book.borrow();
                let data = book
                    .find(&source.sheet_name)
                    .ok_or_else(|| HostError::UnknownSheet(source.sheet_name.clone()))?;
                let values = data.borrow().values(&source.range);
                values.into_iter().flatten().collect()
            }
            ValidationCriteria::Checkbox => Vec::new(),
        };
        Ok(rule.accepts(value, || allowed.iter().map(String::as_str)))
    }
}

impl SpreadsheetService for MemorySpreadsheet {
    type Sheet = MemorySheet;

    fn sheet_by_name(&self, name: &str) -> Option<MemorySheet> {
        let book = self.book.borrow();
        book.find(name).map(|data| MemorySheet::new(name, data))
    }
}

/// A handle to one sheet of a [`MemorySpreadsheet`].
#[derive(Debug, Clone)]
pub struct MemorySheet {
    name: String,
    data: Weak<RefCell<SheetData>>,
}

impl MemorySheet {
    fn new(name: &str, data: &Rc<RefCell<SheetData>>) -> Self {
        Self {
            name: name.to_string(),
            data: Rc::downgrade(data),
        }
    }

    fn open(&self, range: CellRange) -> HostResult<MemoryRange> {
        let cells = range.cell_count();
        if cells > MAX_CELLS {
            return Err(HostError::TooManyCells {
                range: range.to_a1_string(),
                cells,
                limit: MAX_CELLS,
            });
        }
        self.with_data(|_| ())?;
        Ok(MemoryRange {
            sheet: self.clone(),
            range,
        })
    }

    fn with_data<T>(&self, f: impl FnOnce(&mut SheetData) -> T) -> HostResult<T> {
        let data = self
            .data
            .upgrade()
            .ok_or_else(|| HostError::SheetRemoved(self.name.clone()))?;
        let mut data = data.borrow_mut();
        Ok(f(&mut data))
    }
}

impl SheetHandle for MemorySheet {
    type Range = MemoryRange;

    fn name(&self) -> String {
        self.name.clone()
    }

    fn range(&self, region: Region) -> HostResult<MemoryRange> {
        self.open(region.to_cell_range()?)
    }

    fn range_by_a1(&self, a1: &str) -> HostResult<MemoryRange> {
        self.open(CellRange::parse(a1)?)
    }

    fn last_row(&self) -> HostResult<u32> {
        self.with_data(|data| data.last_content(|addr| addr.row))
    }

    fn last_column(&self) -> HostResult<u32> {
        self.with_data(|data| data.last_content(|addr| addr.col))
    }
}

/// A handle to a block of cells on a [`MemorySheet`].
#[derive(Debug, Clone)]
pub struct MemoryRange {
    sheet: MemorySheet,
    range: CellRange,
}

impl MemoryRange {
    pub fn cell_range(&self) -> CellRange {
        self.range
    }

    fn update_all(&self, f: impl Fn(&mut Cell)) -> HostResult<()> {
        self.sheet.with_data(|data| {
            for addr in self.range.cells() {
                data.update(addr, &f);
            }
        })
    }
}

impl RangeHandle for MemoryRange {
    fn reference(&self) -> RangeReference {
        RangeReference::new(self.sheet.name.clone(), self.range)
    }

    fn value(&self) -> HostResult<String> {
        self.sheet.with_data(|data| data.value(&self.range.start))
    }

    fn values(&self) -> HostResult<Vec<Vec<String>>> {
        self.sheet.with_data(|data| data.values(&self.range))
    }

    fn set_value(&self, value: &str) -> HostResult<()> {
        self.update_all(|cell| cell.value = value.to_string())
    }

    fn set_values(&self, values: &[Vec<String>]) -> HostResult<()> {
        let rows = self.range.row_count();
        let columns = self.range.col_count();
        let misfit = values.iter().find(|row| row.len() != columns as usize);
        if values.len() != rows as usize || misfit.is_some() {
            return Err(HostError::ShapeMismatch {
                rows,
                columns,
                actual_rows: values.len(),
                actual_columns: misfit.map_or(columns as usize, Vec::len),
            });
        }

        self.sheet.with_data(|data| {
            for (row, row_values) in (self.range.start.row..).zip(values) {
                for (col, value) in (self.range.start.col..).zip(row_values) {
                    data.update(CellAddress::new(row, col), |cell| cell.value = value.clone());
                }
            }
        })
    }

    fn remove_duplicates(&self, columns: &[u32]) -> HostResult<()> {
        let (first, last) = (self.range.start.col, self.range.end.col);
        let compared: Vec<u32> = if columns.is_empty() {
            (first..=last).collect()
        } else {
            columns
                .iter()
                .map(|&column| match column.checked_sub(1) {
                    Some(col) if (first..=last).contains(&col) => Ok(col),
                    _ => Err(HostError::ColumnOutOfRange {
                        column,
                        range: self.range.to_a1_string(),
                    }),
                })
                .collect::<HostResult<_>>()?
        };

        self.sheet.with_data(|data| {
            let mut seen = AHashSet::new();
            let mut kept = Vec::new();
            for row in self.range.start.row..=self.range.end.row {
                let cells: Vec<Option<Cell>> = (first..=last)
                    .map(|col| data.cells.remove(&CellAddress::new(row, col)))
                    .collect();
                let key: Vec<String> = compared
                    .iter()
                    .map(|&col| {
                        cells[(col - first) as usize]
                            .as_ref()
                            .map(|cell| cell.value.to_lowercase())
                            .unwrap_or_default()
                    })
                    .collect();
                if seen.insert(key) {
                    kept.push(cells);
                }
            }

            let removed = self.range.row_count() as usize - kept.len();
            for (row, cells) in (self.range.start.row..).zip(kept) {
                for (col, cell) in (first..).zip(cells) {
                    if let Some(cell) = cell {
                        data.put(CellAddress::new(row, col), cell);
                    }
                }
            }
            tracing::debug!(range = %self.reference(), removed, "removed duplicate rows");
        })
    }

    fn insert_checkboxes(&self) -> HostResult<()> {
        self.update_all(|cell| {
            cell.validation = Some(DataValidation::checkbox());
            if cell.value.is_empty() {
                cell.value = "FALSE".to_string();
            }
        })
    }

    fn set_background(&self, color: Color) -> HostResult<()> {
        self.update_all(|cell| cell.background = Some(color))
    }

    fn clear_background(&self) -> HostResult<()> {
        self.update_all(|cell| cell.background = None)
    }

    fn set_data_validation(&self, rule: &DataValidation) -> HostResult<()> {
        self.update_all(|cell| cell.validation = Some(rule.clone()))
    }
}

/// A workbook described as JSON, e.g.
/// `{"sheets": [{"name": "Sheet1", "rows": [["42"]]}]}`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct WorkbookFixture {
    pub sheets: Vec<SheetFixture>,
}

/// One sheet of a [`WorkbookFixture`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SheetFixture {
    pub name: String,
    #[serde(default)]
    pub rows: Vec<Vec<String>>,
}

impl WorkbookFixture {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn strings(rows: &[&[&str]]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|row| row.iter().map(|v| v.to_string()).collect())
            .collect()
    }

    #[test]
    fn test_duplicate_sheet_rejected() {
        let book = MemorySpreadsheet::new();
        book.insert_sheet("Sheet1").unwrap();
        assert_eq!(
            book.insert_sheet("Sheet1").unwrap_err(),
            HostError::DuplicateSheet("Sheet1".into())
        );
        assert_eq!(book.sheet_names(), vec!["Sheet1".to_string()]);
    }

    #[test]
    fn test_values_are_padded() {
        let book = MemorySpreadsheet::new();
        let sheet = book
            .insert_sheet_with_rows("Data", &strings(&[&["a", "b"], &["c"]]))
            .unwrap();
        let values = sheet.range_by_a1("A1:C2").unwrap().values().unwrap();
        assert_eq!(values, strings(&[&["a", "b", ""], &["c", "", ""]]));
        assert_eq!(sheet.last_row().unwrap(), 2);
        assert_eq!(sheet.last_column().unwrap(), 2);
    }

    #[test]
    fn test_empty_sheet_extent() {
        let book = MemorySpreadsheet::new();
        let sheet = book.insert_sheet("Empty").unwrap();
        sheet.range(Region::cell(4, 4)).unwrap().set_background(Color::rgb(1, 2, 3)).unwrap();
        assert_eq!(sheet.last_row().unwrap(), 0);
        assert_eq!(sheet.last_column().unwrap(), 0);
    }

    #[test]
    fn test_set_values_shape_mismatch() {
        let book = MemorySpreadsheet::new();
        let sheet = book.insert_sheet("Sheet1").unwrap();
        let range = sheet.range(Region::new(1, 1, 2, 2)).unwrap();

        let err = range.set_values(&strings(&[&["a", "b"], &["c"]])).unwrap_err();
        assert_eq!(
            err,
            HostError::ShapeMismatch {
                rows: 2,
                columns: 2,
                actual_rows: 2,
                actual_columns: 1,
            }
        );
        // Nothing was written
        assert_eq!(sheet.last_row().unwrap(), 0);
    }

    #[test]
    fn test_remove_duplicates_by_column() {
        let book = MemorySpreadsheet::new();
        let sheet = book
            .insert_sheet_with_rows(
                "Sheet1",
                &strings(&[
                    &["id", "name"],
                    &["1", "apple"],
                    &["2", "pear"],
                    &["1", "apricot"],
                    &["3", "pear"],
                ]),
            )
            .unwrap();

        let range = sheet.range(Region::new(2, 1, 4, 2)).unwrap();
        range.remove_duplicates(&[1]).unwrap();

        let values = sheet.range_by_a1("A1:B5").unwrap().values().unwrap();
        assert_eq!(
            values,
            strings(&[
                &["id", "name"],
                &["1", "apple"],
                &["2", "pear"],
                &["3", "pear"],
                &["", ""],
            ])
        );
    }

    #[test]
    fn test_remove_duplicates_all_columns() {
        let book = MemorySpreadsheet::new();
        let sheet = book
            .insert_sheet_with_rows("Sheet1", &strings(&[&["a", "1"], &["a", "2"], &["a", "1"]]))
            .unwrap();
        sheet
            .range_by_a1("A1:B3")
            .unwrap()
            .remove_duplicates(&[])
            .unwrap();
        assert_eq!(sheet.last_row().unwrap(), 2);
    }

    #[test]
    fn test_remove_duplicates_column_out_of_range() {
        let book = MemorySpreadsheet::new();
        let sheet = book.insert_sheet("Sheet1").unwrap();
        let range = sheet.range_by_a1("B1:C3").unwrap();
        for column in [0, 1, 4] {
            assert_eq!(
                range.remove_duplicates(&[column]).unwrap_err(),
                HostError::ColumnOutOfRange {
                    column,
                    range: "B1:C3".into(),
                }
            );
        }
    }

    #[test]
    fn test_remove_duplicates_ignores_case() {
        let book = MemorySpreadsheet::new();
        let sheet = book
            .insert_sheet_with_rows("Sheet1", &strings(&[&["Apple"], &["apple"], &["APPLE "]]))
            .unwrap();
        sheet
            .range_by_a1("A1:A3")
            .unwrap()
            .remove_duplicates(&[])
            .unwrap();
        assert_eq!(
            sheet.range_by_a1("A1:A3").unwrap().values().unwrap(),
            strings(&[&["Apple"], &["APPLE "], &[""]])
        );
    }

    #[test]
    fn test_oversized_ranges_rejected() {
        let book = MemorySpreadsheet::new();
        let sheet = book.insert_sheet("Sheet1").unwrap();

        let err = sheet.range_by_a1("A1:ZZZ10000000").unwrap_err();
        assert_eq!(
            err,
            HostError::TooManyCells {
                range: "A1:ZZZ10000000".into(),
                cells: 182_780_000_000,
                limit: MAX_CELLS,
            }
        );
        assert!(matches!(
            sheet.range(Region::new(1, 1, 10_000_000, 2)),
            Err(HostError::TooManyCells { .. })
        ));
        // Exactly at the limit is fine
        assert!(sheet.range(Region::new(1, 1, 1_000_000, 10)).is_ok());
    }

    #[test]
    fn test_checkboxes() {
        let book = MemorySpreadsheet::new();
        let sheet = book
            .insert_sheet_with_rows("Sheet1", &strings(&[&["TRUE"]]))
            .unwrap();
        sheet.range(Region::new(1, 1, 2, 1)).unwrap().insert_checkboxes().unwrap();

        assert!(book.is_checkbox("Sheet1", 1, 1).unwrap());
        assert!(book.is_checkbox("Sheet1", 2, 1).unwrap());
        assert!(!book.is_checkbox("Sheet1", 3, 1).unwrap());
        assert_eq!(
            sheet.range_by_a1("A1:A2").unwrap().values().unwrap(),
            strings(&[&["TRUE"], &["FALSE"]])
        );
        assert!(!book.accepts("Sheet1", 1, 1, "maybe").unwrap());
    }

    #[test]
    fn test_removed_sheet_handles_fail() {
        let book = MemorySpreadsheet::new();
        let sheet = book.insert_sheet("Gone").unwrap();
        assert!(book.remove_sheet("Gone"));
        assert!(!book.remove_sheet("Gone"));
        assert_eq!(
            sheet.last_row().unwrap_err(),
            HostError::SheetRemoved("Gone".into())
        );
        assert!(book.sheet_by_name("Gone").is_none());
    }

    #[test]
    fn test_fixture_from_json() {
        let fixture = WorkbookFixture::from_json(
            r#"{"sheets": [{"name": "Sheet1", "rows": [["42", "x"]]}, {"name": "Empty"}]}"#,
        )
        .unwrap();
        let book = MemorySpreadsheet::from_fixture(&fixture).unwrap();
        assert_eq!(book.sheet_names(), vec!["Sheet1".to_string(), "Empty".to_string()]);

        let sheet = book.sheet_by_name("Sheet1").unwrap();
        assert_eq!(sheet.range_by_a1("B1").unwrap().value().unwrap(), "x");
    }
}
