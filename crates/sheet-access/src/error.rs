//! Error types for the sheet access facade.

use thiserror::Error;

/// Errors raised by [`SheetAccess`](crate::SheetAccess) operations.
///
/// The first three are detected before the host is asked to do anything.
#[derive(Debug, Error)]
pub enum Error {
    #[error("sheetName: {0} is not found.")]
    SheetNotFound(String),

    #[error("position: {0} is invalid format.")]
    InvalidPosition(String),

    #[error("positions: {0} is invalid format.")]
    InvalidPositions(String),

    #[error("Host spreadsheet error: {0}")]
    Host(#[from] HostError),
}

pub type Result<T> = std::result::Result<T, Error>;

/// Failures reported by a host spreadsheet service.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum HostError {
    #[error("Invalid range: {0}")]
    InvalidRange(#[from] sheet_access_core::Error),

    #[error("Values are {actual_rows}x{actual_columns} but the range is {rows}x{columns}")]
    ShapeMismatch {
        rows: u32,
        columns: u32,
        actual_rows: usize,
        actual_columns: usize,
    },

    #[error("Range {range} has {cells} cells, more than the limit of {limit}")]
    TooManyCells { range: String, cells: u64, limit: u64 },

    #[error("Column {column} is outside the range {range}")]
    ColumnOutOfRange { column: u32, range: String },

    #[error("Sheet already exists: {0}")]
    DuplicateSheet(String),

    #[error("No sheet named {0}")]
    UnknownSheet(String),

    #[error("Sheet no longer exists: {0}")]
    SheetRemoved(String),

    #[error("Operation failed: {0}")]
    OperationFailed(String),
}

pub type HostResult<T> = std::result::Result<T, HostError>;
