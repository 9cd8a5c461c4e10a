//! Error types for sheet-access-core

use thiserror::Error;

/// Result type alias using [`Error`]
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while parsing addresses, regions and colors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// Invalid cell address format
    #[error("Invalid cell address: {0}")]
    InvalidAddress(String),

    /// Invalid cell range format
    #[error("Invalid cell range: {0}")]
    InvalidRange(String),

    /// Row number out of bounds (1-based)
    #[error("Row {0} out of bounds (max: {1})")]
    RowOutOfBounds(u64, u32),

    /// Column number out of bounds (1-based)
    #[error("Column {0} out of bounds (max: {1})")]
    ColumnOutOfBounds(u64, u32),

    /// Region with a zero coordinate or count
    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    /// Unparseable color code
    #[error("Invalid color code: {0}")]
    InvalidColor(String),
}
