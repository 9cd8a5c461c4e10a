//! # sheet-access-core
//!
//! Host-independent building blocks for the sheet-access facade:
//! - [`position`] - Pure validators for `A1`-style cell and range strings
//! - [`CellAddress`] and [`CellRange`] - A1 parsing and formatting
//! - [`Region`] - A 1-based `(row, column, row_count, column_count)` rectangle
//! - [`Color`] - Background color codes
//! - [`DataValidation`] - Validation rules applied to a range
//!
//! ## Example
//!
//! ```rust
//! use sheet_access_core::{position, CellRange, Region};
//!
//! assert!(position::is_range_position("B2:B15"));
//!
//! let range = CellRange::parse("B2:B15").unwrap();
//! assert_eq!(Region::from(range), Region::new(2, 2, 14, 1));
//! ```

pub mod address;
pub mod color;
pub mod error;
pub mod position;
pub mod region;
pub mod validation;

pub use address::{CellAddress, CellRange};
pub use color::Color;
pub use error::{Error, Result};
pub use region::Region;
pub use validation::{DataValidation, RangeReference, ValidationCriteria};

/// Maximum number of rows addressable in a sheet
pub const MAX_ROWS: u32 = 10_000_000;

/// Maximum number of columns addressable in a sheet (`ZZZ`)
pub const MAX_COLUMNS: u32 = 18_278;
