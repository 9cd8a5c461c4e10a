//! # sheet-access
//!
//! A validated facade over a host spreadsheet service.
//!
//! [`SheetAccess`] wraps one spreadsheet handle and turns the host's two
//! silent failure modes into named errors before anything is forwarded:
//! a sheet name with no matching sheet ([`Error::SheetNotFound`]) and a
//! malformed `A1` position string ([`Error::InvalidPosition`],
//! [`Error::InvalidPositions`]).
//!
//! # Architecture
//!
//! ```text
//! handler::{do_post, do_get}
//!     └── SheetAccess<S> (this crate)
//!           └── S: SpreadsheetService (host traits)
//!                 ├── MemorySpreadsheet (in-process host)
//!                 └── any other host implementation
//! ```
//!
//! # Example
//!
//! ```rust
//! use sheet_access::{MemorySpreadsheet, SheetAccess};
//!
//! # fn example() -> sheet_access::Result<()> {
//! let book = MemorySpreadsheet::new();
//! book.insert_sheet("Sheet1")?;
//!
//! let access = SheetAccess::new(book);
//! access.set_value("Sheet1", 1, 1, "42")?;
//! assert_eq!(access.cell_value("Sheet1", "A1")?, "42");
//! assert_eq!(access.last_row("Sheet1")?, 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod error;
pub mod facade;
pub mod handler;
pub mod host;
pub mod memory;

pub use error::{Error, HostError, HostResult, Result};
pub use facade::{RangeOf, SheetAccess};
pub use handler::{
    do_get, do_get_with, do_post, do_post_with, EntryConfig, HandlerError, Request, TextOutput,
};
pub use host::{RangeHandle, SheetHandle, SpreadsheetService};
pub use memory::{MemoryRange, MemorySheet, MemorySpreadsheet};

pub use sheet_access_core::{
    position, CellAddress, CellRange, Color, DataValidation, RangeReference, Region,
    ValidationCriteria,
};
