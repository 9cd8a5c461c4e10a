//! Data validation
//!
//! Rules that restrict what may be entered into a range. The only criterion
//! the facade builds is "value must be in range", which hosts render as a
//! dropdown ("pulldown") listing the source range's values.
//!
//! ## Example
//!
//! ```rust
//! use sheet_access_core::{CellRange, DataValidation, RangeReference};
//!
//! let source = RangeReference::new("Lists", CellRange::parse("A1:A5").unwrap());
//! let rule = DataValidation::value_in_range(source).with_help_text("Pick a status");
//!
//! assert!(rule.show_dropdown);
//! assert_eq!(rule.criteria.to_string(), "value in Lists!A1:A5");
//! ```

use crate::address::CellRange;
use std::fmt;

/// A range on a named sheet, e.g. `Lists!A1:A5`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RangeReference {
    /// Name of the sheet holding the range
    pub sheet_name: String,
    /// The cells on that sheet
    pub range: CellRange,
}

impl RangeReference {
    pub fn new(sheet_name: impl Into<String>, range: CellRange) -> Self {
        Self {
            sheet_name: sheet_name.into(),
            range,
        }
    }
}

impl fmt::Display for RangeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}!{}", self.sheet_name, self.range)
    }
}

/// What a validated cell must satisfy
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ValidationCriteria {
    /// The value must equal one of the values in `source`
    ValueInRange { source: RangeReference },
    /// The value must be `TRUE` or `FALSE`
    Checkbox,
}

impl fmt::Display for ValidationCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationCriteria::ValueInRange { source } => write!(f, "value in {source}"),
            ValidationCriteria::Checkbox => f.write_str("checkbox"),
        }
    }
}

/// Data validation rule for cells
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DataValidation {
    /// The condition values must meet
    pub criteria: ValidationCriteria,
    /// Show a dropdown listing the allowed values
    pub show_dropdown: bool,
    /// Keep invalid input (with a warning) instead of rejecting it
    pub allow_invalid: bool,
    /// Text shown when the cell is selected
    pub help_text: Option<String>,
}

impl DataValidation {
    /// Require values to be in `source`, shown as a dropdown
    pub fn value_in_range(source: RangeReference) -> Self {
        Self::with_criteria(ValidationCriteria::ValueInRange { source })
    }

    /// Require `TRUE`/`FALSE`, the rule behind inserted checkboxes
    pub fn checkbox() -> Self {
        Self {
            show_dropdown: false,
            ..Self::with_criteria(ValidationCriteria::Checkbox)
        }
    }

    fn with_criteria(criteria: ValidationCriteria) -> Self {
        Self {
            criteria,
            show_dropdown: true,
            allow_invalid: false,
            help_text: None,
        }
    }

    /// Set whether to show the dropdown
    pub fn with_dropdown(mut self, show: bool) -> Self {
        self.show_dropdown = show;
        self
    }

    /// Set whether invalid input is kept
    pub fn with_allow_invalid(mut self, allow: bool) -> Self {
        self.allow_invalid = allow;
        self
    }

    /// Set help text
    pub fn with_help_text(mut self, text: impl Into<String>) -> Self {
        self.help_text = Some(text.into());
        self
    }

    /// Check `value` against this rule.
    ///
    /// `allowed` supplies the current values of the source range for
    /// [`ValidationCriteria::ValueInRange`]; it is not called otherwise.
    /// Blank values always pass.
    pub fn accepts<'a, I, F>(&self, value: &str, allowed: F) -> bool
    where
        F: FnOnce() -> I,
        I: IntoIterator<Item = &'a str>,
    {
        if value.is_empty() {
            return true;
        }
        match &self.criteria {
            ValidationCriteria::ValueInRange { .. } => allowed().into_iter().any(|v| v == value),
            ValidationCriteria::Checkbox => value == "TRUE" || value == "FALSE",
        }
    }
}
