//! Validation of `A1`-style position strings.
//!
//! A *position* names a single cell (`B2`); *positions* name a rectangular
//! range (`B2:B15`). Only upper-case column letters followed by a row number
//! are accepted, with no sheet prefix, no `$` markers and no whitespace.
//!
//! These checks are purely syntactic: `A0` passes, and the host decides
//! whether the address actually exists.

use lazy_regex::regex_is_match;

/// Returns `true` if `position` is a single-cell address such as `B2`.
///
/// ```
/// use sheet_access_core::position::is_cell_position;
///
/// assert!(is_cell_position("B2"));
/// assert!(!is_cell_position("2B"));
/// assert!(!is_cell_position("b2"));
/// ```
pub fn is_cell_position(position: &str) -> bool {
    regex_is_match!(r"^[A-Z]+[0-9]+$", position)
}

/// Returns `true` if `positions` is a range address such as `B2:B15`.
///
/// ```
/// use sheet_access_core::position::is_range_position;
///
/// assert!(is_range_position("A6:X385"));
/// assert!(!is_range_position("B2"));
/// ```
pub fn is_range_position(positions: &str) -> bool {
    regex_is_match!(r"^[A-Z]+[0-9]+:[A-Z]+[0-9]+$", positions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cell_positions() {
        for valid in ["A1", "B2", "ZZ100", "AB0"] {
            assert!(is_cell_position(valid), "{valid} should be accepted");
        }
        for invalid in ["", "A", "1", "2B", "a1", "$A$1", "A1:B2", " A1", "A1\n", "Sheet1!A1"] {
            assert!(!is_cell_position(invalid), "{invalid:?} should be rejected");
        }
    }

    #[test]
    fn test_range_positions() {
        for valid in ["B2:B15", "A6:X385", "AA1:A1"] {
            assert!(is_range_position(valid), "{valid} should be accepted");
        }
        for invalid in ["B2", "B2:", ":B2", "B2:B15:C3", "b2:b15", "B2-B15", "A:B", "1:2"] {
            assert!(!is_range_position(invalid), "{invalid:?} should be rejected");
        }
    }
}
