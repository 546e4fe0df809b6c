//! Errors reported by the grid engine.

use std::fmt;

/// Errors that can occur when building a grid or applying a pattern.
///
/// A point that resolves to no cell is not an error: hit-testing returns
/// `None` for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    /// A row/column count or cell size was not positive, the padding was
    /// negative, or the dimensions produce an oversized canvas.
    InvalidGeometry {
        field: &'static str,
        value: i32,
    },
    /// A bit sequence (or the digest it is derived from) is shorter than the
    /// grid requires.
    PatternLengthMismatch { needed: usize, available: usize },
    /// A digest contained something other than hexadecimal digits.
    InvalidDigest { pos: usize, ch: char },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidGeometry { field, value } => {
                write!(f, "invalid grid geometry: {field} = {value}")
            }
            Self::PatternLengthMismatch { needed, available } => {
                write!(f, "pattern too short: needed {needed}, got {available}")
            }
            Self::InvalidDigest { pos, ch } => {
                write!(f, "digest contains non-hex character \u{201c}{ch}\u{201d} at {pos}")
            }
        }
    }
}

impl std::error::Error for GridError {}
