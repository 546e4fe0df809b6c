//! The [`Cell`] type: one addressable square of the grid.

use crate::geom::{Point, Range};

/// A grid cell. Its position is fixed when the grid is built; only the
/// active flag changes afterwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    id: usize,
    row: i32,
    col: i32,
    /// Top-left pixel of the cell.
    pos: Point,
    active: bool,
}

impl Cell {
    pub(crate) const fn new(id: usize, row: i32, col: i32, pos: Point) -> Self {
        Self {
            id,
            row,
            col,
            pos,
            active: false,
        }
    }

    /// Row-major index, `row * cols + col`.
    #[inline]
    pub const fn id(&self) -> usize {
        self.id
    }

    #[inline]
    pub const fn row(&self) -> i32 {
        self.row
    }

    #[inline]
    pub const fn col(&self) -> i32 {
        self.col
    }

    /// Top-left pixel coordinates.
    #[inline]
    pub const fn pos(&self) -> Point {
        self.pos
    }

    #[inline]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    #[inline]
    pub(crate) fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    /// The pixel rectangle covered by this cell.
    #[inline]
    pub fn rect(&self, cell_width: i32, cell_height: i32) -> Range {
        Range::sized(self.pos, cell_width, cell_height)
    }
}
