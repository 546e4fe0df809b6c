//! The [`Grid`] engine: cell geometry, hit-testing, mirror pairs and
//! bit-pattern activation.
//!
//! Cells live in a dense row-major `Vec`; a cell's id is its index,
//! `row * cols + col`. The canvas is the cell area plus a `padding` border on
//! every side, and the border never resolves to a cell.
//!
//! Mirroring reflects column `c` onto `cols - 1 - c`. With an odd column
//! count this is the reflection about the centre column `cols / 2`, which
//! has no partner; with an even count every column is paired.

use log::debug;

use crate::cell::Cell;
use crate::error::GridError;
use crate::geom::{Point, Range};

// ---------------------------------------------------------------------------
// Geometry
// ---------------------------------------------------------------------------

/// Largest canvas width or height, in pixels, that a geometry may produce.
pub const MAX_CANVAS_SIDE: i32 = 16_384;

/// Grid dimensions in cells and pixels.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Geometry {
    pub rows: i32,
    pub cols: i32,
    pub cell_width: i32,
    pub cell_height: i32,
    /// Border inset around the cell area, in pixels.
    pub padding: i32,
}

impl Geometry {
    /// Square `n × n` grid of `cell`-pixel squares with half a cell of
    /// padding.
    pub const fn square(n: i32, cell: i32) -> Self {
        Self {
            rows: n,
            cols: n,
            cell_width: cell,
            cell_height: cell,
            padding: cell / 2,
        }
    }

    /// Canvas width: `cols * cell_width + 2 * padding`.
    #[inline]
    pub const fn width(&self) -> i32 {
        self.cols * self.cell_width + 2 * self.padding
    }

    /// Canvas height: `rows * cell_height + 2 * padding`.
    #[inline]
    pub const fn height(&self) -> i32 {
        self.rows * self.cell_height + 2 * self.padding
    }

    /// The whole canvas.
    #[inline]
    pub fn bounds(&self) -> Range {
        Range::new(0, 0, self.width(), self.height())
    }

    /// The canvas without its padding border.
    #[inline]
    pub fn cell_area(&self) -> Range {
        let p = self.padding;
        self.bounds().shift(p, p, -p, -p)
    }

    /// Number of leading columns that a bit pattern addresses: every column
    /// up to and including the mirror axis.
    #[inline]
    pub const fn pattern_cols(&self) -> i32 {
        (self.cols + 1) / 2
    }

    /// Number of bits [`Grid::apply_bit_pattern`] consumes.
    #[inline]
    pub const fn pattern_len(&self) -> usize {
        (self.rows * self.pattern_cols()) as usize
    }

    /// Check that every dimension is usable: counts and cell sizes positive,
    /// padding non-negative, and the canvas no larger than
    /// [`MAX_CANVAS_SIDE`] on either side.
    pub fn validate(&self) -> Result<(), GridError> {
        let positive = [
            ("rows", self.rows),
            ("cols", self.cols),
            ("cell_width", self.cell_width),
            ("cell_height", self.cell_height),
        ];
        for (field, value) in positive {
            if value <= 0 {
                return Err(GridError::InvalidGeometry { field, value });
            }
        }
        if self.padding < 0 {
            return Err(GridError::InvalidGeometry {
                field: "padding",
                value: self.padding,
            });
        }
        let side = |count: i32, size: i32| {
            count
                .checked_mul(size)
                .and_then(|n| self.padding.checked_mul(2).and_then(|p| n.checked_add(p)))
                .filter(|&n| n <= MAX_CANVAS_SIDE)
        };
        if side(self.cols, self.cell_width).is_none() {
            return Err(GridError::InvalidGeometry {
                field: "cell_width",
                value: self.cell_width,
            });
        }
        if side(self.rows, self.cell_height).is_none() {
            return Err(GridError::InvalidGeometry {
                field: "cell_height",
                value: self.cell_height,
            });
        }
        if self.rows.checked_mul(self.cols).is_none() {
            return Err(GridError::InvalidGeometry {
                field: "cols",
                value: self.cols,
            });
        }
        Ok(())
    }
}

impl Default for Geometry {
    fn default() -> Self {
        Self::square(5, 70)
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A fixed-size grid of togglable cells.
#[derive(Debug, Clone)]
pub struct Grid {
    geometry: Geometry,
    cells: Vec<Cell>,
}

impl Grid {
    /// Create a grid with every cell inactive.
    pub fn new(geometry: Geometry) -> Result<Self, GridError> {
        geometry.validate()?;
        let Geometry {
            rows,
            cols,
            cell_width,
            cell_height,
            padding,
        } = geometry;
        let cells = (0..rows * cols)
            .map(|i| {
                let row = i / cols;
                let col = i % cols;
                let pos = Point::new(col * cell_width + padding, row * cell_height + padding);
                Cell::new(i as usize, row, col, pos)
            })
            .collect();
        debug!("grid {rows}x{cols} created, canvas {}x{}", geometry.width(), geometry.height());
        Ok(Self { geometry, cells })
    }

    #[inline]
    pub fn geometry(&self) -> Geometry {
        self.geometry
    }

    /// Canvas width in pixels.
    #[inline]
    pub fn width(&self) -> i32 {
        self.geometry.width()
    }

    /// Canvas height in pixels.
    #[inline]
    pub fn height(&self) -> i32 {
        self.geometry.height()
    }

    /// Number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in id order.
    #[inline]
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    #[inline]
    pub fn cell(&self, id: usize) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Cell at a given row and column.
    pub fn cell_rc(&self, row: i32, col: i32) -> Option<&Cell> {
        let g = &self.geometry;
        if !(0..g.rows).contains(&row) || !(0..g.cols).contains(&col) {
            return None;
        }
        self.cells.get((row * g.cols + col) as usize)
    }

    /// Pixel rectangle of a cell.
    pub fn cell_rect(&self, cell: &Cell) -> Range {
        cell.rect(self.geometry.cell_width, self.geometry.cell_height)
    }

    /// The cell under pixel `p`, or `None` when `p` is in the padding border
    /// or off the canvas.
    pub fn cell_at(&self, p: Point) -> Option<&Cell> {
        let g = &self.geometry;
        if !g.cell_area().contains(p) {
            return None;
        }
        let row = (p.y - g.padding) / g.cell_height;
        let col = (p.x - g.padding) / g.cell_width;
        self.cell_rc(row, col)
    }

    /// Column paired with `col` across the mirror axis, if any.
    #[inline]
    pub fn mirror_col(&self, col: i32) -> Option<i32> {
        let m = self.geometry.cols - 1 - col;
        (m != col).then_some(m)
    }

    /// The reflection of cell `id`, or `None` when the cell sits on the
    /// mirror axis (or `id` is out of range).
    pub fn mirror_of(&self, id: usize) -> Option<&Cell> {
        let cell = self.cells.get(id)?;
        let col = self.mirror_col(cell.col())?;
        self.cell_rc(cell.row(), col)
    }

    /// Flip a cell. Returns the new state, or `None` for an unknown id.
    pub fn toggle(&mut self, id: usize) -> Option<bool> {
        let cell = self.cells.get_mut(id)?;
        let active = !cell.is_active();
        cell.set_active(active);
        debug!("cell {id} toggled to {active}");
        Some(active)
    }

    /// Deactivate every cell. Geometry is untouched.
    pub fn reset_all(&mut self) {
        for cell in &mut self.cells {
            cell.set_active(false);
        }
    }

    /// Number of active cells.
    pub fn active_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_active()).count()
    }

    /// Number of bits [`apply_bit_pattern`](Grid::apply_bit_pattern)
    /// consumes.
    #[inline]
    pub fn pattern_len(&self) -> usize {
        self.geometry.pattern_len()
    }

    /// Activate cells from a bit sequence.
    ///
    /// Bits are consumed in row-major order over the columns up to and
    /// including the mirror axis; each set bit activates its cell and that
    /// cell's mirror. Cells are never deactivated. Fails without touching
    /// any cell when `bits` is shorter than [`pattern_len`](Grid::pattern_len);
    /// surplus bits are ignored.
    pub fn apply_bit_pattern(&mut self, bits: &[bool]) -> Result<(), GridError> {
        let needed = self.pattern_len();
        if bits.len() < needed {
            return Err(GridError::PatternLengthMismatch {
                needed,
                available: bits.len(),
            });
        }
        let pattern_cols = self.geometry.pattern_cols();
        let mut bits = bits.iter().copied();
        for id in 0..self.cells.len() {
            let cell = self.cells[id];
            if cell.col() >= pattern_cols {
                continue;
            }
            if bits.next() != Some(true) {
                continue;
            }
            self.cells[id].set_active(true);
            if let Some(m) = self.mirror_of(id).map(Cell::id) {
                self.cells[m].set_active(true);
            }
        }
        debug!("pattern applied, {} cells active", self.active_count());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid5() -> Grid {
        Grid::new(Geometry::square(5, 70)).unwrap()
    }

    #[test]
    fn derived_canvas_size() {
        let g = grid5();
        assert_eq!(g.width(), 420);
        assert_eq!(g.height(), 420);
        assert_eq!(g.len(), 25);
        assert!(g.cells().iter().all(|c| !c.is_active()));
    }

    #[test]
    fn cell_positions_use_column_divisor() {
        let g = Grid::new(Geometry {
            rows: 2,
            cols: 3,
            cell_width: 10,
            cell_height: 20,
            padding: 5,
        })
        .unwrap();
        let c = g.cell(4).unwrap();
        assert_eq!((c.row(), c.col()), (1, 1));
        assert_eq!(c.pos(), Point::new(15, 25));
        assert_eq!(g.cell(5).unwrap().pos(), Point::new(25, 25));
    }

    #[test]
    fn rejects_non_positive_dimensions() {
        let mut geo = Geometry::square(5, 70);
        geo.cols = 0;
        assert_eq!(
            Grid::new(geo).unwrap_err(),
            GridError::InvalidGeometry {
                field: "cols",
                value: 0
            }
        );
        let mut geo = Geometry::square(5, 70);
        geo.cell_height = -3;
        assert!(Grid::new(geo).is_err());
        let mut geo = Geometry::square(5, 70);
        geo.padding = -1;
        assert!(Grid::new(geo).is_err());
        geo.padding = 0;
        assert!(Grid::new(geo).is_ok());
    }

    #[test]
    fn rejects_oversized_canvas() {
        let mut geo = Geometry::square(5, 70);
        geo.cell_width = 600_000_000;
        assert_eq!(
            Grid::new(geo).unwrap_err(),
            GridError::InvalidGeometry {
                field: "cell_width",
                value: 600_000_000
            }
        );

        let mut geo = Geometry::square(50_000, 70);
        geo.padding = 35;
        assert!(matches!(
            geo.validate(),
            Err(GridError::InvalidGeometry { .. })
        ));

        let mut geo = Geometry::square(5, 70);
        geo.padding = i32::MAX;
        assert!(Grid::new(geo).is_err());

        let mut geo = Geometry::square(1, 1);
        geo.rows = MAX_CANVAS_SIDE + 1;
        geo.padding = 0;
        assert_eq!(
            geo.validate(),
            Err(GridError::InvalidGeometry {
                field: "cell_height",
                value: 1
            })
        );
        geo.rows = MAX_CANVAS_SIDE;
        assert!(geo.validate().is_ok());
    }

    #[test]
    fn cell_at_examples() {
        let g = grid5();
        assert_eq!(g.cell_at(Point::new(40, 40)).map(Cell::id), Some(0));
        assert_eq!(g.cell_at(Point::new(400, 400)).map(Cell::id), None);
        assert_eq!(g.cell_at(Point::new(384, 384)).map(Cell::id), Some(24));
        assert_eq!(g.cell_at(Point::new(10, 10)), None);
        assert_eq!(g.cell_at(Point::new(35, 385)), None);
        assert_eq!(g.cell_at(Point::new(-5, 40)), None);
        assert_eq!(g.cell_at(Point::new(9000, 40)), None);
    }

    #[test]
    fn cell_at_round_trips_stored_position() {
        for rows in 1..6 {
            for cols in 1..7 {
                let g = Grid::new(Geometry {
                    rows,
                    cols,
                    cell_width: 12,
                    cell_height: 9,
                    padding: 4,
                })
                .unwrap();
                for cell in g.cells() {
                    let corner = g.cell_at(cell.pos()).map(Cell::id);
                    assert_eq!(corner, Some(cell.id()));
                    let far = cell.pos().shift(11, 8);
                    assert_eq!(g.cell_at(far).map(Cell::id), Some(cell.id()));
                }
            }
        }
    }

    #[test]
    fn mirror_examples_odd() {
        let g = grid5();
        assert_eq!(g.mirror_of(0).map(Cell::id), Some(4));
        assert_eq!(g.mirror_of(6).map(Cell::id), Some(8));
        for row in 0..5 {
            let axis = g.cell_rc(row, 2).unwrap().id();
            assert_eq!(g.mirror_of(axis), None);
        }
        assert_eq!(g.mirror_of(25), None);
    }

    #[test]
    fn mirror_is_an_involution() {
        for cols in 1..9 {
            let g = Grid::new(Geometry {
                rows: 3,
                cols,
                cell_width: 10,
                cell_height: 10,
                padding: 5,
            })
            .unwrap();
            for cell in g.cells() {
                if let Some(m) = g.mirror_of(cell.id()) {
                    assert_eq!(m.row(), cell.row());
                    assert_ne!(m.id(), cell.id());
                    assert_eq!(g.mirror_of(m.id()).map(Cell::id), Some(cell.id()));
                }
            }
        }
    }

    #[test]
    fn mirror_even_columns_pairs_every_cell() {
        let g = Grid::new(Geometry::square(4, 10)).unwrap();
        let pairs: Vec<_> = (0..4).map(|c| g.mirror_col(c)).collect();
        assert_eq!(pairs, vec![Some(3), Some(2), Some(1), Some(0)]);
        assert!(g.cells().iter().all(|c| g.mirror_of(c.id()).is_some()));
    }

    #[test]
    fn toggle_and_reset() {
        let mut g = grid5();
        assert_eq!(g.toggle(7), Some(true));
        assert_eq!(g.toggle(3), Some(true));
        assert_eq!(g.toggle(3), Some(false));
        assert_eq!(g.toggle(99), None);
        assert_eq!(g.active_count(), 1);
        g.reset_all();
        assert!(g.cells().iter().all(|c| !c.is_active()));
        assert_eq!(g.width(), 420);
    }

    #[test]
    fn pattern_len_counts_axis_column() {
        assert_eq!(grid5().pattern_len(), 15);
        assert_eq!(Grid::new(Geometry::square(4, 10)).unwrap().pattern_len(), 8);
        let mut geo = Geometry::square(1, 10);
        geo.cols = 7;
        assert_eq!(Grid::new(geo).unwrap().pattern_len(), 4);
    }

    #[test]
    fn apply_pattern_mirrors_set_bits() {
        let mut g = grid5();
        // Row 0: columns 0 and 2; row 4: column 1.
        let mut bits = vec![false; 15];
        bits[0] = true;
        bits[2] = true;
        bits[13] = true;
        g.apply_bit_pattern(&bits).unwrap();
        let active: Vec<usize> = g
            .cells()
            .iter()
            .filter(|c| c.is_active())
            .map(Cell::id)
            .collect();
        assert_eq!(active, vec![0, 2, 4, 21, 23]);
    }

    #[test]
    fn apply_pattern_never_deactivates() {
        let mut g = grid5();
        g.toggle(12);
        g.apply_bit_pattern(&[false; 15]).unwrap();
        assert!(g.cell(12).unwrap().is_active());
        assert_eq!(g.active_count(), 1);
    }

    #[test]
    fn apply_pattern_short_input_is_rejected_untouched() {
        let mut g = grid5();
        let err = g.apply_bit_pattern(&[true; 14]).unwrap_err();
        assert_eq!(
            err,
            GridError::PatternLengthMismatch {
                needed: 15,
                available: 14
            }
        );
        assert_eq!(g.active_count(), 0);
    }

    #[test]
    fn apply_pattern_all_set_fills_grid() {
        let mut g = Grid::new(Geometry::square(4, 10)).unwrap();
        g.apply_bit_pattern(&[true; 20]).unwrap();
        assert_eq!(g.active_count(), 16);
    }
}
