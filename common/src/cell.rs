use std::fmt;

use itertools::iproduct;

/// A coordinate on the minesweeper board, addressed as (row, column).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize)]
pub struct Cell {
    pub row: usize,
    pub col: usize,
}

impl Cell {
    pub const fn new(row: usize, col: usize) -> Self {
        Cell { row, col }
    }

    /// All in-bounds cells of the 8-neighborhood around this one.
    /// Board edges and corners yield fewer than eight neighbors.
    pub fn neighbors(self, height: usize, width: usize) -> impl Iterator<Item = Cell> {
        iproduct!(-1isize..=1, -1isize..=1).filter_map(move |(dr, dc)| {
            if dr == 0 && dc == 0 {
                return None;
            }

            let row = self.row.checked_add_signed(dr)?;
            let col = self.col.checked_add_signed(dc)?;
            let cell = Cell { row, col };

            in_range(height, width, cell).then_some(cell)
        })
    }
}

impl From<(usize, usize)> for Cell {
    fn from((row, col): (usize, usize)) -> Self {
        Cell { row, col }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// Whether `cell` lies inside a `height` x `width` grid.
pub fn in_range(height: usize, width: usize, cell: Cell) -> bool {
    cell.row < height && cell.col < width
}

/// Every cell of a `height` x `width` grid in row-major order.
pub fn all_cells(height: usize, width: usize) -> impl Iterator<Item = Cell> {
    iproduct!(0..height, 0..width).map(Cell::from)
}
