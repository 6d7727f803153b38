use std::collections::BTreeSet;
use std::fmt;

use itertools::Itertools;

use crate::cell::Cell;

/// A logical statement about the board: exactly `count` of `cells` are mines.
///
/// Cells are kept in a sorted set so that two sentences compare and hash
/// equal whenever they describe the same cells and count, regardless of the
/// order in which those cells were discovered.
#[derive(Debug, Clone, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct Sentence {
    cells: BTreeSet<Cell>,
    count: usize,
}

impl Sentence {
    pub fn new(cells: impl IntoIterator<Item = Cell>, count: usize) -> Self {
        let cells: BTreeSet<Cell> = cells.into_iter().collect();
        debug_assert!(count <= cells.len(), "sentence claims more mines than cells");
        Sentence { cells, count }
    }

    pub fn cells(&self) -> &BTreeSet<Cell> {
        &self.cells
    }

    pub fn count(&self) -> usize {
        self.count
    }

    /// A sentence with no cells left carries no information.
    pub fn is_trivial(&self) -> bool {
        self.cells.is_empty()
    }

    /// Every cell is a mine when the count covers the whole set.
    pub fn known_mines(&self) -> Option<&BTreeSet<Cell>> {
        (self.count > 0 && self.cells.len() == self.count).then_some(&self.cells)
    }

    /// Every cell is safe when no mines remain.
    pub fn known_safes(&self) -> Option<&BTreeSet<Cell>> {
        (self.count == 0).then_some(&self.cells)
    }

    /// Accounts for a confirmed mine: drops it from the cells and from the count.
    pub fn mark_mine(&mut self, cell: Cell) {
        if self.cells.remove(&cell) {
            assert!(self.count > 0, "mine {cell} marked in a sentence with no mines left");
            self.count -= 1;
        }
    }

    pub fn mark_safe(&mut self, cell: Cell) {
        self.cells.remove(&cell);
    }

    /// When `self` is a subset of `other`, the cells only `other` covers hold
    /// the difference of the two counts.
    ///
    /// Returns `None` if `self` is not a subset, and also when the counts are
    /// inconsistent (the subset would need more mines than its superset).
    pub fn subtract_from(&self, other: &Sentence) -> Option<Sentence> {
        if !self.cells.is_subset(&other.cells) {
            return None;
        }
        let count = other.count.checked_sub(self.count)?;
        let cells: BTreeSet<Cell> = other.cells.difference(&self.cells).copied().collect();
        (count <= cells.len()).then_some(Sentence { cells, count })
    }
}

impl fmt::Display for Sentence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}} = {}", self.cells.iter().join(", "), self.count)
    }
}
