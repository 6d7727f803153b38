use std::collections::BTreeSet;

use rand::Rng;

use crate::cell::{Cell, in_range};
use crate::config::GameConfig;
use crate::error::BoardError;

/// The hidden ground truth of a game: which cells hold mines.
///
/// The board knows nothing about what the agent has deduced. It only answers
/// bounds checks and neighbor counts, and records which mines have been flagged.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Board {
    height: usize,
    width: usize,
    /// `grid[row][col]` is true when the cell holds a mine.
    grid: Vec<Vec<bool>>,
    mines: BTreeSet<Cell>,
    mines_found: BTreeSet<Cell>,
}

impl Board {
    /// Scatters `config.mines` mines uniformly at random.
    pub fn random<R: Rng + ?Sized>(config: GameConfig, rng: &mut R) -> Result<Self, BoardError> {
        config.validate()?;

        let mut mines = BTreeSet::new();
        // Retry until the requested number of distinct cells is mined.
        while mines.len() != config.mines {
            mines.insert(Cell::new(
                rng.random_range(0..config.height),
                rng.random_range(0..config.width),
            ));
        }

        Self::with_mines(config.height, config.width, mines)
    }

    /// Builds a board with mines at exactly the given cells.
    pub fn with_mines(
        height: usize,
        width: usize,
        mines: impl IntoIterator<Item = Cell>,
    ) -> Result<Self, BoardError> {
        let mut grid = vec![vec![false; width]; height];
        let mut placed = BTreeSet::new();

        for cell in mines {
            if !in_range(height, width, cell) {
                return Err(BoardError::OutOfRange {
                    cell,
                    height,
                    width,
                });
            }
            grid[cell.row][cell.col] = true;
            placed.insert(cell);
        }

        GameConfig::new(height, width, placed.len()).validate()?;

        Ok(Board {
            height,
            width,
            grid,
            mines: placed,
            mines_found: BTreeSet::new(),
        })
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn mines(&self) -> &BTreeSet<Cell> {
        &self.mines
    }

    pub fn mines_found(&self) -> &BTreeSet<Cell> {
        &self.mines_found
    }

    fn check(&self, cell: Cell) -> Result<(), BoardError> {
        if in_range(self.height, self.width, cell) {
            Ok(())
        } else {
            Err(BoardError::OutOfRange {
                cell,
                height: self.height,
                width: self.width,
            })
        }
    }

    pub fn is_mine(&self, cell: Cell) -> Result<bool, BoardError> {
        self.check(cell)?;
        Ok(self.grid[cell.row][cell.col])
    }

    /// Number of mines in the 8-neighborhood of `cell`.
    pub fn nearby_mines(&self, cell: Cell) -> Result<u8, BoardError> {
        self.check(cell)?;
        let count = cell
            .neighbors(self.height, self.width)
            .filter(|n| self.grid[n.row][n.col])
            .count();
        Ok(count as u8)
    }

    /// Replaces the set of flagged cells.
    pub fn set_mines_found(&mut self, flagged: impl IntoIterator<Item = Cell>) {
        self.mines_found = flagged.into_iter().collect();
    }

    /// The game is won once exactly the mined cells have been flagged.
    pub fn won(&self) -> bool {
        self.mines_found == self.mines
    }
}
