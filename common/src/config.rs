use crate::error::BoardError;

/// Board dimensions and mine count for one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GameConfig {
    pub height: usize,
    pub width: usize,
    pub mines: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            height: 8,
            width: 8,
            mines: 8,
        }
    }
}

impl GameConfig {
    pub fn new(height: usize, width: usize, mines: usize) -> Self {
        GameConfig {
            height,
            width,
            mines,
        }
    }

    /// Total number of cells, or `None` if it does not fit in a `usize`.
    pub fn cells(&self) -> Option<usize> {
        self.height.checked_mul(self.width)
    }

    /// At least one cell must stay free of mines, which also rules out empty boards.
    pub fn validate(&self) -> Result<(), BoardError> {
        match self.cells() {
            Some(cells) if self.mines < cells => Ok(()),
            cells => Err(BoardError::InvalidConfiguration {
                mines: self.mines,
                cells: cells.unwrap_or(usize::MAX),
            }),
        }
    }
}
