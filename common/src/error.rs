use thiserror::Error;

use crate::cell::Cell;

/// Failures raised by the [`Board`](crate::board::Board) and by game configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BoardError {
    #[error("cell {cell} is out of range for a {height}x{width} board")]
    OutOfRange {
        cell: Cell,
        height: usize,
        width: usize,
    },
    #[error("mine count {mines} must be less than the number of cells ({cells})")]
    InvalidConfiguration { mines: usize, cells: usize },
}
