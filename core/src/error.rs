use thiserror::Error;

use crate::CellCount;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board must be at least one cell wide and one cell high")]
    InvalidSize,
    #[error("Too many mines: {mines} requested, fewer than {limit} required")]
    TooManyMines { mines: CellCount, limit: CellCount },
}

pub type Result<T> = core::result::Result<T, GameError>;
