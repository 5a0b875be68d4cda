use serde::{Deserialize, Serialize};

use crate::*;

/// State of a single grid position. Owned by its [`Grid`], mutated only through it.
#[derive(Copy, Clone, Debug, Serialize, Deserialize)]
pub struct Cell {
    pos: Coord2,
    pub(crate) is_mine: bool,
    pub(crate) is_revealed: bool,
    pub(crate) is_marked: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new(pos: Coord2) -> Self {
        Self {
            pos,
            is_mine: false,
            is_revealed: false,
            is_marked: false,
            adjacent_mines: 0,
        }
    }

    pub const fn pos(&self) -> Coord2 {
        self.pos
    }

    pub const fn x(&self) -> Coord {
        self.pos.0
    }

    pub const fn y(&self) -> Coord {
        self.pos.1
    }

    pub const fn is_mine(&self) -> bool {
        self.is_mine
    }

    pub const fn is_revealed(&self) -> bool {
        self.is_revealed
    }

    pub const fn is_marked(&self) -> bool {
        self.is_marked
    }

    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    /// A revealed cell with no adjacent mine.
    pub const fn is_blank(&self) -> bool {
        self.is_revealed && !self.is_mine && self.adjacent_mines == 0
    }
}

/// Cells are the same cell when they sit at the same position.
impl PartialEq for Cell {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Cell {}

/// What the player is allowed to see of a cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Marked,
    Revealed(u8),
    /// Unrevealed mine, shown once the game is lost.
    Mine,
    /// The mine whose reveal lost the game.
    Exploded,
    /// Mark placed on a safe cell, shown once the game is lost.
    WrongMark,
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_by_position() {
        let mut a = Cell::new((1, 2));
        let b = Cell::new((1, 2));
        a.is_revealed = true;
        a.adjacent_mines = 3;

        assert_eq!(a, b);
        assert_ne!(a, Cell::new((2, 1)));
    }

    #[test]
    fn fresh_cell_is_hidden_and_safe() {
        let cell = Cell::new((0, 0));
        assert!(!cell.is_mine());
        assert!(!cell.is_revealed());
        assert!(!cell.is_marked());
        assert_eq!(cell.adjacent_mines(), 0);
        assert!(!cell.is_blank());
    }
}
