extern crate alloc;

use alloc::collections::BTreeSet;
use serde::{Deserialize, Serialize};

pub use difficulty::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use observer::*;
pub use session::*;
pub use stats::*;
pub use tile::*;
pub use types::*;

mod difficulty;
mod engine;
mod error;
mod generator;
mod observer;
mod session;
mod stats;
mod tile;
mod types;

/// Cells reserved around the first action: the cell and its eight neighbors.
pub const FIRST_ACTION_ZONE: CellCount = 9;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new(size: Coord2, mines: CellCount) -> Result<Self> {
        let config = Self::new_unchecked(size, mines);
        config.validate()?;
        Ok(config)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// Exclusive upper bound on the mine count, leaving the first action's zone free.
    pub const fn mine_limit(&self) -> CellCount {
        self.total_cells().saturating_sub(FIRST_ACTION_ZONE)
    }

    pub fn validate(&self) -> Result<()> {
        if self.size.0 == 0 || self.size.1 == 0 {
            return Err(GameError::InvalidSize);
        }

        let limit = self.mine_limit();
        if self.mines >= limit {
            return Err(GameError::TooManyMines {
                mines: self.mines,
                limit,
            });
        }

        Ok(())
    }
}

/// Cells whose visible state changed during one action.
#[derive(Clone, Debug, PartialEq)]
pub struct Changes<O> {
    pub cells: BTreeSet<Coord2>,
    pub outcome: O,
    /// Grid state once the action completed.
    pub state: GridState,
}

impl<O> Changes<O> {
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, pos: Coord2) -> bool {
        self.cells.contains(&pos)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    /// Whether any cell view changed, so the board needs redrawing.
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}
