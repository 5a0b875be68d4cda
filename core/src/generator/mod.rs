use core::fmt;

use crate::*;
pub use random::*;

mod random;

/// Source of mine positions, consulted once per grid on its first action.
pub trait MinePlacer: fmt::Debug {
    /// Chooses `count` distinct positions from `candidates`.
    ///
    /// `candidates` is in row-major order and already excludes the first-click zone.
    fn place(&mut self, candidates: &[Coord2], count: CellCount) -> Vec<Coord2>;
}

/// Places a fixed list of mines, ignoring the requested count.
///
/// Positions that are not candidates (out of bounds, duplicated, or inside the
/// first-click zone) are skipped.
#[derive(Clone, Debug, PartialEq)]
pub struct PresetPlacer {
    mines: Vec<Coord2>,
}

impl PresetPlacer {
    pub fn new(mines: impl Into<Vec<Coord2>>) -> Self {
        Self {
            mines: mines.into(),
        }
    }
}

impl MinePlacer for PresetPlacer {
    fn place(&mut self, candidates: &[Coord2], count: CellCount) -> Vec<Coord2> {
        let mut placed: Vec<Coord2> = Vec::with_capacity(self.mines.len());
        for &pos in &self.mines {
            if candidates.contains(&pos) && !placed.contains(&pos) {
                placed.push(pos);
            } else {
                log::warn!("Preset mine at {:?} is not a candidate, skipped", pos);
            }
        }

        if placed.len() != usize::from(count) {
            log::debug!(
                "Preset layout has {} mines, configuration asked for {}",
                placed.len(),
                count
            );
        }
        placed
    }
}
