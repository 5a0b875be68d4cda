use alloc::collections::BTreeSet;
use core::time::Duration;
use ndarray::Array2;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - Fresh -> Active, when mines are placed on the first action
/// - Active -> Won
/// - Active -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GridState {
    Fresh,
    Active,
    Won,
    Lost,
}

impl GridState {
    pub const fn is_fresh(self) -> bool {
        matches!(self, Self::Fresh)
    }

    pub const fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GridState {
    fn default() -> Self {
        Self::Fresh
    }
}

/// Pending step of a reveal cascade.
#[derive(Copy, Clone, Debug)]
enum Visit {
    /// Reveal the cell, or chord it if it is already revealed.
    Reveal(Coord2),
    /// Reveal the cell only if it is still neither revealed nor marked.
    Uncovered(Coord2),
}

/// One game: the board, its mines, and the terminal state.
#[derive(Debug)]
pub struct Grid {
    difficulty: Difficulty,
    config: GameConfig,
    cells: Array2<Cell>,
    state: GridState,
    mine_count: CellCount,
    revealed_safe_count: CellCount,
    marked_count: CellCount,
    triggered_mine: Option<Coord2>,
    started_at: Option<Instant>,
    elapsed: Option<Duration>,
    placer: Box<dyn MinePlacer>,
    observer: Box<dyn GameObserver>,
}

impl Grid {
    /// Builds an untouched grid. Mines are placed on the first action.
    pub fn new(difficulty: Difficulty) -> Result<Self> {
        let config = difficulty.config();
        config.validate()?;

        let (width, height) = config.size;
        let cells = Array2::from_shape_fn(
            (usize::from(height), usize::from(width)),
            |(row, column)| Cell::new((column as Coord, row as Coord)),
        );

        Ok(Self {
            difficulty,
            config,
            cells,
            state: Default::default(),
            mine_count: 0,
            revealed_safe_count: 0,
            marked_count: 0,
            triggered_mine: None,
            started_at: None,
            elapsed: None,
            placer: Box::new(RandomPlacer::new()),
            observer: Box::new(NoopObserver),
        })
    }

    pub fn with_placer(mut self, placer: impl MinePlacer + 'static) -> Self {
        self.placer = Box::new(placer);
        self
    }

    pub fn with_observer(mut self, observer: impl GameObserver + 'static) -> Self {
        self.observer = Box::new(observer);
        self
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.size.0
    }

    pub fn height(&self) -> Coord {
        self.config.size.1
    }

    pub fn state(&self) -> GridState {
        self.state
    }

    pub fn mines_placed(&self) -> bool {
        !self.state.is_fresh()
    }

    pub fn is_over(&self) -> bool {
        self.state.is_over()
    }

    pub fn is_won(&self) -> bool {
        matches!(self.state, GridState::Won)
    }

    /// Mines on the board, or the configured count before placement.
    pub fn mine_count(&self) -> CellCount {
        if self.mines_placed() {
            self.mine_count
        } else {
            self.config.mines
        }
    }

    /// Mines not yet accounted for by a mark; negative when over-marked.
    pub fn mines_left(&self) -> isize {
        (self.mine_count() as isize) - (self.marked_count as isize)
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// Winning time, set once on the win transition.
    pub fn elapsed(&self) -> Option<Duration> {
        self.elapsed
    }

    /// Time spent so far while the game is active, the final time once won.
    pub fn running_time(&self) -> Option<Duration> {
        self.started_at
            .map(|started_at| started_at.elapsed())
            .or(self.elapsed)
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        x < self.width() && y < self.height()
    }

    /// Converts signed coordinates, e.g. from a pointer position, into a board position.
    pub fn position(&self, x: i64, y: i64) -> Option<Coord2> {
        let pos = (Coord::try_from(x).ok()?, Coord::try_from(y).ok()?);
        self.contains(pos).then_some(pos)
    }

    /// Row-major index of `pos`: `y * width + x`.
    pub fn index_of(&self, pos: Coord2) -> Option<usize> {
        self.contains(pos)
            .then(|| usize::from(pos.1) * usize::from(self.width()) + usize::from(pos.0))
    }

    pub fn position_of(&self, index: usize) -> Option<Coord2> {
        let width = usize::from(self.width());
        if index >= self.cells.len() {
            return None;
        }
        Some(((index % width) as Coord, (index / width) as Coord))
    }

    pub fn cell(&self, pos: Coord2) -> Option<&Cell> {
        self.contains(pos).then(|| &self.cells[pos.to_nd_index()])
    }

    pub fn cell_at_index(&self, index: usize) -> Option<&Cell> {
        self.position_of(index).and_then(|pos| self.cell(pos))
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// In-bounds cells around `pos`; empty when `pos` is off the board.
    pub fn neighbors_of(&self, pos: Coord2) -> Neighbors {
        if !self.contains(pos) {
            return Neighbors::new();
        }
        NeighborIter::new(pos, self.size()).collect()
    }

    pub fn mine_positions(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.cells
            .iter()
            .filter(|cell| cell.is_mine)
            .map(Cell::pos)
    }

    /// What the player sees at `pos`.
    pub fn view_at(&self, pos: Coord2) -> Option<CellView> {
        self.cell(pos).map(|cell| self.view_of(cell))
    }

    fn view_of(&self, cell: &Cell) -> CellView {
        use CellView::*;

        if cell.is_revealed {
            return if cell.is_mine {
                Exploded
            } else {
                Revealed(cell.adjacent_mines)
            };
        }

        match (self.state, cell.is_mine, cell.is_marked) {
            (GridState::Lost, true, false) => Mine,
            (GridState::Lost, false, true) => WrongMark,
            (GridState::Won, true, _) => Marked,
            (_, _, true) => Marked,
            (_, _, false) => Hidden,
        }
    }

    /// Places the mines, keeping `first` and its neighbors clear.
    ///
    /// Runs at most once per grid; later calls do nothing.
    pub fn place_mines(&mut self, first: Option<Coord2>) -> Result<()> {
        if let Some(pos) = first {
            self.validate_coords(pos)?;
        }

        if self.mines_placed() {
            log::debug!("Mines already placed, ignoring placement request");
            return Ok(());
        }

        let excluded: Neighbors = first
            .into_iter()
            .flat_map(|pos| core::iter::once(pos).chain(NeighborIter::new(pos, self.size())))
            .collect();
        let candidates: Vec<Coord2> = self
            .cells
            .iter()
            .map(Cell::pos)
            .filter(|pos| !excluded.contains(pos))
            .collect();

        for pos in self.placer.place(&candidates, self.config.mines) {
            if self.contains(pos) {
                self.set_mine(pos);
            }
        }

        if self.mine_count != self.config.mines {
            log::warn!(
                "Placed mine count mismatch, actual: {}, requested: {}",
                self.mine_count,
                self.config.mines
            );
        }

        let now = Instant::now();
        self.started_at = Some(now);
        self.state = GridState::Active;
        log::debug!(
            "Placed {} mines on a {}x{} board, first action at {:?}",
            self.mine_count,
            self.width(),
            self.height(),
            first
        );
        self.observer.game_started(self.difficulty);
        Ok(())
    }

    fn set_mine(&mut self, pos: Coord2) {
        let cell = &mut self.cells[pos.to_nd_index()];
        if cell.is_mine {
            return;
        }
        cell.is_mine = true;
        self.mine_count += 1;

        for neighbor in NeighborIter::new(pos, self.size()) {
            self.cells[neighbor.to_nd_index()].adjacent_mines += 1;
        }
    }

    /// Reveals `pos`, flooding blank regions, or chords it when already revealed.
    pub fn reveal(&mut self, pos: Coord2) -> Result<Changes<RevealOutcome>> {
        self.validate_coords(pos)?;

        if self.is_over() {
            return Ok(self.no_changes(RevealOutcome::NoChange));
        }

        if !self.mines_placed() {
            self.place_mines(Some(pos))?;
        }

        let mut changed = BTreeSet::new();
        let mut to_visit = vec![Visit::Reveal(pos)];

        while let Some(visit) = to_visit.pop() {
            if self.is_over() {
                break;
            }

            let coords = match visit {
                Visit::Reveal(coords) => coords,
                Visit::Uncovered(coords) => {
                    let cell = &self.cells[coords.to_nd_index()];
                    if cell.is_revealed || cell.is_marked {
                        continue;
                    }
                    coords
                }
            };

            let cell = self.cells[coords.to_nd_index()];
            if cell.is_marked {
                continue;
            }

            if cell.is_revealed {
                // chord: trust the player's marks
                if self.count_marked_neighbors(coords) == cell.adjacent_mines {
                    self.push_neighbors(&mut to_visit, coords, Visit::Uncovered);
                }
                continue;
            }

            self.cells[coords.to_nd_index()].is_revealed = true;
            changed.insert(coords);
            if !cell.is_mine {
                self.revealed_safe_count += 1;
            }
            log::trace!(
                "Revealed {:?}, adjacent mines: {}",
                coords,
                cell.adjacent_mines
            );

            if self.is_cleared() {
                self.end_game(true, &mut changed);
            } else if cell.is_mine {
                self.triggered_mine = Some(coords);
                self.end_game(false, &mut changed);
            } else if cell.adjacent_mines == 0 {
                self.push_neighbors(&mut to_visit, coords, Visit::Reveal);
            }
        }

        let outcome = match self.state {
            GridState::Won if !changed.is_empty() => RevealOutcome::Won,
            GridState::Lost if !changed.is_empty() => RevealOutcome::HitMine,
            _ if changed.is_empty() => RevealOutcome::NoChange,
            _ => RevealOutcome::Revealed,
        };

        Ok(Changes {
            cells: changed,
            outcome,
            state: self.state,
        })
    }

    /// Flips the mark on a hidden cell, or marks every hidden neighbor of a
    /// revealed cell whose count proves they are all mines.
    pub fn toggle_mark(&mut self, pos: Coord2) -> Result<Changes<MarkOutcome>> {
        self.validate_coords(pos)?;

        if self.is_over() {
            return Ok(self.no_changes(MarkOutcome::NoChange));
        }

        if !self.mines_placed() {
            self.place_mines(Some(pos))?;
        }

        let mut changed = BTreeSet::new();
        let cell = self.cells[pos.to_nd_index()];

        if !cell.is_revealed {
            self.flip_mark(pos);
            changed.insert(pos);
        } else if self.count_unrevealed_neighbors(pos) == cell.adjacent_mines {
            for neighbor in NeighborIter::new(pos, self.size()) {
                let neighbor_cell = &self.cells[neighbor.to_nd_index()];
                if !neighbor_cell.is_revealed && !neighbor_cell.is_marked {
                    self.flip_mark(neighbor);
                    changed.insert(neighbor);
                }
            }
        }

        let outcome = if changed.is_empty() {
            MarkOutcome::NoChange
        } else {
            MarkOutcome::Changed
        };

        Ok(Changes {
            cells: changed,
            outcome,
            state: self.state,
        })
    }

    /// Every safe cell has been revealed; mines need not be marked.
    pub fn is_cleared(&self) -> bool {
        self.mines_placed()
            && self.revealed_safe_count == self.config.total_cells() - self.mine_count
    }

    fn flip_mark(&mut self, pos: Coord2) {
        let cell = &mut self.cells[pos.to_nd_index()];
        cell.is_marked = !cell.is_marked;
        if cell.is_marked {
            self.marked_count += 1;
        } else {
            self.marked_count -= 1;
        }
    }

    fn push_neighbors(
        &self,
        to_visit: &mut Vec<Visit>,
        coords: Coord2,
        visit: impl Fn(Coord2) -> Visit,
    ) {
        let neighbors: Neighbors = NeighborIter::new(coords, self.size()).collect();
        // reversed so the first neighbor is handled first
        to_visit.extend(neighbors.into_iter().rev().map(visit));
    }

    fn end_game(&mut self, won: bool, changed: &mut BTreeSet<Coord2>) {
        if self.state.is_over() {
            return;
        }

        let started_at = self.started_at.take();
        if won {
            let elapsed = started_at
                .map(|started_at| started_at.elapsed())
                .unwrap_or_default();
            self.elapsed = Some(elapsed);
            self.state = GridState::Won;
            log::debug!("Game won in {:?}", elapsed);
            self.observer.game_won(self.difficulty, elapsed);
        } else {
            self.state = GridState::Lost;
            log::debug!("Game lost on mine at {:?}", self.triggered_mine);
            self.observer.game_lost(self.difficulty);
        }

        // mines and wrong marks become visible once the game is over
        changed.extend(
            self.cells
                .iter()
                .filter(|cell| !cell.is_revealed && cell.is_mine != cell.is_marked)
                .map(Cell::pos),
        );
    }

    fn count_marked_neighbors(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords, self.size())
            .filter(|&pos| self.cells[pos.to_nd_index()].is_marked)
            .count() as u8
    }

    fn count_unrevealed_neighbors(&self, coords: Coord2) -> u8 {
        NeighborIter::new(coords, self.size())
            .filter(|&pos| !self.cells[pos.to_nd_index()].is_revealed)
            .count() as u8
    }

    fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if self.contains(coords) {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }

    fn no_changes<O>(&self, outcome: O) -> Changes<O> {
        Changes {
            cells: BTreeSet::new(),
            outcome,
            state: self.state,
        }
    }
}
