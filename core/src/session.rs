use alloc::rc::Rc;
use core::cell::RefCell;

use crate::*;

/// Keeps the game in progress and the statistics it reports into.
///
/// Starting a new game discards the current grid wholesale.
#[derive(Debug)]
pub struct Session {
    difficulty: Difficulty,
    full_version: bool,
    seed: Option<u64>,
    games_started: u64,
    stats: Rc<RefCell<GameStats>>,
    grid: Grid,
}

impl Session {
    pub fn new(difficulty: Difficulty, full_version: bool) -> Result<Self> {
        Self::with_stats(difficulty, full_version, GameStats::new())
    }

    pub fn with_stats(difficulty: Difficulty, full_version: bool, stats: GameStats) -> Result<Self> {
        let stats = Rc::new(RefCell::new(stats));
        let difficulty = Self::effective_difficulty(difficulty, full_version);
        let grid = Grid::new(difficulty)?.with_observer(Rc::clone(&stats));
        Ok(Self {
            difficulty,
            full_version,
            seed: None,
            games_started: 1,
            stats,
            grid,
        })
    }

    /// Makes every following game reproducible: game `n` uses `seed + n`.
    pub fn with_seed(mut self, seed: u64) -> Result<Self> {
        self.seed = Some(seed);
        self.games_started = 0;
        self.new_game()?;
        Ok(self)
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn full_version(&self) -> bool {
        self.full_version
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn grid_mut(&mut self) -> &mut Grid {
        &mut self.grid
    }

    /// Snapshot of the statistics gathered so far.
    pub fn stats(&self) -> GameStats {
        self.stats.borrow().clone()
    }

    pub fn reset_stats(&mut self) {
        self.stats.borrow_mut().reset();
    }

    /// Replaces the grid with a fresh one at the current difficulty.
    pub fn new_game(&mut self) -> Result<()> {
        self.start(Self::effective_difficulty(self.difficulty, self.full_version))
    }

    /// Switches difficulty; starts a new game only when it actually changes.
    ///
    /// An invalid difficulty leaves the session untouched.
    pub fn set_difficulty(&mut self, difficulty: Difficulty) -> Result<bool> {
        let difficulty = Self::effective_difficulty(difficulty, self.full_version);
        if difficulty == self.difficulty {
            return Ok(false);
        }
        self.start(difficulty)?;
        Ok(true)
    }

    pub fn set_full_version(&mut self, full_version: bool) -> Result<()> {
        self.full_version = full_version;
        if !self.difficulty.is_available(full_version) {
            self.new_game()?;
        }
        Ok(())
    }

    fn start(&mut self, difficulty: Difficulty) -> Result<()> {
        let placer = match self.seed {
            Some(seed) => RandomPlacer::seeded(seed.wrapping_add(self.games_started)),
            None => RandomPlacer::new(),
        };
        let grid = Grid::new(difficulty)?
            .with_placer(placer)
            .with_observer(Rc::clone(&self.stats));

        self.difficulty = difficulty;
        self.grid = grid;
        self.games_started += 1;
        log::debug!("New {} game", difficulty);
        Ok(())
    }

    fn effective_difficulty(difficulty: Difficulty, full_version: bool) -> Difficulty {
        if difficulty.is_available(full_version) {
            difficulty
        } else {
            log::warn!("{} needs the full version, falling back to easy", difficulty);
            Difficulty::Easy
        }
    }
}
