use alloc::rc::Rc;
use core::cell::RefCell;
use core::fmt;
use core::time::Duration;

use crate::*;

/// Receives game lifecycle notifications from a [`Grid`].
///
/// Calls are fire-and-forget; nothing is read back.
pub trait GameObserver: fmt::Debug {
    fn game_started(&mut self, _difficulty: Difficulty) {}

    fn game_won(&mut self, _difficulty: Difficulty, _elapsed: Duration) {}

    fn game_lost(&mut self, _difficulty: Difficulty) {}
}

/// Observer that ignores every event.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct NoopObserver;

impl GameObserver for NoopObserver {}

/// Lets the host keep a handle on an observer the grid reports into.
impl<T: GameObserver + ?Sized> GameObserver for Rc<RefCell<T>> {
    fn game_started(&mut self, difficulty: Difficulty) {
        self.borrow_mut().game_started(difficulty);
    }

    fn game_won(&mut self, difficulty: Difficulty, elapsed: Duration) {
        self.borrow_mut().game_won(difficulty, elapsed);
    }

    fn game_lost(&mut self, difficulty: Difficulty) {
        self.borrow_mut().game_lost(difficulty);
    }
}

/// Event log observer, handy for asserting on what a grid reported.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RecordingObserver {
    pub events: Vec<GameEvent>,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum GameEvent {
    Started(Difficulty),
    Won(Difficulty, Duration),
    Lost(Difficulty),
}

impl GameObserver for RecordingObserver {
    fn game_started(&mut self, difficulty: Difficulty) {
        self.events.push(GameEvent::Started(difficulty));
    }

    fn game_won(&mut self, difficulty: Difficulty, elapsed: Duration) {
        self.events.push(GameEvent::Won(difficulty, elapsed));
    }

    fn game_lost(&mut self, difficulty: Difficulty) {
        self.events.push(GameEvent::Lost(difficulty));
    }
}
