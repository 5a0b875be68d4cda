use core::time::Duration;
use serde::{Deserialize, Serialize};

use crate::*;

/// Counters for one difficulty.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub started: u32,
    pub won: u32,
    pub lost: u32,
    /// Fastest win, the leaderboard score.
    pub best_time: Option<Duration>,
}

impl Record {
    pub const fn finished(&self) -> u32 {
        self.won + self.lost
    }

    /// Percentage of finished games that were won, rounded to two decimals.
    pub fn win_rate(&self) -> Option<f64> {
        let finished = self.finished();
        if finished == 0 {
            return None;
        }
        let rate = f64::from(self.won) * 100.0 / f64::from(finished);
        Some((rate * 100.0).round() / 100.0)
    }

    fn merge(mut self, other: &Record) -> Self {
        self.started += other.started;
        self.won += other.won;
        self.lost += other.lost;
        self.best_time = match (self.best_time, other.best_time) {
            (Some(a), Some(b)) => Some(a.min(b)),
            (a, b) => a.or(b),
        };
        self
    }
}

/// Games started, won and lost per difficulty.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStats {
    records: Vec<(Difficulty, Record)>,
}

impl GameStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&self, difficulty: Difficulty) -> Record {
        self.records
            .iter()
            .find(|(entry, _)| *entry == difficulty)
            .map(|(_, record)| *record)
            .unwrap_or_default()
    }

    /// Counters summed over every difficulty.
    pub fn total(&self) -> Record {
        self.records
            .iter()
            .fold(Record::default(), |total, (_, record)| total.merge(record))
    }

    pub fn difficulties(&self) -> impl Iterator<Item = Difficulty> + '_ {
        self.records.iter().map(|(difficulty, _)| *difficulty)
    }

    pub fn reset(&mut self) {
        log::debug!("Statistics reset");
        self.records.clear();
    }

    fn record_mut(&mut self, difficulty: Difficulty) -> &mut Record {
        let index = match self
            .records
            .iter()
            .position(|(entry, _)| *entry == difficulty)
        {
            Some(index) => index,
            None => {
                self.records.push((difficulty, Record::default()));
                self.records.len() - 1
            }
        };
        &mut self.records[index].1
    }
}

impl GameObserver for GameStats {
    fn game_started(&mut self, difficulty: Difficulty) {
        self.record_mut(difficulty).started += 1;
    }

    fn game_won(&mut self, difficulty: Difficulty, elapsed: Duration) {
        let record = self.record_mut(difficulty);
        record.won += 1;
        if record.best_time.is_none_or(|best| elapsed < best) {
            log::debug!("New best time on {}: {:?}", difficulty, elapsed);
            record.best_time = Some(elapsed);
        }
    }

    fn game_lost(&mut self, difficulty: Difficulty) {
        self.record_mut(difficulty).lost += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_per_difficulty() {
        let mut stats = GameStats::new();
        stats.game_started(Difficulty::Easy);
        stats.game_won(Difficulty::Easy, Duration::from_secs(40));
        stats.game_started(Difficulty::Easy);
        stats.game_lost(Difficulty::Easy);
        stats.game_started(Difficulty::Hard);

        let easy = stats.record(Difficulty::Easy);
        assert_eq!((easy.started, easy.won, easy.lost), (2, 1, 1));
        assert_eq!(easy.finished(), 2);
        assert_eq!(stats.record(Difficulty::Hard).finished(), 0);
        assert_eq!(stats.record(Difficulty::Insane), Record::default());
    }

    #[test]
    fn win_rate_is_rounded_and_unknown_without_games() {
        let mut record = Record::default();
        assert_eq!(record.win_rate(), None);

        record.won = 1;
        record.lost = 2;
        assert_eq!(record.win_rate(), Some(33.33));
    }

    #[test]
    fn keeps_fastest_win() {
        let mut stats = GameStats::new();
        stats.game_won(Difficulty::Medium, Duration::from_secs(90));
        stats.game_won(Difficulty::Medium, Duration::from_secs(75));
        stats.game_won(Difficulty::Medium, Duration::from_secs(120));

        assert_eq!(
            stats.record(Difficulty::Medium).best_time,
            Some(Duration::from_secs(75))
        );
    }

    #[test]
    fn totals_cover_all_difficulties() {
        let mut stats = GameStats::new();
        stats.game_started(Difficulty::Easy);
        stats.game_won(Difficulty::Easy, Duration::from_secs(30));
        stats.game_started(Difficulty::Medium);
        stats.game_won(Difficulty::Medium, Duration::from_secs(20));
        stats.game_started(Difficulty::Medium);
        stats.game_lost(Difficulty::Medium);

        let total = stats.total();
        assert_eq!((total.started, total.won, total.lost), (3, 2, 1));
        assert_eq!(total.best_time, Some(Duration::from_secs(20)));

        stats.reset();
        assert_eq!(stats.total(), Record::default());
        assert_eq!(stats.difficulties().count(), 0);
    }

    #[test]
    fn serializes_for_host_persistence() {
        let mut stats = GameStats::new();
        stats.game_started(Difficulty::Custom(GameConfig::new_unchecked((10, 10), 12)));

        let json = serde_json::to_string(&stats).unwrap();
        let restored: GameStats = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, stats);
    }
}
