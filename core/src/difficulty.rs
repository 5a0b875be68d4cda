use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::*;

/// Named board preset, or a custom configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Insane,
    Custom(GameConfig),
}

impl Difficulty {
    /// Named tiers, easiest first.
    pub const TIERS: [Difficulty; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Insane];

    pub const fn config(self) -> GameConfig {
        match self {
            Self::Easy => GameConfig::new_unchecked((8, 8), 10),
            Self::Medium => GameConfig::new_unchecked((12, 12), 30),
            Self::Hard => GameConfig::new_unchecked((16, 16), 50),
            Self::Insane => GameConfig::new_unchecked((20, 20), 100),
            Self::Custom(config) => config,
        }
    }

    /// Whether playing this tier needs the full version of the game.
    pub const fn requires_full_version(self) -> bool {
        matches!(self, Self::Hard | Self::Insane)
    }

    pub const fn is_available(self, full_version: bool) -> bool {
        full_version || !self.requires_full_version()
    }

    pub fn available_tiers(full_version: bool) -> impl Iterator<Item = Difficulty> {
        Self::TIERS
            .into_iter()
            .filter(move |tier| tier.is_available(full_version))
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Insane => "insane",
            Self::Custom(_) => "custom",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::Easy
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(config) => write!(
                f,
                "{}x{}:{}",
                config.size.0, config.size.1, config.mines
            ),
            tier => f.write_str(tier.name()),
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown difficulty {0:?}, expected a tier name or WIDTHxHEIGHT:MINES")]
pub struct ParseDifficultyError(String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        let lowered = s.trim().to_ascii_lowercase();
        if let Some(tier) = Self::TIERS.into_iter().find(|tier| tier.name() == lowered) {
            return Ok(tier);
        }

        let parse_custom = || -> Option<GameConfig> {
            let (size, mines) = lowered.split_once(':')?;
            let (width, height) = size.split_once('x')?;
            Some(GameConfig::new_unchecked(
                (width.parse().ok()?, height.parse().ok()?),
                mines.parse().ok()?,
            ))
        };

        parse_custom()
            .map(Self::Custom)
            .ok_or_else(|| ParseDifficultyError(s.to_owned()))
    }
}
