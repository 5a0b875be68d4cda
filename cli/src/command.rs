use minegrid_core::{Coord, Coord2, Difficulty};
use thiserror::Error;

/// One line of player input.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum Command {
    Reveal(Coord2),
    Mark(Coord2),
    NewGame,
    Difficulty(Difficulty),
    Print,
    Stats,
    Help,
    Quit,
}

#[derive(Error, Debug, PartialEq)]
pub enum CommandError {
    #[error("Empty command")]
    Empty,
    #[error("Unknown command {0:?}, type `help` for the list")]
    Unknown(String),
    #[error("Expected two coordinates after {0:?}")]
    MissingCoords(String),
    #[error("Invalid coordinate {0:?}")]
    InvalidCoord(String),
    #[error(transparent)]
    Difficulty(#[from] minegrid_core::ParseDifficultyError),
}

pub const HELP: &str = "\
commands:
  r X Y | reveal X Y    reveal a cell, or chord a revealed number
  m X Y | mark X Y      toggle a mark, or mark around a satisfied number
  n | new               start a new game
  d NAME | difficulty NAME
                        switch difficulty (easy, medium, hard, insane, WxH:M)
  p | print             print the board
  s | stats             print statistics
  h | help              this text
  q | quit              leave";

impl Command {
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();
        let verb = words.next().ok_or(CommandError::Empty)?;

        let mut coords = || -> Result<Coord2, CommandError> {
            let mut next = || -> Result<Coord, CommandError> {
                let word = words
                    .next()
                    .ok_or_else(|| CommandError::MissingCoords(verb.to_owned()))?;
                word.parse()
                    .map_err(|_| CommandError::InvalidCoord(word.to_owned()))
            };
            Ok((next()?, next()?))
        };

        Ok(match verb.to_ascii_lowercase().as_str() {
            "r" | "reveal" => Self::Reveal(coords()?),
            "m" | "mark" => Self::Mark(coords()?),
            "n" | "new" => Self::NewGame,
            "d" | "difficulty" => {
                let name = words.next().unwrap_or_default();
                Self::Difficulty(name.parse()?)
            }
            "p" | "print" => Self::Print,
            "s" | "stats" => Self::Stats,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(verb.to_owned())),
        })
    }
}
