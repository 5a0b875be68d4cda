use std::collections::BTreeSet;
use std::fmt;
use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use minegrid_core::*;
use tracing_subscriber::filter::LevelFilter;

use command::{Command, HELP};

mod command;

/// Terminal front-end for the minegrid engine
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Tier name (easy, medium, hard, insane) or WIDTHxHEIGHT:MINES
    #[arg(short, long, default_value = "easy")]
    difficulty: Difficulty,

    /// Seed for reproducible mine layouts
    #[arg(short, long)]
    seed: Option<u64>,

    /// Unlock the hard and insane tiers
    #[arg(long)]
    full_version: bool,

    #[command(flatten)]
    verbose: Verbosity,
}

fn init_logging(verbose: &Verbosity) {
    let level = match verbose.log_level_filter() {
        log::LevelFilter::Off => LevelFilter::OFF,
        log::LevelFilter::Error => LevelFilter::ERROR,
        log::LevelFilter::Warn => LevelFilter::WARN,
        log::LevelFilter::Info => LevelFilter::INFO,
        log::LevelFilter::Debug => LevelFilter::DEBUG,
        log::LevelFilter::Trace => LevelFilter::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(io::stderr)
        .init();
}

fn symbol(view: CellView) -> char {
    match view {
        CellView::Hidden => '#',
        CellView::Marked => 'F',
        CellView::Revealed(0) => '.',
        CellView::Revealed(count) => char::from(b'0' + count),
        CellView::Mine => '*',
        CellView::Exploded => 'X',
        CellView::WrongMark => '!',
    }
}

/// Text view of a grid: column ruler, one line per row, then the counters.
struct Board<'a>(&'a Grid);

impl fmt::Display for Board<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let grid = self.0;

        f.write_str("   ")?;
        for x in 0..grid.width() {
            write!(f, "{}", x % 10)?;
        }
        writeln!(f)?;

        for y in 0..grid.height() {
            write!(f, "{y:>2} ")?;
            for x in 0..grid.width() {
                write!(f, "{}", grid.view_at((x, y)).map_or(' ', symbol))?;
            }
            writeln!(f)?;
        }

        write!(f, "mines left: {}", grid.mines_left())?;
        if let Some(time) = grid.running_time() {
            write!(f, "  time: {:.1}s", time.as_secs_f64())?;
        }
        Ok(())
    }
}

fn changed_cells(cells: &BTreeSet<Coord2>) -> String {
    cells
        .iter()
        .map(|(x, y)| format!("{x},{y}"))
        .collect::<Vec<_>>()
        .join(" ")
}

fn report_state(out: &mut impl Write, grid: &Grid) -> io::Result<()> {
    match grid.state() {
        GridState::Won => writeln!(
            out,
            "Cleared in {:.2}s!",
            grid.elapsed().unwrap_or_default().as_secs_f64()
        ),
        GridState::Lost => writeln!(out, "Boom. Type `new` to play again."),
        _ => Ok(()),
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.verbose);

    let mut session = Session::new(args.difficulty, args.full_version)?;
    if let Some(seed) = args.seed {
        session = session.with_seed(seed)?;
    }

    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    writeln!(out, "{} game, type `help` for commands", session.difficulty())?;
    writeln!(out, "{}", Board(session.grid()))?;

    for line in stdin.lock().lines() {
        let line = line.context("reading command")?;
        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };

        match command {
            Command::Reveal(pos) | Command::Mark(pos) => {
                let grid = session.grid_mut();
                let result = match command {
                    Command::Reveal(_) => grid
                        .reveal(pos)
                        .map(|changes| (changes.outcome.has_update(), changes.cells)),
                    _ => grid
                        .toggle_mark(pos)
                        .map(|changes| (changes.outcome.has_update(), changes.cells)),
                };
                match result {
                    Ok((true, cells)) => {
                        log::info!("{} cells changed", cells.len());
                        writeln!(out, "changed: {}", changed_cells(&cells))?;
                        writeln!(out, "{}", Board(session.grid()))?;
                        report_state(&mut out, session.grid())?;
                    }
                    Ok((false, _)) => writeln!(out, "nothing changed")?,
                    Err(err) => writeln!(out, "{err}")?,
                }
            }
            Command::NewGame => match session.new_game() {
                Ok(()) => writeln!(out, "{}", Board(session.grid()))?,
                Err(err) => writeln!(out, "{err}")?,
            },
            Command::Difficulty(difficulty) => match session.set_difficulty(difficulty) {
                Ok(_) => {
                    writeln!(out, "{} game", session.difficulty())?;
                    writeln!(out, "{}", Board(session.grid()))?;
                }
                Err(err) => writeln!(out, "{difficulty}: {err}")?,
            },
            Command::Print => writeln!(out, "{}", Board(session.grid()))?,
            Command::Stats => {
                let stats = session.stats();
                for difficulty in stats.difficulties() {
                    let record = stats.record(difficulty);
                    let rate = record
                        .win_rate()
                        .map_or_else(|| "unknown".to_owned(), |rate| format!("{rate}%"));
                    writeln!(
                        out,
                        "{difficulty}: {} won, {} lost, {} started, win rate {rate}",
                        record.won, record.lost, record.started
                    )?;
                }
            }
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Quit => break,
        }
    }

    let stats = serde_json::to_string_pretty(&session.stats()).context("encoding statistics")?;
    writeln!(out, "{stats}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_board_is_hidden() {
        let grid = Grid::new(Difficulty::Easy).unwrap();
        let board = Board(&grid).to_string();
        let lines: Vec<&str> = board.lines().collect();

        assert_eq!(lines.len(), 10);
        assert_eq!(lines[0], "   01234567");
        assert_eq!(lines[1], " 0 ########");
        assert_eq!(lines[9], "mines left: 10");
    }

    #[test]
    fn changed_cells_are_listed_in_order() {
        let cells = BTreeSet::from([(3, 0), (0, 2), (0, 1)]);
        assert_eq!(changed_cells(&cells), "0,1 0,2 3,0");
    }
}
