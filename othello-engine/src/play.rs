//! A line-oriented terminal front end for [`Game`].
//!
//! Reads one command per line: a move in algebraic notation ("D3"), `moves`
//! (or `?`) to list the legal moves, or `quit`. Writes the board after every
//! accepted move and the result once the game is over.

use crate::{Game, GameError, Outcome, Position, Status};
use log::debug;
use std::io::{self, BufRead, Write};

#[derive(Clone, Copy, Debug, Default)]
pub struct PlayOptions {
    /// Print the legal moves before every prompt.
    pub show_hints: bool,
}

/// Play a game reading commands from `input`, until it ends, `quit` is read,
/// or `input` runs out. Returns the game as it stands.
pub fn run<R: BufRead, W: Write>(
    input: R,
    output: &mut W,
    options: PlayOptions,
) -> io::Result<Game> {
    let mut game = Game::new();
    let mut lines = input.lines();

    writeln!(output, "{}", game.board())?;

    while let Status::ToMove(side) = game.status() {
        if options.show_hints {
            writeln!(output, "Legal moves: {}", game.legal_moves())?;
        }
        write!(output, "{} to move: ", side)?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                writeln!(output)?;
                return Ok(game);
            }
        };
        let command = line.trim();

        match command.to_ascii_lowercase().as_str() {
            "" => continue,
            "quit" | "exit" => return Ok(game),
            "moves" | "?" => {
                writeln!(output, "Legal moves: {}", game.legal_moves())?;
                continue;
            }
            _ => {}
        }

        let position: Position = match command.parse() {
            Ok(position) => position,
            Err(err) => {
                debug!("Could not parse {:?}: {}", command, err);
                writeln!(
                    output,
                    "Cannot parse move {:?}. Legal moves: {}",
                    command,
                    game.legal_moves()
                )?;
                continue;
            }
        };

        match game.play(position) {
            Ok(turn) => {
                writeln!(output, "{}", game.board())?;
                let score = game.board().score();
                writeln!(output, "Black {} - White {}", score.black, score.white)?;
                if let Some(skipped) = turn.skipped {
                    writeln!(output, "{} has no legal move and passes.", skipped)?;
                }
            }
            Err(GameError::InvalidMove(err)) => writeln!(output, "Invalid move: {}", err)?,
            Err(err @ GameError::Finished) => writeln!(output, "{}", err)?,
        }
    }

    if let Status::Finished(outcome) = game.status() {
        let score = game.board().score();
        writeln!(output, "Game over. Black {} - White {}", score.black, score.white)?;
        match outcome {
            Outcome::Tie => writeln!(output, "Tie.")?,
            winner => writeln!(output, "Winner: {}.", winner)?,
        }
    }

    Ok(game)
}
