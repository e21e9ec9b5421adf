use std::io::{BufRead, Write};
use std::ops::ControlFlow;

use anyhow::Result;
use sweeper_core::{Board, Coord2, GameError, RevealOutcome};

use crate::command::{self, Command};
use crate::display::Framed;

const MOVE_PROMPT: &str =
    "Enter the coordinates for where you'd like to dig, or enter 'F' before the coordinates to add a flag: ";
const CONFIRM_PROMPT: &str = "This spot is marked with a flag. Are you sure you want to dig here? (y/n): ";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Ending {
    Won,
    Lost,
    /// Input ran out before the game ended.
    Quit,
}

/// Runs the prompt loop until the board is won or lost, or `input` is exhausted.
pub fn play<R: BufRead, W: Write>(board: &mut Board, mut input: R, mut out: W) -> Result<Ending> {
    loop {
        if board.is_won() || board.is_lost() {
            write!(out, "{}", Framed(board))?;
            return Ok(if board.is_won() {
                writeln!(out, "Congratulations! You won!")?;
                Ending::Won
            } else {
                writeln!(out, "Sorry, you hit a bomb. Game over!")?;
                Ending::Lost
            });
        }

        write!(out, "{}", Framed(board))?;
        write!(out, "{MOVE_PROMPT}")?;
        out.flush()?;

        let Some(line) = read_line(&mut input)? else {
            return Ok(Ending::Quit);
        };

        let command = match command::parse(&line, board.size()) {
            Ok(command) => command,
            Err(err) => {
                writeln!(out, "{err}")?;
                continue;
            }
        };
        log::debug!("command: {:?}", command);

        let step = match command {
            Command::Flag(coords) => flag(board, coords, &mut out)?,
            Command::Dig(coords) => dig(board, coords, &mut input, &mut out)?,
        };
        if let ControlFlow::Break(ending) = step {
            return Ok(ending);
        }
    }
}

fn flag<W: Write>(board: &mut Board, coords: Coord2, out: &mut W) -> Result<ControlFlow<Ending>> {
    match board.flag(coords) {
        Ok(_) => {}
        Err(GameError::AlreadyRevealed) => {
            writeln!(out, "Cannot add flag to location that has already been dug.")?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(ControlFlow::Continue(()))
}

fn dig<R: BufRead, W: Write>(
    board: &mut Board,
    coords: Coord2,
    input: &mut R,
    out: &mut W,
) -> Result<ControlFlow<Ending>> {
    match board.reveal(coords, false) {
        Ok(RevealOutcome::Declined) => {
            write!(out, "{CONFIRM_PROMPT}")?;
            out.flush()?;

            let Some(answer) = read_line(input)? else {
                return Ok(ControlFlow::Break(Ending::Quit));
            };
            match answer.trim().to_lowercase().as_str() {
                "y" => {
                    board.reveal(coords, true)?;
                }
                "n" => {}
                _ => writeln!(out, "Invalid input. Please enter 'y' or 'n'.")?,
            }
        }
        Ok(_) => {}
        Err(GameError::AlreadyRevealed) => {
            writeln!(out, "Location has already been dug. Please try again.")?;
        }
        Err(err) => return Err(err.into()),
    }
    Ok(ControlFlow::Continue(()))
}

fn read_line<R: BufRead>(input: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        Ok(None)
    } else {
        Ok(Some(line))
    }
}
