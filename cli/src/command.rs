use sweeper_core::{Coord, Coord2};
use thiserror::Error;

/// A move typed by the player, already checked against the board size.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Dig(Coord2),
    Flag(Coord2),
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("Invalid location. Please enter the row and column separated by a comma (e.g. 3,4).")]
    InvalidDig,
    #[error("Invalid flag location. Please try again.")]
    InvalidFlag,
}

/// Parses `row,col` to dig or `f row,col` to toggle a flag, ignoring case and whitespace.
pub fn parse(input: &str, size: Coord) -> Result<Command, CommandError> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect();

    match normalized.strip_prefix('f') {
        Some(coords) => parse_coords(coords, size)
            .map(Command::Flag)
            .ok_or(CommandError::InvalidFlag),
        None => parse_coords(&normalized, size)
            .map(Command::Dig)
            .ok_or(CommandError::InvalidDig),
    }
}

fn parse_coords(input: &str, size: Coord) -> Option<Coord2> {
    let (row, col) = input.split_once(',')?;
    let row: Coord = row.parse().ok()?;
    let col: Coord = col.parse().ok()?;
    (row < size && col < size).then_some((row, col))
}
