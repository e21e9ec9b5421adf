use thiserror::Error;

use crate::CellCount;

/// Construction parameters that can never produce a playable board.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Board must have at least one cell")]
    EmptyBoard,
    #[error("Too many mines, requested {mines} but a board of {cells} cells needs at least one safe cell")]
    TooManyMines { mines: CellCount, cells: CellCount },
}

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),
    #[error("Coordinates out of bounds")]
    OutOfBounds,
    #[error("Cell is already revealed")]
    AlreadyRevealed,
    #[error("Mine mask must be a non-empty square")]
    InvalidBoardShape,
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

pub type Result<T> = core::result::Result<T, GameError>;
