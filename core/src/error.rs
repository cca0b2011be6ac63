use thiserror::Error;

use crate::Coord2;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Coordinates {0:?} are outside the board")]
    OutOfBounds(Coord2),
    #[error(transparent)]
    InvalidOperation(#[from] InvalidOperation),
    #[error("Too many mines: {mines} requested but only {free} cells are free")]
    GenerationPrecondition { mines: u32, free: u32 },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(&'static str),
    #[error("Game already ended, no new moves are accepted")]
    AlreadyEnded,
}

/// Moves that are well-formed but not allowed in the current state of a cell or game.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum InvalidOperation {
    #[error("Cannot reveal flagged cell {0:?}")]
    RevealFlagged(Coord2),
    #[error("Cannot flag revealed cell {0:?}")]
    FlagRevealed(Coord2),
    #[error("Cannot place flags before the first reveal")]
    NotStarted,
}

pub type Result<T> = core::result::Result<T, GameError>;
