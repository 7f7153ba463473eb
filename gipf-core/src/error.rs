//! Error types for notation parsing and move validation

use crate::hex::{Direction, Hex};
use crate::pieces::PieceColor;
use thiserror::Error;

/// Notation text that does not parse
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("Empty coordinate")]
    EmptyCoordinate,

    #[error("Bad column letter in coordinate: {0}")]
    BadColumn(String),

    #[error("Bad row number in coordinate: {0}")]
    BadRow(String),

    #[error("Bad push segment: {0}")]
    BadPush(String),

    #[error("More than one push segment in move: {0}")]
    MultiplePushes(String),

    #[error("No push segment in move: {0}")]
    NoPush(String),
}

/// Anything that can go wrong playing a notation string
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// A well-formed move that the current position rejects
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This game is over")]
    GameOver,

    #[error("{0} is not allowed to play a Gipf piece")]
    GipfNotAllowed(PieceColor),

    #[error("Opening moves must play Gipf pieces")]
    GipfRequired,

    #[error("No cell at position: {0}")]
    NoSuchCell(Hex),

    #[error("Trying to place on top of an existing piece: {0}")]
    PlaceOnOccupied(Hex),

    #[error("Pushes must start from a wall: {0}")]
    PushFromNonWall(Hex),

    #[error("No single direction from {0} to {1}")]
    NoPushDirection(Hex, Hex),

    #[error("Cannot push from {0} towards {1:?}: no empty cell in line")]
    CannotPush(Hex, Direction),

    #[error("Trying to remove a piece from an empty cell: {0}")]
    RemoveFromEmpty(Hex),

    #[error("Piece at {0} is not part of an extended run of four")]
    RemovalNotInRun(Hex),

    #[error("Pre-push removal did not clear all extended runs of four")]
    PrePushRunsRemain,

    #[error(
        "Post-push removal did not clear all extended runs of four of current player's color ({0})"
    )]
    PostPushRunsRemain(PieceColor),
}
