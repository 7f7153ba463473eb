//! Piece values: stack height and color
//!
//! A piece is a stack of 0, 1 or 2 rings: height 0 is the empty cell,
//! height 1 an ordinary piece, height 2 a Gipf piece. Height doubles as
//! the reserve weight: playing a Gipf costs two reserve pieces and
//! removing one returns (or captures) two.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Piece color. `None` marks the empty cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceColor {
    White,
    Black,
    None,
}

impl PieceColor {
    pub fn opponent(self) -> PieceColor {
        match self {
            PieceColor::White => PieceColor::Black,
            PieceColor::Black => PieceColor::White,
            PieceColor::None => PieceColor::None,
        }
    }

    /// Index into per-color counters. Panics for `None`, which owns no
    /// reserve.
    pub fn index(self) -> usize {
        match self {
            PieceColor::White => 0,
            PieceColor::Black => 1,
            PieceColor::None => panic!("PieceColor::None has no counter index"),
        }
    }
}

impl fmt::Display for PieceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PieceColor::White => write!(f, "White"),
            PieceColor::Black => write!(f, "Black"),
            PieceColor::None => write!(f, "None"),
        }
    }
}

/// Immutable piece value
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    height: u8,
    color: PieceColor,
}

impl Piece {
    pub const EMPTY: Piece = Piece {
        height: 0,
        color: PieceColor::None,
    };

    pub const fn single(color: PieceColor) -> Piece {
        Piece { height: 1, color }
    }

    pub const fn gipf(color: PieceColor) -> Piece {
        Piece { height: 2, color }
    }

    /// The piece the mover puts into play this turn.
    pub fn for_move(color: PieceColor, is_gipf: bool) -> Piece {
        if is_gipf {
            Piece::gipf(color)
        } else {
            Piece::single(color)
        }
    }

    pub const fn height(&self) -> u8 {
        self.height
    }

    pub const fn color(&self) -> PieceColor {
        self.color
    }

    pub fn is_empty(&self) -> bool {
        self.height == 0
    }

    pub fn is_gipf(&self) -> bool {
        self.height == 2
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::EMPTY
    }
}
