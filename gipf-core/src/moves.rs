//! Moves and removal lists
//!
//! A move is up to three phases: removals owed from the previous turn,
//! the push (or placement) itself, and removals earned by the push. The
//! removal phases are lists of [`RemoveMovePart`], one per cleared run.
//!
//! Equality is positional: two moves are equal when they remove the same
//! set of pieces and make the same push, regardless of notation text,
//! removal order or how removals are grouped into parts. Pushes are only
//! comparable once canonicalized against a board, which collapses the
//! many notations for a placement into one (`Board::canonicalize_move`).

use crate::error::ParseError;
use crate::hex::{Direction, Hex};
use crate::notation;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::{Hash, Hasher};

/// The pieces of one cleared run that come off the board together.
/// Hexes are kept sorted so part values are canonical; the axis they
/// lie on is derived at construction. Equality and hashing compare the
/// hexes as a set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RemoveMovePart {
    hexes: Vec<Hex>,
    direction: Direction,
}

impl RemoveMovePart {
    pub fn new(mut hexes: Vec<Hex>) -> RemoveMovePart {
        hexes.sort();
        let direction = match hexes.as_slice() {
            [first, second, ..] => {
                let axis = Direction::between(*first, *second);
                if axis != Direction::Center && Hex::axis_aligned_all(&hexes, axis) {
                    axis
                } else {
                    Direction::Center
                }
            }
            _ => Direction::Center,
        };
        RemoveMovePart { hexes, direction }
    }

    pub fn hexes(&self) -> &[Hex] {
        &self.hexes
    }

    /// The board axis the hexes lie on; `Center` for a single hex or a
    /// list off any one line.
    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn len(&self) -> usize {
        self.hexes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hexes.is_empty()
    }
}

impl PartialEq for RemoveMovePart {
    fn eq(&self, other: &RemoveMovePart) -> bool {
        self.hexes == other.hexes
    }
}

impl Eq for RemoveMovePart {}

impl Hash for RemoveMovePart {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.hexes.hash(state);
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Move {
    from: Option<Hex>,
    to: Hex,
    is_gipf: bool,
    remove_before: Vec<RemoveMovePart>,
    remove_after: Vec<RemoveMovePart>,
    /// Original notation text, when the move came from a parser.
    notation: Option<String>,
}

impl Move {
    /// A placement on an empty interior cell.
    pub fn placement(to: Hex, is_gipf: bool) -> Move {
        Move::new(None, to, Vec::new(), Vec::new(), is_gipf)
    }

    /// A push from the wall `from` towards `to`.
    pub fn push(from: Hex, to: Hex, is_gipf: bool) -> Move {
        Move::new(Some(from), to, Vec::new(), Vec::new(), is_gipf)
    }

    pub fn new(
        from: Option<Hex>,
        to: Hex,
        remove_before: Vec<RemoveMovePart>,
        remove_after: Vec<RemoveMovePart>,
        is_gipf: bool,
    ) -> Move {
        Move {
            from,
            to,
            is_gipf,
            remove_before,
            remove_after,
            notation: None,
        }
    }

    pub(crate) fn parsed(
        from: Option<Hex>,
        to: Hex,
        remove_before: Vec<RemoveMovePart>,
        remove_after: Vec<RemoveMovePart>,
        is_gipf: bool,
        notation: &str,
    ) -> Move {
        Move {
            from,
            to,
            is_gipf,
            remove_before,
            remove_after,
            notation: Some(notation.to_string()),
        }
    }

    pub fn from_notation(text: &str) -> Result<Move, ParseError> {
        notation::parse_move(text)
    }

    pub fn from(&self) -> Option<Hex> {
        self.from
    }

    pub fn to(&self) -> Hex {
        self.to
    }

    pub fn is_gipf(&self) -> bool {
        self.is_gipf
    }

    pub fn is_placement(&self) -> bool {
        self.from.is_none()
    }

    pub fn remove_before(&self) -> &[RemoveMovePart] {
        &self.remove_before
    }

    pub fn remove_after(&self) -> &[RemoveMovePart] {
        &self.remove_after
    }

    /// All hexes removed before the push, across parts.
    pub fn removed_before(&self) -> impl Iterator<Item = Hex> + '_ {
        self.remove_before.iter().flat_map(|p| p.hexes().iter().copied())
    }

    /// All hexes removed after the push, across parts.
    pub fn removed_after(&self) -> impl Iterator<Item = Hex> + '_ {
        self.remove_after.iter().flat_map(|p| p.hexes().iter().copied())
    }

    pub fn notation(&self) -> Option<&str> {
        self.notation.as_deref()
    }

    /// The same move with its push segment rewritten, keeping removals
    /// and the original notation text.
    pub(crate) fn with_push(&self, from: Option<Hex>, to: Hex) -> Move {
        Move {
            from,
            to,
            ..self.clone()
        }
    }

    fn sorted_removals(parts: &[RemoveMovePart]) -> Vec<Hex> {
        let mut hexes: Vec<Hex> = parts
            .iter()
            .flat_map(|p| p.hexes().iter().copied())
            .collect();
        hexes.sort();
        hexes
    }
}

impl PartialEq for Move {
    fn eq(&self, other: &Move) -> bool {
        self.from == other.from
            && self.to == other.to
            && self.is_gipf == other.is_gipf
            && Move::sorted_removals(&self.remove_before)
                == Move::sorted_removals(&other.remove_before)
            && Move::sorted_removals(&self.remove_after)
                == Move::sorted_removals(&other.remove_after)
    }
}

impl Eq for Move {}

impl Hash for Move {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
        self.is_gipf.hash(state);
        Move::sorted_removals(&self.remove_before).hash(state);
        Move::sorted_removals(&self.remove_after).hash(state);
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut segments = Vec::new();
        for part in &self.remove_before {
            segments.push(format_remove_part(part));
        }
        let gipf = if self.is_gipf { "G" } else { "" };
        segments.push(match self.from {
            Some(from) => format!(
                "{gipf}{}-{}",
                notation::format_coordinate(from),
                notation::format_coordinate(self.to)
            ),
            None => format!("{gipf}{}", notation::format_coordinate(self.to)),
        });
        for part in &self.remove_after {
            segments.push(format_remove_part(part));
        }
        write!(f, "{}", segments.join(";"))
    }
}

fn format_remove_part(part: &RemoveMovePart) -> String {
    let coords: Vec<String> = part
        .hexes()
        .iter()
        .map(|&h| notation::format_coordinate(h))
        .collect();
    format!("x{}", coords.join(","))
}
