//! Standard game notation
//!
//! Coordinates name cells with a column letter `a` to `i` (left to right)
//! and a row number counted from the bottom of that column. Column `e` is
//! the center column; columns to its right are shorter at the bottom,
//! which is why the row conversion depends on the sign of the column.
//!
//! A move is semicolon-separated segments. Segments starting with `x` are
//! removal lists (comma-separated coordinates); exactly one segment is the
//! push, written `e2` for a placement or `d1-e2` for a push from a wall.
//! A leading `G` on the push marks a Gipf piece. A `G` prefix or `*`
//! suffix on any coordinate is decoration and is ignored.

use crate::error::ParseError;
use crate::hex::Hex;
use crate::moves::{Move, RemoveMovePart};

/// Parses a single coordinate like `e8`, `Gc4` or `b3*`.
pub fn parse_coordinate(text: &str) -> Result<Hex, ParseError> {
    let body = text.trim();
    let body = body.strip_prefix('G').unwrap_or(body);
    let body = body.strip_suffix('*').unwrap_or(body);

    let mut chars = body.chars();
    let col_ch = chars.next().ok_or(ParseError::EmptyCoordinate)?;
    if !('a'..='i').contains(&col_ch) {
        return Err(ParseError::BadColumn(text.trim().to_string()));
    }
    let col = col_ch as i8 - 'e' as i8;

    let row_ch = chars
        .next()
        .ok_or_else(|| ParseError::BadRow(text.trim().to_string()))?;
    if chars.next().is_some() || !('1'..='9').contains(&row_ch) {
        return Err(ParseError::BadRow(text.trim().to_string()));
    }
    let row_label = row_ch as i8 - '0' as i8;

    // Row labels count up the column from the board's bottom edge, which
    // slants with the column on the right-hand side.
    let row = if col <= 0 {
        5 - row_label
    } else {
        5 - (row_label + col)
    };
    Ok(Hex::new(col, row))
}

/// Formats a cell coordinate, inverse of [`parse_coordinate`].
pub fn format_coordinate(hex: Hex) -> String {
    let col_ch = (b'e' as i8 + hex.col) as u8 as char;
    let row_label = if hex.col <= 0 {
        5 - hex.row
    } else {
        5 - (hex.row + hex.col)
    };
    format!("{col_ch}{row_label}")
}

/// Parses a full move. The original text is retained on the move.
pub fn parse_move(text: &str) -> Result<Move, ParseError> {
    let mut remove_before = Vec::new();
    let mut remove_after = Vec::new();
    let mut push: Option<(Option<Hex>, Hex, bool)> = None;

    for segment in text.split(';') {
        let segment = segment.trim();
        if let Some(list) = segment.strip_prefix('x') {
            let hexes = list
                .split(',')
                .map(parse_coordinate)
                .collect::<Result<Vec<_>, _>>()?;
            let part = RemoveMovePart::new(hexes);
            if push.is_some() {
                remove_after.push(part);
            } else {
                remove_before.push(part);
            }
        } else {
            if push.is_some() {
                return Err(ParseError::MultiplePushes(text.to_string()));
            }
            push = Some(parse_push(segment)?);
        }
    }

    let (from, to, is_gipf) = push.ok_or_else(|| ParseError::NoPush(text.to_string()))?;
    Ok(Move::parsed(
        from,
        to,
        remove_before,
        remove_after,
        is_gipf,
        text,
    ))
}

/// Parses the push segment: `to`, `from-to`, optionally `G`-prefixed.
fn parse_push(segment: &str) -> Result<(Option<Hex>, Hex, bool), ParseError> {
    if segment.is_empty() {
        return Err(ParseError::BadPush(segment.to_string()));
    }
    let is_gipf = segment.starts_with('G');
    let body = segment.strip_prefix('G').unwrap_or(segment);

    let mut coords = body.split('-');
    let first = coords
        .next()
        .ok_or_else(|| ParseError::BadPush(segment.to_string()))?;
    let second = coords.next();
    if coords.next().is_some() {
        return Err(ParseError::BadPush(segment.to_string()));
    }

    let first = parse_coordinate(first)?;
    match second {
        Some(second) => Ok((Some(first), parse_coordinate(second)?, is_gipf)),
        None => Ok((None, first, is_gipf)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_coordinate_to_hex() {
        assert_eq!(parse_coordinate("e5").unwrap(), Hex::new(0, 0));
        assert_eq!(parse_coordinate("a1").unwrap(), Hex::new(-4, 4));
        assert_eq!(parse_coordinate("i1").unwrap(), Hex::new(4, 0));
        assert_eq!(parse_coordinate("e9").unwrap(), Hex::new(0, -4));
        assert_eq!(parse_coordinate("c5").unwrap(), Hex::new(-2, 0));
    }

    #[test]
    fn test_hex_to_coordinate() {
        assert_eq!(format_coordinate(Hex::new(0, 0)), "e5");
        assert_eq!(format_coordinate(Hex::new(-4, 4)), "a1");
        assert_eq!(format_coordinate(Hex::new(4, 0)), "i1");
        assert_eq!(format_coordinate(Hex::new(0, -4)), "e9");
        assert_eq!(format_coordinate(Hex::new(-2, 0)), "c5");
    }

    #[test]
    fn test_coordinate_decorations() {
        assert_eq!(parse_coordinate("Gc4").unwrap(), parse_coordinate("c4").unwrap());
        assert_eq!(parse_coordinate("c6*").unwrap(), parse_coordinate("c6").unwrap());
        assert_eq!(parse_coordinate("Gc4*").unwrap(), parse_coordinate("c4").unwrap());
    }

    #[test]
    fn test_bad_coordinates() {
        assert!(matches!(parse_coordinate(""), Err(ParseError::EmptyCoordinate)));
        assert!(matches!(parse_coordinate("j3"), Err(ParseError::BadColumn(_))));
        assert!(matches!(parse_coordinate("e0"), Err(ParseError::BadRow(_))));
        assert!(matches!(parse_coordinate("e10"), Err(ParseError::BadRow(_))));
    }

    #[test]
    fn test_parse_placement() {
        let mv = parse_move("Ge8").unwrap();
        assert!(mv.is_gipf());
        assert!(mv.is_placement());
        assert_eq!(mv.to(), Hex::new(0, -3));

        let mv = parse_move("e2").unwrap();
        assert!(!mv.is_gipf());
        assert!(mv.is_placement());
        assert_eq!(mv.to(), Hex::new(0, 3));

        let mv = parse_move("c6").unwrap();
        assert_eq!(mv.to(), Hex::new(-2, -1));

        let mv = parse_move("Gb5").unwrap();
        assert!(mv.is_gipf());
        assert_eq!(mv.to(), Hex::new(-3, 0));
    }

    #[test]
    fn test_parse_push_from_to() {
        let mv = parse_move("Gd8-f7").unwrap();
        assert!(mv.is_gipf());
        assert_eq!(mv.from(), Some(Hex::new(-1, -3)));
        assert_eq!(mv.to(), Hex::new(1, -3));

        let mv = parse_move("b6-f5").unwrap();
        assert!(!mv.is_gipf());
        assert_eq!(mv.from(), Some(Hex::new(-3, -1)));
        assert_eq!(mv.to(), Hex::new(1, -1));

        let mv = parse_move("a3-e7").unwrap();
        assert_eq!(mv.from(), Some(Hex::new(-4, 2)));
        assert_eq!(mv.to(), Hex::new(0, -2));

        let mv = parse_move("Ge9-e6").unwrap();
        assert!(mv.is_gipf());
        assert_eq!(mv.from(), Some(Hex::new(0, -4)));
        assert_eq!(mv.to(), Hex::new(0, -1));
    }

    #[test]
    fn test_parse_push_then_capture() {
        let mv = parse_move("h6-c4;xc6*,d6,f5,g4").unwrap();
        assert!(!mv.is_gipf());
        assert_eq!(mv.from(), Some(Hex::new(3, -4)));
        assert_eq!(mv.to(), Hex::new(-2, 1));
        assert_eq!(mv.removed_before().count(), 0);
        assert_eq!(mv.removed_after().count(), 4);

        let mv = parse_move("a5-g3;xb3*,c4*,d5,g6").unwrap();
        assert_eq!(mv.from(), Some(Hex::new(-4, 0)));
        assert_eq!(mv.to(), Hex::new(2, 0));
        assert_eq!(mv.removed_after().count(), 4);
    }

    #[test]
    fn test_parse_capture_then_push() {
        let mv = parse_move("xe7,e8;c7-e7").unwrap();
        assert_eq!(mv.from(), Some(Hex::new(-2, -2)));
        assert_eq!(mv.to(), Hex::new(0, -2));
        assert_eq!(mv.removed_before().count(), 2);
        assert_eq!(mv.removed_after().count(), 0);

        let mv = parse_move("xd7*,e7,f6,h4;a5-f4").unwrap();
        assert_eq!(mv.from(), Some(Hex::new(-4, 0)));
        assert_eq!(mv.to(), Hex::new(1, 0));
        assert_eq!(mv.removed_before().count(), 4);
    }

    #[test]
    fn test_parse_capture_push_capture() {
        let mv = parse_move("xe3,e2,e6;h1-b4;xe4,b4,f3,g2,Gd4,Gc4").unwrap();
        assert!(!mv.is_gipf());
        assert_eq!(mv.from(), Some(Hex::new(3, 1)));
        assert_eq!(mv.to(), Hex::new(-3, 1));
        assert_eq!(mv.removed_before().count(), 3);
        assert_eq!(mv.removed_after().count(), 6);
    }

    #[test]
    fn test_bad_moves() {
        assert!(matches!(
            parse_move("e2;e3"),
            Err(ParseError::MultiplePushes(_))
        ));
        assert!(matches!(
            parse_move("xe7,e8"),
            Err(ParseError::NoPush(_))
        ));
        assert!(matches!(
            parse_move("d1-e2-f2"),
            Err(ParseError::BadPush(_))
        ));
    }
}
