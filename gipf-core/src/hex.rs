//! Hex board geometry with axial/cube coordinates
//!
//! Flat-topped hexes, axial `(column, row)` storage with the cube view
//! derived as `x = column`, `z = row`, `y = -x - z`.
//! ref: http://www.redblobgames.com/grids/hexagons/

use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Div, Sub};

/// Board radius (distance from center to the wall ring)
pub const BOARD_RADIUS: i8 = 4;

/// Axial hex coordinates
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Hex {
    pub col: i8,
    pub row: i8,
}

impl Hex {
    pub const fn new(col: i8, row: i8) -> Self {
        Self { col, row }
    }

    /// Build from cube coordinates. Panics if `x + y + z != 0`; a broken
    /// cube triple is an engine bug, not a recoverable condition.
    pub fn from_cube(x: i8, y: i8, z: i8) -> Self {
        assert!(x + y + z == 0, "bad hex cube coordinates: {}, {}, {}", x, y, z);
        Self { col: x, row: z }
    }

    pub const fn x(&self) -> i8 {
        self.col
    }

    pub const fn y(&self) -> i8 {
        -self.col - self.row
    }

    pub const fn z(&self) -> i8 {
        self.row
    }

    /// Chebyshev distance between two hexes (max abs cube delta)
    pub fn distance(a: Hex, b: Hex) -> i8 {
        let dx = (a.x() - b.x()).abs();
        let dy = (a.y() - b.y()).abs();
        let dz = (a.z() - b.z()).abs();
        dx.max(dy).max(dz)
    }

    /// Unit vector from one hex toward another. Only meaningful when the
    /// hexes are axis-aligned; otherwise integer truncation yields a vector
    /// that matches no compass direction.
    pub fn direction_hex(from: Hex, to: Hex) -> Hex {
        (to - from) / Hex::distance(from, to)
    }

    pub fn contains_zero_coordinate(hex: Hex) -> bool {
        hex.x() == 0 || hex.y() == 0 || hex.z() == 0
    }

    /// Two hexes lie on a common board axis iff their difference has a zero
    /// cube coordinate.
    pub fn axis_aligned(a: Hex, b: Hex) -> bool {
        Hex::contains_zero_coordinate(a - b)
    }

    /// Every hex in the slice lies on one line along the given axis: the
    /// cube coordinate that is zero in the axis unit vector must be shared.
    pub fn axis_aligned_all(hexes: &[Hex], direction: Direction) -> bool {
        let unit = direction.unit();
        let Some(first) = hexes.first() else {
            return true;
        };
        if unit.x() == 0 {
            hexes.iter().all(|h| h.x() == first.x())
        } else if unit.y() == 0 {
            hexes.iter().all(|h| h.y() == first.y())
        } else {
            hexes.iter().all(|h| h.z() == first.z())
        }
    }

    /// Sort hexes along an axis, increasing in the direction of travel.
    pub fn sort_on_axis(hexes: &[Hex], direction: Direction) -> Vec<Hex> {
        let mut sorted = hexes.to_vec();
        sorted.sort_by_key(|h| direction.sort_key(*h));
        sorted
    }

    /// Adjacent along the axis of `direction`, in either orientation.
    pub fn contiguous_pair(a: Hex, b: Hex, direction: Direction) -> bool {
        let unit = direction.unit();
        b == a + unit || a == b + unit
    }

    /// Once sorted along the axis, every consecutive pair is exactly one
    /// step apart.
    pub fn contiguous(hexes: &[Hex], direction: Direction) -> bool {
        let unit = direction.unit();
        let sorted = Hex::sort_on_axis(hexes, direction);
        sorted.windows(2).all(|w| w[1] - w[0] == unit)
    }

    /// Rotate 60 degrees clockwise about the board center.
    pub fn rotate_cw(self) -> Hex {
        Hex::from_cube(-self.z(), -self.x(), -self.y())
    }

    pub fn rotate_cw_times(self, times: u8) -> Hex {
        let mut hex = self;
        for _ in 0..times {
            hex = hex.rotate_cw();
        }
        hex
    }

    /// Rotate 60 degrees counterclockwise about the board center.
    pub fn rotate_ccw(self) -> Hex {
        Hex::from_cube(-self.y(), -self.z(), -self.x())
    }

    /// Reflect across one of the six mirror lines through the board center.
    /// Lines 1..=6 alternate between corner-to-corner and edge-to-edge axes.
    pub fn mirror(self, line: u8) -> Hex {
        let (x, y, z) = (self.x(), self.y(), self.z());
        match line {
            1 => Hex::from_cube(-x, -z, -y),
            2 => Hex::from_cube(y, x, z),
            3 => Hex::from_cube(-z, -y, -x),
            4 => Hex::from_cube(x, z, y),
            5 => Hex::from_cube(-y, -x, -z),
            6 => Hex::from_cube(z, y, x),
            _ => panic!("bad mirror line: {}", line),
        }
    }
}

impl Add for Hex {
    type Output = Hex;
    fn add(self, other: Hex) -> Hex {
        Hex::new(self.col + other.col, self.row + other.row)
    }
}

impl Sub for Hex {
    type Output = Hex;
    fn sub(self, other: Hex) -> Hex {
        Hex::new(self.col - other.col, self.row - other.row)
    }
}

impl Div<i8> for Hex {
    type Output = Hex;
    fn div(self, scalar: i8) -> Hex {
        Hex::new(self.col / scalar, self.row / scalar)
    }
}

impl fmt::Display for Hex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.col, self.row)
    }
}

/// Compass direction on the flat-topped lattice, plus `Center` for
/// "no direction" (identical or unaligned hexes).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Center,
    Top,
    TopRight,
    BottomRight,
    Bottom,
    BottomLeft,
    TopLeft,
}

/// The six compass directions, in clockwise order starting from Top.
pub const DIRECTIONS: [Direction; 6] = [
    Direction::Top,
    Direction::TopRight,
    Direction::BottomRight,
    Direction::Bottom,
    Direction::BottomLeft,
    Direction::TopLeft,
];

impl Direction {
    /// Unit hex vector in (column, row) form. `Center` maps to the zero
    /// vector.
    pub const fn unit(self) -> Hex {
        match self {
            Direction::Center => Hex::new(0, 0),
            Direction::Top => Hex::new(0, -1),
            Direction::TopRight => Hex::new(1, -1),
            Direction::BottomRight => Hex::new(1, 0),
            Direction::Bottom => Hex::new(0, 1),
            Direction::BottomLeft => Hex::new(-1, 1),
            Direction::TopLeft => Hex::new(-1, 0),
        }
    }

    pub const fn opposite(self) -> Direction {
        match self {
            Direction::Center => Direction::Center,
            Direction::Top => Direction::Bottom,
            Direction::TopRight => Direction::BottomLeft,
            Direction::BottomRight => Direction::TopLeft,
            Direction::Bottom => Direction::Top,
            Direction::BottomLeft => Direction::TopRight,
            Direction::TopLeft => Direction::BottomRight,
        }
    }

    /// One 60-degree rotation step clockwise.
    pub const fn rotated_cw(self) -> Direction {
        match self {
            Direction::Center => Direction::Center,
            Direction::Top => Direction::TopRight,
            Direction::TopRight => Direction::BottomRight,
            Direction::BottomRight => Direction::Bottom,
            Direction::Bottom => Direction::BottomLeft,
            Direction::BottomLeft => Direction::TopLeft,
            Direction::TopLeft => Direction::Top,
        }
    }

    /// Index into per-cell neighbor tables. Panics on `Center`, which never
    /// names a neighbor slot.
    pub fn index(self) -> usize {
        match self {
            Direction::Top => 0,
            Direction::TopRight => 1,
            Direction::BottomRight => 2,
            Direction::Bottom => 3,
            Direction::BottomLeft => 4,
            Direction::TopLeft => 5,
            Direction::Center => panic!("Center direction has no neighbor index"),
        }
    }

    /// Match a unit vector back to its compass direction; `Center` if no
    /// exact match.
    pub fn from_unit(hex: Hex) -> Direction {
        DIRECTIONS
            .into_iter()
            .find(|d| d.unit() == hex)
            .unwrap_or(Direction::Center)
    }

    /// Best compass direction from one hex to another. `Center` for
    /// identical or unaligned hexes; truncating division can fake a unit
    /// vector for some unaligned pairs, so alignment is checked first.
    pub fn between(from: Hex, to: Hex) -> Direction {
        if from == to || !Hex::axis_aligned(from, to) {
            return Direction::Center;
        }
        Direction::from_unit(Hex::direction_hex(from, to))
    }

    /// Scalar key ordering hexes along this direction's axis.
    pub fn sort_key(self, hex: Hex) -> i16 {
        let unit = self.unit();
        hex.x() as i16 * unit.x() as i16
            + hex.y() as i16 * unit.y() as i16
            + hex.z() as i16 * unit.z() as i16
    }
}
