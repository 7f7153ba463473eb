//! Fixed radius-4 cell graph: 37 interior cells and 24 wall sentinels
//!
//! The topology never changes after construction, so it is built once into
//! a process-wide `Lattice` and shared by every `Board`. Cells are an arena
//! indexed by `CellId`; each cell carries a fixed-size neighbor table
//! indexed by direction. Boards store only per-cell piece state.

use crate::hex::{Direction, Hex, BOARD_RADIUS, DIRECTIONS};
use crate::notation::parse_coordinate;
use rustc_hash::FxHashMap;
use std::sync::OnceLock;

/// Index into the lattice cell arena
pub type CellId = usize;

/// One cell of the lattice: its coordinate, wall flag and neighbor table
#[derive(Debug)]
struct CellNode {
    hex: Hex,
    is_wall: bool,
    neighbors: [Option<CellId>; 6],
}

/// The complete board graph plus its fixed traversal constants
#[derive(Debug)]
pub struct Lattice {
    cells: Vec<CellNode>,
    by_hex: FxHashMap<Hex, CellId>,
    /// The 21 straight interior lines (7 per axis), as (start cell, walk
    /// direction). Each line runs from its start to the far wall.
    line_starts: Vec<(CellId, Direction)>,
    /// The 24 boundary walls in ring order, starting at a1.
    wall_ring: Vec<CellId>,
}

/// The shared board topology.
pub fn lattice() -> &'static Lattice {
    static LATTICE: OnceLock<Lattice> = OnceLock::new();
    LATTICE.get_or_init(Lattice::build)
}

/// Callbacks for a walk over the lattice, statically dispatched. The
/// drivers call `visit_cell` on interior cells, `visit_wall` on walls,
/// and bracket the whole walk with `pre_process`/`post_process`.
pub trait LatticeVisitor {
    fn pre_process(&mut self) {}
    fn visit_cell(&mut self, id: CellId);
    fn visit_wall(&mut self, id: CellId);
    fn post_process(&mut self) {}
}

/// Start cells and directions of the 21 fixed board lines. Geometric
/// constants of the radius-4 lattice, not derived at runtime.
const LINE_STARTS: [(&str, Direction); 21] = [
    ("e2", Direction::TopRight),
    ("d2", Direction::TopRight),
    ("c2", Direction::TopRight),
    ("b2", Direction::TopRight),
    ("b3", Direction::TopRight),
    ("b4", Direction::TopRight),
    ("b5", Direction::TopRight),
    ("e8", Direction::BottomRight),
    ("d7", Direction::BottomRight),
    ("c6", Direction::BottomRight),
    ("b5", Direction::BottomRight),
    ("b4", Direction::BottomRight),
    ("b3", Direction::BottomRight),
    ("b2", Direction::BottomRight),
    ("b2", Direction::Top),
    ("c2", Direction::Top),
    ("d2", Direction::Top),
    ("e2", Direction::Top),
    ("f2", Direction::Top),
    ("g2", Direction::Top),
    ("h2", Direction::Top),
];

/// Corner walls of the boundary ring and the direction the ring turns to
/// at each of them.
const RING_CORNERS: [(&str, Direction); 6] = [
    ("a1", Direction::BottomRight),
    ("e1", Direction::TopRight),
    ("i1", Direction::Top),
    ("i5", Direction::TopLeft),
    ("e9", Direction::BottomLeft),
    ("a5", Direction::Bottom),
];

impl Lattice {
    fn build() -> Lattice {
        let mut cells = Vec::new();
        let mut by_hex = FxHashMap::default();

        // All hexes within the radius-4 range; distance >= 4 is a wall.
        let center = Hex::new(0, 0);
        for row in -BOARD_RADIUS..=BOARD_RADIUS {
            let min_col = (-BOARD_RADIUS).max(-row - BOARD_RADIUS);
            let max_col = BOARD_RADIUS.min(-row + BOARD_RADIUS);
            for col in min_col..=max_col {
                let hex = Hex::new(col, row);
                let id = cells.len();
                cells.push(CellNode {
                    hex,
                    is_wall: Hex::distance(center, hex) >= BOARD_RADIUS,
                    neighbors: [None; 6],
                });
                by_hex.insert(hex, id);
            }
        }

        // Link neighbors. Iterating every cell in every direction writes
        // both sides of each link.
        for id in 0..cells.len() {
            let hex = cells[id].hex;
            for dir in DIRECTIONS {
                if let Some(&neighbor) = by_hex.get(&(hex + dir.unit())) {
                    cells[id].neighbors[dir.index()] = Some(neighbor);
                }
            }
        }

        let coord = |s: &str| -> CellId {
            let hex = parse_coordinate(s).expect("fixed lattice coordinate");
            by_hex[&hex]
        };

        let line_starts = LINE_STARTS
            .iter()
            .map(|&(start, dir)| (coord(start), dir))
            .collect();

        // Walk the boundary ring from a1, turning at each corner wall.
        let corners: FxHashMap<CellId, Direction> = RING_CORNERS
            .iter()
            .map(|&(c, dir)| (coord(c), dir))
            .collect();
        let start = coord("a1");
        let mut wall_ring = vec![start];
        let mut dir = corners[&start];
        let mut current = start;
        loop {
            current = cells[current].neighbors[dir.index()]
                .expect("boundary ring left the lattice");
            if let Some(&turn) = corners.get(&current) {
                dir = turn;
            }
            if current == start {
                break;
            }
            wall_ring.push(current);
        }

        Lattice {
            cells,
            by_hex,
            line_starts,
            wall_ring,
        }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn hex(&self, id: CellId) -> Hex {
        self.cells[id].hex
    }

    pub fn is_wall(&self, id: CellId) -> bool {
        self.cells[id].is_wall
    }

    pub fn neighbor(&self, id: CellId, direction: Direction) -> Option<CellId> {
        self.cells[id].neighbors[direction.index()]
    }

    pub fn id_of(&self, hex: Hex) -> Option<CellId> {
        self.by_hex.get(&hex).copied()
    }

    /// All interior (non-wall) cells.
    pub fn interior(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cells.len()).filter(|&id| !self.cells[id].is_wall)
    }

    /// All wall cells, in arena order.
    pub fn walls(&self) -> impl Iterator<Item = CellId> + '_ {
        (0..self.cells.len()).filter(|&id| self.cells[id].is_wall)
    }

    /// The 24 walls in boundary-ring order, starting at a1.
    pub fn wall_ring(&self) -> &[CellId] {
        &self.wall_ring
    }

    pub fn line_starts(&self) -> &[(CellId, Direction)] {
        &self.line_starts
    }

    /// Walks all 21 lines cell by cell. Each line's interior cells are
    /// visited in order, then the wall closing the line.
    pub fn traverse_lines<V: LatticeVisitor>(&self, visitor: &mut V) {
        visitor.pre_process();
        for &(start, dir) in &self.line_starts {
            let mut id = start;
            while !self.is_wall(id) {
                visitor.visit_cell(id);
                id = self.neighbor(id, dir).expect("line walk left the lattice");
            }
            visitor.visit_wall(id);
        }
        visitor.post_process();
    }

    /// Walks the 24 boundary walls in ring order.
    pub fn traverse_ring<V: LatticeVisitor>(&self, visitor: &mut V) {
        visitor.pre_process();
        for &id in &self.wall_ring {
            visitor.visit_wall(id);
        }
        visitor.post_process();
    }
}
