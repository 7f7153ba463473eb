//! Run detection over the 21 board lines
//!
//! A run is a maximal stretch of same-colored cells along one line. Runs
//! of four or more earn removals; each one is widened into an extended
//! run by absorbing contiguous occupied cells off both ends, regardless
//! of their color. The analysis also counts pieces in play per color and
//! kind and records cells shared by more than one extended run.

use crate::hex::Hex;
use crate::lattice::{lattice, CellId, LatticeVisitor};
use crate::moves::RemoveMovePart;
use crate::pieces::{Piece, PieceColor};
use rustc_hash::FxHashSet;

/// A stretch of cells along one line. For extended runs the core cells
/// come first, so the run's color is the core color even when absorbed
/// cells differ.
#[derive(Clone, Debug)]
pub struct CellRun {
    members: Vec<(Hex, Piece)>,
    all_gipf: bool,
}

impl CellRun {
    fn new(members: Vec<(Hex, Piece)>) -> CellRun {
        let all_gipf = members.iter().all(|(_, p)| p.is_gipf());
        CellRun { members, all_gipf }
    }

    pub fn color(&self) -> PieceColor {
        self.members[0].1.color()
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[(Hex, Piece)] {
        &self.members
    }

    pub fn hexes(&self) -> impl Iterator<Item = Hex> + '_ {
        self.members.iter().map(|&(h, _)| h)
    }

    pub fn contains(&self, hex: Hex) -> bool {
        self.members.iter().any(|&(h, _)| h == hex)
    }

    /// True when every member is a Gipf piece. Clearing such a run is
    /// never mandatory.
    pub fn all_gipf(&self) -> bool {
        self.all_gipf
    }

    /// Every legal way to clear this run. Ordinary pieces always come
    /// off; each Gipf piece independently may stay, so a run with `g`
    /// Gipf members yields `2^g` options.
    pub fn remove_options(&self) -> Vec<RemoveMovePart> {
        if self.len() < 4 || self.color() == PieceColor::None {
            return Vec::new();
        }

        let basis: Vec<Hex> = self
            .members
            .iter()
            .filter(|(_, p)| !p.is_gipf())
            .map(|&(h, _)| h)
            .collect();
        let mut options = vec![basis];
        for &(hex, _) in self.members.iter().filter(|(_, p)| p.is_gipf()) {
            for i in 0..options.len() {
                let mut widened = options[i].clone();
                widened.push(hex);
                options.push(widened);
            }
        }
        options.into_iter().map(RemoveMovePart::new).collect()
    }
}

/// Line visitor accumulating maximal same-color runs. A color change
/// closes the current run; the wall at the end of each line flushes the
/// run still open there.
struct RunScan<'a> {
    pieces: &'a [Piece],
    current: Vec<CellId>,
    raw_runs: Vec<Vec<CellId>>,
}

impl LatticeVisitor for RunScan<'_> {
    fn visit_cell(&mut self, id: CellId) {
        let piece = self.pieces[id];
        match self.current.last() {
            Some(&last) if self.pieces[last].color() == piece.color() => self.current.push(id),
            None => self.current.push(id),
            Some(_) => {
                self.raw_runs
                    .push(std::mem::replace(&mut self.current, vec![id]));
            }
        }
    }

    fn visit_wall(&mut self, _id: CellId) {
        if !self.current.is_empty() {
            self.raw_runs.push(std::mem::take(&mut self.current));
        }
    }
}

/// One pass of run detection over a board's piece array.
#[derive(Clone, Debug)]
pub struct RunAnalysis {
    runs: Vec<CellRun>,
    extended_runs: Vec<CellRun>,
    intersections: Vec<Hex>,
    /// In-play counts indexed by `color.index() * 2 + is_gipf`.
    counts: [u32; 4],
}

impl RunAnalysis {
    /// Scans all 21 lines of `pieces`, indexed by `CellId`.
    pub fn analyze(pieces: &[Piece]) -> RunAnalysis {
        let lat = lattice();
        let mut scan = RunScan {
            pieces,
            current: Vec::new(),
            raw_runs: Vec::new(),
        };
        lat.traverse_lines(&mut scan);
        let raw_runs = scan.raw_runs;

        let mut counts = [0u32; 4];
        for id in lat.interior() {
            let piece = pieces[id];
            if !piece.is_empty() {
                counts[piece.color().index() * 2 + usize::from(piece.is_gipf())] += 1;
            }
        }

        let mut extended_runs = Vec::new();
        for run in raw_runs
            .iter()
            .filter(|r| r.len() >= 4 && pieces[r[0]].color() != PieceColor::None)
        {
            let first = lat.hex(run[0]);
            let last = lat.hex(run[run.len() - 1]);
            let forward = crate::hex::Direction::between(first, last);
            let backward = forward.opposite();

            let mut ids = run.clone();
            let mut cur = lat.neighbor(run[0], backward);
            while let Some(id) = cur {
                if lat.is_wall(id) || pieces[id].is_empty() {
                    break;
                }
                ids.push(id);
                cur = lat.neighbor(id, backward);
            }
            let mut cur = lat.neighbor(run[run.len() - 1], forward);
            while let Some(id) = cur {
                if lat.is_wall(id) || pieces[id].is_empty() {
                    break;
                }
                ids.push(id);
                cur = lat.neighbor(id, forward);
            }
            extended_runs.push(CellRun::new(
                ids.iter().map(|&id| (lat.hex(id), pieces[id])).collect(),
            ));
        }

        let mut seen = FxHashSet::default();
        let mut intersections = Vec::new();
        for run in &extended_runs {
            for hex in run.hexes() {
                if !seen.insert(hex) {
                    intersections.push(hex);
                }
            }
        }

        let runs = raw_runs
            .into_iter()
            .map(|ids| CellRun::new(ids.iter().map(|&id| (lat.hex(id), pieces[id])).collect()))
            .collect();

        RunAnalysis {
            runs,
            extended_runs,
            intersections,
            counts,
        }
    }

    /// All maximal runs, including empty stretches.
    pub fn runs(&self) -> &[CellRun] {
        &self.runs
    }

    /// Core runs of four or more of one color.
    pub fn runs_of_four(&self) -> impl Iterator<Item = &CellRun> {
        self.runs
            .iter()
            .filter(|r| r.len() >= 4 && r.color() != PieceColor::None)
    }

    pub fn extended_runs(&self) -> &[CellRun] {
        &self.extended_runs
    }

    pub fn extended_runs_of(&self, color: PieceColor) -> impl Iterator<Item = &CellRun> {
        self.extended_runs.iter().filter(move |r| r.color() == color)
    }

    /// Cells belonging to more than one extended run.
    pub fn intersections(&self) -> &[Hex] {
        &self.intersections
    }

    pub fn in_extended_run(&self, hex: Hex) -> bool {
        self.extended_runs.iter().any(|r| r.contains(hex))
    }

    pub fn gipf_in_play(&self, color: PieceColor) -> u32 {
        self.counts[color.index() * 2 + 1]
    }

    pub fn singles_in_play(&self, color: PieceColor) -> u32 {
        self.counts[color.index() * 2]
    }
}
