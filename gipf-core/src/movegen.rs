//! Legal move enumeration
//!
//! Moves are generated by simulation: for every way of clearing the runs
//! owed at the start of the turn, every wall entry point is probed with
//! every piece kind the player may play, and every way of clearing the
//! runs the push creates becomes one move. Pushes whose first cell is
//! empty are emitted in placement form, so the same entry reached from
//! different walls deduplicates to a single move.

use crate::analysis::CellRun;
use crate::board::{Board, GameResult};
use crate::hex::{Direction, Hex, DIRECTIONS};
use crate::lattice::{lattice, CellId, LatticeVisitor};
use crate::moves::{Move, RemoveMovePart};
use crate::pieces::Piece;
use rustc_hash::FxHashSet;

/// Ring visitor collecting every wall entry point: the wall, a push
/// direction, and the first interior cell on that line.
struct EntryPoints {
    entries: Vec<(CellId, Direction, CellId)>,
}

impl LatticeVisitor for EntryPoints {
    fn visit_cell(&mut self, _id: CellId) {}

    fn visit_wall(&mut self, id: CellId) {
        let lat = lattice();
        for direction in DIRECTIONS {
            if let Some(first) = lat.neighbor(id, direction) {
                if !lat.is_wall(first) {
                    self.entries.push((id, direction, first));
                }
            }
        }
    }
}

/// Cross product of the removal options of `runs`. Runs crossing at a
/// shared cell clear together: an option touching a cell already claimed
/// by an earlier part merges with that part, so the shared cell comes
/// off exactly once. Empty options (an all-Gipf run left standing) are
/// dropped from the result lists. With no runs at all this is a single
/// empty list.
pub(crate) fn remove_list_combinations<'a>(
    runs: impl Iterator<Item = &'a CellRun>,
) -> Vec<Vec<RemoveMovePart>> {
    let mut lists: Vec<Vec<RemoveMovePart>> = vec![Vec::new()];
    for run in runs {
        let options = run.remove_options();
        if options.is_empty() {
            continue;
        }
        let mut widened = Vec::new();
        for list in &lists {
            for option in &options {
                let mut next = Vec::new();
                let mut merged = option.hexes().to_vec();
                for part in list {
                    if part.hexes().iter().any(|h| merged.contains(h)) {
                        for &hex in part.hexes() {
                            if !merged.contains(&hex) {
                                merged.push(hex);
                            }
                        }
                    } else {
                        next.push(part.clone());
                    }
                }
                next.push(RemoveMovePart::new(merged));
                widened.push(next);
            }
        }
        lists = widened;
    }
    for list in &mut lists {
        list.retain(|part| !part.is_empty());
    }
    // merging can collapse distinct option choices onto the same cells
    let mut seen = FxHashSet::default();
    lists.retain(|list| {
        let mut flat: Vec<Hex> = list.iter().flat_map(|p| p.hexes().iter().copied()).collect();
        flat.sort();
        seen.insert(flat)
    });
    lists
}

/// All legal moves for the player to move, canonical and deduplicated,
/// in wall-ring order per pre-push removal choice.
pub(crate) fn generate_moves(board: &Board) -> Vec<Move> {
    if board.result() != GameResult::Incomplete {
        return Vec::new();
    }
    let lat = lattice();
    let color = board.to_play();
    let kinds: &[bool] = if board.forced_gipf_opening() {
        &[true]
    } else if board.can_play_gipf(color) {
        &[false, true]
    } else {
        &[false]
    };

    let mut ring = EntryPoints {
        entries: Vec::new(),
    };
    lat.traverse_ring(&mut ring);

    let pre_lists = board.all_possible_remove_lists();
    let mut moves = Vec::new();
    let mut seen: FxHashSet<Move> = FxHashSet::default();

    for pre in pre_lists.iter() {
        let mut base = board.clone();
        base.clear_cells(pre);

        for &(wall, direction, first) in &ring.entries {
            if !base.can_push_id(wall, direction) {
                continue;
            }
            let (from, to) = if base.piece_at_id(first).is_empty() {
                (None, lat.hex(first))
            } else {
                (Some(lat.hex(wall)), lat.hex(first))
            };

            for &is_gipf in kinds {
                let mut probe = base.clone();
                probe.push_piece(wall, direction, Piece::for_move(color, is_gipf));
                let analysis = probe.analysis();
                for post in remove_list_combinations(analysis.extended_runs_of(color)) {
                    let mv = Move::new(from, to, pre.clone(), post, is_gipf);
                    if seen.insert(mv.clone()) {
                        moves.push(mv);
                    }
                }
            }
        }
    }

    tracing::debug!(count = moves.len(), player = %color, "generated moves");
    moves
}
