//! Position congruence under the board's symmetries
//!
//! Two positions are congruent when some proper rotation (one to five
//! 60-degree steps) or one of the six mirror reflections maps one piece
//! layout exactly onto the other. The identity is deliberately not part
//! of the group: equal positions are the business of
//! `Board::same_position`, congruence asks whether two *different*
//! orientations describe the same game.

use crate::board::Board;
use crate::hex::Hex;
use crate::lattice::lattice;
use crate::pieces::PieceColor;

/// Piece counts per (color, kind), invariant under every symmetry.
fn census(board: &Board) -> [u32; 4] {
    [
        board.singles_in_play(PieceColor::White),
        board.gipf_in_play(PieceColor::White),
        board.singles_in_play(PieceColor::Black),
        board.gipf_in_play(PieceColor::Black),
    ]
}

fn matches_under(a: &Board, b: &Board, transform: impl Fn(Hex) -> Hex) -> bool {
    let lat = lattice();
    lat.interior().all(|id| {
        let hex = lat.hex(id);
        a.piece_at(hex) == b.piece_at(transform(hex))
    })
}

/// Whether some non-identity rotation or mirror carries `a`'s position
/// onto `b`'s.
pub fn congruent(a: &Board, b: &Board) -> bool {
    if census(a) != census(b) {
        return false;
    }
    for steps in 1..=5 {
        if matches_under(a, b, |hex| hex.rotate_cw_times(steps)) {
            return true;
        }
    }
    for line in 1..=6 {
        if matches_under(a, b, |hex| hex.mirror(line)) {
            return true;
        }
    }
    false
}
