//! Board state and the move state machine
//!
//! A `Board` owns the piece array (indexed by the shared lattice), the
//! reserve and capture counters, whose turn it is and the game result.
//! Moves are validated and applied in one pass; `try_make_move` stages
//! the move on a scratch clone so a rejected move leaves the board
//! untouched.
//!
//! Run analysis and move generation are cached behind a `RefCell` and
//! invalidated together whenever a piece changes. The cache makes the
//! board single-threaded by design; clone it to cross an isolation
//! boundary.

use crate::analysis::RunAnalysis;
use crate::error::ValidationError;
use crate::hex::{Direction, Hex};
use crate::lattice::{lattice, CellId};
use crate::movegen;
use crate::moves::{Move, RemoveMovePart};
use crate::pieces::{Piece, PieceColor};
use serde::{Deserialize, Serialize};
use std::cell::RefCell;
use std::rc::Rc;

/// Which opening rules are in force.
///
/// Standard games start with three Gipf pieces per player already on the
/// corner spots and never allow more. Tournament games start empty; each
/// player places Gipf pieces until their first ordinary piece, which
/// permanently ends their right to play them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameType {
    Standard,
    Tournament,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameResult {
    Incomplete,
    WhiteWin,
    BlackWin,
    Draw,
}

/// Derived state, computed lazily and dropped on any piece mutation.
#[derive(Clone, Debug, Default)]
struct Cache {
    analysis: Option<Rc<RunAnalysis>>,
    remove_lists: Option<Rc<Vec<Vec<RemoveMovePart>>>>,
    moves: Option<Rc<Vec<Move>>>,
}

const STANDARD_WHITE_GIPFS: [&str; 3] = ["e8", "h2", "b2"];
const STANDARD_BLACK_GIPFS: [&str; 3] = ["h5", "e2", "b5"];

const STARTING_RESERVE: i32 = 18;

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Board {
    pieces: Vec<Piece>,
    reserve: [i32; 2],
    captured: [i32; 2],
    to_play: PieceColor,
    result: GameResult,
    turn_number: u32,
    game_type: GameType,
    can_play_gipf: [bool; 2],
    #[serde(skip)]
    last_error: Option<String>,
    #[serde(skip)]
    cache: RefCell<Cache>,
}

impl Board {
    pub fn initial(game_type: GameType) -> Board {
        let lat = lattice();
        let mut board = Board {
            pieces: vec![Piece::EMPTY; lat.len()],
            reserve: [STARTING_RESERVE, STARTING_RESERVE],
            captured: [0, 0],
            to_play: PieceColor::White,
            result: GameResult::Incomplete,
            turn_number: 1,
            game_type,
            can_play_gipf: [game_type == GameType::Tournament; 2],
            last_error: None,
            cache: RefCell::default(),
        };
        if game_type == GameType::Standard {
            board.seed(&STANDARD_WHITE_GIPFS, PieceColor::White);
            board.seed(&STANDARD_BLACK_GIPFS, PieceColor::Black);
        }
        board
    }

    fn seed(&mut self, coords: &[&str], color: PieceColor) {
        let lat = lattice();
        for coord in coords {
            let hex = crate::notation::parse_coordinate(coord).expect("fixed starting coordinate");
            let id = lat.id_of(hex).expect("starting coordinate on the board");
            self.pieces[id] = Piece::gipf(color);
            self.reserve[color.index()] -= 2;
        }
    }

    // === Accessors ===

    pub fn game_type(&self) -> GameType {
        self.game_type
    }

    pub fn to_play(&self) -> PieceColor {
        self.to_play
    }

    pub fn turn_number(&self) -> u32 {
        self.turn_number
    }

    pub fn result(&self) -> GameResult {
        self.result
    }

    pub fn reserve(&self, color: PieceColor) -> i32 {
        self.reserve[color.index()]
    }

    pub fn captured(&self, color: PieceColor) -> i32 {
        self.captured[color.index()]
    }

    pub fn can_play_gipf(&self, color: PieceColor) -> bool {
        self.can_play_gipf[color.index()]
    }

    /// Why the last `try_make_move` failed.
    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The piece at `hex`, or `None` off the board. Walls are always
    /// empty.
    pub fn piece_at(&self, hex: Hex) -> Option<Piece> {
        lattice().id_of(hex).map(|id| self.pieces[id])
    }

    pub(crate) fn piece_at_id(&self, id: CellId) -> Piece {
        self.pieces[id]
    }

    pub fn gipf_in_play(&self, color: PieceColor) -> u32 {
        self.analysis().gipf_in_play(color)
    }

    pub fn singles_in_play(&self, color: PieceColor) -> u32 {
        self.analysis().singles_in_play(color)
    }

    /// Both players still owe Gipf openings in the first two turns of a
    /// Tournament game.
    pub(crate) fn forced_gipf_opening(&self) -> bool {
        self.game_type == GameType::Tournament && self.turn_number <= 2
    }

    /// True when two boards hold the same pieces on the same cells.
    pub fn same_position(&self, other: &Board) -> bool {
        self.pieces == other.pieces
    }

    // === Derived state ===

    /// Run analysis of the current position, cached until a piece moves.
    pub fn analysis(&self) -> Rc<RunAnalysis> {
        if let Some(analysis) = self.cache.borrow().analysis.clone() {
            return analysis;
        }
        let analysis = Rc::new(RunAnalysis::analyze(&self.pieces));
        self.cache.borrow_mut().analysis = Some(analysis.clone());
        analysis
    }

    /// Every way the player to move could clear the extended runs on the
    /// board before pushing. One entry per combination of per-run
    /// options; a single empty entry when nothing needs clearing.
    pub fn all_possible_remove_lists(&self) -> Rc<Vec<Vec<RemoveMovePart>>> {
        if let Some(lists) = self.cache.borrow().remove_lists.clone() {
            return lists;
        }
        let analysis = self.analysis();
        let lists = Rc::new(movegen::remove_list_combinations(
            analysis.extended_runs().iter(),
        ));
        self.cache.borrow_mut().remove_lists = Some(lists.clone());
        lists
    }

    /// All legal moves for the player to move, canonicalized and
    /// deduplicated. Cached until a piece moves.
    pub fn legal_moves(&self) -> Rc<Vec<Move>> {
        if let Some(moves) = self.cache.borrow().moves.clone() {
            return moves;
        }
        let moves = Rc::new(movegen::generate_moves(self));
        self.cache.borrow_mut().moves = Some(moves.clone());
        moves
    }

    fn invalidate(&mut self) {
        *self.cache.get_mut() = Cache::default();
    }

    // === Pushing ===

    /// Whether a push from the wall `from` towards `direction` would
    /// find an empty cell before the far wall.
    pub fn can_push(&self, from: Hex, direction: Direction) -> bool {
        match lattice().id_of(from) {
            Some(id) => self.can_push_id(id, direction),
            None => false,
        }
    }

    pub(crate) fn can_push_id(&self, from: CellId, direction: Direction) -> bool {
        let lat = lattice();
        let mut cur = lat.neighbor(from, direction);
        while let Some(id) = cur {
            if lat.is_wall(id) {
                return false;
            }
            if self.pieces[id].is_empty() {
                return true;
            }
            cur = lat.neighbor(id, direction);
        }
        false
    }

    /// Slides `piece` in from the wall `from`, displacing the chain of
    /// occupied cells until the first empty one. Callers check
    /// `can_push_id` first.
    pub(crate) fn push_piece(&mut self, from: CellId, direction: Direction, piece: Piece) {
        let lat = lattice();
        let mut incoming = piece;
        let mut cur = lat.neighbor(from, direction).expect("push into the lattice");
        loop {
            let displaced = self.pieces[cur];
            self.pieces[cur] = incoming;
            if displaced.is_empty() {
                break;
            }
            incoming = displaced;
            cur = lat.neighbor(cur, direction).expect("push ran into a wall");
        }
        self.invalidate();
    }

    /// Empties the named cells without touching the counters. Move
    /// generation uses this to stage hypothetical removals.
    pub(crate) fn clear_cells(&mut self, parts: &[RemoveMovePart]) {
        let lat = lattice();
        for part in parts {
            for &hex in part.hexes() {
                let id = lat.id_of(hex).expect("removal list names a board cell");
                self.pieces[id] = Piece::EMPTY;
            }
        }
        self.invalidate();
    }

    // === Moves ===

    /// Rewrites a move's push segment into canonical form: a push whose
    /// first cell is empty becomes a placement on that cell, any other
    /// push targets the cell adjacent to its wall. Distinct notations
    /// for the same action compare equal afterwards.
    pub fn canonicalize_move(&self, mv: &Move) -> Result<Move, ValidationError> {
        let Some(from) = mv.from() else {
            return Ok(mv.clone());
        };
        let lat = lattice();
        let from_id = lat.id_of(from).ok_or(ValidationError::NoSuchCell(from))?;
        if !lat.is_wall(from_id) {
            return Err(ValidationError::PushFromNonWall(from));
        }
        let direction = Direction::between(from, mv.to());
        if direction == Direction::Center {
            return Err(ValidationError::NoPushDirection(from, mv.to()));
        }
        let first = lat
            .neighbor(from_id, direction)
            .filter(|&id| !lat.is_wall(id))
            .ok_or(ValidationError::CannotPush(from, direction))?;
        if self.pieces[first].is_empty() {
            Ok(mv.with_push(None, lat.hex(first)))
        } else {
            Ok(mv.with_push(Some(from), lat.hex(first)))
        }
    }

    /// Applies `mv` if legal. On rejection the board is unchanged and
    /// the reason is kept for `last_error`.
    pub fn try_make_move(&mut self, mv: &Move) -> bool {
        match self.make_move(mv) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(%err, "move rejected");
                self.last_error = Some(err.to_string());
                false
            }
        }
    }

    /// Applies `mv` if legal, or reports why it is not. The board is
    /// unchanged on error.
    pub fn make_move(&mut self, mv: &Move) -> Result<(), ValidationError> {
        let mut staged = self.clone();
        staged.apply(mv)?;
        *self = staged;
        Ok(())
    }

    fn apply(&mut self, mv: &Move) -> Result<(), ValidationError> {
        if self.result != GameResult::Incomplete {
            return Err(ValidationError::GameOver);
        }
        let color = self.to_play;
        if mv.is_gipf() && !self.can_play_gipf[color.index()] {
            return Err(ValidationError::GipfNotAllowed(color));
        }
        if !mv.is_gipf() && self.forced_gipf_opening() {
            return Err(ValidationError::GipfRequired);
        }

        // The push is validated against the board as the mover saw it,
        // before any owed removals come off.
        let lat = lattice();
        let push = match mv.from() {
            None => {
                let id = lat
                    .id_of(mv.to())
                    .filter(|&id| !lat.is_wall(id))
                    .ok_or(ValidationError::NoSuchCell(mv.to()))?;
                if !self.pieces[id].is_empty() {
                    return Err(ValidationError::PlaceOnOccupied(mv.to()));
                }
                (id, None)
            }
            Some(from) => {
                let from_id = lat.id_of(from).ok_or(ValidationError::NoSuchCell(from))?;
                if !lat.is_wall(from_id) {
                    return Err(ValidationError::PushFromNonWall(from));
                }
                let direction = Direction::between(from, mv.to());
                if direction == Direction::Center {
                    return Err(ValidationError::NoPushDirection(from, mv.to()));
                }
                if !self.can_push_id(from_id, direction) {
                    return Err(ValidationError::CannotPush(from, direction));
                }
                (from_id, Some(direction))
            }
        };

        self.remove_or_capture(mv.remove_before(), color)?;
        if self.analysis().extended_runs().iter().any(|r| !r.all_gipf()) {
            return Err(ValidationError::PrePushRunsRemain);
        }

        let piece = Piece::for_move(color, mv.is_gipf());
        match push {
            (id, None) => {
                self.pieces[id] = piece;
                self.invalidate();
            }
            (from_id, Some(direction)) => self.push_piece(from_id, direction, piece),
        }
        self.reserve[color.index()] -= i32::from(piece.height());

        self.remove_or_capture(mv.remove_after(), color)?;
        if self.analysis().extended_runs_of(color).any(|r| !r.all_gipf()) {
            return Err(ValidationError::PostPushRunsRemain(color));
        }

        if !mv.is_gipf() {
            self.can_play_gipf[color.index()] = false;
        }
        self.increment_turn();
        Ok(())
    }

    fn remove_or_capture(
        &mut self,
        parts: &[RemoveMovePart],
        mover: PieceColor,
    ) -> Result<(), ValidationError> {
        if parts.iter().all(|p| p.is_empty()) {
            return Ok(());
        }
        let lat = lattice();
        // the whole batch validates against the runs present before it
        let analysis = self.analysis();
        for part in parts {
            for &hex in part.hexes() {
                let id = lat
                    .id_of(hex)
                    .filter(|&id| !lat.is_wall(id))
                    .ok_or(ValidationError::NoSuchCell(hex))?;
                let piece = self.pieces[id];
                if piece.is_empty() {
                    return Err(ValidationError::RemoveFromEmpty(hex));
                }
                if !analysis.in_extended_run(hex) {
                    return Err(ValidationError::RemovalNotInRun(hex));
                }
                if piece.color() == mover {
                    self.reserve[mover.index()] += i32::from(piece.height());
                } else {
                    self.captured[piece.color().index()] += i32::from(piece.height());
                }
                self.pieces[id] = Piece::EMPTY;
            }
        }
        self.invalidate();
        Ok(())
    }

    fn increment_turn(&mut self) {
        let analysis = self.analysis();
        let white_gipf = analysis.gipf_in_play(PieceColor::White);
        let black_gipf = analysis.gipf_in_play(PieceColor::Black);
        let white_reserve = self.reserve[PieceColor::White.index()];
        let black_reserve = self.reserve[PieceColor::Black.index()];

        let game_over = black_reserve == 0
            || white_reserve == 0
            || white_gipf == 0
            || (black_gipf == 0 && self.turn_number > 2);
        if game_over {
            self.result = if black_reserve == 0 || black_gipf == 0 {
                GameResult::WhiteWin
            } else {
                GameResult::BlackWin
            };
            tracing::debug!(result = ?self.result, turn = self.turn_number, "game over");
        } else {
            self.to_play = self.to_play.opponent();
            self.turn_number += 1;
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Board::initial(GameType::Tournament)
    }
}
