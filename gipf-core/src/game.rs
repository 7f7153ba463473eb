//! A full game: the live board plus move history and snapshots

use crate::board::{Board, GameResult, GameType};
use crate::error::GameError;
use crate::moves::Move;
use crate::pieces::PieceColor;

/// Wraps a [`Board`] with the played moves, one board snapshot per move
/// (for repetition checks and replay) and the player names.
#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    moves: Vec<Move>,
    boards: Vec<Board>,
    white_player: String,
    black_player: String,
}

impl Game {
    pub fn new(game_type: GameType) -> Game {
        Game::with_players(game_type, "White", "Black")
    }

    pub fn with_players(game_type: GameType, white_player: &str, black_player: &str) -> Game {
        Game {
            board: Board::initial(game_type),
            moves: Vec::new(),
            boards: Vec::new(),
            white_player: white_player.to_string(),
            black_player: black_player.to_string(),
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Board snapshots, one per played move, oldest first.
    pub fn boards(&self) -> &[Board] {
        &self.boards
    }

    pub fn to_play(&self) -> PieceColor {
        self.board.to_play()
    }

    pub fn result(&self) -> GameResult {
        self.board.result()
    }

    pub fn turn_number(&self) -> u32 {
        self.board.turn_number()
    }

    pub fn white_player(&self) -> &str {
        &self.white_player
    }

    pub fn black_player(&self) -> &str {
        &self.black_player
    }

    /// Parses and plays one move of notation.
    pub fn play(&mut self, notation: &str) -> Result<(), GameError> {
        let mv = Move::from_notation(notation)?;
        let canonical = self.board.canonicalize_move(&mv)?;
        self.board.make_move(&canonical)?;
        self.record(canonical);
        Ok(())
    }

    /// Plays an already constructed move. The reason for a rejection is
    /// available from `board().last_error()`.
    pub fn try_make_move(&mut self, mv: &Move) -> bool {
        let canonical = match self.board.canonicalize_move(mv) {
            Ok(canonical) => canonical,
            Err(_) => mv.clone(),
        };
        if self.board.try_make_move(&canonical) {
            self.record(canonical);
            true
        } else {
            false
        }
    }

    fn record(&mut self, mv: Move) {
        self.moves.push(mv);
        self.boards.push(self.board.clone());
    }

    /// The played moves, one notation per line. Moves that came from a
    /// parser keep their original text.
    pub fn transcript(&self) -> String {
        self.moves
            .iter()
            .map(|m| match m.notation() {
                Some(text) => text.to_string(),
                None => m.to_string(),
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the current position has already occurred three more
    /// times earlier in the game. The two most recent snapshots are the
    /// current position and the previous turn, so the scan starts before
    /// them.
    pub fn three_fold_repetition(&self) -> bool {
        let mut repetitions = 0;
        for old in self.boards.iter().rev().skip(2) {
            if self.board.same_position(old) {
                repetitions += 1;
                if repetitions == 3 {
                    return true;
                }
            }
        }
        false
    }
}
