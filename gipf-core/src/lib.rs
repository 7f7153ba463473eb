//! GIPF Core - Rules engine for the board game GIPF
//!
//! This crate provides the complete two-player rules engine:
//! - Board geometry (radius-4 hex grid with axial coordinates)
//! - Piece stacks, reserves and the Gipf opening rules
//! - Run detection, extended runs and removal options
//! - Move notation parsing and canonicalization
//! - Full legal move generation
//! - Position congruence under rotations and mirrors

pub mod analysis;
pub mod board;
pub mod congruence;
pub mod error;
pub mod game;
pub mod hex;
pub mod lattice;
mod movegen;
pub mod moves;
pub mod notation;
pub mod pieces;

// Re-exports for convenient access
pub use board::{Board, GameResult, GameType};
pub use congruence::congruent;
pub use error::{GameError, ParseError, ValidationError};
pub use game::Game;
pub use hex::{Direction, Hex, BOARD_RADIUS, DIRECTIONS};
pub use moves::{Move, RemoveMovePart};
pub use pieces::{Piece, PieceColor};
