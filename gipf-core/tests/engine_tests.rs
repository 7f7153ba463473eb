//! Integration tests for the GIPF rules engine
//!
//! Exercises the full stack: notation, board state machine, run
//! analysis, removal options and move generation, including one
//! complete recorded game.

use gipf_core::lattice::lattice;
use gipf_core::notation::{format_coordinate, parse_coordinate};
use gipf_core::{Board, GameResult, GameType, Move, PieceColor};

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn mv(text: &str) -> Move {
    Move::from_notation(text).unwrap()
}

fn play(board: &mut Board, text: &str) {
    assert!(
        board.try_make_move(&mv(text)),
        "move {text} rejected: {:?}",
        board.last_error()
    );
}

fn play_all(board: &mut Board, moves: &[&str]) {
    for text in moves {
        play(board, text);
    }
}

/// Thirteen opening moves leaving White a run of four to clear.
const OWED_REMOVAL_OPENING: [&str; 13] = [
    "Ge8", "Gd8-f7", "Ge9-e7", "Gf8-d7", "Ge9-e6", "Gd8-g6", "g7-d6", "f8-c6", "f8-f6", "c7-g5",
    "g7-c5", "e9-e5", "b6-f5",
];

/// A complete recorded game, White wins on turn 42.
const RECORDED_GAME: [&str; 42] = [
    "Ge8",
    "Gd8-f7",
    "Ge9-e7",
    "Gf8-d7",
    "Ge9-e6",
    "Gd8-g6",
    "g7-d6",
    "f8-c6",
    "f8-f6",
    "c7-g5",
    "g7-c5",
    "e9-e5",
    "b6-f5",
    "xe7,e8;c7-e7",
    "g7-b4",
    "c7-h4",
    "h6-d5",
    "b6-g4",
    "h6-c4;xc6*,d6,f5,g4",
    "b3",
    "b5",
    "g7-d6",
    "xd7*,e7,f6,h4;a5-f4",
    "a2-f6",
    "a5-g3;xb3*,c4*,d5,g6",
    "e2",
    "f2",
    "d1-g2",
    "h1-f3",
    "d1-h2",
    "f1-f5",
    "i1-d5",
    "g6",
    "g1-e3;xf2,f3,f5,Gf6*,f7",
    "h6-f6",
    "a3-e7",
    "h6-c4;xGc4*,e6,f6,g6",
    "e8",
    "f1-d2",
    "c6",
    "c7-c4",
    "g6",
];

/// Twelve moves building the position where White owes a removal with
/// two Gipf pieces caught in the run.
const REMOVAL_CHOICE_POSITION: [&str; 12] = [
    "Gb2", "Gf2", "Gb5", "Gf1-f3", "a1-c3", "f1-f4", "a1-d4", "a5-c5", "f1-f5", "f7", "a5-d5",
    "a5-e5",
];

// ============================================================================
// NOTATION AND COORDINATES
// ============================================================================

#[test]
fn test_coordinate_round_trip_over_every_cell() {
    let lat = lattice();
    for id in 0..lat.len() {
        let hex = lat.hex(id);
        let text = format_coordinate(hex);
        assert_eq!(parse_coordinate(&text).unwrap(), hex, "coordinate {text}");
    }
}

// ============================================================================
// MOVE EQUIVALENCY
// ============================================================================

#[test]
fn test_placement_notations_collapse_on_empty_board() {
    let board = Board::initial(GameType::Tournament);
    let moves: Vec<Move> = ["Ge8", "Ge9-e8", "Gd8-e8", "Gf8-e8"]
        .iter()
        .map(|t| board.canonicalize_move(&mv(t)).unwrap())
        .collect();
    for pair in moves.windows(2) {
        assert_eq!(pair[0], pair[1]);
    }
}

#[test]
fn test_pushes_into_occupied_cell_stay_distinct() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &["Ge8", "Gd2"]);

    let m1 = board.canonicalize_move(&mv("Ge9-e8")).unwrap();
    let m2 = board.canonicalize_move(&mv("Gd8-e8")).unwrap();
    let m3 = board.canonicalize_move(&mv("Gf8-e8")).unwrap();
    assert_ne!(m1, m2);
    assert_ne!(m1, m3);
    assert_ne!(m2, m3);
}

#[test]
fn test_owed_removal_moves_collapse() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &OWED_REMOVAL_OPENING);

    let m1 = board.canonicalize_move(&mv("xe7,e8;e2")).unwrap();
    let m2 = board.canonicalize_move(&mv("xe7,e8;d1-e2")).unwrap();
    let m3 = board.canonicalize_move(&mv("xe8,e7;f1-e2")).unwrap();
    assert_eq!(m1, m2);
    assert_eq!(m1, m3);
}

#[test]
fn test_earned_removal_order_is_irrelevant() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &OWED_REMOVAL_OPENING);
    play_all(
        &mut board,
        &["xe7,e8;c7-e7", "g7-b4", "c7-h4", "h6-d5", "b6-g4"],
    );

    let orderings = [
        "h6-c4;xc6*,d6,f5,g4",
        "h6-c4;xc6*,d6,g4,f5",
        "h6-c4;xc6*,f5,g4,d6",
        "h6-c4;xc6*,g4,f5,d6",
    ];
    let moves: Vec<Move> = orderings
        .iter()
        .map(|t| board.canonicalize_move(&mv(t)).unwrap())
        .collect();
    for pair in moves.windows(2) {
        assert_eq!(pair[0], pair[1]);
    }

    let bigger = board
        .canonicalize_move(&mv("h6-c4;xc6*,d6,f5,g4,e6"))
        .unwrap();
    assert_ne!(bigger, moves[0]);
}

// ============================================================================
// MOVE GENERATION
// ============================================================================

#[test]
fn test_tournament_start_has_18_gipf_moves() {
    let board = Board::initial(GameType::Tournament);
    let moves = board.legal_moves();
    assert_eq!(moves.len(), 18);
    assert_ne!(moves[0], moves[1]);
    assert!(moves.iter().all(|m| m.is_gipf()));
    assert!(moves.iter().all(|m| m.is_placement()));
}

#[test]
fn test_standard_start_has_30_ordinary_moves() {
    let board = Board::initial(GameType::Standard);
    let moves = board.legal_moves();
    assert_eq!(moves.len(), 30);
    assert_ne!(moves[0], moves[1]);
    assert!(moves.iter().all(|m| !m.is_gipf()));
}

#[test]
fn test_both_piece_kinds_while_gipf_right_lasts() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &["Gb2", "Gf2"]);
    // 21 distinct pushes, each in Gipf and ordinary form
    let moves = board.legal_moves();
    assert_eq!(moves.len(), 42);
    assert_eq!(moves.iter().filter(|m| m.is_gipf()).count(), 21);
}

#[test]
fn test_no_gipf_moves_once_both_rights_are_spent() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(
        &mut board,
        &["Gb2", "Gf2", "Gb5", "Gf1-f3", "a1-c3", "f1-f4"],
    );
    assert!(board.legal_moves().iter().all(|m| !m.is_gipf()));
}

#[test]
fn test_every_generated_move_is_legal() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &["Gb2", "Gf2"]);
    for mv in board.legal_moves().iter() {
        let mut probe = board.clone();
        assert!(
            probe.try_make_move(mv),
            "generated move {mv} rejected: {:?}",
            probe.last_error()
        );
    }
}

#[test]
fn test_legal_moves_are_stable_across_calls() {
    let board = Board::initial(GameType::Standard);
    assert_eq!(*board.legal_moves(), *board.legal_moves());
}

// ============================================================================
// REMOVAL CHOICES
// ============================================================================

#[test]
fn test_gipf_members_make_four_removal_choices() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &REMOVAL_CHOICE_POSITION);

    assert_eq!(board.reserve(PieceColor::White), 10);
    assert_eq!(board.reserve(PieceColor::Black), 10);
    assert_eq!(board.result(), GameResult::Incomplete);
    assert_eq!(board.gipf_in_play(PieceColor::White), 2);
    assert_eq!(board.gipf_in_play(PieceColor::Black), 2);

    // the run holds two Gipf pieces, each optionally kept
    assert_eq!(board.all_possible_remove_lists().len(), 4);
}

#[test]
fn test_owed_removals_multiply_the_move_list() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &REMOVAL_CHOICE_POSITION);

    let moves = board.legal_moves();
    let with_removal = moves
        .iter()
        .filter(|m| m.removed_before().count() > 0)
        .count();
    // 22 distinct pushes for each of the 4 removal choices
    assert_eq!(with_removal, 22 * 4);
}

#[test]
fn test_move_leaving_own_run_is_rejected() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &REMOVAL_CHOICE_POSITION[..11]);

    // Black completes a white run without clearing their own
    assert!(!board.try_make_move(&mv("f8-f6")));
    assert!(board
        .last_error()
        .unwrap()
        .contains("Post-push removal did not clear all extended runs of four of current player's color"));
}

#[test]
fn test_removal_outside_any_run_is_rejected() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &["Gb2", "Gf2"]);
    let before = board.clone();

    assert!(!board.try_make_move(&mv("xb2;c2")));
    assert!(board
        .last_error()
        .unwrap()
        .contains("not part of an extended run of four"));
    assert!(board.same_position(&before));
}

// ============================================================================
// FULL GAME
// ============================================================================

#[test]
fn test_recorded_game_plays_to_a_white_win() {
    let mut board = Board::initial(GameType::Tournament);
    play_all(&mut board, &RECORDED_GAME);

    assert_eq!(board.reserve(PieceColor::Black), 0);
    assert_eq!(board.reserve(PieceColor::White), 5);
    assert_eq!(board.result(), GameResult::WhiteWin);
    assert_eq!(board.gipf_in_play(PieceColor::Black), 2);
    assert_eq!(board.gipf_in_play(PieceColor::White), 2);

    // nothing moves in a finished game
    assert!(!board.try_make_move(&mv("e2")));
    assert_eq!(board.last_error(), Some("This game is over"));
    assert!(board.legal_moves().is_empty());
}
