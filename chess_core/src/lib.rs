//! Chess rules, notation, evaluation and search.
//!
//! The free functions here cover the common headless flow; the modules expose
//! the stateful pieces (`GameState`, `ComputerPlayer`, `Clock`) for callers that
//! need more control.

pub mod engine;
pub mod logic;

use engine::config::{Difficulty, EngineConfig};
use engine::player::ComputerPlayer;
use logic::generator::MoveGenerator;
use rand::Rng;
use std::sync::Arc;

pub use engine::eval::evaluate_board;
pub use logic::board::{Board, Color, Move, Piece, PieceType, Position};
pub use logic::game::GameState;
pub use logic::generator::GameStatus;
pub use logic::rules::MoveError;

/// The standard starting position.
pub fn new_game() -> Board {
    Board::new()
}

/// Strictly legal moves for `color`, in generation order.
pub fn legal_moves(board: &Board, color: Color) -> Vec<Move> {
    MoveGenerator::default().generate_moves(board, color)
}

/// Validates and applies `mv`, returning the new board.
pub fn apply_move(board: &Board, mv: &Move) -> Result<Board, MoveError> {
    logic::game::apply_move(board, mv)
}

pub fn status(board: &Board, color_to_move: Color) -> GameStatus {
    MoveGenerator::default().status(board, color_to_move)
}

/// Static score, positive favoring black.
pub fn evaluate(board: &Board) -> i32 {
    evaluate_board(board)
}

/// Move the computer would play for `color` at `difficulty`, given the moves
/// played so far. `None` when `color` has no legal move.
pub fn best_move<R: Rng>(
    board: &Board,
    color: Color,
    difficulty: Difficulty,
    history: &[Move],
    rng: &mut R,
) -> Option<Move> {
    let mut game = GameState::from_position(board.clone(), color);
    game.history = history.to_vec();

    ComputerPlayer::new(Arc::new(EngineConfig::default()), difficulty, rng).choose_move(&game)
}

/// Standard algebraic notation for `mv`, played on `board_before`.
pub fn notate(mv: &Move, board_before: &Board, is_check: bool, is_checkmate: bool) -> String {
    logic::notation::notate(mv, board_before, is_check, is_checkmate)
}
