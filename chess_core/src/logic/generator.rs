use crate::logic::board::{Board, Color, Move, Position};
use crate::logic::rules::{is_in_check, validate_move, RuleSet};
use serde::{Deserialize, Serialize};

/// Status of a position, relative to the side about to move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameStatus {
    Playing,
    Check,
    Checkmate,
    Stalemate,
}

impl GameStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Checkmate | Self::Stalemate)
    }
}

/// Enumerates strictly legal moves: pseudo-legal moves that do not leave the
/// mover's own king in check.
#[derive(Debug, Clone, Copy, Default)]
pub struct MoveGenerator {
    rules: RuleSet,
}

impl MoveGenerator {
    pub const fn new(rules: RuleSet) -> Self {
        Self { rules }
    }

    pub const fn rules(&self) -> RuleSet {
        self.rules
    }

    /// Every legal move for `color`, ordered by source square then target
    /// square, both row-major.
    pub fn generate_moves(&self, board: &Board, color: Color) -> Vec<Move> {
        let mut moves = Vec::with_capacity(64);
        let mut scratch = board.clone();

        for (from, piece) in board.pieces_of(color) {
            for to in Position::all() {
                if validate_move(board, from, to, piece, self.rules).is_err() {
                    continue;
                }
                let captured = scratch.make_move(from, to);
                let exposed = is_in_check(&scratch, color);
                scratch.unmake_move(from, to, captured);

                if !exposed {
                    moves.push(Move::new(from, to, piece, captured));
                }
            }
        }

        moves
    }

    /// Checks if `color` has at least one legal move.
    /// Returns as soon as one is found.
    pub fn has_legal_moves(&self, board: &Board, color: Color) -> bool {
        let mut scratch = board.clone();

        for (from, piece) in board.pieces_of(color) {
            for to in Position::all() {
                if validate_move(board, from, to, piece, self.rules).is_err() {
                    continue;
                }
                let captured = scratch.make_move(from, to);
                let exposed = is_in_check(&scratch, color);
                scratch.unmake_move(from, to, captured);

                if !exposed {
                    return true;
                }
            }
        }

        false
    }

    /// Legal destinations of the piece standing on `from`.
    pub fn moves_from(&self, board: &Board, from: Position) -> Vec<Move> {
        let Some(piece) = board.get_piece(from) else {
            return Vec::new();
        };
        self.generate_moves(board, piece.color)
            .into_iter()
            .filter(|mv| mv.from == from)
            .collect()
    }

    pub fn is_checkmate(&self, board: &Board, color: Color) -> bool {
        is_in_check(board, color) && !self.has_legal_moves(board, color)
    }

    pub fn is_stalemate(&self, board: &Board, color: Color) -> bool {
        !is_in_check(board, color) && !self.has_legal_moves(board, color)
    }

    pub fn status(&self, board: &Board, color: Color) -> GameStatus {
        let in_check = is_in_check(board, color);
        let has_moves = self.has_legal_moves(board, color);
        match (in_check, has_moves) {
            (true, false) => GameStatus::Checkmate,
            (false, false) => GameStatus::Stalemate,
            (true, true) => GameStatus::Check,
            (false, true) => GameStatus::Playing,
        }
    }
}

/// Legal moves under the default rule set.
pub fn get_all_valid_moves(board: &Board, color: Color) -> Vec<Move> {
    MoveGenerator::default().generate_moves(board, color)
}

pub fn is_checkmate(board: &Board, color: Color) -> bool {
    MoveGenerator::default().is_checkmate(board, color)
}

pub fn is_stalemate(board: &Board, color: Color) -> bool {
    MoveGenerator::default().is_stalemate(board, color)
}
