use crate::logic::board::{Board, Color, Piece, PieceType, Position};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum MoveError {
    #[error("the game is already over")]
    GameOver,
    #[error("no piece on the source square")]
    NoPieceAtSource,
    #[error("it is not that side's turn")]
    NotYourTurn,
    #[error("the piece cannot move that way")]
    InvalidMovePattern,
    #[error("the path is blocked")]
    BlockedPath,
    #[error("the target square holds a friendly piece")]
    TargetOccupiedByFriendly,
    #[error("the move would leave the king in check")]
    SelfCheck,
}

/// How a pawn's two-square advance treats the square it passes over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PawnDoubleStep {
    /// Only the destination has to be empty; the pawn may hop a blocker.
    #[default]
    Permissive,
    /// The passed-over square must be empty as well.
    Blockable,
}

/// Rules that a complete chess implementation has and this engine does not.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RuleFeature {
    Castling,
    EnPassant,
    Promotion,
    RepetitionDraw,
    FiftyMoveDraw,
}

/// Capability set of the move rules in force.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RuleSet {
    pub pawn_double_step: PawnDoubleStep,
}

impl RuleSet {
    /// None of the [`RuleFeature`]s are implemented. Castling only exists as
    /// notation for a king that moves two files.
    pub const fn supports(self, feature: RuleFeature) -> bool {
        match feature {
            RuleFeature::Castling
            | RuleFeature::EnPassant
            | RuleFeature::Promotion
            | RuleFeature::RepetitionDraw
            | RuleFeature::FiftyMoveDraw => false,
        }
    }
}

/// Pseudo-legal check under the default rule set. Ignores self-check.
pub fn is_valid_move(board: &Board, from: Position, to: Position, piece: Piece) -> bool {
    validate_move(board, from, to, piece, RuleSet::default()).is_ok()
}

/// Validates the geometry of a move for `piece`, IGNORING self-check.
pub fn validate_move(
    board: &Board,
    from: Position,
    to: Position,
    piece: Piece,
    rules: RuleSet,
) -> Result<(), MoveError> {
    if from == to {
        return Err(MoveError::InvalidMovePattern);
    }

    if let Some(target) = board.get_piece(to) {
        if target.color == piece.color {
            return Err(MoveError::TargetOccupiedByFriendly);
        }
    }

    let d_row = to.row().abs_diff(from.row());
    let d_col = to.col().abs_diff(from.col());

    match piece.piece_type {
        PieceType::Pawn => validate_pawn(board, piece.color, from, to, rules),
        PieceType::Knight => validate_knight(d_row, d_col),
        PieceType::Bishop => validate_bishop(board, from, to, d_row, d_col),
        PieceType::Rook => validate_rook(board, from, to, d_row, d_col),
        PieceType::Queen => validate_queen(board, from, to, d_row, d_col),
        PieceType::King => validate_king(d_row, d_col),
    }
}

fn validate_pawn(
    board: &Board,
    color: Color,
    from: Position,
    to: Position,
    rules: RuleSet,
) -> Result<(), MoveError> {
    let dir = color.pawn_direction();
    #[allow(clippy::cast_possible_wrap)]
    let d_row = to.row() as isize - from.row() as isize;
    let d_col = to.col().abs_diff(from.col());
    let target = board.get_piece(to);

    // Straight advances
    if d_col == 0 {
        if target.is_some() {
            return Err(MoveError::BlockedPath);
        }
        if d_row == dir {
            return Ok(());
        }
        if d_row == 2 * dir && from.row() == color.pawn_start_row() {
            if rules.pawn_double_step == PawnDoubleStep::Blockable {
                let passed = from.offset(dir, 0).ok_or(MoveError::InvalidMovePattern)?;
                if !board.is_empty_at(passed) {
                    return Err(MoveError::BlockedPath);
                }
            }
            return Ok(());
        }
        return Err(MoveError::InvalidMovePattern);
    }

    // Diagonal capture
    if d_col == 1 && d_row == dir && target.is_some() {
        return Ok(());
    }

    Err(MoveError::InvalidMovePattern)
}

const fn validate_knight(d_row: usize, d_col: usize) -> Result<(), MoveError> {
    if (d_row == 2 && d_col == 1) || (d_row == 1 && d_col == 2) {
        Ok(())
    } else {
        Err(MoveError::InvalidMovePattern)
    }
}

fn validate_bishop(
    board: &Board,
    from: Position,
    to: Position,
    d_row: usize,
    d_col: usize,
) -> Result<(), MoveError> {
    if d_row != d_col {
        return Err(MoveError::InvalidMovePattern);
    }
    clear_or_blocked(board, from, to)
}

fn validate_rook(
    board: &Board,
    from: Position,
    to: Position,
    d_row: usize,
    d_col: usize,
) -> Result<(), MoveError> {
    if d_row != 0 && d_col != 0 {
        return Err(MoveError::InvalidMovePattern);
    }
    clear_or_blocked(board, from, to)
}

fn validate_queen(
    board: &Board,
    from: Position,
    to: Position,
    d_row: usize,
    d_col: usize,
) -> Result<(), MoveError> {
    if d_row != d_col && d_row != 0 && d_col != 0 {
        return Err(MoveError::InvalidMovePattern);
    }
    clear_or_blocked(board, from, to)
}

const fn validate_king(d_row: usize, d_col: usize) -> Result<(), MoveError> {
    if d_row <= 1 && d_col <= 1 {
        Ok(())
    } else {
        Err(MoveError::InvalidMovePattern)
    }
}

fn clear_or_blocked(board: &Board, from: Position, to: Position) -> Result<(), MoveError> {
    if is_path_clear(board, from, to) {
        Ok(())
    } else {
        Err(MoveError::BlockedPath)
    }
}

/// True when every square strictly between `from` and `to` is empty.
/// Only meaningful for squares on a shared rank, file or diagonal.
pub fn is_path_clear(board: &Board, from: Position, to: Position) -> bool {
    #[allow(clippy::cast_possible_wrap)]
    let step_row = (to.row() as isize - from.row() as isize).signum();
    #[allow(clippy::cast_possible_wrap)]
    let step_col = (to.col() as isize - from.col() as isize).signum();

    let mut current = from.offset(step_row, step_col);
    while let Some(pos) = current {
        if pos == to {
            return true;
        }
        if !board.is_empty_at(pos) {
            return false;
        }
        current = pos.offset(step_row, step_col);
    }
    true
}

/// Checks if `color` is currently in check. A board without that king is
/// never in check.
pub fn is_in_check(board: &Board, color: Color) -> bool {
    let Some(king) = board.find_king(color) else {
        return false;
    };
    is_square_attacked(board, king, color.opposite())
}

/// True if any `attacker` piece has a pseudo-legal move onto `target`.
pub fn is_square_attacked(board: &Board, target: Position, attacker: Color) -> bool {
    board
        .pieces_of(attacker)
        .any(|(from, piece)| is_valid_move(board, from, target, piece))
}

/// Plays the move on a scratch board and reports whether the mover's king is
/// left attacked.
pub fn leaves_king_in_check(board: &Board, from: Position, to: Position, color: Color) -> bool {
    let mut scratch = board.clone();
    scratch.make_move(from, to);
    is_in_check(&scratch, color)
}
