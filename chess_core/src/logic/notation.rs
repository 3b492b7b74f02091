//! Standard algebraic notation for accepted moves.

use crate::logic::board::{Board, Move, PieceType};
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::{leaves_king_in_check, validate_move};

/// Renders `mv` in SAN. `board` is the position *before* the move; the check
/// flags describe the position after it.
///
/// A king moving two files is written as castling even though the rules never
/// produce such a move.
pub fn notate(mv: &Move, board: &Board, is_check: bool, is_checkmate: bool) -> String {
    notate_with(&MoveGenerator::default(), mv, board, is_check, is_checkmate)
}

pub fn notate_with(
    generator: &MoveGenerator,
    mv: &Move,
    board: &Board,
    is_check: bool,
    is_checkmate: bool,
) -> String {
    let mut san = String::with_capacity(8);

    if mv.piece.piece_type == PieceType::King && mv.from.col().abs_diff(mv.to.col()) == 2 {
        san.push_str(if mv.to.col() > mv.from.col() { "O-O" } else { "O-O-O" });
    } else {
        let is_capture = mv.captured.is_some() || board.get_piece(mv.to).is_some();

        if let Some(letter) = mv.piece.piece_type.letter() {
            san.push(letter);
            san.push_str(&disambiguation(generator, mv, board));
        } else if is_capture {
            san.push(mv.from.file_char());
        }

        if is_capture {
            san.push('x');
        }
        san.push_str(&mv.to.to_string());
    }

    if is_checkmate {
        san.push('#');
    } else if is_check {
        san.push('+');
    }

    san
}

/// Shortest origin hint that tells `mv` apart from other same-type pieces
/// able to reach the same square: file, then rank, then both.
fn disambiguation(generator: &MoveGenerator, mv: &Move, board: &Board) -> String {
    let rivals: Vec<_> = board
        .pieces_of(mv.piece.color)
        .filter(|&(pos, piece)| {
            pos != mv.from
                && piece.piece_type == mv.piece.piece_type
                && validate_move(board, pos, mv.to, piece, generator.rules()).is_ok()
                && !leaves_king_in_check(board, pos, mv.to, piece.color)
        })
        .map(|(pos, _)| pos)
        .collect();

    if rivals.is_empty() {
        return String::new();
    }

    if rivals.iter().all(|r| r.col() != mv.from.col()) {
        mv.from.file_char().to_string()
    } else if rivals.iter().all(|r| r.row() != mv.from.row()) {
        mv.from.rank_char().to_string()
    } else {
        mv.from.to_string()
    }
}
