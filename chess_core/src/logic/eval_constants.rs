// Piece Values (centipawns)
pub const VAL_PAWN: i32 = 100;
pub const VAL_KNIGHT: i32 = 320;
pub const VAL_BISHOP: i32 = 330;
pub const VAL_ROOK: i32 = 500;
pub const VAL_QUEEN: i32 = 900;
pub const VAL_KING: i32 = 20000;

pub const MATE_SCORE: i32 = 10000;
pub const CHECK_BONUS: i32 = 50;

// Piece-Square Tables, written from White's side.
// Row 0 is the far (8th) rank. Black reads them mirrored: table[7 - row].

#[rustfmt::skip]
pub const PST_PAWN: [[i32; 8]; 8] = [
    [  0,   0,   0,   0,   0,   0,   0,   0], // Row 0 (promotion rank, never reached)
    [ 50,  50,  50,  50,  50,  50,  50,  50],
    [ 10,  10,  20,  30,  30,  20,  10,  10],
    [  5,   5,  10,  25,  25,  10,   5,   5],
    [  0,   0,   0,  20,  20,   0,   0,   0],
    [  5,  -5, -10,   0,   0, -10,  -5,   5],
    [  5,  10,  10, -20, -20,  10,  10,   5], // Starting rank
    [  0,   0,   0,   0,   0,   0,   0,   0],
];

#[rustfmt::skip]
pub const PST_KNIGHT: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20,   0,   0,   0,   0, -20, -40],
    [-30,   0,  10,  15,  15,  10,   0, -30],
    [-30,   5,  15,  20,  20,  15,   5, -30],
    [-30,   0,  15,  20,  20,  15,   0, -30],
    [-30,   5,  10,  15,  15,  10,   5, -30],
    [-40, -20,   0,   5,   5,   0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

use crate::logic::board::{Color, PieceType, Position};

/// Positional bonus. Only pawns and knights have tables.
pub fn get_pst_value(pt: PieceType, color: Color, pos: Position) -> i32 {
    let (r, c) = if color == Color::White {
        (pos.row(), pos.col())
    } else {
        (7 - pos.row(), pos.col())
    };

    let val = match pt {
        PieceType::Pawn => PST_PAWN.get(r).and_then(|row| row.get(c)),
        PieceType::Knight => PST_KNIGHT.get(r).and_then(|row| row.get(c)),
        _ => Some(&0),
    };
    *val.unwrap_or(&0)
}
