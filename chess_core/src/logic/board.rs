use serde::{Deserialize, Serialize};
use serde_big_array::BigArray;
use std::fmt;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    White,
    Black,
}

impl Color {
    #[must_use]
    pub const fn opposite(self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::White => 0,
            Self::Black => 1,
        }
    }

    /// Row delta of a pawn step. White marches toward row 0.
    pub const fn pawn_direction(self) -> isize {
        match self {
            Self::White => -1,
            Self::Black => 1,
        }
    }

    pub const fn pawn_start_row(self) -> usize {
        match self {
            Self::White => 6,
            Self::Black => 1,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::White => f.write_str("white"),
            Self::Black => f.write_str("black"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PieceType {
    Pawn = 0,
    Rook = 1,
    Knight = 2,
    Bishop = 3,
    Queen = 4,
    King = 5,
}

impl PieceType {
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Upper-case SAN letter. Pawns have none.
    pub const fn letter(self) -> Option<char> {
        match self {
            Self::Pawn => None,
            Self::Rook => Some('R'),
            Self::Knight => Some('N'),
            Self::Bishop => Some('B'),
            Self::Queen => Some('Q'),
            Self::King => Some('K'),
        }
    }

    const fn fen_char(self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Rook => 'r',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }

    const fn from_fen_char(c: char) -> Option<Self> {
        match c {
            'p' => Some(Self::Pawn),
            'r' => Some(Self::Rook),
            'n' => Some(Self::Knight),
            'b' => Some(Self::Bishop),
            'q' => Some(Self::Queen),
            'k' => Some(Self::King),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Piece {
    pub piece_type: PieceType,
    pub color: Color,
}

impl Piece {
    pub const fn new(piece_type: PieceType, color: Color) -> Self {
        Self { piece_type, color }
    }
}

/// A square on the board. `row` 0 is black's back rank, `row` 7 is white's.
/// Only constructible on the board, so indexing by a `Position` cannot fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPosition")]
pub struct Position {
    row: usize,
    col: usize,
}

#[derive(Deserialize)]
struct RawPosition {
    row: usize,
    col: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("square ({row}, {col}) is off the board")]
pub struct OffBoard {
    pub row: usize,
    pub col: usize,
}

impl TryFrom<RawPosition> for Position {
    type Error = OffBoard;

    fn try_from(raw: RawPosition) -> Result<Self, Self::Error> {
        Self::new(raw.row, raw.col).ok_or(OffBoard {
            row: raw.row,
            col: raw.col,
        })
    }
}

impl Position {
    pub const fn new(row: usize, col: usize) -> Option<Self> {
        if row < 8 && col < 8 {
            Some(Self { row, col })
        } else {
            None
        }
    }

    /// Parses a square in algebraic form, e.g. `"e4"`.
    pub fn from_algebraic(s: &str) -> Option<Self> {
        let mut chars = s.chars();
        let file = chars.next()?;
        let rank = chars.next()?;
        if chars.next().is_some() || !('a'..='h').contains(&file) || !('1'..='8').contains(&rank) {
            return None;
        }
        let col = file as usize - 'a' as usize;
        let rank = rank as usize - '0' as usize;
        Self::new(8 - rank, col)
    }

    pub const fn row(self) -> usize {
        self.row
    }

    pub const fn col(self) -> usize {
        self.col
    }

    pub const fn index(self) -> usize {
        self.row * 8 + self.col
    }

    /// All 64 squares in row-major order (a8, b8, ..., h1).
    pub fn all() -> impl Iterator<Item = Self> {
        (0..64).map(|i| Self { row: i / 8, col: i % 8 })
    }

    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Self::new(row, col)
    }

    pub const fn file_char(self) -> char {
        (b'a' + self.col as u8) as char
    }

    pub const fn rank_char(self) -> char {
        (b'8' - self.row as u8) as char
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file_char(), self.rank_char())
    }
}

/// A candidate or finalized move. `notation` is attached once the move has been
/// accepted into a game's history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Move {
    pub from: Position,
    pub to: Position,
    pub piece: Piece,
    pub captured: Option<Piece>,
    pub notation: Option<String>,
}

impl Move {
    pub const fn new(from: Position, to: Position, piece: Piece, captured: Option<Piece>) -> Self {
        Self {
            from,
            to,
            piece,
            captured,
            notation: None,
        }
    }

    pub fn same_squares(&self, from: Position, to: Position) -> bool {
        self.from == from && self.to == to
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FenError {
    #[error("empty position string")]
    Empty,
    #[error("expected 8 ranks, found {0}")]
    RankCount(usize),
    #[error("rank {rank} describes {files} files")]
    RankLength { rank: usize, files: usize },
    #[error("unknown piece character '{0}'")]
    UnknownPiece(char),
    #[error("unknown side to move '{0}'")]
    SideToMove(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    // Row-major: index = row * 8 + col
    #[serde(with = "BigArray")]
    grid: [Option<Piece>; 64],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// The standard initial position.
    #[must_use]
    pub fn new() -> Self {
        let mut board = Self::empty();
        board.setup_initial_position();
        board
    }

    #[must_use]
    pub const fn empty() -> Self {
        Self { grid: [None; 64] }
    }

    fn setup_initial_position(&mut self) {
        // Black on rows 0-1, White on rows 6-7
        self.setup_pieces(Color::Black, 0, 1);
        self.setup_pieces(Color::White, 7, 6);
    }

    fn setup_pieces(&mut self, color: Color, back_row: usize, pawn_row: usize) {
        let pieces = [
            PieceType::Rook,
            PieceType::Knight,
            PieceType::Bishop,
            PieceType::Queen,
            PieceType::King,
            PieceType::Bishop,
            PieceType::Knight,
            PieceType::Rook,
        ];

        for (col, &pt) in pieces.iter().enumerate() {
            self.grid[back_row * 8 + col] = Some(Piece::new(pt, color));
            self.grid[pawn_row * 8 + col] = Some(Piece::new(PieceType::Pawn, color));
        }
    }

    #[must_use]
    pub const fn get_piece(&self, pos: Position) -> Option<Piece> {
        self.grid[pos.index()]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.get_piece(pos).is_none()
    }

    pub fn set_piece(&mut self, pos: Position, piece: Option<Piece>) {
        self.grid[pos.index()] = piece;
    }

    pub fn add_piece(&mut self, pos: Position, piece_type: PieceType, color: Color) {
        self.set_piece(pos, Some(Piece::new(piece_type, color)));
    }

    pub fn remove_piece(&mut self, pos: Position) -> Option<Piece> {
        self.grid[pos.index()].take()
    }

    /// Occupied squares in row-major order.
    pub fn pieces(&self) -> impl Iterator<Item = (Position, Piece)> + '_ {
        Position::all().filter_map(|pos| self.get_piece(pos).map(|p| (pos, p)))
    }

    pub fn pieces_of(&self, color: Color) -> impl Iterator<Item = (Position, Piece)> + '_ {
        self.pieces().filter(move |(_, p)| p.color == color)
    }

    pub fn piece_count(&self) -> usize {
        self.grid.iter().filter(|cell| cell.is_some()).count()
    }

    /// Linear scan for `color`'s king.
    pub fn find_king(&self, color: Color) -> Option<Position> {
        self.pieces()
            .find(|(_, p)| p.piece_type == PieceType::King && p.color == color)
            .map(|(pos, _)| pos)
    }

    /// Returns a new board with the piece on `from` moved to `to`.
    /// The receiver is left untouched.
    #[must_use]
    pub fn with_move(&self, from: Position, to: Position) -> Self {
        let mut next = self.clone();
        next.make_move(from, to);
        next
    }

    /// Moves a piece in place and returns whatever stood on `to`.
    /// Paired with [`Board::unmake_move`] inside search.
    pub fn make_move(&mut self, from: Position, to: Position) -> Option<Piece> {
        let piece = self.remove_piece(from);
        let captured = self.get_piece(to);
        self.set_piece(to, piece);
        captured
    }

    pub fn unmake_move(&mut self, from: Position, to: Position, captured: Option<Piece>) {
        let piece = self.remove_piece(to);
        self.set_piece(from, piece);
        self.set_piece(to, captured);
    }

    /// Piece placement followed by the side to move, e.g.
    /// `rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w`.
    pub fn to_fen_string(&self, turn: Color) -> String {
        let mut fen = String::new();
        for row in 0..8 {
            let mut empty_count = 0;
            for col in 0..8 {
                match self.grid[row * 8 + col] {
                    Some(piece) => {
                        if empty_count > 0 {
                            fen.push_str(&empty_count.to_string());
                            empty_count = 0;
                        }
                        let c = piece.piece_type.fen_char();
                        fen.push(if piece.color == Color::White {
                            c.to_ascii_uppercase()
                        } else {
                            c
                        });
                    }
                    None => empty_count += 1,
                }
            }
            if empty_count > 0 {
                fen.push_str(&empty_count.to_string());
            }
            if row < 7 {
                fen.push('/');
            }
        }

        fen.push(' ');
        fen.push(if turn == Color::White { 'w' } else { 'b' });
        fen
    }

    /// Parses piece placement and an optional side-to-move field. Castling,
    /// en-passant and clock fields are ignored since this rule set does not
    /// track them.
    pub fn from_fen(fen: &str) -> Result<(Self, Color), FenError> {
        let mut fields = fen.split_whitespace();
        let placement = fields.next().ok_or(FenError::Empty)?;

        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::RankCount(ranks.len()));
        }

        let mut board = Self::empty();
        for (row, rank) in ranks.iter().enumerate() {
            let mut col = 0;
            for c in rank.chars() {
                if let Some(skip) = c.to_digit(10) {
                    col += skip as usize;
                    continue;
                }
                let piece_type = PieceType::from_fen_char(c.to_ascii_lowercase())
                    .ok_or(FenError::UnknownPiece(c))?;
                let color = if c.is_ascii_uppercase() {
                    Color::White
                } else {
                    Color::Black
                };
                let pos = Position::new(row, col).ok_or(FenError::RankLength {
                    rank: 8 - row,
                    files: col + 1,
                })?;
                board.add_piece(pos, piece_type, color);
                col += 1;
            }
            if col != 8 {
                return Err(FenError::RankLength {
                    rank: 8 - row,
                    files: col,
                });
            }
        }

        let turn = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(FenError::SideToMove(other.to_string())),
        };

        Ok((board, turn))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    #[test]
    fn test_positions_stay_on_board() {
        assert_eq!(Position::new(8, 4), None);
        assert_eq!(Position::new(0, 8), None);
        assert_eq!(pos("h1").offset(1, 0), None);
        assert_eq!(pos("a8").offset(0, -1), None);
        assert_eq!(Position::from_algebraic("e9"), None);
        assert_eq!(Position::from_algebraic("i1"), None);
        assert_eq!(pos("e2").row(), 6);
        assert_eq!(pos("e2").col(), 4);
    }

    #[test]
    fn test_off_board_position_rejected_by_serde() {
        let back: Position = serde_json::from_str(r#"{"row":7,"col":4}"#).unwrap();
        assert_eq!(back, pos("e1"));

        let err = serde_json::from_str::<Position>(r#"{"row":8,"col":4}"#).unwrap_err();
        assert!(err.to_string().contains("off the board"), "{err}");
        assert!(serde_json::from_str::<Position>(r#"{"row":9,"col":9}"#).is_err());
    }

    #[test]
    fn test_initial_setup() {
        let board = Board::new();
        assert_eq!(board.piece_count(), 32);

        let piece = board.get_piece(pos("e1")).unwrap();
        assert_eq!(piece, Piece::new(PieceType::King, Color::White));
        assert_eq!(pos("e1"), Position { row: 7, col: 4 });

        let piece = board.get_piece(pos("d8")).unwrap();
        assert_eq!(piece, Piece::new(PieceType::Queen, Color::Black));

        for col in 0..8 {
            let p = board.get_piece(Position::new(1, col).unwrap()).unwrap();
            assert_eq!(p, Piece::new(PieceType::Pawn, Color::Black));
        }
    }

    #[test]
    fn test_fen_generation() {
        let board = Board::new();
        assert_eq!(
            board.to_fen_string(Color::White),
            "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w"
        );
    }

    #[test]
    fn test_fen_parse_matches_initial() {
        let (board, turn) =
            Board::from_fen("rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR b KQkq - 0 1").unwrap();
        assert_eq!(board, Board::new());
        assert_eq!(turn, Color::Black);
    }

    #[test]
    fn test_fen_errors() {
        assert_eq!(Board::from_fen(""), Err(FenError::Empty));
        assert_eq!(Board::from_fen("8/8/8"), Err(FenError::RankCount(3)));
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/7"),
            Err(FenError::RankLength { rank: 1, files: 7 })
        ));
        assert_eq!(
            Board::from_fen("8/8/8/8/8/8/8/7x"),
            Err(FenError::UnknownPiece('x'))
        );
        assert!(matches!(
            Board::from_fen("8/8/8/8/8/8/8/8 x"),
            Err(FenError::SideToMove(_))
        ));
    }

    #[test]
    fn test_position_algebraic() {
        assert_eq!(pos("a8"), Position { row: 0, col: 0 });
        assert_eq!(pos("h1"), Position { row: 7, col: 7 });
        assert_eq!(pos("e4").to_string(), "e4");
        assert!(Position::from_algebraic("i1").is_none());
        assert!(Position::from_algebraic("a9").is_none());
        assert!(Position::from_algebraic("e44").is_none());
        assert!(Position::new(8, 0).is_none());
        assert!(pos("a1").offset(1, 0).is_none());
        assert_eq!(pos("a1").offset(-1, 1), Some(pos("b2")));
    }

    #[test]
    fn test_with_move_leaves_original() {
        let board = Board::new();
        let next = board.with_move(pos("e2"), pos("e4"));

        assert!(board.get_piece(pos("e2")).is_some());
        assert!(board.is_empty_at(pos("e4")));
        assert!(next.is_empty_at(pos("e2")));
        assert_eq!(
            next.get_piece(pos("e4")),
            Some(Piece::new(PieceType::Pawn, Color::White))
        );
    }

    #[test]
    fn test_make_unmake_restores_capture() {
        let (mut board, _) = Board::from_fen("4k3/8/8/3p4/4P3/8/8/4K3 w").unwrap();
        let before = board.clone();

        let captured = board.make_move(pos("e4"), pos("d5"));
        assert_eq!(captured, Some(Piece::new(PieceType::Pawn, Color::Black)));
        board.unmake_move(pos("e4"), pos("d5"), captured);

        assert_eq!(board, before);
    }

    #[test]
    fn test_find_king() {
        let board = Board::new();
        assert_eq!(board.find_king(Color::Black), Some(pos("e8")));
        assert_eq!(Board::empty().find_king(Color::White), None);
    }

    #[test]
    fn test_board_serde_roundtrip() {
        let board = Board::new();
        let json = serde_json::to_string(&board).unwrap();
        let back: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(back, board);
    }
}
