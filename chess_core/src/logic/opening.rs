//! Opening book: named move sequences from the initial position.

use crate::logic::board::{Move, Position};

/// Book lookups stop once this many plies have been played.
pub const BOOK_PLY_LIMIT: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Opening {
    pub name: &'static str,
    pub moves: &'static [(Position, Position)],
}

impl Opening {
    /// True when `history` replays the start of this line square for square.
    pub fn starts_with(&self, history: &[Move]) -> bool {
        history.len() <= self.moves.len()
            && history
                .iter()
                .zip(self.moves)
                .all(|(played, &(from, to))| played.same_squares(from, to))
    }
}

const fn sq(name: &str) -> Position {
    let b = name.as_bytes();
    match Position::new((b'8' - b[1]) as usize, (b[0] - b'a') as usize) {
        Some(pos) => pos,
        None => panic!("book square off the board"),
    }
}

macro_rules! book_line {
    ($($from:literal - $to:literal),* $(,)?) => {
        &[$((sq($from), sq($to))),*]
    };
}

// Declaration order decides which line wins when several match.
pub static OPENINGS: &[Opening] = &[
    Opening {
        name: "Ruy Lopez",
        moves: book_line!["e2"-"e4", "e7"-"e5", "g1"-"f3", "b8"-"c6", "f1"-"b5", "a7"-"a6", "b5"-"a4", "g8"-"f6"],
    },
    Opening {
        name: "Italian Game",
        moves: book_line!["e2"-"e4", "e7"-"e5", "g1"-"f3", "b8"-"c6", "f1"-"c4", "f8"-"c5", "c2"-"c3", "g8"-"f6"],
    },
    Opening {
        name: "Sicilian Defense",
        moves: book_line!["e2"-"e4", "c7"-"c5", "g1"-"f3", "d7"-"d6", "d2"-"d4", "c5"-"d4", "f3"-"d4", "g8"-"f6"],
    },
    Opening {
        name: "French Defense",
        moves: book_line!["e2"-"e4", "e7"-"e6", "d2"-"d4", "d7"-"d5", "b1"-"c3", "g8"-"f6"],
    },
    Opening {
        name: "Caro-Kann Defense",
        moves: book_line!["e2"-"e4", "c7"-"c6", "d2"-"d4", "d7"-"d5", "b1"-"c3", "d5"-"e4", "c3"-"e4"],
    },
    Opening {
        name: "Queen's Gambit",
        moves: book_line!["d2"-"d4", "d7"-"d5", "c2"-"c4", "e7"-"e6", "b1"-"c3", "g8"-"f6"],
    },
    Opening {
        name: "King's Indian Defense",
        moves: book_line!["d2"-"d4", "g8"-"f6", "c2"-"c4", "g7"-"g6", "b1"-"c3", "f8"-"g7", "e2"-"e4", "d7"-"d6"],
    },
    Opening {
        name: "English Opening",
        moves: book_line!["c2"-"c4", "e7"-"e5", "b1"-"c3", "g8"-"f6", "g2"-"g3", "d7"-"d5"],
    },
];

#[derive(Debug, Clone, Copy)]
pub struct OpeningBook {
    openings: &'static [Opening],
    ply_limit: usize,
}

impl Default for OpeningBook {
    fn default() -> Self {
        Self::new(BOOK_PLY_LIMIT)
    }
}

impl OpeningBook {
    pub const fn new(ply_limit: usize) -> Self {
        Self {
            openings: OPENINGS,
            ply_limit,
        }
    }

    /// Next book move for Black. Only answers while fewer than `ply_limit`
    /// plies have been played and the history has odd length.
    pub fn get_book_move(&self, history: &[Move]) -> Option<(Position, Position)> {
        let ply = history.len();
        if ply >= self.ply_limit || ply % 2 == 0 {
            return None;
        }

        let (opening, next) = self.openings.iter().find_map(|opening| {
            let next = opening.moves.get(ply)?;
            opening.starts_with(history).then_some((opening, *next))
        })?;

        log::debug!("book move {}{} from {}", next.0, next.1, opening.name);
        Some(next)
    }

    /// Name of the opening the game is in, once exactly one book line still
    /// has moves left after everything played so far.
    pub fn current_opening(&self, history: &[Move]) -> Option<&'static Opening> {
        if history.is_empty() {
            return None;
        }

        let mut matching = self
            .openings
            .iter()
            .filter(|o| history.len() < o.moves.len() && o.starts_with(history));
        let first = matching.next()?;
        if matching.next().is_some() {
            return None;
        }
        Some(first)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::Board;

    fn play(moves: &[(&str, &str)]) -> Vec<Move> {
        let mut board = Board::new();
        let mut history = Vec::new();
        for (from, to) in moves {
            let from = Position::from_algebraic(from).unwrap();
            let to = Position::from_algebraic(to).unwrap();
            let piece = board.get_piece(from).unwrap();
            history.push(Move::new(from, to, piece, board.get_piece(to)));
            board = board.with_move(from, to);
        }
        history
    }

    #[test]
    fn test_book_lines_are_legal() {
        use crate::logic::generator::get_all_valid_moves;
        use crate::logic::board::Color;

        for opening in OPENINGS {
            let mut board = Board::new();
            let mut turn = Color::White;
            for &(from, to) in opening.moves {
                let legal = get_all_valid_moves(&board, turn);
                assert!(
                    legal.iter().any(|m| m.same_squares(from, to)),
                    "{}: {from}{to} is not legal",
                    opening.name
                );
                board = board.with_move(from, to);
                turn = turn.opposite();
            }
        }
    }

    #[test]
    fn test_book_answers_black_only() {
        let book = OpeningBook::default();
        assert_eq!(book.get_book_move(&[]), None);

        let history = play(&[("e2", "e4")]);
        let (from, to) = book.get_book_move(&history).unwrap();
        // Ruy Lopez is declared first
        assert_eq!((from.to_string(), to.to_string()), ("e7".into(), "e5".into()));

        let history = play(&[("e2", "e4"), ("e7", "e5")]);
        assert_eq!(book.get_book_move(&history), None);
    }

    #[test]
    fn test_first_declared_line_wins() {
        let book = OpeningBook::default();
        let history = play(&[("e2", "e4"), ("c7", "c5"), ("g1", "f3")]);
        let (from, to) = book.get_book_move(&history).unwrap();
        assert_eq!(from.to_string(), "d7");
        assert_eq!(to.to_string(), "d6");
    }

    #[test]
    fn test_out_of_book() {
        let book = OpeningBook::default();
        let history = play(&[("a2", "a3")]);
        assert_eq!(book.get_book_move(&history), None);
    }

    #[test]
    fn test_ply_limit() {
        let history = play(&[("e2", "e4")]);
        assert!(OpeningBook::new(1).get_book_move(&history).is_none());
        assert!(OpeningBook::new(2).get_book_move(&history).is_some());
    }

    #[test]
    fn test_current_opening_needs_unique_match() {
        let book = OpeningBook::default();
        assert!(book.current_opening(&[]).is_none());
        assert!(book.current_opening(&play(&[("e2", "e4")])).is_none());
        assert!(book
            .current_opening(&play(&[("e2", "e4"), ("e7", "e5")]))
            .is_none());

        let sicilian = play(&[("e2", "e4"), ("c7", "c5")]);
        assert_eq!(book.current_opening(&sicilian).unwrap().name, "Sicilian Defense");

        let ruy = play(&[
            ("e2", "e4"),
            ("e7", "e5"),
            ("g1", "f3"),
            ("b8", "c6"),
            ("f1", "b5"),
        ]);
        assert_eq!(book.current_opening(&ruy).unwrap().name, "Ruy Lopez");
    }

    #[test]
    fn test_current_opening_drops_completed_line() {
        let book = OpeningBook::default();
        let french = &OPENINGS[3];
        let line: Vec<(String, String)> = french
            .moves
            .iter()
            .map(|(f, t)| (f.to_string(), t.to_string()))
            .collect();
        let refs: Vec<(&str, &str)> = line.iter().map(|(f, t)| (f.as_str(), t.as_str())).collect();

        let almost = play(&refs[..refs.len() - 1]);
        assert_eq!(book.current_opening(&almost).unwrap().name, "French Defense");

        let complete = play(&refs);
        assert!(book.current_opening(&complete).is_none());
    }

    #[test]
    fn test_book_squares() {
        assert_eq!(sq("a8"), Position::new(0, 0).unwrap());
        assert_eq!(sq("e2"), Position::new(6, 4).unwrap());
        assert_eq!(sq("h1"), Position::new(7, 7).unwrap());
    }
}
