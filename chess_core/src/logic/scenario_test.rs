use crate::logic::board::{Board, Color, Piece, PieceType, Position};
use crate::logic::game::GameState;
use crate::logic::generator::GameStatus;
use crate::logic::rules::MoveError;

fn m(s: &str) -> Position {
    Position::from_algebraic(s).unwrap()
}

fn game(fen: &str) -> GameState {
    let (board, turn) = Board::from_fen(fen).unwrap();
    GameState::from_position(board, turn)
}

#[test]
fn test_repetition_never_ends_the_game() {
    let mut game = GameState::new();

    for _ in 0..4 {
        assert!(game.make_move(m("g1"), m("f3")).is_ok());
        assert!(game.make_move(m("g8"), m("f6")).is_ok());
        assert!(game.make_move(m("f3"), m("g1")).is_ok());
        assert!(game.make_move(m("f6"), m("g8")).is_ok());
    }

    assert_eq!(game.board, Board::new());
    assert_eq!(game.status, GameStatus::Playing);
    assert_eq!(game.history.len(), 16);
}

#[test]
fn test_castling_is_not_a_legal_move() {
    let mut game = game("r3k2r/8/8/8/8/8/8/R3K2R w");
    assert_eq!(
        game.make_move(m("e1"), m("g1")),
        Err(MoveError::InvalidMovePattern)
    );
    assert_eq!(
        game.make_move(m("e1"), m("c1")),
        Err(MoveError::InvalidMovePattern)
    );
}

#[test]
fn test_en_passant_is_not_available() {
    let mut game = game("4k3/3p4/8/4P3/8/8/8/4K3 b");
    game.make_move(m("d7"), m("d5")).unwrap();
    assert_eq!(
        game.make_move(m("e5"), m("d6")),
        Err(MoveError::InvalidMovePattern)
    );
}

#[test]
fn test_pawn_on_last_rank_stays_a_pawn() {
    let mut game = game("4k3/P7/8/8/8/8/8/4K3 w");
    let outcome = game.make_move(m("a7"), m("a8")).unwrap();
    assert_eq!(outcome.record.notation.as_deref(), Some("a8"));
    assert_eq!(
        game.board.get_piece(m("a8")),
        Some(Piece::new(PieceType::Pawn, Color::White))
    );

    // A pawn on the far rank has nowhere to go
    game.make_move(m("e8"), m("d8")).unwrap();
    assert!(game.legal_moves().iter().all(|mv| mv.from != m("a8")));
}

#[test]
fn test_pawn_double_step_jumps_over_piece() {
    // Known permissiveness of the default rules
    let mut game = game("4k3/8/8/8/8/4b3/4P3/4K3 w");
    let outcome = game.make_move(m("e2"), m("e4")).unwrap();
    assert_eq!(outcome.record.notation.as_deref(), Some("e4"));
}

#[test]
fn test_pawn_double_step_blocked_with_strict_rules() {
    use crate::logic::rules::{PawnDoubleStep, RuleSet};

    let rules = RuleSet {
        pawn_double_step: PawnDoubleStep::Blockable,
    };
    let mut game = game("4k3/8/8/8/8/4b3/4P3/4K3 w").with_rules(rules);
    assert_eq!(
        game.make_move(m("e2"), m("e4")),
        Err(MoveError::BlockedPath)
    );
}

#[test]
fn test_stalemate_by_move() {
    let mut game = game("7k/8/5QK1/8/8/8/8/8 w");
    let outcome = game.make_move(m("f6"), m("f7")).unwrap();
    assert_eq!(outcome.status, GameStatus::Stalemate);
    assert_eq!(game.winner(), None);
    assert_eq!(
        game.make_move(m("h8"), m("h7")),
        Err(MoveError::GameOver)
    );
}
