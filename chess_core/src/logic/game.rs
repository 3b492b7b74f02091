use crate::logic::board::{Board, Color, Move, Position};
use crate::logic::generator::{GameStatus, MoveGenerator};
use crate::logic::notation::notate_with;
use crate::logic::opening::{Opening, OpeningBook};
use crate::logic::rules::{is_in_check, validate_move, MoveError, RuleSet};
use serde::{Deserialize, Serialize};

/// Cue handed to the sound dispatcher after an accepted move or a reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SoundCue {
    Move,
    Capture,
    Check,
    Checkmate,
    GameStart,
}

impl SoundCue {
    fn for_move(captured: bool, status: GameStatus) -> Self {
        match status {
            GameStatus::Checkmate => Self::Checkmate,
            GameStatus::Check => Self::Check,
            _ if captured => Self::Capture,
            _ => Self::Move,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    /// The history entry, notation attached.
    pub record: Move,
    pub status: GameStatus,
    pub sound: SoundCue,
}

/// Validates `mv` for the side owning `mv.piece` and returns the resulting
/// board. The input board is never modified.
pub fn apply_move(board: &Board, mv: &Move) -> Result<Board, MoveError> {
    checked_move(board, mv.from, mv.to, mv.piece.color, RuleSet::default())
}

fn checked_move(
    board: &Board,
    from: Position,
    to: Position,
    turn: Color,
    rules: RuleSet,
) -> Result<Board, MoveError> {
    let piece = board.get_piece(from).ok_or(MoveError::NoPieceAtSource)?;
    if piece.color != turn {
        return Err(MoveError::NotYourTurn);
    }

    validate_move(board, from, to, piece, rules)?;

    let next = board.with_move(from, to);
    if is_in_check(&next, turn) {
        return Err(MoveError::SelfCheck);
    }
    Ok(next)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub board: Board,
    pub turn: Color,
    pub status: GameStatus,
    pub history: Vec<Move>,
    #[serde(default)]
    pub rules: RuleSet,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    #[must_use]
    pub fn new() -> Self {
        Self {
            board: Board::new(),
            turn: Color::White,
            status: GameStatus::Playing,
            history: Vec::new(),
            rules: RuleSet::default(),
        }
    }

    /// Starts from an arbitrary position with an empty history.
    pub fn from_position(board: Board, turn: Color) -> Self {
        let mut game = Self {
            board,
            turn,
            status: GameStatus::Playing,
            history: Vec::new(),
            rules: RuleSet::default(),
        };
        game.update_status();
        game
    }

    #[must_use]
    pub fn with_rules(mut self, rules: RuleSet) -> Self {
        self.rules = rules;
        self.update_status();
        self
    }

    pub fn reset(&mut self) -> SoundCue {
        let rules = self.rules;
        *self = Self::new().with_rules(rules);
        log::info!("new game");
        SoundCue::GameStart
    }

    pub const fn generator(&self) -> MoveGenerator {
        MoveGenerator::new(self.rules)
    }

    pub fn legal_moves(&self) -> Vec<Move> {
        self.generator().generate_moves(&self.board, self.turn)
    }

    pub fn last_move(&self) -> Option<(Position, Position)> {
        self.history.last().map(|mv| (mv.from, mv.to))
    }

    pub fn ply(&self) -> usize {
        self.history.len()
    }

    pub fn current_opening(&self) -> Option<&'static Opening> {
        OpeningBook::default().current_opening(&self.history)
    }

    /// The side that delivered mate or outlasted the clock.
    pub fn winner(&self) -> Option<Color> {
        (self.status == GameStatus::Checkmate).then_some(self.turn.opposite())
    }

    pub fn make_move(&mut self, from: Position, to: Position) -> Result<MoveOutcome, MoveError> {
        if self.status.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let next_board = checked_move(&self.board, from, to, self.turn, self.rules).map_err(|e| {
            log::trace!("rejected {from}{to} for {}: {e}", self.turn);
            e
        })?;

        let piece = self.board.get_piece(from).ok_or(MoveError::NoPieceAtSource)?;
        let captured = self.board.get_piece(to);
        let generator = self.generator();

        let opponent = self.turn.opposite();
        let status = generator.status(&next_board, opponent);

        let mut record = Move::new(from, to, piece, captured);
        record.notation = Some(notate_with(
            &generator,
            &record,
            &self.board,
            matches!(status, GameStatus::Check | GameStatus::Checkmate),
            status == GameStatus::Checkmate,
        ));

        self.board = next_board;
        self.history.push(record.clone());
        self.turn = opponent;
        self.status = status;

        if status.is_terminal() {
            log::info!("game over after {} plies: {:?}", self.history.len(), status);
        }

        Ok(MoveOutcome {
            record,
            status,
            sound: SoundCue::for_move(captured.is_some(), status),
        })
    }

    fn update_status(&mut self) {
        self.status = self.generator().status(&self.board, self.turn);
    }

    pub fn undo_move(&mut self) -> bool {
        let Some(record) = self.history.pop() else {
            return false;
        };

        self.board.unmake_move(record.from, record.to, record.captured);
        self.turn = record.piece.color;
        self.update_status();
        true
    }

    /// Ends the game on time: `loser` is left to move in a lost position.
    /// Accepted in any state, including while the engine is thinking.
    pub fn force_time_forfeit(&mut self, loser: Color) {
        log::info!("{loser} ran out of time");
        self.turn = loser;
        self.status = GameStatus::Checkmate;
    }
}
