use crate::engine::config::EngineConfig;
use crate::engine::Evaluator;
use crate::logic::board::{Board, Color};
use crate::logic::eval_constants::get_pst_value;
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::is_in_check;
use std::sync::Arc;

/// Material plus pawn/knight placement, scored from Black's point of view.
pub struct SimpleEvaluator {
    config: Arc<EngineConfig>,
    generator: MoveGenerator,
}

impl SimpleEvaluator {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        let generator = MoveGenerator::new(config.rules);
        Self { config, generator }
    }

    fn material_and_position(&self, board: &Board) -> i32 {
        board
            .pieces()
            .map(|(pos, piece)| {
                let value = self.config.piece_value(piece.piece_type)
                    + get_pst_value(piece.piece_type, piece.color, pos);
                match piece.color {
                    Color::Black => value,
                    Color::White => -value,
                }
            })
            .sum()
    }
}

impl Evaluator for SimpleEvaluator {
    fn evaluate(&self, board: &Board) -> i32 {
        let white_in_check = is_in_check(board, Color::White);
        let black_in_check = is_in_check(board, Color::Black);

        // Mate outranks everything else on the board
        if white_in_check && !self.generator.has_legal_moves(board, Color::White) {
            return self.config.mate_score;
        }
        if black_in_check && !self.generator.has_legal_moves(board, Color::Black) {
            return -self.config.mate_score;
        }

        let mut score = self.material_and_position(board);
        if white_in_check {
            score += self.config.check_bonus;
        }
        if black_in_check {
            score -= self.config.check_bonus;
        }
        score
    }
}

/// Scores `board` with the default configuration.
pub fn evaluate_board(board: &Board) -> i32 {
    SimpleEvaluator::new(Arc::new(EngineConfig::default())).evaluate(board)
}
