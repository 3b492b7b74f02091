use crate::engine::config::EngineConfig;
use crate::engine::eval::SimpleEvaluator;
use crate::engine::{Evaluator, SearchStats, Searcher};
use crate::logic::board::{Board, Color, Move};
use crate::logic::game::GameState;
use crate::logic::generator::MoveGenerator;
use crate::logic::rules::is_in_check;
use std::sync::Arc;
use std::time::Instant;

/// Larger than any evaluation, including mate scores.
pub const INFINITY: i32 = 1_000_000;

/// Plain depth-limited minimax with alpha-beta cutoffs. Black maximizes,
/// White minimizes. Moves are tried in generation order.
pub struct AlphaBetaEngine {
    config: Arc<EngineConfig>,
    evaluator: SimpleEvaluator,
    generator: MoveGenerator,
    nodes_searched: u32,
}

impl AlphaBetaEngine {
    pub fn new(config: Arc<EngineConfig>) -> Self {
        Self {
            evaluator: SimpleEvaluator::new(config.clone()),
            generator: MoveGenerator::new(config.rules),
            config,
            nodes_searched: 0,
        }
    }

    pub const fn nodes_searched(&self) -> u32 {
        self.nodes_searched
    }

    /// Scores `board` `depth` plies deep. The board is borrowed mutably for
    /// make/unmake and is restored before returning.
    pub fn minimax(
        &mut self,
        board: &mut Board,
        depth: u8,
        maximizing: bool,
        mut alpha: i32,
        mut beta: i32,
    ) -> i32 {
        self.nodes_searched += 1;

        if depth == 0 {
            return self.evaluator.evaluate(board);
        }

        let color = if maximizing { Color::Black } else { Color::White };
        let moves = self.generator.generate_moves(board, color);

        if moves.is_empty() {
            if is_in_check(board, color) {
                return if maximizing {
                    -self.config.mate_score
                } else {
                    self.config.mate_score
                };
            }
            // Stalemate
            return 0;
        }

        if maximizing {
            let mut best = -INFINITY;
            for mv in &moves {
                let captured = board.make_move(mv.from, mv.to);
                let score = self.minimax(board, depth - 1, false, alpha, beta);
                board.unmake_move(mv.from, mv.to, captured);

                best = best.max(score);
                alpha = alpha.max(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        } else {
            let mut best = INFINITY;
            for mv in &moves {
                let captured = board.make_move(mv.from, mv.to);
                let score = self.minimax(board, depth - 1, true, alpha, beta);
                board.unmake_move(mv.from, mv.to, captured);

                best = best.min(score);
                beta = beta.min(score);
                if beta <= alpha {
                    break;
                }
            }
            best
        }
    }
}

impl Searcher for AlphaBetaEngine {
    fn search(
        &mut self,
        game_state: &GameState,
        depth: u8,
        excluded_moves: &[Move],
    ) -> Option<(Move, SearchStats)> {
        self.nodes_searched = 0;
        let start = Instant::now();

        let turn = game_state.turn;
        let mut board = game_state.board.clone();

        let mut moves = self.generator.generate_moves(&board, turn);
        if !excluded_moves.is_empty() {
            moves.retain(|m| !excluded_moves.iter().any(|ex| m.same_squares(ex.from, ex.to)));
        }

        // Each reply is searched with the opponent to move
        let reply_maximizing = turn.opposite() == Color::Black;
        let mut best: Option<(Move, i32)> = None;

        for mv in moves {
            let captured = board.make_move(mv.from, mv.to);
            let score = self.minimax(&mut board, depth, reply_maximizing, -INFINITY, INFINITY);
            board.unmake_move(mv.from, mv.to, captured);

            let improves = best.as_ref().map_or(true, |&(_, best_score)| match turn {
                Color::Black => score > best_score,
                Color::White => score < best_score,
            });
            if improves {
                best = Some((mv, score));
            }
        }

        let (mv, score) = best?;
        #[allow(clippy::cast_possible_truncation)]
        let stats = SearchStats {
            depth,
            nodes: self.nodes_searched,
            time_ms: start.elapsed().as_millis() as u64,
            score,
        };
        log::debug!(
            "{turn} {}{} score {score} depth {depth} nodes {} in {}ms",
            mv.from,
            mv.to,
            stats.nodes,
            stats.time_ms
        );
        Some((mv, stats))
    }
}
