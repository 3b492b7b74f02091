//! Move selection for the computer-controlled side.

use crate::engine::config::{Difficulty, EngineConfig};
use crate::engine::search::AlphaBetaEngine;
use crate::engine::Searcher;
use crate::logic::board::Move;
use crate::logic::game::GameState;
use crate::logic::opening::OpeningBook;
use rand::seq::SliceRandom;
use rand::Rng;
use std::sync::Arc;

/// Where a chosen move came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveSource {
    Book,
    Random,
    Search,
}

pub struct ComputerPlayer<R: Rng> {
    engine: AlphaBetaEngine,
    book: OpeningBook,
    difficulty: Difficulty,
    depth: u8,
    rng: R,
}

impl<R: Rng> ComputerPlayer<R> {
    pub fn new(config: Arc<EngineConfig>, difficulty: Difficulty, rng: R) -> Self {
        Self {
            book: OpeningBook::new(config.book_ply_limit),
            engine: AlphaBetaEngine::new(config),
            difficulty,
            depth: difficulty.depth(),
            rng,
        }
    }

    /// Overrides the difficulty's search depth, keeping its random factor.
    #[must_use]
    pub const fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn choose_move(&mut self, game: &GameState) -> Option<Move> {
        self.choose_move_with_source(game).map(|(mv, _)| mv)
    }

    /// Book first, then a dice roll against the difficulty's random factor,
    /// then a full search.
    pub fn choose_move_with_source(&mut self, game: &GameState) -> Option<(Move, MoveSource)> {
        if game.status.is_terminal() {
            return None;
        }

        let legal = game.legal_moves();
        if legal.is_empty() {
            return None;
        }

        if let Some((from, to)) = self.book.get_book_move(&game.history) {
            if let Some(mv) = legal.iter().find(|m| m.same_squares(from, to)) {
                return Some((mv.clone(), MoveSource::Book));
            }
            log::warn!("book move {from}{to} is not legal here, ignoring it");
        }

        if self.rng.gen_bool(self.difficulty.random_factor()) {
            let mv = legal.choose(&mut self.rng)?.clone();
            log::debug!("{} plays random move {}{}", self.difficulty, mv.from, mv.to);
            return Some((mv, MoveSource::Random));
        }

        let (mv, _) = self.engine.search(game, self.depth, &[])?;
        Some((mv, MoveSource::Search))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logic::board::{Board, Position};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn pos(s: &str) -> Position {
        Position::from_algebraic(s).unwrap()
    }

    fn player(difficulty: Difficulty, seed: u64) -> ComputerPlayer<StdRng> {
        ComputerPlayer::new(
            Arc::new(EngineConfig::default()),
            difficulty,
            StdRng::seed_from_u64(seed),
        )
    }

    #[test]
    fn test_book_reply_to_e4() {
        let mut game = GameState::new();
        game.make_move(pos("e2"), pos("e4")).unwrap();

        let (mv, source) = player(Difficulty::Easy, 1)
            .choose_move_with_source(&game)
            .unwrap();
        assert_eq!(source, MoveSource::Book);
        assert!(mv.same_squares(pos("e7"), pos("e5")));
    }

    #[test]
    fn test_grandmaster_never_randomizes() {
        let (board, turn) = Board::from_fen("4k3/8/8/3r4/8/8/3Q4/7K b").unwrap();
        let game = GameState::from_position(board, turn);

        for seed in 0..8 {
            let (mv, source) = player(Difficulty::Grandmaster, seed)
                .with_depth(1)
                .choose_move_with_source(&game)
                .unwrap();
            assert_eq!(source, MoveSource::Search);
            assert!(mv.same_squares(pos("d5"), pos("d2")));
        }
    }

    #[test]
    fn test_easy_sometimes_plays_random() {
        let (board, turn) = Board::from_fen("4k3/8/8/3r4/8/8/3Q4/7K b").unwrap();
        let game = GameState::from_position(board, turn);

        let mut player = player(Difficulty::Easy, 7).with_depth(1);
        let sources: Vec<MoveSource> = (0..40)
            .filter_map(|_| player.choose_move_with_source(&game))
            .map(|(_, source)| source)
            .collect();

        assert_eq!(sources.len(), 40);
        assert!(sources.contains(&MoveSource::Random));
        assert!(sources.contains(&MoveSource::Search));
    }

    #[test]
    fn test_no_move_when_game_over() {
        let (board, turn) =
            Board::from_fen("rnb1kbnr/pppp1ppp/8/4p3/6Pq/5P2/PPPPP2P/RNBQKBNR w").unwrap();
        let game = GameState::from_position(board, turn);
        assert!(player(Difficulty::Hard, 0).choose_move(&game).is_none());
    }
}
