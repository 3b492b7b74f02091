use crate::logic::board::{Board, Move};
use crate::logic::game::GameState;
use serde::{Deserialize, Serialize};

pub mod config;
pub mod eval;
pub mod player;
pub mod search;


#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    pub depth: u8,
    pub nodes: u32,
    pub time_ms: u64,
    /// Score of the chosen move, positive favoring black.
    pub score: i32,
}

pub trait Evaluator {
    fn evaluate(&self, board: &Board) -> i32;
}

pub trait Searcher {
    /// Picks a move for the side to move in `game_state`, looking `depth`
    /// plies past each candidate. Root moves listed in `excluded_moves` are
    /// skipped.
    fn search(
        &mut self,
        game_state: &GameState,
        depth: u8,
        excluded_moves: &[Move],
    ) -> Option<(Move, SearchStats)>;
}
