use crate::logic::eval_constants::{
    CHECK_BONUS, MATE_SCORE, VAL_BISHOP, VAL_KING, VAL_KNIGHT, VAL_PAWN, VAL_QUEEN, VAL_ROOK,
};
use crate::logic::board::PieceType;
use crate::logic::opening::BOOK_PLY_LIMIT;
use crate::logic::rules::RuleSet;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
    Grandmaster,
}

impl Difficulty {
    pub const ALL: [Self; 4] = [Self::Easy, Self::Medium, Self::Hard, Self::Grandmaster];

    /// Plies searched below each candidate move.
    pub const fn depth(self) -> u8 {
        match self {
            Self::Easy => 2,
            Self::Medium => 3,
            Self::Hard => 4,
            Self::Grandmaster => 5,
        }
    }

    /// Chance of playing a uniformly random legal move instead of searching.
    pub const fn random_factor(self) -> f64 {
        match self {
            Self::Easy => 0.30,
            Self::Medium => 0.15,
            Self::Hard => 0.05,
            Self::Grandmaster => 0.0,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Easy => "easy",
            Self::Medium => "medium",
            Self::Hard => "hard",
            Self::Grandmaster => "grandmaster",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown difficulty '{0}' (expected easy, medium, hard or grandmaster)")]
pub struct UnknownDifficulty(pub String);

impl FromStr for Difficulty {
    type Err = UnknownDifficulty;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| UnknownDifficulty(s.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    // Evaluation Parameters
    pub val_pawn: i32,
    pub val_knight: i32,
    pub val_bishop: i32,
    pub val_rook: i32,
    pub val_queen: i32,
    pub val_king: i32,
    pub check_bonus: i32,
    pub mate_score: i32,

    // Move selection
    pub book_ply_limit: usize,
    pub rules: RuleSet,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            val_pawn: VAL_PAWN,
            val_knight: VAL_KNIGHT,
            val_bishop: VAL_BISHOP,
            val_rook: VAL_ROOK,
            val_queen: VAL_QUEEN,
            val_king: VAL_KING,
            check_bonus: CHECK_BONUS,
            mate_score: MATE_SCORE,
            book_ply_limit: BOOK_PLY_LIMIT,
            rules: RuleSet::default(),
        }
    }
}

/// Tuning file format: piece values are multipliers over the defaults,
/// everything else is absolute.
#[derive(Deserialize)]
struct EngineConfigJson {
    val_pawn: Option<f32>,
    val_knight: Option<f32>,
    val_bishop: Option<f32>,
    val_rook: Option<f32>,
    val_queen: Option<f32>,
    val_king: Option<f32>,

    check_bonus: Option<i32>,
    mate_score: Option<i32>,
    book_ply_limit: Option<usize>,
    rules: Option<RuleSet>,
}

impl EngineConfig {
    pub fn load_from_json(json_str: &str) -> Result<Self, serde_json::Error> {
        let json_config: EngineConfigJson = serde_json::from_str(json_str)?;
        let default = Self::default();

        Ok(Self {
            val_pawn: apply_scale(default.val_pawn, json_config.val_pawn),
            val_knight: apply_scale(default.val_knight, json_config.val_knight),
            val_bishop: apply_scale(default.val_bishop, json_config.val_bishop),
            val_rook: apply_scale(default.val_rook, json_config.val_rook),
            val_queen: apply_scale(default.val_queen, json_config.val_queen),
            val_king: apply_scale(default.val_king, json_config.val_king),

            check_bonus: json_config.check_bonus.unwrap_or(default.check_bonus),
            mate_score: json_config.mate_score.unwrap_or(default.mate_score),
            book_ply_limit: json_config.book_ply_limit.unwrap_or(default.book_ply_limit),
            rules: json_config.rules.unwrap_or(default.rules),
        })
    }

    pub const fn piece_value(&self, pt: PieceType) -> i32 {
        match pt {
            PieceType::Pawn => self.val_pawn,
            PieceType::Knight => self.val_knight,
            PieceType::Bishop => self.val_bishop,
            PieceType::Rook => self.val_rook,
            PieceType::Queen => self.val_queen,
            PieceType::King => self.val_king,
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
fn apply_scale(default_val: i32, scale: Option<f32>) -> i32 {
    scale.map_or(default_val, |s| (default_val as f32 * s) as i32)
}
