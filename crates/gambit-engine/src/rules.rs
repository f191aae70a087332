//! Terminal-state classification and draw thresholds.

use crate::position::FIFTY_MOVE_LIMIT;
use crate::Position;
use gambit_core::Color;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Where a game stands after the latest move.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum GameStatus {
    /// The side to move has at least one legal move and no draw applies.
    Active,
    /// The side to move is checkmated.
    Checkmate {
        #[serde(serialize_with = "serialize_color")]
        winner: Color,
    },
    /// The game is drawn.
    Draw { reason: DrawReason },
}

fn serialize_color<S: Serializer>(color: &Color, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(match color {
        Color::White => "white",
        Color::Black => "black",
    })
}

impl GameStatus {
    /// Returns true while moves may still be submitted.
    #[inline]
    pub const fn is_active(self) -> bool {
        matches!(self, GameStatus::Active)
    }
}

impl fmt::Display for GameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GameStatus::Active => write!(f, "active"),
            GameStatus::Checkmate { winner } => write!(f, "checkmate, {} wins", winner),
            GameStatus::Draw { reason } => write!(f, "draw by {}", reason),
        }
    }
}

/// Reason for a draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// Stalemate - no legal moves but not in check.
    Stalemate,
    /// 50-move rule (100 half-moves without pawn move or capture).
    FiftyMoveRule,
    /// Threefold repetition.
    ThreefoldRepetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DrawReason::Stalemate => write!(f, "stalemate"),
            DrawReason::FiftyMoveRule => write!(f, "fifty-move rule"),
            DrawReason::ThreefoldRepetition => write!(f, "threefold repetition"),
        }
    }
}

/// Thresholds for the automatic draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DrawRules {
    /// Half-moves without a pawn move or capture before the game is drawn.
    #[serde(default = "default_fifty_move_limit")]
    pub fifty_move_limit: u32,

    /// Occurrences of the same position, current one included, that draw.
    #[serde(default = "default_repetition_limit")]
    pub repetition_limit: usize,
}

fn default_fifty_move_limit() -> u32 {
    FIFTY_MOVE_LIMIT
}

fn default_repetition_limit() -> usize {
    3
}

impl Default for DrawRules {
    fn default() -> Self {
        DrawRules {
            fifty_move_limit: default_fifty_move_limit(),
            repetition_limit: default_repetition_limit(),
        }
    }
}

/// Classifies a position given how often its signature has occurred.
///
/// Checkmate and stalemate take precedence over both counters, so a mating
/// move that also reaches the fifty-move limit is still mate.
pub fn classify(position: &Position, repetitions: usize, rules: &DrawRules) -> GameStatus {
    if position.legal_moves().is_empty() {
        return if position.is_check() {
            GameStatus::Checkmate {
                winner: position.side_to_move().opposite(),
            }
        } else {
            GameStatus::Draw {
                reason: DrawReason::Stalemate,
            }
        };
    }

    if position.halfmove_clock() >= rules.fifty_move_limit {
        return GameStatus::Draw {
            reason: DrawReason::FiftyMoveRule,
        };
    }

    if repetitions >= rules.repetition_limit {
        return GameStatus::Draw {
            reason: DrawReason::ThreefoldRepetition,
        };
    }

    GameStatus::Active
}
