//! Candidate move representation and square-pair notation.

use crate::{Promotion, Square};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Errors produced when a square-pair token cannot be read.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid move notation '{0}': expected 4 or 5 characters")]
    InvalidLength(String),

    #[error("invalid square '{0}'")]
    InvalidSquare(String),

    #[error("invalid promotion letter '{0}': expected one of q, r, b, n")]
    InvalidPromotion(char),
}

/// A candidate move: source square, destination square, and an optional
/// promotion choice.
///
/// Moves carry no special-move flags. Castling, en passant, and double pushes
/// are recognized by the position that applies them.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<Promotion>,
}

impl Move {
    /// Creates a move with no promotion choice.
    #[inline]
    pub const fn new(from: Square, to: Square) -> Self {
        Move {
            from,
            to,
            promotion: None,
        }
    }

    /// Creates a move that promotes to the given kind if it reaches the far rank.
    #[inline]
    pub const fn with_promotion(from: Square, to: Square, promotion: Promotion) -> Self {
        Move {
            from,
            to,
            promotion: Some(promotion),
        }
    }

    /// Returns the source square.
    #[inline]
    pub const fn from(self) -> Square {
        self.from
    }

    /// Returns the destination square.
    #[inline]
    pub const fn to(self) -> Square {
        self.to
    }

    /// Returns the requested promotion, if any.
    #[inline]
    pub const fn promotion(self) -> Option<Promotion> {
        self.promotion
    }

    /// Returns the square-pair notation for this move (e.g., "e2e4", "e7e8q").
    pub fn to_uci(self) -> String {
        match self.promotion {
            Some(p) => format!("{}{}{}", self.from, self.to, p.to_char()),
            None => format!("{}{}", self.from, self.to),
        }
    }

    /// Parses a move from square-pair notation.
    ///
    /// The token is a source square, a destination square, and optionally a
    /// promotion letter. Malformed tokens are rejected before any square is
    /// interpreted.
    pub fn from_uci(s: &str) -> Result<Self, NotationError> {
        if !s.is_ascii() || s.len() < 4 || s.len() > 5 {
            return Err(NotationError::InvalidLength(s.to_string()));
        }
        let from = Square::from_algebraic(&s[0..2])
            .ok_or_else(|| NotationError::InvalidSquare(s[0..2].to_string()))?;
        let to = Square::from_algebraic(&s[2..4])
            .ok_or_else(|| NotationError::InvalidSquare(s[2..4].to_string()))?;
        match s[4..].chars().next() {
            Some(c) => {
                let promotion = Promotion::from_char(c).ok_or(NotationError::InvalidPromotion(c))?;
                Ok(Move::with_promotion(from, to, promotion))
            }
            None => Ok(Move::new(from, to)),
        }
    }

    /// A null move (placeholder, never legal).
    pub const NULL: Move = Move::new(Square::A1, Square::A1);
}

impl FromStr for Move {
    type Err = NotationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Move::from_uci(s)
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({})", self.to_uci())
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uci())
    }
}
