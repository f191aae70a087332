//! State-string (FEN) tokenization and validation.
//!
//! The state string has six whitespace-separated fields: placement, side to
//! move, castling rights, en-passant target, halfmove clock, fullmove number.
//! This module checks every field and hands typed tokens to the engine, which
//! builds its board from [`FenParser::placement_pieces`].

use crate::{Color, Piece, PieceKind, Rank, Square};
use thiserror::Error;

/// Errors that can occur when parsing state strings.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FenError {
    #[error("invalid FEN: expected 6 parts, got {0}")]
    InvalidPartCount(usize),

    #[error("invalid piece placement: {0}")]
    InvalidPiecePlacement(String),

    #[error("invalid king count: {0}")]
    InvalidKingCount(String),

    #[error("invalid active color: expected 'w' or 'b', got '{0}'")]
    InvalidActiveColor(String),

    #[error("invalid castling rights: {0}")]
    InvalidCastlingRights(String),

    #[error("invalid en passant square: {0}")]
    InvalidEnPassantSquare(String),

    #[error("invalid halfmove clock: {0}")]
    InvalidHalfmoveClock(String),

    #[error("invalid fullmove number: {0}")]
    InvalidFullmoveNumber(String),
}

/// Validated state-string fields.
///
/// Holds each field in typed form. The placement stays textual; the engine
/// turns it into a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FenParser {
    /// Piece placement (e.g., "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR").
    pub piece_placement: String,
    /// Side to move.
    pub active_color: Color,
    /// Castling availability (e.g., "KQkq", "-").
    pub castling: String,
    /// En passant target square.
    pub en_passant: Option<Square>,
    /// Half-moves since the last pawn move or capture.
    pub halfmove_clock: u32,
    /// Fullmove number, starting at 1.
    pub fullmove_number: u32,
}

impl FenParser {
    /// The standard starting position.
    pub const STARTPOS: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    /// Parses a state string.
    pub fn parse(fen: &str) -> Result<Self, FenError> {
        let parts: Vec<&str> = fen.split_whitespace().collect();

        if parts.len() != 6 {
            return Err(FenError::InvalidPartCount(parts.len()));
        }

        let piece_placement = parts[0];
        let pieces = Self::placement_pieces(piece_placement)?;

        let active_color = match parts[1].chars().collect::<Vec<_>>().as_slice() {
            [c] => Color::from_letter(*c),
            _ => None,
        }
        .ok_or_else(|| FenError::InvalidActiveColor(parts[1].to_string()))?;

        let castling = parts[2];
        Self::validate_castling(castling)?;

        let en_passant = Self::parse_en_passant(parts[3], active_color, &pieces)?;

        let halfmove_clock = parts[4]
            .parse::<u32>()
            .map_err(|_| FenError::InvalidHalfmoveClock(parts[4].to_string()))?;

        let fullmove_number = parts[5]
            .parse::<u32>()
            .ok()
            .filter(|&n| n > 0)
            .ok_or_else(|| FenError::InvalidFullmoveNumber(parts[5].to_string()))?;

        Ok(FenParser {
            piece_placement: piece_placement.to_string(),
            active_color,
            castling: castling.to_string(),
            en_passant,
            halfmove_clock,
            fullmove_number,
        })
    }

    /// Decodes a placement field into the pieces it lists, from a8 towards h1.
    ///
    /// Requires eight ranks of eight squares and exactly one king per color.
    pub fn placement_pieces(placement: &str) -> Result<Vec<Piece>, FenError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(FenError::InvalidPiecePlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut pieces = Vec::with_capacity(32);
        let mut kings = [0usize; 2];
        for (i, rank_str) in ranks.iter().enumerate() {
            let rank = 7 - i as i8;
            let mut file = 0i8;
            for c in rank_str.chars() {
                if let Some(run @ 1..=8) = c.to_digit(10) {
                    file += run as i8;
                } else if let Some((kind, color)) = PieceKind::from_fen_char(c) {
                    let sq = Square::at(rank, file).ok_or_else(|| {
                        FenError::InvalidPiecePlacement(format!("rank {} overflows", rank + 1))
                    })?;
                    if kind == PieceKind::King {
                        kings[color.index()] += 1;
                    }
                    pieces.push(Piece::new(color, kind, sq));
                    file += 1;
                } else {
                    return Err(FenError::InvalidPiecePlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(FenError::InvalidPiecePlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }

        for color in Color::ALL {
            if kings[color.index()] != 1 {
                return Err(FenError::InvalidKingCount(format!(
                    "{} has {} kings, expected 1",
                    color,
                    kings[color.index()]
                )));
            }
        }

        Ok(pieces)
    }

    fn validate_castling(castling: &str) -> Result<(), FenError> {
        if castling == "-" {
            return Ok(());
        }

        let mut seen = String::new();
        for c in castling.chars() {
            if !"KQkq".contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "invalid character '{}'",
                    c
                )));
            }
            if seen.contains(c) {
                return Err(FenError::InvalidCastlingRights(format!(
                    "duplicate character '{}'",
                    c
                )));
            }
            seen.push(c);
        }

        Ok(())
    }

    /// The target is the empty square an enemy pawn just skipped over, so it
    /// lies on rank 6 with White to move or rank 3 with Black to move, and
    /// that pawn stands one rank further on.
    fn parse_en_passant(
        ep: &str,
        active_color: Color,
        pieces: &[Piece],
    ) -> Result<Option<Square>, FenError> {
        if ep == "-" {
            return Ok(None);
        }

        let invalid = || FenError::InvalidEnPassantSquare(ep.to_string());
        let target = Square::from_algebraic(ep).ok_or_else(invalid)?;
        let expected_rank = match active_color {
            Color::White => Rank::R6,
            Color::Black => Rank::R3,
        };
        if target.rank() != expected_rank {
            return Err(invalid());
        }

        let them = active_color.opposite();
        let pawn_square = target.offset(them.pawn_direction(), 0).ok_or_else(invalid)?;
        let occupied = pieces.iter().any(|p| p.square == target);
        let pawn_behind = pieces
            .iter()
            .any(|p| p.square == pawn_square && p.color == them && p.kind == PieceKind::Pawn);
        if occupied || !pawn_behind {
            return Err(invalid());
        }
        Ok(Some(target))
    }

    /// Converts the parsed fields back to a state string.
    pub fn to_fen(&self) -> String {
        format!(
            "{} {} {} {} {} {}",
            self.piece_placement,
            self.active_color.letter(),
            self.castling,
            self.en_passant
                .map_or_else(|| "-".to_string(), Square::to_algebraic),
            self.halfmove_clock,
            self.fullmove_number
        )
    }
}
