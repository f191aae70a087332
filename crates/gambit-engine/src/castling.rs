//! Castling rights.

use gambit_core::{Color, FenError, Wing};
use std::fmt;

/// Castling rights as a color × wing table packed into four flag bits.
///
/// Rights only ever get cleared within one game line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CastlingRights(u8);

impl CastlingRights {
    pub const NONE: CastlingRights = CastlingRights(0);
    pub const ALL: CastlingRights = CastlingRights(0b1111);

    /// State-string letters in the order they are written.
    const LETTERS: [(char, Color, Wing); 4] = [
        ('K', Color::White, Wing::Kingside),
        ('Q', Color::White, Wing::Queenside),
        ('k', Color::Black, Wing::Kingside),
        ('q', Color::Black, Wing::Queenside),
    ];

    #[inline]
    const fn flag(color: Color, wing: Wing) -> u8 {
        let wing_bit = match wing {
            Wing::Kingside => 0b01,
            Wing::Queenside => 0b10,
        };
        wing_bit << (2 * color.index())
    }

    /// Returns true if `color` may still castle towards `wing`.
    #[inline]
    pub const fn has(self, color: Color, wing: Wing) -> bool {
        (self.0 & Self::flag(color, wing)) != 0
    }

    /// Returns true if `color` holds either right.
    #[inline]
    pub const fn any(self, color: Color) -> bool {
        self.has(color, Wing::Kingside) || self.has(color, Wing::Queenside)
    }

    /// Grants a right. Only used while decoding a state string.
    #[inline]
    fn grant(&mut self, color: Color, wing: Wing) {
        self.0 |= Self::flag(color, wing);
    }

    /// Clears one wing's right for a color.
    #[inline]
    pub fn clear(&mut self, color: Color, wing: Wing) {
        self.0 &= !Self::flag(color, wing);
    }

    /// Clears both rights for a color.
    #[inline]
    pub fn clear_color(&mut self, color: Color) {
        self.clear(color, Wing::Kingside);
        self.clear(color, Wing::Queenside);
    }

    /// Decodes the castling field of a state string ("KQkq", "Kq", "-").
    pub fn from_fen_field(field: &str) -> Result<Self, FenError> {
        let mut rights = CastlingRights::NONE;
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            let (_, color, wing) = Self::LETTERS
                .into_iter()
                .find(|(letter, _, _)| *letter == c)
                .ok_or_else(|| FenError::InvalidCastlingRights(field.to_string()))?;
            rights.grant(color, wing);
        }
        Ok(rights)
    }
}

impl fmt::Display for CastlingRights {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0 == 0 {
            return write!(f, "-");
        }
        for (letter, color, wing) in Self::LETTERS {
            if self.has(color, wing) {
                write!(f, "{}", letter)?;
            }
        }
        Ok(())
    }
}
