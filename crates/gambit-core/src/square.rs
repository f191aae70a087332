//! Board square addressing.
//!
//! Squares are the key type for every board lookup. Anything that could step
//! off the board returns `Option`, so the hot loops in move generation only
//! ever see validated squares.

use std::fmt;

/// A file (column) on the board, from A to H.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum File {
    A = 0,
    B = 1,
    C = 2,
    D = 3,
    E = 4,
    F = 5,
    G = 6,
    H = 7,
}

impl File {
    /// All files in order.
    pub const ALL: [File; 8] = [
        File::A,
        File::B,
        File::C,
        File::D,
        File::E,
        File::F,
        File::G,
        File::H,
    ];

    /// Creates a file from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a file from a lowercase character ('a'-'h').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'a'..='h' => Self::from_index(c as u8 - b'a'),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A rank (row) on the board, from 1 to 8.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Rank {
    R1 = 0,
    R2 = 1,
    R3 = 2,
    R4 = 3,
    R5 = 4,
    R6 = 5,
    R7 = 6,
    R8 = 7,
}

impl Rank {
    /// All ranks in order.
    pub const ALL: [Rank; 8] = [
        Rank::R1,
        Rank::R2,
        Rank::R3,
        Rank::R4,
        Rank::R5,
        Rank::R6,
        Rank::R7,
        Rank::R8,
    ];

    /// Creates a rank from index (0-7).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 8 {
            Some(Self::ALL[index as usize])
        } else {
            None
        }
    }

    /// Creates a rank from a character ('1'-'8').
    #[inline]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            '1'..='8' => Self::from_index(c as u8 - b'1'),
            _ => None,
        }
    }

    /// Returns the index (0-7).
    #[inline]
    pub const fn index(self) -> u8 {
        self as u8
    }

    /// Returns the character representation.
    #[inline]
    pub const fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A square on the board, indexed 0-63.
///
/// Squares are indexed in little-endian rank-file mapping:
/// - a1 = 0, b1 = 1, ..., h1 = 7
/// - a2 = 8, ..., h8 = 63
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Square(u8);

impl Square {
    /// Number of squares on the board.
    pub const COUNT: usize = 64;

    /// Creates a square from file and rank.
    #[inline]
    pub const fn new(file: File, rank: Rank) -> Self {
        Square(rank.index() * 8 + file.index())
    }

    /// Creates a square from rank and file indices, or `None` if either
    /// lies outside 0-7.
    #[inline]
    pub const fn at(rank: i8, file: i8) -> Option<Self> {
        if rank >= 0 && rank < 8 && file >= 0 && file < 8 {
            Some(Square(rank as u8 * 8 + file as u8))
        } else {
            None
        }
    }

    /// Creates a square from index (0-63).
    #[inline]
    pub const fn from_index(index: u8) -> Option<Self> {
        if index < 64 {
            Some(Square(index))
        } else {
            None
        }
    }

    /// Parses a square from algebraic notation (e.g., "e4").
    pub const fn from_algebraic(s: &str) -> Option<Self> {
        let bytes = s.as_bytes();
        if bytes.len() != 2 {
            return None;
        }
        let file = match File::from_char(bytes[0] as char) {
            Some(f) => f,
            None => return None,
        };
        let rank = match Rank::from_char(bytes[1] as char) {
            Some(r) => r,
            None => return None,
        };
        Some(Square::new(file, rank))
    }

    /// Returns the index (0-63).
    #[inline]
    pub const fn index(self) -> u8 {
        self.0
    }

    /// Returns the file of this square.
    #[inline]
    pub const fn file(self) -> File {
        File::ALL[(self.0 % 8) as usize]
    }

    /// Returns the rank of this square.
    #[inline]
    pub const fn rank(self) -> Rank {
        Rank::ALL[(self.0 / 8) as usize]
    }

    /// Returns the square `rank_step` ranks and `file_step` files away,
    /// or `None` if that falls off the board.
    #[inline]
    pub const fn offset(self, rank_step: i8, file_step: i8) -> Option<Self> {
        Square::at(
            self.rank().index() as i8 + rank_step,
            self.file().index() as i8 + file_step,
        )
    }

    /// Returns the squares reached by repeatedly stepping in one direction,
    /// excluding this square and stopping at the board edge.
    #[inline]
    pub const fn ray(self, rank_step: i8, file_step: i8) -> Ray {
        Ray {
            current: self,
            rank_step,
            file_step,
        }
    }

    /// Returns the algebraic notation for this square.
    pub fn to_algebraic(self) -> String {
        format!("{}{}", self.file(), self.rank())
    }

    /// Returns a 64-bit mask with only this square set.
    #[inline]
    pub const fn bitboard(self) -> u64 {
        1u64 << self.0
    }

    // Common squares
    pub const A1: Square = Square(0);
    pub const B1: Square = Square(1);
    pub const C1: Square = Square(2);
    pub const D1: Square = Square(3);
    pub const E1: Square = Square(4);
    pub const F1: Square = Square(5);
    pub const G1: Square = Square(6);
    pub const H1: Square = Square(7);
    pub const A8: Square = Square(56);
    pub const B8: Square = Square(57);
    pub const C8: Square = Square(58);
    pub const D8: Square = Square(59);
    pub const E8: Square = Square(60);
    pub const F8: Square = Square(61);
    pub const G8: Square = Square(62);
    pub const H8: Square = Square(63);
}

impl fmt::Debug for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Square({})", self.to_algebraic())
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_algebraic())
    }
}

/// Iterator over the squares along one direction from a start square.
///
/// Produced by [`Square::ray`]. Each call to `ray` starts a fresh walk.
#[derive(Debug, Clone)]
pub struct Ray {
    current: Square,
    rank_step: i8,
    file_step: i8,
}

impl Iterator for Ray {
    type Item = Square;

    #[inline]
    fn next(&mut self) -> Option<Square> {
        let next = self.current.offset(self.rank_step, self.file_step)?;
        self.current = next;
        Some(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn square_new() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.file(), File::E);
        assert_eq!(e4.rank(), Rank::R4);
        assert_eq!(e4.index(), 28);
    }

    #[test]
    fn square_at_bounds() {
        assert_eq!(Square::at(0, 0), Some(Square::A1));
        assert_eq!(Square::at(7, 7), Some(Square::H8));
        assert_eq!(Square::at(3, 4), Some(Square::new(File::E, Rank::R4)));
        assert_eq!(Square::at(-1, 0), None);
        assert_eq!(Square::at(0, 8), None);
        assert_eq!(Square::at(8, 3), None);
    }

    #[test]
    fn square_from_algebraic() {
        assert_eq!(Square::from_algebraic("a1"), Some(Square::A1));
        assert_eq!(
            Square::from_algebraic("e4"),
            Some(Square::new(File::E, Rank::R4))
        );
        assert_eq!(Square::from_algebraic("h8"), Some(Square::H8));
        assert_eq!(Square::from_algebraic("i1"), None);
        assert_eq!(Square::from_algebraic("a9"), None);
        assert_eq!(Square::from_algebraic("a0"), None);
        assert_eq!(Square::from_algebraic("E4"), None);
        assert_eq!(Square::from_algebraic("e44"), None);
        assert_eq!(Square::from_algebraic(""), None);
    }

    #[test]
    fn square_to_algebraic() {
        assert_eq!(Square::A1.to_algebraic(), "a1");
        assert_eq!(Square::H8.to_algebraic(), "h8");
        assert_eq!(Square::new(File::E, Rank::R4).to_algebraic(), "e4");
    }

    #[test]
    fn offset_neighbors() {
        let e4 = Square::new(File::E, Rank::R4);
        assert_eq!(e4.offset(1, 0), Some(Square::new(File::E, Rank::R5)));
        assert_eq!(e4.offset(-1, -1), Some(Square::new(File::D, Rank::R3)));
        assert_eq!(Square::H1.offset(0, 1), None);
        assert_eq!(Square::A8.offset(1, 0), None);
    }

    #[test]
    fn ray_stops_at_edge() {
        let squares: Vec<String> = Square::new(File::F, Rank::R6)
            .ray(1, 1)
            .map(Square::to_algebraic)
            .collect();
        assert_eq!(squares, vec!["g7", "h8"]);
        assert_eq!(Square::A1.ray(-1, 0).count(), 0);
        assert_eq!(Square::A1.ray(0, 1).count(), 7);
    }

    #[test]
    fn ray_is_restartable() {
        let d4 = Square::new(File::D, Rank::R4);
        let first: Vec<Square> = d4.ray(1, -1).collect();
        let second: Vec<Square> = d4.ray(1, -1).collect();
        assert_eq!(first, second);
        assert_eq!(first.len(), 3);
    }

    #[test]
    fn square_bitboard() {
        assert_eq!(Square::A1.bitboard(), 1);
        assert_eq!(Square::H1.bitboard(), 128);
        assert_eq!(Square::A8.bitboard(), 1 << 56);
    }

    proptest::proptest! {
        #[test]
        fn algebraic_roundtrip(rank in 0i8..8, file in 0i8..8) {
            let sq = Square::at(rank, file).unwrap();
            proptest::prop_assert_eq!(Square::from_algebraic(&sq.to_algebraic()), Some(sq));
            proptest::prop_assert_eq!(sq.rank().index() as i8, rank);
            proptest::prop_assert_eq!(sq.file().index() as i8, file);
        }

        #[test]
        fn offset_matches_bounds(rank in 0i8..8, file in 0i8..8, dr in -3i8..=3, df in -3i8..=3) {
            let sq = Square::at(rank, file).unwrap();
            let inside = (0..8).contains(&(rank + dr)) && (0..8).contains(&(file + df));
            proptest::prop_assert_eq!(sq.offset(dr, df).is_some(), inside);
        }
    }
}
