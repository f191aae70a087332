//! Piece representation and movement geometry.

use crate::{Color, Square};

/// A `(rank_step, file_step)` pair describing one unit of movement.
pub type Step = (i8, i8);

const ORTHOGONAL: [Step; 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];
const DIAGONAL: [Step; 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ADJACENT: [Step; 8] = [
    (1, 0),
    (-1, 0),
    (0, 1),
    (0, -1),
    (1, 1),
    (1, -1),
    (-1, 1),
    (-1, -1),
];
const KNIGHT: [Step; 8] = [
    (2, 1),
    (2, -1),
    (-2, 1),
    (-2, -1),
    (1, 2),
    (1, -2),
    (-1, 2),
    (-1, -2),
];
const WHITE_PAWN_CAPTURES: [Step; 2] = [(1, -1), (1, 1)];
const BLACK_PAWN_CAPTURES: [Step; 2] = [(-1, -1), (-1, 1)];

/// The six kinds of pieces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum PieceKind {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl PieceKind {
    /// All piece kinds in order.
    pub const ALL: [PieceKind; 6] = [
        PieceKind::Pawn,
        PieceKind::Knight,
        PieceKind::Bishop,
        PieceKind::Rook,
        PieceKind::Queen,
        PieceKind::King,
    ];

    /// Returns the index of this piece kind (0-5).
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Returns the state-string letter for this kind with the given color.
    pub const fn to_fen_char(self, color: Color) -> char {
        let c = match self {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }

    /// Parses a state-string letter into a kind and color.
    pub const fn from_fen_char(c: char) -> Option<(PieceKind, Color)> {
        let color = if c.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match c.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some((kind, color))
    }

    /// Returns true if this is a sliding kind (bishop, rook, or queen).
    #[inline]
    pub const fn is_slider(self) -> bool {
        matches!(self, PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen)
    }

    /// Movement steps for every kind except the pawn.
    ///
    /// Sliders repeat a step until blocked; knights and kings take it once.
    /// Pawns return an empty slice since their geometry depends on color,
    /// see [`Piece::attack_steps`].
    #[inline]
    pub fn steps(self) -> &'static [Step] {
        match self {
            PieceKind::Pawn => &[],
            PieceKind::Knight => &KNIGHT,
            PieceKind::Bishop => &DIAGONAL,
            PieceKind::Rook => &ORTHOGONAL,
            PieceKind::Queen | PieceKind::King => &ADJACENT,
        }
    }
}

impl std::fmt::Display for PieceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            PieceKind::Pawn => "Pawn",
            PieceKind::Knight => "Knight",
            PieceKind::Bishop => "Bishop",
            PieceKind::Rook => "Rook",
            PieceKind::Queen => "Queen",
            PieceKind::King => "King",
        };
        write!(f, "{}", name)
    }
}

/// The four kinds a pawn may promote to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Promotion {
    Knight,
    Bishop,
    Rook,
    Queen,
}

impl Promotion {
    /// All promotion choices.
    pub const ALL: [Promotion; 4] = [
        Promotion::Queen,
        Promotion::Rook,
        Promotion::Bishop,
        Promotion::Knight,
    ];

    /// Returns the piece kind this promotion produces.
    #[inline]
    pub const fn kind(self) -> PieceKind {
        match self {
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Queen => PieceKind::Queen,
        }
    }

    /// Parses a promotion letter, in either case.
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'n' | 'N' => Some(Promotion::Knight),
            'b' | 'B' => Some(Promotion::Bishop),
            'r' | 'R' => Some(Promotion::Rook),
            'q' | 'Q' => Some(Promotion::Queen),
            _ => None,
        }
    }

    /// Returns the lowercase letter for this promotion.
    pub const fn to_char(self) -> char {
        match self {
            Promotion::Knight => 'n',
            Promotion::Bishop => 'b',
            Promotion::Rook => 'r',
            Promotion::Queen => 'q',
        }
    }
}

/// One of the two castling sides.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Wing {
    Queenside,
    Kingside,
}

impl Wing {
    /// Both wings, queenside first.
    pub const ALL: [Wing; 2] = [Wing::Queenside, Wing::Kingside];

    /// File step from the king towards this wing's rook.
    #[inline]
    pub const fn direction(self) -> i8 {
        match self {
            Wing::Queenside => -1,
            Wing::Kingside => 1,
        }
    }

    /// File the rook starts on.
    #[inline]
    pub const fn rook_file(self) -> u8 {
        match self {
            Wing::Queenside => 0,
            Wing::Kingside => 7,
        }
    }

    /// File the king lands on after castling.
    #[inline]
    pub const fn king_landing_file(self) -> u8 {
        match self {
            Wing::Queenside => 2,
            Wing::Kingside => 6,
        }
    }

    /// File the rook lands on after castling.
    #[inline]
    pub const fn rook_landing_file(self) -> u8 {
        match self {
            Wing::Queenside => 3,
            Wing::Kingside => 5,
        }
    }

    /// The untouched rook's square for the given color.
    #[inline]
    pub const fn rook_home(self, color: Color) -> Square {
        match Square::at(color.back_rank() as i8, self.rook_file() as i8) {
            Some(sq) => sq,
            None => unreachable!(),
        }
    }

    /// Returns the wing whose rook starts on `square` for `color`, if any.
    pub fn from_rook_home(square: Square, color: Color) -> Option<Self> {
        Wing::ALL
            .into_iter()
            .find(|wing| wing.rook_home(color) == square)
    }
}

/// The file every king starts on.
pub const KING_HOME_FILE: u8 = 4;

/// A piece standing on the board.
///
/// A piece only exists while it is placed; captured pieces are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
    pub square: Square,
}

impl Piece {
    /// Creates a piece standing on `square`.
    #[inline]
    pub const fn new(color: Color, kind: PieceKind, square: Square) -> Self {
        Piece {
            color,
            kind,
            square,
        }
    }

    #[inline]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    #[inline]
    pub const fn is_knight(&self) -> bool {
        matches!(self.kind, PieceKind::Knight)
    }

    #[inline]
    pub const fn is_bishop(&self) -> bool {
        matches!(self.kind, PieceKind::Bishop)
    }

    #[inline]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    #[inline]
    pub const fn is_queen(&self) -> bool {
        matches!(self.kind, PieceKind::Queen)
    }

    #[inline]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// Returns the state-string letter for this piece.
    #[inline]
    pub const fn fen_char(&self) -> char {
        self.kind.to_fen_char(self.color)
    }

    /// Steps along which this piece threatens other squares.
    ///
    /// Pawns threaten diagonally forward only; their pushes are not threats.
    #[inline]
    pub fn attack_steps(&self) -> &'static [Step] {
        match (self.kind, self.color) {
            (PieceKind::Pawn, Color::White) => &WHITE_PAWN_CAPTURES,
            (PieceKind::Pawn, Color::Black) => &BLACK_PAWN_CAPTURES,
            (kind, _) => kind.steps(),
        }
    }

    /// Returns true if this pawn still stands on its starting rank.
    #[inline]
    pub const fn is_on_pawn_rank(&self) -> bool {
        self.square.rank().index() == self.color.pawn_rank()
    }

    /// Changes a pawn into the promoted kind.
    ///
    /// Promoting anything other than a pawn is a caller bug.
    #[inline]
    pub fn promote(&mut self, to: Promotion) {
        debug_assert!(self.is_pawn(), "only pawns promote, got {}", self.kind);
        self.kind = to.kind();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{File, Rank};

    #[test]
    fn piece_to_fen() {
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::White), 'P');
        assert_eq!(PieceKind::Pawn.to_fen_char(Color::Black), 'p');
        assert_eq!(PieceKind::King.to_fen_char(Color::White), 'K');
        assert_eq!(PieceKind::Knight.to_fen_char(Color::Black), 'n');
    }

    #[test]
    fn piece_from_fen() {
        assert_eq!(
            PieceKind::from_fen_char('P'),
            Some((PieceKind::Pawn, Color::White))
        );
        assert_eq!(
            PieceKind::from_fen_char('p'),
            Some((PieceKind::Pawn, Color::Black))
        );
        assert_eq!(
            PieceKind::from_fen_char('K'),
            Some((PieceKind::King, Color::White))
        );
        assert_eq!(PieceKind::from_fen_char('x'), None);
    }

    #[test]
    fn is_slider() {
        assert!(!PieceKind::Pawn.is_slider());
        assert!(!PieceKind::Knight.is_slider());
        assert!(PieceKind::Bishop.is_slider());
        assert!(PieceKind::Rook.is_slider());
        assert!(PieceKind::Queen.is_slider());
        assert!(!PieceKind::King.is_slider());
    }

    #[test]
    fn step_counts() {
        assert_eq!(PieceKind::Knight.steps().len(), 8);
        assert_eq!(PieceKind::Bishop.steps().len(), 4);
        assert_eq!(PieceKind::Rook.steps().len(), 4);
        assert_eq!(PieceKind::Queen.steps().len(), 8);
        assert_eq!(PieceKind::King.steps().len(), 8);
        assert!(PieceKind::Pawn.steps().is_empty());
    }

    #[test]
    fn pawn_attack_steps_follow_color() {
        let e4 = Square::new(File::E, Rank::R4);
        let white = Piece::new(Color::White, PieceKind::Pawn, e4);
        let black = Piece::new(Color::Black, PieceKind::Pawn, e4);
        assert!(white.attack_steps().iter().all(|&(r, _)| r == 1));
        assert!(black.attack_steps().iter().all(|&(r, _)| r == -1));
    }

    #[test]
    fn kind_predicates() {
        let knight = Piece::new(Color::Black, PieceKind::Knight, Square::B8);
        assert!(knight.is_knight());
        assert!(!knight.is_pawn());
        assert!(!knight.is_king());
        assert_eq!(knight.fen_char(), 'n');
    }

    #[test]
    fn promote_pawn() {
        let mut pawn = Piece::new(Color::White, PieceKind::Pawn, Square::E8);
        pawn.promote(Promotion::Knight);
        assert!(pawn.is_knight());
        assert_eq!(pawn.color, Color::White);
    }

    #[test]
    fn pawn_rank() {
        let e2 = Square::new(File::E, Rank::R2);
        let e7 = Square::new(File::E, Rank::R7);
        assert!(Piece::new(Color::White, PieceKind::Pawn, e2).is_on_pawn_rank());
        assert!(!Piece::new(Color::Black, PieceKind::Pawn, e2).is_on_pawn_rank());
        assert!(Piece::new(Color::Black, PieceKind::Pawn, e7).is_on_pawn_rank());
    }

    #[test]
    fn promotion_letters() {
        assert_eq!(Promotion::from_char('Q'), Some(Promotion::Queen));
        assert_eq!(Promotion::from_char('n'), Some(Promotion::Knight));
        assert_eq!(Promotion::from_char('k'), None);
        assert_eq!(Promotion::Rook.to_char(), 'r');
        assert_eq!(Promotion::Bishop.kind(), PieceKind::Bishop);
    }

    #[test]
    fn wing_geometry() {
        assert_eq!(Wing::Kingside.rook_home(Color::White), Square::H1);
        assert_eq!(Wing::Queenside.rook_home(Color::Black), Square::A8);
        assert_eq!(
            Wing::from_rook_home(Square::A1, Color::White),
            Some(Wing::Queenside)
        );
        assert_eq!(Wing::from_rook_home(Square::A1, Color::Black), None);
        assert_eq!(Wing::Kingside.king_landing_file(), 6);
        assert_eq!(Wing::Queenside.rook_landing_file(), 3);
    }
}
