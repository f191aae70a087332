//! Full game state: placement plus turn, rights, and clocks.

use crate::movegen::{self, IllegalMove, MoveList};
use crate::{Board, CastlingRights};
use gambit_core::{Color, FenError, FenParser, Move, Piece, PieceKind, Square};
use std::fmt;
use std::str::FromStr;

/// Half-moves without a pawn move or capture after which the game is drawn.
pub const FIFTY_MOVE_LIMIT: u32 = 100;

/// Complete chess position state.
///
/// A position is a value: [`Position::play`] returns a new one and leaves the
/// receiver untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    /// Piece placement.
    pub(crate) board: Board,

    /// The side to move.
    pub(crate) side_to_move: Color,

    /// Castling rights.
    pub(crate) castling: CastlingRights,

    /// En passant target square (if any).
    pub(crate) en_passant: Option<Square>,

    /// Halfmove clock for 50-move rule.
    pub(crate) halfmove_clock: u32,

    /// Fullmove number (starts at 1, increments after Black's move).
    pub(crate) fullmove_number: u32,
}

/// The part of a position that decides repetition.
///
/// Move counters are left out, so two positions reached at different points
/// of a game compare equal when the same moves are available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Signature {
    placement: [Option<(Color, PieceKind)>; Square::COUNT],
    side_to_move: Color,
    castling: CastlingRights,
    en_passant: Option<Square>,
}

impl Position {
    /// Creates the standard starting position.
    pub fn startpos() -> Self {
        Self::from_fen(FenParser::STARTPOS).expect("STARTPOS is valid")
    }

    /// Creates a position from a state string.
    pub fn from_fen(fen: &str) -> Result<Self, FenError> {
        let parsed = FenParser::parse(fen)?;
        Ok(Position {
            board: Board::from_placement_string(&parsed.piece_placement)?,
            side_to_move: parsed.active_color,
            castling: CastlingRights::from_fen_field(&parsed.castling)?,
            en_passant: parsed.en_passant,
            halfmove_clock: parsed.halfmove_clock,
            fullmove_number: parsed.fullmove_number,
        })
    }

    /// Converts the position to a state string.
    pub fn to_fen(&self) -> String {
        FenParser {
            piece_placement: self.board.to_placement_string(),
            active_color: self.side_to_move,
            castling: self.castling.to_string(),
            en_passant: self.en_passant,
            halfmove_clock: self.halfmove_clock,
            fullmove_number: self.fullmove_number,
        }
        .to_fen()
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn side_to_move(&self) -> Color {
        self.side_to_move
    }

    #[inline]
    pub fn castling(&self) -> CastlingRights {
        self.castling
    }

    #[inline]
    pub fn en_passant(&self) -> Option<Square> {
        self.en_passant
    }

    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmove_clock
    }

    #[inline]
    pub fn fullmove_number(&self) -> u32 {
        self.fullmove_number
    }

    /// Returns the piece at the given square, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.board.piece_at(sq)
    }

    /// Returns the square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.board.king_square(color)
    }

    /// All legal moves for the side to move.
    pub fn legal_moves(&self) -> MoveList {
        movegen::generate_moves(self)
    }

    /// Returns true if the move's source and destination form a legal pair.
    pub fn is_legal(&self, m: Move) -> bool {
        self.legal_moves().contains_pair(m.from(), m.to())
    }

    /// Plays a legal move and returns the resulting position.
    pub fn play(&self, m: Move) -> Result<Position, IllegalMove> {
        movegen::make_move(self, m)
    }

    /// Returns true if moving from `m.from()` to `m.to()` would carry a pawn
    /// onto its far rank.
    pub fn is_promotion(&self, m: Move) -> bool {
        self.board.piece_at(m.from()).is_some_and(|piece| {
            piece.is_pawn() && m.to().rank().index() == piece.color.promotion_rank()
        })
    }

    /// Returns true if the side to move is in check.
    pub fn is_check(&self) -> bool {
        self.board.is_in_check(self.side_to_move)
    }

    /// Returns true if the side to move is in check with no legal move.
    pub fn is_checkmate(&self) -> bool {
        self.is_check() && self.legal_moves().is_empty()
    }

    /// Returns true if the side to move is not in check but has no legal move.
    pub fn is_stalemate(&self) -> bool {
        !self.is_check() && self.legal_moves().is_empty()
    }

    /// Returns true once a hundred half-moves have passed without a pawn move
    /// or capture.
    pub fn is_fifty_move_draw(&self) -> bool {
        self.halfmove_clock >= FIFTY_MOVE_LIMIT
    }

    /// The repetition signature of this position.
    pub fn signature(&self) -> Signature {
        let mut placement = [None; Square::COUNT];
        for color in Color::ALL {
            for piece in self.board.pieces(color) {
                placement[piece.square.index() as usize] = Some((piece.color, piece.kind));
            }
        }
        Signature {
            placement,
            side_to_move: self.side_to_move,
            castling: self.castling,
            en_passant: self.en_passant,
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::startpos()
    }
}

impl FromStr for Position {
    type Err = FenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Position::from_fen(s)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_fen())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(position: &Position, token: &str) -> Position {
        position.play(Move::from_uci(token).unwrap()).unwrap()
    }

    #[test]
    fn startpos_fen() {
        let pos = Position::startpos();
        assert_eq!(pos.to_fen(), FenParser::STARTPOS);
        assert_eq!(pos.side_to_move(), Color::White);
        assert_eq!(pos.castling(), CastlingRights::ALL);
        assert_eq!(pos.king_square(Color::White), Some(Square::E1));
        assert_eq!(pos.king_square(Color::Black), Some(Square::E8));
    }

    #[test]
    fn fen_roundtrip() {
        let fens = [
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
            "rnbqkbnr/pp1ppppp/8/2p5/4P3/8/PPPP1PPP/RNBQKBNR w KQkq c6 0 2",
            "4k3/8/8/8/8/8/8/4K3 b - - 57 80",
        ];
        for fen in fens {
            let pos: Position = fen.parse().unwrap();
            assert_eq!(pos.to_string(), fen);
        }
    }

    #[test]
    fn from_fen_rejects_garbage() {
        assert!(Position::from_fen("").is_err());
        assert!(matches!(
            Position::from_fen("4k3/8/8/8/8/8/8/4K3 w KQx - 0 1"),
            Err(FenError::InvalidCastlingRights(_))
        ));
        assert!(matches!(
            Position::from_fen("8/8/8/8/8/8/8/4K3 w - - 0 1"),
            Err(FenError::InvalidKingCount(_))
        ));
    }

    #[test]
    fn from_fen_rejects_impossible_en_passant_target() {
        // e3 with White to move, and no black pawn on e4 either.
        let stale = "4k3/8/8/8/8/8/3PR3/4K3 w - e3 0 1";
        assert!(matches!(
            Position::from_fen(stale),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
        let no_pawn = "4k3/8/8/8/8/8/3PR3/4K3 b - e3 0 1";
        assert!(matches!(
            Position::from_fen(no_pawn),
            Err(FenError::InvalidEnPassantSquare(_))
        ));
    }

    #[test]
    fn check_and_mate() {
        let mate = Position::from_fen("7k/6Q1/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(mate.is_check());
        assert!(mate.is_checkmate());
        assert!(!mate.is_stalemate());

        let check = Position::from_fen("7k/8/6K1/8/8/8/8/6Q1 b - - 0 1").unwrap();
        assert!(!check.is_check());
    }

    #[test]
    fn stalemate() {
        let pos = Position::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").unwrap();
        assert!(!pos.is_check());
        assert!(pos.is_stalemate());
        assert!(!pos.is_checkmate());
    }

    #[test]
    fn fifty_move_threshold() {
        let at_99 = Position::from_fen("4k3/8/8/8/8/8/8/4K2R w - - 99 80").unwrap();
        assert!(!at_99.is_fifty_move_draw());
        let at_100 = play(&at_99, "h1h2");
        assert_eq!(at_100.halfmove_clock(), 100);
        assert!(at_100.is_fifty_move_draw());
    }

    #[test]
    fn is_promotion_checks_pawn_and_rank() {
        let pos = Position::from_fen("k7/4P3/8/8/8/8/4P3/4K3 w - - 0 1").unwrap();
        assert!(pos.is_promotion(Move::from_uci("e7e8").unwrap()));
        assert!(!pos.is_promotion(Move::from_uci("e2e3").unwrap()));
        assert!(!pos.is_promotion(Move::from_uci("e1d1").unwrap()));
    }

    #[test]
    fn signature_ignores_clocks() {
        let a = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 0 1").unwrap();
        let b = Position::from_fen("4k3/8/8/8/8/8/8/4K3 w - - 12 30").unwrap();
        let c = Position::from_fen("4k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_eq!(a.signature(), b.signature());
        assert_ne!(a.signature(), c.signature());
    }

    #[test]
    fn signature_tracks_rights_and_en_passant() {
        let with = Position::from_fen("r3k3/8/8/8/8/8/8/4K3 b q - 0 1").unwrap();
        let without = Position::from_fen("r3k3/8/8/8/8/8/8/4K3 b - - 0 1").unwrap();
        assert_ne!(with.signature(), without.signature());

        let after_push = play(&Position::startpos(), "e2e4");
        let no_ep = Position::from_fen(&after_push.to_fen().replace(" e3 ", " - ")).unwrap();
        assert_ne!(after_push.signature(), no_ep.signature());
    }

    #[test]
    fn play_is_pure() {
        let pos = Position::startpos();
        let next = play(&pos, "g1f3");
        assert_eq!(pos, Position::startpos());
        assert_ne!(next, pos);
        assert!(pos.is_legal(Move::from_uci("g1f3").unwrap()));
        assert!(!next.is_legal(Move::from_uci("g1f3").unwrap()));
    }
}
