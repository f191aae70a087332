//! Piece placement and the attack model.
//!
//! [`Board`] maps squares to pieces and caches each side's king square. It
//! knows piece geometry and occupancy but nothing about whose turn it is;
//! [`Position`](crate::Position) layers game state on top of it.

use crate::{Bitboard, CastlingRights};
use gambit_core::{Color, FenError, FenParser, Piece, PieceKind, Square, Wing, KING_HOME_FILE};

/// Square-to-piece map with cached king squares.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    squares: [Option<Piece>; Square::COUNT],
    kings: [Option<Square>; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::empty()
    }
}

impl Board {
    /// Creates a board with no pieces.
    pub const fn empty() -> Self {
        Board {
            squares: [None; Square::COUNT],
            kings: [None; 2],
        }
    }

    /// Returns the piece on `sq`, if any.
    #[inline]
    pub fn piece_at(&self, sq: Square) -> Option<Piece> {
        self.squares[sq.index() as usize]
    }

    /// Returns true if any piece stands on `sq`.
    #[inline]
    pub fn is_occupied(&self, sq: Square) -> bool {
        self.squares[sq.index() as usize].is_some()
    }

    /// Returns the square of `color`'s king.
    #[inline]
    pub fn king_square(&self, color: Color) -> Option<Square> {
        self.kings[color.index()]
    }

    /// Returns `color`'s king.
    #[inline]
    pub fn king(&self, color: Color) -> Option<Piece> {
        self.king_square(color).and_then(|sq| self.piece_at(sq))
    }

    /// Puts `piece` on `sq`, returning whatever stood there before.
    ///
    /// The piece's own square is updated to `sq`, and the king cache follows
    /// when the piece is a king.
    pub fn place(&mut self, sq: Square, mut piece: Piece) -> Option<Piece> {
        piece.square = sq;
        let displaced = self.squares[sq.index() as usize].replace(piece);
        if let Some(old) = displaced {
            self.forget_king(old, sq);
        }
        if piece.is_king() {
            self.kings[piece.color.index()] = Some(sq);
        }
        displaced
    }

    /// Takes the piece off `sq`, if any.
    pub fn remove(&mut self, sq: Square) -> Option<Piece> {
        let removed = self.squares[sq.index() as usize].take();
        if let Some(old) = removed {
            self.forget_king(old, sq);
        }
        removed
    }

    fn forget_king(&mut self, piece: Piece, sq: Square) {
        if piece.is_king() && self.kings[piece.color.index()] == Some(sq) {
            self.kings[piece.color.index()] = None;
        }
    }

    /// Iterates over `color`'s pieces from a1 towards h8.
    pub fn pieces(&self, color: Color) -> impl Iterator<Item = Piece> + '_ {
        self.squares
            .iter()
            .flatten()
            .filter(move |piece| piece.color == color)
            .copied()
    }

    /// Returns the squares holding `color`'s pieces.
    pub fn occupancy(&self, color: Color) -> Bitboard {
        self.pieces(color).map(|piece| piece.square).collect()
    }

    /// Squares `piece` threatens from where it stands.
    ///
    /// Sliders stop at the first occupied square, which is included whatever
    /// its color. Pawn pushes and castling are not threats and never appear.
    pub fn attacks(&self, piece: &Piece) -> Bitboard {
        let mut attacked = Bitboard::EMPTY;
        for &(rank_step, file_step) in piece.attack_steps() {
            if piece.kind.is_slider() {
                for sq in piece.square.ray(rank_step, file_step) {
                    attacked.set(sq);
                    if self.is_occupied(sq) {
                        break;
                    }
                }
            } else if let Some(sq) = piece.square.offset(rank_step, file_step) {
                attacked.set(sq);
            }
        }
        attacked
    }

    /// Union of the squares threatened by every piece of `by`.
    pub fn attacked_squares(&self, by: Color) -> Bitboard {
        self.pieces(by)
            .fold(Bitboard::EMPTY, |acc, piece| acc | self.attacks(&piece))
    }

    /// Returns true if `piece` threatens `target`.
    ///
    /// Pawns, knights and kings are checked by offset alone. Sliders walk the
    /// one ray that could reach `target` and stop at the first blocker.
    pub fn does_attack(&self, piece: &Piece, target: Square) -> bool {
        let rank_diff = target.rank().index() as i8 - piece.square.rank().index() as i8;
        let file_diff = target.file().index() as i8 - piece.square.file().index() as i8;

        match piece.kind {
            PieceKind::Pawn => {
                rank_diff == piece.color.pawn_direction() && file_diff.abs() == 1
            }
            PieceKind::Knight => (rank_diff * file_diff).abs() == 2,
            PieceKind::King => {
                rank_diff.abs() <= 1 && file_diff.abs() <= 1 && (rank_diff, file_diff) != (0, 0)
            }
            PieceKind::Bishop | PieceKind::Rook | PieceKind::Queen => {
                let aligned = rank_diff == 0 || file_diff == 0 || rank_diff.abs() == file_diff.abs();
                if !aligned || (rank_diff, file_diff) == (0, 0) {
                    return false;
                }
                let step = (rank_diff.signum(), file_diff.signum());
                if !piece.kind.steps().contains(&step) {
                    return false;
                }
                for sq in piece.square.ray(step.0, step.1) {
                    if sq == target {
                        return true;
                    }
                    if self.is_occupied(sq) {
                        return false;
                    }
                }
                false
            }
        }
    }

    /// Returns true if any piece of `by` threatens `sq`.
    pub fn is_attacked(&self, sq: Square, by: Color) -> bool {
        self.pieces(by).any(|piece| self.does_attack(&piece, sq))
    }

    /// Returns true if `color`'s king is threatened.
    pub fn is_in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some(king) => self.is_attacked(king, color.opposite()),
            None => {
                debug_assert!(false, "{} has no king", color);
                false
            }
        }
    }

    /// Destinations `piece` could move to, ignoring whether its own king
    /// would be left in check.
    ///
    /// Pawns push one square onto an empty square, two from their starting
    /// rank when both are empty, and capture diagonally onto an enemy piece
    /// or the en-passant target. Every other piece may go to any square it
    /// threatens that does not hold a friendly piece. Castling is produced
    /// separately by [`Board::castling_destinations`].
    pub fn pseudo_legal_destinations(&self, piece: &Piece, en_passant: Option<Square>) -> Bitboard {
        if !piece.is_pawn() {
            return self.attacks(piece) & !self.occupancy(piece.color);
        }

        let mut targets = Bitboard::EMPTY;
        let direction = piece.color.pawn_direction();
        if let Some(one) = piece.square.offset(direction, 0) {
            if !self.is_occupied(one) {
                targets.set(one);
                if piece.is_on_pawn_rank() {
                    if let Some(two) = one.offset(direction, 0) {
                        if !self.is_occupied(two) {
                            targets.set(two);
                        }
                    }
                }
            }
        }

        for sq in self.attacks(piece) {
            let enemy = self
                .piece_at(sq)
                .is_some_and(|other| other.color != piece.color);
            if enemy || self.en_passant_victim(piece, sq, en_passant).is_some() {
                targets.set(sq);
            }
        }
        targets
    }

    /// Returns the square of the pawn captured en passant, if moving `piece`
    /// to `to` is such a capture.
    ///
    /// The target must be empty with an enemy pawn beside the mover on the
    /// target's file.
    pub fn en_passant_victim(
        &self,
        piece: &Piece,
        to: Square,
        en_passant: Option<Square>,
    ) -> Option<Square> {
        if !piece.is_pawn() || Some(to) != en_passant || to.file() == piece.square.file() {
            return None;
        }
        if self.is_occupied(to) {
            return None;
        }
        let victim = Square::new(to.file(), piece.square.rank());
        self.piece_at(victim)
            .filter(|p| p.is_pawn() && p.color != piece.color)
            .map(|_| victim)
    }

    /// King landing squares for every wing `king` may castle towards.
    ///
    /// A wing qualifies when its right is held, king and rook stand on their
    /// home squares, every square between them is empty, and none of the
    /// king's start, transit, or landing squares is threatened. The rook's
    /// path only needs to be empty.
    pub fn castling_destinations(&self, king: &Piece, rights: CastlingRights) -> Bitboard {
        let mut targets = Bitboard::EMPTY;
        if !king.is_king() || !rights.any(king.color) {
            return targets;
        }

        let attacked = self.attacked_squares(king.color.opposite());
        for wing in Wing::ALL {
            if rights.has(king.color, wing) && self.can_castle(king, wing, attacked) {
                let landing = Square::at(
                    king.color.back_rank() as i8,
                    wing.king_landing_file() as i8,
                );
                if let Some(landing) = landing {
                    targets.set(landing);
                }
            }
        }
        targets
    }

    fn can_castle(&self, king: &Piece, wing: Wing, attacked: Bitboard) -> bool {
        let home = Square::at(king.color.back_rank() as i8, KING_HOME_FILE as i8);
        if home != Some(king.square) {
            return false;
        }

        let rook_home = wing.rook_home(king.color);
        let rook_in_place = self
            .piece_at(rook_home)
            .is_some_and(|rook| rook.is_rook() && rook.color == king.color);
        if !rook_in_place {
            return false;
        }

        let corridor_empty = king
            .square
            .ray(0, wing.direction())
            .take_while(|&sq| sq != rook_home)
            .all(|sq| !self.is_occupied(sq));
        if !corridor_empty {
            return false;
        }

        let king_path = std::iter::once(king.square).chain(king.square.ray(0, wing.direction()).take(2));
        king_path.into_iter().all(|sq| !attacked.contains(sq))
    }

    /// Encodes the placement field of a state string.
    pub fn to_placement_string(&self) -> String {
        let mut placement = String::with_capacity(71);
        for rank in (0..8).rev() {
            let mut empty_run = 0;
            for file in 0..8 {
                let piece = Square::at(rank, file).and_then(|sq| self.piece_at(sq));
                match piece {
                    Some(piece) => {
                        if empty_run > 0 {
                            placement.push_str(&empty_run.to_string());
                            empty_run = 0;
                        }
                        placement.push(piece.fen_char());
                    }
                    None => empty_run += 1,
                }
            }
            if empty_run > 0 {
                placement.push_str(&empty_run.to_string());
            }
            if rank > 0 {
                placement.push('/');
            }
        }
        placement
    }

    /// Decodes the placement field of a state string.
    ///
    /// Requires eight ranks of eight squares and exactly one king per color.
    pub fn from_placement_string(placement: &str) -> Result<Self, FenError> {
        let mut board = Board::empty();
        for piece in FenParser::placement_pieces(placement)? {
            board.place(piece.square, piece);
        }
        Ok(board)
    }
}
