//! Move generation and application.
//!
//! Legal moves are found by trying every pseudo-legal destination on a
//! scratch board and keeping the ones that leave the mover's king safe.
//! Castling is added afterwards, and never while in check.

pub mod perft;
mod trial;

use crate::Position;
use gambit_core::{Color, Move, Piece, Promotion, Square, Wing};
use thiserror::Error;
use trial::TrialMove;

/// A list of moves with a fixed maximum capacity.
///
/// Chess positions have at most 218 legal moves, so we use a fixed-size
/// array to avoid heap allocations during move generation.
#[derive(Clone)]
pub struct MoveList {
    moves: [Move; Self::MAX_MOVES],
    len: usize,
}

impl MoveList {
    /// Maximum number of legal moves in any chess position.
    pub const MAX_MOVES: usize = 256;

    /// Creates an empty move list.
    #[inline]
    pub const fn new() -> Self {
        MoveList {
            moves: [Move::NULL; Self::MAX_MOVES],
            len: 0,
        }
    }

    /// Adds a move to the list.
    #[inline]
    pub fn push(&mut self, m: Move) {
        debug_assert!(self.len < Self::MAX_MOVES);
        self.moves[self.len] = m;
        self.len += 1;
    }

    /// Returns the number of moves.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list is empty.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns a slice of the moves.
    #[inline]
    pub fn as_slice(&self) -> &[Move] {
        &self.moves[..self.len]
    }

    /// Returns true if some move in the list goes from `from` to `to`.
    #[inline]
    pub fn contains_pair(&self, from: Square, to: Square) -> bool {
        self.as_slice()
            .iter()
            .any(|m| m.from() == from && m.to() == to)
    }
}

impl Default for MoveList {
    fn default() -> Self {
        Self::new()
    }
}

impl std::ops::Index<usize> for MoveList {
    type Output = Move;

    #[inline]
    fn index(&self, index: usize) -> &Self::Output {
        debug_assert!(index < self.len);
        &self.moves[index]
    }
}

impl<'a> IntoIterator for &'a MoveList {
    type Item = &'a Move;
    type IntoIter = std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl std::fmt::Debug for MoveList {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.as_slice()).finish()
    }
}

/// A requested move that is not in the legal set of the position.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("illegal move: {from} to {to}")]
pub struct IllegalMove {
    pub from: Square,
    pub to: Square,
    pub promotion: Option<Promotion>,
}

impl From<Move> for IllegalMove {
    fn from(m: Move) -> Self {
        IllegalMove {
            from: m.from(),
            to: m.to(),
            promotion: m.promotion(),
        }
    }
}

/// Generates all legal moves for the given position.
///
/// Each legal (source, destination) pair appears once; a pawn reaching the
/// far rank is listed without a promotion choice. Moves come out grouped by
/// source square from a1 towards h8, with castling last.
pub fn generate_moves(position: &Position) -> MoveList {
    let mut moves = MoveList::new();
    let us = position.side_to_move;
    let board = &position.board;
    let mut scratch = board.clone();

    for piece in board.pieces(us) {
        for to in board.pseudo_legal_destinations(&piece, position.en_passant) {
            let victim = board.en_passant_victim(&piece, to, position.en_passant);
            let trial = TrialMove::new(&mut scratch, piece, to, victim);
            if !trial.board().is_in_check(us) {
                moves.push(Move::new(piece.square, to));
            }
        }
    }

    if !board.is_in_check(us) {
        if let Some(king) = board.king(us) {
            for to in board.castling_destinations(&king, position.castling) {
                moves.push(Move::new(king.square, to));
            }
        }
    }

    moves
}

/// Applies a move to a position, returning the successor.
///
/// Only the source and destination are matched against the legal set. The
/// promotion choice is ignored unless the move is a promotion, in which case
/// a missing choice means a queen.
pub fn make_move(position: &Position, m: Move) -> Result<Position, IllegalMove> {
    let piece = position
        .board
        .piece_at(m.from())
        .filter(|_| generate_moves(position).contains_pair(m.from(), m.to()))
        .ok_or(IllegalMove::from(m))?;
    Ok(apply(position, piece, m))
}

/// Produces the successor position for a move already known to be legal.
///
/// Every special-move fact is read from `position` before the copy is
/// touched, so nothing is decided from half-updated state.
pub(crate) fn apply(position: &Position, mut piece: Piece, m: Move) -> Position {
    let us = piece.color;
    let them = us.opposite();
    let (from, to) = (m.from(), m.to());

    let captured = position.board.piece_at(to);
    let victim = position.board.en_passant_victim(&piece, to, position.en_passant);
    let file_shift = to.file().index() as i8 - from.file().index() as i8;
    let castling_wing = match file_shift {
        2 if piece.is_king() => Some(Wing::Kingside),
        -2 if piece.is_king() => Some(Wing::Queenside),
        _ => None,
    };
    let reaches_far_rank = piece.is_pawn() && to.rank().index() == us.promotion_rank();
    let double_push = piece.is_pawn()
        && (to.rank().index() as i8 - from.rank().index() as i8).abs() == 2;
    let resets_clock = piece.is_pawn() || captured.is_some() || victim.is_some();

    let mut next = position.clone();

    next.board.remove(from);
    if let Some(victim) = victim {
        next.board.remove(victim);
    }
    if reaches_far_rank {
        piece.promote(m.promotion().unwrap_or(Promotion::Queen));
    }
    next.board.place(to, piece);

    if piece.is_king() {
        next.castling.clear_color(us);
        if let Some(wing) = castling_wing {
            let rook_from = wing.rook_home(us);
            let rook_to = Square::at(us.back_rank() as i8, wing.rook_landing_file() as i8);
            if let (Some(rook), Some(rook_to)) = (next.board.remove(rook_from), rook_to) {
                next.board.place(rook_to, rook);
            }
        }
    }

    if piece.is_rook() {
        if let Some(wing) = Wing::from_rook_home(from, us) {
            next.castling.clear(us, wing);
        }
    }
    if let Some(wing) = captured
        .filter(Piece::is_rook)
        .and_then(|_| Wing::from_rook_home(to, them))
    {
        next.castling.clear(them, wing);
    }

    next.en_passant = if double_push {
        from.offset(us.pawn_direction(), 0)
    } else {
        None
    };

    next.side_to_move = them;
    if them == Color::White {
        next.fullmove_number = next.fullmove_number.saturating_add(1);
    }
    next.halfmove_clock = if resets_clock {
        0
    } else {
        next.halfmove_clock.saturating_add(1)
    };

    next
}
