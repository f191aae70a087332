//! Scoped provisional moves for the legality filter.

use crate::Board;
use gambit_core::{Piece, Square};

/// A move applied provisionally to a board.
///
/// The guard remembers the prior contents of every square it touches and
/// puts them back when dropped, so the board is restored on every exit path.
/// Only placement changes; castling rights, clocks and side to move live on
/// [`Position`](crate::Position) and are never touched here.
pub(crate) struct TrialMove<'a> {
    board: &'a mut Board,
    saved: [(Square, Option<Piece>); 3],
    len: usize,
}

impl<'a> TrialMove<'a> {
    /// Moves `piece` to `to`, also lifting the pawn on `en_passant_victim`
    /// when the move is an en-passant capture.
    pub(crate) fn new(
        board: &'a mut Board,
        piece: Piece,
        to: Square,
        en_passant_victim: Option<Square>,
    ) -> Self {
        let mut trial = TrialMove {
            board,
            saved: [(piece.square, None); 3],
            len: 0,
        };

        trial.save(piece.square);
        trial.save(to);
        if let Some(victim) = en_passant_victim {
            trial.save(victim);
            trial.board.remove(victim);
        }
        trial.board.remove(piece.square);
        trial.board.place(to, piece);
        trial
    }

    fn save(&mut self, sq: Square) {
        self.saved[self.len] = (sq, self.board.piece_at(sq));
        self.len += 1;
    }

    /// The board with the move applied.
    #[inline]
    pub(crate) fn board(&self) -> &Board {
        self.board
    }
}

impl Drop for TrialMove<'_> {
    fn drop(&mut self) {
        for &(sq, prior) in self.saved[..self.len].iter().rev() {
            match prior {
                Some(piece) => {
                    self.board.place(sq, piece);
                }
                None => {
                    self.board.remove(sq);
                }
            }
        }
    }
}
