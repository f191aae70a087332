//! Chess rules engine: legal move generation, move application, and
//! terminal-state detection.
//!
//! This crate provides:
//! - [`Board`] - square-to-piece placement with the attack model
//! - [`Position`] - full game state with legal moves and state-string I/O
//! - [`Game`] - an arena of positions forming the tree of played lines
//! - Perft node counting for validating the move generator
//!
//! # Architecture
//!
//! Legal moves are derived from pseudo-legal ones: each candidate is applied
//! provisionally to a scratch board, the mover's king is tested for check,
//! and the board is restored before the next candidate. Applying a chosen
//! move always produces a fresh [`Position`], so earlier positions stay
//! valid for history and repetition detection.
//!
//! # Example
//!
//! ```
//! use gambit_engine::{Game, GameStatus, Position};
//!
//! // Using Position directly (stateless)
//! let position = Position::startpos();
//! println!("Legal moves from starting position: {}", position.legal_moves().len());
//!
//! // Using Game for history and status
//! let mut game = Game::new();
//! game.play_uci("e2e4").unwrap();
//! game.play_uci("e7e5").unwrap();
//! assert_eq!(game.status(), GameStatus::Active);
//! println!("Position after 1.e4 e5: {}", game.to_fen());
//! ```

mod bitboard;
mod board;
mod castling;
mod game;
pub mod movegen;
mod position;
pub mod rules;

pub use bitboard::{Bitboard, BitboardIter};
pub use board::Board;
pub use castling::CastlingRights;
pub use game::{Game, GameError, NodeId};
pub use movegen::{generate_moves, make_move, IllegalMove, MoveList};
pub use position::{Position, Signature, FIFTY_MOVE_LIMIT};
pub use rules::{classify, DrawReason, DrawRules, GameStatus};
