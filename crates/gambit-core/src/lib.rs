//! Core types for the gambit rules engine.
//!
//! This crate provides the fundamental types used across the engine:
//! - [`Color`] for the two sides
//! - [`Square`], [`File`], and [`Rank`] for board addressing
//! - [`PieceKind`], [`Piece`], [`Promotion`], and [`Wing`] for the piece model
//! - [`Move`] for candidate moves and their square-pair notation
//! - State-string (FEN) tokenization

mod color;
mod fen;
mod mov;
mod piece;
mod square;

pub use color::Color;
pub use fen::{FenError, FenParser};
pub use mov::{Move, NotationError};
pub use piece::{Piece, PieceKind, Promotion, Step, Wing, KING_HOME_FILE};
pub use square::{File, Rank, Ray, Square};
