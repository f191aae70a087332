//! Perft (performance test) for move generator validation.
//!
//! Perft counts the number of leaf nodes at a given depth, which can be
//! compared against known-correct values to validate the move generator.
//! The legal set lists a promoting pawn move once; here it is expanded into
//! one leaf per promotable kind so the counts line up with published tables.

use super::{apply, generate_moves};
use crate::Position;
use gambit_core::{Move, Promotion};

const PROMOTIONS: [Option<Promotion>; 4] = [
    Some(Promotion::Queen),
    Some(Promotion::Rook),
    Some(Promotion::Bishop),
    Some(Promotion::Knight),
];

/// Promotion choices worth exploring for a legal move.
fn choices(position: &Position, m: Move) -> &'static [Option<Promotion>] {
    if position.is_promotion(m) {
        &PROMOTIONS
    } else {
        &[None]
    }
}

/// Yields every successor of `position` with the move that produced it.
fn successors(position: &Position) -> impl Iterator<Item = (Move, Position)> + '_ {
    generate_moves(position)
        .as_slice()
        .to_vec()
        .into_iter()
        .flat_map(move |m| {
            choices(position, m).iter().filter_map(move |&promotion| {
                let m = match promotion {
                    Some(p) => Move::with_promotion(m.from(), m.to(), p),
                    None => m,
                };
                let piece = position.piece_at(m.from())?;
                Some((m, apply(position, piece, m)))
            })
        })
}

/// Counts the number of leaf nodes at the given depth.
///
/// This is the standard perft function used to validate move generators.
pub fn perft(position: &Position, depth: u32) -> u64 {
    if depth == 0 {
        return 1;
    }

    if depth == 1 {
        return generate_moves(position)
            .as_slice()
            .iter()
            .map(|&m| choices(position, m).len() as u64)
            .sum();
    }

    successors(position)
        .map(|(_, next)| perft(&next, depth - 1))
        .sum()
}

/// Perft with divide - shows node count for each move at depth-1.
/// Useful for debugging to identify which moves have incorrect counts.
pub fn perft_divide(position: &Position, depth: u32) -> Vec<(String, u64)> {
    let mut results: Vec<(String, u64)> = successors(position)
        .map(|(m, next)| {
            let nodes = if depth > 1 { perft(&next, depth - 1) } else { 1 };
            (m.to_uci(), nodes)
        })
        .collect();

    results.sort_by(|a, b| a.0.cmp(&b.0));
    results
}
