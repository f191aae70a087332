//! Whole-game scenarios played through the public API.

use gambit_core::{Color, Move, Square};
use gambit_engine::{DrawReason, Game, GameError, GameStatus, Position};

fn sq(name: &str) -> Square {
    Square::from_algebraic(name).expect("valid square")
}

fn play_all(game: &mut Game, tokens: &[&str]) {
    for token in tokens {
        game.play_uci(token)
            .unwrap_or_else(|e| panic!("{} rejected: {}", token, e));
    }
}

#[test]
fn test_initial_position_has_twenty_moves() {
    let game = Game::new();
    let moves = game.legal_moves();
    assert_eq!(moves.len(), 20);
    let knights = moves
        .as_slice()
        .iter()
        .filter(|m| m.from() == Square::B1 || m.from() == Square::G1)
        .count();
    assert_eq!(knights, 4);
}

#[test]
fn test_scholars_mate() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &["e2e4", "e7e5", "d1h5", "b8c6", "f1c4", "g8f6", "h5f7"],
    );

    let position = game.position();
    assert!(position.is_check());
    assert!(position.legal_moves().is_empty());
    assert!(position.is_checkmate());
    assert_eq!(
        game.status(),
        GameStatus::Checkmate {
            winner: Color::White
        }
    );
    assert!(matches!(
        game.play_uci("e8e7"),
        Err(GameError::GameOver(_))
    ));
}

#[test]
fn test_stalemate_is_not_checkmate() {
    // Black king boxed in by the white king and pawn.
    let game = Game::from_fen("k7/P7/1K6/8/8/8/8/8 b - - 0 1").expect("valid fen");
    let position = game.position();
    assert!(!position.is_check());
    assert!(position.legal_moves().is_empty());
    assert!(position.is_stalemate());
    assert!(!position.is_checkmate());
    assert_eq!(
        game.status(),
        GameStatus::Draw {
            reason: DrawReason::Stalemate
        }
    );
}

#[test]
fn test_en_passant_capture() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5"]);

    let position = game.position();
    assert_eq!(position.en_passant(), Some(sq("d6")));
    assert!(position.is_legal(Move::new(sq("e5"), sq("d6"))));

    game.play_uci("e5d6").expect("en passant is legal");
    let position = game.position();
    assert!(position.piece_at(sq("d5")).is_none());
    assert!(position.piece_at(sq("e5")).is_none());
    assert!(position
        .piece_at(sq("d6"))
        .is_some_and(|p| p.is_pawn() && p.color == Color::White));
    assert_eq!(position.en_passant(), None);
}

#[test]
fn test_en_passant_expires_after_one_move() {
    let mut game = Game::new();
    play_all(&mut game, &["e2e4", "a7a6", "e4e5", "d7d5", "h2h3", "h7h6"]);
    assert!(!game.position().is_legal(Move::new(sq("e5"), sq("d6"))));
}

#[test]
fn test_castling_both_sides() {
    let mut game = Game::new();
    play_all(
        &mut game,
        &[
            "e2e4", "e7e5", "g1f3", "b8c6", "f1c4", "d7d6", "e1g1", "c8e6", "d2d3", "d8d7",
            "b1c3",
        ],
    );

    let position = game.position();
    assert!(position.piece_at(Square::G1).is_some_and(|p| p.is_king()));
    assert!(position.piece_at(Square::F1).is_some_and(|p| p.is_rook()));
    assert!(position.piece_at(Square::H1).is_none());
    assert_eq!(position.castling().to_string(), "kq");
    assert!(position.is_legal(Move::new(Square::E8, Square::C8)));

    game.play_uci("e8c8").expect("long castling is legal");
    let position = game.position();
    assert!(position.piece_at(Square::C8).is_some_and(|p| p.is_king()));
    assert!(position.piece_at(Square::D8).is_some_and(|p| p.is_rook()));
    assert!(position.piece_at(Square::A8).is_none());
    assert_eq!(position.castling().to_string(), "-");
}

#[test]
fn test_castling_refused_through_check() {
    // The bishop on a6 covers f1.
    let position =
        Position::from_fen("4k3/8/b7/8/8/8/8/4K2R w K - 0 1").expect("valid fen");
    assert!(!position.is_legal(Move::new(Square::E1, Square::G1)));
}

#[test]
fn test_king_move_forfeits_castling() {
    let mut game =
        Game::from_fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1").expect("valid fen");
    play_all(&mut game, &["e1e2", "e8e7", "e2e1", "e7e8"]);
    let position = game.position();
    assert_eq!(position.castling().to_string(), "-");
    assert!(!position.is_legal(Move::new(Square::E1, Square::G1)));
}

#[test]
fn test_threefold_repetition_on_third_occurrence() {
    let mut game = Game::new();
    let shuffle = ["b1c3", "b8c6", "c3b1", "c6b8"];

    play_all(&mut game, &shuffle);
    assert_eq!(game.repetition_count(), 2);
    assert_eq!(game.status(), GameStatus::Active);

    play_all(&mut game, &shuffle[..3]);
    assert_eq!(game.status(), GameStatus::Active);

    game.play_uci(shuffle[3]).expect("legal");
    assert_eq!(game.repetition_count(), 3);
    assert_eq!(
        game.status(),
        GameStatus::Draw {
            reason: DrawReason::ThreefoldRepetition
        }
    );
}

#[test]
fn test_repetition_ignores_move_counters_but_not_rights() {
    // Rook shuffles lose castling rights, so the first return does not count.
    let mut game =
        Game::from_fen("r3k3/8/8/8/8/8/8/4K2R w Kq - 0 1").expect("valid fen");
    play_all(&mut game, &["h1h2", "a8a7", "h2h1", "a7a8"]);
    assert_eq!(game.repetition_count(), 1);
    play_all(&mut game, &["h1h2", "a8a7", "h2h1", "a7a8"]);
    assert_eq!(game.repetition_count(), 2);
}

#[test]
fn test_fifty_move_rule() {
    let mut game =
        Game::from_fen("4k3/8/8/8/8/8/8/R3K3 w - - 98 70").expect("valid fen");
    game.play_uci("a1a2").expect("legal");
    assert_eq!(game.status(), GameStatus::Active);
    game.play_uci("e8d8").expect("legal");
    assert_eq!(game.position().halfmove_clock(), 100);
    assert_eq!(
        game.status(),
        GameStatus::Draw {
            reason: DrawReason::FiftyMoveRule
        }
    );
}

#[test]
fn test_promotion_through_game() {
    let mut game = Game::from_fen("8/P6k/8/8/8/8/8/K7 w - - 0 1").expect("valid fen");
    game.play_uci("a7a8r").expect("legal");
    assert!(game
        .position()
        .piece_at(Square::A8)
        .is_some_and(|p| p.is_rook() && p.color == Color::White));
}

#[test]
fn test_rejected_move_leaves_game_untouched() {
    let mut game = Game::new();
    game.play_uci("e2e4").expect("legal");
    let before = game.to_fen();
    let node = game.current();

    let err = game.play(sq("e4"), sq("e6"), None).unwrap_err();
    match err {
        GameError::IllegalMove(illegal) => {
            assert_eq!(illegal.from, sq("e4"));
            assert_eq!(illegal.to, sq("e6"));
        }
        other => panic!("unexpected error: {}", other),
    }
    assert_eq!(game.to_fen(), before);
    assert_eq!(game.current(), node);
}
