//! gambit - command-line front end for the rules engine.
//!
//! Lists legal moves, plays move sequences and reports the resulting state,
//! and runs perft node counts.

mod config;

use anyhow::Context;
use clap::{Parser, Subcommand};
use config::CliConfig;
use gambit_engine::movegen::perft::{perft, perft_divide};
use gambit_engine::{Game, GameStatus};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "gambit")]
#[command(about = "Chess rules engine: legal moves, game status, and perft")]
struct Cli {
    /// Starting position as a state string (overrides the config file)
    #[arg(long, global = true)]
    fen: Option<String>,

    /// Configuration file (defaults to gambit.toml when present)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the legal moves of the starting position
    Moves,
    /// Play a sequence of moves and report the final state
    Play {
        /// Moves in square-pair notation (e.g. e2e4 e7e5 e7e8q)
        moves: Vec<String>,
        /// Print the report as JSON
        #[arg(long)]
        json: bool,
    },
    /// Count leaf nodes of the move tree to the given depth
    Perft {
        /// Search depth in plies
        depth: u32,
        /// Show the node count below each root move
        #[arg(long)]
        divide: bool,
    },
}

/// Final state after `play`.
#[derive(Serialize)]
struct PlayReport {
    fen: String,
    status: GameStatus,
    check: bool,
    repetitions: usize,
    moves: Vec<String>,
    legal_moves: Vec<String>,
}

impl PlayReport {
    fn from_game(game: &Game) -> Self {
        let position = game.position();
        PlayReport {
            fen: game.to_fen(),
            status: game.status(),
            check: position.is_check(),
            repetitions: game.repetition_count(),
            moves: game
                .line_to(game.current())
                .unwrap_or_default()
                .iter()
                .map(|m| m.to_uci())
                .collect(),
            legal_moves: legal_tokens(game),
        }
    }
}

fn legal_tokens(game: &Game) -> Vec<String> {
    game.legal_moves()
        .as_slice()
        .iter()
        .map(|m| m.to_uci())
        .collect()
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CliConfig::load(cli.config.as_deref())?;

    let start_fen = cli.fen.or(config.start_fen);
    let game = match &start_fen {
        Some(fen) => Game::from_fen(fen).with_context(|| format!("invalid position '{}'", fen))?,
        None => Game::new(),
    }
    .with_rules(config.rules);
    tracing::debug!(fen = %game.to_fen(), "starting position");

    match cli.command {
        Commands::Moves => {
            for token in legal_tokens(&game) {
                println!("{}", token);
            }
        }
        Commands::Play { moves, json } => {
            let mut game = game;
            for token in &moves {
                game.play_uci(token)
                    .with_context(|| format!("cannot play '{}'", token))?;
            }

            let report = PlayReport::from_game(&game);
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("{}", report.fen);
                println!("status: {}", report.status);
                if report.check {
                    println!("check");
                }
            }
        }
        Commands::Perft { depth, divide } => {
            let position = game.position();
            let started = Instant::now();
            let nodes = if divide {
                let results = perft_divide(position, depth);
                for (m, count) in &results {
                    println!("{}: {}", m, count);
                }
                results.iter().map(|(_, count)| count).sum()
            } else {
                perft(position, depth)
            };
            let elapsed = started.elapsed();
            tracing::info!(depth, nodes, elapsed_ms = elapsed.as_millis() as u64, "perft finished");
            println!("Nodes: {}", nodes);
        }
    }

    Ok(())
}
