//! Plays the search engine against itself to compare search depths

use anyhow::Result;
use clap::Parser;
use indicatif::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use tracing_subscriber::EnvFilter;

use std::sync::mpsc::*;
use std::thread;
use std::time::*;

use connect4_minimax::{board::Board, search::SearchEngine, Outcome, Piece, DEFAULT_DEPTH};

/// Play the computer against itself at two search depths
#[derive(Parser, Debug, Clone)]
#[command(version, about)]
struct Args {
    /// Number of games to play
    #[arg(short, long, default_value_t = 100)]
    games: u64,

    /// Search depth of the first player
    #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    red_depth: u32,

    /// Search depth of the second player
    #[arg(long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    yellow_depth: u32,

    /// Random moves played at the start of each game, so games differ
    #[arg(long, default_value_t = 2)]
    random_openings: usize,

    /// Seed for the opening moves, random if not given
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Debug)]
struct GameSummary {
    winner: Option<Piece>,
    moves: usize,
    nodes: usize,
}

fn play_game(args: &Args, seed: u64) -> Result<GameSummary> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut engine = SearchEngine::with_seed(seed);
    let mut board = Board::new();
    let mut piece = Piece::Red;
    let mut nodes = 0;

    loop {
        let column = if board.num_moves() < args.random_openings {
            let columns = board.legal_columns();
            columns[rng.random_range(0..columns.len())]
        } else {
            let depth = match piece {
                Piece::Red => args.red_depth,
                Piece::Yellow => args.yellow_depth,
            };
            let column = engine.choose_move(&board, piece, depth)?;
            nodes += engine.node_count;
            column
        };

        let row = board.apply_move(column, piece)?;
        match board.evaluate_outcome(row, column) {
            Outcome::InProgress => piece = piece.opponent(),
            Outcome::Win(winner, _) => {
                return Ok(GameSummary {
                    winner: Some(winner),
                    moves: board.num_moves(),
                    nodes,
                })
            }
            Outcome::Draw => {
                return Ok(GameSummary {
                    winner: None,
                    moves: board.num_moves(),
                    nodes,
                })
            }
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let base_seed = args.seed.unwrap_or_else(rand::random);
    tracing::info!(?args, base_seed, "starting arena");

    let start = Instant::now();
    let mut next_time = start;

    enum Message {
        Finished(Result<GameSummary>),
        Done,
    }
    let (tx, rx) = channel();

    let worker_args = args.clone();
    thread::spawn(move || {
        (0..worker_args.games).into_par_iter().for_each_with(tx.clone(), |tx, game| {
            let summary = play_game(&worker_args, base_seed.wrapping_add(game));
            // the receiver only hangs up after an error, the result is moot then
            let _ = tx.send(Message::Finished(summary));
        });
        let _ = tx.send(Message::Done);
    });

    let progress = ProgressBar::new(args.games);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("Playing games: {bar:40.cyan/blue} {msg} ~{eta} remaining")
            .progress_chars("█▓▒░  "),
    );

    let (mut red_wins, mut yellow_wins, mut draws) = (0u64, 0u64, 0u64);
    let mut total_moves = 0;
    let mut total_nodes = 0;

    let mut running = true;
    while running {
        match rx.recv()? {
            Message::Done => running = false,
            Message::Finished(summary) => {
                let summary = summary?;
                tracing::debug!(?summary, "game finished");
                match summary.winner {
                    Some(Piece::Red) => red_wins += 1,
                    Some(Piece::Yellow) => yellow_wins += 1,
                    None => draws += 1,
                }
                total_moves += summary.moves;
                total_nodes += summary.nodes;
                progress.inc(1);
            }
        }
        if Instant::now() > next_time {
            progress.set_message(&format!(
                "({} / {})",
                progress.position(),
                progress.length()
            ));
            next_time += Duration::from_millis(100);
        }
    }
    progress.finish();

    let played = (red_wins + yellow_wins + draws).max(1);
    println!(
        "Red (depth {}) wins: {}, Yellow (depth {}) wins: {}, draws: {}",
        args.red_depth, red_wins, args.yellow_depth, yellow_wins, draws
    );
    println!(
        "Mean game length: {:.1} moves, mean nodes per game: {:.0}",
        total_moves as f64 / played as f64,
        total_nodes as f64 / played as f64
    );
    println!("Arena completed in {}", HumanDuration(start.elapsed()));

    Ok(())
}
