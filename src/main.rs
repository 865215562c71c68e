use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use std::io::{stdin, stdout, Stdin, Write};
use std::time::{Duration, Instant};

use connect4_minimax::{
    game::Game,
    search::{SearchEngine, WIN_SCORE},
    GameError, InvalidMoveError, NoLegalMoveError, Outcome, Piece, DEFAULT_DEPTH, WIDTH,
};

mod display;

/// Play Connect 4 against the computer in the terminal
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// How many plies the computer searches ahead
    #[arg(short, long, default_value_t = DEFAULT_DEPTH, value_parser = clap::value_parser!(u32).range(1..))]
    depth: u32,

    /// Pause before each computer move, in milliseconds
    #[arg(long, default_value_t = 500)]
    think_ms: u64,
}

// asks a y/n question until one of the two is given
fn ask(stdin: &Stdin, question: &str) -> Result<bool> {
    loop {
        let mut buffer = String::new();
        print!("{} y/n: ", question);
        stdout().flush()?;
        if stdin.read_line(&mut buffer)? == 0 {
            return Ok(false);
        }
        match buffer.to_lowercase().chars().next() {
            Some(_letter @ 'y') => return Ok(true),
            Some(_letter @ 'n') => return Ok(false),
            _ => println!("Unknown answer given"),
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    tracing::debug!(depth = args.depth, think_ms = args.think_ms, "starting");

    let stdin = stdin();
    let mut engine = SearchEngine::new();

    println!("Welcome to Connect 4\n");

    let human = if ask(&stdin, "Would you like to move first?")? {
        Piece::Red
    } else {
        Piece::Yellow
    };
    let mut game = Game::new(human);
    println!("You play {}, columns are numbered 1 to {}.\n", human.name(), WIDTH);

    loop {
        display::draw(game.board(), &game.outcome())?;

        match game.outcome() {
            Outcome::InProgress => {
                if game.is_human_turn() {
                    print!("Move input > ");
                    stdout().flush()?;
                    let mut input_str = String::new();
                    if stdin.read_line(&mut input_str)? == 0 {
                        break;
                    }

                    let column = match input_str.trim().parse::<usize>() {
                        Ok(column @ 1..=WIDTH) => column - 1,
                        _ => {
                            println!("Invalid column: {}, pick 1 to {}", input_str.trim(), WIDTH);
                            continue;
                        }
                    };

                    if let Err(err) = game.play(column) {
                        match err {
                            GameError::InvalidMove(InvalidMoveError::ColumnFull { .. }) => {
                                println!("Invalid move, column {} full", column + 1)
                            }
                            err => println!("{}", err),
                        }
                        // try the move again
                        continue;
                    }
                } else {
                    println!("{}", game.status_message());
                    stdout().flush()?;
                    std::thread::sleep(Duration::from_millis(args.think_ms));

                    let start = Instant::now();
                    let result = engine.search(game.board(), game.computer(), args.depth);
                    let column = result.column.ok_or(NoLegalMoveError)?;
                    tracing::debug!(
                        column,
                        score = result.score,
                        nodes = engine.node_count,
                        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
                        "search finished"
                    );

                    if result.score >= WIN_SCORE {
                        println!("The computer sees a forced win.");
                    } else if result.score <= -WIN_SCORE {
                        println!("The computer expects to lose against best play.");
                    }
                    println!("Computer plays: {}", column + 1);

                    game.play(column)?;
                }
            }

            // end states
            Outcome::Win(..) | Outcome::Draw => {
                println!("{}", game.status_message());
                if !ask(&stdin, "Play again?")? {
                    break;
                }
                game.reset();
                tracing::debug!("game reset");
            }
        }
    }
    Ok(())
}
