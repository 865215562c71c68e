//! A heuristic agent for playing the board game 'Connect 4' against a human
//!
//! This agent uses a depth-limited minimax search with alpha-beta pruning
//! and a positional evaluation function to choose the computer's move.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_minimax::{board::Board, search::SearchEngine, Piece, DEFAULT_DEPTH};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let mut board = Board::new();
//! board.apply_move(3, Piece::Red)?;
//!
//! let mut engine = SearchEngine::new();
//! let column = engine.choose_move(&board, Piece::Yellow, DEFAULT_DEPTH)?;
//!
//! assert!(board.is_valid_move(column));
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod error;

pub mod board;

pub mod evaluator;

pub mod search;

pub mod game;

mod test;

pub use board::{Cell, Outcome, Piece};
pub use error::*;

/// The width of the game board in tiles
pub const WIDTH: usize = 7;

/// The height of the game board in tiles
pub const HEIGHT: usize = 6;

/// The number of tiles that must line up to win
pub const CONNECT: usize = 4;

/// Search depth in plies used when the caller has no preference
pub const DEFAULT_DEPTH: u32 = 4;

// a four-in-a-row must fit both across and down the board
const_assert!(WIDTH >= CONNECT && HEIGHT >= CONNECT);
// the evaluator's centre bonus needs a single middle column
const_assert!(WIDTH % 2 == 1);
