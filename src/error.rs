//! Errors reported by the board, the search engine and the game session

use thiserror::Error;

use crate::WIDTH;

/// A move that cannot be applied to the board
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidMoveError {
    #[error("Invalid move, column {column} out of range. Columns must be between 0 and {max}", max = WIDTH - 1)]
    OutOfRange { column: usize },

    #[error("Invalid move, column {column} full")]
    ColumnFull { column: usize },
}

impl InvalidMoveError {
    /// The column the rejected move targeted
    pub fn column(&self) -> usize {
        match *self {
            InvalidMoveError::OutOfRange { column } | InvalidMoveError::ColumnFull { column } => {
                column
            }
        }
    }
}

/// The search was asked for a move on a board with no empty column
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
#[error("No legal move available, the board is full")]
pub struct NoLegalMoveError;

/// Errors raised while driving a game session
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameError {
    #[error("Game is over")]
    GameOver,

    #[error(transparent)]
    InvalidMove(#[from] InvalidMoveError),

    #[error(transparent)]
    NoLegalMove(#[from] NoLegalMoveError),
}
