//! A human versus computer game session
//!
//! `Game` owns the authoritative board. Its outcome is recomputed from the
//! grid after every move and never patched by hand.

use crate::board::{Board, Outcome, Piece};
use crate::search::SearchEngine;
use crate::GameError;

/// A move that has been applied to the game
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct MoveRecord {
    pub piece: Piece,
    pub column: usize,
    pub row: usize,
    /// The status of the game after this move
    pub outcome: Outcome,
}

#[derive(Clone, Debug)]
pub struct Game {
    board: Board,
    outcome: Outcome,
    to_move: Piece,
    human: Piece,
}

impl Game {
    /// Starts a new game, Red always moves first
    pub fn new(human: Piece) -> Self {
        Self {
            board: Board::new(),
            outcome: Outcome::InProgress,
            to_move: Piece::Red,
            human,
        }
    }

    pub fn reset(&mut self) {
        self.board.reset();
        self.outcome = Outcome::InProgress;
        self.to_move = Piece::Red;
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    pub fn to_move(&self) -> Piece {
        self.to_move
    }

    pub fn human(&self) -> Piece {
        self.human
    }

    pub fn computer(&self) -> Piece {
        self.human.opponent()
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_over()
    }

    pub fn is_human_turn(&self) -> bool {
        !self.is_over() && self.to_move == self.human
    }

    /// Drops the side-to-move's piece into `column`
    pub fn play(&mut self, column: usize) -> Result<MoveRecord, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let piece = self.to_move;
        let row = self.board.apply_move(column, piece)?;
        self.outcome = self.board.evaluate_outcome(row, column);
        self.to_move = piece.opponent();

        Ok(MoveRecord {
            piece,
            column,
            row,
            outcome: self.outcome,
        })
    }

    /// Lets `engine` pick and play the side-to-move's next column
    pub fn play_computer(
        &mut self,
        engine: &mut SearchEngine,
        depth: u32,
    ) -> Result<MoveRecord, GameError> {
        if self.is_over() {
            return Err(GameError::GameOver);
        }

        let column = engine.choose_move(&self.board, self.to_move, depth)?;
        self.play(column)
    }

    /// A one-line summary of the game for the human player
    pub fn status_message(&self) -> &'static str {
        match self.outcome {
            Outcome::InProgress if self.to_move == self.human => "Your turn.",
            Outcome::InProgress => "Computer is thinking...",
            Outcome::Win(piece, _) if piece == self.human => "You win!",
            Outcome::Win(_, _) => "Computer wins!",
            Outcome::Draw => "It's a draw!",
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Piece::Red)
    }
}
