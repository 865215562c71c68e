use anyhow::{anyhow, Result};
use static_assertions::const_assert_eq;

use std::fmt;

use crate::{InvalidMoveError, CONNECT, HEIGHT, WIDTH};

/// One of the two sides of the game
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Piece {
    /// Moves first, played by the human by default
    Red,
    /// Played by the computer by default
    Yellow,
}

impl Piece {
    pub fn opponent(self) -> Self {
        match self {
            Piece::Red => Piece::Yellow,
            Piece::Yellow => Piece::Red,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Piece::Red => "Red",
            Piece::Yellow => "Yellow",
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Red,
    Yellow,
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn piece(&self) -> Option<Piece> {
        match self {
            Cell::Empty => None,
            Cell::Red => Some(Piece::Red),
            Cell::Yellow => Some(Piece::Yellow),
        }
    }

    pub fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Red => 'R',
            Cell::Yellow => 'Y',
        }
    }
}

impl From<Piece> for Cell {
    fn from(piece: Piece) -> Self {
        match piece {
            Piece::Red => Cell::Red,
            Piece::Yellow => Cell::Yellow,
        }
    }
}

/// A (row, column) pair, row 0 being the top of the board
pub type Coord = (usize, usize);

/// The coordinates of `CONNECT` cells in a straight line
pub type Window = [Coord; CONNECT];

/// Terminal status of a position
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Outcome {
    InProgress,
    /// The winning piece and its four connected cells, in discovery order
    Win(Piece, Window),
    Draw,
}

impl Outcome {
    pub fn is_over(&self) -> bool {
        !matches!(self, Outcome::InProgress)
    }

    pub fn winner(&self) -> Option<Piece> {
        match self {
            Outcome::Win(piece, _) => Some(*piece),
            _ => None,
        }
    }
}

/// Number of `CONNECT`-long lines that fit on the board in any direction
pub const NUM_WINDOWS: usize = HEIGHT * (WIDTH - CONNECT + 1)
    + (HEIGHT - CONNECT + 1) * WIDTH
    + 2 * (HEIGHT - CONNECT + 1) * (WIDTH - CONNECT + 1);

// 24 horizontal, 21 vertical and 12 along each diagonal
const_assert_eq!(NUM_WINDOWS, 69);

// (row step, column step): horizontal, vertical, down-right, up-right
const SCAN_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (-1, 1)];

// directions checked through the last move, reversed ones are covered by the window offsets
const LINE_DIRECTIONS: [(isize, isize); 4] = [(0, 1), (1, 0), (1, 1), (1, -1)];

/// Every window on the board, horizontal first, then vertical and both diagonals
pub const WINDOWS: [Window; NUM_WINDOWS] = all_windows();

const fn all_windows() -> [Window; NUM_WINDOWS] {
    let mut windows = [[(0, 0); CONNECT]; NUM_WINDOWS];
    let mut n = 0;
    let mut d = 0;
    while d < SCAN_DIRECTIONS.len() {
        let (d_row, d_col) = SCAN_DIRECTIONS[d];
        let mut row = 0;
        while row < HEIGHT {
            let mut col = 0;
            while col < WIDTH {
                let end_row = row as isize + d_row * (CONNECT as isize - 1);
                let end_col = col as isize + d_col * (CONNECT as isize - 1);
                if end_row >= 0 && end_row < HEIGHT as isize && end_col >= 0 && end_col < WIDTH as isize
                {
                    let mut i = 0;
                    while i < CONNECT {
                        windows[n][i] = (
                            (row as isize + d_row * i as isize) as usize,
                            (col as isize + d_col * i as isize) as usize,
                        );
                        i += 1;
                    }
                    n += 1;
                }
                col += 1;
            }
            row += 1;
        }
        d += 1;
    }
    windows
}

/// The Connect 4 grid
///
/// Pieces only ever enter a column at its lowest empty row, so a column never
/// has a gap below an occupied cell. `Board` is `Copy`; the search engine works
/// on its own copy and never touches the caller's board.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; WIDTH]; HEIGHT], // row 0 is the top of the board
    num_moves: usize,
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; WIDTH]; HEIGHT],
            num_moves: 0,
        }
    }

    /// Builds a position from one-indexed column digits, Red moving first
    pub fn from_moves<S: AsRef<str>>(moves: S) -> Result<Self> {
        let mut board = Self::new();
        let mut piece = Piece::Red;
        let mut over = false;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=WIDTH) => {
                    if over {
                        return Err(anyhow!("Invalid position, game is over"));
                    }
                    let row = board.apply_move(column - 1, piece)?;
                    over = board.evaluate_outcome(row, column - 1).is_over();
                    piece = piece.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Returns the cell at `row`, `col`
    ///
    /// # Panics
    /// Panics if the coordinates are off the board
    pub fn get(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    fn cell(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 || row >= HEIGHT as isize || col >= WIDTH as isize {
            return None;
        }
        Some(self.cells[row as usize][col as usize])
    }

    pub fn num_moves(&self) -> usize {
        self.num_moves
    }

    /// Cells in row-major order, top row first
    pub fn cells_row_major(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().flat_map(|row| row.iter().copied())
    }

    pub fn is_valid_move(&self, column: usize) -> bool {
        column < WIDTH && self.cells[0][column].is_empty()
    }

    pub fn is_full(&self) -> bool {
        (0..WIDTH).all(|column| !self.is_valid_move(column))
    }

    /// The lowest empty row of `column`, if any
    pub fn next_open_row(&self, column: usize) -> Option<usize> {
        if column >= WIDTH {
            return None;
        }
        (0..HEIGHT).rev().find(|&row| self.cells[row][column].is_empty())
    }

    /// Drops `piece` into `column`, returning the row it landed on
    pub fn apply_move(&mut self, column: usize, piece: Piece) -> Result<usize, InvalidMoveError> {
        if column >= WIDTH {
            return Err(InvalidMoveError::OutOfRange { column });
        }
        let row = self
            .next_open_row(column)
            .ok_or(InvalidMoveError::ColumnFull { column })?;

        self.cells[row][column] = piece.into();
        self.num_moves += 1;
        Ok(row)
    }

    /// Clears a cell filled by `apply_move`, for in-place exploration
    ///
    /// Only the most recent piece of a column may be taken back, otherwise
    /// the column would be left with a gap.
    pub fn undo(&mut self, column: usize, row: usize) {
        debug_assert!(
            row == 0 || self.cells[row - 1][column].is_empty(),
            "undo below the top piece of column {}",
            column
        );
        if !self.cells[row][column].is_empty() {
            self.cells[row][column] = Cell::Empty;
            self.num_moves -= 1;
        }
    }

    /// Columns that can still take a piece, in ascending order
    pub fn legal_columns(&self) -> Vec<usize> {
        (0..WIDTH).filter(|&column| self.is_valid_move(column)).collect()
    }

    /// Works out the status of the game after a piece landed on `last_row`, `last_col`
    ///
    /// Only lines through the last move are checked, which finds any win the
    /// move could have created.
    pub fn evaluate_outcome(&self, last_row: usize, last_col: usize) -> Outcome {
        let piece = self
            .cell(last_row as isize, last_col as isize)
            .and_then(|cell| cell.piece());

        if let Some(piece) = piece {
            for &(d_row, d_col) in LINE_DIRECTIONS.iter() {
                // slide the window along the line so every placement covers the move
                for offset in (0..CONNECT as isize).rev() {
                    let start_row = last_row as isize - offset * d_row;
                    let start_col = last_col as isize - offset * d_col;
                    if let Some(window) = self.run_from(start_row, start_col, d_row, d_col, piece) {
                        return Outcome::Win(piece, window);
                    }
                }
            }
        }

        self.no_win_outcome()
    }

    /// Works out the status of the game by scanning every window on the board
    pub fn scan_outcome(&self) -> Outcome {
        for window in WINDOWS.iter() {
            let (row, col) = window[0];
            if let Some(piece) = self.cells[row][col].piece() {
                if self.window_cells(window).iter().all(|&cell| cell == Cell::from(piece)) {
                    return Outcome::Win(piece, *window);
                }
            }
        }

        self.no_win_outcome()
    }

    fn no_win_outcome(&self) -> Outcome {
        if self.is_full() {
            Outcome::Draw
        } else {
            Outcome::InProgress
        }
    }

    // the window starting at the given cell, if it is on the board and all `piece`
    fn run_from(
        &self,
        start_row: isize,
        start_col: isize,
        d_row: isize,
        d_col: isize,
        piece: Piece,
    ) -> Option<Window> {
        let mut window = [(0, 0); CONNECT];
        for (i, coord) in window.iter_mut().enumerate() {
            let row = start_row + i as isize * d_row;
            let col = start_col + i as isize * d_col;
            if self.cell(row, col)? != Cell::from(piece) {
                return None;
            }
            *coord = (row as usize, col as usize);
        }
        Some(window)
    }

    /// The cells covered by `window`
    pub fn window_cells(&self, window: &Window) -> [Cell; CONNECT] {
        let mut cells = [Cell::Empty; CONNECT];
        for (cell, &(row, col)) in cells.iter_mut().zip(window.iter()) {
            *cell = self.cells[row][col];
        }
        cells
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
