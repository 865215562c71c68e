//! Positional heuristic used to score boards at the search horizon

use crate::board::{Board, Cell, Piece, WINDOWS};
use crate::{CONNECT, HEIGHT, WIDTH};

/// Score of a window filled by one piece
pub const FOUR_SCORE: i32 = 100;
/// Score of three own pieces and a gap
pub const THREE_SCORE: i32 = 5;
/// Score of two own pieces and two gaps
pub const TWO_SCORE: i32 = 2;
/// Score of three opponent pieces and a gap
pub const OPPONENT_THREE_SCORE: i32 = -4;
/// Bonus for each own piece in the centre column
pub const CENTER_SCORE: i32 = 3;

/// The column crossed by the most lines
pub const CENTER_COLUMN: usize = WIDTH / 2;

/// Scores a single line of cells for `piece`
///
/// Only the counts matter, so a window scores the same read in either direction.
pub fn score_window(window: &[Cell; CONNECT], piece: Piece) -> i32 {
    let own = Cell::from(piece);
    let opponent = Cell::from(piece.opponent());

    let own_count = window.iter().filter(|&&cell| cell == own).count();
    let opponent_count = window.iter().filter(|&&cell| cell == opponent).count();
    let empty_count = window.iter().filter(|cell| cell.is_empty()).count();

    match (own_count, opponent_count, empty_count) {
        (4, _, _) => FOUR_SCORE,
        (3, _, 1) => THREE_SCORE,
        (2, _, 2) => TWO_SCORE,
        (_, 3, 1) => OPPONENT_THREE_SCORE,
        _ => 0,
    }
}

/// Scores the whole board from the point of view of `piece`
///
/// The sum of [`score_window`] over every window on the board, plus a bonus
/// for each of `piece`'s tiles in the centre column.
pub fn score_position(board: &Board, piece: Piece) -> i32 {
    let own = Cell::from(piece);

    let center = (0..HEIGHT)
        .filter(|&row| board.get(row, CENTER_COLUMN) == own)
        .count() as i32;

    WINDOWS
        .iter()
        .map(|window| score_window(&board.window_cells(window), piece))
        .sum::<i32>()
        + CENTER_SCORE * center
}
