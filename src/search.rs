//! An agent to choose Connect 4 moves by depth-limited game tree search

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::board::{Board, Outcome, Piece};
use crate::evaluator::score_position;
use crate::NoLegalMoveError;

/// The score of a position won by the moving piece
pub const WIN_SCORE: i32 = 1_000_000;

/// The move picked by a search and the score it was given
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    /// `None` only when the board has no empty column
    pub column: Option<usize>,
    pub score: i32,
}

/// An agent to pick Connect 4 moves
///
/// # Notes
/// Before searching, the agent plays any move that wins on the spot, then
/// blocks any column the opponent could win with next turn. Otherwise it runs
/// a minimax search with alpha-beta pruning to the requested depth, scoring
/// positions at the horizon with [`score_position`].
///
/// # Position Scoring
/// Scores are always from the point of view of the piece being moved.
/// A forced win inside the search horizon is worth [`WIN_SCORE`], a forced loss
/// `-WIN_SCORE` and a full board 0, regardless of how many moves away they are.
///
/// Ties go to the lowest column, so a given board, piece and depth always
/// produce the same move.
pub struct SearchEngine {
    /// The number of nodes searched by the last search (for diagnostics only)
    pub node_count: usize,
    rng: StdRng,
}

impl SearchEngine {
    /// Creates a new `SearchEngine` with an entropy-seeded fallback generator
    pub fn new() -> Self {
        Self {
            node_count: 0,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a new `SearchEngine` whose fallback moves are reproducible
    pub fn with_seed(seed: u64) -> Self {
        Self {
            node_count: 0,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Picks a column for `piece` to play on `board`, searching `depth` plies ahead
    ///
    /// A depth of 0 is treated as 1.
    pub fn choose_move(
        &mut self,
        board: &Board,
        piece: Piece,
        depth: u32,
    ) -> Result<usize, NoLegalMoveError> {
        self.search(board, piece, depth).column.ok_or(NoLegalMoveError)
    }

    /// Like [`choose_move`](Self::choose_move), but also returns the score of the move
    pub fn search(&mut self, board: &Board, piece: Piece, depth: u32) -> SearchResult {
        self.node_count = 0;

        let legal_columns = board.legal_columns();
        if legal_columns.is_empty() {
            return SearchResult {
                column: None,
                score: 0,
            };
        }

        // explore on a private copy, the caller's board is never touched
        let mut scratch = *board;

        if let Some(column) = self.find_winning_move(&mut scratch, piece, &legal_columns) {
            return SearchResult {
                column: Some(column),
                score: WIN_SCORE,
            };
        }

        if let Some(column) = self.find_winning_move(&mut scratch, piece.opponent(), &legal_columns)
        {
            return SearchResult {
                column: Some(column),
                score: score_after(&mut scratch, column, piece),
            };
        }

        let outcome = scratch.scan_outcome();
        let (column, score) = self.minimax(
            &mut scratch,
            depth.max(1),
            i32::MIN,
            i32::MAX,
            true,
            piece,
            outcome,
        );
        debug_assert_eq!(scratch, *board, "search left moves on the board");

        // only reachable when handed a finished game
        let column = column.or_else(|| {
            let i = self.rng.random_range(0..legal_columns.len());
            Some(legal_columns[i])
        });

        SearchResult { column, score }
    }

    /// Returns the first column in `columns` that completes four for `piece`
    fn find_winning_move(
        &mut self,
        board: &mut Board,
        piece: Piece,
        columns: &[usize],
    ) -> Option<usize> {
        for &column in columns {
            self.node_count += 1;

            let row = match board.apply_move(column, piece) {
                Ok(row) => row,
                Err(_) => continue,
            };
            let outcome = board.evaluate_outcome(row, column);
            board.undo(column, row);

            if outcome.winner() == Some(piece) {
                return Some(column);
            }
        }
        None
    }

    /// Performs game tree search
    ///
    /// `piece` is the maximizing side throughout; `maximizing` tells whose turn
    /// it is at this level. `outcome` is the status of `board` after the move
    /// that led here. Returns the best column at this level (if any child was
    /// searched) and its score (see [Position Scoring]).
    ///
    /// [Position Scoring]: SearchEngine#position-scoring
    #[allow(clippy::too_many_arguments)]
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
        piece: Piece,
        outcome: Outcome,
    ) -> (Option<usize>, i32) {
        self.node_count += 1;

        match outcome {
            Outcome::Win(winner, _) if winner == piece => return (None, WIN_SCORE),
            Outcome::Win(_, _) => return (None, -WIN_SCORE),
            Outcome::Draw => return (None, 0),
            Outcome::InProgress => {}
        }

        let columns = board.legal_columns();
        if depth == 0 || columns.is_empty() {
            return (None, score_position(board, piece));
        }

        let to_play = if maximizing { piece } else { piece.opponent() };
        let mut best_column = None;
        let mut best_score = if maximizing { i32::MIN } else { i32::MAX };

        for column in columns {
            let row = match board.apply_move(column, to_play) {
                Ok(row) => row,
                Err(_) => continue,
            };
            let child_outcome = board.evaluate_outcome(row, column);
            let (_, score) = self.minimax(
                board,
                depth - 1,
                alpha,
                beta,
                !maximizing,
                piece,
                child_outcome,
            );
            // take the move back before any pruning so the board is always restored
            board.undo(column, row);

            if maximizing {
                if score > best_score {
                    best_score = score;
                    best_column = Some(column);
                }
                alpha = alpha.max(best_score);
            } else {
                if score < best_score {
                    best_score = score;
                    best_column = Some(column);
                }
                beta = beta.min(best_score);
            }

            // the other side will never allow this line
            if alpha >= beta {
                break;
            }
        }

        (best_column, best_score)
    }
}

// heuristic score once `piece` has dropped into `column`
fn score_after(board: &mut Board, column: usize, piece: Piece) -> i32 {
    match board.apply_move(column, piece) {
        Ok(row) => {
            let score = score_position(board, piece);
            board.undo(column, row);
            score
        }
        Err(_) => score_position(board, piece),
    }
}

impl Default for SearchEngine {
    fn default() -> Self {
        Self::new()
    }
}
