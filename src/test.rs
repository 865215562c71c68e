#[cfg(test)]
pub mod test {
    use anyhow::{anyhow, Result};
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    use crate::board::{Board, Cell, Outcome, Piece, Window, WINDOWS};
    use crate::evaluator::{score_position, score_window};
    use crate::game::Game;
    use crate::search::{SearchEngine, WIN_SCORE};
    use crate::{GameError, InvalidMoveError, NoLegalMoveError, DEFAULT_DEPTH, HEIGHT, WIDTH};

    // every window holding four identical pieces, each sorted by coordinate
    fn winning_windows(board: &Board) -> Vec<Window> {
        WINDOWS
            .iter()
            .filter(|window| {
                let cells = board.window_cells(window);
                !cells[0].is_empty() && cells.iter().all(|&cell| cell == cells[0])
            })
            .map(|window| {
                let mut window = *window;
                window.sort_unstable();
                window
            })
            .collect()
    }

    fn random_column(board: &Board, rng: &mut StdRng) -> usize {
        let columns = board.legal_columns();
        columns[rng.random_range(0..columns.len())]
    }

    #[test]
    pub fn legal_columns_track_full_columns() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..200 {
            let mut board = Board::new();
            let mut piece = Piece::Red;
            while !board.is_full() {
                board.apply_move(random_column(&board, &mut rng), piece)?;
                piece = piece.opponent();

                let expected: Vec<usize> = (0..WIDTH)
                    .filter(|&column| board.get(0, column) == Cell::Empty)
                    .collect();
                assert_eq!(board.legal_columns(), expected);
            }
            assert!(board.legal_columns().is_empty());
            assert_eq!(board.num_moves(), WIDTH * HEIGHT);
        }
        Ok(())
    }

    #[test]
    pub fn local_win_check_matches_full_scan() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(42);
        let mut wins = 0;

        for _ in 0..2000 {
            let mut board = Board::new();
            let mut piece = Piece::Red;
            loop {
                let column = random_column(&board, &mut rng);
                let row = board.apply_move(column, piece)?;
                let outcome = board.evaluate_outcome(row, column);
                let oracle = winning_windows(&board);

                match outcome {
                    Outcome::Win(winner, mut window) => {
                        assert_eq!(winner, piece);
                        window.sort_unstable();
                        assert!(
                            oracle.contains(&window),
                            "{:?} not found by the full scan of\n{}",
                            window,
                            board
                        );
                        assert_eq!(board.scan_outcome().winner(), Some(piece));
                        wins += 1;
                        break;
                    }
                    Outcome::Draw => {
                        assert!(oracle.is_empty());
                        assert!(board.is_full());
                        assert_eq!(board.scan_outcome(), Outcome::Draw);
                        break;
                    }
                    Outcome::InProgress => {
                        assert!(oracle.is_empty(), "missed a win on\n{}", board);
                        assert_eq!(board.scan_outcome(), Outcome::InProgress);
                    }
                }
                piece = piece.opponent();
            }
        }
        assert!(wins > 0);
        Ok(())
    }

    #[test]
    pub fn win_detection_in_every_direction() -> Result<()> {
        // vertical, red in column 1
        let board = Board::from_moves("1212121")?;
        assert_eq!(
            board.evaluate_outcome(2, 0),
            Outcome::Win(Piece::Red, [(2, 0), (3, 0), (4, 0), (5, 0)])
        );

        // rising to the right, red
        let board = Board::from_moves("12233434544")?;
        match board.evaluate_outcome(2, 3) {
            Outcome::Win(Piece::Red, mut window) => {
                window.sort_unstable();
                assert_eq!(window, [(2, 3), (3, 2), (4, 1), (5, 0)]);
            }
            other => return Err(anyhow!("expected a red diagonal win, got {:?}", other)),
        }

        // falling to the right, red
        let board = Board::from_moves("76655454344")?;
        match board.evaluate_outcome(2, 3) {
            Outcome::Win(Piece::Red, mut window) => {
                window.sort_unstable();
                assert_eq!(window, [(2, 3), (3, 4), (4, 5), (5, 6)]);
            }
            other => return Err(anyhow!("expected a red diagonal win, got {:?}", other)),
        }
        Ok(())
    }

    #[test]
    pub fn full_board_without_four_is_a_draw() -> Result<()> {
        let mut board = Board::new();
        // columns alternate in pairs of rows, so no line of four forms
        for column in 0..WIDTH {
            for row in 0..HEIGHT {
                let piece = if (row / 2 + column) % 2 == 0 {
                    Piece::Red
                } else {
                    Piece::Yellow
                };
                board.apply_move(column, piece)?;
            }
        }
        assert!(winning_windows(&board).is_empty());
        assert_eq!(board.evaluate_outcome(0, WIDTH - 1), Outcome::Draw);
        assert_eq!(board.scan_outcome(), Outcome::Draw);
        Ok(())
    }

    #[test]
    pub fn window_score_ignores_direction() {
        let cells = [Cell::Empty, Cell::Red, Cell::Yellow];

        for code in 0..81 {
            let mut window = [Cell::Empty; 4];
            let mut rest = code;
            for cell in window.iter_mut() {
                *cell = cells[rest % 3];
                rest /= 3;
            }
            let mut reversed = window;
            reversed.reverse();

            for &piece in [Piece::Red, Piece::Yellow].iter() {
                assert_eq!(score_window(&window, piece), score_window(&reversed, piece));
            }
        }
    }

    #[test]
    pub fn position_score_is_stable() -> Result<()> {
        let board = Board::from_moves("4453361")?;
        let first = score_position(&board, Piece::Yellow);
        assert_eq!(score_position(&board, Piece::Yellow), first);
        assert_eq!(score_position(&board, Piece::Red), score_position(&board, Piece::Red));
        Ok(())
    }

    #[test]
    pub fn undo_restores_the_board() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(3);
        let mut board = Board::from_moves("443256")?;

        for _ in 0..100 {
            if board.is_full() {
                break;
            }
            let before = board;
            let column = random_column(&board, &mut rng);
            let row = board.apply_move(column, Piece::Yellow)?;
            assert_ne!(board, before);
            board.undo(column, row);
            assert_eq!(board, before);

            board.apply_move(column, Piece::Red)?;
        }
        Ok(())
    }

    #[test]
    pub fn takes_an_immediate_win() -> Result<()> {
        // red holds columns 1-3 of the bottom row
        let board = Board::from_moves("112233")?;
        let mut engine = SearchEngine::with_seed(0);

        assert_eq!(engine.choose_move(&board, Piece::Red, DEFAULT_DEPTH)?, 3);
        assert_eq!(engine.search(&board, Piece::Red, DEFAULT_DEPTH).score, WIN_SCORE);
        Ok(())
    }

    #[test]
    pub fn blocks_an_immediate_loss() -> Result<()> {
        // red holds columns 4-6 of the bottom row, yellow to move
        let board = Board::from_moves("44556")?;
        let mut engine = SearchEngine::with_seed(0);

        let column = engine.choose_move(&board, Piece::Yellow, DEFAULT_DEPTH)?;
        assert!(column == 2 || column == 6, "played {}", column);
        // the lowest blocking column is preferred
        assert_eq!(column, 2);
        Ok(())
    }

    #[test]
    pub fn prefers_winning_over_blocking() -> Result<()> {
        // red threatens column 4 on the bottom row, yellow can finish column 7
        let board = Board::from_moves("1727673")?;
        let mut engine = SearchEngine::with_seed(0);

        let column = engine.choose_move(&board, Piece::Yellow, DEFAULT_DEPTH)?;
        assert_eq!(column, 6);
        let mut after = board;
        let row = after.apply_move(column, Piece::Yellow)?;
        assert_eq!(after.evaluate_outcome(row, column).winner(), Some(Piece::Yellow));
        Ok(())
    }

    #[test]
    pub fn opens_in_the_centre() -> Result<()> {
        let board = Board::new();
        let mut engine = SearchEngine::with_seed(0);

        assert_eq!(engine.choose_move(&board, Piece::Yellow, 4)?, 3);
        assert_eq!(board, Board::new());
        assert!(engine.node_count > 0);
        Ok(())
    }

    #[test]
    pub fn search_is_deterministic() -> Result<()> {
        let board = Board::from_moves("4435")?;
        let first = SearchEngine::with_seed(1).search(&board, Piece::Red, 5);
        let second = SearchEngine::with_seed(2).search(&board, Piece::Red, 5);
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    pub fn never_picks_a_full_column() -> Result<()> {
        let mut rng = StdRng::seed_from_u64(11);
        let mut engine = SearchEngine::with_seed(11);

        for _ in 0..40 {
            let mut board = Board::new();
            let mut piece = Piece::Red;
            loop {
                let column = engine.choose_move(&board, piece, 3)?;
                assert!(board.is_valid_move(column), "column {} is full", column);

                // mix in random moves to reach varied positions
                let column = if rng.random_range(0..3) == 0 {
                    random_column(&board, &mut rng)
                } else {
                    column
                };
                let row = board.apply_move(column, piece)?;
                if board.evaluate_outcome(row, column).is_over() {
                    break;
                }
                piece = piece.opponent();
            }
        }
        Ok(())
    }

    #[test]
    pub fn full_board_has_no_move() {
        let mut board = Board::new();
        for column in 0..WIDTH {
            for _ in 0..HEIGHT {
                board.apply_move(column, Piece::Red).unwrap();
            }
        }
        let mut engine = SearchEngine::with_seed(0);

        assert_eq!(
            engine.choose_move(&board, Piece::Yellow, DEFAULT_DEPTH),
            Err(NoLegalMoveError)
        );
        assert_eq!(engine.search(&board, Piece::Yellow, DEFAULT_DEPTH).column, None);
    }

    #[test]
    pub fn finished_game_falls_back_to_a_legal_column() -> Result<()> {
        // red won on the bottom row, boxed in by yellow on both ends
        let board = Board::from_moves("2136475")?;
        assert_eq!(board.scan_outcome().winner(), Some(Piece::Red));

        let first = SearchEngine::with_seed(5).choose_move(&board, Piece::Yellow, DEFAULT_DEPTH)?;
        let second = SearchEngine::with_seed(5).choose_move(&board, Piece::Yellow, DEFAULT_DEPTH)?;
        assert!(board.is_valid_move(first));
        assert_eq!(first, second);
        Ok(())
    }

    #[test]
    pub fn zero_depth_still_plays() -> Result<()> {
        let board = Board::from_moves("44")?;
        let mut engine = SearchEngine::with_seed(0);
        let column = engine.choose_move(&board, Piece::Red, 0)?;
        assert_eq!(column, engine.choose_move(&board, Piece::Red, 1)?);
        Ok(())
    }

    #[test]
    pub fn self_play_reaches_an_end() -> Result<()> {
        let mut game = Game::new(Piece::Red);
        let mut engine = SearchEngine::with_seed(9);

        while !game.is_over() {
            let depth = if game.to_move() == Piece::Red { 2 } else { 4 };
            let record = game.play_computer(&mut engine, depth)?;
            assert_eq!(game.board().get(record.row, record.column), Cell::from(record.piece));
        }
        assert_eq!(game.outcome().winner(), game.board().scan_outcome().winner());
        Ok(())
    }

    #[test]
    pub fn game_alternates_and_ends() -> Result<()> {
        let mut game = Game::new(Piece::Red);
        assert!(game.is_human_turn());
        assert_eq!(game.status_message(), "Your turn.");

        for &column in [0, 1, 0, 1, 0, 1].iter() {
            game.play(column)?;
        }
        assert_eq!(game.to_move(), Piece::Red);
        let record = game.play(0)?;
        assert_eq!(record.piece, Piece::Red);
        assert_eq!(
            record.outcome,
            Outcome::Win(Piece::Red, [(2, 0), (3, 0), (4, 0), (5, 0)])
        );
        assert!(game.is_over());
        assert!(!game.is_human_turn());
        assert_eq!(game.status_message(), "You win!");
        assert_eq!(game.play(2), Err(GameError::GameOver));

        let mut engine = SearchEngine::with_seed(0);
        assert_eq!(
            game.play_computer(&mut engine, DEFAULT_DEPTH),
            Err(GameError::GameOver)
        );

        game.reset();
        assert_eq!(game.board(), &Board::new());
        assert_eq!(game.outcome(), Outcome::InProgress);
        Ok(())
    }

    #[test]
    pub fn game_rejects_bad_columns() -> Result<()> {
        let mut game = Game::new(Piece::Yellow);
        assert!(!game.is_human_turn());
        assert_eq!(game.computer(), Piece::Red);

        assert_eq!(
            game.play(WIDTH),
            Err(GameError::InvalidMove(InvalidMoveError::OutOfRange { column: WIDTH }))
        );
        for _ in 0..HEIGHT {
            game.play(6)?;
        }
        assert_eq!(
            game.play(6),
            Err(GameError::InvalidMove(InvalidMoveError::ColumnFull { column: 6 }))
        );
        // rejected moves do not pass the turn
        assert_eq!(game.to_move(), Piece::Red);
        Ok(())
    }

    #[test]
    pub fn error_messages() {
        assert_eq!(
            InvalidMoveError::OutOfRange { column: 9 }.to_string(),
            "Invalid move, column 9 out of range. Columns must be between 0 and 6"
        );
        assert_eq!(
            InvalidMoveError::ColumnFull { column: 2 }.to_string(),
            "Invalid move, column 2 full"
        );
        assert_eq!(InvalidMoveError::ColumnFull { column: 2 }.column(), 2);
        assert_eq!(
            NoLegalMoveError.to_string(),
            "No legal move available, the board is full"
        );
        assert_eq!(
            GameError::from(NoLegalMoveError).to_string(),
            "No legal move available, the board is full"
        );
        assert_eq!(GameError::GameOver.to_string(), "Game is over");
    }
}
