use anyhow::Result;
use crossterm::{
    style::{style, Attribute, Color, PrintStyledContent},
    QueueableCommand,
};

use std::io::{stdout, Write};

use connect4_minimax::{board::Board, Cell, Outcome, HEIGHT, WIDTH};

/// Draws the board to stdout, highlighting the winning four if there is one
pub fn draw(board: &Board, outcome: &Outcome) -> Result<()> {
    let mut stdout = stdout();

    let cols: String = (1..=WIDTH).map(|x| x.to_string()).collect();
    stdout.queue(PrintStyledContent(style(cols + "\n")))?;

    let winning = match outcome {
        Outcome::Win(_, window) => Some(window),
        _ => None,
    };

    for row in 0..HEIGHT {
        for col in 0..WIDTH {
            let background = if winning.map_or(false, |window| window.contains(&(row, col))) {
                Color::Grey
            } else {
                Color::DarkBlue
            };

            stdout.queue(PrintStyledContent(
                style("O")
                    .attribute(Attribute::Bold)
                    .on(background)
                    .with(match board.get(row, col) {
                        Cell::Red => Color::Red,
                        Cell::Yellow => Color::Yellow,
                        Cell::Empty => background,
                    }),
            ))?;
        }
        stdout.queue(PrintStyledContent(style("\n")))?;
    }
    stdout.flush()?;
    Ok(())
}
