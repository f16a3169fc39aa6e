use crossterm::{
    cursor::MoveTo,
    execute,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{Clear, ClearType},
};
use evolve_core::{Board, GenerationReport, Position, GRID_SIZE};
use std::io::{self, Write};

/// Terminal row of the per-generation status line (grid plus borders above it).
pub const STATUS_ROW: u16 = 14;

const BORDER: &str = "+-------+-------+-------+";

/// Clear the screen and redraw the current best board with its status line.
///
/// When a reference solution is supplied, cells that disagree with it are
/// shown as blanks. That redaction is display-only; the evolving boards are
/// never touched.
pub fn draw(
    stdout: &mut io::Stdout,
    report: &GenerationReport,
    reference: Option<&Board>,
) -> io::Result<()> {
    let shown = match reference {
        Some(solution) => redact(&report.best_board, solution),
        None => report.best_board,
    };

    execute!(stdout, Clear(ClearType::All), MoveTo(0, 0))?;
    draw_grid(stdout, &shown)?;

    execute!(
        stdout,
        MoveTo(0, STATUS_ROW),
        Print(format!(
            "generation {}   fitness {}   stagnation {}",
            report.generation, report.best_fitness, report.stagnation
        ))
    )?;
    if report.diversified {
        execute!(
            stdout,
            MoveTo(0, STATUS_ROW + 1),
            SetForegroundColor(Color::Yellow),
            Print("Shuffling..."),
            ResetColor
        )?;
    }

    stdout.flush()
}

/// Replace every cell that disagrees with the reference solution with a blank.
pub fn redact(board: &Board, reference: &Board) -> Board {
    let mut shown = *board;
    for pos in Position::all() {
        if board.get(pos) != reference.get(pos) {
            shown.set(pos, 0);
        }
    }
    shown
}

fn draw_grid(stdout: &mut io::Stdout, board: &Board) -> io::Result<()> {
    let mut y = 0;
    draw_border(stdout, y)?;
    y += 1;

    for row in 0..GRID_SIZE {
        let mut line = String::new();
        for col in 0..GRID_SIZE {
            if col % 3 == 0 {
                line.push_str("| ");
            }
            let v = board.get(Position::new(row, col));
            line.push(if v == 0 { '.' } else { char::from(b'0' + v) });
            line.push(' ');
        }
        line.push('|');
        execute!(stdout, MoveTo(0, y), Print(line))?;
        y += 1;

        if row % 3 == 2 {
            draw_border(stdout, y)?;
            y += 1;
        }
    }
    Ok(())
}

fn draw_border(stdout: &mut io::Stdout, y: u16) -> io::Result<()> {
    execute!(
        stdout,
        MoveTo(0, y),
        SetForegroundColor(Color::DarkGrey),
        Print(BORDER),
        ResetColor
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redaction_blanks_mismatches_only() {
        let reference = Board::from_text(
            "534678912\n672195348\n198342567\n859761423\n426853791\n713924856\n961537284\n287419635\n345286179",
        )
        .unwrap();

        let mut candidate = reference;
        candidate.set(Position::new(0, 0), 9);
        candidate.set(Position::new(8, 8), 1);

        let shown = redact(&candidate, &reference);
        assert_eq!(shown.get(Position::new(0, 0)), 0);
        assert_eq!(shown.get(Position::new(8, 8)), 0);
        for pos in Position::all() {
            if pos != Position::new(0, 0) && pos != Position::new(8, 8) {
                assert_eq!(shown.get(pos), reference.get(pos));
            }
        }
        // The candidate itself is untouched.
        assert_eq!(candidate.get(Position::new(0, 0)), 9);
    }
}
