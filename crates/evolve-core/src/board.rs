use crate::{BLOCK_SIZE, GRID_SIZE};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A (row, column) coordinate on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Iterate over all 81 positions in row-major order
    pub fn all() -> impl Iterator<Item = Position> {
        (0..GRID_SIZE).flat_map(|row| (0..GRID_SIZE).map(move |col| Position { row, col }))
    }

    /// Index (0-8) of the 3x3 block containing this position
    pub fn block(&self) -> usize {
        (self.row / BLOCK_SIZE) * BLOCK_SIZE + self.col / BLOCK_SIZE
    }
}

/// Error from parsing a text grid
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseBoardError {
    #[error("expected 9 rows, found {0}")]
    WrongRowCount(usize),
    #[error("row {row} has {len} cells, expected 9")]
    WrongRowLength { row: usize, len: usize },
}

/// An owned 9x9 grid of cell values. 0 means blank; filled cells hold 1-9.
///
/// `Board` is `Copy`, so every assignment is a deep copy and no two
/// individuals can ever alias the same grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: [[u8; GRID_SIZE]; GRID_SIZE],
}

impl Board {
    /// Create an all-blank board
    pub fn empty() -> Self {
        Self {
            cells: [[0; GRID_SIZE]; GRID_SIZE],
        }
    }

    /// Parse a 9-line text grid: a digit 1-9 is a value, any other
    /// character (including `0`) is a blank.
    pub fn from_text(text: &str) -> Result<Self, ParseBoardError> {
        let lines: Vec<&str> = text.lines().map(|l| l.trim_end_matches('\r')).collect();
        if lines.len() != GRID_SIZE {
            return Err(ParseBoardError::WrongRowCount(lines.len()));
        }

        let mut board = Self::empty();
        for (row, line) in lines.iter().enumerate() {
            let chars: Vec<char> = line.chars().collect();
            if chars.len() != GRID_SIZE {
                return Err(ParseBoardError::WrongRowLength {
                    row,
                    len: chars.len(),
                });
            }
            for (col, c) in chars.iter().enumerate() {
                board.cells[row][col] = match c.to_digit(10) {
                    Some(d) if d >= 1 => d as u8,
                    _ => 0,
                };
            }
        }
        Ok(board)
    }

    pub fn get(&self, pos: Position) -> u8 {
        self.cells[pos.row][pos.col]
    }

    pub fn set(&mut self, pos: Position, value: u8) {
        self.cells[pos.row][pos.col] = value;
    }
}

impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for (row, cells) in self.cells.iter().enumerate() {
            if row > 0 {
                writeln!(f)?;
            }
            for &v in cells {
                if v == 0 {
                    write!(f, ".")?;
                } else {
                    write!(f, "{}", v)?;
                }
            }
        }
        Ok(())
    }
}

/// The set of positions fixed by the original puzzle.
///
/// Derived once from the problem grid's non-blank cells and read-only for
/// the rest of the run; every genetic operator checks it before touching a
/// cell, which is what keeps given values intact in every board.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GivenMask {
    given: [[bool; GRID_SIZE]; GRID_SIZE],
    count: usize,
}

impl GivenMask {
    /// Mark every non-blank cell of the problem grid as given
    pub fn from_problem(problem: &Board) -> Self {
        let mut given = [[false; GRID_SIZE]; GRID_SIZE];
        let mut count = 0;
        for pos in Position::all() {
            if problem.get(pos) != 0 {
                given[pos.row][pos.col] = true;
                count += 1;
            }
        }
        Self { given, count }
    }

    pub fn contains(&self, pos: Position) -> bool {
        self.given[pos.row][pos.col]
    }

    /// Number of given cells
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterate over the given positions in row-major order
    pub fn iter(&self) -> impl Iterator<Item = Position> + '_ {
        Position::all().filter(|&pos| self.contains(pos))
    }
}

/// Assign a uniform random value in [1,9] to every blank cell outside the
/// mask. Cells that already hold a value (given cells included) are left
/// untouched.
pub fn fill(board: &mut Board, mask: &GivenMask, rng: &mut impl Rng) {
    for pos in Position::all() {
        if board.get(pos) == 0 && !mask.contains(pos) {
            board.set(pos, rng.gen_range(1..=9));
        }
    }
}
