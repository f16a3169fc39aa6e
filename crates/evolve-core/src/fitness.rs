use crate::{Board, Position, BLOCK_SIZE, GRID_SIZE};
use serde::{Deserialize, Serialize};

/// Weight applied to each missing value per constraint group.
///
/// The defaults count rows and columns twice as heavily as blocks. That bias
/// is an empirical tuning knob, not a correctness requirement; change it here
/// rather than assuming the search depends on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessWeights {
    /// Weight for rows and columns
    pub line: u32,
    /// Weight for 3x3 blocks
    pub block: u32,
}

impl Default for FitnessWeights {
    fn default() -> Self {
        Self { line: 2, block: 1 }
    }
}

/// Count constraint violations on a board. Pure and deterministic; ignores
/// the given mask entirely.
///
/// Each row, column, and block contributes `weight * (9 - distinct)`, where
/// `distinct` counts the distinct values 1-9 present (blanks never count).
/// With nonzero weights the result is 0 iff the board is a complete, valid
/// solution.
pub fn evaluate(board: &Board, weights: FitnessWeights) -> u32 {
    let mut score = 0;

    for row in 0..GRID_SIZE {
        let d = distinct((0..GRID_SIZE).map(|col| board.get(Position::new(row, col))));
        score += weights.line * (GRID_SIZE as u32 - d);
    }

    for col in 0..GRID_SIZE {
        let d = distinct((0..GRID_SIZE).map(|row| board.get(Position::new(row, col))));
        score += weights.line * (GRID_SIZE as u32 - d);
    }

    for block in 0..GRID_SIZE {
        let base_row = (block / BLOCK_SIZE) * BLOCK_SIZE;
        let base_col = (block % BLOCK_SIZE) * BLOCK_SIZE;
        let d = distinct((0..GRID_SIZE).map(|i| {
            board.get(Position::new(
                base_row + i / BLOCK_SIZE,
                base_col + i % BLOCK_SIZE,
            ))
        }));
        score += weights.block * (GRID_SIZE as u32 - d);
    }

    score
}

fn distinct(values: impl Iterator<Item = u8>) -> u32 {
    let mut seen = [false; 10];
    let mut count = 0;
    for v in values {
        if v != 0 && !seen[v as usize] {
            seen[v as usize] = true;
            count += 1;
        }
    }
    count
}
