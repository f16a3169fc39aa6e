//! Evolutionary Sudoku search engine.
//!
//! Solves puzzles by evolving a population of candidate boards toward zero
//! constraint violations: elitist selection, per-cell crossover and mutation,
//! and stagnation-triggered diversification bursts. There is no backtracking
//! and no convergence guarantee; a run ends either [`Outcome::Converged`]
//! (a zero-conflict board was found) or [`Outcome::Exhausted`] (the
//! generation budget ran out).
//!
//! All randomness is threaded explicitly as `&mut impl Rng`, so fixed seeds
//! give reproducible runs and tests.
//!
//! ```
//! use evolve_core::{Board, EvolverConfig, Population, Step};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let problem = Board::from_text("53..7....\n6..195...\n.98....6.\n8...6...3\n4..8.3..1\n7...2...6\n.6....28.\n...419..5\n....8..79").unwrap();
//! let mut rng = StdRng::seed_from_u64(42);
//! let config = EvolverConfig {
//!     population_size: 100,
//!     generation_budget: 10,
//!     elite_count: 10,
//!     ..EvolverConfig::default()
//! };
//! let mut population = Population::seed(&problem, config, &mut rng);
//! while let Step::Progress(report) = population.step(&mut rng) {
//!     println!("gen {}: fitness {}", report.generation, report.best_fitness);
//! }
//! ```

mod board;
mod fitness;
mod individual;
mod population;

pub use board::{fill, Board, GivenMask, ParseBoardError, Position};
pub use fitness::{evaluate, FitnessWeights};
pub use individual::{crossover, Individual};
pub use population::{ConfigError, EvolverConfig, GenerationReport, Outcome, Population, Step};

/// Side length of the grid.
pub const GRID_SIZE: usize = 9;

/// Side length of one 3x3 block.
pub const BLOCK_SIZE: usize = 3;
