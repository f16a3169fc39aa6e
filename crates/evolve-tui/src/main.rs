mod render;

use clap::Parser;
use crossterm::{cursor::MoveTo, execute};
use evolve_core::{Board, EvolverConfig, Outcome, Population, Step};
use rand::{rngs::StdRng, SeedableRng};
use std::error::Error;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

/// Evolve a Sudoku solution from a puzzle file.
#[derive(Parser)]
#[command(name = "evolve", version, about)]
struct Args {
    /// Problem grid: 9 lines, one character per cell; non-digits and 0 are blanks
    problem: PathBuf,

    /// Reference solution used to redact the progress display
    #[arg(long)]
    solution: Option<PathBuf>,

    /// Number of individuals in the population
    #[arg(long, default_value_t = 10_000)]
    population: usize,

    /// Generation budget
    #[arg(long, default_value_t = 10_000)]
    generations: usize,

    /// Number of elite individuals kept as crossover parents
    #[arg(long, default_value_t = 1_000)]
    parents: usize,

    /// Per-cell mutation chance in percent
    #[arg(long, default_value_t = 4, value_parser = clap::value_parser!(u8).range(..=100))]
    mutation_rate: u8,

    /// Stale generations before a diversification burst
    #[arg(long, default_value_t = 100)]
    stagnation_threshold: u32,

    /// Whole-population mutation passes per burst
    #[arg(long, default_value_t = 10)]
    burst_passes: u32,

    /// Fix the RNG seed for a reproducible run
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> ExitCode {
    let args = Args::parse();
    match run(args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    // Read both grids before anything else; a bad input file must stop the
    // run here, not partway through the loop.
    let problem = read_board(&args.problem)?;
    let reference = match &args.solution {
        Some(path) => Some(read_board(path)?),
        None => None,
    };

    let config = EvolverConfig {
        population_size: args.population,
        generation_budget: args.generations,
        elite_count: args.parents,
        mutation_rate: args.mutation_rate,
        stagnation_threshold: args.stagnation_threshold,
        diversification_passes: args.burst_passes,
        ..EvolverConfig::default()
    };
    config.validate()?;

    // from_entropy seeds from the OS and aborts if that fails; a biased
    // fallback source would make the whole search meaningless.
    let mut rng = match args.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let start = Instant::now();
    let mut population = Population::seed(&problem, config, &mut rng);
    let mut stdout = io::stdout();

    let outcome = loop {
        match population.step(&mut rng) {
            Step::Progress(report) => render::draw(&mut stdout, &report, reference.as_ref())?,
            Step::Done(outcome) => break outcome,
        }
    };
    let elapsed = start.elapsed();

    execute!(stdout, MoveTo(0, render::STATUS_ROW + 2))?;
    match outcome {
        Outcome::Converged { board, generation } => {
            println!("Solved after {} generations:", generation);
            println!("{}", board);
        }
        Outcome::Exhausted { best, fitness } => {
            println!("Generation budget exhausted; best fitness {}:", fitness);
            println!("{}", best);
        }
    }
    println!("Search took {:.2?}", elapsed);

    Ok(())
}

fn read_board(path: &Path) -> Result<Board, Box<dyn Error>> {
    let text =
        fs::read_to_string(path).map_err(|e| format!("cannot read {}: {}", path.display(), e))?;
    let board =
        Board::from_text(&text).map_err(|e| format!("{}: {}", path.display(), e))?;
    Ok(board)
}
