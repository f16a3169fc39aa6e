use crate::{crossover, Board, FitnessWeights, GivenMask, Individual};
use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error from an inconsistent configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("elite count {elite} must be between 1 and the population size {population}")]
    BadEliteCount { elite: usize, population: usize },
}

/// Knobs for the evolutionary search, fixed before the run starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvolverConfig {
    /// Number of live individuals
    pub population_size: usize,
    /// Generations to run before giving up
    pub generation_budget: usize,
    /// Number of top-ranked individuals kept as crossover parents
    pub elite_count: usize,
    /// Per-cell mutation chance, in percent (0-100)
    pub mutation_rate: u8,
    /// Constraint weights used for scoring
    pub weights: FitnessWeights,
    /// Consecutive stale generations before a diversification burst
    pub stagnation_threshold: u32,
    /// Whole-population mutation passes applied per burst
    pub diversification_passes: u32,
}

impl Default for EvolverConfig {
    fn default() -> Self {
        Self {
            population_size: 10_000,
            generation_budget: 10_000,
            elite_count: 1_000,
            mutation_rate: 4,
            weights: FitnessWeights::default(),
            stagnation_threshold: 100,
            diversification_passes: 10,
        }
    }
}

impl EvolverConfig {
    /// Check cross-field consistency. Call this on externally supplied
    /// configuration before seeding a population.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.elite_count < 1 || self.elite_count > self.population_size {
            return Err(ConfigError::BadEliteCount {
                elite: self.elite_count,
                population: self.population_size,
            });
        }
        Ok(())
    }
}

/// Status emitted after each generation for the display layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationReport {
    /// Generations completed so far, counting this one
    pub generation: usize,
    /// Deep copy of the best board from this generation's ranking
    pub best_board: Board,
    pub best_fitness: u32,
    /// Consecutive generations without improvement, as of this generation.
    /// If `diversified` is set this is the value that tripped the burst; the
    /// live counter has already been reset to 0.
    pub stagnation: u32,
    /// Whether a diversification burst fired this generation
    pub diversified: bool,
}

/// Terminal state of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// An elite individual reached fitness 0
    Converged { board: Board, generation: usize },
    /// The generation budget ran out without a solution
    Exhausted { best: Board, fitness: u32 },
}

/// Result of driving the loop one generation forward.
#[derive(Debug, Clone)]
pub enum Step {
    /// The loop continues; status for the display layer
    Progress(GenerationReport),
    /// Terminal state reached
    Done(Outcome),
}

/// The live population and everything the generation loop needs: the given
/// mask, configuration, the elite snapshot, and the stagnation counter.
pub struct Population {
    config: EvolverConfig,
    mask: GivenMask,
    individuals: Vec<Individual>,
    /// Deep copies of the best `elite_count` individuals from the most
    /// recent ranking. Used only as crossover parents; never aliases a live
    /// population slot.
    elite: Vec<Individual>,
    generation: usize,
    stagnation: u32,
    prev_best: Option<u32>,
}

impl Population {
    /// Derive the given mask from the problem grid and seed a full
    /// population: each individual is a deep copy of the problem, filled,
    /// mutated once, and scored.
    pub fn seed(problem: &Board, config: EvolverConfig, rng: &mut impl Rng) -> Self {
        assert!(
            config.elite_count >= 1 && config.elite_count <= config.population_size,
            "elite_count must be in 1..=population_size"
        );
        let mask = GivenMask::from_problem(problem);
        let individuals = (0..config.population_size)
            .map(|_| {
                Individual::seed(problem, &mask, config.mutation_rate, config.weights, rng)
            })
            .collect();
        Self {
            config,
            mask,
            individuals,
            elite: Vec::new(),
            generation: 0,
            stagnation: 0,
            prev_best: None,
        }
    }

    pub fn mask(&self) -> &GivenMask {
        &self.mask
    }

    /// Generations completed so far
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Consecutive generations without improvement in the best fitness
    pub fn stagnation(&self) -> u32 {
        self.stagnation
    }

    /// Elite snapshot from the most recent ranking
    pub fn elite(&self) -> &[Individual] {
        &self.elite
    }

    pub fn individuals(&self) -> &[Individual] {
        &self.individuals
    }

    /// Drive one full evolutionary cycle: rank, check for convergence and
    /// budget exhaustion, repopulate the non-elite slots, update the
    /// stagnation counter, and fire a diversification burst if it hit the
    /// threshold.
    pub fn step(&mut self, rng: &mut impl Rng) -> Step {
        // A burst mutates boards without refreshing their cached fitness, so
        // a cached zero may be stale. Rescore those before ranking trusts
        // them; anything else keeps its cache.
        for individual in &mut self.individuals {
            if individual.is_solution() {
                individual.score(self.config.weights);
            }
        }
        self.rank();

        if let Some(solved) = self.elite.iter().find(|ind| ind.is_solution()) {
            return Step::Done(Outcome::Converged {
                board: *solved.board(),
                generation: self.generation,
            });
        }

        if self.generation >= self.config.generation_budget {
            let best = &self.elite[0];
            return Step::Done(Outcome::Exhausted {
                best: *best.board(),
                fitness: best.fitness(),
            });
        }

        self.repopulate(rng);

        let best_fitness = self.elite[0].fitness();
        match self.prev_best {
            Some(prev) if prev == best_fitness => self.stagnation += 1,
            _ => self.stagnation = 0,
        }
        self.prev_best = Some(best_fitness);
        let stagnation = self.stagnation;

        let mut diversified = false;
        if self.stagnation >= self.config.stagnation_threshold {
            self.diversify(rng);
            diversified = true;
        }

        self.generation += 1;
        Step::Progress(GenerationReport {
            generation: self.generation,
            best_board: *self.elite[0].board(),
            best_fitness,
            stagnation,
            diversified,
        })
    }

    /// Run to a terminal state, handing each generation's report to
    /// `observer`.
    pub fn run(&mut self, rng: &mut impl Rng, mut observer: impl FnMut(&GenerationReport)) -> Outcome {
        loop {
            match self.step(rng) {
                Step::Progress(report) => observer(&report),
                Step::Done(outcome) => return outcome,
            }
        }
    }

    /// Sort the live population ascending by fitness (stable; tie order is
    /// unspecified) and replace the elite snapshot with deep copies of the
    /// first `elite_count` individuals.
    fn rank(&mut self) {
        self.individuals.sort_by_key(Individual::fitness);
        self.elite.clear();
        self.elite
            .extend(self.individuals[..self.config.elite_count].iter().cloned());
    }

    /// Overwrite every non-elite slot with a mutated, scored crossover child
    /// of two elite parents drawn uniformly with replacement (possibly the
    /// same parent twice). The first `elite_count` slots survive untouched.
    fn repopulate(&mut self, rng: &mut impl Rng) {
        for slot in self.config.elite_count..self.config.population_size {
            let a = &self.elite[rng.gen_range(0..self.elite.len())];
            let b = &self.elite[rng.gen_range(0..self.elite.len())];
            let child = crossover(a.board(), b.board(), rng);
            self.individuals[slot] = Individual::from_crossover(
                child,
                &self.mask,
                self.config.mutation_rate,
                self.config.weights,
                rng,
            );
        }
    }

    /// Stagnation escape: mutate every live individual for the configured
    /// number of passes, then reset the counter. Boards are not rescored
    /// here; survivors keep their cached fitness until they are replaced,
    /// which keeps the reported best fitness from regressing after a burst.
    fn diversify(&mut self, rng: &mut impl Rng) {
        for _ in 0..self.config.diversification_passes {
            for individual in &mut self.individuals {
                individual.mutate(&self.mask, rng);
            }
        }
        self.stagnation = 0;
    }
}
