use crate::{evaluate, fill, Board, FitnessWeights, GivenMask, Position};
use rand::Rng;

/// One candidate solution: an exclusively owned board plus its mutation rate
/// and cached fitness.
#[derive(Debug, Clone)]
pub struct Individual {
    board: Board,
    mutation_rate: u8,
    fitness: u32,
}

impl Individual {
    /// Seed a fresh individual from the problem grid: deep-copy the problem,
    /// fill the blanks randomly, mutate once, score.
    pub fn seed(
        problem: &Board,
        mask: &GivenMask,
        mutation_rate: u8,
        weights: FitnessWeights,
        rng: &mut impl Rng,
    ) -> Self {
        let mut board = *problem;
        fill(&mut board, mask, rng);
        let mut individual = Self {
            board,
            mutation_rate,
            fitness: 0,
        };
        individual.mutate(mask, rng);
        individual.score(weights);
        individual
    }

    /// Wrap a freshly crossed-over child board, mutate it, and score it.
    pub fn from_crossover(
        board: Board,
        mask: &GivenMask,
        mutation_rate: u8,
        weights: FitnessWeights,
        rng: &mut impl Rng,
    ) -> Self {
        let mut individual = Self {
            board,
            mutation_rate,
            fitness: 0,
        };
        individual.mutate(mask, rng);
        individual.score(weights);
        individual
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Cached fitness from the most recent [`score`](Self::score)
    pub fn fitness(&self) -> u32 {
        self.fitness
    }

    pub fn is_solution(&self) -> bool {
        self.fitness == 0
    }

    /// Re-roll each non-given cell with probability `mutation_rate` percent.
    /// The replacement is drawn uniformly from [1,9] and may equal the old
    /// value. Given positions are never touched.
    pub fn mutate(&mut self, mask: &GivenMask, rng: &mut impl Rng) {
        for pos in Position::all() {
            let roll: u8 = rng.gen_range(0..100);
            if roll < self.mutation_rate && !mask.contains(pos) {
                self.board.set(pos, rng.gen_range(1..=9));
            }
        }
    }

    /// Refresh the cached fitness from the current board
    pub fn score(&mut self, weights: FitnessWeights) {
        self.fitness = evaluate(&self.board, weights);
    }
}

/// Recombine two parent boards cell by cell: each cell is copied from either
/// parent with equal probability, independently of its neighbors. No row,
/// column, or block structure is preserved by construction.
///
/// `crossover(a, a)` always equals `a`, and given cells come through intact
/// because both parents carry the original given values.
pub fn crossover(a: &Board, b: &Board, rng: &mut impl Rng) -> Board {
    let mut child = *a;
    for pos in Position::all() {
        if rng.gen_bool(0.5) {
            child.set(pos, b.get(pos));
        }
    }
    child
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    const PROBLEM: &str = "53..7....\n\
                           6..195...\n\
                           .98....6.\n\
                           8...6...3\n\
                           4..8.3..1\n\
                           7...2...6\n\
                           .6....28.\n\
                           ...419..5\n\
                           ....8..79";

    fn seeded(seed: u64) -> (Board, GivenMask, StdRng) {
        let problem = Board::from_text(PROBLEM).unwrap();
        let mask = GivenMask::from_problem(&problem);
        (problem, mask, StdRng::seed_from_u64(seed))
    }

    #[test]
    fn seeding_fills_and_scores() {
        let (problem, mask, mut rng) = seeded(1);
        let individual =
            Individual::seed(&problem, &mask, 10, FitnessWeights::default(), &mut rng);

        for pos in Position::all() {
            let v = individual.board().get(pos);
            assert!((1..=9).contains(&v));
            if mask.contains(pos) {
                assert_eq!(v, problem.get(pos));
            }
        }
        assert_eq!(
            individual.fitness(),
            evaluate(individual.board(), FitnessWeights::default())
        );
    }

    #[test]
    fn mutation_never_touches_givens() {
        let (problem, mask, mut rng) = seeded(2);
        let mut individual =
            Individual::seed(&problem, &mask, 100, FitnessWeights::default(), &mut rng);

        for _ in 0..5 {
            individual.mutate(&mask, &mut rng);
            for pos in mask.iter() {
                assert_eq!(individual.board().get(pos), problem.get(pos));
            }
        }
    }

    #[test]
    fn zero_rate_mutation_is_a_no_op() {
        let (problem, mask, mut rng) = seeded(3);
        let mut individual =
            Individual::seed(&problem, &mask, 0, FitnessWeights::default(), &mut rng);
        let before = *individual.board();

        individual.mutate(&mask, &mut rng);
        assert_eq!(*individual.board(), before);
    }

    #[test]
    fn full_rate_mutation_rewrites_free_cells() {
        let (problem, mask, mut rng) = seeded(4);
        let mut individual =
            Individual::seed(&problem, &mask, 100, FitnessWeights::default(), &mut rng);

        individual.mutate(&mask, &mut rng);
        for pos in Position::all() {
            let v = individual.board().get(pos);
            assert!((1..=9).contains(&v));
        }
    }

    #[test]
    fn crossover_of_identical_parents_is_identity() {
        let (problem, mask, mut rng) = seeded(5);
        let mut board = problem;
        fill(&mut board, &mask, &mut rng);

        let child = crossover(&board, &board, &mut rng);
        assert_eq!(child, board);
    }

    #[test]
    fn crossover_takes_every_cell_from_a_parent() {
        let (problem, mask, mut rng) = seeded(6);
        let mut a = problem;
        fill(&mut a, &mask, &mut rng);
        let mut b = problem;
        fill(&mut b, &mask, &mut rng);

        let child = crossover(&a, &b, &mut rng);
        for pos in Position::all() {
            let v = child.get(pos);
            assert!(v == a.get(pos) || v == b.get(pos));
            if mask.contains(pos) {
                assert_eq!(v, problem.get(pos));
            }
        }
    }
}
