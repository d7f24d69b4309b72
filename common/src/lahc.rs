use crate::bitset::BitSet;
use crate::error::ConfigError;
use crate::graph::Graph;
use crate::score::Scorer;
use crate::select::FlipSelector;
use rand::Rng;

/// Iteration budget for one solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SolveOptions {
    pub max_iterations: usize,
    /// Length of the score history ring.
    pub score_memory_size: usize,
}

impl Default for SolveOptions {
    fn default() -> Self {
        SolveOptions {
            max_iterations: 10_000,
            score_memory_size: 1_000,
        }
    }
}

impl SolveOptions {
    pub const ITERATIONS_PER_CELL: usize = 50;
    pub const MEMORY_FRACTION: f64 = 0.25;

    /// Budget proportional to the number of cells: `iterations_per_cell`
    /// iterations each, with a history a `memory_fraction` of that long.
    pub fn scaled(cell_count: usize, iterations_per_cell: usize, memory_fraction: f64) -> Self {
        let max_iterations = cell_count * iterations_per_cell;
        let score_memory_size = (max_iterations as f64 * memory_fraction) as usize;
        SolveOptions {
            max_iterations: max_iterations.max(1),
            score_memory_size: score_memory_size.max(1),
        }
    }

    pub fn for_graph(graph: &Graph) -> Self {
        Self::scaled(
            graph.cells.len(),
            Self::ITERATIONS_PER_CELL,
            Self::MEMORY_FRACTION,
        )
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_iterations == 0 {
            return Err(ConfigError::ZeroIterations);
        }
        if self.score_memory_size == 0 {
            return Err(ConfigError::ZeroMemory);
        }
        Ok(())
    }
}

/// Why a run stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Termination {
    /// Every clue is satisfied.
    PerfectScore,
    /// `max_iterations` used up without reaching zero error.
    IterationCap,
    /// No cell is adjacent to a clue, so there is nothing to flip.
    NoVariables,
}

/// Outcome of [`solve`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveReport {
    /// Error of the graph as handed in.
    pub initial_score: u32,
    /// Error of the committed assignment.
    pub best_score: u32,
    pub iterations: usize,
    pub termination: Termination,
}

/// One Late Acceptance Hill Climbing run. Owns its state, history and lookup
/// tables; nothing is shared with the graph until [`Lahc::commit`].
///
/// A flip is kept when the new score is no worse than the current one, or no
/// worse than the score recorded `score_memory_size` iterations ago. The best
/// state ever seen is what gets written back, not wherever the walk ends.
pub struct Lahc<'r, R: Rng + ?Sized> {
    scorer: Scorer,
    selector: FlipSelector,
    rng: &'r mut R,
    options: SolveOptions,
    current: BitSet,
    current_score: u32,
    best: BitSet,
    best_score: u32,
    initial_score: u32,
    history: Vec<u32>,
    cursor: usize,
    iterations: usize,
    finished: Option<Termination>,
}

impl<'r, R: Rng + ?Sized> Lahc<'r, R> {
    /// Indexes `graph`, records its assignment as the best so far, and starts
    /// the walk from a uniformly random assignment.
    ///
    /// Every slot of the score history starts at the random start's score,
    /// not the input's.
    pub fn new(
        graph: &Graph,
        options: SolveOptions,
        rng: &'r mut R,
    ) -> Result<Self, ConfigError> {
        options.validate()?;

        let scorer = Scorer::new(graph);
        let mut best = scorer.index().read_state(graph);
        let mut best_score = scorer.score(&best);

        let mut current = BitSet::new(best.len());
        for bit in 0..current.len() {
            current.set(bit, rng.random_bool(0.5));
        }
        let current_score = scorer.score(&current);
        // The input wins ties, so an already solved graph comes back as given.
        if current_score < best_score {
            best.clone_from(&current);
            best_score = current_score;
        }

        Ok(Lahc {
            scorer,
            selector: FlipSelector::new(),
            rng,
            options,
            current,
            current_score,
            best,
            best_score,
            initial_score: graph.error_score(),
            history: vec![current_score; options.score_memory_size],
            cursor: 0,
            iterations: 0,
            finished: None,
        })
    }

    pub fn current_score(&self) -> u32 {
        self.current_score
    }

    pub fn best_score(&self) -> u32 {
        self.best_score
    }

    pub fn iterations(&self) -> usize {
        self.iterations
    }

    pub fn termination(&self) -> Option<Termination> {
        self.finished
    }

    /// Runs a single iteration. Returns the termination reason once the run
    /// is over; further calls are no-ops.
    pub fn step(&mut self) -> Option<Termination> {
        if self.finished.is_some() {
            return self.finished;
        }
        if self.current.is_empty() {
            return self.finish(Termination::NoVariables);
        }
        if self.best_score == 0 {
            return self.finish(Termination::PerfectScore);
        }
        if self.iterations >= self.options.max_iterations {
            return self.finish(Termination::IterationCap);
        }

        let fli = self
            .selector
            .select(&self.scorer, &self.current, &mut *self.rng);
        let delta = self.scorer.delta(&self.current, fli);
        let new_score = self.current_score.saturating_add_signed(delta);
        self.current.toggle(fli);
        self.iterations += 1;

        // Ties also replace the best, and count as acceptable below.
        if new_score <= self.best_score {
            self.best_score = new_score;
            self.best.clone_from(&self.current);
        }

        if new_score <= self.current_score || new_score <= self.history[self.cursor] {
            self.current_score = new_score;
        } else {
            self.current.toggle(fli);
        }
        self.history[self.cursor] = new_score;

        if self.best_score == 0 {
            return self.finish(Termination::PerfectScore);
        }
        self.cursor = (self.cursor + 1) % self.history.len();
        None
    }

    fn finish(&mut self, reason: Termination) -> Option<Termination> {
        self.finished = Some(reason);
        self.finished
    }

    /// Steps until the run terminates.
    pub fn run(&mut self) -> Termination {
        loop {
            if let Some(reason) = self.step() {
                return reason;
            }
        }
    }

    /// Writes the best assignment found onto the graph's cells.
    pub fn commit(self, graph: &mut Graph) -> SolveReport {
        self.scorer.index().write_state(&self.best, graph);
        SolveReport {
            initial_score: self.initial_score,
            best_score: self.best_score,
            iterations: self.iterations,
            termination: self.finished.unwrap_or(Termination::IterationCap),
        }
    }
}

/// Searches for an assignment of the graph's clue-adjacent cells that
/// satisfies every clue, and writes the best one found back into `graph`.
///
/// ```
/// use minefill::{Board, Graph, SolveOptions, solve};
/// use rand::SeedableRng;
///
/// let board = Board::parse("...\n.3.\n...\n").unwrap();
/// let mut graph = Graph::from_board(&board);
/// let mut rng = rand::rngs::SmallRng::seed_from_u64(1);
/// let options = SolveOptions::for_graph(&graph);
/// let report = solve(&mut graph, options, &mut rng).unwrap();
/// assert_eq!(report.best_score, 0);
/// assert_eq!(graph.error_score(), 0);
/// ```
pub fn solve<R: Rng + ?Sized>(
    graph: &mut Graph,
    options: SolveOptions,
    rng: &mut R,
) -> Result<SolveReport, ConfigError> {
    let mut lahc = Lahc::new(graph, options, rng)?;
    lahc.run();
    Ok(lahc.commit(graph))
}
