use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::builder::GridBuilder;
use crate::crossover::crossover;
use crate::error::{EvaluationError, SolveError};
use crate::fitness::score;
use crate::genome::{Chromosome, Population, ScoredChromosome};
use crate::graph::IslandGraph;
use crate::mutation::mutate;
use crate::parameters::Parameters;
use crate::selection::{elite_count, select_parents, sort_population, SelectionStats};
use crate::view::BoardView;
use crate::wisdom;

/// Where a [`HashiSolver`] is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SolverState {
    /// No puzzle loaded.
    Uninitialized,
    /// A puzzle and a fresh population are loaded; no generation has run yet.
    Ready,
    /// At least one generation has run and the search may continue.
    Running,
    /// The best chromosome is a valid solution.
    Solved,
    /// The generation limit was reached without a solution.
    Exhausted,
}

impl SolverState {
    /// Whether [`HashiSolver::update`] will do no further work.
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Solved | Self::Exhausted)
    }
}

/// Drives the genetic search over one puzzle, one generation per call to [`update`](Self::update).
///
/// All randomness comes from the injected `R`, so two solvers seeded alike run identically.
/// The `bool`-returning control surface wraps the `try_*` methods, keeping the last failure in [`last_error`](Self::last_error).
#[derive(Debug, Clone)]
pub struct HashiSolver<R: Rng = SmallRng> {
    rng: R,
    graph: Option<IslandGraph>,
    parameters: Parameters,
    // sorted best first between generations
    population: Population,
    generation: usize,
    best: Option<ScoredChromosome>,
    best_percentage: f64,
    state: SolverState,
    last_error: Option<SolveError>,
}

impl HashiSolver<SmallRng> {
    /// A solver drawing from a [`SmallRng`] seeded with `seed`.
    pub fn seeded(seed: u64, parameters: Parameters) -> Self {
        Self::new(parameters, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> HashiSolver<R> {
    /// An uninitialized solver drawing from `rng`.
    pub fn new(parameters: Parameters, rng: R) -> Self {
        Self {
            rng,
            graph: None,
            parameters,
            population: Vec::new(),
            generation: 0,
            best: None,
            best_percentage: 0.0,
            state: SolverState::Uninitialized,
            last_error: None,
        }
    }

    /// Load a puzzle from rows of cell codes and breed a fresh population for it.
    ///
    /// On failure any previously loaded puzzle is discarded and the solver is left [`Uninitialized`](SolverState::Uninitialized).
    pub fn try_initialize(&mut self, grid: &[Vec<i32>]) -> Result<(), SolveError> {
        match GridBuilder::from_rows(grid).build() {
            Ok(graph) => self.load_graph(graph),
            Err(err) => {
                self.unload();
                Err(err.into())
            }
        }
    }

    /// Like [`try_initialize`](Self::try_initialize) but for an already built graph.
    pub fn load_graph(&mut self, graph: IslandGraph) -> Result<(), SolveError> {
        info!(islands = graph.islands().len(), links = graph.links().len(), "puzzle loaded");
        self.graph = Some(graph);
        self.try_reset().inspect_err(|_| self.unload())
    }

    /// Discard the population and generation counter, keeping the puzzle.
    pub fn try_reset(&mut self) -> Result<(), SolveError> {
        self.parameters.validate()?;
        let graph = self.graph.as_mut().ok_or(SolveError::NotInitialized)?;

        self.population = fresh_population(graph, self.parameters.population_size, &mut self.rng)?;
        self.generation = 0;
        self.best = self.population.first().cloned();
        self.best_percentage = self.best.as_ref().map_or(0.0, |best| best.fitness * 100.0);
        if let Some(best) = &self.best {
            graph.apply_layout(&best.chromosome);
        }
        self.state = SolverState::Ready;

        debug!(population = self.population.len(), best = self.best_percentage, "population reset");
        Ok(())
    }

    /// Run one generation under `parameters`.
    ///
    /// Returns the state reached. Terminal states return immediately without doing any work.
    /// If the population size differs from `parameters.population_size`, a fresh population of the new size is bred first.
    pub fn try_update(&mut self, parameters: &Parameters) -> Result<SolverState, SolveError> {
        match self.state {
            SolverState::Uninitialized => return Err(SolveError::NotInitialized),
            state if state.is_terminal() => return Ok(state),
            _ => {}
        }
        parameters.validate()?;

        let graph = self.graph.as_mut().ok_or(SolveError::NotInitialized)?;
        let population = &mut self.population;
        let rng = &mut self.rng;

        if population.len() != parameters.population_size {
            debug!(from = population.len(), to = parameters.population_size, "resizing population");
            *population = fresh_population(graph, parameters.population_size, rng)?;
        }
        self.parameters = *parameters;

        if self.generation >= parameters.max_generations {
            info!(generation = self.generation, "generation limit reached");
            self.state = SolverState::Exhausted;
            return Ok(self.state);
        }

        let elites = elite_count(population.len(), parameters.elitism_perc);
        let mut next = breed(graph, population, elites, parameters, rng)?;
        self.generation += 1;

        if parameters.wisdom_due(self.generation) {
            sort_population(&mut next[elites..]);
            let repaired = wisdom::inject(graph, &mut next, elites)?;
            debug!(generation = self.generation, repaired, "wisdom injected");
        }
        sort_population(&mut next);
        *population = next;

        if let Some(leader) = population.first() {
            if self.best.as_ref().map_or(true, |best| leader.fitness > best.fitness) {
                self.best = Some(leader.clone());
            }
        }
        if let Some(best) = &self.best {
            self.best_percentage = best.fitness * 100.0;
            graph.apply_layout(&best.chromosome);
        }

        let stats = SelectionStats::from_population(population);
        debug!(
            generation = self.generation,
            best = stats.best_fitness,
            mean = stats.mean_fitness,
            std = stats.fitness_std,
            "generation complete"
        );

        self.state = if self.best.as_ref().is_some_and(ScoredChromosome::is_optimal) {
            info!(generation = self.generation, "solved");
            SolverState::Solved
        } else if self.generation >= parameters.max_generations {
            info!(generation = self.generation, best = self.best_percentage, "generation limit reached");
            SolverState::Exhausted
        } else {
            SolverState::Running
        };

        Ok(self.state)
    }

    /// Load a puzzle, returning whether it succeeded.
    pub fn initialize(&mut self, grid: &[Vec<i32>]) -> bool {
        let result = self.try_initialize(grid);
        self.record(result).is_some()
    }

    /// Reset the search, returning whether it succeeded.
    pub fn reset(&mut self) -> bool {
        let result = self.try_reset();
        self.record(result).is_some()
    }

    /// Run one generation, returning whether the search should continue.
    ///
    /// `false` means the puzzle is solved, the generation limit is reached, or something failed; see [`state`](Self::state) and [`last_error`](Self::last_error).
    pub fn update(&mut self, parameters: &Parameters) -> bool {
        let result = self.try_update(parameters);
        self.record(result).is_some_and(|state| !state.is_terminal())
    }

    fn record<T>(&mut self, result: Result<T, SolveError>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(%err, "solver call failed");
                self.last_error = Some(err);
                None
            }
        }
    }

    fn unload(&mut self) {
        self.graph = None;
        self.population.clear();
        self.generation = 0;
        self.best = None;
        self.best_percentage = 0.0;
        self.state = SolverState::Uninitialized;
    }

    /// The current lifecycle state.
    pub fn state(&self) -> SolverState {
        self.state
    }

    /// Generations completed since the last reset.
    pub fn generation(&self) -> usize {
        self.generation
    }

    /// Fitness of the best chromosome seen since the last reset, as a percentage.
    pub fn best_percentage(&self) -> f64 {
        self.best_percentage
    }

    /// The best chromosome seen since the last reset.
    pub fn best(&self) -> Option<&ScoredChromosome> {
        self.best.as_ref()
    }

    /// The loaded puzzle, with island completion following the best chromosome.
    pub fn graph(&self) -> Option<&IslandGraph> {
        self.graph.as_ref()
    }

    /// The current population, best first.
    pub fn population(&self) -> &[ScoredChromosome] {
        &self.population
    }

    /// Parameters of the last successful update, or those given at construction.
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    /// The most recent failure of a `bool`-returning call.
    pub fn last_error(&self) -> Option<&SolveError> {
        self.last_error.as_ref()
    }

    /// A snapshot for rendering, or `None` before a puzzle is loaded.
    pub fn view(&self) -> Option<BoardView> {
        self.graph.as_ref().map(|graph| {
            BoardView::capture(graph, self.best.as_ref().map(|b| (&b.chromosome, b.fitness)), self.generation)
        })
    }
}

/// `size` random chromosomes, scored and sorted best first.
fn fresh_population<R: Rng>(graph: &IslandGraph, size: usize, rng: &mut R) -> Result<Population, EvaluationError> {
    let mut population = (0..size)
        .map(|_| score(graph, Chromosome::random(graph, rng)))
        .collect::<Result<Population, _>>()?;
    sort_population(&mut population);
    Ok(population)
}

/// The next generation: the first `elites` of `population` unchanged, then scored offspring.
fn breed<R: Rng>(
    graph: &IslandGraph,
    population: &[ScoredChromosome],
    elites: usize,
    parameters: &Parameters,
    rng: &mut R,
) -> Result<Population, EvaluationError> {
    let size = population.len();
    let mut next = Vec::with_capacity(size);
    next.extend(population.iter().take(elites).cloned());

    let pairs = (size - next.len()).div_ceil(2);
    for (a, b) in select_parents(population, pairs, rng) {
        let (first, second) = crossover(graph, &population[a].chromosome, &population[b].chromosome, parameters.crossover_prob, rng);
        for mut child in [first, second] {
            if next.len() == size {
                break;
            }
            mutate(graph, &mut child, parameters.mutation_prob, rng);
            next.push(score(graph, child)?);
        }
    }

    Ok(next)
}
