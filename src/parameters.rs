use serde::{Deserialize, Serialize};

use crate::error::ConfigurationError;

/// Tuning of the genetic search, passed to every [`HashiSolver::update`](crate::HashiSolver::update).
///
/// Missing fields take their [`Default`] values when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Parameters {
    /// Candidates per generation.
    pub population_size: usize,
    /// Probability that a selected pair of parents recombines at all.
    pub crossover_prob: f64,
    /// Probability of flipping each bit of a linked direction.
    pub mutation_prob: f64,
    /// Generation after which the search gives up.
    pub max_generations: usize,
    /// Whether to repair weak chromosomes with forced moves.
    pub with_wisdom: bool,
    /// Generations between two repairs.
    pub gens_per_wisdom: usize,
    /// Fraction of the population carried over unchanged.
    pub elitism_perc: f64,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            population_size: 100,
            crossover_prob: 0.8,
            mutation_prob: 0.02,
            max_generations: 1000,
            with_wisdom: true,
            gens_per_wisdom: 10,
            elitism_perc: 0.1,
        }
    }
}

impl Parameters {
    /// Check every field is in range.
    ///
    /// # Errors
    ///
    /// Fails on an empty population, a probability or fraction outside `[0, 1]`, or a zero wisdom cadence while wisdom is enabled.
    pub fn validate(&self) -> Result<(), ConfigurationError> {
        if self.population_size < 1 {
            return Err(ConfigurationError::EmptyPopulation);
        }

        for (name, value) in [
            ("crossover_prob", self.crossover_prob),
            ("mutation_prob", self.mutation_prob),
            ("elitism_perc", self.elitism_perc),
        ] {
            // NaN fails the range check too
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigurationError::ProbabilityOutOfRange { name, value });
            }
        }

        if self.with_wisdom && self.gens_per_wisdom == 0 {
            return Err(ConfigurationError::ZeroWisdomCadence);
        }

        Ok(())
    }

    /// Whether wisdom is due once `generation` generations have completed.
    pub(crate) fn wisdom_due(&self, generation: usize) -> bool {
        self.with_wisdom && generation > 0 && self.gens_per_wisdom > 0 && generation % self.gens_per_wisdom == 0
    }
}
