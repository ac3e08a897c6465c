//! Ranking, elitism, and fitness-proportional parent selection.

#![allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]

use std::cmp::Ordering;

use rand::Rng;

use crate::genome::ScoredChromosome;

/// Sort `population` best first. Ties keep their relative order.
pub fn sort_population(population: &mut [ScoredChromosome]) {
    population.sort_by(|a, b| b.fitness.partial_cmp(&a.fitness).unwrap_or(Ordering::Equal));
}

/// How many of `population_size` chromosomes survive a generation unchanged.
#[must_use]
pub fn elite_count(population_size: usize, elitism_perc: f64) -> usize {
    ((population_size as f64 * elitism_perc).ceil() as usize).min(population_size)
}

/// Draw `pairs` pairs of parent indices, each parent chosen with probability proportional to its fitness.
///
/// Falls back to uniform draws when every fitness is zero.
#[must_use]
pub fn select_parents<R: Rng>(population: &[ScoredChromosome], pairs: usize, rng: &mut R) -> Vec<(usize, usize)> {
    if population.is_empty() {
        return Vec::new();
    }

    let total: f64 = population.iter().map(|c| c.fitness).sum();
    (0..pairs)
        .map(|_| (roulette_select(population, total, rng), roulette_select(population, total, rng)))
        .collect()
}

/// Spin the wheel once.
fn roulette_select<R: Rng>(population: &[ScoredChromosome], total: f64, rng: &mut R) -> usize {
    if total <= 0.0 {
        return rng.gen_range(0..population.len());
    }

    let mut remaining = rng.gen_range(0.0..total);
    for (index, candidate) in population.iter().enumerate() {
        remaining -= candidate.fitness;
        if remaining < 0.0 {
            return index;
        }
    }

    // float error can leave a sliver past the last slot
    population.len() - 1
}

/// Summary of one generation's fitness.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionStats {
    /// Mean fitness of the population.
    pub mean_fitness: f64,
    /// Best fitness in the population.
    pub best_fitness: f64,
    /// Worst fitness in the population.
    pub worst_fitness: f64,
    /// Standard deviation of fitness.
    pub fitness_std: f64,
}

impl SelectionStats {
    /// Summarize the fitness of `population`.
    #[must_use]
    pub fn from_population(population: &[ScoredChromosome]) -> Self {
        if population.is_empty() {
            return Self {
                mean_fitness: 0.0,
                best_fitness: 0.0,
                worst_fitness: 0.0,
                fitness_std: 0.0,
            };
        }

        let len = population.len() as f64;
        let mean = population.iter().map(|c| c.fitness).sum::<f64>() / len;
        let best = population.iter().map(|c| c.fitness).fold(f64::NEG_INFINITY, f64::max);
        let worst = population.iter().map(|c| c.fitness).fold(f64::INFINITY, f64::min);
        let variance = population.iter().map(|c| (c.fitness - mean).powi(2)).sum::<f64>() / len;

        Self {
            mean_fitness: mean,
            best_fitness: best,
            worst_fitness: worst,
            fitness_std: variance.sqrt(),
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    use super::*;
    use crate::genome::Chromosome;

    fn population(fitness: &[f64]) -> Vec<ScoredChromosome> {
        fitness.iter()
            .map(|f| ScoredChromosome { fitness: *f, chromosome: Chromosome::empty(1) })
            .collect()
    }

    #[test]
    fn sorts_best_first() {
        let mut pop = population(&[0.2, 0.9, 0.5]);
        sort_population(&mut pop);
        let sorted: Vec<f64> = pop.iter().map(|c| c.fitness).collect();
        assert_eq!(sorted, vec![0.9, 0.5, 0.2]);
    }

    #[test]
    fn elite_counts() {
        assert_eq!(elite_count(20, 0.25), 5);
        assert_eq!(elite_count(20, 0.0), 0);
        assert_eq!(elite_count(7, 0.1), 1);
        assert_eq!(elite_count(5, 1.0), 5);
    }

    #[test]
    fn roulette_prefers_fitter() {
        let mut rng = SmallRng::seed_from_u64(42);
        let pop = population(&[0.05, 0.05, 0.8, 0.1]);

        let mut counts = [0usize; 4];
        for (a, b) in select_parents(&pop, 1000, &mut rng) {
            counts[a] += 1;
            counts[b] += 1;
        }

        let max_idx = counts.iter().enumerate().max_by_key(|(_, c)| **c).unwrap().0;
        assert_eq!(max_idx, 2);
    }

    #[test]
    fn zero_fitness_is_uniform() {
        let mut rng = SmallRng::seed_from_u64(3);
        let pop = population(&[0.0, 0.0, 0.0]);

        let pairs = select_parents(&pop, 300, &mut rng);
        assert_eq!(pairs.len(), 300);
        for index in 0..3 {
            assert!(pairs.iter().any(|(a, b)| *a == index || *b == index));
        }
    }

    #[test]
    fn stats() {
        let stats = SelectionStats::from_population(&population(&[0.25, 0.75]));
        assert_eq!(stats.best_fitness, 0.75);
        assert_eq!(stats.worst_fitness, 0.25);
        assert_eq!(stats.mean_fitness, 0.5);
        assert_eq!(stats.fitness_std, 0.25);
    }
}
